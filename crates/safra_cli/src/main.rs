//! CLI smoke entry for `safra_core`.
//!
//! Prints linkage info; when `SAFRA_DB_PATH` holds a non-blank path, also
//! opens that database and prints per-slot record counts and the account
//! summary.

use safra_core::config::{env_value, DB_PATH_ENV};
use safra_core::{init_logging_from_config, CoreConfig, DateRange, FarmStores};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("safra_core ping={}", safra_core::ping());
    println!("safra_core version={}", safra_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if init_logging_from_config(&config)? {
        log::info!(
            "event=cli_start module=cli status=ok level={}",
            config.log_level
        );
    }

    if env_value(DB_PATH_ENV).is_none() {
        return Ok(());
    }

    let stores = FarmStores::open(&config).map_err(|err| err.to_string())?;
    println!("db_path={}", config.db_path.display());
    for (key, count) in stores.slot_counts() {
        println!("slot {key} records={count}");
    }

    let summary = stores.finance().summary(&DateRange::unbounded());
    println!(
        "payable open={:.2} paid={:.2}",
        summary.payable.open(),
        summary.payable.paid
    );
    println!(
        "receivable open={:.2} paid={:.2}",
        summary.receivable.open(),
        summary.receivable.paid
    );
    println!(
        "balance realized={:.2} projected={:.2}",
        summary.realized_balance(),
        summary.projected_balance()
    );
    Ok(())
}
