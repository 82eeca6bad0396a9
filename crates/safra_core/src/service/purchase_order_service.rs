//! Purchase order use-cases.
//!
//! Codes follow `PC-NNNN`. Code assignment reads the current list and then
//! creates, so two concurrent creators may compute the same code; codes are
//! display labels, identity stays with `id`.

use crate::model::dates::format_date;
use crate::model::purchase_order::{
    PurchaseOrder, PurchaseOrderDraft, PurchaseOrderPatch, PurchaseOrderStatus,
};
use crate::repo::collection::{CollectionManager, RepoResult};
use log::warn;

pub const ORDER_CODE_PREFIX: &str = "PC-";
const ORDER_CODE_WIDTH: usize = 4;

pub struct PurchaseOrderService {
    orders: CollectionManager<PurchaseOrder>,
}

impl PurchaseOrderService {
    pub fn new(orders: CollectionManager<PurchaseOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &CollectionManager<PurchaseOrder> {
        &self.orders
    }

    /// Next sequential code, one past the highest existing `PC-` code.
    pub fn next_code(&self) -> String {
        let orders = self.orders.list();
        let number = next_order_number(orders.iter().map(|order| order.code.as_str()));
        format_order_code(number)
    }

    /// Creates an order, filling a blank code and a blank order date.
    pub fn create_order(&self, mut draft: PurchaseOrderDraft) -> RepoResult<PurchaseOrder> {
        if draft.code.trim().is_empty() {
            draft.code = self.next_code();
        }
        if draft.order_date.trim().is_empty() {
            draft.order_date = format_date(self.orders.clock().today());
        }
        self.orders.create(draft)
    }

    /// Writes any status; transitions are not restricted.
    pub fn set_status(&self, id: &str, status: PurchaseOrderStatus) -> RepoResult<PurchaseOrder> {
        self.orders.update(
            id,
            PurchaseOrderPatch {
                status: Some(status),
                ..PurchaseOrderPatch::default()
            },
        )
    }

    pub fn find_by_code(&self, code: &str) -> Option<PurchaseOrder> {
        let code = code.trim();
        self.orders
            .list()
            .into_iter()
            .find(|order| order.code.eq_ignore_ascii_case(code))
    }
}

/// One past the highest parseable number. A manual code at `u32::MAX`
/// pins the sequence there instead of wrapping around.
fn next_order_number<'a>(codes: impl IntoIterator<Item = &'a str>) -> u32 {
    let highest = codes
        .into_iter()
        .filter_map(parse_order_number)
        .max()
        .unwrap_or(0);
    highest.checked_add(1).unwrap_or_else(|| {
        warn!(
            "event=order_code_next module=purchasing status=saturated highest={}",
            highest
        );
        highest
    })
}

fn parse_order_number(code: &str) -> Option<u32> {
    let code = code.trim();
    let prefix = code.get(..ORDER_CODE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ORDER_CODE_PREFIX) {
        return None;
    }
    code[ORDER_CODE_PREFIX.len()..].parse().ok()
}

fn format_order_code(number: u32) -> String {
    format!(
        "{}{:0width$}",
        ORDER_CODE_PREFIX,
        number,
        width = ORDER_CODE_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::{format_order_code, next_order_number, parse_order_number};

    #[test]
    fn order_numbers_parse_case_insensitively() {
        assert_eq!(parse_order_number("PC-0042"), Some(42));
        assert_eq!(parse_order_number(" pc-7 "), Some(7));
        assert_eq!(parse_order_number("VD-0001"), None);
        assert_eq!(parse_order_number("PC-"), None);
        assert_eq!(parse_order_number("P"), None);
    }

    #[test]
    fn next_number_follows_the_highest_code() {
        assert_eq!(next_order_number(Vec::<&str>::new()), 1);
        assert_eq!(next_order_number(["PC-0003", "VD-0099", "PC-0010"]), 11);
    }

    #[test]
    fn next_number_does_not_wrap_past_the_largest_code() {
        let highest = format!("PC-{}", u32::MAX);
        assert_eq!(next_order_number([highest.as_str(), "PC-0001"]), u32::MAX);
        assert_eq!(parse_order_number("PC-4294967296"), None);
    }

    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(format_order_code(7), "PC-0007");
        assert_eq!(format_order_code(12345), "PC-12345");
    }
}
