//! Date-range and predicate filters.
//!
//! # Invariants
//! - Range bounds are inclusive on both ends.
//! - Records whose date cannot be parsed are excluded from range results,
//!   never reported as errors.
//! - A blank range bound is open; a malformed one makes the range empty.
//! - Predicates combine with logical AND.

use crate::model::dates::parse_date;
use crate::model::record::Record;
use chrono::NaiveDate;
use log::debug;

/// Inclusive date window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Set when a bound was given but could not be parsed; such a range
    /// contains no date.
    malformed: bool,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start,
            end,
            malformed: false,
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Builds a range from stored-date strings. A blank bound is open; a
    /// non-blank bound that does not parse makes the range match nothing.
    pub fn parse(start: &str, end: &str) -> Self {
        let (start, start_ok) = parse_bound(start);
        let (end, end_ok) = parse_bound(end);
        let malformed = !(start_ok && end_ok);
        if malformed {
            debug!(
                "event=date_range_parse module=query status=malformed start_ok={} end_ok={}",
                start_ok, end_ok
            );
        }
        Self {
            start,
            end,
            malformed,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.malformed
            && self.start.map_or(true, |start| start <= date)
            && self.end.map_or(true, |end| date <= end)
    }

    /// Parses `value` and checks it against the window. Unparseable values
    /// are outside every range.
    pub fn contains_str(&self, value: &str) -> bool {
        parse_date(value).is_some_and(|date| self.contains(date))
    }
}

/// `(date, well_formed)`; blank input is a well-formed open bound.
fn parse_bound(value: &str) -> (Option<NaiveDate>, bool) {
    if value.trim().is_empty() {
        return (None, true);
    }
    let date = parse_date(value);
    (date, date.is_some())
}

/// One boxed record test.
pub struct Predicate<'a, T> {
    test: Box<dyn Fn(&T) -> bool + 'a>,
}

impl<'a, T> Predicate<'a, T> {
    pub fn custom(test: impl Fn(&T) -> bool + 'a) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// Case-insensitive equality on one text field. A blank `expected`
    /// accepts everything, like an unset select box.
    pub fn equals(field: impl Fn(&T) -> &str + 'a, expected: &str) -> Self {
        let expected = expected.trim().to_lowercase();
        Self::custom(move |record| {
            expected.is_empty() || field(record).trim().to_lowercase() == expected
        })
    }

    /// Case-insensitive substring match on one text field. A blank `needle`
    /// accepts everything.
    pub fn contains(field: impl Fn(&T) -> &str + 'a, needle: &str) -> Self {
        let needle = needle.trim().to_lowercase();
        Self::custom(move |record| {
            needle.is_empty() || field(record).to_lowercase().contains(needle.as_str())
        })
    }

    pub fn matches(&self, record: &T) -> bool {
        (self.test)(record)
    }
}

/// Records whose [`Record::record_date`] falls within `range` and that pass
/// every predicate.
pub fn filter_by_range<T: Record>(
    records: &[T],
    range: &DateRange,
    predicates: &[Predicate<'_, T>],
) -> Vec<T> {
    filter_by_date(records, range, |record| record.record_date(), predicates)
}

/// Range filter over an arbitrary date field.
pub fn filter_by_date<T: Clone>(
    records: &[T],
    range: &DateRange,
    date: impl Fn(&T) -> &str,
    predicates: &[Predicate<'_, T>],
) -> Vec<T> {
    let mut skipped = 0usize;
    let selected = records
        .iter()
        .filter(|record| match parse_date(date(*record)) {
            Some(day) => range.contains(day),
            None => {
                skipped += 1;
                false
            }
        })
        .filter(|record| predicates.iter().all(|predicate| predicate.matches(record)))
        .cloned()
        .collect();

    if skipped > 0 {
        debug!(
            "event=filter_by_range module=query status=ok skipped_unparseable={}",
            skipped
        );
    }
    selected
}

/// Predicate-only filter.
pub fn filter_records<T: Clone>(records: &[T], predicates: &[Predicate<'_, T>]) -> Vec<T> {
    records
        .iter()
        .filter(|record| predicates.iter().all(|predicate| predicate.matches(record)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_by_range, DateRange, Predicate};
    use crate::model::account::{Account, AccountDraft, AccountKind, AccountStatus};
    use crate::model::record::Record;

    fn account(id: &str, due: &str, category: &str, status: AccountStatus) -> Account {
        let mut draft = AccountDraft::new(AccountKind::Payable, id, 100.0, due);
        draft.category = category.to_string();
        draft.status = status;
        Account::from_draft(id.to_string(), "2024-01-01".to_string(), draft)
    }

    fn ids(accounts: &[Account]) -> Vec<&str> {
        accounts.iter().map(|account| account.id.as_str()).collect()
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let records = vec![
            account("a", "2024-01-01", "insumos", AccountStatus::Pending),
            account("b", "2024-01-15", "insumos", AccountStatus::Pending),
            account("c", "2024-02-01", "insumos", AccountStatus::Pending),
        ];

        let range = DateRange::parse("2024-01-01", "2024-01-31");
        assert_eq!(ids(&filter_by_range(&records, &range, &[])), vec!["a", "b"]);
    }

    #[test]
    fn unparseable_dates_are_excluded() {
        let records = vec![
            account("a", "2024-01-10", "insumos", AccountStatus::Pending),
            account("b", "sem data", "insumos", AccountStatus::Pending),
        ];

        let hits = filter_by_range(&records, &DateRange::unbounded(), &[]);
        assert_eq!(ids(&hits), vec!["a"]);
    }

    #[test]
    fn blank_bounds_are_open() {
        let records = vec![
            account("a", "2023-06-01", "insumos", AccountStatus::Pending),
            account("b", "2025-06-01", "insumos", AccountStatus::Pending),
        ];

        let range = DateRange::parse("  ", "2024-01-01");
        assert!(!range.is_malformed());
        assert_eq!(ids(&filter_by_range(&records, &range, &[])), vec!["a"]);
        assert_eq!(
            ids(&filter_by_range(&records, &DateRange::parse("", ""), &[])),
            vec!["a", "b"]
        );
    }

    #[test]
    fn malformed_bounds_match_nothing() {
        let records = vec![
            account("a", "2020-01-01", "insumos", AccountStatus::Pending),
            account("b", "2024-01-15", "insumos", AccountStatus::Pending),
        ];

        let bad_start = DateRange::parse("2024-13-45", "2024-01-31");
        assert!(bad_start.is_malformed());
        assert!(filter_by_range(&records, &bad_start, &[]).is_empty());

        let bad_end = DateRange::parse("2020-01-01", "amanhã");
        assert!(filter_by_range(&records, &bad_end, &[]).is_empty());
        assert!(!bad_end.contains_str("2020-01-01"));
    }

    #[test]
    fn predicates_combine_with_and() {
        let records = vec![
            account("a", "2024-01-10", "Insumos", AccountStatus::Paid),
            account("b", "2024-01-11", "insumos", AccountStatus::Pending),
            account("c", "2024-01-12", "combustível", AccountStatus::Pending),
        ];

        let predicates = [
            Predicate::equals(|a: &Account| a.status.as_str(), "pending"),
            Predicate::contains(|a: &Account| a.category.as_str(), "INSU"),
        ];
        let range = DateRange::parse("2024-01-01", "2024-01-31");
        assert_eq!(
            ids(&filter_by_range(&records, &range, &predicates)),
            vec!["b"]
        );
    }
}
