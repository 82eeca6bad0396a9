//! Term parsing and matching for record search.
//!
//! Two policies coexist and are picked per term:
//! - [`SearchMode::Words`]: every whitespace-separated word must appear
//!   (substring) in at least one of the record's text fields.
//! - [`SearchMode::Code`]: the term is compared against the record's code
//!   fields, exact or substring. Records without any code fall back to
//!   word matching.
//!
//! A term is a code when it is a single token of letters and digits, joined
//! by `-`, `_`, `/` or `.`, holding at least one digit (`PC-0012`, `SKU42`,
//! `123.456.789-00`).

use crate::model::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}]+(?:[-_/.][\p{L}\p{N}]+)*$").expect("valid code term regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Words,
    Code,
}

/// Classifies a raw term.
pub fn detect_search_mode(term: &str) -> SearchMode {
    let term = term.trim();
    if CODE_TERM_RE.is_match(term) && term.chars().any(|c| c.is_ascii_digit()) {
        SearchMode::Code
    } else {
        SearchMode::Words
    }
}

/// Normalized search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub mode: SearchMode,
    normalized: String,
    words: Vec<String>,
}

impl TextQuery {
    /// Returns `None` for blank terms.
    pub fn parse(term: &str) -> Option<Self> {
        let normalized = term.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let words = normalized
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();
        Some(Self {
            mode: detect_search_mode(&normalized),
            normalized,
            words,
        })
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self.mode {
            SearchMode::Words => self.matches_words(record),
            SearchMode::Code => {
                let codes = record
                    .search_codes()
                    .into_iter()
                    .filter(|code| !code.trim().is_empty())
                    .collect::<Vec<_>>();
                if codes.is_empty() {
                    return self.matches_words(record);
                }
                codes.iter().any(|code| {
                    let code = code.trim().to_lowercase();
                    code == self.normalized || code.contains(&self.normalized)
                })
            }
        }
    }

    fn matches_words<T: Record>(&self, record: &T) -> bool {
        let fields = record
            .search_text()
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
        self.words
            .iter()
            .all(|word| fields.iter().any(|field| field.contains(word.as_str())))
    }
}

/// Filters `records` by `term`, keeping their order.
pub fn search_records<T: Record>(records: Vec<T>, term: &str) -> Vec<T> {
    let Some(query) = TextQuery::parse(term) else {
        return records;
    };
    records
        .into_iter()
        .filter(|record| query.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{detect_search_mode, search_records, SearchMode, TextQuery};
    use crate::model::activity::{Activity, ActivityDraft};
    use crate::model::purchase_order::{OrderLine, PurchaseOrder, PurchaseOrderDraft};
    use crate::model::record::Record;

    fn activity(title: &str) -> Activity {
        Activity::from_draft(
            title.to_string(),
            "2024-01-01".to_string(),
            ActivityDraft::new(title, "2024-01-01"),
        )
    }

    fn order(code: &str, line: &str) -> PurchaseOrder {
        let mut draft = PurchaseOrderDraft::new("2024-01-01", vec![OrderLine::new(line, 1.0, 1.0)]);
        draft.code = code.to_string();
        PurchaseOrder::from_draft(code.to_string(), "2024-01-01".to_string(), draft)
    }

    #[test]
    fn detects_codes_and_free_text() {
        assert_eq!(detect_search_mode("PC-0012"), SearchMode::Code);
        assert_eq!(detect_search_mode("sku42"), SearchMode::Code);
        assert_eq!(detect_search_mode("123.456.789-00"), SearchMode::Code);
        assert_eq!(detect_search_mode("milho"), SearchMode::Words);
        assert_eq!(detect_search_mode("PC 0012"), SearchMode::Words);
    }

    #[test]
    fn blank_term_parses_to_none() {
        assert!(TextQuery::parse("   ").is_none());
    }

    #[test]
    fn words_must_all_match_in_any_order() {
        let records = vec![activity("Plantio de Milho"), activity("Colheita de Soja")];

        let hits = search_records(records.clone(), "milho plantio");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Plantio de Milho");

        assert!(search_records(records, "milho colheita").is_empty());
    }

    #[test]
    fn code_terms_match_exact_or_partial_codes() {
        let records = vec![order("PC-0012", "Adubo"), order("PC-0120", "Semente")];

        let exact = search_records(records.clone(), " pc-0012 ");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].code, "PC-0012");

        let partial = search_records(records, "0012");
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn code_term_falls_back_to_words_without_codes() {
        let records = vec![activity("Safra 2024"), activity("Safra 2025")];
        let hits = search_records(records, "2024");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Safra 2024");
    }
}
