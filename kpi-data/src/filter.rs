//! Result filtering.
//!
//! A record passes when every non-empty criterion matches. Empty criteria
//! impose no constraint, so the default filter passes everything. Matching
//! records keep their input order.

use kpi_core::ResultRecord;
use kpi_utils::text::{contains_folded, search_term};
use serde::{Deserialize, Serialize};

/// The four independent criteria of the results table.
///
/// Ids are compared against normalized record references as strings, so
/// `"3"` matches a record whose indicator arrived as `3`, `3.0`, `"3"` or
/// `{"id": 3}`.
///
/// The search term is trimmed before use, both for the emptiness check and
/// for matching: `"rate "` matches `"North rate"`. Matching is a
/// case-insensitive substring test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFilter {
    pub search: String,
    pub indicator_id: String,
    pub headquarters_id: String,
    pub year: String,
}

impl ResultFilter {
    /// True if any criterion constrains the collection.
    pub fn is_active(&self) -> bool {
        search_term(&self.search).is_some()
            || !self.indicator_id.is_empty()
            || !self.headquarters_id.is_empty()
            || !self.year.is_empty()
    }

    pub fn matches(&self, record: &ResultRecord) -> bool {
        self.matches_with_term(record, search_term(&self.search).as_deref())
    }

    fn matches_with_term(&self, record: &ResultRecord, term: Option<&str>) -> bool {
        term.map_or(true, |t| matches_search(record, t))
            && (self.indicator_id.is_empty() || record.indicator_id() == self.indicator_id)
            && (self.headquarters_id.is_empty()
                || record.headquarters_id() == self.headquarters_id)
            && (self.year.is_empty() || record.year_text() == self.year)
    }

    /// Stable filter over the full collection.
    pub fn apply<'a>(&self, records: &'a [ResultRecord]) -> Vec<&'a ResultRecord> {
        let term = search_term(&self.search);
        let filtered: Vec<&ResultRecord> = records
            .iter()
            .filter(|r| self.matches_with_term(r, term.as_deref()))
            .collect();
        log::debug!(
            "filter: {} of {} results match {:?}",
            filtered.len(),
            records.len(),
            self
        );
        filtered
    }
}

fn matches_search(record: &ResultRecord, term: &str) -> bool {
    contains_folded(record.indicator_name.as_deref(), term)
        || contains_folded(record.indicator_code.as_deref(), term)
        || contains_folded(record.headquarter_name.as_deref(), term)
}
