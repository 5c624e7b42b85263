//! Compliance statistics over result records.
//!
//! A record is *valid* for ratio statistics when its effective target and its
//! calculated value are both finite and strictly positive. Invalid records
//! still count towards `total_results` and `unique_indicators`.
//!
//! The compliance ratio is direction-aware:
//! - decreasing trend (lower is better): `target / value`
//! - anything else: `value / target`
//!
//! The displayed percentage is capped at [`COMPLIANCE_CAP`]; the
//! high-performance check uses the uncapped ratio.

use std::collections::{BTreeMap, HashSet};

use kpi_core::ResultRecord;
use kpi_utils::numbers::{mean, positive_finite};
use serde::Serialize;

use crate::catalog::IndicatorCatalog;

/// Upper bound of a displayed compliance percentage.
pub const COMPLIANCE_CAP: f64 = 100.0;
/// Uncapped percentage at or above which a result is a high performer.
pub const HIGH_PERFORMANCE_THRESHOLD: f64 = 95.0;

/// Direction in which a good measurement moves relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl Trend {
    /// "decreasing", "desc" and "down" (any case) mean lower is better;
    /// everything else, including no hint, means higher is better.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(|h| h.trim().to_lowercase()).as_deref() {
            Some("decreasing") | Some("desc") | Some("down") => Trend::Decreasing,
            _ => Trend::Increasing,
        }
    }
}

/// Compliance of one valid record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compliance {
    /// Uncapped actual/target (or target/actual) ratio
    pub ratio: f64,
    /// `min(ratio * 100, 100)`
    pub percent: f64,
}

impl Compliance {
    fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            percent: (ratio * 100.0).min(COMPLIANCE_CAP),
        }
    }

    pub fn is_high_performer(&self) -> bool {
        self.ratio * 100.0 >= HIGH_PERFORMANCE_THRESHOLD
    }
}

/// Compliance of a record, `None` when the record is not valid.
pub fn compliance(record: &ResultRecord, catalog: &IndicatorCatalog<'_>) -> Option<Compliance> {
    let target = positive_finite(catalog.effective_target(record))?;
    let value = positive_finite(record.calculated_value)?;
    let ratio = match Trend::from_hint(catalog.effective_trend(record)) {
        Trend::Decreasing => target / value,
        Trend::Increasing => value / target,
    };
    Some(Compliance::from_ratio(ratio))
}

/// Summary metrics shown above the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total_results: usize,
    /// Mean capped percentage over valid records, 0 when there are none
    pub avg_compliance: f64,
    pub high_performance: usize,
    pub unique_indicators: usize,
}

/// Summarize one collection.
pub fn summarize<'r, I>(records: I, catalog: &IndicatorCatalog<'_>) -> ComplianceSummary
where
    I: IntoIterator<Item = &'r ResultRecord>,
{
    let mut total_results = 0;
    let mut percents = Vec::new();
    let mut high_performance = 0;
    let mut indicators = HashSet::new();

    for record in records {
        total_results += 1;
        indicators.insert(record.indicator_id());
        if let Some(c) = compliance(record, catalog) {
            percents.push(c.percent);
            if c.is_high_performer() {
                high_performance += 1;
            }
        }
    }

    ComplianceSummary {
        total_results,
        avg_compliance: mean(&percents),
        high_performance,
        unique_indicators: indicators.len(),
    }
}

/// Summarize the filtered collection when `use_filtered_source` is set,
/// the full collection otherwise.
pub fn summarize_source(
    all: &[ResultRecord],
    filtered: &[&ResultRecord],
    use_filtered_source: bool,
    catalog: &IndicatorCatalog<'_>,
) -> ComplianceSummary {
    if use_filtered_source {
        summarize(filtered.iter().copied(), catalog)
    } else {
        summarize(all, catalog)
    }
}

/// Grouping key for a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Indicator,
    Headquarters,
}

/// Per-indicator or per-headquarters compliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// Normalized id, `""` for records without a usable reference
    pub key: String,
    pub label: String,
    pub records: usize,
    pub valid: usize,
    pub avg_compliance: f64,
    pub high_performance: usize,
}

#[derive(Default)]
struct GroupAccumulator {
    label: Option<String>,
    records: usize,
    percents: Vec<f64>,
    high_performance: usize,
}

fn group_label(record: &ResultRecord, group_by: GroupBy) -> Option<String> {
    match group_by {
        GroupBy::Indicator => {
            let name = record.indicator_name.as_deref()?;
            Some(match record.indicator_code.as_deref() {
                Some(code) => format!("{} - {}", code, name),
                None => name.to_string(),
            })
        }
        GroupBy::Headquarters => record.headquarters_label().map(str::to_string),
    }
}

/// Break a collection down by indicator or headquarters, ordered by label.
pub fn breakdown<'r, I>(
    records: I,
    group_by: GroupBy,
    catalog: &IndicatorCatalog<'_>,
) -> Vec<GroupSummary>
where
    I: IntoIterator<Item = &'r ResultRecord>,
{
    let mut groups: BTreeMap<String, GroupAccumulator> = BTreeMap::new();

    for record in records {
        let key = match group_by {
            GroupBy::Indicator => record.indicator_id(),
            GroupBy::Headquarters => record.headquarters_id(),
        };
        let entry = groups.entry(key).or_default();
        entry.records += 1;
        if entry.label.is_none() {
            entry.label = group_label(record, group_by);
        }
        if let Some(c) = compliance(record, catalog) {
            entry.percents.push(c.percent);
            if c.is_high_performer() {
                entry.high_performance += 1;
            }
        }
    }

    let mut results: Vec<GroupSummary> = groups
        .into_iter()
        .map(|(key, acc)| GroupSummary {
            label: acc.label.unwrap_or_else(|| {
                if key.is_empty() {
                    "(unassigned)".to_string()
                } else {
                    key.clone()
                }
            }),
            key,
            records: acc.records,
            valid: acc.percents.len(),
            avg_compliance: mean(&acc.percents),
            high_performance: acc.high_performance,
        })
        .collect();
    results.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));

    log::debug!(
        "aggregate: breakdown by {:?} produced {} groups",
        group_by,
        results.len()
    );
    results
}
