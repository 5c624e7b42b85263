//! Label/value pairs for the filter selectors.

use std::collections::BTreeSet;

use kpi_core::{Headquarters, Indicator, ResultRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// `"<code> - <name>"` when the indicator has a code, else just the name.
pub fn indicator_label(indicator: &Indicator) -> String {
    match indicator.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => format!("{} - {}", code, indicator.name),
        _ => indicator.name.clone(),
    }
}

pub fn indicator_options(indicators: &[Indicator]) -> Vec<SelectOption> {
    indicators
        .iter()
        .map(|i| SelectOption {
            label: indicator_label(i),
            value: i.id.clone(),
        })
        .collect()
}

pub fn headquarters_options(headquarters: &[Headquarters]) -> Vec<SelectOption> {
    headquarters
        .iter()
        .map(|h| SelectOption {
            label: h.name.clone(),
            value: h.id.clone(),
        })
        .collect()
}

/// Distinct years present in the results, newest first.
pub fn year_options(results: &[ResultRecord]) -> Vec<SelectOption> {
    let years: BTreeSet<i32> = results.iter().filter_map(|r| r.year).collect();
    years
        .into_iter()
        .rev()
        .map(|y| SelectOption {
            label: y.to_string(),
            value: y.to_string(),
        })
        .collect()
}
