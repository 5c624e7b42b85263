//! Indicator lookup by normalized id.
//!
//! A result row may omit its own target (or send 0) and trend; both then
//! come from the indicator definition it references.

use std::collections::HashMap;

use kpi_core::{Indicator, ResultRecord};

#[derive(Debug, Clone, Default)]
pub struct IndicatorCatalog<'a> {
    by_id: HashMap<&'a str, &'a Indicator>,
}

impl<'a> IndicatorCatalog<'a> {
    pub fn new(indicators: &'a [Indicator]) -> Self {
        let by_id = indicators
            .iter()
            .filter(|i| !i.id.is_empty())
            .map(|i| (i.id.as_str(), i))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Indicator> {
        self.by_id.get(id).copied()
    }

    /// The indicator a record references, if it is in the catalog.
    pub fn indicator_for(&self, record: &ResultRecord) -> Option<&'a Indicator> {
        self.get(&record.indicator_id())
    }

    /// `record.target` when present and non-zero, else the indicator's target.
    pub fn effective_target(&self, record: &ResultRecord) -> Option<f64> {
        match record.target {
            Some(target) if target != 0.0 => Some(target),
            _ => self.indicator_for(record).and_then(|i| i.target),
        }
    }

    /// `record.trend` when present, else the indicator's trend.
    pub fn effective_trend<'r>(&self, record: &'r ResultRecord) -> Option<&'r str>
    where
        'a: 'r,
    {
        record
            .trend
            .as_deref()
            .or_else(|| self.indicator_for(record).and_then(|i| i.trend.as_deref()))
    }
}
