//! Record builders shared by the unit tests.

use kpi_core::{Headquarters, Indicator, Reference, ResultRecord};

pub fn record(id: i64, indicator: i64, headquarters: i64, year: i32) -> ResultRecord {
    ResultRecord {
        id: id.to_string(),
        indicator: Some(Reference::from(indicator)),
        headquarters: Some(Reference::from(headquarters)),
        year: Some(year),
        ..Default::default()
    }
}

pub fn measured(value: f64, target: f64, trend: &str) -> ResultRecord {
    ResultRecord {
        id: "1".to_string(),
        indicator: Some(Reference::from(1_i64)),
        calculated_value: Some(value),
        target: Some(target),
        trend: Some(trend.to_string()),
        ..Default::default()
    }
}

pub fn indicator(id: &str, code: Option<&str>, name: &str, target: Option<f64>) -> Indicator {
    Indicator {
        id: id.to_string(),
        code: code.map(str::to_string),
        name: name.to_string(),
        target,
        ..Default::default()
    }
}

pub fn headquarters(id: &str, name: &str) -> Headquarters {
    Headquarters {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}
