//! CSV export of result rows.
//!
//! Format (with headers):
//! `indicator_code,indicator_name,headquarters,year,period,calculated_value,target,compliance,unit`
//!
//! `target` is the effective target; `compliance` is the capped percentage
//! with one decimal, empty for records that are not valid for ratios.

use std::io::Write;

use kpi_core::ResultRecord;

use crate::aggregate::compliance;
use crate::catalog::IndicatorCatalog;

pub const EXPORT_HEADER: [&str; 9] = [
    "indicator_code",
    "indicator_name",
    "headquarters",
    "year",
    "period",
    "calculated_value",
    "target",
    "compliance",
    "unit",
];

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write rows as CSV, returning how many were written.
pub fn write_csv<'r, W, I>(
    writer: W,
    records: I,
    catalog: &IndicatorCatalog<'_>,
) -> anyhow::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'r ResultRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;

    let mut count = 0usize;
    for record in records {
        let unit = record.measurement_unit.clone().or_else(|| {
            catalog
                .indicator_for(record)
                .and_then(|i| i.measurement_unit.clone())
        });
        wtr.write_record([
            record.indicator_code.clone().unwrap_or_default(),
            record.indicator_name.clone().unwrap_or_default(),
            record.headquarters_label().unwrap_or("").to_string(),
            record.year_text(),
            record.period_label(),
            number_cell(record.calculated_value),
            number_cell(catalog.effective_target(record)),
            compliance(record, catalog)
                .map(|c| format!("{:.1}", c.percent))
                .unwrap_or_default(),
            unit.unwrap_or_default(),
        ])?;
        count += 1;
    }
    wtr.flush()?;
    log::info!("export: wrote {} rows", count);
    Ok(count)
}
