//! Text and JSON rendering of the results pipeline.

use chrono::{DateTime, Local};
use comfy_table::presets::NOTHING;
use comfy_table::Table;
use kpi_core::ResultRecord;
use kpi_data::aggregate::{
    breakdown, compliance, ComplianceSummary, GroupBy, GroupSummary, HIGH_PERFORMANCE_THRESHOLD,
};
use kpi_data::paginate::{Page, PageSize};
use kpi_data::view::{FilterOptions, ViewSnapshot};
use kpi_utils::dates::format_timestamp;
use log::{info, warn};
use serde::Serialize;

use crate::args::{FilterArgs, SourceArgs};
use crate::load::load_view;
use crate::Breakdown;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport {
    loaded_at: String,
    filter_active: bool,
    summary: ComplianceSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<Vec<GroupSummary>>,
}

impl From<Breakdown> for GroupBy {
    fn from(by: Breakdown) -> Self {
        match by {
            Breakdown::Indicator => GroupBy::Indicator,
            Breakdown::Headquarters => GroupBy::Headquarters,
        }
    }
}

pub async fn run_summary(
    source: &SourceArgs,
    filter: &FilterArgs,
    by: Option<Breakdown>,
    json: bool,
) -> anyhow::Result<()> {
    let mut view = load_view(source).await?;
    let loaded_at = loaded_at_text(view.collections().map(|c| c.loaded_at));
    view.set_filter(filter.to_filter()?);

    let snapshot = view
        .refresh()
        .ok_or_else(|| anyhow::anyhow!("no collections loaded"))?;
    // Unfiltered, `filtered` is every record, matching the summary source.
    let groups = by.map(|by| {
        breakdown(
            snapshot.filtered.iter().copied(),
            by.into(),
            &snapshot.catalog,
        )
    });

    if json {
        let report = SummaryReport {
            loaded_at,
            filter_active: snapshot.filter_active,
            summary: snapshot.summary,
            breakdown: groups,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            summary_text(&snapshot.summary, snapshot.filter_active, &loaded_at)
        );
        if let Some(groups) = groups {
            println!();
            print!("{}", breakdown_table(&groups));
        }
    }
    Ok(())
}

pub async fn run_list(
    source: &SourceArgs,
    filter: &FilterArgs,
    page: usize,
    per_page: usize,
    json: bool,
) -> anyhow::Result<()> {
    let page_size = PageSize::new(per_page)
        .ok_or_else(|| anyhow::anyhow!("page size must be positive"))?;

    let mut view = load_view(source).await?;
    let loaded_at = loaded_at_text(view.collections().map(|c| c.loaded_at));
    view.set_page_size(page_size);
    view.set_filter(filter.to_filter()?);

    // The page count is only known after the first recomputation.
    view.refresh();
    if page != 1 {
        if let Err(e) = view.jump_to(page) {
            warn!("{}; showing page 1", e);
        }
    }

    let snapshot = view
        .refresh()
        .ok_or_else(|| anyhow::anyhow!("no collections loaded"))?;

    if json {
        let listing = Page {
            data: snapshot.page_rows(),
            window: snapshot.page,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", page_text(&snapshot));
        println!("Loaded at {}", loaded_at);
    }
    Ok(())
}

pub async fn run_options(source: &SourceArgs, json: bool) -> anyhow::Result<()> {
    let view = load_view(source).await?;
    let options = view
        .options()
        .ok_or_else(|| anyhow::anyhow!("no collections loaded"))?;
    info!(
        "options: {} indicators, {} headquarters, {} years",
        options.indicators.len(),
        options.headquarters.len(),
        options.years.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", options_text(&options));
    }
    Ok(())
}

fn loaded_at_text(timestamp: Option<DateTime<Local>>) -> String {
    timestamp.as_ref().map(format_timestamp).unwrap_or_default()
}

fn summary_text(summary: &ComplianceSummary, filter_active: bool, loaded_at: &str) -> String {
    let scope = if filter_active {
        "filtered results"
    } else {
        "all results"
    };
    format!(
        "Scope:              {}\n\
         Total results:      {}\n\
         Avg compliance:     {:.1}%\n\
         High performance:   {} (>= {}%)\n\
         Unique indicators:  {}\n\
         Loaded at:          {}\n",
        scope,
        summary.total_results,
        summary.avg_compliance,
        summary.high_performance,
        HIGH_PERFORMANCE_THRESHOLD,
        summary.unique_indicators,
        loaded_at
    )
}

fn breakdown_table(groups: &[GroupSummary]) -> String {
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.label.clone(),
                g.records.to_string(),
                g.valid.to_string(),
                format!("{:.1}%", g.avg_compliance),
                g.high_performance.to_string(),
            ]
        })
        .collect();
    render_table(&["GROUP", "RECORDS", "VALID", "AVG", "HIGH"], rows)
}

fn row_cells(record: &ResultRecord, snapshot: &ViewSnapshot<'_>) -> Vec<String> {
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    vec![
        record.indicator_code.clone().unwrap_or_default(),
        record.indicator_name.clone().unwrap_or_default(),
        record.headquarters_label().unwrap_or("").to_string(),
        record.year_text(),
        record.period_label(),
        number(record.calculated_value),
        number(snapshot.catalog.effective_target(record)),
        compliance(record, &snapshot.catalog)
            .map(|c| format!("{:.1}%", c.percent))
            .unwrap_or_else(|| "-".into()),
    ]
}

fn page_text(snapshot: &ViewSnapshot<'_>) -> String {
    if snapshot.filtered.is_empty() {
        return "No results match the current filter.\n".to_string();
    }
    let rows: Vec<Vec<String>> = snapshot
        .page_rows()
        .iter()
        .map(|r| row_cells(r, snapshot))
        .collect();
    let mut out = render_table(
        &[
            "CODE",
            "INDICATOR",
            "HEADQUARTERS",
            "YEAR",
            "PERIOD",
            "VALUE",
            "TARGET",
            "COMPLIANCE",
        ],
        rows,
    );
    let page = &snapshot.page;
    out.push_str(&format!(
        "Showing {}-{} of {} (page {}/{})\n",
        page.start_index, page.end_index, page.total_items, page.current_page, page.total_pages
    ));
    out
}

fn options_text(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (title, list) in [
        ("Indicators", &options.indicators),
        ("Headquarters", &options.headquarters),
        ("Years", &options.years),
    ] {
        out.push_str(&format!("{}:\n", title));
        for option in list {
            out.push_str(&format!("  {:<8} {}\n", option.value, option.label));
        }
    }
    out
}

/// Borderless table, one line per row, trailing padding stripped.
fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(headers.to_vec())
        .add_rows(rows);
    table
        .to_string()
        .lines()
        .map(|line| format!("{}\n", line.trim_end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpi_core::{Collections, Headquarters, Indicator};
    use kpi_data::view::ResultsView;

    fn record(id: usize, value: f64) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            indicator: Some("1".into()),
            headquarters: Some("1".into()),
            indicator_code: Some("IND-01".into()),
            indicator_name: Some("Falls".into()),
            headquarter_name: Some("North".into()),
            year: Some(2024),
            month: Some(3),
            calculated_value: Some(value),
            target: Some(100.0),
            ..Default::default()
        }
    }

    fn view(count: usize) -> ResultsView {
        let mut view = ResultsView::new();
        view.load(Ok(Collections::new(
            (1..=count).map(|i| record(i, 90.0)).collect(),
            vec![Indicator {
                id: "1".into(),
                code: Some("IND-01".into()),
                name: "Falls".into(),
                target: Some(100.0),
                ..Default::default()
            }],
            vec![Headquarters {
                id: "1".into(),
                name: "North".into(),
                ..Default::default()
            }],
        )));
        view
    }

    #[test]
    fn table_columns_align() {
        let table = render_table(
            &["A", "LONG"],
            vec![vec!["wide cell".into(), "x".into()], vec!["y".into(), "z".into()]],
        );
        let lines: Vec<&str> = table.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3);
        let column = lines[0].find("LONG").unwrap();
        assert_eq!(lines[1].find('x'), Some(column));
        assert_eq!(lines[2].find('z'), Some(column));
        assert!(lines.iter().all(|line| line == &line.trim_end()));
    }

    #[test]
    fn summary_text_names_scope() {
        let summary = ComplianceSummary {
            total_results: 4,
            avg_compliance: 87.5,
            high_performance: 2,
            unique_indicators: 1,
        };
        let text = summary_text(&summary, true, "2026-01-01 00:00:00");
        assert!(text.contains("filtered results"));
        assert!(text.contains("87.5%"));
        assert!(text.contains("(>= 95%)"));
        assert!(!summary_text(&summary, false, "").contains("filtered"));
    }

    #[test]
    fn page_text_shows_window() {
        let mut view = view(25);
        view.refresh();
        view.next_page();
        let snapshot = view.refresh().unwrap();
        let text = page_text(&snapshot);
        assert!(text.trim_start().starts_with("CODE"));
        assert_eq!(text.lines().filter(|l| l.contains("IND-01")).count(), 5);
        assert!(text.contains("March"));
        assert!(text.contains("90.0%"));
        assert!(text.ends_with("Showing 21-25 of 25 (page 2/2)\n"));
    }

    #[test]
    fn empty_page_text() {
        let mut view = view(0);
        let snapshot = view.refresh().unwrap();
        assert_eq!(page_text(&snapshot), "No results match the current filter.\n");
    }

    #[test]
    fn options_text_lists_every_selector() {
        let view = view(1);
        let text = options_text(&view.options().unwrap());
        assert!(text.contains("Indicators:\n  1        IND-01 - Falls\n"));
        assert!(text.contains("Headquarters:\n  1        North\n"));
        assert!(text.contains("Years:\n  2024     2024\n"));
    }

    #[test]
    fn breakdown_table_has_one_row_per_group() {
        let mut view = view(3);
        let snapshot = view.refresh().unwrap();
        let groups = breakdown(
            snapshot.filtered.iter().copied(),
            Breakdown::Headquarters.into(),
            &snapshot.catalog,
        );
        let table = breakdown_table(&groups);
        let rows: Vec<&str> = table.lines().filter(|l| l.contains("North")).collect();
        assert!(table.trim_start().starts_with("GROUP"));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("90.0%"));
    }
}
