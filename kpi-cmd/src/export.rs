//! CSV export of the filtered results.

use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use kpi_data::export::write_csv;
use log::info;

use crate::args::{FilterArgs, SourceArgs};
use crate::load::load_view;

/// Write every filtered row (not just one page) to `output`.
pub async fn run_export(
    source: &SourceArgs,
    filter: &FilterArgs,
    output: &str,
) -> anyhow::Result<()> {
    let mut view = load_view(source).await?;
    view.set_filter(filter.to_filter()?);
    let snapshot = view
        .refresh()
        .ok_or_else(|| anyhow::anyhow!("no collections loaded"))?;

    let file = File::create(output).with_context(|| format!("Failed to create {}", output))?;
    let count = write_csv(
        BufWriter::new(file),
        snapshot.filtered.iter().copied(),
        &snapshot.catalog,
    )?;
    info!("Exported {} results to {}", count, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RESULTS: &str = r#"{"data": [
        {"id": 1, "indicator": {"id": 7, "name": "Falls"}, "headquarters": 1,
         "indicatorCode": "IND-07", "indicatorName": "Falls", "headquarterName": "North",
         "year": 2024, "quarter": 1, "calculatedValue": 50, "target": 40, "trend": "decreasing"},
        {"id": 2, "indicator": 7, "headquarters": 2,
         "indicatorCode": "IND-07", "indicatorName": "Falls", "headquarterName": "South",
         "year": 2023, "month": 5, "calculatedValue": 30}
    ]}"#;

    fn snapshot_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("results.json"), RESULTS).unwrap();
        fs::write(
            dir.path().join("indicators.json"),
            r#"[{"id": "7", "code": "IND-07", "name": "Falls",
                 "target": 60, "measurementUnit": "%"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("headquarters.json"),
            r#"[{"id": 1, "name": "North"}, {"id": 2, "name": "South"}]"#,
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn exports_filtered_rows() {
        let dir = snapshot_dir();
        let output = dir.path().join("out.csv");
        let source = SourceArgs {
            snapshot: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let filter = FilterArgs {
            year: Some("2023".into()),
            ..Default::default()
        };

        run_export(&source, &filter, output.to_str().unwrap())
            .await
            .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "IND-07,Falls,South,2023,May,30,60,50.0,%");
    }

    #[tokio::test]
    async fn unfiltered_export_includes_everything() {
        let dir = snapshot_dir();
        let output = dir.path().join("all.csv");
        let source = SourceArgs {
            snapshot: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        run_export(&source, &FilterArgs::default(), output.to_str().unwrap())
            .await
            .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("IND-07,Falls,North,2024,Q1,50,40,80.0,%"));
    }
}
