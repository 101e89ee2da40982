use pretty_assertions::assert_eq;
use sales_report::data::LoaderError;
use sales_report::{PipelineError, ReportConfig, ReportPipeline};
use std::fs::{self, File};
use std::path::Path;

const SALES_CSV: &str = "\
Store,Date,Weekly_Sales,Holiday_Flag,Temperature,Fuel_Price,CPI,Unemployment
1,05-02-2010,1643690.90,0,42.31,2.572,211.0963582,8.106
1,12-02-2010,1641957.44,1,38.51,2.548,211.2421698,8.106
1,05-03-2010,1554806.68,0,46.50,,211.3501429,8.106
1,07-01-2011,1444732.28,0,48.27,2.976,211.4048261,7.742
2,05-02-2010,2136989.46,0,40.19,2.572,210.7526053,8.324
2,12-02-2010,2137809.50,1,38.49,2.548,210.8979935,8.324
2,05-03-2010,2119438.53,0,45.29,2.625,211.0234123,8.324
2,07-01-2011,1758050.79,0,34.32,2.976,211.1184301,8.028
2,07-01-2011,1758050.79,0,34.32,2.976,211.1184301,8.028
";

fn write_input(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_full_run_writes_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sales.csv", SALES_CSV);
    let output_dir = dir.path().join("outputs");

    let summary = ReportPipeline::new(ReportConfig::with_paths(&input, &output_dir))
        .run()
        .unwrap();

    assert_eq!(summary.rows_loaded, 9);
    assert_eq!(summary.rows_cleaned, 8);
    assert_eq!(summary.charts.len(), 9);
    assert_eq!(summary.deck.slide_count, summary.charts.len() + 2);
    assert_eq!(
        summary.deck.images_embedded + summary.deck.placeholders.len(),
        summary.charts.len()
    );
    assert_eq!(summary.insights.len(), 7);
    assert_eq!(
        summary.insights[3],
        "Top store by total sales: Store 2 with 8,152,288.28"
    );

    assert!(summary.deck_path.is_file());
    let archive = zip::ZipArchive::new(File::open(&summary.deck_path).unwrap()).unwrap();
    let slides = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slides, 11);

    let cleaned = fs::read_to_string(&summary.cleaned_path).unwrap();
    let mut lines = cleaned.lines();
    let header = lines.next().unwrap();
    for column in ["Date", "Weekly_Sales", "Year", "Month", "Week", "DayOfWeek"] {
        assert!(header.contains(column), "missing {} in {}", column, header);
    }
    assert_eq!(lines.count(), 8);
    assert!(cleaned.contains("2010-02-05"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.summary_path).unwrap()).unwrap();
    assert_eq!(json["sales"]["row_count"], 8);
    assert_eq!(json["cleaning"]["duplicates_removed"], 1);
    assert_eq!(json["insights"].as_array().unwrap().len(), 7);
    assert_eq!(json["charts"].as_array().unwrap().len(), 9);
}

#[test]
fn test_scatter_charts_follow_optional_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "sales.csv",
        "Store,Date,Weekly_Sales,Holiday_Flag\n\
         1,05-02-2010,100.0,0\n\
         1,12-02-2010,250.0,1\n\
         2,05-02-2010,300.0,0\n",
    );

    let summary = ReportPipeline::new(ReportConfig::with_paths(&input, dir.path().join("out")))
        .run()
        .unwrap();

    assert_eq!(summary.charts.len(), 7);
    assert_eq!(summary.deck.slide_count, 9);
}

#[test]
fn test_missing_required_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "sales.csv",
        "Store,Date,Weekly_Sales\n1,05-02-2010,100.0\n",
    );
    let output_dir = dir.path().join("out");

    let err = ReportPipeline::new(ReportConfig::with_paths(&input, &output_dir))
        .run()
        .unwrap_err();

    match err {
        PipelineError::Load(LoaderError::MissingColumn(name)) => assert_eq!(name, "Holiday_Flag"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!output_dir.join("Walmart_Sales_Report.pptx").exists());
}
