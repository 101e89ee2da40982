//! Sales Report - Walmart weekly sales analysis
//!
//! Reads `data/Walmart_DataSet.csv` and writes charts, the slide deck and the
//! cleaned dataset into `outputs/`.

use anyhow::Context;
use sales_report::{ReportConfig, ReportPipeline};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ReportConfig::default();
    let summary = ReportPipeline::new(config)
        .run()
        .context("Sales report failed")?;

    println!(
        "\nReport complete: {} of {} charts rendered, {} slides.",
        summary.charts_rendered(),
        summary.charts.len(),
        summary.deck.slide_count
    );
    println!("Deck: {}", summary.deck_path.display());
    println!("Cleaned data: {}", summary.cleaned_path.display());
    Ok(())
}
