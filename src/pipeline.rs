//! Report Pipeline
//! Runs one report end to end: load, clean, aggregate, chart, deck and exports.

use crate::charts::{ChartArtifact, ChartInputs, ChartKind, StaticChartRenderer};
use crate::config::{ReportConfig, FUEL_PRICE_COL, REQUIRED_COLUMNS, TEMPERATURE_COL};
use crate::data::{
    write_csv, CleaningReport, DataLoader, DataProcessor, ExportError, LoaderError,
    ProcessorError, SalesRecord,
};
use crate::ppt::{DeckSummary, PptError, PptGenerator, Slide};
use crate::stats::{build_insights, CorrelationMatrix, SalesAggregator, SalesSummary, StatsCalculator};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

const INSIGHTS_TITLE: &str = "Key Insights & Recommendations";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Cannot write to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] ProcessorError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Failed to write slide deck: {0}")]
    Deck(#[from] PptError),
    #[error("Failed to write summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_cleaned: usize,
    pub insights: Vec<String>,
    pub charts: Vec<ChartArtifact>,
    pub deck: DeckSummary,
    pub deck_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub summary_path: PathBuf,
}

impl RunSummary {
    pub fn charts_rendered(&self) -> usize {
        self.charts.iter().filter(|c| c.is_rendered()).count()
    }
}

/// Machine-readable companion to the deck.
#[derive(Serialize)]
struct SummaryDocument<'a> {
    title: &'a str,
    cleaning: &'a CleaningReport,
    sales: &'a SalesSummary,
    insights: &'a [String],
    correlation: &'a CorrelationMatrix,
    charts: &'a [ChartArtifact],
}

pub struct ReportPipeline {
    config: ReportConfig,
}

impl ReportPipeline {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Run every stage in order. Any stage error aborts the run; chart and
    /// image failures do not.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let config = &self.config;
        fs::create_dir_all(&config.output_dir).map_err(|source| PipelineError::Io {
            path: config.output_dir.clone(),
            source,
        })?;

        // Load
        let mut loader = DataLoader::new();
        loader.load_csv(&config.data_path)?;
        loader.require_columns(&REQUIRED_COLUMNS)?;
        let rows_loaded = loader.get_row_count();
        let raw = loader.take_dataframe()?;

        // Clean
        let (mut cleaned, report) = DataProcessor::clean(raw)?;
        let records = SalesRecord::from_dataframe(&cleaned)?;
        info!(
            "Cleaned dataset: {} rows ({} duplicates removed, {} unparsable dates)",
            report.rows_after, report.duplicates_removed, report.unparsable_dates
        );

        // Aggregate
        let summary = SalesAggregator::summarize(&records);
        info!(
            "Sales: total {:.2}, mean {:.2}, median {:.2} over {} stores",
            summary.total_sales,
            summary.mean_sales,
            summary.median_sales,
            summary.sales_by_store.len()
        );
        debug!("Sales by year: {:?}", summary.sales_by_year);
        debug!("Sales by month: {:?}", summary.sales_by_month);

        let insights = build_insights(&summary);
        println!("\n======== Key Insights ========");
        for (i, line) in insights.iter().enumerate() {
            println!("{}. {}", i + 1, line);
        }

        // Charts
        let correlation = StatsCalculator::correlation_matrix(&cleaned)?;
        let inputs = ChartInputs {
            summary: &summary,
            records: &records,
            correlation: &correlation,
            has_temperature: cleaned.column(TEMPERATURE_COL).is_ok(),
            has_fuel_price: cleaned.column(FUEL_PRICE_COL).is_ok(),
        };
        let charts = StaticChartRenderer::render_all(&config.output_dir, &inputs);

        // Deck
        let slides = self.build_slides(&inputs, &insights);
        let deck_path = config.deck_path();
        let deck = PptGenerator::generate_report(&slides, &deck_path, &config.title)?;

        // Exports
        let cleaned_path = config.cleaned_path();
        write_csv(&mut cleaned, &cleaned_path)?;

        let summary_path = config.summary_path();
        let document = SummaryDocument {
            title: &config.title,
            cleaning: &report,
            sales: &summary,
            insights: &insights,
            correlation: &correlation,
            charts: &charts,
        };
        let file = File::create(&summary_path).map_err(|source| PipelineError::Io {
            path: summary_path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &document)?;
        info!("Summary saved to: {}", summary_path.display());

        info!("All outputs saved in: {}", config.output_dir.display());
        Ok(RunSummary {
            rows_loaded,
            rows_cleaned: report.rows_after,
            insights,
            charts,
            deck,
            deck_path,
            cleaned_path,
            summary_path,
        })
    }

    /// Title slide, one slide per applicable chart, then the insights.
    fn build_slides(&self, inputs: &ChartInputs, insights: &[String]) -> Vec<Slide> {
        let mut slides = vec![Slide::Title {
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
        }];
        slides.extend(
            ChartKind::SLIDE_ORDER
                .iter()
                .filter(|kind| inputs.includes(**kind))
                .map(|kind| Slide::Image {
                    title: kind.slide_title().to_string(),
                    image_path: self.config.output_dir.join(kind.file_name()),
                }),
        );
        slides.push(Slide::Bullets {
            title: INSIGHTS_TITLE.to_string(),
            items: insights.to_vec(),
        });
        slides
    }
}
