//! Sales Report - Retail sales cleaning, aggregation and slide-deck reporting
//!
//! Loads a weekly sales CSV, cleans it, computes store/date/holiday aggregates,
//! renders a fixed set of charts and writes them into a PowerPoint report.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod ppt;
pub mod stats;

pub use config::ReportConfig;
pub use pipeline::{PipelineError, ReportPipeline, RunSummary};
