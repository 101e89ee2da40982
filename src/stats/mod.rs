//! Stats module - Descriptive statistics and sales aggregation

mod aggregator;
mod calculator;
mod insights;

pub use aggregator::{KeyedValue, SalesAggregator, SalesSummary};
pub use calculator::{BoxStats, CorrelationMatrix, HistogramBin, StatsCalculator, HISTOGRAM_BINS};
pub use insights::{build_insights, format_amount};
