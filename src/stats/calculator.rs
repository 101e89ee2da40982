//! Statistics Calculator Module
//! Handles descriptive statistics, correlation, box-plot quartiles and
//! histogram/density estimates used by the report.

use crate::data::{is_numeric_dtype, DataProcessor, ProcessorError};
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::{Data, Median, Statistics};

/// Number of histogram bins for the sales distribution chart.
pub const HISTOGRAM_BINS: usize = 50;

/// Points sampled along the density curve.
const DENSITY_POINTS: usize = 200;

/// Box-plot summary of one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// One equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Pairwise Pearson correlations between numeric columns.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == col)?;
        Some(self.values[i][j])
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Median of the non-NaN values, `None` when there are none.
    pub fn median(values: &[f64]) -> Option<f64> {
        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            return None;
        }
        Some(Data::new(present).median())
    }

    /// Arithmetic mean, NaN when empty.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Quartiles with 1.5 IQR whiskers.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Pearson correlation over paired values, NaN when either side is constant.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return f64::NAN;
        }

        let sx = x.iter().std_dev();
        let sy = y.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }
        x.iter().covariance(y.iter()) / (sx * sy)
    }

    /// Correlation matrix over every numeric column, using pairwise-complete rows.
    pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix, ProcessorError> {
        let mut labels = Vec::new();
        let mut columns = Vec::new();
        for column in df.get_columns() {
            if is_numeric_dtype(column.dtype()) {
                labels.push(column.name().to_string());
                columns.push(DataProcessor::numeric_values(column)?);
            }
        }

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let (x, y): (Vec<f64>, Vec<f64>) = columns[i]
                    .iter()
                    .zip(columns[j].iter())
                    .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                    .unzip();
                let r = Self::pearson(&x, &y);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix { labels, values })
    }

    /// Equal-width histogram between the minimum and maximum value.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (lo, hi) = Self::value_range(values);
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }

    /// Gaussian kernel density with Scott's bandwidth, scaled to histogram counts.
    pub fn density_curve(values: &[f64], bin_width: f64) -> Vec<(f64, f64)> {
        let n = values.len();
        if n < 2 {
            return Vec::new();
        }

        let std = values.iter().std_dev();
        let bandwidth = std * (n as f64).powf(-0.2);
        if bandwidth.is_nan() || bandwidth <= 0.0 {
            return Vec::new();
        }
        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let (lo, hi) = Self::value_range(values);
        let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;
        // density * n * bin_width, with the 1 / (n * h) factor folded in
        let scale = bin_width / bandwidth;

        (0..DENSITY_POINTS)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density: f64 = values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum();
                (x, density * scale)
            })
            .collect()
    }

    /// Smallest and largest finite value.
    pub fn value_range(values: &[f64]) -> (f64, f64) {
        values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
