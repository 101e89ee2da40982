//! Report Configuration Module
//! Fixed paths, column names and cleaning constants for a report run.

use std::path::{Path, PathBuf};

pub const DATE_COL: &str = "Date";
pub const SALES_COL: &str = "Weekly_Sales";
pub const STORE_COL: &str = "Store";
pub const HOLIDAY_COL: &str = "Holiday_Flag";
pub const TEMPERATURE_COL: &str = "Temperature";
pub const FUEL_PRICE_COL: &str = "Fuel_Price";

// Derived calendar fields
pub const YEAR_COL: &str = "Year";
pub const MONTH_COL: &str = "Month";
pub const WEEK_COL: &str = "Week";
pub const DAY_OF_WEEK_COL: &str = "DayOfWeek";

/// Columns a dataset must carry for the report to run.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COL, SALES_COL, STORE_COL, HOLIDAY_COL];

/// Share of the original row count at which a text column is filled
/// with the sentinel instead of having its null rows dropped.
pub const MISSING_THRESHOLD_RATIO: f64 = 0.05;

/// Fill value for missing text cells.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// Cell contents read as missing when loading a CSV.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const DATA_PATH: &str = "data/Walmart_DataSet.csv";
const OUTPUT_DIR: &str = "outputs";

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub deck_name: String,
    pub cleaned_name: String,
    pub summary_name: String,
    pub title: String,
    pub subtitle: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            deck_name: "Walmart_Sales_Report.pptx".to_string(),
            cleaned_name: "Walmart_cleaned.csv".to_string(),
            summary_name: "summary.json".to_string(),
            title: "Walmart Sales Analysis".to_string(),
            subtitle: "Automated Report Generated by Sales Report\n(Charts & Insights)".to_string(),
        }
    }
}

impl ReportConfig {
    /// Config reading `data_path` and writing everything under `output_dir`.
    pub fn with_paths(data_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn deck_path(&self) -> PathBuf {
        self.output_dir.join(&self.deck_name)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_name)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_name)
    }
}
