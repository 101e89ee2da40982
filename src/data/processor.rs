//! Data Processor Module
//! Handles data cleaning: date parsing, de-duplication, numeric coercion,
//! calendar features and the per-column missing-value policy.

use crate::config::{
    DATE_COL, DAY_OF_WEEK_COL, MISSING_THRESHOLD_RATIO, MONTH_COL, SALES_COL, UNKNOWN_SENTINEL,
    WEEK_COL, YEAR_COL,
};
use crate::data::loader::is_numeric_dtype;
use crate::stats::StatsCalculator;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No rows left after cleaning")]
    EmptyAfterCleaning,
}

/// Day-first date layouts, tried in order.
const DATE_FORMATS: [&str; 6] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const SHORT_YEAR_FORMATS: [&str; 3] = ["%d-%m-%y", "%d/%m/%y", "%d.%m.%y"];
const DATETIME_FORMATS: [&str; 6] = [
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// What the missing-value pass did to one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ColumnAction {
    MedianFill {
        column: String,
        median: f64,
        filled: usize,
    },
    SentinelFill {
        column: String,
        filled: usize,
    },
    DroppedRows {
        column: String,
        dropped: usize,
    },
}

/// Summary of one cleaning run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    pub unparsable_dates: usize,
    pub actions: Vec<ColumnAction>,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Run the full cleaning sequence over a raw frame.
    pub fn clean(mut df: DataFrame) -> Result<(DataFrame, CleaningReport), ProcessorError> {
        let mut report = CleaningReport {
            rows_before: df.height(),
            ..Default::default()
        };

        Self::trim_column_names(&mut df)?;
        report.unparsable_dates = Self::parse_dates(&mut df, DATE_COL)?;

        let before_dedup = df.height();
        df = Self::drop_duplicates(&df)?;
        report.duplicates_removed = before_dedup - df.height();

        Self::coerce_numeric_text(&mut df, SALES_COL)?;
        Self::add_calendar_fields(&mut df)?;

        let (mut df, actions) = Self::impute_missing(df)?;
        report.actions = actions;

        // An all-null sales column has no median to fill with.
        let sales = Self::numeric_values(df.column(SALES_COL)?)?;
        if sales.iter().any(Option::is_none) {
            let keep: Vec<bool> = sales.iter().map(Option::is_some).collect();
            let mask = BooleanChunked::from_slice("keep".into(), &keep);
            df = df.filter(&mask)?;
        }

        if df.height() == 0 {
            return Err(ProcessorError::EmptyAfterCleaning);
        }
        report.rows_after = df.height();
        info!("Shape after cleaning: ({}, {})", df.height(), df.width());

        Ok((df, report))
    }

    /// Strip surrounding whitespace from every column name.
    pub fn trim_column_names(df: &mut DataFrame) -> Result<(), ProcessorError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for name in names {
            let trimmed = name.trim();
            if trimmed != name {
                df.rename(&name, trimmed.into())?;
            }
        }
        Ok(())
    }

    /// Parse a date-like column in place. Returns how many non-null cells failed to parse.
    pub fn parse_dates(df: &mut DataFrame, column: &str) -> Result<usize, ProcessorError> {
        let text = df.column(column)?.cast(&DataType::String)?;
        let mut unparsable = 0;

        let days: Vec<Option<i32>> = text
            .str()?
            .into_iter()
            .map(|value| {
                let value = value?;
                let parsed = Self::parse_day_first(value);
                if parsed.is_none() {
                    unparsable += 1;
                }
                parsed.map(Self::days_since_epoch)
            })
            .collect();

        if unparsable > 0 {
            debug!("{} values in '{}' could not be parsed as dates", unparsable, column);
        }

        let dates = Series::new(column.into(), days).cast(&DataType::Date)?;
        df.with_column(dates)?;
        Ok(unparsable)
    }

    /// Parse a date string, reading ambiguous day/month pairs day first.
    pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .find(|date| date.year() >= 1000)
            .or_else(|| {
                SHORT_YEAR_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            })
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    /// Remove exact duplicate rows, keeping the first occurrence in order.
    pub fn drop_duplicates(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
    }

    /// Coerce a text column holding numbers with thousands separators to Float64.
    pub fn coerce_numeric_text(df: &mut DataFrame, column: &str) -> Result<(), ProcessorError> {
        let source = df.column(column)?;
        if is_numeric_dtype(source.dtype()) {
            return Ok(());
        }

        let text = source.cast(&DataType::String)?;
        let values: Vec<Option<f64>> = text
            .str()?
            .into_iter()
            .map(|value| value.and_then(Self::parse_number))
            .collect();

        df.with_column(Series::new(column.into(), values))?;
        Ok(())
    }

    /// Parse a number written with optional comma thousands separators.
    pub fn parse_number(value: &str) -> Option<f64> {
        value
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
    }

    /// Append Year, Month, Week (ISO) and DayOfWeek (Monday = 0) derived from the date column.
    pub fn add_calendar_fields(df: &mut DataFrame) -> Result<(), ProcessorError> {
        let dates = Self::date_values(df, DATE_COL)?;

        let year: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.year())).collect();
        let month: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.month() as i32)).collect();
        let week: Vec<Option<i32>> = dates
            .iter()
            .map(|d| d.map(|d| d.iso_week().week() as i32))
            .collect();
        let day_of_week: Vec<Option<i32>> = dates
            .iter()
            .map(|d| d.map(|d| d.weekday().num_days_from_monday() as i32))
            .collect();

        df.with_column(Series::new(YEAR_COL.into(), year))?;
        df.with_column(Series::new(MONTH_COL.into(), month))?;
        df.with_column(Series::new(WEEK_COL.into(), week))?;
        df.with_column(Series::new(DAY_OF_WEEK_COL.into(), day_of_week))?;
        Ok(())
    }

    /// Apply the missing-value policy column by column, in column order.
    ///
    /// Numeric columns take their median. Text columns are sentinel-filled when
    /// their null count reaches the threshold of the row count at the start of
    /// the pass; below it, the rows are dropped. Parsed dates are never filled.
    pub fn impute_missing(
        mut df: DataFrame,
    ) -> Result<(DataFrame, Vec<ColumnAction>), ProcessorError> {
        let threshold = MISSING_THRESHOLD_RATIO * df.height() as f64;
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut actions = Vec::new();

        for name in names {
            let column = df.column(&name)?;

            if is_numeric_dtype(column.dtype()) {
                let values = Self::numeric_values(column)?;
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                let missing = values.len() - present.len();
                if missing == 0 {
                    continue;
                }
                let Some(median) = StatsCalculator::median(&present) else {
                    continue;
                };

                let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(median)).collect();
                df.with_column(Series::new(name.as_str().into(), filled))?;
                actions.push(ColumnAction::MedianFill {
                    column: name,
                    median,
                    filled: missing,
                });
                continue;
            }

            let nulls = column.null_count();
            if nulls == 0 {
                continue;
            }
            if name == DATE_COL || (nulls as f64) < threshold {
                let mask = column.as_materialized_series().is_not_null();
                df = df.filter(&mask)?;
                actions.push(ColumnAction::DroppedRows {
                    column: name,
                    dropped: nulls,
                });
            } else {
                let text = column.cast(&DataType::String)?;
                let filled: Vec<String> = text
                    .str()?
                    .into_iter()
                    .map(|v| v.unwrap_or(UNKNOWN_SENTINEL).to_string())
                    .collect();
                df.with_column(Series::new(name.as_str().into(), filled))?;
                actions.push(ColumnAction::SentinelFill {
                    column: name,
                    filled: nulls,
                });
            }
        }

        for action in &actions {
            debug!("Missing values: {:?}", action);
        }
        Ok((df, actions))
    }

    /// Read a column as optional floats. NaN and infinite values read as missing.
    pub fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>, ProcessorError> {
        let floats = column.cast(&DataType::Float64)?;
        let values = floats
            .f64()?
            .into_iter()
            .map(|v| v.filter(|v| v.is_finite()))
            .collect();
        Ok(values)
    }

    /// Read a Date column as optional calendar dates.
    pub fn date_values(df: &DataFrame, column: &str) -> Result<Vec<Option<NaiveDate>>, ProcessorError> {
        let days = df.column(column)?.cast(&DataType::Int32)?;
        let values = days
            .i32()?
            .into_iter()
            .map(|d| d.and_then(Self::date_from_days))
            .collect();
        Ok(values)
    }

    fn days_since_epoch(date: NaiveDate) -> i32 {
        (date - NaiveDate::default()).num_days() as i32
    }

    fn date_from_days(days: i32) -> Option<NaiveDate> {
        NaiveDate::default().checked_add_signed(chrono::Duration::days(days as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataLoader, SalesRecord};
    use crate::stats::SalesAggregator;
    use pretty_assertions::assert_eq;

    fn load_frame(body: &str) -> DataFrame {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, body).unwrap();
        let mut loader = DataLoader::new();
        loader.load_csv(&path).unwrap();
        loader.take_dataframe().unwrap()
    }

    fn raw_frame(dates: &[Option<&str>], sales: &[Option<&str>], stores: &[i64]) -> DataFrame {
        let flags: Vec<i64> = vec![0; stores.len()];
        DataFrame::new(vec![
            Column::new("Store".into(), stores.to_vec()),
            Column::new("Date".into(), dates.to_vec()),
            Column::new("Weekly_Sales".into(), sales.to_vec()),
            Column::new("Holiday_Flag".into(), flags),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_day_first_formats() {
        let feb_5 = NaiveDate::from_ymd_opt(2010, 2, 5);
        assert_eq!(DataProcessor::parse_day_first("05-02-2010"), feb_5);
        assert_eq!(DataProcessor::parse_day_first("05/02/2010"), feb_5);
        assert_eq!(DataProcessor::parse_day_first(" 2010-02-05 "), feb_5);
        assert_eq!(DataProcessor::parse_day_first("05-02-10"), feb_5);
        assert_eq!(DataProcessor::parse_day_first("05-02-2010 13:45"), feb_5);
        // No 13th month, so the month-first reading applies.
        assert_eq!(
            DataProcessor::parse_day_first("02/13/2010"),
            NaiveDate::from_ymd_opt(2010, 2, 13)
        );
        assert_eq!(DataProcessor::parse_day_first("not a date"), None);
        assert_eq!(DataProcessor::parse_day_first(""), None);
    }

    #[test]
    fn test_parse_number_strips_commas() {
        assert_eq!(DataProcessor::parse_number("1,643,690.90"), Some(1643690.90));
        assert_eq!(DataProcessor::parse_number(" 42 "), Some(42.0));
        assert_eq!(DataProcessor::parse_number("n/a"), None);
    }

    #[test]
    fn test_trim_column_names() {
        let mut df = DataFrame::new(vec![
            Column::new(" Store ".into(), vec![1i64]),
            Column::new("Date".into(), vec!["05-02-2010"]),
        ])
        .unwrap();

        DataProcessor::trim_column_names(&mut df).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Store", "Date"]);
    }

    #[test]
    fn test_clean_parses_dedupes_and_derives() {
        let df = raw_frame(
            &[Some("05-02-2010"), Some("05-02-2010"), Some("12-02-2010")],
            &[Some("1,000.50"), Some("1,000.50"), Some("2,000")],
            &[1, 1, 2],
        );

        let (clean, report) = DataProcessor::clean(df).unwrap();

        assert_eq!(report.rows_before, 3);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(clean.height(), 2);
        assert_eq!(clean.column("Date").unwrap().dtype(), &DataType::Date);

        let sales = DataProcessor::numeric_values(clean.column("Weekly_Sales").unwrap()).unwrap();
        assert_eq!(sales, vec![Some(1000.5), Some(2000.0)]);

        let week = DataProcessor::numeric_values(clean.column("Week").unwrap()).unwrap();
        assert_eq!(week, vec![Some(5.0), Some(6.0)]);
        // 2010-02-05 was a Friday.
        let dow = DataProcessor::numeric_values(clean.column("DayOfWeek").unwrap()).unwrap();
        assert_eq!(dow, vec![Some(4.0), Some(4.0)]);
    }

    #[test]
    fn test_unparsable_dates_and_sales_are_handled() {
        // 1 of 25 dates bad (4%): row dropped. One bad sales value: median fill.
        let mut dates: Vec<Option<&str>> = vec![Some("05-02-2010"); 25];
        dates[3] = Some("garbage");
        let mut sales: Vec<Option<&str>> = (0..25).map(|_| Some("10")).collect();
        sales[7] = Some("oops");
        sales[8] = Some("30");
        let stores: Vec<i64> = (0..25).collect();

        let (clean, report) = DataProcessor::clean(raw_frame(&dates, &sales, &stores)).unwrap();

        assert_eq!(report.unparsable_dates, 1);
        assert_eq!(clean.height(), 24);
        assert_eq!(clean.column("Date").unwrap().null_count(), 0);
        assert_eq!(clean.column("Weekly_Sales").unwrap().null_count(), 0);
        assert!(report.actions.contains(&ColumnAction::MedianFill {
            column: "Weekly_Sales".to_string(),
            median: 10.0,
            filled: 1,
        }));
    }

    #[test]
    fn test_text_column_at_threshold_gets_sentinel() {
        // 1 null in 20 rows is exactly 5%.
        let mut region: Vec<Option<&str>> = vec![Some("North"); 20];
        region[0] = None;
        let df = DataFrame::new(vec![
            Column::new("Region".into(), region),
            Column::new("Weekly_Sales".into(), vec![1.0f64; 20]),
        ])
        .unwrap();

        let (clean, actions) = DataProcessor::impute_missing(df).unwrap();

        assert_eq!(clean.height(), 20);
        let first = clean.column("Region").unwrap().str().unwrap().get(0);
        assert_eq!(first, Some("Unknown"));
        assert_eq!(
            actions,
            vec![ColumnAction::SentinelFill {
                column: "Region".to_string(),
                filled: 1
            }]
        );
    }

    #[test]
    fn test_text_column_below_threshold_drops_rows() {
        // 1 null in 21 rows is under 5%.
        let mut region: Vec<Option<&str>> = vec![Some("North"); 21];
        region[4] = None;
        let df = DataFrame::new(vec![
            Column::new("Region".into(), region),
            Column::new("Weekly_Sales".into(), vec![1.0f64; 21]),
        ])
        .unwrap();

        let (clean, _) = DataProcessor::impute_missing(df).unwrap();

        assert_eq!(clean.height(), 20);
        assert_eq!(clean.column("Region").unwrap().null_count(), 0);
    }

    #[test]
    fn test_threshold_uses_row_count_before_pass() {
        // Column A drops 1 of 40 rows; column B then has 2 nulls in 39 rows.
        // 2 >= 0.05 * 40, so B is filled rather than dropped.
        let mut a: Vec<Option<&str>> = vec![Some("x"); 40];
        a[0] = None;
        let mut b: Vec<Option<&str>> = vec![Some("y"); 40];
        b[10] = None;
        b[11] = None;
        let df = DataFrame::new(vec![
            Column::new("A".into(), a),
            Column::new("B".into(), b),
        ])
        .unwrap();

        let (clean, actions) = DataProcessor::impute_missing(df).unwrap();

        assert_eq!(clean.height(), 39);
        assert_eq!(
            actions[1],
            ColumnAction::SentinelFill {
                column: "B".to_string(),
                filled: 2
            }
        );
    }

    #[test]
    fn test_median_fill_is_idempotent() {
        let df = DataFrame::new(vec![Column::new(
            "Temperature".into(),
            vec![Some(10.0f64), None, Some(30.0), Some(20.0)],
        )])
        .unwrap();

        let (once, actions) = DataProcessor::impute_missing(df).unwrap();
        assert_eq!(actions.len(), 1);
        let (twice, actions) = DataProcessor::impute_missing(once.clone()).unwrap();

        assert!(actions.is_empty());
        assert!(once.equals(&twice));
        let values = DataProcessor::numeric_values(twice.column("Temperature").unwrap()).unwrap();
        assert_eq!(values, vec![Some(10.0), Some(20.0), Some(30.0), Some(20.0)]);
    }

    #[test]
    fn test_all_dates_bad_is_empty() {
        let df = raw_frame(&[Some("x"), Some("y")], &[Some("1"), Some("2")], &[1, 2]);
        let err = DataProcessor::clean(df).unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyAfterCleaning));
    }

    #[test]
    fn test_loaded_missing_tokens_are_median_filled() {
        let raw = load_frame(
            "Store,Date,Weekly_Sales,Holiday_Flag,Temperature,Fuel_Price\n\
             1,05-02-2010,100.0,0,40.0,2.5\n\
             1,12-02-2010,NaN,0,NA,3.5\n\
             1,19-02-2010,300.0,1,60.0,\n\
             1,26-02-2010,200.0,0,50.0,nan\n",
        );

        let (clean, report) = DataProcessor::clean(raw).unwrap();

        assert_eq!(report.rows_after, 4);
        assert_eq!(
            report.actions,
            vec![
                ColumnAction::MedianFill {
                    column: "Weekly_Sales".to_string(),
                    median: 200.0,
                    filled: 1
                },
                ColumnAction::MedianFill {
                    column: "Temperature".to_string(),
                    median: 50.0,
                    filled: 1
                },
                ColumnAction::MedianFill {
                    column: "Fuel_Price".to_string(),
                    median: 3.0,
                    filled: 2
                },
            ]
        );
        let temperature = clean.column("Temperature").unwrap();
        assert_eq!(temperature.dtype(), &DataType::Float64);
        assert_eq!(
            DataProcessor::numeric_values(temperature).unwrap(),
            vec![Some(40.0), Some(50.0), Some(60.0), Some(50.0)]
        );

        let records = SalesRecord::from_dataframe(&clean).unwrap();
        assert_eq!(records.len(), 4);
        let summary = SalesAggregator::summarize(&records);
        assert_eq!(summary.median_sales, 200.0);
        assert_eq!(summary.total_sales, 800.0);
    }

    #[test]
    fn test_nan_sales_in_memory_are_filled() {
        let df = DataFrame::new(vec![
            Column::new("Store".into(), vec![1i64, 2, 3]),
            Column::new("Date".into(), vec!["05-02-2010", "05-02-2010", "05-02-2010"]),
            Column::new("Weekly_Sales".into(), vec![10.0f64, f64::NAN, 30.0]),
            Column::new("Holiday_Flag".into(), vec![0i64, 0, 0]),
        ])
        .unwrap();

        let (clean, _) = DataProcessor::clean(df).unwrap();

        let sales = DataProcessor::numeric_values(clean.column("Weekly_Sales").unwrap()).unwrap();
        assert_eq!(sales, vec![Some(10.0), Some(20.0), Some(30.0)]);
    }

    #[test]
    fn test_late_thousands_separated_sales_are_parsed() {
        let mut body = String::from("Store,Date,Weekly_Sales,Holiday_Flag\n");
        for store in 0..10_050 {
            body.push_str(&format!("{},05-02-2010,100.0,0\n", store));
        }
        body.push_str("99999,05-02-2010,\"1,643,690.90\",0\n");

        let (clean, report) = DataProcessor::clean(load_frame(&body)).unwrap();

        assert!(report.actions.is_empty());
        let records = SalesRecord::from_dataframe(&clean).unwrap();
        assert_eq!(records.len(), 10_051);
        let late = records.iter().find(|r| r.store == 99999).unwrap();
        assert!((late.weekly_sales - 1_643_690.90).abs() < 1e-6);
    }
}
