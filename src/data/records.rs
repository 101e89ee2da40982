//! Typed view over the cleaned sales table.

use crate::config::{
    DATE_COL, DAY_OF_WEEK_COL, FUEL_PRICE_COL, HOLIDAY_COL, MONTH_COL, SALES_COL, STORE_COL,
    TEMPERATURE_COL, WEEK_COL, YEAR_COL,
};
use crate::data::processor::{DataProcessor, ProcessorError};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// One cleaned row of the sales table.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub store: i64,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub holiday_flag: bool,
    pub temperature: Option<f64>,
    pub fuel_price: Option<f64>,
    pub year: i32,
    pub month: u32,
    pub week: u32,
    pub day_of_week: u32,
}

impl SalesRecord {
    /// Build a record, deriving the calendar fields from `date`.
    pub fn new(store: i64, date: NaiveDate, weekly_sales: f64, holiday_flag: bool) -> Self {
        Self {
            store,
            date,
            weekly_sales,
            holiday_flag,
            temperature: None,
            fuel_price: None,
            year: date.year(),
            month: date.month(),
            week: date.iso_week().week(),
            day_of_week: date.weekday().num_days_from_monday(),
        }
    }

    /// Holiday flag as the 0/1 group key.
    pub fn holiday_key(&self) -> i64 {
        i64::from(self.holiday_flag)
    }

    /// Extract records from a cleaned frame.
    ///
    /// Rows without a date or sales value are skipped. Derived calendar
    /// columns are read when present and recomputed otherwise.
    pub fn from_dataframe(df: &DataFrame) -> Result<Vec<SalesRecord>, ProcessorError> {
        let dates = DataProcessor::date_values(df, DATE_COL)?;
        let sales = DataProcessor::numeric_values(df.column(SALES_COL)?)?;
        let stores = DataProcessor::numeric_values(df.column(STORE_COL)?)?;
        let flags = DataProcessor::numeric_values(df.column(HOLIDAY_COL)?)?;
        let temperature = Self::optional_column(df, TEMPERATURE_COL)?;
        let fuel_price = Self::optional_column(df, FUEL_PRICE_COL)?;
        let year = Self::optional_column(df, YEAR_COL)?;
        let month = Self::optional_column(df, MONTH_COL)?;
        let week = Self::optional_column(df, WEEK_COL)?;
        let day_of_week = Self::optional_column(df, DAY_OF_WEEK_COL)?;

        let at = |column: &Option<Vec<Option<f64>>>, i: usize| {
            column.as_ref().and_then(|values| values[i])
        };

        let records = (0..df.height())
            .filter_map(|i| {
                let date = dates[i]?;
                let weekly_sales = sales[i]?;
                let store = stores[i].map(|s| s.round() as i64).unwrap_or_default();
                let holiday_flag = flags[i].is_some_and(|f| f >= 0.5);

                let mut record = SalesRecord::new(store, date, weekly_sales, holiday_flag);
                record.temperature = at(&temperature, i);
                record.fuel_price = at(&fuel_price, i);
                if let Some(y) = at(&year, i) {
                    record.year = y as i32;
                }
                if let Some(m) = at(&month, i) {
                    record.month = m as u32;
                }
                if let Some(w) = at(&week, i) {
                    record.week = w as u32;
                }
                if let Some(d) = at(&day_of_week, i) {
                    record.day_of_week = d as u32;
                }
                Some(record)
            })
            .collect();

        Ok(records)
    }

    fn optional_column(
        df: &DataFrame,
        name: &str,
    ) -> Result<Option<Vec<Option<f64>>>, ProcessorError> {
        match df.column(name) {
            Ok(column) => Ok(Some(DataProcessor::numeric_values(column)?)),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2012, 12, 31).unwrap();
        let record = SalesRecord::new(3, date, 10.0, true);

        assert_eq!(record.year, 2012);
        assert_eq!(record.month, 12);
        // 2012-12-31 is a Monday in ISO week 1 of 2013.
        assert_eq!(record.week, 1);
        assert_eq!(record.day_of_week, 0);
        assert_eq!(record.holiday_key(), 1);
    }

    #[test]
    fn test_from_dataframe_reads_cleaned_frame() {
        let raw = DataFrame::new(vec![
            Column::new("Store".into(), vec![1i64, 2]),
            Column::new("Date".into(), vec!["05-02-2010", "12-02-2010"]),
            Column::new("Weekly_Sales".into(), vec![100.0f64, 250.0]),
            Column::new("Holiday_Flag".into(), vec![0i64, 1]),
            Column::new("Temperature".into(), vec![42.3f64, 38.5]),
        ])
        .unwrap();
        let (clean, _) = DataProcessor::clean(raw).unwrap();

        let records = SalesRecord::from_dataframe(&clean).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].store, 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2010, 2, 5).unwrap());
        assert!(!records[0].holiday_flag);
        assert!(records[1].holiday_flag);
        assert_eq!(records[1].temperature, Some(38.5));
        assert_eq!(records[1].fuel_price, None);
        assert_eq!(records[1].week, 6);
    }
}
