//! Sales Aggregator Module
//! Grouped sums, means and the monthly resample over cleaned records.
//!
//! Group keys are visited in ascending order and rankings use a stable sort,
//! so ties keep ascending key order.

use crate::data::SalesRecord;
use crate::stats::StatsCalculator;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// A grouped aggregate value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyedValue<K> {
    pub key: K,
    pub value: f64,
}

/// Every aggregate the report draws from.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub row_count: usize,
    pub total_sales: f64,
    pub mean_sales: f64,
    pub median_sales: f64,
    /// Ascending by date.
    pub sales_by_date: Vec<KeyedValue<NaiveDate>>,
    /// Descending by total.
    pub sales_by_store: Vec<KeyedValue<i64>>,
    /// Descending by mean.
    pub avg_sales_by_store: Vec<KeyedValue<i64>>,
    pub sales_by_year: Vec<KeyedValue<i32>>,
    pub sales_by_month: Vec<KeyedValue<u32>>,
    /// Mean sales keyed by holiday flag (0 or 1), only for flags present.
    pub holiday_means: Vec<KeyedValue<i64>>,
    /// Calendar-month totals labeled by the last day of the month.
    pub monthly_sales: Vec<KeyedValue<NaiveDate>>,
}

impl SalesSummary {
    /// Mean sales for a holiday flag, 0 when the group is absent.
    pub fn holiday_mean(&self, flag: i64) -> f64 {
        self.holiday_means
            .iter()
            .find(|kv| kv.key == flag)
            .map(|kv| kv.value)
            .unwrap_or(0.0)
    }

    pub fn top_store_by_total(&self) -> Option<&KeyedValue<i64>> {
        self.sales_by_store.first()
    }

    pub fn top_store_by_average(&self) -> Option<&KeyedValue<i64>> {
        self.avg_sales_by_store.first()
    }

    /// First month holding the largest total.
    pub fn highest_month(&self) -> Option<&KeyedValue<NaiveDate>> {
        self.monthly_sales.iter().fold(None, |best, kv| match best {
            Some(b) if b.value >= kv.value => Some(b),
            _ => Some(kv),
        })
    }
}

/// Running sum and count for one group.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Computes the sales aggregates. Every function is pure over its input.
pub struct SalesAggregator;

impl SalesAggregator {
    pub fn summarize(records: &[SalesRecord]) -> SalesSummary {
        let sales: Vec<f64> = records.iter().map(|r| r.weekly_sales).collect();

        SalesSummary {
            row_count: records.len(),
            total_sales: sales.iter().sum(),
            mean_sales: StatsCalculator::mean(&sales),
            median_sales: StatsCalculator::median(&sales).unwrap_or(f64::NAN),
            sales_by_date: Self::sum_by(records, |r| r.date),
            sales_by_store: Self::ranked(Self::sum_by(records, |r| r.store)),
            avg_sales_by_store: Self::ranked(Self::mean_by(records, |r| r.store)),
            sales_by_year: Self::sum_by(records, |r| r.year),
            sales_by_month: Self::sum_by(records, |r| r.month),
            holiday_means: Self::mean_by(records, |r| r.holiday_key()),
            monthly_sales: Self::monthly_totals(records),
        }
    }

    /// Sum of sales per key, ascending by key.
    pub fn sum_by<K, F>(records: &[SalesRecord], key: F) -> Vec<KeyedValue<K>>
    where
        K: Ord + Copy,
        F: Fn(&SalesRecord) -> K,
    {
        Self::group(records, key)
            .into_iter()
            .map(|(key, acc)| KeyedValue {
                key,
                value: acc.sum,
            })
            .collect()
    }

    /// Mean of sales per key, ascending by key.
    pub fn mean_by<K, F>(records: &[SalesRecord], key: F) -> Vec<KeyedValue<K>>
    where
        K: Ord + Copy,
        F: Fn(&SalesRecord) -> K,
    {
        Self::group(records, key)
            .into_iter()
            .map(|(key, acc)| KeyedValue {
                key,
                value: acc.mean(),
            })
            .collect()
    }

    /// Stable descending sort by value.
    pub fn ranked<K>(mut values: Vec<KeyedValue<K>>) -> Vec<KeyedValue<K>> {
        values.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        values
    }

    /// Calendar-month totals from the first to the last month with data.
    /// Months without rows are present with a zero total.
    pub fn monthly_totals(records: &[SalesRecord]) -> Vec<KeyedValue<NaiveDate>> {
        let by_month = Self::group(records, |r| (r.date.year(), r.date.month()));
        let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back())
        else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let (mut year, mut month) = first;
        while (year, month) <= last {
            let value = by_month.get(&(year, month)).map(|a| a.sum).unwrap_or(0.0);
            if let Some(key) = Self::month_end(year, month) {
                out.push(KeyedValue { key, value });
            }
            (year, month) = if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            };
        }
        out
    }

    /// Last day of a calendar month.
    pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
    }

    fn group<K, F>(records: &[SalesRecord], key: F) -> BTreeMap<K, Accumulator>
    where
        K: Ord,
        F: Fn(&SalesRecord) -> K,
    {
        let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
        for record in records {
            groups.entry(key(record)).or_default().add(record.weekly_sales);
        }
        groups
    }
}
