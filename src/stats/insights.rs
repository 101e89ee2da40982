//! Key insight lines shown on the console and on the closing slide.

use crate::stats::SalesSummary;

/// Format an amount with comma thousands separators and two decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Build the ordered insight sentences for a summary.
pub fn build_insights(summary: &SalesSummary) -> Vec<String> {
    let mut insights = vec![
        format!("Total sales (dataset): {}", format_amount(summary.total_sales)),
        format!("Average weekly sales: {}", format_amount(summary.mean_sales)),
        format!("Median weekly sales: {}", format_amount(summary.median_sales)),
    ];

    if let Some(top) = summary.top_store_by_total() {
        insights.push(format!(
            "Top store by total sales: Store {} with {}",
            top.key,
            format_amount(top.value)
        ));
    }
    if let Some(top) = summary.top_store_by_average() {
        insights.push(format!(
            "Top store by average weekly sales: Store {} with {}",
            top.key,
            format_amount(top.value)
        ));
    }

    insights.push(format!(
        "Holiday vs Non-Holiday average weekly sales: Non-Holiday {}, Holiday {}",
        format_amount(summary.holiday_mean(0)),
        format_amount(summary.holiday_mean(1))
    ));

    if let Some(best) = summary.highest_month() {
        insights.push(format!(
            "Highest monthly sales observed in: {} with {}",
            best.key.format("%Y-%m"),
            format_amount(best.value)
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;
    use crate::stats::SalesAggregator;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-45210.5), "-45,210.50");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(123.0), "123.00");
    }

    #[test]
    fn test_build_insights_wording() {
        let d1 = NaiveDate::from_ymd_opt(2010, 2, 5).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2010, 3, 12).unwrap();
        let records = vec![
            SalesRecord::new(1, d1, 1_000_000.0, false),
            SalesRecord::new(2, d1, 2_500.5, true),
            SalesRecord::new(2, d2, 500.0, false),
        ];
        let summary = SalesAggregator::summarize(&records);

        let insights = build_insights(&summary);

        assert_eq!(
            insights,
            vec![
                "Total sales (dataset): 1,003,000.50".to_string(),
                "Average weekly sales: 334,333.50".to_string(),
                "Median weekly sales: 2,500.50".to_string(),
                "Top store by total sales: Store 1 with 1,000,000.00".to_string(),
                "Top store by average weekly sales: Store 1 with 1,000,000.00".to_string(),
                "Holiday vs Non-Holiday average weekly sales: Non-Holiday 500,250.00, Holiday 2,500.50"
                    .to_string(),
                "Highest monthly sales observed in: 2010-02 with 1,002,500.50".to_string(),
            ]
        );
    }
}
