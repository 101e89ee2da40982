//! Static Chart Renderer
//! Draws the report charts as PNG files with plotters.
//!
//! Charts:
//! 1. Weekly sales trend (line)
//! 2. Top 10 stores by average sales (bars)
//! 3. Holiday vs non-holiday average sales (pie)
//! 4. Correlation heatmap over numeric columns
//! 5. Sales distribution (histogram + density)
//! 6. Sales by year (box plots)
//! 7. Temperature vs sales, 8. Fuel price vs sales (scatter, when present)
//! 9. Monthly total sales (area)

use crate::data::SalesRecord;
use crate::stats::{
    format_amount, CorrelationMatrix, KeyedValue, SalesSummary, StatsCalculator, HISTOGRAM_BINS,
};
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use std::error::Error;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

type DrawResult = Result<(), Box<dyn Error>>;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;
const FONT: &str = "sans-serif";

// Colors
const BLUE: RGBColor = RGBColor(76, 114, 176);
const ORANGE: RGBColor = RGBColor(221, 132, 82);
const GREEN: RGBColor = RGBColor(85, 168, 104);
const GRAY: RGBColor = RGBColor(200, 200, 200);
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

const TOP_STORES: usize = 10;

/// The fixed set of report charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    SalesTrend,
    TopStores,
    HolidayPie,
    CorrelationHeatmap,
    SalesHistogram,
    SalesByYear,
    TemperatureScatter,
    FuelPriceScatter,
    MonthlyArea,
}

impl ChartKind {
    /// Render order, matching the file numbering.
    pub const ALL: [ChartKind; 9] = [
        ChartKind::SalesTrend,
        ChartKind::TopStores,
        ChartKind::HolidayPie,
        ChartKind::CorrelationHeatmap,
        ChartKind::SalesHistogram,
        ChartKind::SalesByYear,
        ChartKind::TemperatureScatter,
        ChartKind::FuelPriceScatter,
        ChartKind::MonthlyArea,
    ];

    /// Order of the chart slides in the deck.
    pub const SLIDE_ORDER: [ChartKind; 9] = [
        ChartKind::SalesTrend,
        ChartKind::TopStores,
        ChartKind::HolidayPie,
        ChartKind::CorrelationHeatmap,
        ChartKind::SalesHistogram,
        ChartKind::SalesByYear,
        ChartKind::MonthlyArea,
        ChartKind::TemperatureScatter,
        ChartKind::FuelPriceScatter,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::SalesTrend => "01_sales_trend_line.png",
            ChartKind::TopStores => "02_top10_avg_store_bar.png",
            ChartKind::HolidayPie => "03_holiday_pie.png",
            ChartKind::CorrelationHeatmap => "04_correlation_heatmap.png",
            ChartKind::SalesHistogram => "05_sales_histogram.png",
            ChartKind::SalesByYear => "06_boxplot_year.png",
            ChartKind::TemperatureScatter => "07_scatter_temperature_sales.png",
            ChartKind::FuelPriceScatter => "08_scatter_fuel_sales.png",
            ChartKind::MonthlyArea => "09_monthly_area.png",
        }
    }

    /// Caption drawn on the chart image.
    pub fn caption(&self) -> &'static str {
        match self {
            ChartKind::SalesTrend => "Weekly Sales Trend (Total across all stores)",
            ChartKind::TopStores => "Top 10 Stores by Average Weekly Sales",
            ChartKind::HolidayPie => "Average Weekly Sales: Holiday vs Non-Holiday",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap (Numeric Features)",
            ChartKind::SalesHistogram => "Distribution of Weekly Sales",
            ChartKind::SalesByYear => "Sales Distribution by Year",
            ChartKind::TemperatureScatter => "Temperature vs Weekly Sales",
            ChartKind::FuelPriceScatter => "Fuel Price vs Weekly Sales",
            ChartKind::MonthlyArea => "Monthly Total Sales (Area)",
        }
    }

    /// Title of the slide carrying the chart.
    pub fn slide_title(&self) -> &'static str {
        match self {
            ChartKind::SalesTrend => "Weekly Sales Trend",
            ChartKind::TopStores => "Top 10 Stores",
            ChartKind::HolidayPie => "Holiday vs Non-Holiday Sales",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap",
            ChartKind::SalesHistogram => "Sales Distribution",
            ChartKind::SalesByYear => "Sales by Year",
            ChartKind::TemperatureScatter => "Temperature vs Sales",
            ChartKind::FuelPriceScatter => "Fuel Price vs Sales",
            ChartKind::MonthlyArea => "Monthly Sales",
        }
    }
}

/// Outcome of rendering one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub error: Option<String>,
}

impl ChartArtifact {
    pub fn is_rendered(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the charts are drawn from.
pub struct ChartInputs<'a> {
    pub summary: &'a SalesSummary,
    pub records: &'a [SalesRecord],
    pub correlation: &'a CorrelationMatrix,
    pub has_temperature: bool,
    pub has_fuel_price: bool,
}

impl ChartInputs<'_> {
    /// Whether a chart applies to this dataset.
    pub fn includes(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::TemperatureScatter => self.has_temperature,
            ChartKind::FuelPriceScatter => self.has_fuel_price,
            _ => true,
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every applicable chart into `output_dir`.
    ///
    /// A failed chart is logged and recorded on its artifact; rendering continues.
    pub fn render_all(output_dir: &Path, inputs: &ChartInputs) -> Vec<ChartArtifact> {
        ChartKind::ALL
            .iter()
            .filter(|kind| inputs.includes(**kind))
            .map(|&kind| {
                let path = output_dir.join(kind.file_name());
                let error = match Self::render(kind, &path, inputs) {
                    Ok(()) => {
                        info!("Chart saved: {}", path.display());
                        None
                    }
                    Err(e) => {
                        warn!("Could not render {}: {}", kind.file_name(), e);
                        Some(e.to_string())
                    }
                };
                ChartArtifact { kind, path, error }
            })
            .collect()
    }

    /// Render a single chart to `path`.
    pub fn render(kind: ChartKind, path: &Path, inputs: &ChartInputs) -> DrawResult {
        match kind {
            ChartKind::SalesTrend => {
                Self::draw_date_series(path, kind, &inputs.summary.sales_by_date, false)
            }
            ChartKind::TopStores => Self::draw_top_stores(path, &inputs.summary.avg_sales_by_store),
            ChartKind::HolidayPie => Self::draw_holiday_pie(
                path,
                inputs.summary.holiday_mean(0),
                inputs.summary.holiday_mean(1),
            ),
            ChartKind::CorrelationHeatmap => Self::draw_heatmap(path, inputs.correlation),
            ChartKind::SalesHistogram => Self::draw_histogram(path, inputs.records),
            ChartKind::SalesByYear => Self::draw_year_boxplots(path, inputs.records),
            ChartKind::TemperatureScatter => {
                Self::draw_scatter(path, kind, "Temperature", inputs.records, |r| r.temperature)
            }
            ChartKind::FuelPriceScatter => {
                Self::draw_scatter(path, kind, "Fuel_Price", inputs.records, |r| r.fuel_price)
            }
            ChartKind::MonthlyArea => {
                Self::draw_date_series(path, kind, &inputs.summary.monthly_sales, true)
            }
        }
    }

    /// Line (trend) or filled area (monthly) over dates.
    fn draw_date_series(
        path: &Path,
        kind: ChartKind,
        series: &[KeyedValue<NaiveDate>],
        filled: bool,
    ) -> DrawResult {
        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|kv| (Self::day_number(kv.key), kv.value))
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (x_lo, x_hi) = Self::padded_range(&xs, 0.0);
        let (y_lo, y_hi) = Self::padded_range(&ys, 0.05);
        let y_lo = if filled { 0.0_f64.min(y_lo) } else { y_lo };

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc(if filled { "Monthly Sales" } else { "Total Weekly Sales" })
            .x_label_formatter(&|x| Self::date_label(*x))
            .y_label_formatter(&|y| Self::short_amount(*y))
            .light_line_style(&WHITE)
            .draw()?;

        if filled {
            chart.draw_series(
                AreaSeries::new(points.iter().copied(), 0.0, &BLUE.mix(0.4))
                    .border_style(BLUE.stroke_width(2)),
            )?;
        } else {
            chart.draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_top_stores(path: &Path, avg_by_store: &[KeyedValue<i64>]) -> DrawResult {
        let top: Vec<&KeyedValue<i64>> = avg_by_store.iter().take(TOP_STORES).collect();
        let labels: Vec<String> = top.iter().map(|kv| kv.key.to_string()).collect();
        let values: Vec<f64> = top.iter().map(|kv| kv.value).collect();
        let (_, y_hi) = Self::padded_range(&values, 0.1);
        let n = top.len().max(1) as i32;

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::TopStores.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..y_hi.max(1.0))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n as usize)
            .x_desc("Store")
            .y_desc("Average Weekly Sales")
            .x_label_formatter(&|v| Self::segment_label(v, &labels))
            .y_label_formatter(&|y| Self::short_amount(*y))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
                BLUE.filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))?;

        root.present()?;
        Ok(())
    }

    /// Pie of the two holiday means, starting at 12 o'clock and running counter-clockwise.
    fn draw_holiday_pie(path: &Path, non_holiday: f64, holiday: f64) -> DrawResult {
        let root = BitMapBackend::new(path, (700, 700)).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(ChartKind::HolidayPie.caption(), (FONT, 26))?;

        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = (w.min(h) as f64) * 0.35;
        let total = non_holiday + holiday;

        if total <= 0.0 {
            area.draw(&Text::new(
                "No sales data",
                (center.0 as i32, center.1 as i32),
                Self::centered_text(20),
            ))?;
            root.present()?;
            return Ok(());
        }

        let slices = [
            ("Non-Holiday", non_holiday, BLUE),
            ("Holiday", holiday, ORANGE),
        ];
        let mut start = PI / 2.0;
        for (label, value, color) in slices {
            let sweep = 2.0 * PI * value / total;
            if sweep <= 0.0 {
                continue;
            }

            let steps = ((sweep / (2.0 * PI)) * 180.0).ceil().max(2.0) as usize;
            let mut outline = vec![(center.0 as i32, center.1 as i32)];
            outline.extend((0..=steps).map(|s| {
                let angle = start + sweep * s as f64 / steps as f64;
                Self::polar(center, radius, angle)
            }));
            area.draw(&Polygon::new(outline, color.filled()))?;

            let mid = start + sweep / 2.0;
            area.draw(&Text::new(
                label.to_string(),
                Self::polar(center, radius * 1.15, mid),
                Self::centered_text(20),
            ))?;
            area.draw(&Text::new(
                format!("{:.1}%", 100.0 * value / total),
                Self::polar(center, radius * 0.6, mid),
                Self::centered_text(18),
            ))?;

            start += sweep;
        }

        root.present()?;
        Ok(())
    }

    /// Annotated correlation grid; the first label is the top row.
    fn draw_heatmap(path: &Path, matrix: &CorrelationMatrix) -> DrawResult {
        let n = matrix.labels.len().max(1) as i32;
        let labels = &matrix.labels;
        let reversed: Vec<String> = labels.iter().rev().cloned().collect();

        let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::CorrelationHeatmap.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n as usize)
            .y_labels(n as usize)
            .x_label_formatter(&|v| Self::segment_label(v, labels))
            .y_label_formatter(&|v| Self::segment_label(v, &reversed))
            .draw()?;

        for (i, row) in matrix.values.iter().enumerate() {
            let y = n - 1 - i as i32;
            for (j, &r) in row.iter().enumerate() {
                let x = j as i32;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    Self::coolwarm(r).filled(),
                )))?;
                let text = if r.is_nan() {
                    "nan".to_string()
                } else {
                    format!("{:.2}", r)
                };
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    Self::centered_text(14),
                )))?;
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_histogram(path: &Path, records: &[SalesRecord]) -> DrawResult {
        let sales: Vec<f64> = records.iter().map(|r| r.weekly_sales).collect();
        let bins = StatsCalculator::histogram(&sales, HISTOGRAM_BINS);
        let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or(1.0);
        let curve = StatsCalculator::density_curve(&sales, bin_width);

        let x_lo = bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_hi = bins.last().map(|b| b.end).unwrap_or(1.0);
        let peak = bins
            .iter()
            .map(|b| b.count as f64)
            .chain(curve.iter().map(|p| p.1))
            .fold(1.0_f64, f64::max);

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::SalesHistogram.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_lo..x_hi, 0.0..peak * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("Weekly_Sales")
            .y_desc("Count")
            .x_label_formatter(&|x| Self::short_amount(*x))
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLUE.mix(0.6).filled())
        }))?;
        chart.draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))?;

        root.present()?;
        Ok(())
    }

    fn draw_year_boxplots(path: &Path, records: &[SalesRecord]) -> DrawResult {
        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let boxes: Vec<_> = years
            .iter()
            .filter_map(|&year| {
                let values: Vec<f64> = records
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| r.weekly_sales)
                    .collect();
                StatsCalculator::box_stats(&values)
            })
            .collect();
        let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        let sales: Vec<f64> = records.iter().map(|r| r.weekly_sales).collect();
        let (y_lo, y_hi) = Self::padded_range(&sales, 0.05);
        let n = boxes.len().max(1) as i32;

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::SalesByYear.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((0..n).into_segmented(), y_lo..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n as usize)
            .x_desc("Year")
            .y_desc("Weekly_Sales")
            .x_label_formatter(&|v| Self::segment_label(v, &labels))
            .y_label_formatter(&|y| Self::short_amount(*y))
            .draw()?;

        let palette = [BLUE, ORANGE, GREEN];
        for (i, stats) in boxes.iter().enumerate() {
            let x = i as i32;
            let color = palette[i % palette.len()];
            let span = [
                (SegmentValue::Exact(x), stats.q1),
                (SegmentValue::Exact(x + 1), stats.q3),
            ];
            let median_span = [
                (SegmentValue::Exact(x), stats.median),
                (SegmentValue::Exact(x + 1), stats.median),
            ];
            let mut parts = [
                Rectangle::new(span.clone(), color.mix(0.5).filled()),
                Rectangle::new(span, BLACK.stroke_width(1)),
                Rectangle::new(median_span, BLACK.stroke_width(2)),
            ];
            for part in parts.iter_mut() {
                part.set_margin(0, 0, 40, 40);
            }
            chart.draw_series(parts)?;

            chart.draw_series([
                PathElement::new(
                    vec![
                        (SegmentValue::CenterOf(x), stats.whisker_low),
                        (SegmentValue::CenterOf(x), stats.q1),
                    ],
                    &BLACK,
                ),
                PathElement::new(
                    vec![
                        (SegmentValue::CenterOf(x), stats.q3),
                        (SegmentValue::CenterOf(x), stats.whisker_high),
                    ],
                    &BLACK,
                ),
            ])?;
            chart.draw_series(stats.outliers.iter().map(|&v| {
                Circle::new((SegmentValue::CenterOf(x), v), 3, BLACK.stroke_width(1))
            }))?;
        }

        root.present()?;
        Ok(())
    }

    /// Scatter of sales against one driver, colored by holiday flag.
    fn draw_scatter<F>(
        path: &Path,
        kind: ChartKind,
        x_desc: &str,
        records: &[SalesRecord],
        driver: F,
    ) -> DrawResult
    where
        F: Fn(&SalesRecord) -> Option<f64>,
    {
        let points: Vec<(f64, f64, bool)> = records
            .iter()
            .filter_map(|r| Some((driver(r)?, r.weekly_sales, r.holiday_flag)))
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (x_lo, x_hi) = Self::padded_range(&xs, 0.05);
        let (y_lo, y_hi) = Self::padded_range(&ys, 0.05);

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.caption(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc("Weekly_Sales")
            .y_label_formatter(&|y| Self::short_amount(*y))
            .draw()?;

        let groups = [("Holiday_Flag = 0", false, BLUE), ("Holiday_Flag = 1", true, ORANGE)];
        for (label, flag, color) in groups {
            chart
                .draw_series(
                    points
                        .iter()
                        .filter(|p| p.2 == flag)
                        .map(|&(x, y, _)| Circle::new((x, y), 3, color.mix(0.6).filled())),
                )?
                .label(label)
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn segment_label(value: &SegmentValue<i32>, labels: &[String]) -> String {
        match value {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn centered_text(size: u32) -> TextStyle<'static> {
        TextStyle::from((FONT, size).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
    }

    fn polar(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
        (
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 - radius * angle.sin()).round() as i32,
        )
    }

    /// Blue (-1) to light gray (0) to red (+1).
    fn coolwarm(r: f64) -> RGBColor {
        if r.is_nan() {
            return GRAY;
        }
        let r = r.clamp(-1.0, 1.0);
        let (from, to, t) = if r < 0.0 {
            (COOL, NEUTRAL, r + 1.0)
        } else {
            (NEUTRAL, WARM, r)
        };
        let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    /// Range spanning the values, widened by `pad` of its span.
    fn padded_range(values: &[f64], pad: f64) -> (f64, f64) {
        let (lo, hi) = StatsCalculator::value_range(values);
        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        if lo == hi {
            return (lo - 1.0, hi + 1.0);
        }
        let margin = (hi - lo) * pad;
        (lo - margin, hi + margin)
    }

    fn day_number(date: NaiveDate) -> f64 {
        (date - NaiveDate::default()).num_days() as f64
    }

    fn date_label(day: f64) -> String {
        NaiveDate::default()
            .checked_add_signed(chrono::Duration::days(day.round() as i64))
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default()
    }

    fn short_amount(value: f64) -> String {
        let abs = value.abs();
        if abs >= 1e6 {
            format!("{:.1}M", value / 1e6)
        } else if abs >= 1e3 {
            format!("{:.0}k", value / 1e3)
        } else {
            format_amount(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_order_covers_every_chart() {
        for kind in ChartKind::ALL {
            assert!(ChartKind::SLIDE_ORDER.contains(&kind));
        }
        assert_eq!(ChartKind::SLIDE_ORDER[6], ChartKind::MonthlyArea);
        assert_eq!(ChartKind::MonthlyArea.file_name(), "09_monthly_area.png");
    }

    #[test]
    fn test_optional_scatters_follow_columns() {
        let summary = crate::stats::SalesAggregator::summarize(&[]);
        let correlation = CorrelationMatrix {
            labels: Vec::new(),
            values: Vec::new(),
        };
        let inputs = ChartInputs {
            summary: &summary,
            records: &[],
            correlation: &correlation,
            has_temperature: true,
            has_fuel_price: false,
        };

        assert!(inputs.includes(ChartKind::TemperatureScatter));
        assert!(!inputs.includes(ChartKind::FuelPriceScatter));
        assert!(inputs.includes(ChartKind::SalesTrend));
    }

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(StaticChartRenderer::coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(StaticChartRenderer::coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(StaticChartRenderer::coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(StaticChartRenderer::coolwarm(f64::NAN), GRAY);
    }

    #[test]
    fn test_axis_label_helpers() {
        assert_eq!(StaticChartRenderer::short_amount(2_500_000.0), "2.5M");
        assert_eq!(StaticChartRenderer::short_amount(45_000.0), "45k");
        assert_eq!(StaticChartRenderer::short_amount(12.5), "12.50");

        let day = StaticChartRenderer::day_number(NaiveDate::from_ymd_opt(2010, 2, 5).unwrap());
        assert_eq!(day, 14645.0);
        assert_eq!(StaticChartRenderer::date_label(day), "2010-02");
        assert_eq!(StaticChartRenderer::padded_range(&[5.0, 5.0], 0.1), (4.0, 6.0));
    }

    #[test]
    fn test_polar_points_up_at_ninety_degrees() {
        let p = StaticChartRenderer::polar((100.0, 100.0), 50.0, PI / 2.0);
        assert_eq!(p, (100, 50));
    }
}
