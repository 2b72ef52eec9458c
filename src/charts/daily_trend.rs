use std::path::Path;

use chrono::Duration;
use plotters::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::models::DailyCount;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};

/// Render the daily order counts together with their trailing moving average
/// as a PNG line chart. Overwrites `path` if it already exists.
pub fn render_daily_trend(
    daily: &[DailyCount],
    rolling_avg: &[Option<f64>],
    window: usize,
    path: &Path,
) -> Result<()> {
    if daily.is_empty() {
        return Err(AnalysisError::InvalidFormat(
            "cannot render daily trend chart from an empty series".to_string(),
        ));
    }

    draw(daily, rolling_avg, window, path).map_err(|e| AnalysisError::chart(path, e))
}

fn draw(
    daily: &[DailyCount],
    rolling_avg: &[Option<f64>],
    window: usize,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let min_date = daily[0].date;
    // A single-date series still needs a non-degenerate x range.
    let max_date = daily[daily.len() - 1].date.max(min_date + Duration::days(1));
    let max_count = daily.iter().map(|d| d.order_count).max().unwrap_or(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Daily Orders Trend ({}-Day Moving Average)", window),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(min_date..max_date, 0.0..max_count * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Number of Orders")
        .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            daily.iter().map(|d| (d.date, d.order_count as f64)),
            BLUE.mix(0.4),
        ))?
        .label("Daily Orders")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.mix(0.4)));

    chart
        .draw_series(LineSeries::new(
            daily
                .iter()
                .zip(rolling_avg.iter())
                .filter_map(|(d, avg)| avg.map(|v| (d.date, v))),
            RED.stroke_width(2),
        ))?
        .label("Rolling Avg")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
