use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::models::CityDailyCount;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};

/// Render daily order counts per city as a multi-line PNG chart, one series
/// per city. Overwrites `path` if it already exists.
pub fn render_city_comparison(city_daily: &[CityDailyCount], path: &Path) -> Result<()> {
    if city_daily.is_empty() {
        return Err(AnalysisError::InvalidFormat(
            "cannot render city comparison chart from an empty series".to_string(),
        ));
    }

    draw(city_daily, path).map_err(|e| AnalysisError::chart(path, e))
}

fn draw(
    city_daily: &[CityDailyCount],
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // One ordered series per city.
    let mut series: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for entry in city_daily {
        series
            .entry(&entry.city)
            .or_default()
            .push((entry.date, entry.order_count as f64));
    }

    let min_date = city_daily.iter().map(|e| e.date).min().unwrap();
    let max_date = city_daily
        .iter()
        .map(|e| e.date)
        .max()
        .unwrap()
        .max(min_date + Duration::days(1));
    let max_count = city_daily.iter().map(|e| e.order_count).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Orders by City", ("sans-serif", 24))
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

    for (idx, (city, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(*city)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
