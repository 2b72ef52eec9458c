use chrono::NaiveDate;
use serde::Serialize;

use crate::processors::QualityReport;

/// Number of orders placed on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub order_count: usize,
}

/// Per-city totals. `avg_daily_orders` divides by the number of distinct
/// dates on which the city had at least one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub city: String,
    pub total_orders: usize,
    pub avg_daily_orders: f64,
}

/// Number of orders for one city on one date, used by the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDailyCount {
    pub date: NaiveDate,
    pub city: String,
    pub order_count: usize,
}

/// Global descriptive statistics over the whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_orders: usize,
    pub total_days: usize,
    pub avg_orders_per_day: f64,
    pub max_daily_orders: usize,
    pub min_daily_orders: usize,
    pub busiest_days: Vec<DailyCount>,
    pub avg_order_value: f64,
    pub median_order_value: f64,
    pub total_revenue: f64,
    pub avg_delivery_time_min: f64,
    pub avg_delivery_fee: f64,
    /// Whether the value/time/fee means above skipped flagged rows.
    pub means_exclude_flagged: bool,
}

/// One bucket of a categorical column (payment method, promo usage, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            100.0 * self.count as f64 / total as f64
        }
    }
}

/// Machine-readable roll-up written by `--report`.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub input: String,
    pub quality: QualityReport,
    pub summary: SummaryStats,
    pub cities: Vec<CityStats>,
}
