use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::{CategoryCount, CityDailyCount, CityStats, DailyCount, OrderRecord, SummaryStats};
use crate::utils::constants::{DEFAULT_ROLLING_WINDOW, TOP_BUSIEST_DAYS};

/// Arithmetic mean. Returns 0.0 for an empty slice.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a sample. Returns 0.0 for an empty slice.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Computes the grouped statistics over the loaded order table.
///
/// All counting statistics include every row, flagged or not. The value,
/// delivery-time and delivery-fee means optionally skip flagged rows when
/// `exclude_flagged` is set.
pub struct TrendAnalyzer {
    window: usize,
    exclude_flagged: bool,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_ROLLING_WINDOW,
            exclude_flagged: false,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn with_exclude_flagged(mut self, exclude_flagged: bool) -> Self {
        self.exclude_flagged = exclude_flagged;
        self
    }

    /// Orders per date, ascending by date.
    pub fn daily_counts(&self, records: &[OrderRecord]) -> Vec<DailyCount> {
        let mut counts: BTreeMap<chrono::NaiveDate, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(record.order_date).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(date, order_count)| DailyCount { date, order_count })
            .collect()
    }

    /// Trailing moving average over the daily counts. The first `window - 1`
    /// points are `None`; from then on each point is the mean of its full
    /// trailing window.
    pub fn moving_average(&self, daily: &[DailyCount]) -> Vec<Option<f64>> {
        let mut averages = Vec::with_capacity(daily.len());
        let mut window_sum = 0.0;

        for (i, day) in daily.iter().enumerate() {
            window_sum += day.order_count as f64;
            if i + 1 > self.window {
                window_sum -= daily[i + 1 - self.window - 1].order_count as f64;
            }

            if i + 1 >= self.window {
                averages.push(Some(window_sum / self.window as f64));
            } else {
                averages.push(None);
            }
        }

        averages
    }

    /// Per-city totals, sorted by total orders descending. `avg_daily_orders`
    /// divides each city's total by the number of distinct dates on which that
    /// city had at least one order.
    pub fn city_stats(&self, records: &[OrderRecord]) -> Vec<CityStats> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        let mut active_dates: BTreeMap<&str, BTreeSet<chrono::NaiveDate>> = BTreeMap::new();

        for record in records {
            *totals.entry(record.city.as_str()).or_default() += 1;
            active_dates
                .entry(record.city.as_str())
                .or_default()
                .insert(record.order_date);
        }

        let mut stats: Vec<CityStats> = totals
            .into_iter()
            .map(|(city, total_orders)| {
                let days = active_dates[city].len();
                CityStats {
                    city: city.to_string(),
                    total_orders,
                    avg_daily_orders: total_orders as f64 / days as f64,
                }
            })
            .collect();

        stats.sort_by(|a, b| b.total_orders.cmp(&a.total_orders).then(a.city.cmp(&b.city)));
        stats
    }

    /// Orders per (date, city) pair, ascending by date then city.
    pub fn city_daily_counts(&self, records: &[OrderRecord]) -> Vec<CityDailyCount> {
        let mut counts: BTreeMap<(chrono::NaiveDate, &str), usize> = BTreeMap::new();
        for record in records {
            *counts
                .entry((record.order_date, record.city.as_str()))
                .or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((date, city), order_count)| CityDailyCount {
                date,
                city: city.to_string(),
                order_count,
            })
            .collect()
    }

    /// Global descriptive statistics.
    pub fn summary(&self, records: &[OrderRecord]) -> SummaryStats {
        let daily = self.daily_counts(records);

        let mut busiest_days = daily.clone();
        busiest_days.sort_by(|a, b| b.order_count.cmp(&a.order_count).then(a.date.cmp(&b.date)));
        busiest_days.truncate(TOP_BUSIEST_DAYS);

        let daily_counts: Vec<f64> = daily.iter().map(|d| d.order_count as f64).collect();

        let sample: Vec<&OrderRecord> = if self.exclude_flagged {
            records.iter().filter(|r| !r.is_flagged()).collect()
        } else {
            records.iter().collect()
        };
        debug!(
            total = records.len(),
            sampled = sample.len(),
            exclude_flagged = self.exclude_flagged,
            "computing global means"
        );

        let order_values: Vec<f64> = sample.iter().map(|r| r.order_value).collect();
        let delivery_times: Vec<f64> = sample.iter().map(|r| r.delivery_time_min).collect();
        let delivery_fees: Vec<f64> = sample.iter().map(|r| r.delivery_fee).collect();

        SummaryStats {
            total_orders: records.len(),
            total_days: daily.len(),
            avg_orders_per_day: mean(&daily_counts),
            max_daily_orders: daily.iter().map(|d| d.order_count).max().unwrap_or(0),
            min_daily_orders: daily.iter().map(|d| d.order_count).min().unwrap_or(0),
            busiest_days,
            avg_order_value: mean(&order_values),
            median_order_value: median(&order_values),
            // Revenue sums every row regardless of the sampling choice.
            total_revenue: records.iter().map(|r| r.order_value).sum(),
            avg_delivery_time_min: mean(&delivery_times),
            avg_delivery_fee: mean(&delivery_fees),
            means_exclude_flagged: self.exclude_flagged,
        }
    }

    /// Counts per value of a categorical column, sorted by count descending.
    /// Rows where the column is absent are skipped.
    pub fn categorical_breakdown<'a, F>(
        &self,
        records: &'a [OrderRecord],
        accessor: F,
    ) -> Vec<CategoryCount>
    where
        F: Fn(&'a OrderRecord) -> Option<&'a str>,
    {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            if let Some(label) = accessor(record) {
                *counts.entry(label).or_default() += 1;
            }
        }

        let mut breakdown: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(label, count)| CategoryCount {
                label: label.to_string(),
                count,
            })
            .collect();

        breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
        breakdown
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
