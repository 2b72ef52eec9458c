/// File names
pub const DEFAULT_INPUT_FILE: &str = "talabat_uae_orders_dataset.csv";
pub const DAILY_TREND_CHART: &str = "daily_orders_trend.png";
pub const CITY_TRENDS_CHART: &str = "city_trends.png";

/// Aggregation defaults
pub const DEFAULT_ROLLING_WINDOW: usize = 7;
pub const TOP_BUSIEST_DAYS: usize = 5;

/// Chart geometry
pub const CHART_WIDTH: u32 = 1400;
pub const CHART_HEIGHT: u32 = 600;
