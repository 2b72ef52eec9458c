pub mod city_comparison;
pub mod daily_trend;

pub use city_comparison::render_city_comparison;
pub use daily_trend::render_daily_trend;
