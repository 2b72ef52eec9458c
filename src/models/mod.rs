pub mod aggregates;
pub mod order;

pub use aggregates::{
    AnalysisReport, CategoryCount, CityDailyCount, CityStats, DailyCount, SummaryStats,
};
pub use order::{OrderRecord, RawOrderRow};
