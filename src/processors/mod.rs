pub mod aggregator;
pub mod quality_checker;

pub use aggregator::TrendAnalyzer;
pub use quality_checker::{QualityChecker, QualityReport};
