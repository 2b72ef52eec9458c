use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Input file '{}' contains no order rows", .0.display())]
    EmptyDataset(PathBuf),

    #[error("Failed to render chart '{}': {message}", .path.display())]
    Chart { path: PathBuf, message: String },

    #[error("JSON report error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Wrap a plotters backend error together with the output path it was writing to.
    pub fn chart(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        AnalysisError::Chart {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
