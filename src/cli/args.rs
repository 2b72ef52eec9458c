use clap::Parser;
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_INPUT_FILE, DEFAULT_ROLLING_WINDOW};

#[derive(Parser, Debug)]
#[command(name = "order-analyzer")]
#[command(about = "Descriptive statistics and trend charts for delivery order exports")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE, help = "Input orders CSV file")]
    pub input: PathBuf,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Directory the chart images are written to"
    )]
    pub output_dir: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_ROLLING_WINDOW,
        help = "Moving-average window in days"
    )]
    pub window: usize,

    #[arg(
        long,
        help = "Exclude flagged rows from the order value / delivery time / fee averages"
    )]
    pub exclude_flagged: bool,

    #[arg(long, help = "Also write the computed statistics to a JSON report")]
    pub report: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["order-analyzer"]);

        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.window, 7);
        assert!(!cli.exclude_flagged);
        assert!(cli.report.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "order-analyzer",
            "-i",
            "march.csv",
            "-o",
            "out",
            "--window",
            "14",
            "--exclude-flagged",
        ]);

        assert_eq!(cli.input, PathBuf::from("march.csv"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.window, 14);
        assert!(cli.exclude_flagged);
    }
}
