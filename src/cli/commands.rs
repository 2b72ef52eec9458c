use std::fs::File;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::charts::{render_city_comparison, render_daily_trend};
use crate::cli::args::Cli;
use crate::error::Result;
use crate::models::{AnalysisReport, CityStats, OrderRecord, SummaryStats};
use crate::processors::{QualityChecker, TrendAnalyzer};
use crate::readers::OrderReader;
use crate::utils::constants::{CITY_TRENDS_CHART, DAILY_TREND_CHART};
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    println!("Talabat UAE Orders Analysis");
    println!("Input file: {}", cli.input.display());

    // Load
    let progress = ProgressReporter::new_spinner("Loading dataset...", false);
    let reader = OrderReader::new();
    let records = reader.read_orders(&cli.input)?;
    progress.finish_with_message(&format!("Loaded {} orders", records.len()));

    let analyzer = TrendAnalyzer::new()
        .with_window(cli.window)
        .with_exclude_flagged(cli.exclude_flagged);

    let daily = analyzer.daily_counts(&records);
    println!(
        "Dataset loaded: {} orders from {} days",
        records.len(),
        daily.len()
    );

    // Data quality
    let checker = QualityChecker::new();
    let quality = checker.check(&records);
    println!("\n{}", checker.generate_summary(&quality));

    // Daily and city trends
    let rolling = analyzer.moving_average(&daily);
    let summary = analyzer.summary(&records);
    print_daily_trends(&summary);

    let cities = analyzer.city_stats(&records);
    print_city_trends(&cities);

    // Charts
    std::fs::create_dir_all(&cli.output_dir)?;
    let trend_path = cli.output_dir.join(DAILY_TREND_CHART);
    let cities_path = cli.output_dir.join(CITY_TRENDS_CHART);

    let progress = ProgressReporter::new_spinner("Rendering charts...", false);
    render_daily_trend(&daily, &rolling, cli.window, &trend_path)?;
    let city_daily = analyzer.city_daily_counts(&records);
    render_city_comparison(&city_daily, &cities_path)?;
    progress.finish_with_message("Charts rendered");

    // Business insights
    print_business_insights(&records, &analyzer, &summary);

    // Optional JSON report
    if let Some(report_path) = &cli.report {
        let report = AnalysisReport {
            input: cli.input.display().to_string(),
            quality,
            summary,
            cities,
        };
        serde_json::to_writer_pretty(File::create(report_path)?, &report)?;
        info!(path = %report_path.display(), "JSON report written");
        println!("\nReport written to {}", report_path.display());
    }

    println!("\nGenerated files:");
    println!("- {}", trend_path.display());
    println!("- {}", cities_path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_daily_trends(summary: &SummaryStats) {
    println!("=== Daily Trends ===");
    println!("Total days: {}", summary.total_days);
    println!("Average orders per day: {:.1}", summary.avg_orders_per_day);
    println!("Max orders in a day: {}", summary.max_daily_orders);
    println!("Min orders in a day: {}", summary.min_daily_orders);

    println!("\nTop {} busiest days:", summary.busiest_days.len());
    for day in &summary.busiest_days {
        println!("  {}: {} orders", day.date, day.order_count);
    }
    println!();
}

fn print_city_trends(cities: &[CityStats]) {
    println!("=== City Trends ===");
    println!("Total orders by city:");
    for city in cities {
        println!("  {}: {}", city.city, city.total_orders);
    }

    println!("\nAverage daily orders per city:");
    for city in cities {
        println!("  {}: {:.1}", city.city, city.avg_daily_orders);
    }
    println!();
}

fn print_business_insights(
    records: &[OrderRecord],
    analyzer: &TrendAnalyzer,
    summary: &SummaryStats,
) {
    println!("\n=== Business Insights ===");
    if summary.means_exclude_flagged {
        println!("(averages computed over unflagged rows only)");
    } else {
        println!("(averages computed over all rows, flagged included)");
    }
    println!("Average order value: AED {:.2}", summary.avg_order_value);
    println!("Median order value: AED {:.2}", summary.median_order_value);
    println!("Total revenue: AED {:.2}", summary.total_revenue);
    println!(
        "Average delivery time: {:.1} minutes",
        summary.avg_delivery_time_min
    );
    println!("Average delivery fee: AED {:.2}", summary.avg_delivery_fee);

    let sections = [
        ("Payment Methods", analyzer.categorical_breakdown(records, |r| r.payment_method.as_deref())),
        ("Promo Code Usage", analyzer.categorical_breakdown(records, |r| r.promo_code_used.as_deref())),
        ("Top Restaurant Categories", analyzer.categorical_breakdown(records, |r| r.restaurant_category.as_deref())),
    ];

    for (title, breakdown) in sections {
        if breakdown.is_empty() {
            continue;
        }
        println!("\n{}:", title);
        for bucket in breakdown.iter().take(5) {
            println!(
                "  {}: {} ({:.1}%)",
                bucket.label,
                bucket.count,
                bucket.percentage(records.len())
            );
        }
    }
}
