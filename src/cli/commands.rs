//! Command implementation for the CSV comparator CLI
//!
//! Loads both files, runs the engine off the async runtime, renders the
//! results and writes the optional export.

use crate::cli::args::{Args, OutputFormat};
use crate::config::CompareConfig;
use crate::engine::{ComparisonRequest, ComparisonResult, compare_cancellable};
use crate::models::{ComparisonKind, Grid, MatchStatistics, ResultRecord};
use crate::parser::load_grid;
use crate::report::{ComparisonSummary, column_headings, export_file_name, to_display_rows};

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Widest value shown in a table cell before truncation
const MAX_CELL_WIDTH: usize = 40;

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Load both CSV files concurrently
/// 3. Run the comparison with cancellation support
/// 4. Render results and write the export file
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<MatchStatistics> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let (grid_a, grid_b) = tokio::try_join!(
        load_input(&args.file_a),
        load_input(&args.file_b)
    )?;

    if args.output_format == OutputFormat::Human {
        print_file_info("File 1", &args.file_a, &grid_a);
        print_file_info("File 2", &args.file_b, &grid_b);
    }

    if args.list_columns {
        print_columns("File 1", &grid_a);
        print_columns("File 2", &grid_b);
        return Ok(MatchStatistics::default());
    }

    let mode = args.comparison_mode()?;
    let match_mode = config.match_mode;
    let options = config.engine_options();

    let spinner = args.show_progress().then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Comparing files...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    info!("Running {} comparison", mode.kind());
    let token = cancellation_token.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let request = ComparisonRequest::new(&grid_a, &grid_b, mode)
            .with_match_mode(match_mode)
            .with_options(options);
        compare_cancellable(&request, &token)
    })
    .await
    .context("Comparison task failed")?;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let result = outcome?;
    let stats = result.statistics();

    match args.output_format {
        OutputFormat::Human => {
            print_table(&result, config.show_all);
            print_statistics(&stats);
        }
        OutputFormat::Json => print_json(&result, config.show_all)?,
    }

    if let Some(format) = config.export_format {
        let path = config
            .output_dir
            .join(export_file_name(format, chrono::Utc::now()));
        write_export(&path, &format.render(result.records())).await?;
        if args.output_format == OutputFormat::Human {
            println!(
                "{} {} ({} rows)",
                "Exported".bright_green().bold(),
                path.display(),
                result.records().len()
            );
        }
    }

    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csv_comparator={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Defaults, then config file, then command-line flags
fn load_configuration(args: &Args) -> Result<CompareConfig> {
    if let Some(path) = &args.config_file {
        info!("Using config file: {}", path.display());
    }

    let config = CompareConfig::load(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    let config = args.apply_overrides(config);
    config.validate()?;

    Ok(config)
}

async fn load_input(path: &Path) -> Result<Grid> {
    load_grid(path)
        .await
        .with_context(|| format!("Error reading file {}", path.display()))
}

async fn write_export(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write export {}", path.display()))?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn print_file_info(label: &str, path: &Path, grid: &Grid) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    println!(
        "{} {} {}",
        format!("{}:", label).bright_white().bold(),
        name.bright_cyan(),
        format!(
            "(rows: {}, columns: {})",
            grid.row_count(),
            grid.column_count()
        )
        .bright_black()
    );
}

fn print_columns(label: &str, grid: &Grid) {
    println!();
    println!("{}", format!("{} columns:", label).bright_green().bold());
    for (index, column) in grid.column_labels().iter().enumerate() {
        println!("  {} {}", format!("{:>3}.", index).bright_yellow(), column);
    }
}

fn print_table(result: &ComparisonResult, show_all: bool) {
    let rows = to_display_rows(result.records(), show_all);
    println!();

    if rows.is_empty() {
        println!("{}", "No results to display".bright_black());
        return;
    }

    let (heading_a, heading_b) = column_headings(result.kind());
    println!(
        "{}",
        format!(
            "{:>6}  {:<width$}  {:<width$}  {}",
            "Row #",
            heading_a,
            heading_b,
            "Status",
            width = MAX_CELL_WIDTH
        )
        .bold()
    );

    let show_matched_row = matches!(
        result.kind(),
        ComparisonKind::Lookup | ComparisonKind::MultiField
    );
    for record in rows {
        println!("{}", format_row(record, show_matched_row));
    }
}

fn format_row(record: &ResultRecord, show_matched_row: bool) -> String {
    let mut value_b = truncate(&record.value_b);
    if show_matched_row {
        if let Some(row) = record.matched_row_index {
            value_b = format!("{} (File 2 row {})", value_b, row);
        }
    }

    let status = if record.status.is_match() {
        record.status.to_string().green()
    } else {
        record.status.to_string().red()
    };

    format!(
        "{:>6}  {:<width$}  {:<width$}  {}",
        record.source_row_index,
        truncate(&record.value_a),
        value_b,
        status,
        width = MAX_CELL_WIDTH
    )
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let mut short: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        short.push_str("...");
        short
    }
}

fn print_statistics(stats: &MatchStatistics) {
    println!();
    println!("{}", "Summary".bright_green().bold());
    println!("  Total rows:  {}", stats.total_count);
    println!(
        "  Matches:     {}",
        stats.match_count.to_string().bright_green()
    );
    println!(
        "  Mismatches:  {}",
        stats.mismatch_count.to_string().bright_red()
    );
    println!("  Match rate:  {}%", stats.match_percentage);
}

fn print_json(result: &ComparisonResult, show_all: bool) -> Result<()> {
    let summary = ComparisonSummary {
        mode: result.kind(),
        statistics: result.statistics(),
        records: to_display_rows(result.records(), show_all),
    };
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}
