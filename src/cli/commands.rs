//! Command implementations for the corrosion rawdata CLI
//!
//! This module contains the command execution logic, progress reporting
//! and the final load report.

use crate::app::adapters::csv_table::CsvTableProvider;
use crate::app::pipeline::{LoadSummary, SampleLoader};
use crate::app::services::schema_binder::{Collection, MemoryFactory, sample_schema};
use crate::cli::args::{Args, Commands, LoadArgs, OutputFormat, SchemaArgs};
use crate::cli::input::discover_sheets;
use crate::config::{Config, LabelPrefix, SourceConfig};
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Outcome of one loaded sheet
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub summary: LoadSummary,
}

/// Statistics of a command run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub loaded: Vec<FileReport>,
    /// Failed sheets with their error message
    pub failed: Vec<(PathBuf, String)>,
    #[serde(skip)]
    pub processing_time: Duration,
}

impl LoadStats {
    pub fn samples(&self) -> usize {
        self.loaded.iter().map(|report| report.summary.samples).sum()
    }

    pub fn runs(&self) -> usize {
        self.loaded.iter().map(|report| report.summary.runs).sum()
    }

    pub fn files_failed(&self) -> usize {
        self.failed.len()
    }

    /// True when no sheet failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the selected subcommand
pub fn run(args: Args) -> Result<LoadStats> {
    match args.command {
        Some(Commands::Load(load_args)) => run_load(load_args),
        Some(Commands::Schema(schema_args)) => run_schema(&schema_args).map(|_| LoadStats::default()),
        None => Err(Error::configuration("No command given")),
    }
}

/// Load every sheet named on the command line
///
/// Each sheet becomes its own collection; a failing sheet is reported and
/// counted unless `--fail-fast` is set.
pub fn run_load(args: LoadArgs) -> Result<LoadStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting corrosion rawdata loader");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);
    let loader = SampleLoader::from_config(&config)?;

    let sheets = discover_sheets(&args.paths)
        .map_err(|e| Error::configuration(format!("Failed to discover sheets: {:#}", e)))?;
    if sheets.is_empty() {
        return Err(Error::configuration("No CSV files found in the given paths"));
    }
    info!("Loading {} sheets", sheets.len());

    let progress_bar = if args.show_progress() && sheets.len() > 1 {
        Some(create_progress_bar(sheets.len() as u64))
    } else {
        None
    };

    let mut stats = LoadStats::default();
    let mut collections = serde_json::Map::new();

    for (i, sheet) in sheets.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(format!("Loading {}", sheet.display()));
        }

        let provider = CsvTableProvider::new(sheet, config.source.clone());
        let mut collection = Collection::new();

        match loader.load(&provider, &MemoryFactory, &mut collection) {
            Ok(summary) => {
                if args.output_file.is_some() {
                    let value = serde_json::to_value(&collection).map_err(|e| {
                        Error::json(format!("Failed to serialize {}", sheet.display()), e)
                    })?;
                    collections.insert(sheet.display().to_string(), value);
                }
                stats.loaded.push(FileReport {
                    path: sheet.clone(),
                    summary,
                });
            }
            Err(e) => {
                error!("Failed to load {}: {}", sheet.display(), e);
                if args.fail_fast {
                    if let Some(pb) = &progress_bar {
                        pb.abandon_with_message("Aborted");
                    }
                    return Err(e);
                }
                stats.failed.push((sheet.clone(), e.to_string()));
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Loading complete");
    }

    if let Some(output_file) = &args.output_file {
        write_json(output_file, &collections)?;
        info!("Wrote {} collections to {}", collections.len(), output_file.display());
    }

    stats.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => generate_human_report(&stats, args.output_file.as_deref()),
        OutputFormat::Json => generate_json_report(&stats)?,
    }

    Ok(stats)
}

/// Print or write the sample data model schema
pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let json = sample_schema().to_json_pretty()?;

    match &args.output_file {
        Some(path) => std::fs::write(path, json + "\n")
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

/// Set up structured logging on stderr
fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("corrosion_rawdata={}", log_level)));

    let result = if quiet {
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
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then the optional config file, then CLI overrides
fn load_configuration(args: &LoadArgs) -> Result<Config> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &LoadArgs) {
    if args.lab_sheet {
        config.source = SourceConfig {
            delimiter: config.source.delimiter,
            ..SourceConfig::lab_sheet()
        };
    }
    if let Some(skip_rows) = args.skip_rows {
        config.source.skip_rows = skip_rows;
    }
    if let Some(header) = &args.header {
        config.source.header = Some(header.columns.clone());
    }
    if let Some(prefix) = &args.label_prefix {
        config.label_prefix = LabelPrefix(prefix.clone());
    }
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Initializing...");
    pb
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::json(format!("Failed to serialize {}", path.display()), e))?;
    std::fs::write(path, json)
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
}

/// Generate human-readable report
fn generate_human_report(stats: &LoadStats, output_file: Option<&Path>) {
    println!("\n{}", "Load Summary".bright_green().bold());

    for report in &stats.loaded {
        let summary = &report.summary;
        println!(
            "  {} {} samples, {} runs (nimp={}, nlpr={})",
            format!("{}:", report.path.display()).bright_cyan(),
            summary.samples.to_string().bright_white().bold(),
            summary.runs.to_string().bright_white(),
            summary.nimp,
            summary.nlpr
        );
    }
    for (path, message) in &stats.failed {
        println!(
            "  {} {}",
            format!("{}:", path.display()).bright_red(),
            message
        );
    }

    println!();
    println!(
        "  {} {}",
        "Sheets loaded:".bright_cyan(),
        stats.loaded.len().to_string().bright_white()
    );
    if stats.files_failed() > 0 {
        println!(
            "  {} {}",
            "Sheets failed:".bright_red(),
            stats.files_failed().to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Samples:".bright_cyan(),
        stats.samples().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Runs:".bright_cyan(),
        stats.runs().to_string().bright_white()
    );
    if let Some(path) = output_file {
        println!("  {} {}", "Output:".bright_cyan(), path.display());
    }
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &LoadStats) -> Result<()> {
    let report = serde_json::json!({
        "sheets_loaded": stats.loaded.len(),
        "sheets_failed": stats.files_failed(),
        "samples": stats.samples(),
        "runs": stats.runs(),
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "files": stats.loaded,
        "failures": stats.failed.iter().map(|(path, message)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "error": message,
            })
        }).collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::json("Failed to serialize load report", e))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ColumnList;
    use tempfile::TempDir;

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default();
        let args = LoadArgs {
            skip_rows: Some(4),
            header: Some(ColumnList {
                columns: vec!["Sample".to_string(), "RunID".to_string()],
            }),
            label_prefix: Some("coupon".to_string()),
            ..Default::default()
        };

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.source.skip_rows, 4);
        assert_eq!(config.source.header.as_ref().unwrap().len(), 2);
        assert_eq!(config.label_prefix.as_str(), "coupon");
    }

    #[test]
    fn test_lab_sheet_override_keeps_delimiter() {
        let mut config = Config::default();
        config.source.delimiter = ';';
        let args = LoadArgs {
            lab_sheet: true,
            ..Default::default()
        };

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.source.skip_rows, 2);
        assert_eq!(config.source.header.as_ref().unwrap().len(), 19);
        assert_eq!(config.source.delimiter, ';');
    }

    #[test]
    fn test_load_stats_totals() {
        let summary = |samples, runs| LoadSummary {
            samples,
            runs,
            ..Default::default()
        };
        let stats = LoadStats {
            loaded: vec![
                FileReport {
                    path: PathBuf::from("a.csv"),
                    summary: summary(2, 5),
                },
                FileReport {
                    path: PathBuf::from("b.csv"),
                    summary: summary(1, 3),
                },
            ],
            failed: vec![(PathBuf::from("c.csv"), "bad".to_string())],
            ..Default::default()
        };

        assert_eq!(stats.samples(), 3);
        assert_eq!(stats.runs(), 8);
        assert_eq!(stats.files_failed(), 1);
        assert!(!stats.is_success());
    }

    #[test]
    fn test_schema_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");

        run_schema(&SchemaArgs {
            output_file: Some(path.clone()),
        })
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let schema = crate::EntitySchema::from_json_str(&written).unwrap();
        assert_eq!(schema, sample_schema());
    }
}
