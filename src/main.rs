//! ElectiveLens - elective allocation analytics
//!
//! A CLI tool that loads a student roster, normalizes section labels,
//! aggregates elective and gender counts per section, and writes a
//! dashboard report with ranked insights.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable roster, bad config, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod export;
mod models;
mod report;
mod roster;
mod view;

use analysis::{unassigned, AnalyticsSession, Normalizer};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::{Report, ReportMetadata, StudentRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so general.verbose applies
    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("ElectiveLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    origin.log();

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .electivelens.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize section aliases, export headers, and more.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete analytics workflow. Returns the exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    let data_path = args
        .data
        .clone()
        .context("A roster file is required (--data)")?;

    // Step 1: Load the roster
    if !args.quiet {
        println!("📥 Loading roster: {}", data_path.display());
    }
    let raw = roster::load_roster(&data_path)
        .with_context(|| format!("Failed to load roster {}", data_path.display()))?;
    info!("Loaded {} records", raw.len());

    if raw.is_empty() {
        warn!("Roster is empty, every figure will be zero");
    }

    // Step 2: Analyze
    let normalizer = Normalizer::from(&config.normalize);
    debug!("Using {} section aliases", normalizer.alias_count());

    // Records are filtered after normalization, so the filter must be too
    let filter = args.roster_filter().with_canonical_section(&normalizer);

    let roster: Arc<[StudentRecord]> = Arc::from(raw);
    let session = AnalyticsSession::new(roster, normalizer);
    let dashboard = session.dashboard();

    let left_over = unassigned(&dashboard.records);
    if !left_over.is_empty() {
        warn!(
            "{} record(s) have no recognised section and are excluded from section figures",
            left_over.len()
        );
        for record in &left_over {
            debug!(
                "Unassigned: {} ({}) section {:?}",
                record.name, record.enrollment, record.section
            );
        }
    }

    // Step 3: Directory page
    let roster_page = config.report.include_roster.then(|| {
        view::roster_page(
            &dashboard.records,
            &filter,
            args.page.unwrap_or(1),
            config.report.page_size,
        )
    });

    // Step 4: Build and save the report
    let metadata = ReportMetadata {
        source: data_path.display().to_string(),
        generated_at: Utc::now(),
        records_loaded: dashboard.records.len(),
        unassigned: left_over.len(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };

    let report = Report {
        metadata,
        dashboard: dashboard.clone(),
        roster: roster_page,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = Path::new(&config.general.output);
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Step 5: Optional CSV export
    if let Some(ref export_dir) = args.export_csv {
        let matching = filter.apply(&dashboard.records);
        let ip = resolve_ip(&config, args.quiet).await?;

        let header = export::ExportHeader {
            institution: config.export.institution.clone(),
            title: config.export.title.clone(),
            generated: Utc::now().date_naive(),
            ip,
        };

        let path = export::export_directory(export_dir, &matching, &filter, &header)?;
        if !args.quiet {
            println!("📄 Exported {} students to {}", matching.len(), path.display());
        }
    }

    // Print summary
    if !args.quiet {
        println!("\n📊 Summary:");
        for line in analysis::generate_summary_text(&dashboard.aggregates).lines() {
            println!("   {}", line);
        }

        println!("\n💡 Insights:");
        for insight in &dashboard.insights {
            println!("   {} {}", insight.icon, insight.text);
        }

        println!(
            "\n✅ Analysis complete! Report saved to: {}",
            output_path.display()
        );
    }

    Ok(0)
}

/// Run the IP lookup behind a spinner.
async fn resolve_ip(config: &Config, quiet: bool) -> Result<String> {
    let diagnostic = export::DiagnosticConfig::from(&config.export);
    if !diagnostic.enabled {
        return Ok(export::lookup_public_ip(&diagnostic).await);
    }

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message("Looking up public IP...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let ip = export::lookup_public_ip(&diagnostic).await;
    spinner.finish_and_clear();

    Ok(ip)
}

/// Where the configuration came from, logged once logging is up.
enum ConfigOrigin {
    File(PathBuf),
    Defaults,
    Fallback(anyhow::Error),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
            ConfigOrigin::Defaults => debug!("No config file found, using defaults"),
            ConfigOrigin::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` that cannot be read is an error; a broken
/// default file falls back to the built-in settings.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigOrigin::File(PathBuf::from(CONFIG_FILE_NAME)))),
        Ok(None) => Ok((Config::default(), ConfigOrigin::Defaults)),
        Err(e) => Ok((Config::default(), ConfigOrigin::Fallback(e))),
    }
}
