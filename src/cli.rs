//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{Elective, Gender};
use crate::view::RosterFilter;
use clap::Parser;
use std::path::PathBuf;

/// ElectiveLens - elective allocation analytics for student cohorts
///
/// Summarize a roster by section, gender and elective, generate ranked
/// insights, and export a filtered student directory.
///
/// Examples:
///   electivelens --data students.csv
///   electivelens --data students.json --format json -o dashboard.json
///   electivelens --data students.csv --section "CSE A" --elective AIML --page 2
///   electivelens --data students.csv --gender FEMALE --export-csv exports/
///   electivelens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Roster file to analyze (.csv or .json)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "ELECTIVELENS_DATA",
        required_unless_present = "init_config"
    )]
    pub data: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file value, or electivelens_report.md
    /// (electivelens_report.json with --format json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .electivelens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Search the directory by name or enrollment number
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only list students in this section (e.g. "CSE A")
    #[arg(long, value_name = "LABEL")]
    pub section: Option<String>,

    /// Only list students with this elective
    #[arg(long, value_name = "ELECTIVE", ignore_case = true)]
    pub elective: Option<ElectiveArg>,

    /// Only list students of this gender
    #[arg(long, value_name = "GENDER", ignore_case = true)]
    pub gender: Option<GenderArg>,

    /// Include a page of the student directory in the report
    #[arg(long)]
    pub include_roster: bool,

    /// Directory page to include (1-indexed)
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    /// Rows per directory page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Export the filtered directory as CSV into this directory
    #[arg(long, value_name = "DIR")]
    pub export_csv: Option<PathBuf>,

    /// Skip the public IP lookup in export headers
    #[arg(long)]
    pub no_ip_lookup: bool,

    /// Timeout for the public IP lookup in seconds
    #[arg(long, value_name = "SECS")]
    pub ip_timeout: Option<u64>,

    /// Generate a default .electivelens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Elective values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ElectiveArg {
    Aiml,
    Ds,
}

impl From<ElectiveArg> for Elective {
    fn from(arg: ElectiveArg) -> Self {
        match arg {
            ElectiveArg::Aiml => Elective::Aiml,
            ElectiveArg::Ds => Elective::Ds,
        }
    }
}

/// Gender values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.data {
            Some(ref path) if !path.is_file() => {
                return Err(format!("Roster file does not exist: {}", path.display()));
            }
            None => return Err("A roster file is required (--data)".to_string()),
            _ => {}
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.page == Some(0) {
            return Err("Page must be at least 1".to_string());
        }

        if self.page_size == Some(0) {
            return Err("Page size must be at least 1".to_string());
        }

        if self.ip_timeout == Some(0) {
            return Err("IP lookup timeout must be at least 1 second".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `general.verbose` config value; `--quiet`
    /// always wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether any directory filter was given.
    pub fn has_directory_filters(&self) -> bool {
        self.search.is_some()
            || self.section.is_some()
            || self.elective.is_some()
            || self.gender.is_some()
    }

    /// Build the directory filter from the arguments.
    pub fn roster_filter(&self) -> RosterFilter {
        RosterFilter {
            search: self.search.clone(),
            section: self.section.clone(),
            elective: self.elective.map(Into::into),
            gender: self.gender.map(Into::into),
        }
    }
}
