//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.electivelens.toml` files.

use crate::analysis::normalizer::DEFAULT_ALIASES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".electivelens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Section label normalization.
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Directory export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "electivelens_report.md".to_string()
}

/// Section alias settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Raw section label -> canonical label.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
        }
    }
}

fn default_aliases() -> BTreeMap<String, String> {
    DEFAULT_ALIASES
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Directory export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Institution name shown at the top of exports.
    #[serde(default = "default_institution")]
    pub institution: String,

    /// Export title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Look up the public IP for the export footer.
    #[serde(default = "default_true")]
    pub ip_lookup: bool,

    /// Endpoint returning `{"ip": "..."}`.
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// Hard timeout for the lookup in seconds.
    #[serde(default = "default_ip_lookup_timeout")]
    pub ip_lookup_timeout_seconds: u64,

    /// Shown instead of the IP when the lookup is off or fails.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            title: default_title(),
            ip_lookup: true,
            ip_lookup_url: default_ip_lookup_url(),
            ip_lookup_timeout_seconds: default_ip_lookup_timeout(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_institution() -> String {
    "Delhi Technical Campus".to_string()
}

fn default_title() -> String {
    "Student Directory".to_string()
}

fn default_ip_lookup_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_ip_lookup_timeout() -> u64 {
    5
}

fn default_placeholder() -> String {
    "N/A".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include a page of the student directory.
    #[serde(default)]
    pub include_roster: bool,

    /// Rows per directory page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_roster: false,
            page_size: default_page_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    crate::view::DEFAULT_PAGE_SIZE
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        } else {
            // Without -o the report extension follows --format
            let extension = args.format.extension();
            let output = Path::new(&self.general.output);
            if output.extension().and_then(|e| e.to_str()) != Some(extension) {
                self.general.output = output.with_extension(extension).display().to_string();
            }
        }

        if let Some(page_size) = args.page_size {
            self.report.page_size = page_size;
        }

        // Asking for a page or filtering the directory implies showing it
        if args.include_roster || args.page.is_some() || args.has_directory_filters() {
            self.report.include_roster = true;
        }

        if args.no_ip_lookup {
            self.export.ip_lookup = false;
        }
        if let Some(timeout) = args.ip_timeout {
            self.export.ip_lookup_timeout_seconds = timeout;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
