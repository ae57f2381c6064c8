//! Section label normalization.
//!
//! Rosters occasionally carry malformed section codes. The normalizer
//! rewrites known aliases to their canonical label and passes every
//! other field through untouched.

use crate::models::StudentRecord;
use std::collections::HashMap;
use tracing::warn;

/// Aliases applied when no configuration overrides them.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[("CSTD", "CST D")];

/// Rewrites non-canonical section labels.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: HashMap<String, String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        )
    }
}

impl From<&crate::config::NormalizeConfig> for Normalizer {
    fn from(config: &crate::config::NormalizeConfig) -> Self {
        Self::new(
            config
                .aliases
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        )
    }
}

impl Normalizer {
    /// Create a normalizer from an alias table.
    ///
    /// Entries mapping a label to itself, or to another alias, are dropped
    /// so that a single pass is always a fixpoint.
    pub fn new(aliases: HashMap<String, String>) -> Self {
        let mut accepted = HashMap::new();

        for (from, to) in &aliases {
            if from == to {
                continue;
            }
            if aliases.contains_key(to) {
                warn!(
                    "Ignoring section alias {:?} -> {:?}: target is itself an alias",
                    from, to
                );
                continue;
            }
            accepted.insert(from.clone(), to.clone());
        }

        Self { aliases: accepted }
    }

    /// Number of active aliases.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Resolve a raw section label to the label records should carry.
    pub fn canonical_label<'a>(&'a self, raw: &'a str) -> &'a str {
        self.aliases.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Normalize one record.
    pub fn normalize_record(&self, record: &StudentRecord) -> StudentRecord {
        StudentRecord {
            section: self.canonical_label(&record.section).to_string(),
            ..record.clone()
        }
    }

    /// Normalize a roster. Length and order are preserved.
    pub fn normalize(&self, records: &[StudentRecord]) -> Vec<StudentRecord> {
        records.iter().map(|r| self.normalize_record(r)).collect()
    }
}

/// Records whose section is not one of the canonical sections.
pub fn unassigned(records: &[StudentRecord]) -> Vec<&StudentRecord> {
    records
        .iter()
        .filter(|r| r.canonical_section().is_none())
        .collect()
}
