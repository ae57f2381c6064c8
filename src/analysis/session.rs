//! Memoized analytics for a loaded roster.
//!
//! The dashboard is computed at most once per roster. Replacing the
//! roster with a different allocation drops the cached result; handing
//! back the same `Arc` keeps it.

use crate::analysis::{analyze, Normalizer};
use crate::models::{Dashboard, StudentRecord};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Lazily computed dashboard tied to one roster.
#[derive(Debug)]
pub struct AnalyticsSession {
    roster: Arc<[StudentRecord]>,
    normalizer: Normalizer,
    dashboard: OnceLock<Dashboard>,
}

impl AnalyticsSession {
    /// Create a session. Nothing is computed until [`Self::dashboard`] is called.
    pub fn new(roster: Arc<[StudentRecord]>, normalizer: Normalizer) -> Self {
        Self {
            roster,
            normalizer,
            dashboard: OnceLock::new(),
        }
    }

    /// The raw roster this session analyzes.
    pub fn roster(&self) -> &Arc<[StudentRecord]> {
        &self.roster
    }

    /// Whether the dashboard has been computed for the current roster.
    pub fn is_computed(&self) -> bool {
        self.dashboard.get().is_some()
    }

    /// The dashboard for the current roster, computing it on first use.
    pub fn dashboard(&self) -> &Dashboard {
        self.dashboard.get_or_init(|| {
            debug!("Computing dashboard for {} records", self.roster.len());
            analyze(&self.roster, &self.normalizer)
        })
    }

    /// Swap in a roster. The cache is kept only if it is the same allocation.
    pub fn replace_roster(&mut self, roster: Arc<[StudentRecord]>) {
        if Arc::ptr_eq(&self.roster, &roster) {
            return;
        }
        debug!("Roster changed, invalidating cached dashboard");
        self.roster = roster;
        self.dashboard = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Elective, Gender};

    fn roster(sections: &[&str]) -> Arc<[StudentRecord]> {
        sections
            .iter()
            .enumerate()
            .map(|(i, section)| StudentRecord {
                id: i as u32 + 1,
                enrollment: format!("E{}", i),
                name: format!("Student {}", i),
                section: section.to_string(),
                elective: Elective::Ds,
                gender: Gender::Female,
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_lazy_computation() {
        let session = AnalyticsSession::new(roster(&["CSE A", "CSTD"]), Normalizer::default());
        assert!(!session.is_computed());

        let dashboard = session.dashboard();
        assert_eq!(dashboard.aggregates.totals.total, 2);
        assert_eq!(dashboard.records[1].section, "CST D");
        assert!(session.is_computed());
    }

    #[test]
    fn test_same_roster_keeps_cache() {
        let data = roster(&["CSE A"]);
        let mut session = AnalyticsSession::new(data.clone(), Normalizer::default());
        session.dashboard();

        session.replace_roster(data);
        assert!(session.is_computed());
    }

    #[test]
    fn test_new_roster_invalidates_cache() {
        let mut session = AnalyticsSession::new(roster(&["CSE A"]), Normalizer::default());
        session.dashboard();

        session.replace_roster(roster(&["CSE A"]));
        assert!(!session.is_computed());

        session.replace_roster(roster(&["CSE B", "CSE B"]));
        assert_eq!(session.dashboard().aggregates.sections[1].total, 2);
        assert_eq!(session.roster().len(), 2);
    }
}
