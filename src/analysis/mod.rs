//! Analytics modules.
//!
//! Raw records flow through the normalizer, the aggregator and the
//! insight generator. Every step is a pure function of its input.

pub mod aggregator;
pub mod insights;
pub mod normalizer;
pub mod session;

pub use aggregator::*;
pub use insights::{generate_insights, select_findings, Finding};
pub use normalizer::{unassigned, Normalizer};
pub use session::AnalyticsSession;

use crate::models::{Dashboard, StudentRecord};
use tracing::debug;

/// Run the full pipeline over a raw roster.
pub fn analyze(raw: &[StudentRecord], normalizer: &Normalizer) -> Dashboard {
    let records = normalizer.normalize(raw);
    let aggregates = aggregate(&records);
    let insights = generate_insights(&aggregates);

    debug!(
        "Analyzed {} records: {} AIML, {} DS",
        aggregates.totals.total, aggregates.totals.aiml, aggregates.totals.ds
    );

    Dashboard {
        records,
        aggregates,
        insights,
    }
}
