//! Insight generation.
//!
//! Each insight is chosen by an independent ranking rule over the
//! aggregates. Selection produces a [`Finding`] carrying the winning
//! section and values; rendering turns it into display text. Tests
//! assert on findings so the phrasing can change freely.

use crate::analysis::aggregator::{first_max_by, first_min_by, percent};
use crate::models::{Aggregates, Elective, Insight, InsightKind, Section, SectionAggregate};

/// The outcome of one insight rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Which elective the cohort prefers. AIML wins only when strictly larger.
    GlobalPreference {
        preferred: Elective,
        aiml_percent: f64,
        ds_percent: f64,
    },
    TopAimlSection {
        section: Section,
        percent: f64,
        count: usize,
        total: usize,
    },
    TopDsSection {
        section: Section,
        percent: f64,
        count: usize,
        total: usize,
    },
    LargestSection {
        section: Section,
        total: usize,
        cohort_share: f64,
    },
    /// Section whose AIML share is closest to 50%.
    MostBalancedSection {
        section: Section,
        aiml_percent: f64,
        ds_percent: f64,
    },
    GenderSplit {
        male: usize,
        male_percent: f64,
        female: usize,
        female_percent: f64,
    },
    GenderElectivePreference {
        male_aiml_percent: f64,
        female_aiml_percent: f64,
    },
    TopFemaleSection {
        section: Section,
        percent: f64,
        count: usize,
    },
}

impl Finding {
    /// Category of this finding.
    pub fn kind(&self) -> InsightKind {
        match self {
            Finding::GlobalPreference { .. } => InsightKind::GlobalPreference,
            Finding::TopAimlSection { .. } => InsightKind::TopAimlSection,
            Finding::TopDsSection { .. } => InsightKind::TopDsSection,
            Finding::LargestSection { .. } => InsightKind::LargestSection,
            Finding::MostBalancedSection { .. } => InsightKind::MostBalancedSection,
            Finding::GenderSplit { .. } => InsightKind::GenderSplit,
            Finding::GenderElectivePreference { .. } => InsightKind::GenderElectivePreference,
            Finding::TopFemaleSection { .. } => InsightKind::TopFemaleSection,
        }
    }

    /// Glyph shown next to the insight.
    pub fn icon(&self) -> &'static str {
        match self {
            Finding::GlobalPreference {
                preferred: Elective::Aiml,
                ..
            } => "🎯",
            Finding::GlobalPreference { .. } => "📊",
            Finding::TopAimlSection { .. } => "🤖",
            Finding::TopDsSection { .. } => "📈",
            Finding::LargestSection { .. } => "👥",
            Finding::MostBalancedSection { .. } => "⚖️",
            Finding::GenderSplit { .. } => "👨‍🎓",
            Finding::GenderElectivePreference { .. } => "🎓",
            Finding::TopFemaleSection { .. } => "👩‍💻",
        }
    }

    /// Display text for this finding.
    pub fn text(&self) -> String {
        match self {
            Finding::GlobalPreference {
                preferred: Elective::Aiml,
                aiml_percent,
                ds_percent,
            } => format!(
                "Overall, AIML is the preferred elective with {:.1}% of students choosing it over DS ({:.1}%).",
                aiml_percent, ds_percent
            ),
            Finding::GlobalPreference {
                aiml_percent,
                ds_percent,
                ..
            } => format!(
                "Overall, DS is the preferred elective with {:.1}% of students choosing it over AIML ({:.1}%).",
                ds_percent, aiml_percent
            ),
            Finding::TopAimlSection {
                section,
                percent,
                count,
                total,
            } => format!(
                "{} has the highest preference for AIML with {:.1}% of students ({} out of {}).",
                section, percent, count, total
            ),
            Finding::TopDsSection {
                section,
                percent,
                count,
                total,
            } => format!(
                "{} leans heavily towards DS with {:.1}% preference ({} out of {} students).",
                section, percent, count, total
            ),
            Finding::LargestSection {
                section,
                total,
                cohort_share,
            } => format!(
                "{} is the largest section with {} students, making up {:.1}% of the total cohort.",
                section, total, cohort_share
            ),
            Finding::MostBalancedSection {
                section,
                aiml_percent,
                ds_percent,
            } => format!(
                "{} has the most balanced elective distribution with {:.1}% AIML and {:.1}% DS.",
                section, aiml_percent, ds_percent
            ),
            Finding::GenderSplit {
                male,
                male_percent,
                female,
                female_percent,
            } => format!(
                "The cohort is {:.1}% male ({}) and {:.1}% female ({}).",
                male_percent, male, female_percent, female
            ),
            Finding::GenderElectivePreference {
                male_aiml_percent,
                female_aiml_percent,
            } => format!(
                "{:.1}% of male students prefer AIML, while {:.1}% of female students prefer AIML.",
                male_aiml_percent, female_aiml_percent
            ),
            Finding::TopFemaleSection {
                section,
                percent,
                count,
            } => format!(
                "{} has the highest female representation with {:.1}% ({} students).",
                section, percent, count
            ),
        }
    }

    /// Render into a displayable insight.
    pub fn render(&self) -> Insight {
        Insight {
            kind: self.kind(),
            icon: self.icon(),
            text: self.text(),
        }
    }
}

/// Evaluate every insight rule, in display order.
pub fn select_findings(aggregates: &Aggregates) -> Vec<Finding> {
    let totals = &aggregates.totals;
    let sections = aggregates.sections.as_slice();
    let fallback = SectionAggregate::empty(Section::ALL[0]);

    let preferred = if totals.aiml > totals.ds {
        Elective::Aiml
    } else {
        Elective::Ds
    };

    let top_aiml = first_max_by(sections, |s| s.aiml_percent).unwrap_or(&fallback);
    let top_ds = first_max_by(sections, |s| s.ds_percent).unwrap_or(&fallback);
    let largest = first_max_by(sections, |s| s.total as f64).unwrap_or(&fallback);
    let balanced = first_min_by(sections, |s| (s.aiml_percent - 50.0).abs()).unwrap_or(&fallback);
    let top_female = first_max_by(sections, |s| s.female_percent).unwrap_or(&fallback);

    vec![
        Finding::GlobalPreference {
            preferred,
            aiml_percent: percent(totals.aiml, totals.total),
            ds_percent: percent(totals.ds, totals.total),
        },
        Finding::TopAimlSection {
            section: top_aiml.section,
            percent: top_aiml.aiml_percent,
            count: top_aiml.aiml,
            total: top_aiml.total,
        },
        Finding::TopDsSection {
            section: top_ds.section,
            percent: top_ds.ds_percent,
            count: top_ds.ds,
            total: top_ds.total,
        },
        Finding::LargestSection {
            section: largest.section,
            total: largest.total,
            cohort_share: percent(largest.total, totals.total),
        },
        Finding::MostBalancedSection {
            section: balanced.section,
            aiml_percent: balanced.aiml_percent,
            ds_percent: balanced.ds_percent,
        },
        Finding::GenderSplit {
            male: totals.male,
            male_percent: percent(totals.male, totals.total),
            female: totals.female,
            female_percent: percent(totals.female, totals.total),
        },
        Finding::GenderElectivePreference {
            male_aiml_percent: percent(totals.male_aiml, totals.male),
            female_aiml_percent: percent(totals.female_aiml, totals.female),
        },
        Finding::TopFemaleSection {
            section: top_female.section,
            percent: top_female.female_percent,
            count: top_female.female,
        },
    ]
}

/// Generate the rendered insights, in display order.
pub fn generate_insights(aggregates: &Aggregates) -> Vec<Insight> {
    select_findings(aggregates)
        .iter()
        .map(Finding::render)
        .collect()
}
