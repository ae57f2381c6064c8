//! Data models for the elective analytics.
//!
//! This module contains the core data structures used throughout
//! the application for representing students, aggregates, insights
//! and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Specialization track a student is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Elective {
    /// AI / Machine Learning
    Aiml,
    /// Data Science
    Ds,
}

impl fmt::Display for Elective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elective::Aiml => write!(f, "AIML"),
            Elective::Ds => write!(f, "DS"),
        }
    }
}

impl Elective {
    /// Chart colour used for this elective.
    pub fn color(&self) -> &'static str {
        match self {
            Elective::Aiml => "#818cf8",
            Elective::Ds => "#f472b6",
        }
    }
}

/// Gender as recorded in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

impl Gender {
    /// Human-friendly label ("Male" / "Female").
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Chart colour used for this gender.
    pub fn color(&self) -> &'static str {
        match self {
            Gender::Male => "#60a5fa",
            Gender::Female => "#f472b6",
        }
    }
}

/// Canonical class section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "CSE A")]
    CseA,
    #[serde(rename = "CSE B")]
    CseB,
    #[serde(rename = "CSE C")]
    CseC,
    #[serde(rename = "CST D")]
    CstD,
}

impl Section {
    /// All sections in canonical order. Ties in every ranking rule
    /// resolve to the earliest entry of this list.
    pub const ALL: [Section; 4] = [Section::CseA, Section::CseB, Section::CseC, Section::CstD];

    /// The canonical label as it appears in normalized records.
    pub fn label(&self) -> &'static str {
        match self {
            Section::CseA => "CSE A",
            Section::CseB => "CSE B",
            Section::CseC => "CSE C",
            Section::CstD => "CST D",
        }
    }

    /// Look up a section by its canonical label.
    pub fn from_label(label: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single student as supplied by the roster.
///
/// `section` is kept as the raw label so that aliases can be rewritten
/// by the normalizer without losing the original value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable identifier.
    pub id: u32,
    /// Enrollment number, unique per student.
    pub enrollment: String,
    /// Display name.
    pub name: String,
    /// Section label.
    pub section: String,
    /// Elective choice.
    pub elective: Elective,
    /// Gender.
    pub gender: Gender,
}

impl StudentRecord {
    /// Returns the canonical section, if the label is canonical.
    pub fn canonical_section(&self) -> Option<Section> {
        Section::from_label(&self.section)
    }
}

/// Cohort-wide counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: usize,
    pub aiml: usize,
    pub ds: usize,
    pub male: usize,
    pub female: usize,
    pub male_aiml: usize,
    pub male_ds: usize,
    pub female_aiml: usize,
    pub female_ds: usize,
}

/// Elective and gender breakdown of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAggregate {
    pub section: Section,
    pub aiml: usize,
    pub ds: usize,
    pub male: usize,
    pub female: usize,
    pub total: usize,
    pub aiml_percent: f64,
    pub ds_percent: f64,
    pub male_percent: f64,
    pub female_percent: f64,
}

impl SectionAggregate {
    /// An aggregate for a section with no students.
    pub fn empty(section: Section) -> Self {
        Self {
            section,
            aiml: 0,
            ds: 0,
            male: 0,
            female: 0,
            total: 0,
            aiml_percent: 0.0,
            ds_percent: 0.0,
            male_percent: 0.0,
            female_percent: 0.0,
        }
    }
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

/// One row of the gender-by-elective table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderElectiveRow {
    pub gender: Gender,
    pub aiml: usize,
    pub ds: usize,
}

/// Everything the aggregator derives from a normalized roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub totals: Totals,
    pub sections: Vec<SectionAggregate>,
    pub most_populated: SectionAggregate,
    pub elective_chart: Vec<ChartSlice>,
    pub gender_chart: Vec<ChartSlice>,
    pub gender_by_elective: Vec<GenderElectiveRow>,
}

/// Category of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    GlobalPreference,
    TopAimlSection,
    TopDsSection,
    LargestSection,
    MostBalancedSection,
    GenderSplit,
    GenderElectivePreference,
    TopFemaleSection,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InsightKind::GlobalPreference => "Global preference",
            InsightKind::TopAimlSection => "Top AIML section",
            InsightKind::TopDsSection => "Top DS section",
            InsightKind::LargestSection => "Largest section",
            InsightKind::MostBalancedSection => "Most balanced section",
            InsightKind::GenderSplit => "Gender split",
            InsightKind::GenderElectivePreference => "Gender elective preference",
            InsightKind::TopFemaleSection => "Top female section",
        };
        write!(f, "{}", name)
    }
}

/// A rendered, human-readable observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: &'static str,
    pub text: String,
}

/// Full analytics output for one roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Normalized records, in input order.
    pub records: Vec<StudentRecord>,
    #[serde(flatten)]
    pub aggregates: Aggregates,
    /// Insights in their fixed order.
    pub insights: Vec<Insight>,
}

/// One page of the (filtered) student directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterPage {
    /// Human-readable description of the active filters.
    pub filters: String,
    /// 1-indexed page number after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Page numbers to offer around the current page.
    pub page_links: Vec<usize>,
    /// Number of records matching the filters.
    pub matching: usize,
    /// Number of records before filtering.
    pub available: usize,
    /// Serial number of the first row on this page (1-indexed).
    pub first_serial: usize,
    pub rows: Vec<StudentRecord>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path of the roster the report was built from.
    pub source: String,
    /// Date and time of generation.
    pub generated_at: DateTime<Utc>,
    /// Number of records loaded.
    pub records_loaded: usize,
    /// Records whose section is not canonical after normalization.
    pub unassigned: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete analytics report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub dashboard: Dashboard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<RosterPage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_labels_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_label(section.label()), Some(section));
        }
        assert_eq!(Section::from_label("CSTD"), None);
        assert_eq!(Section::from_label("cse a"), None);
    }

    #[test]
    fn test_record_deserializes_uppercase_enums() {
        let json = r#"{"id":1,"enrollment":"01","name":"Asha","section":"CSTD","elective":"AIML","gender":"FEMALE"}"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.elective, Elective::Aiml);
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.canonical_section(), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Elective::Ds.to_string(), "DS");
        assert_eq!(Gender::Male.to_string(), "MALE");
        assert_eq!(Gender::Male.display_name(), "Male");
        assert_eq!(Section::CstD.to_string(), "CST D");
    }

    #[test]
    fn test_insight_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&InsightKind::GenderElectivePreference).unwrap();
        assert_eq!(json, "\"gender-elective-preference\"");
        let json = serde_json::to_string(&Section::CseB).unwrap();
        assert_eq!(json, "\"CSE B\"");
    }
}
