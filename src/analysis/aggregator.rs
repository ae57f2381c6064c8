//! Roster aggregation and statistics.
//!
//! This module computes cohort totals, per-section breakdowns and the
//! chart-ready projections from a normalized roster.

use crate::models::{
    Aggregates, ChartSlice, Elective, Gender, GenderElectiveRow, Section, SectionAggregate,
    StudentRecord, Totals,
};

/// Share of `count` in `total` as a percentage rounded to one decimal,
/// half up on the exact ratio.
///
/// Returns 0 when `total` is 0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let tenths = (count * 2000 + total) / (total * 2);
    tenths as f64 / 10.0
}

/// The first item with the strictly greatest key.
pub fn first_max_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    let mut iter = items.iter();
    let mut best = iter.next()?;
    let mut best_key = key(best);

    for item in iter {
        let k = key(item);
        if k > best_key {
            best = item;
            best_key = k;
        }
    }

    Some(best)
}

/// The first item with the strictly smallest key.
pub fn first_min_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    first_max_by(items, |item| -key(item))
}

/// Count electives, genders and their combinations.
pub fn compute_totals(records: &[StudentRecord]) -> Totals {
    let mut totals = Totals {
        total: records.len(),
        ..Totals::default()
    };

    for record in records {
        match record.elective {
            Elective::Aiml => totals.aiml += 1,
            Elective::Ds => totals.ds += 1,
        }

        match (record.gender, record.elective) {
            (Gender::Male, Elective::Aiml) => totals.male_aiml += 1,
            (Gender::Male, Elective::Ds) => totals.male_ds += 1,
            (Gender::Female, Elective::Aiml) => totals.female_aiml += 1,
            (Gender::Female, Elective::Ds) => totals.female_ds += 1,
        }

        match record.gender {
            Gender::Male => totals.male += 1,
            Gender::Female => totals.female += 1,
        }
    }

    totals
}

/// Breakdown of a single section.
pub fn section_aggregate(section: Section, records: &[StudentRecord]) -> SectionAggregate {
    let mut aggregate = SectionAggregate::empty(section);

    for record in records
        .iter()
        .filter(|r| r.canonical_section() == Some(section))
    {
        aggregate.total += 1;
        match record.elective {
            Elective::Aiml => aggregate.aiml += 1,
            Elective::Ds => aggregate.ds += 1,
        }
        match record.gender {
            Gender::Male => aggregate.male += 1,
            Gender::Female => aggregate.female += 1,
        }
    }

    aggregate.aiml_percent = percent(aggregate.aiml, aggregate.total);
    aggregate.ds_percent = percent(aggregate.ds, aggregate.total);
    aggregate.male_percent = percent(aggregate.male, aggregate.total);
    aggregate.female_percent = percent(aggregate.female, aggregate.total);

    aggregate
}

/// Breakdown of every canonical section, in canonical order.
pub fn section_breakdown(records: &[StudentRecord]) -> Vec<SectionAggregate> {
    Section::ALL
        .into_iter()
        .map(|section| section_aggregate(section, records))
        .collect()
}

/// The section with the most students; the earliest section wins ties.
pub fn most_populated(sections: &[SectionAggregate]) -> SectionAggregate {
    first_max_by(sections, |s| s.total as f64)
        .cloned()
        .unwrap_or_else(|| SectionAggregate::empty(Section::ALL[0]))
}

/// Elective distribution for the pie chart.
pub fn elective_chart(totals: &Totals) -> Vec<ChartSlice> {
    vec![
        ChartSlice {
            name: "AIML",
            value: totals.aiml,
            color: Elective::Aiml.color(),
        },
        ChartSlice {
            name: "DS",
            value: totals.ds,
            color: Elective::Ds.color(),
        },
    ]
}

/// Gender distribution for the pie chart.
pub fn gender_chart(totals: &Totals) -> Vec<ChartSlice> {
    vec![
        ChartSlice {
            name: Gender::Male.display_name(),
            value: totals.male,
            color: Gender::Male.color(),
        },
        ChartSlice {
            name: Gender::Female.display_name(),
            value: totals.female,
            color: Gender::Female.color(),
        },
    ]
}

/// Gender-by-elective table, male row first.
pub fn gender_by_elective(totals: &Totals) -> Vec<GenderElectiveRow> {
    vec![
        GenderElectiveRow {
            gender: Gender::Male,
            aiml: totals.male_aiml,
            ds: totals.male_ds,
        },
        GenderElectiveRow {
            gender: Gender::Female,
            aiml: totals.female_aiml,
            ds: totals.female_ds,
        },
    ]
}

/// Compute all aggregates for a normalized roster.
pub fn aggregate(records: &[StudentRecord]) -> Aggregates {
    let totals = compute_totals(records);
    let sections = section_breakdown(records);
    let most_populated = most_populated(&sections);

    Aggregates {
        elective_chart: elective_chart(&totals),
        gender_chart: gender_chart(&totals),
        gender_by_elective: gender_by_elective(&totals),
        totals,
        sections,
        most_populated,
    }
}

/// Generate a text summary of the cohort totals.
pub fn generate_summary_text(aggregates: &Aggregates) -> String {
    let totals = &aggregates.totals;
    let mut lines = Vec::new();

    lines.push(format!("Total Students: {}", totals.total));
    lines.push(format!(
        "- AIML: {} ({:.1}%)",
        totals.aiml,
        percent(totals.aiml, totals.total)
    ));
    lines.push(format!(
        "- DS: {} ({:.1}%)",
        totals.ds,
        percent(totals.ds, totals.total)
    ));
    lines.push(format!(
        "- Male: {} ({:.1}%) | Female: {} ({:.1}%)",
        totals.male,
        percent(totals.male, totals.total),
        totals.female,
        percent(totals.female, totals.total)
    ));
    lines.push(format!(
        "- Most populated: {} ({} students)",
        aggregates.most_populated.section, aggregates.most_populated.total
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u32, section: &str, elective: Elective, gender: Gender) -> StudentRecord {
        StudentRecord {
            id,
            enrollment: format!("E{:03}", id),
            name: format!("Student {}", id),
            section: section.to_string(),
            elective,
            gender,
        }
    }

    fn scenario() -> Vec<StudentRecord> {
        vec![
            student(1, "CSE A", Elective::Aiml, Gender::Male),
            student(2, "CSE A", Elective::Ds, Gender::Female),
            student(3, "CST D", Elective::Aiml, Gender::Female),
            student(4, "CSE B", Elective::Ds, Gender::Male),
        ]
    }

    #[test]
    fn test_percent_zero_guard() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(4, 7), 57.1);
        assert_eq!(percent(5, 5), 100.0);
    }

    #[test]
    fn test_percent_rounds_exact_halves_up() {
        // 28.75 and 51.25 exactly
        assert_eq!(percent(23, 80), 28.8);
        assert_eq!(percent(41, 80), 51.3);
        assert_eq!(percent(1, 8), 12.5);
        assert_eq!(percent(1, 16), 6.3);
        assert_eq!(percent(5, 12), 41.7);
    }

    #[test]
    fn test_totals_for_scenario() {
        let totals = compute_totals(&scenario());

        assert_eq!(totals.total, 4);
        assert_eq!(totals.aiml, 2);
        assert_eq!(totals.ds, 2);
        assert_eq!(totals.male, 2);
        assert_eq!(totals.female, 2);
        assert_eq!(totals.male_aiml, 1);
        assert_eq!(totals.female_ds, 1);
    }

    #[test]
    fn test_totals_are_conserved() {
        let records = scenario();
        let aggregates = aggregate(&records);
        let totals = aggregates.totals;

        assert_eq!(totals.aiml + totals.ds, totals.total);
        assert_eq!(totals.male + totals.female, totals.total);
        assert_eq!(
            totals.male_aiml + totals.male_ds + totals.female_aiml + totals.female_ds,
            totals.total
        );
        let section_sum: usize = aggregates.sections.iter().map(|s| s.total).sum();
        assert_eq!(section_sum, totals.total);
    }

    #[test]
    fn test_section_breakdown_includes_empty_sections() {
        let sections = section_breakdown(&scenario());

        assert_eq!(sections.len(), 4);
        let cse_a = &sections[0];
        assert_eq!(cse_a.section, Section::CseA);
        assert_eq!(cse_a.total, 2);
        assert_eq!(cse_a.aiml_percent, 50.0);
        assert_eq!(cse_a.ds_percent, 50.0);

        let cse_c = &sections[2];
        assert_eq!(cse_c.total, 0);
        assert_eq!(cse_c.aiml_percent, 0.0);
        assert_eq!(cse_c.female_percent, 0.0);

        let cst_d = &sections[3];
        assert_eq!(cst_d.total, 1);
        assert_eq!(cst_d.aiml_percent, 100.0);
    }

    #[test]
    fn test_percentages_are_bounded() {
        let aggregates = aggregate(&scenario());
        for section in &aggregates.sections {
            for value in [
                section.aiml_percent,
                section.ds_percent,
                section.male_percent,
                section.female_percent,
            ] {
                assert!((0.0..=100.0).contains(&value));
                assert!(!value.is_nan());
            }
        }
    }

    #[test]
    fn test_most_populated_first_wins_ties() {
        let records = vec![
            student(1, "CSE B", Elective::Aiml, Gender::Male),
            student(2, "CST D", Elective::Ds, Gender::Male),
        ];
        let sections = section_breakdown(&records);
        assert_eq!(most_populated(&sections).section, Section::CseB);

        assert_eq!(most_populated(&section_breakdown(&scenario())).section, Section::CseA);
    }

    #[test]
    fn test_most_populated_empty_roster() {
        let sections = section_breakdown(&[]);
        let most = most_populated(&sections);
        assert_eq!(most.section, Section::CseA);
        assert_eq!(most.total, 0);
    }

    #[test]
    fn test_first_min_by_keeps_first() {
        let values = [3.0, 1.0, 1.0, 2.0];
        let indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
        let min = first_min_by(&indexed, |(_, v)| *v).unwrap();
        assert_eq!(min.0, 1);
        assert!(first_max_by::<f64, _>(&[], |v| *v).is_none());
    }

    #[test]
    fn test_chart_projections() {
        let totals = compute_totals(&scenario());

        let electives = elective_chart(&totals);
        assert_eq!(electives[0].name, "AIML");
        assert_eq!(electives[0].color, "#818cf8");
        assert_eq!(electives[1].value, 2);

        let genders = gender_chart(&totals);
        assert_eq!(genders[0].name, "Male");
        assert_eq!(genders[1].color, "#f472b6");

        let table = gender_by_elective(&totals);
        assert_eq!(table[0].gender, Gender::Male);
        assert_eq!((table[0].aiml, table[0].ds), (1, 1));
        assert_eq!((table[1].aiml, table[1].ds), (1, 1));
    }

    #[test]
    fn test_generate_summary_text() {
        let text = generate_summary_text(&aggregate(&scenario()));
        assert!(text.contains("Total Students: 4"));
        assert!(text.contains("AIML: 2 (50.0%)"));
        assert!(text.contains("Most populated: CSE A (2 students)"));
    }
}
