//! Markdown report generation.
//!
//! This module generates Markdown and JSON dashboard reports from the
//! analytics results.

use crate::analysis::percent;
use crate::models::{
    Aggregates, ChartSlice, GenderElectiveRow, Insight, Report, ReportMetadata, RosterPage,
    SectionAggregate,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();
    let aggregates = &report.dashboard.aggregates;

    // Title
    output.push_str("# Elective Allocation Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_summary_section(aggregates));
    output.push_str(&generate_distribution_section(aggregates));
    output.push_str(&generate_sections_section(&aggregates.sections));
    output.push_str(&generate_insights_section(&report.dashboard.insights));

    if let Some(ref page) = report.roster {
        output.push_str(&generate_roster_section(page));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Roster:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Students Loaded:** {}\n",
        metadata.records_loaded
    ));
    if metadata.unassigned > 0 {
        section.push_str(&format!(
            "- **Without Section:** {}\n",
            metadata.unassigned
        ));
    }
    section.push_str(&format!(
        "- **Duration:** {:.2}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Distribution](#distribution)\n");
    toc.push_str("- [Sections](#sections)\n");
    toc.push_str("- [Insights](#insights)\n");

    if report.roster.is_some() {
        toc.push_str("- [Student Directory](#student-directory)\n");
    }

    toc.push('\n');

    toc
}

/// Generate the summary cards.
fn generate_summary_section(aggregates: &Aggregates) -> String {
    let totals = &aggregates.totals;
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Metric | Value | Share |\n");
    section.push_str("|:---|:---:|:---:|\n");
    section.push_str(&format!("| Total Students | {} | |\n", totals.total));

    for (label, count) in [
        ("AIML Students", totals.aiml),
        ("DS Students", totals.ds),
        ("Male Students", totals.male),
        ("Female Students", totals.female),
    ] {
        section.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            label,
            count,
            percent(count, totals.total)
        ));
    }

    section.push_str(&format!(
        "| Most Populated | {} | {} students |\n\n",
        aggregates.most_populated.section, aggregates.most_populated.total
    ));

    section
}

/// Generate a table for one pie chart.
fn generate_chart_table(title: &str, slices: &[ChartSlice]) -> String {
    let mut table = String::new();
    let total: usize = slices.iter().map(|s| s.value).sum();

    table.push_str(&format!("### {}\n\n", title));
    table.push_str("| Group | Students | Share | Colour |\n");
    table.push_str("|:---|:---:|:---:|:---:|\n");

    for slice in slices {
        table.push_str(&format!(
            "| {} | {} | {:.1}% | `{}` |\n",
            slice.name,
            slice.value,
            percent(slice.value, total),
            slice.color
        ));
    }
    table.push('\n');

    table
}

/// Generate the gender-by-elective table.
fn generate_gender_elective_table(rows: &[GenderElectiveRow]) -> String {
    let mut table = String::new();

    table.push_str("### Gender by Elective\n\n");
    table.push_str("| Gender | AIML | DS |\n");
    table.push_str("|:---|:---:|:---:|\n");

    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            row.gender.display_name(),
            row.aiml,
            row.ds
        ));
    }
    table.push('\n');

    table
}

/// Generate the distribution section.
fn generate_distribution_section(aggregates: &Aggregates) -> String {
    let mut section = String::new();

    section.push_str("## Distribution\n\n");
    section.push_str(&generate_chart_table(
        "Elective Distribution",
        &aggregates.elective_chart,
    ));
    section.push_str(&generate_chart_table(
        "Gender Distribution",
        &aggregates.gender_chart,
    ));
    section.push_str(&generate_gender_elective_table(
        &aggregates.gender_by_elective,
    ));

    section
}

/// Generate the per-section breakdown.
fn generate_sections_section(sections: &[SectionAggregate]) -> String {
    let mut section = String::new();

    section.push_str("## Sections\n\n");
    section.push_str("| Section | Total | AIML | DS | Male | Female |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|\n");

    for s in sections {
        section.push_str(&format!(
            "| {} | {} | {} ({:.1}%) | {} ({:.1}%) | {} ({:.1}%) | {} ({:.1}%) |\n",
            s.section,
            s.total,
            s.aiml,
            s.aiml_percent,
            s.ds,
            s.ds_percent,
            s.male,
            s.male_percent,
            s.female,
            s.female_percent
        ));
    }
    section.push('\n');

    section
}

/// Generate the insights section.
fn generate_insights_section(insights: &[Insight]) -> String {
    let mut section = String::new();

    section.push_str("## Insights\n\n");

    for (i, insight) in insights.iter().enumerate() {
        section.push_str(&format!("{}. {} {}\n", i + 1, insight.icon, insight.text));
    }
    section.push('\n');

    section
}

/// Generate one page of the student directory.
fn generate_roster_section(page: &RosterPage) -> String {
    let mut section = String::new();

    section.push_str("## Student Directory\n\n");
    section.push_str(&format!(
        "*Filters: {} | Showing {} of {} students | Page {} of {}*\n\n",
        page.filters,
        page.matching,
        page.available,
        page.page,
        page.total_pages.max(1)
    ));

    if page.rows.is_empty() {
        section.push_str("No students match the current filters.\n\n");
        return section;
    }

    section.push_str("| S.No | Enrollment No | Name | Section | Elective | Gender |\n");
    section.push_str("|:---:|:---:|:---|:---:|:---:|:---:|\n");

    for (offset, student) in page.rows.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            page.first_serial + offset,
            escape_cell(&student.enrollment),
            escape_cell(&student.name),
            escape_cell(&student.section),
            student.elective,
            student.gender.display_name()
        ));
    }
    section.push('\n');

    if page.page_links.len() > 1 {
        let links: Vec<String> = page
            .page_links
            .iter()
            .map(|&n| {
                if n == page.page {
                    format!("**{}**", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        section.push_str(&format!("Pages: {}\n\n", links.join(" ")));
    }

    section
}

/// Escape pipes so free text cannot split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by ElectiveLens*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
