//! Student directory filtering and pagination.
//!
//! These helpers work on the normalized records produced by the
//! analytics pipeline. They never feed back into the aggregates.

use crate::analysis::Normalizer;
use crate::models::{Elective, Gender, RosterPage, StudentRecord};

/// Default number of rows per directory page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of page links shown at once.
const PAGE_WINDOW: usize = 5;

/// Active directory filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Case-insensitive substring matched against name or enrollment.
    pub search: Option<String>,
    pub section: Option<String>,
    pub elective: Option<Elective>,
    pub gender: Option<Gender>,
}

impl RosterFilter {
    /// Whether a record passes every active filter.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        let matches_search = match self.search.as_deref() {
            Some(term) => {
                let term = term.to_lowercase();
                record.name.to_lowercase().contains(&term)
                    || record.enrollment.to_lowercase().contains(&term)
            }
            None => true,
        };

        matches_search
            && self
                .section
                .as_deref()
                .map_or(true, |section| record.section == section)
            && self.elective.map_or(true, |e| record.elective == e)
            && self.gender.map_or(true, |g| record.gender == g)
    }

    /// Records passing the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [StudentRecord]) -> Vec<&'a StudentRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Rewrite the section filter to the label normalized records carry.
    pub fn with_canonical_section(mut self, normalizer: &Normalizer) -> Self {
        if let Some(section) = self.section.take() {
            self.section = Some(normalizer.canonical_label(&section).to_string());
        }
        self
    }

    /// "Section: X | Elective: Y | Gender: Z", or "All Students".
    ///
    /// The search term is not part of the description.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(ref section) = self.section {
            parts.push(format!("Section: {}", section));
        }
        if let Some(elective) = self.elective {
            parts.push(format!("Elective: {}", elective));
        }
        if let Some(gender) = self.gender {
            parts.push(format!("Gender: {}", gender));
        }

        if parts.is_empty() {
            "All Students".to_string()
        } else {
            parts.join(" | ")
        }
    }

    /// Export file name without extension, e.g. `Student_Directory_CSE_A_AIML`.
    pub fn export_file_stem(&self) -> String {
        let mut name = String::from("Student_Directory");

        if let Some(ref section) = self.section {
            name.push('_');
            name.push_str(&section.replace(' ', "_"));
        }
        if let Some(elective) = self.elective {
            name.push_str(&format!("_{}", elective));
        }
        if let Some(gender) = self.gender {
            name.push_str(&format!("_{}", gender));
        }

        name
    }
}

/// Position of one page within a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed page after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Index of the first item on the page.
    pub start: usize,
    /// One past the last item on the page.
    pub end: usize,
}

impl Pagination {
    /// Compute the slice bounds for `page` (1-indexed). Out-of-range pages
    /// are clamped; a zero page size is treated as one.
    pub fn new(item_count: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = item_count.div_ceil(page_size);
        let page = page.clamp(1, total_pages.max(1));
        let start = ((page - 1) * page_size).min(item_count);
        let end = (start + page_size).min(item_count);

        Self {
            page,
            total_pages,
            start,
            end,
        }
    }

    /// Page numbers to offer as links: at most five, centred on the
    /// current page where possible.
    pub fn window(&self) -> Vec<usize> {
        let total = self.total_pages;
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }

        let first = if self.page <= 3 {
            1
        } else if self.page >= total - 2 {
            total - (PAGE_WINDOW - 1)
        } else {
            self.page - 2
        };

        (first..first + PAGE_WINDOW).collect()
    }
}

/// Filter the records and cut out one page.
pub fn roster_page(
    records: &[StudentRecord],
    filter: &RosterFilter,
    page: usize,
    page_size: usize,
) -> RosterPage {
    let matching = filter.apply(records);
    let pagination = Pagination::new(matching.len(), page, page_size);

    RosterPage {
        filters: filter.describe(),
        page: pagination.page,
        total_pages: pagination.total_pages,
        page_links: pagination.window(),
        matching: matching.len(),
        available: records.len(),
        first_serial: pagination.start + 1,
        rows: matching[pagination.start..pagination.end]
            .iter()
            .map(|r| (*r).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u32, name: &str, section: &str, elective: Elective, gender: Gender) -> StudentRecord {
        StudentRecord {
            id,
            enrollment: format!("0141800{:04}", id),
            name: name.to_string(),
            section: section.to_string(),
            elective,
            gender,
        }
    }

    fn sample() -> Vec<StudentRecord> {
        vec![
            student(1, "Aarav Sharma", "CSE A", Elective::Aiml, Gender::Male),
            student(2, "Ananya Gupta", "CSE A", Elective::Ds, Gender::Female),
            student(3, "Kabir Singh", "CSE B", Elective::Aiml, Gender::Male),
            student(4, "Meera Nair", "CST D", Elective::Ds, Gender::Female),
        ]
    }

    #[test]
    fn test_search_matches_name_or_enrollment() {
        let records = sample();
        let filter = RosterFilter {
            search: Some("SHARMA".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&records).len(), 1);

        let filter = RosterFilter {
            search: Some("0003".to_string()),
            ..Default::default()
        };
        let found = filter.apply(&records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Kabir Singh");
    }

    #[test]
    fn test_filters_combine() {
        let records = sample();
        let filter = RosterFilter {
            search: None,
            section: Some("CSE A".to_string()),
            elective: Some(Elective::Ds),
            gender: Some(Gender::Female),
        };

        let found = filter.apply(&records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let records = sample();
        let filter = RosterFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&records).len(), 4);
    }

    #[test]
    fn test_section_alias_matches_normalized_records() {
        let records = sample();
        let filter = RosterFilter {
            section: Some("CSTD".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&records).is_empty());

        let filter = filter.with_canonical_section(&Normalizer::default());

        assert_eq!(filter.section.as_deref(), Some("CST D"));
        let found = filter.apply(&records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Meera Nair");
        assert_eq!(filter.export_file_stem(), "Student_Directory_CST_D");
    }

    #[test]
    fn test_describe_and_file_stem() {
        let none = RosterFilter::default();
        assert_eq!(none.describe(), "All Students");
        assert_eq!(none.export_file_stem(), "Student_Directory");

        let filter = RosterFilter {
            search: Some("ana".to_string()),
            section: Some("CST D".to_string()),
            elective: Some(Elective::Aiml),
            gender: Some(Gender::Male),
        };
        assert_eq!(
            filter.describe(),
            "Section: CST D | Elective: AIML | Gender: MALE"
        );
        assert_eq!(
            filter.export_file_stem(),
            "Student_Directory_CST_D_AIML_MALE"
        );
    }

    #[test]
    fn test_pagination_bounds() {
        let p = Pagination::new(23, 3, 10);
        assert_eq!((p.page, p.total_pages, p.start, p.end), (3, 3, 20, 23));

        let p = Pagination::new(23, 9, 10);
        assert_eq!(p.page, 3);

        let p = Pagination::new(0, 0, 10);
        assert_eq!((p.page, p.total_pages, p.start, p.end), (1, 0, 0, 0));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(Pagination::new(30, 2, 10).window(), vec![1, 2, 3]);
        assert_eq!(Pagination::new(100, 1, 10).window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Pagination::new(100, 6, 10).window(), vec![4, 5, 6, 7, 8]);
        assert_eq!(Pagination::new(100, 9, 10).window(), vec![6, 7, 8, 9, 10]);
        assert!(Pagination::new(0, 1, 10).window().is_empty());
    }

    #[test]
    fn test_roster_page() {
        let records = sample();
        let filter = RosterFilter {
            gender: Some(Gender::Female),
            ..Default::default()
        };

        let page = roster_page(&records, &filter, 2, 1);

        assert_eq!(page.matching, 2);
        assert_eq!(page.available, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.first_serial, 2);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].name, "Meera Nair");
        assert_eq!(page.filters, "Gender: FEMALE");
    }
}
