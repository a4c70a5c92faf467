//! Course catalog and course groups.
//!
//! The catalog lists every offered section, grouped by course, in the
//! order courses first appear. A [`CourseGroup`] is the generator's
//! view of one desired course: its alternative sections and whether it
//! may be skipped.
//!
//! # Text Format
//! ```text
//! CSCI070
//!     01 MW0935-1050
//!     02 MW 1100-1215
//!
//! MATH019
//!     01 TR1315-1430
//! ```
//! An unindented line names a course; each indented line below it is
//! `<section_id> <days><HHMM-HHMM>`. Blank lines are ignored.

use std::path::Path;

use thiserror::Error;

use super::section::split_day_letters;
use super::time::parse_hhmm;
use super::{PriorityMap, Section};

/// Errors raised while reading a text catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An indented section line appeared before any course header.
    #[error("line {line}: section line appears before any course header")]
    SectionWithoutCourse { line: usize },

    /// A section line could not be split into id, days, and times.
    #[error("line {line}: malformed section line: {reason}")]
    MalformedSection { line: usize, reason: String },

    /// A time field was not a valid `HHMM-HHMM` range.
    #[error("line {line}: invalid time field '{value}'")]
    InvalidTime { line: usize, value: String },

    /// The catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// All sections of one course, as listed in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOffering {
    /// Course code.
    pub course: String,
    /// Alternative sections, in catalog order.
    pub sections: Vec<Section>,
}

/// One course as seen by the generator.
///
/// Every alternative must belong to `course`; the generator never
/// offers two alternatives of the same group to one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGroup {
    /// Course code.
    pub course: String,
    /// Alternative sections.
    pub sections: Vec<Section>,
    /// If true, there is no "skip this course" branch.
    pub mandatory: bool,
}

impl CourseGroup {
    /// Creates an optional group.
    pub fn optional(course: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            course: course.into(),
            sections,
            mandatory: false,
        }
    }

    /// Creates a mandatory group.
    pub fn mandatory(course: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            course: course.into(),
            sections,
            mandatory: true,
        }
    }
}

/// Ordered collection of course offerings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    offerings: Vec<CourseOffering>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds sections under a course (builder form).
    pub fn with_course(mut self, course: impl Into<String>, sections: Vec<Section>) -> Self {
        let course = course.into();
        for section in sections {
            self.add_section(&course, section);
        }
        if self.offering(&course).is_none() {
            self.offerings.push(CourseOffering {
                course,
                sections: Vec::new(),
            });
        }
        self
    }

    /// Appends a section under `course`, creating the course if needed.
    pub fn add_section(&mut self, course: &str, section: Section) {
        match self.offerings.iter_mut().find(|o| o.course == course) {
            Some(offering) => offering.sections.push(section),
            None => self.offerings.push(CourseOffering {
                course: course.to_string(),
                sections: vec![section],
            }),
        }
    }

    /// All offerings, in first-appearance order.
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Offering for one course.
    pub fn offering(&self, course: &str) -> Option<&CourseOffering> {
        self.offerings.iter().find(|o| o.course == course)
    }

    /// Course codes, in first-appearance order.
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.offerings.iter().map(|o| o.course.as_str())
    }

    /// Total number of sections.
    pub fn section_count(&self) -> usize {
        self.offerings.iter().map(|o| o.sections.len()).sum()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Builds one generator group per priority entry.
    ///
    /// Catalog courses come first, in catalog order; prioritized courses
    /// the catalog does not offer follow in course-code order with no
    /// sections. Catalog courses without an entry are not wanted and are
    /// left out. A course marked mandatory becomes a group with no skip
    /// branch, so a mandatory course with no sections yields no schedules.
    pub fn groups(&self, priorities: &PriorityMap) -> Vec<CourseGroup> {
        let offered = self
            .offerings
            .iter()
            .filter(|o| priorities.contains(&o.course))
            .map(|o| CourseGroup {
                course: o.course.clone(),
                sections: o.sections.clone(),
                mandatory: priorities.is_mandatory(&o.course),
            });
        let unknown = priorities
            .iter()
            .filter(|(course, _)| self.offering(course).is_none())
            .map(|(course, level)| CourseGroup {
                course: course.to_string(),
                sections: Vec::new(),
                mandatory: level.is_mandatory(),
            });
        offered.chain(unknown).collect()
    }

    /// Parses the text catalog format.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }

            if !raw.starts_with(char::is_whitespace) {
                let course = raw.trim().to_string();
                if catalog.offering(&course).is_none() {
                    catalog.offerings.push(CourseOffering {
                        course: course.clone(),
                        sections: Vec::new(),
                    });
                }
                current = Some(course);
                continue;
            }

            let course = current
                .as_deref()
                .ok_or(CatalogError::SectionWithoutCourse { line })?;
            let section = parse_section_line(course, raw, line)?;
            catalog.add_section(course, section);
        }

        Ok(catalog)
    }

    /// Reads and parses a text catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Parses `<section_id> <days><HHMM-HHMM>`; whitespace between the days
/// and the time range is optional.
fn parse_section_line(course: &str, raw: &str, line: usize) -> Result<Section, CatalogError> {
    let mut tokens = raw.split_whitespace();
    let section_id = tokens
        .next()
        .ok_or_else(|| CatalogError::MalformedSection {
            line,
            reason: "missing section id".into(),
        })?;
    let rest: String = tokens.collect();
    if rest.is_empty() {
        return Err(CatalogError::MalformedSection {
            line,
            reason: "missing days and time".into(),
        });
    }

    let split = rest
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| CatalogError::InvalidTime {
            line,
            value: rest.clone(),
        })?;
    let (days, times) = rest.split_at(split);
    if days.is_empty() || !days.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CatalogError::MalformedSection {
            line,
            reason: format!("invalid days '{days}'"),
        });
    }

    let invalid_time = || CatalogError::InvalidTime {
        line,
        value: times.to_string(),
    };
    let (start, end) = times.split_once('-').ok_or_else(invalid_time)?;
    let start = parse_hhmm(start).ok_or_else(invalid_time)?;
    let end = parse_hhmm(end).ok_or_else(invalid_time)?;

    Ok(Section::new(
        course,
        section_id,
        split_day_letters(days),
        start,
        end,
    ))
}
