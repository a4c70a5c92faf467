//! Input validation for timetable requests.
//!
//! Checks structural integrity of the catalog, the course groups, and
//! the priority map before generation. Detects:
//! - Malformed sections (no meeting days, non-positive time range)
//! - Duplicate section IDs within a course
//! - Sections filed under the wrong course
//! - Duplicate course groups
//! - Courses without a priority entry, and priorities for unknown courses
//! - Prioritized courses with no sections
//!
//! The generator itself never fails; it trusts its input. Running these
//! checks first turns caller contract violations into reportable errors.

use std::collections::HashSet;

use crate::models::{Catalog, CourseGroup, PriorityMap, Section};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two groups cover the same course.
    DuplicateCourse,
    /// Two sections of one course share a section ID.
    DuplicateSection,
    /// A section meets on no days.
    EmptyDays,
    /// A section does not start before it ends.
    InvalidTimeRange,
    /// A section is listed under a different course than its own.
    CourseMismatch,
    /// A course being scheduled has no priority entry.
    MissingPriority,
    /// A priority entry names a course the catalog does not offer.
    UnknownCourse,
    /// A prioritized course has no sections.
    EmptyCourse,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a catalog on its own.
///
/// Checks:
/// 1. Every section meets on at least one day
/// 2. Every section starts before it ends
/// 3. Every section belongs to the course it is listed under
/// 4. No duplicate section IDs within a course
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();
    for offering in catalog.offerings() {
        check_sections(&offering.course, &offering.sections, &mut errors);
    }
    into_result(errors)
}

/// Validates generator input.
///
/// Checks the same section rules as [`validate_catalog`] per group, plus:
/// 1. No two groups cover the same course
/// 2. Every group's course has a priority entry
pub fn validate_groups(groups: &[CourseGroup], priorities: &PriorityMap) -> ValidationResult {
    let mut errors = Vec::new();
    let mut courses = HashSet::new();

    for group in groups {
        if !courses.insert(group.course.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Course '{}' appears in more than one group", group.course),
            ));
        }
        if !priorities.contains(&group.course) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Course '{}' has no priority entry", group.course),
            ));
        }
        check_sections(&group.course, &group.sections, &mut errors);
    }

    into_result(errors)
}

/// Validates a full request: the catalog plus the priorities chosen
/// against it.
///
/// Checks:
/// 1. All [`validate_catalog`] rules
/// 2. Every prioritized course is offered by the catalog
/// 3. Every prioritized course has at least one section
pub fn validate_request(catalog: &Catalog, priorities: &PriorityMap) -> ValidationResult {
    let mut errors = validate_catalog(catalog).err().unwrap_or_default();

    for (course, _) in priorities.iter() {
        match catalog.offering(course) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Priority given for unknown course '{course}'"),
            )),
            Some(offering) if offering.sections.is_empty() => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyCourse,
                    format!("Course '{course}' has no sections"),
                ))
            }
            Some(_) => {}
        }
    }

    into_result(errors)
}

fn check_sections(course: &str, sections: &[Section], errors: &mut Vec<ValidationError>) {
    let mut ids = HashSet::new();
    for section in sections {
        if section.course() != course {
            errors.push(ValidationError::new(
                ValidationErrorKind::CourseMismatch,
                format!("Section '{}' is listed under course '{course}'", section.key()),
            ));
        }
        if !ids.insert(section.section_id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSection,
                format!("Duplicate section ID: {}", section.key()),
            ));
        }
        if section.days().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDays,
                format!("Section '{}' meets on no days", section.key()),
            ));
        }
        if section.start_time() >= section.end_time() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!("Section '{}' does not start before it ends", section.key()),
            ));
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
