//! Built-in schedule predicates.
//!
//! # Categories
//!
//! - **Time**: [`TimeWindow`]
//! - **Score**: [`MinScore`]
//! - **Membership**: [`CoursesInclude`], [`SectionsInclude`]
//! - **Combinators**: [`Not`], [`AllOf`]
//!
//! Exclusion filters are [`Not`] applied to the matching inclusion
//! predicate with the same list.

use std::sync::Arc;

use chrono::NaiveTime;

use super::SchedulePredicate;
use crate::models::{Schedule, SectionKey};

// ======================== Time ========================

/// Rejects schedules starting before `start` or ending after `end`.
///
/// A missing bound is unconstrained. Schedules without bounds (empty)
/// always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Earliest allowed start.
    pub start: Option<NaiveTime>,
    /// Latest allowed end.
    pub end: Option<NaiveTime>,
}

impl SchedulePredicate for TimeWindow {
    fn name(&self) -> &'static str {
        "time"
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        if let (Some(limit), Some(start)) = (self.start, schedule.start_time()) {
            if start < limit {
                return false;
            }
        }
        if let (Some(limit), Some(end)) = (self.end, schedule.end_time()) {
            if end > limit {
                return false;
            }
        }
        true
    }
}

// ======================== Score ========================

/// Keeps schedules scoring at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinScore {
    /// Minimum score (inclusive).
    pub threshold: f64,
}

impl SchedulePredicate for MinScore {
    fn name(&self) -> &'static str {
        "score"
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        schedule.score() >= self.threshold
    }
}

// ======================== Membership ========================

/// Keeps schedules containing a section of at least one listed course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursesInclude {
    /// Course codes.
    pub courses: Vec<String>,
}

impl SchedulePredicate for CoursesInclude {
    fn name(&self) -> &'static str {
        "courses_include"
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        schedule
            .sections()
            .iter()
            .any(|s| self.courses.iter().any(|c| c == s.course()))
    }
}

/// Keeps schedules containing at least one listed section exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionsInclude {
    /// `(course, section_id)` pairs.
    pub sections: Vec<SectionKey>,
}

impl SchedulePredicate for SectionsInclude {
    fn name(&self) -> &'static str {
        "sections_include"
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        schedule.sections().iter().any(|s| {
            self.sections
                .iter()
                .any(|k| s.matches(&k.course, &k.section_id))
        })
    }
}

// ======================== Combinators ========================

/// Logical negation.
#[derive(Debug, Clone)]
pub struct Not<P> {
    inner: P,
    name: &'static str,
}

impl<P: SchedulePredicate> Not<P> {
    /// Negates `inner`, reporting itself under `name`.
    pub fn new(inner: P, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<P: SchedulePredicate> SchedulePredicate for Not<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        !self.inner.accepts(schedule)
    }
}

/// Logical AND over shared predicates. Vacuously true when empty.
#[derive(Debug, Clone, Default)]
pub struct AllOf {
    predicates: Vec<Arc<dyn SchedulePredicate>>,
}

impl AllOf {
    /// Composes the given predicates.
    pub fn new(predicates: Vec<Arc<dyn SchedulePredicate>>) -> Self {
        Self { predicates }
    }

    /// Number of composed predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether nothing is composed (accepts everything).
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl SchedulePredicate for AllOf {
    fn name(&self) -> &'static str {
        "all_of"
    }

    fn accepts(&self, schedule: &Schedule) -> bool {
        self.predicates.iter().all(|p| p.accepts(schedule))
    }
}
