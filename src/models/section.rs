//! Section (course offering) model.
//!
//! A section is one meeting pattern of a course: the days it meets and
//! a single daily time window. Sections are immutable once built; a
//! schedule only ever holds clones of them.
//!
//! # Day Tokens
//! Days are opaque single-token strings. The catalog format uses one
//! letter per day (`M T W R F S U`); any other token set works as long
//! as it is used consistently.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::time::{format_clock, hour_minute};

/// Canonical weekday order used when rendering day-by-day summaries.
///
/// Tokens outside this list sort after it, alphabetically.
pub const DAY_ORDER: [&str; 7] = ["M", "T", "W", "R", "F", "S", "U"];

/// A single offering of a course.
///
/// # JSON
/// ```json
/// {"course": "CSCI070", "section": "01", "days": ["M", "W"],
///  "start time": [9, 35], "end time": [10, 50]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    course: String,
    #[serde(rename = "section")]
    section_id: String,
    days: Vec<String>,
    #[serde(rename = "start time", with = "hour_minute")]
    start_time: NaiveTime,
    #[serde(rename = "end time", with = "hour_minute")]
    end_time: NaiveTime,
}

/// Identity of a section: `(course, section_id)`.
///
/// Two sections with the same key are the same offering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    /// Course code.
    pub course: String,
    /// Section identifier within the course.
    pub section_id: String,
}

impl SectionKey {
    /// Creates a new key.
    pub fn new(course: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            section_id: section_id.into(),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.course, self.section_id)
    }
}

impl Section {
    /// Creates a section.
    ///
    /// Well-formedness (non-empty days, `start < end`) is checked by
    /// [`crate::validation`], not here.
    pub fn new<D, S>(
        course: impl Into<String>,
        section_id: impl Into<String>,
        days: D,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            course: course.into(),
            section_id: section_id.into(),
            days: days.into_iter().map(Into::into).collect(),
            start_time,
            end_time,
        }
    }

    /// Course code.
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Section identifier within the course.
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Meeting day tokens.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Daily start time.
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// Daily end time.
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Identity key.
    pub fn key(&self) -> SectionKey {
        SectionKey::new(&self.course, &self.section_id)
    }

    /// Whether this section is the offering `(course, section_id)`.
    #[inline]
    pub fn matches(&self, course: &str, section_id: &str) -> bool {
        self.course == course && self.section_id == section_id
    }

    /// Whether the section meets on the given day.
    #[inline]
    pub fn meets_on(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }

    /// Whether the two sections meet on at least one common day.
    pub fn shares_day_with(&self, other: &Section) -> bool {
        self.days.iter().any(|d| other.meets_on(d))
    }

    /// Meeting length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {} {}-{}",
            self.course,
            self.section_id,
            self.days.concat(),
            format_clock(self.start_time),
            format_clock(self.end_time)
        )
    }
}

/// Splits a run of single-letter day tokens (`"MWF"`) into tokens.
pub fn split_day_letters(days: &str) -> Vec<String> {
    days.chars().map(String::from).collect()
}

/// Sort position of a day token (see [`DAY_ORDER`]).
pub(crate) fn day_rank(day: &str) -> usize {
    DAY_ORDER
        .iter()
        .position(|d| *d == day)
        .unwrap_or(DAY_ORDER.len())
}
