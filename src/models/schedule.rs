//! Schedule (candidate timetable) model.
//!
//! A schedule is a set of sections, at most one per course, together
//! with its overall time bounds and priority score.
//!
//! # Copy-on-Extend
//! Schedules are never mutated after construction. [`Schedule::add`]
//! returns a new value, so sibling branches of the generator's
//! backtracking search can share a parent schedule without any undo
//! step.
//!
//! # JSON
//! ```json
//! {"sections": [...], "score": 0.5,
//!  "start time": [9, 0], "end time": [11, 0]}
//! ```
//! An empty schedule has `null` bounds.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::section::day_rank;
use super::time::{format_clock, opt_hour_minute};
use super::{PriorityMap, Section, SectionKey};

/// A candidate timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    sections: Vec<Section>,
    score: f64,
    #[serde(rename = "start time", with = "opt_hour_minute")]
    start_time: Option<NaiveTime>,
    #[serde(rename = "end time", with = "opt_hour_minute")]
    end_time: Option<NaiveTime>,
}

impl Schedule {
    /// Creates an empty schedule (score 0, no bounds).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule from sections, computing bounds and score.
    ///
    /// Sections already present by identity are skipped.
    pub fn from_sections<'a, I>(sections: I, priorities: &PriorityMap) -> Self
    where
        I: IntoIterator<Item = &'a Section>,
    {
        let mut unique: Vec<Section> = Vec::new();
        for section in sections {
            if !unique.iter().any(|s| s.key() == section.key()) {
                unique.push(section.clone());
            }
        }
        Self::assemble(unique, priorities)
    }

    fn assemble(sections: Vec<Section>, priorities: &PriorityMap) -> Self {
        let start_time = sections.iter().map(Section::start_time).min();
        let end_time = sections.iter().map(Section::end_time).max();
        let score = priorities.score(&sections);
        Self {
            sections,
            score,
            start_time,
            end_time,
        }
    }

    /// Returns a new schedule extended with `section`.
    ///
    /// If a section with the same identity is already present the result
    /// is an unchanged copy. Bounds are widened and the score is
    /// recomputed over the whole schedule.
    pub fn add(&self, section: &Section, priorities: &PriorityMap) -> Self {
        if self.contains(section) {
            return self.clone();
        }
        let mut sections = Vec::with_capacity(self.sections.len() + 1);
        sections.extend(self.sections.iter().cloned());
        sections.push(section.clone());

        Self {
            start_time: Some(
                self.start_time
                    .map_or(section.start_time(), |t| t.min(section.start_time())),
            ),
            end_time: Some(
                self.end_time
                    .map_or(section.end_time(), |t| t.max(section.end_time())),
            ),
            score: priorities.score(&sections),
            sections,
        }
    }

    /// Returns a new schedule without any section of `course`.
    pub fn without_course(&self, course: &str, priorities: &PriorityMap) -> Self {
        let remaining = self
            .sections
            .iter()
            .filter(|s| s.course() != course)
            .cloned()
            .collect();
        Self::assemble(remaining, priorities)
    }

    /// Returns a copy scored against a (possibly different) priority map.
    pub fn rescore(&self, priorities: &PriorityMap) -> Self {
        Self {
            score: priorities.score(&self.sections),
            ..self.clone()
        }
    }

    /// Sections in insertion order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Priority score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Earliest start over all sections (`None` if empty).
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    /// Latest end over all sections (`None` if empty).
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    /// Whether the schedule has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether a section with the same identity is present.
    pub fn contains(&self, section: &Section) -> bool {
        self.sections
            .iter()
            .any(|s| s.matches(section.course(), section.section_id()))
    }

    /// Whether any section of `course` is present.
    pub fn includes_course(&self, course: &str) -> bool {
        self.sections.iter().any(|s| s.course() == course)
    }

    /// Finds the section chosen for `course`.
    pub fn section_for_course(&self, course: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.course() == course)
    }

    /// Unordered identity set, used for duplicate detection.
    pub fn section_keys(&self) -> BTreeSet<SectionKey> {
        self.sections.iter().map(Section::key).collect()
    }

    /// Per-day agenda, one line per meeting day, meetings in start order.
    ///
    /// ```text
    /// M: 09:00-10:00 CS1-01
    /// T: 10:00-11:00 MATH1-02
    /// ```
    pub fn daily_summary(&self) -> String {
        let mut by_day: BTreeMap<(usize, &str), Vec<&Section>> = BTreeMap::new();
        for section in &self.sections {
            for day in section.days() {
                by_day
                    .entry((day_rank(day), day.as_str()))
                    .or_default()
                    .push(section);
            }
        }

        let mut lines = Vec::with_capacity(by_day.len());
        for ((_, day), mut meetings) in by_day {
            meetings.sort_by_key(|s| s.start_time());
            let entries: Vec<String> = meetings
                .iter()
                .map(|s| {
                    format!(
                        "{}-{} {}",
                        format_clock(s.start_time()),
                        format_clock(s.end_time()),
                        s.key()
                    )
                })
                .collect();
            lines.push(format!("{day}: {}", entries.join(", ")));
        }
        lines.join("\n")
    }

    /// One `course section_id` line per section, in insertion order.
    ///
    /// This is what a registration portal needs to look the sections up.
    pub fn registration_listing(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("{} {}\n", s.course(), s.section_id()))
            .collect()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => write!(
                f,
                "Schedule with score {:.2}, start time {}, and end time {}",
                self.score,
                format_clock(start),
                format_clock(end)
            ),
            _ => write!(f, "Empty schedule with score {:.2}", self.score),
        }
    }
}
