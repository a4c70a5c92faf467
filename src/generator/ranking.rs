//! Ranking and deduplication of generated schedules.
//!
//! # Steps
//! 1. Drop empty schedules.
//! 2. Drop duplicates: two schedules are duplicates iff their section
//!    identity sets are equal, regardless of order. The first one in
//!    generation order is kept.
//! 3. Stable sort by score, descending. Equal scores keep generation
//!    order.
//!
//! Ranking its own output again is a no-op.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::models::{Schedule, SectionKey};

/// Removes empty and duplicate schedules, keeping the first occurrence.
pub fn dedup_schedules(schedules: Vec<Schedule>) -> Vec<Schedule> {
    let mut seen: HashSet<BTreeSet<SectionKey>> = HashSet::with_capacity(schedules.len());
    schedules
        .into_iter()
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.section_keys()))
        .collect()
}

/// Stable sort by score, highest first.
pub fn sort_by_score(schedules: &mut [Schedule]) {
    schedules.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
}

/// Drops empty schedules, removes duplicates, and sorts by score.
pub fn rank_schedules(schedules: Vec<Schedule>) -> Vec<Schedule> {
    let mut ranked = dedup_schedules(schedules);
    sort_by_score(&mut ranked);
    ranked
}
