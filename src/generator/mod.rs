//! Schedule generation and ranking.
//!
//! Turns course groups into every conflict-free timetable, then ranks
//! them by priority score.
//!
//! # Algorithm
//!
//! [`ScheduleGenerator`] performs an exhaustive backtracking search over
//! the groups, using [`conflicts`] as its only pruning rule besides the
//! mandatory-course constraint. [`rank_schedules`] then drops empty and
//! duplicate results and stably sorts the rest by score.
//!
//! [`Planner`] chains both steps and applies the configured result cap.

mod conflict;
mod planner;
mod ranking;
mod search;

pub use conflict::{conflicts, section_conflicts_with_schedule};
pub use planner::Planner;
pub use ranking::{dedup_schedules, rank_schedules, sort_by_score};
pub use search::ScheduleGenerator;
