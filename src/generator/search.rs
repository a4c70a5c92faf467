//! Exhaustive backtracking schedule search.
//!
//! # Algorithm
//!
//! Walk the course groups left to right with an accumulating schedule,
//! starting empty:
//! 1. No groups left: emit the accumulated schedule.
//! 2. For each alternative of the head group that does not conflict with
//!    the accumulated schedule, recurse on the tail with the schedule
//!    extended by that alternative.
//! 3. If the head group is optional, also recurse on the tail with the
//!    schedule unchanged (skip the course).
//!
//! A mandatory group whose alternatives all conflict therefore cuts its
//! branch off entirely rather than producing schedules without it.
//!
//! Extension is copy-on-extend ([`Schedule::add`]), so sibling branches
//! never see each other's choices and no undo step is needed.
//!
//! # Complexity
//! Worst case Π (alternatives + 1 if optional) over all groups. No
//! pruning beyond the local conflict check and the mandatory rule.

use tracing::debug;

use super::conflict::section_conflicts_with_schedule;
use crate::models::{CourseGroup, PriorityMap, Schedule};

/// Enumerates every schedule reachable from a list of course groups.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use u_timetable::generator::ScheduleGenerator;
/// use u_timetable::models::{CourseGroup, PriorityMap, Section};
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let groups = vec![
///     CourseGroup::mandatory("CS1", vec![Section::new("CS1", "01", ["M"], t(9), t(10))]),
///     CourseGroup::optional("MATH1", vec![
///         Section::new("MATH1", "01", ["M"], t(9), t(10)),
///         Section::new("MATH1", "02", ["T"], t(10), t(11)),
///     ]),
/// ];
/// let priorities = PriorityMap::new().with_mandatory("CS1").with_level("MATH1", 2);
///
/// let schedules = ScheduleGenerator::new(&priorities).generate(&groups);
/// assert_eq!(schedules.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGenerator<'a> {
    priorities: &'a PriorityMap,
}

impl<'a> ScheduleGenerator<'a> {
    /// Creates a generator scoring against `priorities`.
    pub fn new(priorities: &'a PriorityMap) -> Self {
        Self { priorities }
    }

    /// Generates all schedules, in search order.
    ///
    /// The result may contain the empty schedule (when every group is
    /// optional) and duplicates; see [`super::rank_schedules`].
    pub fn generate(&self, groups: &[CourseGroup]) -> Vec<Schedule> {
        self.generate_from(&Schedule::empty(), groups)
    }

    /// Generates all schedules that extend `base`.
    pub fn generate_from(&self, base: &Schedule, groups: &[CourseGroup]) -> Vec<Schedule> {
        let mut results = Vec::new();
        self.extend(base, groups, &mut results);
        debug!(
            groups = groups.len(),
            schedules = results.len(),
            "schedule search finished"
        );
        results
    }

    fn extend(&self, schedule: &Schedule, groups: &[CourseGroup], out: &mut Vec<Schedule>) {
        let Some((head, tail)) = groups.split_first() else {
            out.push(schedule.clone());
            return;
        };

        for alternative in &head.sections {
            if !section_conflicts_with_schedule(alternative, schedule) {
                let extended = schedule.add(alternative, self.priorities);
                self.extend(&extended, tail, out);
            }
        }

        if !head.mandatory {
            self.extend(schedule, tail, out);
        }
    }
}
