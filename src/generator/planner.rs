//! End-to-end planning pipeline.
//!
//! # Pipeline
//! 1. Build course groups from the catalog and priorities.
//! 2. Enumerate every schedule ([`ScheduleGenerator`]).
//! 3. Drop empty/duplicate schedules and sort by score ([`rank_schedules`]).
//! 4. Truncate to `max_results`, if configured.
//!
//! Saved schedules can be brought back against a changed priority map
//! with [`Planner::replan`], which rescores and reranks them.

use tracing::{info, warn};

use super::{rank_schedules, ScheduleGenerator};
use crate::config::PlannerConfig;
use crate::models::{Catalog, CourseGroup, PriorityMap, Schedule};
use crate::validation::{validate_catalog, validate_request, ValidationError};

/// Runs generation and ranking under a [`PlannerConfig`].
///
/// # Example
///
/// ```
/// use u_timetable::generator::Planner;
/// use u_timetable::models::{Catalog, PriorityMap};
///
/// let catalog = Catalog::parse("CS1\n  01 M0900-1000\nMATH1\n  01 M0900-1000\n  02 T1000-1100\n").unwrap();
/// let priorities = PriorityMap::new().with_mandatory("CS1").with_level("MATH1", 2);
///
/// let schedules = Planner::default().plan(&catalog, &priorities).unwrap();
/// assert_eq!(schedules.len(), 2);
/// assert_eq!(schedules[0].score(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validates the catalog, then plans over its groups.
    ///
    /// Only malformed catalog entries are fatal. A prioritized course
    /// with no sections (or missing from the catalog) is logged and
    /// planned as an empty group: skipped when optional, and leaving no
    /// schedules when mandatory.
    pub fn plan(
        &self,
        catalog: &Catalog,
        priorities: &PriorityMap,
    ) -> Result<Vec<Schedule>, Vec<ValidationError>> {
        validate_catalog(catalog)?;
        if let Err(issues) = validate_request(catalog, priorities) {
            for issue in &issues {
                warn!(%issue, "planning despite request issue");
            }
        }
        Ok(self.plan_groups(&catalog.groups(priorities), priorities))
    }

    /// Plans over explicit course groups without validation.
    pub fn plan_groups(&self, groups: &[CourseGroup], priorities: &PriorityMap) -> Vec<Schedule> {
        let generated = ScheduleGenerator::new(priorities).generate(groups);
        let generated_count = generated.len();

        let mut ranked = rank_schedules(generated);
        let ranked_count = ranked.len();
        if let Some(max) = self.config.max_results {
            ranked.truncate(max);
        }

        info!(
            groups = groups.len(),
            generated = generated_count,
            ranked = ranked_count,
            kept = ranked.len(),
            "planned schedules"
        );
        ranked
    }

    /// Rescores saved schedules against `priorities`, then reranks and
    /// truncates them like freshly generated ones.
    pub fn replan(&self, schedules: &[Schedule], priorities: &PriorityMap) -> Vec<Schedule> {
        let rescored = schedules.iter().map(|s| s.rescore(priorities)).collect();
        let mut ranked = rank_schedules(rescored);
        if let Some(max) = self.config.max_results {
            ranked.truncate(max);
        }
        info!(
            loaded = schedules.len(),
            kept = ranked.len(),
            "rescored schedules"
        );
        ranked
    }
}
