//! Filter session: the ordered set of active filters.
//!
//! Keeps each compiled predicate next to the descriptor that produced
//! it, plus a composed predicate (logical AND of all active filters)
//! that is rebuilt on every change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::predicates::AllOf;
use super::{build_predicate, FilterDescriptor, FilterError, SchedulePredicate};
use crate::models::Schedule;

/// One active filter.
#[derive(Debug, Clone)]
pub struct Filter {
    descriptor: FilterDescriptor,
    predicate: Arc<dyn SchedulePredicate>,
}

impl Filter {
    /// Compiles a descriptor.
    pub fn compile(descriptor: FilterDescriptor) -> Result<Self, FilterError> {
        let predicate = build_predicate(&descriptor)?;
        Ok(Self {
            descriptor,
            predicate,
        })
    }

    /// Descriptor this filter was built from.
    pub fn descriptor(&self) -> &FilterDescriptor {
        &self.descriptor
    }

    /// Compiled predicate.
    pub fn predicate(&self) -> &Arc<dyn SchedulePredicate> {
        &self.predicate
    }

    /// Whether the schedule passes this filter.
    pub fn accepts(&self, schedule: &Schedule) -> bool {
        self.predicate.accepts(schedule)
    }
}

/// Ordered, serializable collection of active filters.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use serde_json::json;
/// use u_timetable::filtering::FilterSession;
///
/// let mut session = FilterSession::new();
/// session.add("courses_exclude", vec![json!("ART001")], BTreeMap::new()).unwrap();
/// assert_eq!(session.len(), 1);
/// session.reset();
/// assert!(session.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSession {
    filters: Vec<Filter>,
    composed: AllOf,
}

impl FilterSession {
    /// Creates a session with no filters (accepts everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session by replaying descriptors in order.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterDescriptor>,
    {
        let mut session = Self::new();
        for descriptor in descriptors {
            session.add_descriptor(descriptor)?;
        }
        Ok(session)
    }

    /// Compiles and appends a filter.
    pub fn add(
        &mut self,
        kind: &str,
        args: Vec<Value>,
        kwargs: BTreeMap<String, Value>,
    ) -> Result<(), FilterError> {
        self.add_descriptor(FilterDescriptor {
            kind: kind.to_string(),
            args,
            kwargs,
        })
    }

    /// Compiles and appends a filter from its descriptor.
    ///
    /// On error the session is left unchanged.
    pub fn add_descriptor(&mut self, descriptor: FilterDescriptor) -> Result<(), FilterError> {
        let filter = Filter::compile(descriptor)?;
        debug!(filter = %filter.descriptor, "filter added");
        self.filters.push(filter);
        self.recompose();
        Ok(())
    }

    /// Removes the filter at `index`, returning its descriptor.
    pub fn remove(&mut self, index: usize) -> Result<FilterDescriptor, FilterError> {
        if index >= self.filters.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.filters.len(),
            });
        }
        let removed = self.filters.remove(index);
        debug!(filter = %removed.descriptor, index, "filter removed");
        self.recompose();
        Ok(removed.descriptor)
    }

    /// Removes every filter.
    pub fn reset(&mut self) {
        self.filters.clear();
        self.recompose();
    }

    fn recompose(&mut self) {
        self.composed = AllOf::new(self.filters.iter().map(|f| f.predicate.clone()).collect());
    }

    /// Composed predicate: AND of all active filters.
    pub fn predicate(&self) -> &AllOf {
        &self.composed
    }

    /// Whether the schedule passes every active filter.
    pub fn accepts(&self, schedule: &Schedule) -> bool {
        self.composed.accepts(schedule)
    }

    /// Schedules passing every active filter, order preserved.
    pub fn apply<'s>(&self, schedules: &'s [Schedule]) -> Vec<&'s Schedule> {
        schedules.iter().filter(|s| self.accepts(s)).collect()
    }

    /// Active filters, in insertion order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Active descriptors, in insertion order.
    pub fn descriptors(&self) -> Vec<FilterDescriptor> {
        self.filters.iter().map(|f| f.descriptor.clone()).collect()
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filters are active.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Serializes the descriptors as a JSON array.
    pub fn serialize(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(&self.descriptors())?)
    }

    /// Rebuilds a session from [`FilterSession::serialize`] output.
    pub fn deserialize(json: &str) -> Result<Self, FilterError> {
        let descriptors: Vec<FilterDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors)
    }
}

impl fmt::Display for FilterSession {
    /// One numbered line per active filter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{i}: {}", filter.descriptor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{rank_schedules, ScheduleGenerator};
    use crate::models::{CourseGroup, PriorityMap, Section};
    use chrono::NaiveTime;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde_json::json;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    /// Ranked schedules from a randomly generated catalog.
    fn sampled_schedules(seed: u64) -> Vec<Schedule> {
        let mut rng = StdRng::seed_from_u64(seed);
        let days = ["M", "T", "W", "R", "F"];
        let mut groups = Vec::new();
        let mut priorities = PriorityMap::new();

        for c in 0..5 {
            let course = format!("C{c}");
            let sections = (0..rng.random_range(1..4))
                .map(|s| {
                    let start = rng.random_range(8..18);
                    let meets: Vec<&str> = days
                        .iter()
                        .copied()
                        .filter(|_| rng.random_bool(0.4))
                        .collect();
                    let meets = if meets.is_empty() { vec!["M"] } else { meets };
                    Section::new(&course, format!("{s:02}"), meets, t(start, 0), t(start, 50))
                })
                .collect();
            let mandatory = c == 0;
            priorities = if mandatory {
                priorities.with_mandatory(&course)
            } else {
                priorities.with_level(&course, rng.random_range(1..5))
            };
            groups.push(CourseGroup {
                course,
                sections,
                mandatory,
            });
        }

        rank_schedules(ScheduleGenerator::new(&priorities).generate(&groups))
    }

    fn sample_filters() -> Vec<FilterDescriptor> {
        vec![
            FilterDescriptor::time(Some("0900"), Some("1700")),
            FilterDescriptor::score(0.5),
            FilterDescriptor::courses_include(&["C1", "C2"]),
            FilterDescriptor::courses_exclude(&["C3"]),
            FilterDescriptor::sections_include(&[("C1", "00"), ("C4", "01")]),
            FilterDescriptor::sections_exclude(&[("C2", "00")]),
        ]
    }

    #[test]
    fn test_empty_session_accepts_all() {
        let schedules = sampled_schedules(1);
        let session = FilterSession::new();
        assert_eq!(session.apply(&schedules).len(), schedules.len());
        assert_eq!(session.to_string(), "");
    }

    #[test]
    fn test_composition_is_conjunction() {
        let filters = sample_filters();
        for seed in 0..8 {
            let schedules = sampled_schedules(seed);
            for a in &filters {
                for b in &filters {
                    let f1 = Filter::compile(a.clone()).unwrap();
                    let f2 = Filter::compile(b.clone()).unwrap();
                    let session =
                        FilterSession::from_descriptors([a.clone(), b.clone()]).unwrap();
                    for s in &schedules {
                        assert_eq!(session.accepts(s), f1.accepts(s) && f2.accepts(s));
                    }
                }
            }
        }
    }

    #[test]
    fn test_remove_then_add_reproduces_behavior() {
        let schedules = sampled_schedules(42);
        let mut session = FilterSession::from_descriptors(sample_filters()).unwrap();
        let before: Vec<bool> = schedules.iter().map(|s| session.accepts(s)).collect();

        let removed = session.remove(2).unwrap();
        assert_eq!(removed, FilterDescriptor::courses_include(&["C1", "C2"]));
        assert_eq!(session.len(), sample_filters().len() - 1);

        session.add_descriptor(removed).unwrap();
        let after: Vec<bool> = schedules.iter().map(|s| session.accepts(s)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_example_score_filter() {
        let p = PriorityMap::new().with_mandatory("CS1").with_level("MATH1", 2);
        let groups = vec![
            CourseGroup::mandatory("CS1", vec![Section::new("CS1", "01", ["M"], t(9, 0), t(10, 0))]),
            CourseGroup::optional(
                "MATH1",
                vec![
                    Section::new("MATH1", "01", ["M"], t(9, 0), t(10, 0)),
                    Section::new("MATH1", "02", ["T"], t(10, 0), t(11, 0)),
                ],
            ),
        ];
        let ranked = rank_schedules(ScheduleGenerator::new(&p).generate(&groups));

        let mut session = FilterSession::new();
        session.add("score", vec![json!(0.5)], BTreeMap::new()).unwrap();
        let kept = session.apply(&ranked);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].len(), 2);
    }

    #[test]
    fn test_add_failure_leaves_session_unchanged() {
        let mut session = FilterSession::from_descriptors([FilterDescriptor::score(0.1)]).unwrap();
        let err = session.add("time", vec![], BTreeMap::new()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilterArguments { .. }));
        let err = session.add("colour", vec![], BTreeMap::new()).unwrap_err();
        assert!(matches!(err, FilterError::UnknownFilterKind(_)));
        assert_eq!(session.len(), 1);
        assert_eq!(session.predicate().len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut session = FilterSession::new();
        assert!(matches!(
            session.remove(0),
            Err(FilterError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_reset() {
        let schedules = sampled_schedules(3);
        let mut session = FilterSession::from_descriptors(sample_filters()).unwrap();
        session.reset();
        assert!(session.is_empty());
        assert!(session.predicate().is_empty());
        assert_eq!(session.apply(&schedules).len(), schedules.len());
    }

    #[test]
    fn test_serialize_round_trip() {
        let schedules = sampled_schedules(7);
        let session = FilterSession::from_descriptors(sample_filters()).unwrap();

        let json = session.serialize().unwrap();
        let restored = FilterSession::deserialize(&json).unwrap();

        assert_eq!(restored.descriptors(), session.descriptors());
        for s in &schedules {
            assert_eq!(restored.accepts(s), session.accepts(s));
        }
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"[
            {"kind": "time", "args": [], "kwargs": {"start": "0900", "end": null}},
            {"kind": "courses_I", "args": ["CS1"], "kwargs": {}}
        ]"#;
        let session = FilterSession::deserialize(json).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.filters()[1].predicate().name(), "courses_include");

        assert!(matches!(
            FilterSession::deserialize(r#"[{"kind": "nope"}]"#),
            Err(FilterError::UnknownFilterKind(_))
        ));
        assert!(matches!(FilterSession::deserialize("{"), Err(FilterError::Json(_))));
    }

    #[test]
    fn test_display() {
        let session = FilterSession::from_descriptors([
            FilterDescriptor::score(0.5),
            FilterDescriptor::courses_exclude(&["ART"]),
        ])
        .unwrap();
        assert_eq!(session.to_string(), "0: score(0.5)\n1: courses_exclude(\"ART\")");
    }
}
