//! Compiles filter descriptors into predicates.
//!
//! # Argument Conventions
//!
//! | kind | parameters |
//! |------|-----------|
//! | `time` | kwargs `start` / `end`: `"HHMM"` strings (`null` = absent) |
//! | `score` | `args[0]` (or kwarg `threshold`): number |
//! | `courses_include` / `courses_exclude` | args: course codes |
//! | `sections_include` / `sections_exclude` | args: `[course, section_id]` pairs |

use std::sync::Arc;

use serde_json::Value;

use super::predicates::{CoursesInclude, MinScore, Not, SectionsInclude, TimeWindow};
use super::{FilterDescriptor, FilterError, FilterKind, SchedulePredicate};
use crate::models::time::parse_hhmm;
use crate::models::SectionKey;

/// Builds the predicate a descriptor describes.
///
/// # Errors
/// - [`FilterError::UnknownFilterKind`] for an unrecognized kind.
/// - [`FilterError::InvalidFilterArguments`] when required parameters
///   are missing or malformed (e.g., a `time` filter with neither bound).
pub fn build_predicate(
    descriptor: &FilterDescriptor,
) -> Result<Arc<dyn SchedulePredicate>, FilterError> {
    let kind = descriptor.filter_kind()?;
    let predicate: Arc<dyn SchedulePredicate> = match kind {
        FilterKind::Time => Arc::new(time_window(descriptor)?),
        FilterKind::Score => Arc::new(min_score(descriptor)?),
        FilterKind::CoursesInclude => Arc::new(courses(kind, descriptor)?),
        FilterKind::CoursesExclude => {
            Arc::new(Not::new(courses(kind, descriptor)?, kind.as_str()))
        }
        FilterKind::SectionsInclude => Arc::new(sections(kind, descriptor)?),
        FilterKind::SectionsExclude => {
            Arc::new(Not::new(sections(kind, descriptor)?, kind.as_str()))
        }
    };
    Ok(predicate)
}

fn time_window(descriptor: &FilterDescriptor) -> Result<TimeWindow, FilterError> {
    let bound = |key: &str| match descriptor.kwargs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => parse_hhmm(raw).map(Some).ok_or_else(|| {
            FilterError::invalid(FilterKind::Time, format!("{key} '{raw}' is not an HHMM time"))
        }),
        Some(other) => Err(FilterError::invalid(
            FilterKind::Time,
            format!("{key} must be an HHMM string, got {other}"),
        )),
    };

    let window = TimeWindow {
        start: bound("start")?,
        end: bound("end")?,
    };
    if window.start.is_none() && window.end.is_none() {
        return Err(FilterError::invalid(
            FilterKind::Time,
            "no start or end time was provided",
        ));
    }
    Ok(window)
}

fn min_score(descriptor: &FilterDescriptor) -> Result<MinScore, FilterError> {
    let raw = descriptor
        .args
        .first()
        .or_else(|| descriptor.kwargs.get("threshold"))
        .ok_or_else(|| FilterError::invalid(FilterKind::Score, "missing minimum score"))?;
    let threshold = raw.as_f64().ok_or_else(|| {
        FilterError::invalid(FilterKind::Score, format!("threshold must be a number, got {raw}"))
    })?;
    Ok(MinScore { threshold })
}

fn courses(kind: FilterKind, descriptor: &FilterDescriptor) -> Result<CoursesInclude, FilterError> {
    let courses = descriptor
        .args
        .iter()
        .map(|arg| {
            arg.as_str().map(str::to_string).ok_or_else(|| {
                FilterError::invalid(kind, format!("course code must be a string, got {arg}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CoursesInclude { courses })
}

fn sections(kind: FilterKind, descriptor: &FilterDescriptor) -> Result<SectionsInclude, FilterError> {
    let sections = descriptor
        .args
        .iter()
        .map(|arg| match arg.as_array().map(Vec::as_slice) {
            Some([Value::String(course), Value::String(section_id)]) => {
                Ok(SectionKey::new(course, section_id))
            }
            _ => Err(FilterError::invalid(
                kind,
                format!("expected a [course, section] pair, got {arg}"),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SectionsInclude { sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityMap, Schedule, Section};
    use chrono::NaiveTime;
    use serde_json::json;

    fn t(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn example_results() -> Vec<Schedule> {
        let p = PriorityMap::new().with_mandatory("CS1").with_level("MATH1", 2);
        let cs1 = Section::new("CS1", "01", ["M"], t(9), t(10));
        let math = Section::new("MATH1", "02", ["T"], t(10), t(11));
        vec![
            Schedule::from_sections(&[cs1.clone()], &p),
            Schedule::from_sections(&[cs1, math], &p),
        ]
    }

    fn kept(descriptor: &FilterDescriptor) -> Vec<usize> {
        let predicate = build_predicate(descriptor).unwrap();
        example_results()
            .iter()
            .enumerate()
            .filter(|(_, s)| predicate.accepts(s))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_score_filter_example() {
        assert_eq!(kept(&FilterDescriptor::score(0.5)), vec![1]);
        assert_eq!(kept(&FilterDescriptor::new("score").with_kwarg("threshold", 0.0)), vec![0, 1]);
    }

    #[test]
    fn test_time_filter() {
        assert_eq!(kept(&FilterDescriptor::time(None, Some("1000"))), vec![0]);
        assert_eq!(kept(&FilterDescriptor::time(Some("0900"), Some("1100"))), vec![0, 1]);
        assert_eq!(kept(&FilterDescriptor::time(Some("0930"), None)), Vec::<usize>::new());
        let with_null = FilterDescriptor::new("time")
            .with_kwarg("start", Value::Null)
            .with_kwarg("end", "1000");
        assert_eq!(kept(&with_null), vec![0]);
    }

    #[test]
    fn test_time_filter_requires_a_bound() {
        let err = build_predicate(&FilterDescriptor::time(None, None)).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidFilterArguments { kind: FilterKind::Time, .. }
        ));

        let nulls = FilterDescriptor::new("time")
            .with_kwarg("start", Value::Null)
            .with_kwarg("end", Value::Null);
        assert!(build_predicate(&nulls).is_err());
    }

    #[test]
    fn test_time_filter_rejects_bad_clock() {
        let err = build_predicate(&FilterDescriptor::time(Some("9am"), None)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilterArguments { .. }));
        let err = build_predicate(&FilterDescriptor::new("time").with_kwarg("end", 1700)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilterArguments { .. }));
    }

    #[test]
    fn test_score_filter_requires_number() {
        assert!(matches!(
            build_predicate(&FilterDescriptor::new("score")),
            Err(FilterError::InvalidFilterArguments { kind: FilterKind::Score, .. })
        ));
        assert!(build_predicate(&FilterDescriptor::new("score").with_arg("high")).is_err());
    }

    #[test]
    fn test_course_filters() {
        assert_eq!(kept(&FilterDescriptor::courses_include(&["MATH1"])), vec![1]);
        assert_eq!(kept(&FilterDescriptor::courses_exclude(&["MATH1"])), vec![0]);
        assert_eq!(kept(&FilterDescriptor::courses_include(&["CS1", "ART"])), vec![0, 1]);
        assert_eq!(kept(&FilterDescriptor::new("courses_X").with_arg("CS1")), Vec::<usize>::new());
        assert!(build_predicate(&FilterDescriptor::new("courses_include").with_arg(5)).is_err());
    }

    #[test]
    fn test_section_filters() {
        assert_eq!(kept(&FilterDescriptor::sections_include(&[("MATH1", "02")])), vec![1]);
        assert_eq!(kept(&FilterDescriptor::sections_include(&[("MATH1", "01")])), Vec::<usize>::new());
        assert_eq!(kept(&FilterDescriptor::sections_exclude(&[("MATH1", "02")])), vec![0]);
        assert_eq!(
            kept(&FilterDescriptor::new("sections_I").with_arg(json!(["CS1", "01"]))),
            vec![0, 1]
        );
        assert!(build_predicate(&FilterDescriptor::new("sections_include").with_arg("CS1")).is_err());
        assert!(build_predicate(&FilterDescriptor::new("sections_include").with_arg(json!(["CS1"]))).is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let err = build_predicate(&FilterDescriptor::new("weekday")).unwrap_err();
        assert!(matches!(err, FilterError::UnknownFilterKind(ref k) if k == "weekday"));
        assert_eq!(err.to_string(), "'weekday' is not an allowed kind of filter");
    }
}
