//! Section conflict detection.
//!
//! Two sections conflict iff they meet on a common day and one starts
//! while the other is in session. Both interval ends are inclusive, so
//! back-to-back sections (one ends exactly when the other starts) are
//! reported as conflicting.

use crate::models::{Schedule, Section};

/// Whether two sections overlap.
///
/// Holds iff the sections share a day token and
/// `a.start ∈ [b.start, b.end]` or `b.start ∈ [a.start, a.end]`.
/// Symmetric for any pair of sections.
pub fn conflicts(a: &Section, b: &Section) -> bool {
    if !a.shares_day_with(b) {
        return false;
    }
    starts_within(a, b) || starts_within(b, a)
}

/// Whether `s` conflicts with any section already in `schedule`.
pub fn section_conflicts_with_schedule(s: &Section, schedule: &Schedule) -> bool {
    schedule.sections().iter().any(|other| conflicts(s, other))
}

#[inline]
fn starts_within(a: &Section, b: &Section) -> bool {
    a.start_time() >= b.start_time() && a.start_time() <= b.end_time()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriorityMap;
    use chrono::NaiveTime;
    use proptest::prelude::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn sec(course: &str, days: &[&str], start: NaiveTime, end: NaiveTime) -> Section {
        Section::new(course, "01", days.iter().copied(), start, end)
    }

    #[test]
    fn test_overlap_same_day() {
        let a = sec("A", &["M", "W"], t(9, 0), t(10, 0));
        let b = sec("B", &["W"], t(9, 30), t(10, 30));
        assert!(conflicts(&a, &b));
        assert!(conflicts(&b, &a));
    }

    #[test]
    fn test_no_common_day() {
        let a = sec("A", &["M", "W"], t(9, 0), t(10, 0));
        let b = sec("B", &["T", "R"], t(9, 0), t(10, 0));
        assert!(!conflicts(&a, &b));
    }

    #[test]
    fn test_disjoint_times() {
        let a = sec("A", &["M"], t(9, 0), t(10, 0));
        let b = sec("B", &["M"], t(10, 1), t(11, 0));
        assert!(!conflicts(&a, &b));
        assert!(!conflicts(&b, &a));
    }

    #[test]
    fn test_back_to_back_conflicts() {
        let a = sec("A", &["M"], t(9, 0), t(10, 0));
        let b = sec("B", &["M"], t(10, 0), t(11, 0));
        assert!(conflicts(&a, &b));
        assert!(conflicts(&b, &a));
    }

    #[test]
    fn test_containment() {
        let outer = sec("A", &["F"], t(8, 0), t(12, 0));
        let inner = sec("B", &["F"], t(9, 0), t(10, 0));
        assert!(conflicts(&outer, &inner));
        assert!(conflicts(&inner, &outer));
    }

    #[test]
    fn test_conflicts_with_schedule() {
        let p = PriorityMap::new().with_level("A", 1).with_level("B", 1);
        let schedule = Schedule::empty()
            .add(&sec("A", &["M"], t(9, 0), t(10, 0)), &p)
            .add(&sec("B", &["T"], t(13, 0), t(14, 0)), &p);

        assert!(section_conflicts_with_schedule(
            &sec("C", &["T"], t(13, 30), t(14, 30)),
            &schedule
        ));
        assert!(!section_conflicts_with_schedule(
            &sec("C", &["W"], t(13, 30), t(14, 30)),
            &schedule
        ));
        assert!(!section_conflicts_with_schedule(
            &sec("C", &["M"], t(9, 0), t(10, 0)),
            &Schedule::empty()
        ));
    }

    fn arb_section() -> impl Strategy<Value = Section> {
        (
            proptest::sample::subsequence(vec!["M", "T", "W", "R", "F"], 1..=5),
            0u32..1380,
            1u32..60,
        )
            .prop_map(|(days, start, length)| {
                let end = start + length;
                Section::new(
                    "X",
                    "01",
                    days,
                    t(start / 60, start % 60),
                    t(end / 60, end % 60),
                )
            })
    }

    proptest! {
        #[test]
        fn test_conflict_symmetry(a in arb_section(), b in arb_section()) {
            prop_assert_eq!(conflicts(&a, &b), conflicts(&b, &a));
        }

        #[test]
        fn test_section_conflicts_with_itself(a in arb_section()) {
            prop_assert!(conflicts(&a, &a));
        }
    }
}
