//! Course priorities and schedule scoring.
//!
//! Each desired course carries either a positive priority level or the
//! mandatory sentinel. A section of a course at level `n` contributes
//! `1 / n` to a schedule's score, so level 1 is worth the most.
//! Mandatory courses contribute nothing to the score; their presence is
//! enforced by the generator instead.
//!
//! # Wire Format
//! A JSON object of course code → integer level, where `0` (or `null`)
//! marks a mandatory course:
//! ```json
//! {"CS1": 0, "MATH1": 2}
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::Section;

/// Priority of one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityLevel {
    /// Must appear in every schedule; contributes no score.
    Mandatory,
    /// Weighted level (lower = more important).
    Level(NonZeroU32),
}

impl PriorityLevel {
    /// Builds a level from its wire integer (`0` = mandatory).
    pub fn from_raw(raw: u32) -> Self {
        match NonZeroU32::new(raw) {
            Some(level) => Self::Level(level),
            None => Self::Mandatory,
        }
    }

    /// Wire integer (`0` = mandatory).
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Mandatory => 0,
            Self::Level(level) => level.get(),
        }
    }

    /// Score contribution of one section at this level.
    #[inline]
    pub fn weight(self) -> f64 {
        match self {
            Self::Mandatory => 0.0,
            Self::Level(level) => 1.0 / f64::from(level.get()),
        }
    }

    /// Whether this is the mandatory sentinel.
    #[inline]
    pub fn is_mandatory(self) -> bool {
        matches!(self, Self::Mandatory)
    }
}

impl Serialize for PriorityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_raw())
    }
}

impl<'de> Deserialize<'de> for PriorityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<u32>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw.unwrap_or(0)))
    }
}

/// Course code → priority level.
///
/// Read-only during a search; passed explicitly into the scorer and
/// generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityMap {
    levels: BTreeMap<String, PriorityLevel>,
}

impl PriorityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a course's level from its wire integer (`0` = mandatory).
    pub fn with_level(mut self, course: impl Into<String>, level: u32) -> Self {
        self.insert(course, PriorityLevel::from_raw(level));
        self
    }

    /// Marks a course as mandatory.
    pub fn with_mandatory(mut self, course: impl Into<String>) -> Self {
        self.insert(course, PriorityLevel::Mandatory);
        self
    }

    /// Inserts or replaces a course's level.
    pub fn insert(&mut self, course: impl Into<String>, level: PriorityLevel) {
        self.levels.insert(course.into(), level);
    }

    /// Level of a course, if present.
    pub fn get(&self, course: &str) -> Option<PriorityLevel> {
        self.levels.get(course).copied()
    }

    /// Whether the course is present and mandatory.
    pub fn is_mandatory(&self, course: &str) -> bool {
        self.get(course).is_some_and(PriorityLevel::is_mandatory)
    }

    /// Whether the course has an entry.
    pub fn contains(&self, course: &str) -> bool {
        self.levels.contains_key(course)
    }

    /// Iterates over `(course, level)` in course-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PriorityLevel)> {
        self.levels.iter().map(|(c, l)| (c.as_str(), *l))
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Score contribution of one section of `course`.
    ///
    /// A course without an entry is treated like a mandatory one
    /// (contributes 0) and logged; [`crate::validation::validate_groups`]
    /// reports the same gap as an error.
    pub fn weight(&self, course: &str) -> f64 {
        match self.get(course) {
            Some(level) => level.weight(),
            None => {
                warn!(course, "no priority entry for course; scoring it as mandatory");
                0.0
            }
        }
    }

    /// Scores a set of sections.
    ///
    /// Contributions are summed in section-key order so the result does
    /// not depend on the order the sections were added in.
    pub fn score(&self, sections: &[Section]) -> f64 {
        let mut ordered: Vec<&Section> = sections.iter().collect();
        ordered.sort_by(|a, b| {
            (a.course(), a.section_id()).cmp(&(b.course(), b.section_id()))
        });
        ordered.iter().map(|s| self.weight(s.course())).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, PriorityLevel)> for PriorityMap {
    fn from_iter<I: IntoIterator<Item = (S, PriorityLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().map(|(c, l)| (c.into(), l)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn section(course: &str, id: &str) -> Section {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        Section::new(course, id, ["M"], t(9), t(10))
    }

    #[test]
    fn test_level_weights() {
        assert_eq!(PriorityLevel::Mandatory.weight(), 0.0);
        assert_eq!(PriorityLevel::from_raw(1).weight(), 1.0);
        assert_eq!(PriorityLevel::from_raw(2).weight(), 0.5);
        assert!(PriorityLevel::from_raw(0).is_mandatory());
    }

    #[test]
    fn test_score_sums_reciprocals() {
        let map = PriorityMap::new()
            .with_mandatory("CS1")
            .with_level("MATH1", 2)
            .with_level("HIST", 4);
        let sections = vec![section("CS1", "01"), section("MATH1", "02"), section("HIST", "01")];
        assert!((map.score(&sections) - 0.75).abs() < 1e-12);
        assert_eq!(map.score(&[]), 0.0);
    }

    #[test]
    fn test_missing_course_scores_zero() {
        let map = PriorityMap::new().with_level("MATH1", 2);
        assert_eq!(map.weight("UNKNOWN"), 0.0);
        assert!(!map.is_mandatory("UNKNOWN"));
        assert!(!map.contains("UNKNOWN"));
    }

    #[test]
    fn test_score_order_invariant() {
        let map = PriorityMap::new()
            .with_level("A", 3)
            .with_level("B", 7)
            .with_level("C", 11);
        let forward = vec![section("A", "1"), section("B", "1"), section("C", "1")];
        let backward = vec![section("C", "1"), section("B", "1"), section("A", "1")];
        assert_eq!(map.score(&forward), map.score(&backward));
    }

    #[test]
    fn test_wire_format() {
        let map: PriorityMap =
            serde_json::from_str(r#"{"CS1": 0, "MATH1": 2, "ART": null}"#).unwrap();
        assert!(map.is_mandatory("CS1"));
        assert!(map.is_mandatory("ART"));
        assert_eq!(map.get("MATH1"), Some(PriorityLevel::from_raw(2)));

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"ART":0,"CS1":0,"MATH1":2}"#);
    }

    #[test]
    fn test_from_iter() {
        let map: PriorityMap = vec![("A", PriorityLevel::from_raw(1)), ("B", PriorityLevel::Mandatory)]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(("A", PriorityLevel::from_raw(1))));
    }

    proptest::proptest! {
        #[test]
        fn test_score_order_invariant_under_shuffle(
            levels in proptest::collection::vec(0u32..20, 1..8),
            seed in proptest::prelude::any::<u64>(),
        ) {
            use rand::rngs::StdRng;
            use rand::seq::SliceRandom;
            use rand::SeedableRng;

            let map: PriorityMap = levels
                .iter()
                .enumerate()
                .map(|(i, &level)| (format!("C{i}"), PriorityLevel::from_raw(level)))
                .collect();
            let sections: Vec<Section> = (0..levels.len())
                .map(|i| section(&format!("C{i}"), "01"))
                .collect();
            let mut shuffled = sections.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
            proptest::prop_assert_eq!(map.score(&sections), map.score(&shuffled));
        }
    }
}
