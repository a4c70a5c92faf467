//! Filter descriptors: the serializable form of a filter.
//!
//! # JSON
//! ```json
//! [{"kind": "time", "args": [], "kwargs": {"start": "0900", "end": null}},
//!  {"kind": "score", "args": [0.5], "kwargs": {}}]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FilterError;

/// Recognized filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Earliest start and/or latest end.
    Time,
    /// Minimum score.
    Score,
    /// At least one listed course present.
    CoursesInclude,
    /// No listed course present.
    CoursesExclude,
    /// At least one listed section present.
    SectionsInclude,
    /// No listed section present.
    SectionsExclude,
}

impl FilterKind {
    /// All kinds, in menu order.
    pub const ALL: [FilterKind; 6] = [
        Self::Time,
        Self::Score,
        Self::CoursesInclude,
        Self::CoursesExclude,
        Self::SectionsInclude,
        Self::SectionsExclude,
    ];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Score => "score",
            Self::CoursesInclude => "courses_include",
            Self::CoursesExclude => "courses_exclude",
            Self::SectionsInclude => "sections_include",
            Self::SectionsExclude => "sections_exclude",
        }
    }

    /// One-line help text.
    pub fn description(self) -> &'static str {
        match self {
            Self::Time => "earliest start and/or latest end time",
            Self::Score => "minimum score",
            Self::CoursesInclude => "courses that must be included",
            Self::CoursesExclude => "courses that must be excluded",
            Self::SectionsInclude => "sections that must be included",
            Self::SectionsExclude => "sections that must be excluded",
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    /// Accepts canonical names and the short `_I` / `_X` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Self::Time),
            "score" => Ok(Self::Score),
            "courses_include" | "courses_I" => Ok(Self::CoursesInclude),
            "courses_exclude" | "courses_X" => Ok(Self::CoursesExclude),
            "sections_include" | "sections_I" => Ok(Self::SectionsInclude),
            "sections_exclude" | "sections_X" => Ok(Self::SectionsExclude),
            other => Err(FilterError::UnknownFilterKind(other.to_string())),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(kind, args, kwargs)` triple describing one filter.
///
/// `kind` is kept as written so an unknown kind survives a JSON
/// round-trip and is reported when the descriptor is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Filter kind name.
    pub kind: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Keyword arguments.
    #[serde(default)]
    pub kwargs: BTreeMap<String, Value>,
}

impl FilterDescriptor {
    /// Creates a descriptor with no arguments.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Appends a positional argument.
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets a keyword argument.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// `time` filter from optional `HHMM` bounds.
    pub fn time(start: Option<&str>, end: Option<&str>) -> Self {
        let mut descriptor = Self::new(FilterKind::Time.as_str());
        if let Some(start) = start {
            descriptor = descriptor.with_kwarg("start", start);
        }
        if let Some(end) = end {
            descriptor = descriptor.with_kwarg("end", end);
        }
        descriptor
    }

    /// `score` filter.
    pub fn score(threshold: f64) -> Self {
        Self::new(FilterKind::Score.as_str()).with_arg(threshold)
    }

    /// `courses_include` filter.
    pub fn courses_include<S: AsRef<str>>(courses: &[S]) -> Self {
        Self::courses(FilterKind::CoursesInclude, courses)
    }

    /// `courses_exclude` filter.
    pub fn courses_exclude<S: AsRef<str>>(courses: &[S]) -> Self {
        Self::courses(FilterKind::CoursesExclude, courses)
    }

    /// `sections_include` filter from `(course, section_id)` pairs.
    pub fn sections_include<S: AsRef<str>>(sections: &[(S, S)]) -> Self {
        Self::sections(FilterKind::SectionsInclude, sections)
    }

    /// `sections_exclude` filter from `(course, section_id)` pairs.
    pub fn sections_exclude<S: AsRef<str>>(sections: &[(S, S)]) -> Self {
        Self::sections(FilterKind::SectionsExclude, sections)
    }

    fn courses<S: AsRef<str>>(kind: FilterKind, courses: &[S]) -> Self {
        courses
            .iter()
            .fold(Self::new(kind.as_str()), |d, c| d.with_arg(c.as_ref()))
    }

    fn sections<S: AsRef<str>>(kind: FilterKind, sections: &[(S, S)]) -> Self {
        sections.iter().fold(Self::new(kind.as_str()), |d, (course, id)| {
            d.with_arg(Value::from(vec![course.as_ref(), id.as_ref()]))
        })
    }

    /// Parsed kind.
    pub fn filter_kind(&self) -> Result<FilterKind, FilterError> {
        self.kind.parse()
    }
}

impl fmt::Display for FilterDescriptor {
    /// Renders as `kind(arg, ..., key=value, ...)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .args
            .iter()
            .map(Value::to_string)
            .chain(self.kwargs.iter().map(|(k, v)| format!("{k}={v}")))
            .collect();
        write!(f, "{}({})", self.kind, parts.join(", "))
    }
}
