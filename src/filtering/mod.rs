//! Schedule filters and filter sessions.
//!
//! Provides parameterized predicates over schedules (time window,
//! minimum score, course and section inclusion/exclusion) and a
//! [`FilterSession`] that composes the active ones with logical AND.
//!
//! Filters are described by a serializable [`FilterDescriptor`]
//! (`kind` + positional `args` + keyword `kwargs`). Compiled predicates
//! are never serialized; a session is restored by replaying its
//! descriptors.
//!
//! # Usage
//!
//! ```
//! use u_timetable::filtering::{FilterDescriptor, FilterSession};
//!
//! let mut session = FilterSession::new();
//! session.add_descriptor(FilterDescriptor::score(0.5)).unwrap();
//! session.add_descriptor(FilterDescriptor::time(Some("0900"), None)).unwrap();
//!
//! let json = session.serialize().unwrap();
//! let restored = FilterSession::deserialize(&json).unwrap();
//! assert_eq!(restored.descriptors(), session.descriptors());
//! ```

mod builder;
mod descriptor;
pub mod predicates;
mod session;

pub use builder::build_predicate;
pub use descriptor::{FilterDescriptor, FilterKind};
pub use session::{Filter, FilterSession};

use crate::models::Schedule;
use std::fmt::Debug;
use thiserror::Error;

/// A boolean test over schedules.
///
/// Implementations are immutable once built, so they can be shared
/// between a session's filter list and its composed predicate.
pub trait SchedulePredicate: Send + Sync + Debug {
    /// Predicate name (e.g., "time", "score").
    fn name(&self) -> &'static str;

    /// Whether the schedule passes.
    fn accepts(&self, schedule: &Schedule) -> bool;
}

/// Errors raised while building or managing filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter kind is not recognized.
    #[error("'{0}' is not an allowed kind of filter")]
    UnknownFilterKind(String),

    /// Required parameters are missing or malformed.
    #[error("invalid arguments for '{kind}' filter: {reason}")]
    InvalidFilterArguments { kind: FilterKind, reason: String },

    /// `remove` was called with a position past the end.
    #[error("no filter at index {index} (session has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Descriptor JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    pub(crate) fn invalid(kind: FilterKind, reason: impl Into<String>) -> Self {
        Self::InvalidFilterArguments {
            kind,
            reason: reason.into(),
        }
    }
}
