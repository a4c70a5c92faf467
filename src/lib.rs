//! Course timetable generation for the U-Engine ecosystem.
//!
//! Enumerates every conflict-free combination of course sections for a
//! term, scores each against a priority ranking, and lets callers browse
//! the ranked results through composable, serializable filters.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Section`, `Schedule`, `PriorityMap`,
//!   `Catalog`, `CourseGroup`
//! - **`generator`**: Conflict detection, backtracking search, ranking,
//!   and the `Planner` pipeline
//! - **`filtering`**: Filter predicates, descriptors, and `FilterSession`
//! - **`pager`**: Page slicing for browsing results
//! - **`codec`**: JSON encoding (minified / expanded)
//! - **`validation`**: Input integrity checks (duplicate sections, bad
//!   time ranges, missing priorities)
//! - **`config`**: `PlannerConfig`
//!
//! # Pipeline
//!
//! ```text
//! Catalog ──groups──▶ ScheduleGenerator ──▶ rank_schedules ──▶ FilterSession ──▶ Pager
//!                         ▲       ▲
//!                  PriorityMap  conflicts
//! ```
//!
//! # References
//!
//! - Golomb & Baumert (1965), "Backtrack Programming"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod codec;
pub mod config;
pub mod filtering;
pub mod generator;
pub mod models;
pub mod pager;
pub mod validation;
