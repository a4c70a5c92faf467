//! Timetable domain models.
//!
//! Provides the core data types for course timetabling: the sections a
//! catalog offers, the priorities a person assigns to courses, and the
//! candidate schedules the generator produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training Center | Sports League |
//! |-------------|-----------|-----------------|---------------|
//! | Section | Class Section | Session Slot | Practice Slot |
//! | CourseGroup | Course | Workshop | Team Activity |
//! | PriorityMap | Course Wishlist | Training Plan | Season Goals |
//! | Schedule | Term Timetable | Attendance Plan | Weekly Plan |

mod catalog;
mod priority;
mod schedule;
mod section;
pub mod time;

pub use catalog::{Catalog, CatalogError, CourseGroup, CourseOffering};
pub use priority::{PriorityLevel, PriorityMap};
pub use schedule::Schedule;
pub use section::{split_day_letters, Section, SectionKey, DAY_ORDER};
