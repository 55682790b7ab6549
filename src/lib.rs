//! Block timetabling for the U-Engine ecosystem.
//!
//! Allocates course sections to time blocks and students to sections under
//! capacity, conflict, and priority constraints, producing timetables for
//! students and lecturers.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Block`, `Course`, `Section`, `SectionKey`,
//!   `Request`, `Tier`, `Timetable`, `Rules`
//! - **`catalog`**: Lookup indices built from one run's input
//! - **`scheduler`**: Two-phase greedy engine (`TimetableScheduler`) and
//!   schedule metrics (`ScheduleKpi`)
//! - **`validation`**: Input integrity checks (duplicate ids, size bounds,
//!   block and section references)
//! - **`error`**: Invariant-violation errors
//!
//! # Guarantees
//!
//! Every run ends with no lecturer or student holding two sections in one
//! block, no roster above its course maximum, and every request classified
//! exactly once as resolved or unresolved. Results are deterministic for
//! identical input; they are not globally optimal.
//!
//! # Logging
//!
//! Phase boundaries, unschedulable sections, and unresolved requests are
//! emitted as `tracing` events. Install a subscriber to see them.

pub mod catalog;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
pub use scheduler::{ScheduleKpi, ScheduleOutcome, ScheduleRequest, TimetableScheduler};
