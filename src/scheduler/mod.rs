//! Greedy timetabling engine and schedule metrics.
//!
//! # Algorithm
//!
//! `TimetableScheduler` runs two greedy phases over one [`ScheduleState`]:
//! first-fit section-to-block binding, then tiered student placement.
//! It is not a constraint solver and makes no optimality claim.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a finished run: satisfaction rate, per-tier
//! results, section fill rates, and timetable loads.

mod blocks;
mod engine;
mod enrollment;
mod kpi;
mod outcome;
mod state;

pub use blocks::{assign_section_blocks, BlockAssignmentSummary, SectionCountPolicy};
pub use engine::{ScheduleRequest, TimetableScheduler};
pub use enrollment::{assign_students, Enrollment};
pub use kpi::{ScheduleKpi, SectionFill};
pub use outcome::{ResolvedRequest, ScheduleOutcome, UnresolvedReason, UnresolvedRequest};
pub use state::ScheduleState;
