//! Run result: timetables, rosters, and the request partition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Block, Request, Section, SectionKey, Timetable};

/// A request bound to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// Position of the request in the input list.
    pub request_index: usize,
    /// The request.
    pub request: Request,
    /// Receiving section.
    pub section: SectionKey,
    /// The section's block.
    pub block: Block,
}

/// Why a request could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// No course record matches the requested code.
    UnknownCourse,
    /// The request carries no student id.
    MissingStudent,
    /// Every section was unbound, full, or clashed with the student's timetable.
    NoSectionAvailable,
}

/// A request left without a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedRequest {
    /// Position of the request in the input list.
    pub request_index: usize,
    /// The request.
    pub request: Request,
    /// Classification.
    pub reason: UnresolvedReason,
}

/// Read-only snapshot of a finished run.
///
/// Every input request appears exactly once, in either `resolved` or
/// `unresolved`. Both lists are in processing order (tier, then course,
/// then input order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Student id → timetable.
    pub student_schedules: BTreeMap<String, Timetable>,
    /// Lecturer id → timetable.
    pub lecturer_schedules: BTreeMap<String, Timetable>,
    /// Placed requests.
    pub resolved: Vec<ResolvedRequest>,
    /// Requests left without a section.
    pub unresolved: Vec<UnresolvedRequest>,
    /// Every opened section with block and roster.
    pub sections: Vec<Section>,
}

impl ScheduleOutcome {
    /// Section by key.
    pub fn section(&self, key: &SectionKey) -> Option<&Section> {
        self.sections.iter().find(|s| &s.key == key)
    }

    /// Roster of a section (empty if the section was never opened).
    pub fn roster(&self, key: &SectionKey) -> &[String] {
        self.section(key).map(|s| s.roster.as_slice()).unwrap_or(&[])
    }

    /// Block of a section, if bound.
    pub fn block_of(&self, key: &SectionKey) -> Option<&Block> {
        self.section(key).and_then(|s| s.block.as_ref())
    }

    /// Timetable of a student.
    pub fn student_schedule(&self, student_id: &str) -> Option<&Timetable> {
        self.student_schedules.get(student_id)
    }

    /// Timetable of a lecturer.
    pub fn lecturer_schedule(&self, lecturer_id: &str) -> Option<&Timetable> {
        self.lecturer_schedules.get(lecturer_id)
    }

    /// Total requests classified.
    pub fn request_count(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }

    /// Resolved / total. `1.0` when there were no requests.
    pub fn satisfaction_rate(&self) -> f64 {
        let total = self.request_count();
        if total == 0 {
            1.0
        } else {
            self.resolved.len() as f64 / total as f64
        }
    }

    /// Unresolved requests with the given reason.
    pub fn unresolved_with(&self, reason: UnresolvedReason) -> impl Iterator<Item = &UnresolvedRequest> {
        self.unresolved.iter().filter(move |u| u.reason == reason)
    }
}
