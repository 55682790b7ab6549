//! Two-phase greedy timetabling engine.
//!
//! # Algorithm
//! 1. Index the input (see [`Catalog`]).
//! 2. Phase 1: bind each requested course's sections to blocks, first-fit,
//!    without lecturer conflicts.
//! 3. Phase 2: place requests tier by tier into the first section with a
//!    free seat and no student clash.
//!
//! Phase 1 runs to completion before phase 2 starts. Each run builds a
//! fresh [`ScheduleState`]; nothing is shared between runs.
//!
//! The result is not globally optimal: greedy choices are never revisited.

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use super::{assign_section_blocks, assign_students, ScheduleOutcome, ScheduleState, SectionCountPolicy};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Course, Request, Rules, SectionLecturer};

/// Input container for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Catalog courses.
    pub courses: Vec<Course>,
    /// Section → lecturer bindings.
    #[serde(default)]
    pub section_lecturers: Vec<SectionLecturer>,
    /// Student requests.
    pub requests: Vec<Request>,
    /// Block list and tier order.
    #[serde(default)]
    pub rules: Rules,
}

impl ScheduleRequest {
    /// Creates a request with default rules and no lecturer bindings.
    pub fn new(courses: Vec<Course>, requests: Vec<Request>) -> Self {
        Self {
            courses,
            requests,
            ..Default::default()
        }
    }

    /// Sets the section-lecturer bindings.
    pub fn with_section_lecturers(mut self, bindings: Vec<SectionLecturer>) -> Self {
        self.section_lecturers = bindings;
        self
    }

    /// Sets the rules.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }
}

/// Greedy two-phase timetabling scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Request, Rules, SectionKey, Tier};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let courses = vec![
///     Course::new("BIB9")
///         .with_sections(2)
///         .with_max_size(2)
///         .with_eligible_blocks(["1A", "1B"]),
/// ];
/// let requests: Vec<Request> = (1..=5)
///     .map(|i| Request::new(format!("S{i}"), "BIB9", Tier::Required))
///     .collect();
///
/// let outcome = TimetableScheduler::new()
///     .schedule(&courses, &[], &requests, &Rules::default())
///     .unwrap();
///
/// assert_eq!(outcome.roster(&SectionKey::new("BIB9", 1)), &["S1", "S2"]);
/// assert_eq!(outcome.resolved.len(), 4);
/// assert_eq!(outcome.unresolved.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    section_policy: SectionCountPolicy,
}

impl TimetableScheduler {
    /// Creates a scheduler using declared section counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the section-count policy.
    pub fn with_section_policy(mut self, policy: SectionCountPolicy) -> Self {
        self.section_policy = policy;
        self
    }

    /// The configured section-count policy.
    pub fn section_policy(&self) -> SectionCountPolicy {
        self.section_policy
    }

    /// Runs both phases and returns the timetable snapshot.
    ///
    /// # Errors
    /// Only on an internal invariant violation (a scheduler defect). Bad
    /// input data never fails a run; it shows up as unresolved requests.
    #[instrument(
        name = "schedule",
        skip_all,
        fields(
            courses = courses.len(),
            requests = requests.len(),
            blocks = rules.blocks.len(),
            policy = ?self.section_policy,
        )
    )]
    pub fn schedule(
        &self,
        courses: &[Course],
        section_lecturers: &[SectionLecturer],
        requests: &[Request],
        rules: &Rules,
    ) -> Result<ScheduleOutcome> {
        let catalog = Catalog::build(courses, section_lecturers, requests);
        let mut state = ScheduleState::new();

        info!(courses = catalog.course_order().len(), "section-block assignment started");
        let blocks = assign_section_blocks(&catalog, rules, self.section_policy, &mut state)
            .inspect_err(|e| error!(error = %e, "invariant violated during section-block assignment"))?;
        info!(
            opened = blocks.opened,
            bound = blocks.bound,
            unbound = blocks.opened - blocks.bound,
            "section-block assignment finished"
        );

        info!(requests = catalog.requests().len(), "student-section assignment started");
        let enrollment = assign_students(&catalog, rules, &mut state)
            .inspect_err(|e| error!(error = %e, "invariant violated during student-section assignment"))?;
        info!(
            resolved = enrollment.resolved.len(),
            unresolved = enrollment.unresolved.len(),
            "student-section assignment finished"
        );

        let (sections, lecturer_schedules, student_schedules) = state.into_parts();
        Ok(ScheduleOutcome {
            student_schedules,
            lecturer_schedules,
            resolved: enrollment.resolved,
            unresolved: enrollment.unresolved,
            sections,
        })
    }

    /// Runs from a request container.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome> {
        self.schedule(
            &request.courses,
            &request.section_lecturers,
            &request.requests,
            &request.rules,
        )
    }
}
