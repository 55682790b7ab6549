//! Phase 2: student-to-section assignment.
//!
//! # Algorithm
//!
//! Tiers form the outer loop, so every `Required` request in the catalog is
//! attempted before any `Requested` one. Within a tier, courses follow the
//! catalog order and requests keep their input order.
//!
//! For each request, sections 1..=n are scanned and the first one that is
//! bound, has a free seat, and sits in a block the student does not yet
//! occupy receives the student.
//!
//! Requests for unknown courses or without a student id are unresolved
//! without consulting any section.

use tracing::debug;

use super::{ResolvedRequest, ScheduleState, UnresolvedReason, UnresolvedRequest};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Course, Rules, SectionKey};

/// Request partition produced by phase 2.
#[derive(Debug, Clone, Default)]
pub struct Enrollment {
    /// Placed requests.
    pub resolved: Vec<ResolvedRequest>,
    /// Requests left without a section.
    pub unresolved: Vec<UnresolvedRequest>,
}

/// Places every request of the catalog, tier by tier.
pub fn assign_students(
    catalog: &Catalog,
    rules: &Rules,
    state: &mut ScheduleState,
) -> Result<Enrollment> {
    let mut enrollment = Enrollment::default();
    let requests = catalog.requests();

    for tier in rules.tier_sequence() {
        for code in catalog.course_order() {
            let course = catalog.course(code);

            for &request_index in catalog.requests_for(code) {
                let request = &requests[request_index];
                if request.tier != tier {
                    continue;
                }

                let placed = match (course, request.student()) {
                    (None, _) => Err(UnresolvedReason::UnknownCourse),
                    (Some(_), None) => Err(UnresolvedReason::MissingStudent),
                    (Some(course), Some(student)) => {
                        match first_open_section(state, course, student) {
                            Some(key) => Ok((key, student)),
                            None => Err(UnresolvedReason::NoSectionAvailable),
                        }
                    }
                };

                match placed {
                    Ok((section, student)) => {
                        let block = state.enroll(&section, student)?;
                        enrollment.resolved.push(ResolvedRequest {
                            request_index,
                            request: request.clone(),
                            section,
                            block,
                        });
                    }
                    Err(reason) => {
                        debug!(
                            request_index,
                            course = %request.course_code,
                            student = request.student().unwrap_or("-"),
                            tier = %tier,
                            ?reason,
                            "request unresolved"
                        );
                        enrollment.unresolved.push(UnresolvedRequest {
                            request_index,
                            request: request.clone(),
                            reason,
                        });
                    }
                }
            }
        }
    }

    Ok(enrollment)
}

/// First section of `course` the student can join, in index order.
fn first_open_section(state: &ScheduleState, course: &Course, student: &str) -> Option<SectionKey> {
    (1..=course.section_count)
        .map(|index| SectionKey::new(course.code.clone(), index))
        .find(|key| {
            state.section(key).is_some_and(|section| {
                section.has_seat()
                    && section
                        .block
                        .as_ref()
                        .is_some_and(|block| state.student_is_free(student, block))
            })
        })
}
