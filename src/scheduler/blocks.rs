//! Phase 1: section-to-block assignment.
//!
//! # Algorithm
//!
//! For each requested course in first-seen order, open its sections and, for
//! section index 1..=n, scan the rule source's blocks in order. The first
//! block that is
//! 1. allowed by the course (eligible and not excluded),
//! 2. not taken by an earlier section of the same course, and
//! 3. free in the section lecturer's timetable
//!
//! is bound. A section with no such block stays unbound for the run.
//!
//! Strict first-fit, no backtracking: an early pick can starve a later
//! section of the same lecturer.
//!
//! # Complexity
//! O(s * b) where s = sections, b = blocks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ScheduleState;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Block, Course, Rules, Section, SectionKey};

/// How many sections of a course are opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionCountPolicy {
    /// Open every declared section.
    #[default]
    Declared,
    /// Open `min(declared, ceil(demand / max_size))` sections, where demand
    /// counts all requests naming the course.
    DemandDriven,
}

impl SectionCountPolicy {
    /// Number of sections to open for `course` given its request count.
    pub fn sections_for(self, course: &Course, demand: usize) -> u32 {
        match self {
            SectionCountPolicy::Declared => course.section_count,
            SectionCountPolicy::DemandDriven => {
                if course.max_size == 0 {
                    return 0;
                }
                let needed = demand.div_ceil(course.max_size);
                needed.min(course.section_count as usize) as u32
            }
        }
    }
}

/// Counts reported by phase 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockAssignmentSummary {
    /// Sections opened.
    pub opened: usize,
    /// Sections bound to a block.
    pub bound: usize,
}

/// Opens and binds sections for every requested course.
pub fn assign_section_blocks(
    catalog: &Catalog,
    rules: &Rules,
    policy: SectionCountPolicy,
    state: &mut ScheduleState,
) -> Result<BlockAssignmentSummary> {
    let mut summary = BlockAssignmentSummary::default();

    for code in catalog.course_order() {
        let Some(course) = catalog.course(code) else {
            debug!(course = %code, "no course record; sections not opened");
            continue;
        };

        let count = policy.sections_for(course, catalog.demand(code));
        let mut claimed: HashSet<&Block> = HashSet::new();

        for index in 1..=count {
            let key = SectionKey::new(code.clone(), index);
            let lecturer = catalog.lecturer_for(&key);
            state.open_section(Section::new(
                key.clone(),
                lecturer.to_string(),
                course.min_size,
                course.max_size,
            ));
            summary.opened += 1;

            let choice = rules.blocks.iter().find(|block| {
                course.allows_block(block)
                    && !claimed.contains(block)
                    && state.lecturer_is_free(&lecturer, block)
            });

            match choice {
                Some(block) => {
                    state.bind_block(&key, block.clone())?;
                    claimed.insert(block);
                    summary.bound += 1;
                    debug!(section = %key, block = %block, lecturer = %lecturer, "section bound");
                }
                None => {
                    warn!(section = %key, lecturer = %lecturer, "no conflict-free block for section");
                }
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{blocks, Request, SectionLecturer, Tier};

    fn run(
        courses: &[Course],
        lecturers: &[SectionLecturer],
        requests: &[Request],
        rules: &Rules,
        policy: SectionCountPolicy,
    ) -> (ScheduleState, BlockAssignmentSummary) {
        let catalog = Catalog::build(courses, lecturers, requests);
        let mut state = ScheduleState::new();
        let summary = assign_section_blocks(&catalog, rules, policy, &mut state).unwrap();
        (state, summary)
    }

    fn block_of(state: &ScheduleState, code: &str, index: u32) -> Option<String> {
        state
            .section(&SectionKey::new(code, index))
            .and_then(|s| s.block.as_ref())
            .map(|b| b.as_str().to_string())
    }

    #[test]
    fn test_first_fit_distinct_blocks_per_course() {
        let courses = vec![Course::new("BIB9")
            .with_sections(2)
            .with_eligible_blocks(["1A", "1B"])];
        let lecturers = vec![
            SectionLecturer::new("BIB9", 1, "T1"),
            SectionLecturer::new("BIB9", 2, "T2"),
        ];
        let requests = vec![Request::new("S1", "BIB9", Tier::Required)];

        let (state, summary) = run(
            &courses,
            &lecturers,
            &requests,
            &Rules::default(),
            SectionCountPolicy::Declared,
        );
        assert_eq!(block_of(&state, "BIB9", 1).as_deref(), Some("1A"));
        assert_eq!(block_of(&state, "BIB9", 2).as_deref(), Some("1B"));
        assert_eq!(summary, BlockAssignmentSummary { opened: 2, bound: 2 });
    }

    #[test]
    fn test_scan_follows_rule_block_order() {
        let courses = vec![Course::new("C1").with_eligible_blocks(["1A", "3"])];
        let requests = vec![Request::new("S1", "C1", Tier::Required)];
        let rules = Rules::new(blocks(["3", "1A"]));

        let (state, _) = run(&courses, &[], &requests, &rules, SectionCountPolicy::Declared);
        assert_eq!(block_of(&state, "C1", 1).as_deref(), Some("3"));
    }

    #[test]
    fn test_fully_excluded_course_never_binds() {
        let courses = vec![Course::new("C1")
            .with_sections(2)
            .with_eligible_blocks(["1A", "1B"])
            .with_excluded_blocks(["1A", "1B"])];
        let requests = vec![Request::new("S1", "C1", Tier::Required)];

        let (state, summary) = run(
            &courses,
            &[],
            &requests,
            &Rules::default(),
            SectionCountPolicy::Declared,
        );
        assert_eq!(summary.opened, 2);
        assert_eq!(summary.bound, 0);
        assert!(state.sections().iter().all(|s| !s.is_bound()));
    }

    #[test]
    fn test_shared_lecturer_conflict() {
        let courses = vec![
            Course::new("C1").with_eligible_blocks(["1A"]),
            Course::new("C2").with_eligible_blocks(["1A"]),
        ];
        let lecturers = vec![
            SectionLecturer::new("C1", 1, "T1"),
            SectionLecturer::new("C2", 1, "T1"),
        ];
        let requests = vec![
            Request::new("S1", "C1", Tier::Required),
            Request::new("S1", "C2", Tier::Required),
        ];

        let (state, _) = run(
            &courses,
            &lecturers,
            &requests,
            &Rules::default(),
            SectionCountPolicy::Declared,
        );
        assert_eq!(block_of(&state, "C1", 1).as_deref(), Some("1A"));
        assert_eq!(block_of(&state, "C2", 1), None);
    }

    #[test]
    fn test_placeholder_lecturer_serializes_sections() {
        // Both sections fall back to "unknown_C1"; only one eligible block.
        let courses = vec![Course::new("C1")
            .with_sections(2)
            .with_eligible_blocks(["1A"])];
        let requests = vec![Request::new("S1", "C1", Tier::Required)];

        let (state, _) = run(
            &courses,
            &[],
            &requests,
            &Rules::default(),
            SectionCountPolicy::Declared,
        );
        let s1 = state.section(&SectionKey::new("C1", 1)).unwrap();
        assert_eq!(s1.lecturer_id, "unknown_C1");
        assert!(s1.is_bound());
        assert!(!state.section(&SectionKey::new("C1", 2)).unwrap().is_bound());
    }

    #[test]
    fn test_unrequested_and_unknown_courses_open_nothing() {
        let courses = vec![Course::new("C1"), Course::new("IDLE")];
        let requests = vec![
            Request::new("S1", "C1", Tier::Required),
            Request::new("S1", "GHOST", Tier::Required),
        ];

        let (state, summary) = run(
            &courses,
            &[],
            &requests,
            &Rules::default(),
            SectionCountPolicy::Declared,
        );
        assert_eq!(summary.opened, 1);
        assert!(state.section(&SectionKey::new("IDLE", 1)).is_none());
        assert!(state.section(&SectionKey::new("GHOST", 1)).is_none());
    }

    #[test]
    fn test_demand_driven_section_count() {
        let course = Course::new("C1").with_sections(4).with_max_size(10);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&course, 0), 0);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&course, 1), 1);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&course, 10), 1);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&course, 11), 2);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&course, 500), 4);
        assert_eq!(SectionCountPolicy::Declared.sections_for(&course, 1), 4);

        let closed = Course::new("C2").with_sections(3).with_max_size(0);
        assert_eq!(SectionCountPolicy::DemandDriven.sections_for(&closed, 5), 0);
    }

    #[test]
    fn test_demand_driven_opens_fewer_sections() {
        let courses = vec![Course::new("C1").with_sections(3).with_max_size(2)];
        let requests = vec![
            Request::new("S1", "C1", Tier::Required),
            Request::new("S2", "C1", Tier::Required),
            Request::new("S3", "C1", Tier::Recommended),
        ];

        let (state, summary) = run(
            &courses,
            &[],
            &requests,
            &Rules::default(),
            SectionCountPolicy::DemandDriven,
        );
        // ceil(3 / 2) = 2 of 3 declared; placeholder lecturer forces distinct blocks anyway.
        assert_eq!(summary.opened, 2);
        assert_eq!(block_of(&state, "C1", 1).as_deref(), Some("1A"));
        assert_eq!(block_of(&state, "C1", 2).as_deref(), Some("1B"));
        assert!(state.section(&SectionKey::new("C1", 3)).is_none());
    }
}
