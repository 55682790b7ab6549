//! Schedule quality metrics (KPIs).
//!
//! Computes aggregate indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Satisfaction Rate | resolved / total requests |
//! | Fill Rate | enrolled / max size, per bound section |
//! | Avg Fill Rate | mean fill over bound sections |
//! | Under-filled | bound sections below their course minimum |
//! | Student Load | mean sections per scheduled student |
//! | Lecturer Load | mean sections per scheduled lecturer |

use std::collections::BTreeMap;

use serde::Serialize;

use super::ScheduleOutcome;
use crate::models::{SectionKey, Tier};

/// Seat usage of one bound section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionFill {
    /// Section identity.
    pub section: SectionKey,
    /// Enrolled students.
    pub enrolled: usize,
    /// Capacity.
    pub capacity: usize,
    /// enrolled / capacity (0.0..1.0).
    pub fill_rate: f64,
}

/// Schedule performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// All classified requests.
    pub total_requests: usize,
    /// Requests placed in a section.
    pub resolved_requests: usize,
    /// Requests left without a section.
    pub unresolved_requests: usize,
    /// resolved / total (1.0 when there are no requests).
    pub satisfaction_rate: f64,
    /// Resolved count per tier.
    pub resolved_by_tier: BTreeMap<Tier, usize>,
    /// Unresolved count per tier.
    pub unresolved_by_tier: BTreeMap<Tier, usize>,
    /// Fill of every bound section, in section order.
    pub section_fills: Vec<SectionFill>,
    /// Mean fill rate over bound sections (0.0 if none).
    pub avg_fill_rate: f64,
    /// Opened sections that never got a block.
    pub unbound_sections: usize,
    /// Bound sections below their course minimum size.
    pub under_filled_sections: Vec<SectionKey>,
    /// Students with at least one section.
    pub students_scheduled: usize,
    /// Lecturers with at least one section.
    pub lecturers_scheduled: usize,
    /// Mean sections per scheduled student.
    pub avg_sections_per_student: f64,
    /// Mean sections per scheduled lecturer.
    pub avg_sections_per_lecturer: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a finished run.
    pub fn calculate(outcome: &ScheduleOutcome) -> Self {
        let mut resolved_by_tier: BTreeMap<Tier, usize> = BTreeMap::new();
        for r in &outcome.resolved {
            *resolved_by_tier.entry(r.request.tier).or_insert(0) += 1;
        }
        let mut unresolved_by_tier: BTreeMap<Tier, usize> = BTreeMap::new();
        for u in &outcome.unresolved {
            *unresolved_by_tier.entry(u.request.tier).or_insert(0) += 1;
        }

        let mut section_fills = Vec::new();
        let mut under_filled_sections = Vec::new();
        let mut unbound_sections = 0;
        for section in &outcome.sections {
            if !section.is_bound() {
                unbound_sections += 1;
                continue;
            }
            if section.is_below_minimum() {
                under_filled_sections.push(section.key.clone());
            }
            section_fills.push(SectionFill {
                section: section.key.clone(),
                enrolled: section.enrolled(),
                capacity: section.max_size,
                fill_rate: section.fill_rate(),
            });
        }

        let avg_fill_rate = if section_fills.is_empty() {
            0.0
        } else {
            section_fills.iter().map(|f| f.fill_rate).sum::<f64>() / section_fills.len() as f64
        };

        let avg_load = |loads: Vec<usize>| -> f64 {
            if loads.is_empty() {
                0.0
            } else {
                loads.iter().sum::<usize>() as f64 / loads.len() as f64
            }
        };

        Self {
            total_requests: outcome.request_count(),
            resolved_requests: outcome.resolved.len(),
            unresolved_requests: outcome.unresolved.len(),
            satisfaction_rate: outcome.satisfaction_rate(),
            resolved_by_tier,
            unresolved_by_tier,
            section_fills,
            avg_fill_rate,
            unbound_sections,
            under_filled_sections,
            students_scheduled: outcome.student_schedules.len(),
            lecturers_scheduled: outcome.lecturer_schedules.len(),
            avg_sections_per_student: avg_load(
                outcome.student_schedules.values().map(|t| t.len()).collect(),
            ),
            avg_sections_per_lecturer: avg_load(
                outcome.lecturer_schedules.values().map(|t| t.len()).collect(),
            ),
        }
    }

    /// Satisfaction rate for one tier (1.0 if the tier had no requests).
    pub fn tier_satisfaction(&self, tier: Tier) -> f64 {
        let resolved = self.resolved_by_tier.get(&tier).copied().unwrap_or(0);
        let unresolved = self.unresolved_by_tier.get(&tier).copied().unwrap_or(0);
        let total = resolved + unresolved;
        if total == 0 {
            1.0
        } else {
            resolved as f64 / total as f64
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_satisfaction: f64, min_avg_fill: f64) -> bool {
        self.satisfaction_rate >= min_satisfaction && self.avg_fill_rate >= min_avg_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Request, Rules, SectionLecturer};
    use crate::scheduler::TimetableScheduler;

    fn bib9_outcome() -> ScheduleOutcome {
        let courses = vec![Course::new("BIB9")
            .with_sections(2)
            .with_sizes(2, 2, 2)
            .with_eligible_blocks(["1A", "1B"])];
        let lecturers = vec![
            SectionLecturer::new("BIB9", 1, "T1"),
            SectionLecturer::new("BIB9", 2, "T2"),
        ];
        let mut requests: Vec<Request> = (1..=5)
            .map(|i| Request::new(format!("S{i}"), "BIB9", Tier::Required))
            .collect();
        requests.push(Request::new("S1", "GHOST", Tier::Recommended));

        TimetableScheduler::new()
            .schedule(&courses, &lecturers, &requests, &Rules::default())
            .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = ScheduleKpi::calculate(&bib9_outcome());
        assert_eq!(kpi.total_requests, 6);
        assert_eq!(kpi.resolved_requests, 4);
        assert_eq!(kpi.unresolved_requests, 2);
        assert!((kpi.satisfaction_rate - 4.0 / 6.0).abs() < 1e-10);
        assert_eq!(kpi.resolved_by_tier[&Tier::Required], 4);
        assert_eq!(kpi.unresolved_by_tier[&Tier::Required], 1);
        assert_eq!(kpi.unresolved_by_tier[&Tier::Recommended], 1);
    }

    #[test]
    fn test_kpi_fill() {
        let kpi = ScheduleKpi::calculate(&bib9_outcome());
        assert_eq!(kpi.section_fills.len(), 2);
        assert!(kpi.section_fills.iter().all(|f| (f.fill_rate - 1.0).abs() < 1e-10));
        assert!((kpi.avg_fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.unbound_sections, 0);
        assert!(kpi.under_filled_sections.is_empty());
    }

    #[test]
    fn test_kpi_loads() {
        let kpi = ScheduleKpi::calculate(&bib9_outcome());
        assert_eq!(kpi.students_scheduled, 4);
        assert_eq!(kpi.lecturers_scheduled, 2);
        assert!((kpi.avg_sections_per_student - 1.0).abs() < 1e-10);
        assert!((kpi.avg_sections_per_lecturer - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_under_filled_and_unbound() {
        let courses = vec![
            Course::new("SMALL").with_sizes(3, 5, 10).with_eligible_blocks(["1A"]),
            Course::new("NONE").with_eligible_blocks(Vec::<&str>::new()),
        ];
        let requests = vec![
            Request::new("S1", "SMALL", Tier::Required),
            Request::new("S1", "NONE", Tier::Required),
        ];
        let outcome = TimetableScheduler::new()
            .schedule(&courses, &[], &requests, &Rules::default())
            .unwrap();

        let kpi = ScheduleKpi::calculate(&outcome);
        assert_eq!(kpi.unbound_sections, 1);
        assert_eq!(kpi.under_filled_sections, vec![SectionKey::new("SMALL", 1)]);
        assert!((kpi.avg_fill_rate - 0.1).abs() < 1e-10);
        assert!((kpi.tier_satisfaction(Tier::Required) - 0.5).abs() < 1e-10);
        assert!((kpi.tier_satisfaction(Tier::Requested) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&ScheduleOutcome::default());
        assert_eq!(kpi.total_requests, 0);
        assert!((kpi.satisfaction_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_fill_rate - 0.0).abs() < 1e-10);
        assert!((kpi.avg_sections_per_student - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = ScheduleKpi::calculate(&bib9_outcome());
        assert!(kpi.meets_thresholds(0.6, 0.9));
        assert!(!kpi.meets_thresholds(0.7, 0.0));
        assert!(!kpi.meets_thresholds(0.0, 1.5));
    }
}
