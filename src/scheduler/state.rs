//! Mutable state of one scheduling run.
//!
//! `ScheduleState` owns every section, lecturer timetable, and student
//! timetable of a run. The two phases mutate it only through
//! [`ScheduleState::bind_block`] and [`ScheduleState::enroll`], which
//! enforce the run invariants:
//!
//! 1. A section's block is set at most once.
//! 2. A lecturer holds at most one section per block.
//! 3. A student holds at most one section per block.
//! 4. A roster never exceeds the course maximum.
//!
//! A violation is a scheduler defect and is returned as [`ScheduleError`].

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, ScheduleError};
use crate::models::{Block, Section, SectionKey, Timetable};

/// Sections, rosters, and timetables of a run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    sections: Vec<Section>,
    section_index: HashMap<SectionKey, usize>,
    lecturers: HashMap<String, Timetable>,
    students: HashMap<String, Timetable>,
}

impl ScheduleState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an unbound section. Re-opening an existing key is a no-op.
    pub fn open_section(&mut self, section: Section) {
        if self.section_index.contains_key(&section.key) {
            return;
        }
        self.section_index
            .insert(section.key.clone(), self.sections.len());
        self.sections.push(section);
    }

    /// Section by key.
    pub fn section(&self, key: &SectionKey) -> Option<&Section> {
        self.section_index.get(key).map(|&i| &self.sections[i])
    }

    /// All sections in opening order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Whether `lecturer` is free in `block`.
    pub fn lecturer_is_free(&self, lecturer: &str, block: &Block) -> bool {
        self.lecturers
            .get(lecturer)
            .map_or(true, |t| t.is_free(block))
    }

    /// Whether `student` is free in `block`.
    pub fn student_is_free(&self, student: &str, block: &Block) -> bool {
        self.students.get(student).map_or(true, |t| t.is_free(block))
    }

    /// Binds a section to a block and occupies its lecturer's slot.
    pub fn bind_block(&mut self, key: &SectionKey, block: Block) -> Result<()> {
        let idx = self.index_of(key)?;
        let section = &self.sections[idx];

        if let Some(existing) = &section.block {
            return Err(ScheduleError::SectionAlreadyBound {
                section: key.clone(),
                block: existing.clone(),
            });
        }

        let lecturer = section.lecturer_id.clone();
        self.lecturers
            .entry(lecturer.clone())
            .or_default()
            .occupy(block.clone(), key.clone())
            .map_err(|existing| ScheduleError::LecturerDoubleBooked {
                lecturer,
                block: block.clone(),
                existing,
            })?;

        self.sections[idx].block = Some(block);
        Ok(())
    }

    /// Adds a student to a section roster and occupies the student's slot.
    ///
    /// Returns the section's block.
    pub fn enroll(&mut self, key: &SectionKey, student: &str) -> Result<Block> {
        let idx = self.index_of(key)?;
        let section = &self.sections[idx];

        let block = section
            .block
            .clone()
            .ok_or_else(|| ScheduleError::SectionUnbound(key.clone()))?;

        if !section.has_seat() {
            return Err(ScheduleError::CapacityExceeded {
                section: key.clone(),
                max_size: section.max_size,
            });
        }

        self.students
            .entry(student.to_string())
            .or_default()
            .occupy(block.clone(), key.clone())
            .map_err(|existing| ScheduleError::StudentDoubleBooked {
                student: student.to_string(),
                block: block.clone(),
                existing,
            })?;

        self.sections[idx].roster.push(student.to_string());
        Ok(block)
    }

    /// Consumes the state into ordered snapshots:
    /// (sections, lecturer timetables, student timetables).
    pub fn into_parts(
        self,
    ) -> (
        Vec<Section>,
        BTreeMap<String, Timetable>,
        BTreeMap<String, Timetable>,
    ) {
        (
            self.sections,
            self.lecturers.into_iter().collect(),
            self.students.into_iter().collect(),
        )
    }

    fn index_of(&self, key: &SectionKey) -> Result<usize> {
        self.section_index
            .get(key)
            .copied()
            .ok_or_else(|| ScheduleError::UnknownSection(key.clone()))
    }
}
