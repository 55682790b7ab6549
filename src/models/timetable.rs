//! Personal timetable model.
//!
//! A timetable maps each block to at most one section. Lecturers and
//! students each own one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Block, SectionKey};

/// Block → section mapping for one lecturer or student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    slots: BTreeMap<Block, SectionKey>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `block` is unoccupied.
    #[inline]
    pub fn is_free(&self, block: &Block) -> bool {
        !self.slots.contains_key(block)
    }

    /// Section occupying `block`, if any.
    pub fn get(&self, block: &Block) -> Option<&SectionKey> {
        self.slots.get(block)
    }

    /// Occupies `block` with `section`.
    ///
    /// Returns the section already there, leaving the timetable unchanged,
    /// if the block was taken.
    pub(crate) fn occupy(&mut self, block: Block, section: SectionKey) -> Result<(), SectionKey> {
        match self.slots.get(&block) {
            Some(existing) => Err(existing.clone()),
            None => {
                self.slots.insert(block, section);
                Ok(())
            }
        }
    }

    /// Number of occupied blocks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no block is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied blocks in block order.
    pub fn iter(&self) -> impl Iterator<Item = (&Block, &SectionKey)> {
        self.slots.iter()
    }

    /// Whether any block holds a section of `course_code`.
    pub fn attends(&self, course_code: &str) -> bool {
        self.slots.values().any(|k| k.course_code == course_code)
    }
}
