//! Course model.
//!
//! A course is the catalog entry that sections are instantiated from. It
//! declares how many sections may run, how large each may grow, and which
//! blocks the sections may occupy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Block;

/// A catalog course.
///
/// # Block eligibility
/// `eligible_blocks == None` means every block of the rule source is
/// eligible. `Some(set)` restricts sections to that set; an empty set makes
/// the course unschedulable. `excluded_blocks` is subtracted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g. "BIB9").
    pub code: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Duration in blocks. Informational only.
    #[serde(default = "default_length")]
    pub length: u32,
    /// Declared number of sections.
    #[serde(default = "default_section_count")]
    pub section_count: u32,
    /// Minimum viable section size.
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Preferred section size.
    #[serde(default = "default_target_size")]
    pub target_size: usize,
    /// Hard section capacity.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Blocks sections may occupy (`None` = all).
    #[serde(default)]
    pub eligible_blocks: Option<BTreeSet<Block>>,
    /// Blocks sections must never occupy.
    #[serde(default)]
    pub excluded_blocks: BTreeSet<Block>,
}

fn default_length() -> u32 {
    1
}

fn default_section_count() -> u32 {
    1
}

fn default_min_size() -> usize {
    5
}

fn default_target_size() -> usize {
    20
}

fn default_max_size() -> usize {
    25
}

impl Course {
    /// Creates a course with one section and default size bounds (5/20/25).
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: String::new(),
            length: default_length(),
            section_count: default_section_count(),
            min_size: default_min_size(),
            target_size: default_target_size(),
            max_size: default_max_size(),
            eligible_blocks: None,
            excluded_blocks: BTreeSet::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the length in blocks.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Sets the declared section count.
    pub fn with_sections(mut self, count: u32) -> Self {
        self.section_count = count;
        self
    }

    /// Sets min/target/max section sizes.
    pub fn with_sizes(mut self, min: usize, target: usize, max: usize) -> Self {
        self.min_size = min;
        self.target_size = target;
        self.max_size = max;
        self
    }

    /// Sets only the maximum section size.
    pub fn with_max_size(mut self, max: usize) -> Self {
        self.max_size = max;
        self
    }

    /// Restricts sections to the given blocks.
    pub fn with_eligible_blocks<I, B>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Block>,
    {
        self.eligible_blocks = Some(blocks.into_iter().map(Into::into).collect());
        self
    }

    /// Forbids the given blocks.
    pub fn with_excluded_blocks<I, B>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Block>,
    {
        self.excluded_blocks = blocks.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a section of this course may occupy `block`.
    ///
    /// Checks eligibility and exclusion only; lecturer and sibling-section
    /// conflicts are the scheduler's concern.
    pub fn allows_block(&self, block: &Block) -> bool {
        let eligible = self
            .eligible_blocks
            .as_ref()
            .map_or(true, |set| set.contains(block));
        eligible && !self.excluded_blocks.contains(block)
    }

    /// Total seats across all declared sections.
    pub fn total_capacity(&self) -> usize {
        self.section_count as usize * self.max_size
    }
}
