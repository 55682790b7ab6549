//! Rule source: the ordered block list and tier priority order.
//!
//! Pure data. The order of `blocks` is the order first-fit scans them in,
//! so it directly shapes the resulting timetable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{blocks, Block, Course, Tier};

/// Default block list.
pub const DEFAULT_BLOCKS: [&str; 7] = ["1A", "1B", "2A", "2B", "3", "4A", "4B"];

/// Fallback when blocks are derived from courses that declare none.
pub const EXTENDED_BLOCKS: [&str; 9] = ["1A", "1B", "2A", "2B", "3", "4A", "4B", "5A", "5B"];

/// Scheduling rules shared by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Valid blocks in scan order.
    pub blocks: Vec<Block>,
    /// Tier processing order, most important first.
    #[serde(default = "default_priority_order")]
    pub priority_order: Vec<Tier>,
}

fn default_priority_order() -> Vec<Tier> {
    Tier::ALL.to_vec()
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(blocks(DEFAULT_BLOCKS))
    }
}

impl Rules {
    /// Creates rules over the given blocks with the natural tier order.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            priority_order: default_priority_order(),
        }
    }

    /// Derives the block list from course eligibility.
    ///
    /// Uses the sorted union of every course's eligible blocks, or
    /// [`EXTENDED_BLOCKS`] when no course restricts its blocks.
    pub fn from_courses(courses: &[Course]) -> Self {
        let union: BTreeSet<Block> = courses
            .iter()
            .filter_map(|c| c.eligible_blocks.as_ref())
            .flatten()
            .cloned()
            .collect();

        if union.is_empty() {
            Self::new(blocks(EXTENDED_BLOCKS))
        } else {
            Self::new(union.into_iter().collect())
        }
    }

    /// Sets the tier processing order.
    pub fn with_priority_order(mut self, order: Vec<Tier>) -> Self {
        self.priority_order = order;
        self
    }

    /// Tiers in the order they are processed.
    ///
    /// The configured order with duplicates dropped, followed by any tier it
    /// omits in natural order. Every tier appears exactly once, so no request
    /// is ever left unclassified.
    pub fn tier_sequence(&self) -> Vec<Tier> {
        let mut seen = BTreeSet::new();
        let mut sequence: Vec<Tier> = self
            .priority_order
            .iter()
            .copied()
            .filter(|t| seen.insert(*t))
            .collect();
        sequence.extend(Tier::ALL.into_iter().filter(|t| !seen.contains(t)));
        sequence
    }

    /// Whether `block` belongs to the rule source.
    pub fn contains_block(&self, block: &Block) -> bool {
        self.blocks.contains(block)
    }
}
