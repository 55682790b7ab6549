//! Error types.
//!
//! Data-quality problems (unknown courses, missing student ids,
//! unschedulable sections) are never errors: they end up in the unresolved
//! partition. [`ScheduleError`] is reserved for internal invariant
//! violations, which indicate a scheduler defect and abort the run.

use thiserror::Error;

use crate::models::{Block, SectionKey};

/// An internal invariant violation detected during a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A section's block was about to be rebound.
    #[error("section {section} is already bound to block {block}")]
    SectionAlreadyBound { section: SectionKey, block: Block },

    /// A lecturer would hold two sections in one block.
    #[error("lecturer {lecturer} already teaches {existing} in block {block}")]
    LecturerDoubleBooked {
        lecturer: String,
        block: Block,
        existing: SectionKey,
    },

    /// A student would attend two sections in one block.
    #[error("student {student} already attends {existing} in block {block}")]
    StudentDoubleBooked {
        student: String,
        block: Block,
        existing: SectionKey,
    },

    /// A roster would exceed its course maximum.
    #[error("section {section} is full ({max_size} seats)")]
    CapacityExceeded { section: SectionKey, max_size: usize },

    /// Enrolment into a section that has no block.
    #[error("section {0} has no block")]
    SectionUnbound(SectionKey),

    /// Reference to a section that was never opened.
    #[error("unknown section {0}")]
    UnknownSection(SectionKey),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Unrecognized tier name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown request tier: {0:?}")]
pub struct ParseTierError(pub String);
