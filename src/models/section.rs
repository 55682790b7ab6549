//! Section model.
//!
//! A section is one deliverable instance of a course: bound to at most one
//! block, taught by one lecturer, with a capacity-bounded roster.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Block;

/// Structured section identity: course code plus 1-based section index.
///
/// Ordering is by course code, then index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    /// Owning course code.
    pub course_code: String,
    /// Section index within the course (1..=N).
    pub index: u32,
}

impl SectionKey {
    /// Creates a section key.
    pub fn new(course_code: impl Into<String>, index: u32) -> Self {
        Self {
            course_code: course_code.into(),
            index,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Section {})", self.course_code, self.index)
    }
}

/// Input binding of a section to its lecturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLecturer {
    /// Course code.
    pub course_code: String,
    /// Section index (1-based).
    pub section: u32,
    /// Lecturer id.
    pub lecturer_id: String,
}

impl SectionLecturer {
    /// Creates a section-lecturer binding.
    pub fn new(course_code: impl Into<String>, section: u32, lecturer_id: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            section,
            lecturer_id: lecturer_id.into(),
        }
    }

    /// The structured key of the bound section.
    pub fn key(&self) -> SectionKey {
        SectionKey::new(self.course_code.clone(), self.section)
    }
}

/// Placeholder lecturer id for sections with no lecturer on record.
///
/// All such sections of one course share the placeholder and therefore
/// contend for the same blocks.
pub fn placeholder_lecturer(course_code: &str) -> String {
    format!("unknown_{course_code}")
}

/// A scheduled section (run snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identity.
    pub key: SectionKey,
    /// Teaching lecturer (possibly a placeholder).
    pub lecturer_id: String,
    /// Bound block, `None` if no conflict-free block was found.
    pub block: Option<Block>,
    /// Enrolled student ids in enrolment order.
    pub roster: Vec<String>,
    /// Capacity (course max size).
    pub max_size: usize,
    /// Course minimum size.
    pub min_size: usize,
}

impl Section {
    /// Creates an unbound, empty section.
    pub fn new(key: SectionKey, lecturer_id: impl Into<String>, min_size: usize, max_size: usize) -> Self {
        Self {
            key,
            lecturer_id: lecturer_id.into(),
            block: None,
            roster: Vec::new(),
            max_size,
            min_size,
        }
    }

    /// Whether a block has been bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.block.is_some()
    }

    /// Number of enrolled students.
    #[inline]
    pub fn enrolled(&self) -> usize {
        self.roster.len()
    }

    /// Whether at least one seat remains.
    #[inline]
    pub fn has_seat(&self) -> bool {
        self.roster.len() < self.max_size
    }

    /// Enrolled / capacity. `0.0` for zero-capacity sections.
    pub fn fill_rate(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.roster.len() as f64 / self.max_size as f64
        }
    }

    /// Whether the section runs below its course minimum size.
    pub fn is_below_minimum(&self) -> bool {
        self.roster.len() < self.min_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_display_and_order() {
        let k = SectionKey::new("BIB9", 2);
        assert_eq!(k.to_string(), "BIB9 (Section 2)");

        let mut keys = vec![
            SectionKey::new("BIB9", 2),
            SectionKey::new("BIB10", 1),
            SectionKey::new("BIB9", 1),
        ];
        keys.sort();
        assert_eq!(keys[0], SectionKey::new("BIB10", 1));
        assert_eq!(keys[1], SectionKey::new("BIB9", 1));
    }

    #[test]
    fn test_section_key_keeps_delimiters_in_course_code() {
        let a = SectionKey::new("BIB_9", 1);
        assert_eq!(a.course_code, "BIB_9");
        assert_eq!(a.index, 1);
        assert_ne!(a, SectionKey::new("BIB", 9));
    }

    #[test]
    fn test_section_capacity() {
        let mut s = Section::new(SectionKey::new("C1", 1), "L1", 1, 2);
        assert!(!s.is_bound());
        assert!(s.has_seat());
        assert!(s.is_below_minimum());

        s.roster.push("S1".into());
        assert!(s.has_seat());
        assert!(!s.is_below_minimum());
        s.roster.push("S2".into());
        assert!(!s.has_seat());
        assert!((s.fill_rate() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_capacity_fill_rate() {
        let s = Section::new(SectionKey::new("C1", 1), "L1", 0, 0);
        assert!(!s.has_seat());
        assert!((s.fill_rate() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_placeholder_lecturer() {
        assert_eq!(placeholder_lecturer("BIB9"), "unknown_BIB9");
        let binding = SectionLecturer::new("BIB9", 1, "T1");
        assert_eq!(binding.key(), SectionKey::new("BIB9", 1));
    }
}
