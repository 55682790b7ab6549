//! Student request model.
//!
//! A request asks for a seat in some section of a course. Requests are
//! immutable input: the engine only classifies them as resolved (bound to
//! one section) or unresolved.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseTierError;

/// Priority class of a request.
///
/// Declaration order is priority order: `Required` outranks `Requested`,
/// which outranks `Recommended`. `Ord` follows that order, so the most
/// important tier compares smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Mandatory for the student's programme.
    Required,
    /// Explicitly asked for by the student.
    Requested,
    /// Suggested, lowest priority.
    Recommended,
}

impl Tier {
    /// All tiers in natural priority order.
    pub const ALL: [Tier; 3] = [Tier::Required, Tier::Requested, Tier::Recommended];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Required => "Required",
            Tier::Requested => "Requested",
            Tier::Recommended => "Recommended",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}

/// A student's request for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Requesting student. `None` when the source record carried no id.
    pub student_id: Option<String>,
    /// Requested course code.
    pub course_code: String,
    /// Priority tier.
    pub tier: Tier,
}

impl Request {
    /// Creates a request for a known student.
    pub fn new(student_id: impl Into<String>, course_code: impl Into<String>, tier: Tier) -> Self {
        Self {
            student_id: Some(student_id.into()),
            course_code: course_code.into(),
            tier,
        }
    }

    /// Creates a request with no student identity.
    pub fn anonymous(course_code: impl Into<String>, tier: Tier) -> Self {
        Self {
            student_id: None,
            course_code: course_code.into(),
            tier,
        }
    }

    /// The student id, if present and non-blank.
    pub fn student(&self) -> Option<&str> {
        self.student_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
