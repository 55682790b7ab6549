//! Time block model.
//!
//! A block is an atomic schedulable time slot (e.g. "1A") shared by all
//! courses, lecturers, and students. Blocks are opaque: the only meaning
//! they carry is identity and their position in the rule source's list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque time block identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(String);

impl Block {
    /// Creates a block from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The block identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Block {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Block {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Builds a block list from string identifiers, preserving order.
pub fn blocks<I, S>(ids: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Block::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_identity() {
        let a = Block::new("1A");
        let b: Block = "1A".into();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "1A");
        assert_eq!(a.to_string(), "1A");
    }

    #[test]
    fn test_blocks_preserve_order() {
        let list = blocks(["2B", "1A", "3"]);
        let ids: Vec<&str> = list.iter().map(Block::as_str).collect();
        assert_eq!(ids, vec!["2B", "1A", "3"]);
    }

    #[test]
    fn test_block_serializes_as_string() {
        let json = serde_json::to_string(&Block::new("4A")).unwrap();
        assert_eq!(json, "\"4A\"");
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "4A");
    }
}
