//! The terminal outline artifact.

use serde::{Deserialize, Serialize};

/// Heading depth in the extracted hierarchy.
///
/// Serializes as `"H1"`, `"H2"`, `"H3"` in the JSON artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a cluster rank (0 = largest mean font size).
    ///
    /// Ranks beyond 2 cap at [`HeadingLevel::H3`].
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// The level's label, as it appears in the artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading depth
    pub level: HeadingLevel,
    /// Heading text, first letter capitalized
    pub text: String,
    /// 0-based page index where the heading line was found
    pub page: u32,
}

impl OutlineEntry {
    /// Create an outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extracted document structure: a title plus ordered headings.
///
/// This is the terminal, immutable output of the pipeline; a document either
/// yields a complete outline or the degraded empty one, never a partial
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title; empty when no title could be determined
    pub title: String,
    /// Headings ordered by page, then position
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// The degraded result: no title, no headings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether the outline carries neither a title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
