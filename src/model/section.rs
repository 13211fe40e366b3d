//! Section nodes of the hierarchy.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Title given to body text that appears before any heading.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// A titled run of paragraphs.
///
/// Equality compares title and paragraphs only, matching the serialized
/// form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, or [`UNTITLED_SECTION`]
    #[serde(rename = "Title")]
    pub title: String,

    /// Body paragraphs in reading order
    #[serde(rename = "Paragraphs")]
    pub paragraphs: Vec<Paragraph>,

    /// Opened for body text with no preceding heading. Not serialized.
    #[serde(skip)]
    implicit: bool,
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.paragraphs == other.paragraphs
    }
}

impl Eq for Section {}

impl Section {
    /// Create an empty section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
            implicit: false,
        }
    }

    /// Create the default section for content preceding any heading.
    pub fn untitled() -> Self {
        Self {
            implicit: true,
            ..Self::new(UNTITLED_SECTION)
        }
    }

    /// Check if this is the default section rather than one opened by a
    /// heading. Always `false` for sections read back from JSON.
    pub fn is_untitled(&self) -> bool {
        self.implicit
    }

    /// Add a paragraph to the section.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Check if the section has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Total number of sentences in the section.
    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.sentence_count()).sum()
    }
}
