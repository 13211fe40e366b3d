//! Paragraph nodes of the hierarchy.

use serde::{Deserialize, Serialize};

/// A body paragraph and its sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Trimmed paragraph text
    #[serde(rename = "Paragraph")]
    pub text: String,

    /// Sentences of the paragraph, in order
    #[serde(rename = "Sentences")]
    pub sentences: Vec<String>,
}

impl Paragraph {
    /// Create a paragraph from its text and sentences.
    pub fn new(text: impl Into<String>, sentences: Vec<String>) -> Self {
        Self {
            text: text.into(),
            sentences,
        }
    }

    /// Number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
