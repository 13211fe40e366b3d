//! Document-level types.

use super::{Paragraph, Section};
use serde::{Deserialize, Serialize};

/// Root of a rebuilt document hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source file name or identifier, supplied by the caller
    #[serde(rename = "Document")]
    pub name: String,

    /// Sections in reading order
    #[serde(rename = "Sections")]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Get the number of sections in the document.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get a section by index (0-indexed).
    pub fn get_section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over all paragraphs across sections, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.sections.iter().flat_map(|s| s.paragraphs.iter())
    }

    /// Total number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    /// Total number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.sections.iter().map(|s| s.sentence_count()).sum()
    }

    /// Section titles in order.
    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                std::iter::once(section.title.as_str())
                    .chain(section.paragraphs.iter().map(|p| p.text.as_str()))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
