//! Statistics over a rebuilt hierarchy.

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Counts collected from a document hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    /// Number of documents the counts cover
    pub document_count: u32,

    /// Number of sections
    pub section_count: u32,

    /// Number of sections without paragraphs
    pub empty_section_count: u32,

    /// Number of untitled sections (body text before the first heading)
    pub untitled_section_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of sentences
    pub sentence_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl HierarchyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a document.
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self {
            document_count: 1,
            ..Self::default()
        };

        for section in &doc.sections {
            stats.section_count = stats.section_count.saturating_add(1);
            if section.is_empty() {
                stats.empty_section_count = stats.empty_section_count.saturating_add(1);
            }
            if section.is_untitled() {
                stats.untitled_section_count = stats.untitled_section_count.saturating_add(1);
            }
            for paragraph in &section.paragraphs {
                stats.paragraph_count = stats.paragraph_count.saturating_add(1);
                stats.sentence_count = stats
                    .sentence_count
                    .saturating_add(saturate(paragraph.sentence_count()));
                stats.count_text(&paragraph.text);
            }
        }

        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        let words = text.split_whitespace().count();
        let chars = text.chars().filter(|c| !c.is_whitespace()).count();
        self.word_count = self.word_count.saturating_add(saturate(words));
        self.char_count = self.char_count.saturating_add(saturate(chars));
    }

    /// Average number of sentences per paragraph.
    pub fn sentences_per_paragraph(&self) -> f64 {
        if self.paragraph_count == 0 {
            0.0
        } else {
            f64::from(self.sentence_count) / f64::from(self.paragraph_count)
        }
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &HierarchyStats) {
        self.document_count = self.document_count.saturating_add(other.document_count);
        self.section_count = self.section_count.saturating_add(other.section_count);
        self.empty_section_count = self
            .empty_section_count
            .saturating_add(other.empty_section_count);
        self.untitled_section_count = self
            .untitled_section_count
            .saturating_add(other.untitled_section_count);
        self.paragraph_count = self.paragraph_count.saturating_add(other.paragraph_count);
        self.sentence_count = self.sentence_count.saturating_add(other.sentence_count);
        self.word_count = self.word_count.saturating_add(other.word_count);
        self.char_count = self.char_count.saturating_add(other.char_count);
    }
}

fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
