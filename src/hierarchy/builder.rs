//! Single-pass fold from ordered paragraphs to a section tree.

use std::borrow::Cow;
use std::sync::Arc;

use super::{order_paragraphs, validate_order, HeadingClassifier, HierarchyOptions};
use crate::error::Result;
use crate::model::{Document, Paragraph, RecognizedParagraph, Section};
use crate::text::{normalize_nfc, RuleTokenizer, SentenceTokenizer};

/// Builds Document → Section → Paragraph → Sentence trees.
///
/// A builder holds no per-document state; one instance can serve any
/// number of builds, including concurrent ones.
#[derive(Clone)]
pub struct HierarchyBuilder {
    classifier: Arc<dyn HeadingClassifier>,
    tokenizer: Arc<dyn SentenceTokenizer>,
    normalize_unicode: bool,
}

impl HierarchyBuilder {
    /// Create a builder with the given classifier and the default tokenizer.
    pub fn new(classifier: impl HeadingClassifier + 'static) -> Self {
        Self::with_shared_classifier(Arc::new(classifier))
    }

    /// Create a builder from a shared classifier.
    pub fn with_shared_classifier(classifier: Arc<dyn HeadingClassifier>) -> Self {
        Self {
            classifier,
            tokenizer: Arc::new(RuleTokenizer::new()),
            normalize_unicode: false,
        }
    }

    /// Create a builder configured from options.
    pub fn from_options(options: &HierarchyOptions) -> Self {
        Self::with_shared_classifier(options.heading_classifier())
            .with_unicode_normalization(options.normalize_unicode)
    }

    /// Replace the sentence tokenizer.
    pub fn with_tokenizer(self, tokenizer: impl SentenceTokenizer + 'static) -> Self {
        self.with_shared_tokenizer(Arc::new(tokenizer))
    }

    /// Replace the sentence tokenizer with a shared one.
    pub fn with_shared_tokenizer(mut self, tokenizer: Arc<dyn SentenceTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Enable or disable NFC normalization of paragraph text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Fold paragraphs, already in reading order, into a document.
    ///
    /// Blank paragraphs are skipped. A heading opens a new section; body
    /// text before the first heading goes into a single untitled section.
    pub fn build<'a, I>(&self, name: impl Into<String>, paragraphs: I) -> Document
    where
        I: IntoIterator<Item = &'a RecognizedParagraph>,
    {
        let mut document = Document::new(name);

        for (index, paragraph) in paragraphs.into_iter().enumerate() {
            let trimmed = paragraph.trimmed();
            if trimmed.is_empty() {
                log::debug!("Skipping blank paragraph {}", index);
                continue;
            }

            let content = if self.normalize_unicode {
                Cow::Owned(normalize_nfc(trimmed))
            } else {
                Cow::Borrowed(trimmed)
            };

            if self.classifier.is_heading(paragraph) {
                log::debug!("Paragraph {} opens section {:?}", index, content);
                document.add_section(Section::new(content.into_owned()));
                continue;
            }

            let mut sentences = self.tokenizer.tokenize(&content);
            if sentences.is_empty() {
                log::warn!(
                    "Tokenizer returned no sentences for paragraph {}; keeping it whole",
                    index
                );
                sentences.push(content.to_string());
            }

            current_section(&mut document.sections)
                .add_paragraph(Paragraph::new(content.into_owned(), sentences));
        }

        log::debug!(
            "Built {:?}: {} sections, {} paragraphs",
            document.name,
            document.section_count(),
            document.paragraph_count()
        );
        document
    }

    /// Check that `paragraphs` are in `scheme` order, then build.
    ///
    /// Fails without building anything if a paragraph lacks the order
    /// key or the sequence is out of order.
    pub fn build_checked(
        &self,
        name: impl Into<String>,
        paragraphs: &[RecognizedParagraph],
        scheme: super::OrderingScheme,
    ) -> Result<Document> {
        validate_order(paragraphs, scheme)?;
        Ok(self.build(name, paragraphs))
    }

    /// Sort `paragraphs` by `scheme`, then build.
    pub fn build_unordered(
        &self,
        name: impl Into<String>,
        paragraphs: Vec<RecognizedParagraph>,
        scheme: super::OrderingScheme,
    ) -> Result<Document> {
        let ordered = order_paragraphs(paragraphs, scheme)?;
        Ok(self.build(name, &ordered))
    }
}

impl std::fmt::Debug for HierarchyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyBuilder")
            .field("normalize_unicode", &self.normalize_unicode)
            .finish_non_exhaustive()
    }
}

/// The section body text is appended to, opening the untitled one on first need.
fn current_section(sections: &mut Vec<Section>) -> &mut Section {
    if sections.is_empty() {
        sections.push(Section::untitled());
    }
    let last = sections.len() - 1;
    &mut sections[last]
}
