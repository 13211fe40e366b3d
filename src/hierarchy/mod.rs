//! Document hierarchy reconstruction.
//!
//! Turns a flat sequence of [`RecognizedParagraph`]s into a
//! Document → Section → Paragraph → Sentence tree in one left-to-right
//! pass. Which paragraphs count as headings is decided by a pluggable
//! [`HeadingClassifier`]; how raw paragraphs are put into reading order
//! is decided by an [`OrderingScheme`].
//!
//! # Example
//!
//! ```
//! use unlayout::hierarchy::{build, ShapeClassifier};
//! use unlayout::model::RecognizedParagraph;
//!
//! let paragraphs = vec![
//!     RecognizedParagraph::new("Introduction:"),
//!     RecognizedParagraph::new("This is the first sentence. This is the second.")
//!         .with_role("body"),
//! ];
//! let doc = build(&paragraphs, "paper.pdf", ShapeClassifier::new());
//!
//! assert_eq!(doc.sections[0].title, "Introduction:");
//! assert_eq!(doc.sections[0].paragraphs[0].sentences.len(), 2);
//! ```

mod builder;
mod classify;
mod options;
mod order;

pub use builder::HierarchyBuilder;
pub use classify::{
    ClassifierKind, ExtendedRoleClassifier, HeadingClassifier, RoleClassifier, ShapeClassifier,
    DEFAULT_HEADING_MAX_CHARS,
};
pub use options::HierarchyOptions;
pub use order::{order_paragraphs, validate_order, OrderKey, OrderingScheme};

use crate::model::{Document, RecognizedParagraph};

/// Build a document from paragraphs already in reading order, using the
/// default sentence tokenizer.
pub fn build<'a, I>(
    paragraphs: I,
    document_name: impl Into<String>,
    classifier: impl HeadingClassifier + 'static,
) -> Document
where
    I: IntoIterator<Item = &'a RecognizedParagraph>,
{
    HierarchyBuilder::new(classifier).build(document_name, paragraphs)
}
