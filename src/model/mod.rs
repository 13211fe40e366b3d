//! Document model types.
//!
//! Two families of types live here: the flat records a layout-analysis
//! service reports ([`RecognizedParagraph`] and friends), and the
//! Document → Section → Paragraph → Sentence tree built from them.

mod document;
mod paragraph;
mod recognized;
mod section;

pub use document::Document;
pub use paragraph::Paragraph;
pub use recognized::{BoundingBox, ParagraphRole, Point, RecognizedParagraph, Span};
pub use section::{Section, UNTITLED_SECTION};
