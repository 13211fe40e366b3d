//! Plain text rendering for document hierarchies.

use crate::error::Result;
use crate::model::Document;

use super::markdown::{paragraph_block, sections};
use super::RenderOptions;

/// Convert a document to plain text.
///
/// Section titles and paragraphs are separated by blank lines; the
/// document name is not included.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut blocks = Vec::new();

    for section in sections(doc, options) {
        blocks.push(section.title.clone());
        blocks.extend(section.paragraphs.iter().map(|p| paragraph_block(p, options)));
    }

    Ok(blocks.join("\n\n").trim().to_string())
}
