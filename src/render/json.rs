//! JSON rendering for document hierarchies.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
///
/// Keys appear in tree order (`Document`, `Sections`, `Title`,
/// `Paragraphs`, `Paragraph`, `Sentences`); non-ASCII text is kept as is.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write a document as JSON to a file, replacing any existing content.
pub fn write_json<P: AsRef<Path>>(doc: &Document, path: P, format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    let result = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, doc),
        JsonFormat::Compact => serde_json::to_writer(&mut writer, doc),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    writer.write_all(b"\n")?;
    writer.flush()?;
    log::info!("Document hierarchy saved to {}", path.display());
    Ok(())
}

/// Parse a hierarchy previously written with [`to_json`] or [`write_json`].
pub fn from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}
