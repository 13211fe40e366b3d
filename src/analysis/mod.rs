//! Boundary with the layout-analysis service.
//!
//! The service itself is external: implement [`LayoutAnalyzer`] around a
//! client for it, constructed with whatever configuration (endpoint,
//! credentials) that client needs. Results saved from the service can be
//! loaded with [`AnalyzeResult::from_json`] and replayed through
//! [`ReplayAnalyzer`].

mod result;

pub use result::{AnalyzeResult, AnalyzedParagraph, BoundingRegion, Polygon};

use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::RecognizedParagraph;

/// A page-understanding engine that recognizes paragraphs in a document.
///
/// Paragraphs are returned in analysis order, which need not be reading
/// order. Service failures are reported as [`crate::Error::Analysis`].
pub trait LayoutAnalyzer: Send + Sync {
    /// Name of the analyzer, used in logs.
    fn name(&self) -> &str;

    /// Analyze a document and return its recognized paragraphs.
    fn analyze(&self, data: &[u8], format: SourceFormat) -> Result<Vec<RecognizedParagraph>>;
}

/// Analyzer that returns a previously saved result regardless of input.
#[derive(Debug, Clone)]
pub struct ReplayAnalyzer {
    result: AnalyzeResult,
}

impl ReplayAnalyzer {
    /// Replay the given result.
    pub fn new(result: AnalyzeResult) -> Self {
        Self { result }
    }

    /// Replay a result stored as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(AnalyzeResult::from_json(json)?))
    }
}

impl LayoutAnalyzer for ReplayAnalyzer {
    fn name(&self) -> &str {
        "replay"
    }

    fn analyze(&self, _data: &[u8], format: SourceFormat) -> Result<Vec<RecognizedParagraph>> {
        log::debug!(
            "Replaying {} saved paragraphs for {} input",
            self.result.paragraph_count(),
            format
        );
        self.result.to_paragraphs()
    }
}
