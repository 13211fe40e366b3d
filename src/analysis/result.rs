//! Serde model of a layout-analysis result.
//!
//! Mirrors the JSON the document-analysis service returns for the
//! `prebuilt-layout` model. Only the fields the hierarchy needs are kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{BoundingBox, Point, RecognizedParagraph, Span};

/// The `analyzeResult` object of a completed analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    /// Service API version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Model that produced the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Recognized paragraphs, in analysis order
    #[serde(default)]
    pub paragraphs: Vec<AnalyzedParagraph>,
}

/// A paragraph as reported by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedParagraph {
    /// Text content
    #[serde(default)]
    pub content: Option<String>,

    /// Semantic role (`title`, `sectionHeading`, `pageHeader`, ...)
    #[serde(default)]
    pub role: Option<String>,

    /// Regions the paragraph covers
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,

    /// Ranges of the paragraph in the flattened document content
    #[serde(default)]
    pub spans: Vec<Span>,
}

/// A polygon on one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Polygon vertices
    #[serde(alias = "boundingBox")]
    pub polygon: Polygon,
}

/// Polygon encodings seen in service output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Polygon {
    /// Flat `[x1, y1, x2, y2, ...]` list
    Flat(Vec<f64>),
    /// List of `{x, y}` points
    Points(Vec<Point>),
}

impl BoundingRegion {
    /// Convert to a [`BoundingBox`].
    pub fn to_bounding_box(&self) -> BoundingBox {
        match &self.polygon {
            Polygon::Flat(coords) => BoundingBox::from_flat(self.page_number, coords),
            Polygon::Points(points) => BoundingBox::new(self.page_number, points.clone()),
        }
    }
}

impl AnalyzeResult {
    /// Parse a result from JSON.
    ///
    /// Accepts either the bare `analyzeResult` object or the full
    /// operation response wrapping it. A response whose status reports
    /// failure is an [`Error::Analysis`].
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a result from an already-decoded JSON value.
    pub fn from_value(mut value: Value) -> Result<Self> {
        let status = value.get("status").map(|s| s.as_str().unwrap_or_default());
        if let Some(status) = status {
            if status.eq_ignore_ascii_case("failed") {
                let message = value
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("analysis failed");
                return Err(Error::Analysis(message.to_string()));
            }
            if !status.eq_ignore_ascii_case("succeeded") {
                return Err(Error::Analysis(format!(
                    "analysis has not completed (status: {})",
                    status
                )));
            }
        }

        let is_envelope = status.is_some();
        let inner = match value
            .as_object_mut()
            .and_then(|map| map.remove("analyzeResult"))
        {
            Some(inner) => inner,
            None if is_envelope => Value::Null,
            None => value,
        };
        if inner.is_null() {
            return Err(Error::Analysis("analysis response has no result".to_string()));
        }
        Ok(serde_json::from_value(inner)?)
    }

    /// Number of paragraphs reported.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Convert to recognized paragraphs, keeping analysis order.
    ///
    /// The first bounding region and the first span of each paragraph
    /// are used. A paragraph without `content` is invalid input.
    pub fn to_paragraphs(&self) -> Result<Vec<RecognizedParagraph>> {
        self.paragraphs
            .iter()
            .enumerate()
            .map(|(index, p)| p.to_recognized(index))
            .collect()
    }
}

impl AnalyzedParagraph {
    fn to_recognized(&self, index: usize) -> Result<RecognizedParagraph> {
        let content = self.content.as_ref().ok_or_else(|| {
            Error::InvalidInput(format!("paragraph {} has no content", index))
        })?;

        let mut paragraph = RecognizedParagraph::new(content.clone());
        if let Some(role) = self.role.as_deref() {
            paragraph = paragraph.with_role(role);
        }
        if let Some(region) = self.bounding_regions.first() {
            paragraph = paragraph.with_bounding_box(region.to_bounding_box());
        }
        if let Some(span) = self.spans.first() {
            paragraph = paragraph.with_span(span.offset, span.length);
        }
        Ok(paragraph)
    }
}
