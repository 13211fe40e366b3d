//! Recognized paragraphs as reported by a layout-analysis service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A paragraph recognized on a page, before any hierarchy is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedParagraph {
    /// Recognized text content (may carry surrounding whitespace)
    pub content: String,

    /// Semantic role assigned by the analysis service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ParagraphRole>,

    /// Region the paragraph occupies on its page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Position of the paragraph in the service's flattened text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl RecognizedParagraph {
    /// Create a paragraph with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: None,
            bounding_box: None,
            span: None,
        }
    }

    /// Set the semantic role.
    pub fn with_role(mut self, role: impl Into<ParagraphRole>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the bounding box.
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Set the text span.
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.span = Some(Span { offset, length });
        self
    }

    /// Content with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Check if the paragraph has no visible content.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Check if the paragraph carries the given role.
    pub fn has_role(&self, role: &ParagraphRole) -> bool {
        self.role.as_ref() == Some(role)
    }
}

/// Semantic role of a recognized paragraph.
///
/// Parsed case-insensitively. Roles the hierarchy does not care about are
/// kept verbatim in [`ParagraphRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParagraphRole {
    /// Document title
    Title,
    /// Subtitle
    Subtitle,
    /// Heading
    Heading,
    /// Header
    Header,
    /// Ordinary body text
    Body,
    /// Any other role (`sectionHeading`, page header/footer, footnote, ...),
    /// spelled as the service reported it
    Other(String),
}

impl ParagraphRole {
    /// Parse a role name.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "title" => ParagraphRole::Title,
            "subtitle" => ParagraphRole::Subtitle,
            "heading" => ParagraphRole::Heading,
            "header" => ParagraphRole::Header,
            "body" | "" => ParagraphRole::Body,
            _ => ParagraphRole::Other(name.trim().to_string()),
        }
    }

    /// Role name as it appears in serialized form.
    pub fn as_str(&self) -> &str {
        match self {
            ParagraphRole::Title => "title",
            ParagraphRole::Subtitle => "subtitle",
            ParagraphRole::Heading => "heading",
            ParagraphRole::Header => "header",
            ParagraphRole::Body => "body",
            ParagraphRole::Other(name) => name,
        }
    }

    /// Check if the role marks a structural heading.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            ParagraphRole::Title
                | ParagraphRole::Subtitle
                | ParagraphRole::Heading
                | ParagraphRole::Header
        )
    }
}

impl From<&str> for ParagraphRole {
    fn from(name: &str) -> Self {
        ParagraphRole::parse(name)
    }
}

impl From<String> for ParagraphRole {
    fn from(name: String) -> Self {
        ParagraphRole::parse(&name)
    }
}

impl From<ParagraphRole> for String {
    fn from(role: ParagraphRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for ParagraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downwards)
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Polygon enclosing a paragraph on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Page number (1-indexed)
    #[serde(default = "first_page")]
    pub page: u32,

    /// Polygon corners, starting at the top-left
    pub points: Vec<Point>,
}

fn first_page() -> u32 {
    1
}

impl BoundingBox {
    /// Create a bounding box on the given page.
    pub fn new(page: u32, points: Vec<Point>) -> Self {
        Self { page, points }
    }

    /// Build from a flat `[x1, y1, x2, y2, ...]` coordinate list.
    ///
    /// A trailing unpaired coordinate is ignored.
    pub fn from_flat(page: u32, coords: &[f64]) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self { page, points }
    }

    /// The top-left corner, if the polygon has any points.
    pub fn top_left(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

/// Byte range of a paragraph within the analysed document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Offset of the first character
    pub offset: usize,
    /// Length of the range
    #[serde(default)]
    pub length: usize,
}
