//! Reading-order keys and ordering schemes.

use crate::error::{Error, Result};
use crate::model::RecognizedParagraph;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How recognized paragraphs are put into reading order.
///
/// Exactly one scheme is used per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingScheme {
    /// Sort by span offset into the analysed text
    #[default]
    SpanOffset,
    /// Sort by page, then by the top edge of the bounding box
    Spatial,
}

impl OrderingScheme {
    /// Compute the order key of a paragraph.
    ///
    /// Fails when the paragraph lacks the field this scheme needs.
    pub fn key(self, paragraph: &RecognizedParagraph) -> Result<OrderKey> {
        match self {
            OrderingScheme::SpanOffset => paragraph
                .span
                .map(|span| OrderKey::Offset(span.offset))
                .ok_or_else(|| Error::InvalidInput("paragraph has no span".into())),
            OrderingScheme::Spatial => {
                let bbox = paragraph
                    .bounding_box
                    .as_ref()
                    .ok_or_else(|| Error::InvalidInput("paragraph has no bounding box".into()))?;
                let top_left = bbox.top_left().ok_or_else(|| {
                    Error::InvalidInput("paragraph bounding box has no points".into())
                })?;
                if !top_left.y.is_finite() {
                    return Err(Error::InvalidInput(format!(
                        "paragraph bounding box has non-finite coordinate {}",
                        top_left.y
                    )));
                }
                Ok(OrderKey::Position {
                    page: bbox.page,
                    y: top_left.y,
                })
            }
        }
    }

    /// Scheme name.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderingScheme::SpanOffset => "span",
            OrderingScheme::Spatial => "spatial",
        }
    }
}

impl FromStr for OrderingScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "span" | "offset" => Ok(OrderingScheme::SpanOffset),
            "spatial" | "position" => Ok(OrderingScheme::Spatial),
            other => Err(Error::Other(format!("Unknown ordering scheme: {}", other))),
        }
    }
}

impl fmt::Display for OrderingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a paragraph in reading order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderKey {
    /// Span offset
    Offset(usize),
    /// Page number and top edge
    Position {
        /// Page number (1-indexed)
        page: u32,
        /// Vertical coordinate of the top-left corner
        y: f64,
    },
}

impl OrderKey {
    /// Total order over keys. Keys of different schemes never meet in
    /// one build; offsets sort first if they do.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Offset(a), OrderKey::Offset(b)) => a.cmp(b),
            (
                OrderKey::Position { page: pa, y: ya },
                OrderKey::Position { page: pb, y: yb },
            ) => pa.cmp(pb).then(ya.total_cmp(yb)),
            (OrderKey::Offset(_), OrderKey::Position { .. }) => Ordering::Less,
            (OrderKey::Position { .. }, OrderKey::Offset(_)) => Ordering::Greater,
        }
    }
}

fn keyed(paragraphs: &[RecognizedParagraph], scheme: OrderingScheme) -> Result<Vec<OrderKey>> {
    paragraphs
        .iter()
        .enumerate()
        .map(|(index, paragraph)| {
            scheme.key(paragraph).map_err(|e| match e {
                Error::InvalidInput(msg) => {
                    Error::InvalidInput(format!("{} (paragraph {})", msg, index))
                }
                other => other,
            })
        })
        .collect()
}

/// Sort paragraphs into reading order.
///
/// The sort is stable: paragraphs with equal keys keep the order the
/// analysis service reported them in.
pub fn order_paragraphs(
    paragraphs: Vec<RecognizedParagraph>,
    scheme: OrderingScheme,
) -> Result<Vec<RecognizedParagraph>> {
    let keys = keyed(&paragraphs, scheme)?;
    let mut pairs: Vec<_> = keys.into_iter().zip(paragraphs).collect();
    pairs.sort_by(|(a, _), (b, _)| a.compare(b));

    log::debug!("Ordered {} paragraphs by {}", pairs.len(), scheme);
    Ok(pairs.into_iter().map(|(_, p)| p).collect())
}

/// Check that every paragraph carries a key and the sequence is non-decreasing.
pub fn validate_order(paragraphs: &[RecognizedParagraph], scheme: OrderingScheme) -> Result<()> {
    let keys = keyed(paragraphs, scheme)?;
    for (index, pair) in keys.windows(2).enumerate() {
        if pair[0].compare(&pair[1]) == Ordering::Greater {
            return Err(Error::InvalidInput(format!(
                "paragraph {} is out of {} order",
                index + 1,
                scheme
            )));
        }
    }
    Ok(())
}
