//! Heading classification strategies.

use crate::error::{Error, Result};
use crate::model::{ParagraphRole, RecognizedParagraph};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default upper bound (exclusive, in characters) for colon-terminated headings.
pub const DEFAULT_HEADING_MAX_CHARS: usize = 100;

/// Decides whether a recognized paragraph starts a new section.
///
/// Closures of type `Fn(&RecognizedParagraph) -> bool` implement this
/// trait, so ad-hoc strategies can be injected without a new type.
pub trait HeadingClassifier: Send + Sync {
    /// Return `true` if the paragraph is a heading.
    fn is_heading(&self, paragraph: &RecognizedParagraph) -> bool;
}

impl<F> HeadingClassifier for F
where
    F: Fn(&RecognizedParagraph) -> bool + Send + Sync,
{
    fn is_heading(&self, paragraph: &RecognizedParagraph) -> bool {
        self(paragraph)
    }
}

/// Headings are paragraphs whose role is title, subtitle, heading or header.
///
/// Other roles, including the service's `sectionHeading`, are body text
/// unless added with [`RoleClassifier::with_extra_roles`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleClassifier;

impl RoleClassifier {
    /// Also treat the named roles (case-insensitive) as headings.
    pub fn with_extra_roles<I, S>(self, roles: I) -> ExtendedRoleClassifier
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExtendedRoleClassifier {
            extra_roles: roles
                .into_iter()
                .map(|r| r.as_ref().trim().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }
}

impl HeadingClassifier for RoleClassifier {
    fn is_heading(&self, paragraph: &RecognizedParagraph) -> bool {
        paragraph.role.as_ref().is_some_and(ParagraphRole::is_heading)
    }
}

/// [`RoleClassifier`] plus caller-chosen heading roles.
#[derive(Debug, Clone, Default)]
pub struct ExtendedRoleClassifier {
    extra_roles: Vec<String>,
}

impl HeadingClassifier for ExtendedRoleClassifier {
    fn is_heading(&self, paragraph: &RecognizedParagraph) -> bool {
        paragraph.role.as_ref().is_some_and(|role| {
            role.is_heading()
                || self
                    .extra_roles
                    .iter()
                    .any(|extra| role.as_str().eq_ignore_ascii_case(extra))
        })
    }
}

/// Headings are titles, or short paragraphs ending in a colon.
#[derive(Debug, Clone, Copy)]
pub struct ShapeClassifier {
    max_chars: usize,
}

impl ShapeClassifier {
    /// Create a classifier with the default length bound.
    pub fn new() -> Self {
        Self {
            max_chars: DEFAULT_HEADING_MAX_CHARS,
        }
    }

    /// Set the exclusive length bound for colon-terminated headings.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingClassifier for ShapeClassifier {
    fn is_heading(&self, paragraph: &RecognizedParagraph) -> bool {
        if paragraph.has_role(&ParagraphRole::Title) {
            return true;
        }
        let content = paragraph.trimmed();
        content.ends_with(':') && content.chars().count() < self.max_chars
    }
}

/// Built-in classifier strategies, selectable from configuration.
///
/// Neither strategy is more correct than the other; which one fits
/// depends on the layout service and the documents. `Role` is the
/// `Default` only so option structs can be built without one, and
/// callers should choose explicitly (the CLI requires it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// [`RoleClassifier`]
    #[default]
    Role,
    /// [`ShapeClassifier`]
    Shape,
}

impl ClassifierKind {
    /// Instantiate the strategy.
    ///
    /// `heading_max_chars` only affects [`ClassifierKind::Shape`].
    pub fn classifier(self, heading_max_chars: usize) -> Arc<dyn HeadingClassifier> {
        match self {
            ClassifierKind::Role => Arc::new(RoleClassifier),
            ClassifierKind::Shape => {
                Arc::new(ShapeClassifier::new().with_max_chars(heading_max_chars))
            }
        }
    }

    /// Strategy name.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassifierKind::Role => "role",
            ClassifierKind::Shape => "shape",
        }
    }
}

impl FromStr for ClassifierKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "role" => Ok(ClassifierKind::Role),
            "shape" | "heuristic" => Ok(ClassifierKind::Shape),
            other => Err(Error::Other(format!("Unknown classifier: {}", other))),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_classifier() {
        let c = RoleClassifier;
        for role in ["title", "Subtitle", "HEADING", "header"] {
            assert!(c.is_heading(&RecognizedParagraph::new("x").with_role(role)), "{role}");
        }
        assert!(!c.is_heading(&RecognizedParagraph::new("x").with_role("body")));
        assert!(!c.is_heading(&RecognizedParagraph::new("x").with_role("sectionHeading")));
        assert!(!c.is_heading(&RecognizedParagraph::new("x").with_role("pageHeader")));
        assert!(!c.is_heading(&RecognizedParagraph::new("Intro:")));
    }

    #[test]
    fn test_extra_roles_are_opt_in() {
        let c = RoleClassifier.with_extra_roles(["sectionHeading", " "]);
        assert!(c.is_heading(&RecognizedParagraph::new("x").with_role("sectionHeading")));
        assert!(c.is_heading(&RecognizedParagraph::new("x").with_role("SECTIONHEADING")));
        assert!(c.is_heading(&RecognizedParagraph::new("x").with_role("title")));
        assert!(!c.is_heading(&RecognizedParagraph::new("x").with_role("pageHeader")));
        assert!(!c.is_heading(&RecognizedParagraph::new("x").with_role("body")));
        assert!(!c.is_heading(&RecognizedParagraph::new("x")));
    }

    #[test]
    fn test_shape_classifier_colon() {
        let c = ShapeClassifier::new();
        assert!(c.is_heading(&RecognizedParagraph::new("Introduction:")));
        assert!(c.is_heading(&RecognizedParagraph::new("  Methods:  ")));
        assert!(!c.is_heading(&RecognizedParagraph::new("Introduction")));
        assert!(!c.is_heading(&RecognizedParagraph::new("Intro").with_role("heading")));
    }

    #[test]
    fn test_shape_classifier_length_bound() {
        let c = ShapeClassifier::new();
        let just_under = format!("{}:", "a".repeat(98));
        let at_bound = format!("{}:", "a".repeat(99));
        assert!(c.is_heading(&RecognizedParagraph::new(just_under)));
        assert!(!c.is_heading(&RecognizedParagraph::new(at_bound)));
    }

    #[test]
    fn test_shape_classifier_long_title_role() {
        let c = ShapeClassifier::new();
        let long = "a".repeat(300);
        assert!(c.is_heading(&RecognizedParagraph::new(long).with_role("Title")));
    }

    #[test]
    fn test_closure_classifier() {
        let c = |p: &RecognizedParagraph| p.trimmed().starts_with('#');
        assert!(c.is_heading(&RecognizedParagraph::new("# Title")));
        assert!(!c.is_heading(&RecognizedParagraph::new("Body")));
    }

    #[test]
    fn test_classifier_kind_parse() {
        assert_eq!("role".parse::<ClassifierKind>().unwrap(), ClassifierKind::Role);
        assert_eq!("Shape".parse::<ClassifierKind>().unwrap(), ClassifierKind::Shape);
        assert_eq!(
            "heuristic".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::Shape
        );
        assert!("font".parse::<ClassifierKind>().is_err());
        assert_eq!(ClassifierKind::default().to_string(), "role");
    }

    #[test]
    fn test_classifier_kind_instantiates() {
        let para = RecognizedParagraph::new("Scope:");
        assert!(!ClassifierKind::Role.classifier(100).is_heading(&para));
        assert!(ClassifierKind::Shape.classifier(100).is_heading(&para));
        assert!(!ClassifierKind::Shape.classifier(3).is_heading(&para));
    }
}
