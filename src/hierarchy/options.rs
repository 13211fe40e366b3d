//! Hierarchy building options and configuration.

use std::sync::Arc;

use super::{
    ClassifierKind, HeadingClassifier, OrderingScheme, RoleClassifier, DEFAULT_HEADING_MAX_CHARS,
};

/// Options for building a document hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyOptions {
    /// Heading classification strategy. The default ([`ClassifierKind::Role`])
    /// is a placeholder, not a recommendation; set it explicitly.
    pub classifier: ClassifierKind,

    /// Roles the role classifier treats as headings in addition to
    /// title, subtitle, heading and header (e.g. `sectionHeading`)
    pub extra_heading_roles: Vec<String>,

    /// Reading-order scheme
    pub ordering: OrderingScheme,

    /// Sort paragraphs before building. When disabled the input must
    /// already be in reading order and is only validated.
    pub sort: bool,

    /// Exclusive length bound for colon-terminated headings
    pub heading_max_chars: usize,

    /// Normalize paragraph text to Unicode NFC
    pub normalize_unicode: bool,
}

impl HierarchyOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classification strategy.
    pub fn with_classifier(mut self, classifier: ClassifierKind) -> Self {
        self.classifier = classifier;
        self
    }

    /// Treat additional roles as headings under [`ClassifierKind::Role`].
    pub fn with_extra_heading_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_heading_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Set the ordering scheme.
    pub fn with_ordering(mut self, ordering: OrderingScheme) -> Self {
        self.ordering = ordering;
        self
    }

    /// Trust the input order instead of sorting (it is still validated).
    pub fn presorted(mut self) -> Self {
        self.sort = false;
        self
    }

    /// Set the heading length bound used by the shape classifier.
    pub fn with_heading_max_chars(mut self, max_chars: usize) -> Self {
        self.heading_max_chars = max_chars;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Instantiate the configured heading classifier.
    pub fn heading_classifier(&self) -> Arc<dyn HeadingClassifier> {
        match self.classifier {
            ClassifierKind::Role if !self.extra_heading_roles.is_empty() => {
                Arc::new(RoleClassifier.with_extra_roles(&self.extra_heading_roles))
            }
            kind => kind.classifier(self.heading_max_chars),
        }
    }
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::Role,
            extra_heading_roles: Vec::new(),
            ordering: OrderingScheme::SpanOffset,
            sort: true,
            heading_max_chars: DEFAULT_HEADING_MAX_CHARS,
            normalize_unicode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecognizedParagraph;

    #[test]
    fn test_options_builder() {
        let options = HierarchyOptions::new()
            .with_classifier(ClassifierKind::Shape)
            .with_ordering(OrderingScheme::Spatial)
            .with_heading_max_chars(60)
            .with_unicode_normalization(true)
            .presorted();

        assert_eq!(options.classifier, ClassifierKind::Shape);
        assert_eq!(options.ordering, OrderingScheme::Spatial);
        assert_eq!(options.heading_max_chars, 60);
        assert!(options.normalize_unicode);
        assert!(!options.sort);
    }

    #[test]
    fn test_default_options() {
        let options = HierarchyOptions::default();
        assert_eq!(options.classifier, ClassifierKind::Role);
        assert_eq!(options.ordering, OrderingScheme::SpanOffset);
        assert!(options.sort);
        assert_eq!(options.heading_max_chars, 100);
        assert!(!options.normalize_unicode);
        assert!(options.extra_heading_roles.is_empty());
    }

    #[test]
    fn test_extra_heading_roles() {
        let heading = RecognizedParagraph::new("Methods").with_role("sectionHeading");

        assert!(!HierarchyOptions::new().heading_classifier().is_heading(&heading));

        let options = HierarchyOptions::new().with_extra_heading_roles(["sectionHeading"]);
        assert!(options.heading_classifier().is_heading(&heading));

        let shape = options.with_classifier(ClassifierKind::Shape);
        assert!(!shape.heading_classifier().is_heading(&heading));
    }
}
