//! # unlayout
//!
//! Rebuild the logical structure of a PDF or scanned document from the
//! output of a layout-analysis service.
//!
//! A layout service reports a flat list of recognized paragraphs, each
//! with text, an optional role (`title`, `sectionHeading`, ...) and a
//! position. This library puts them in reading order and folds them into
//! a Document → Section → Paragraph → Sentence tree.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlayout::{build_from_analysis_file, render, HierarchyOptions};
//!
//! fn main() -> unlayout::Result<()> {
//!     // Load a saved analysis result and rebuild its hierarchy
//!     let doc = build_from_analysis_file("paper.analysis.json", &HierarchyOptions::default())?;
//!
//!     // Serialize the tree
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable heading detection**: role-based, shape-based, or any closure
//! - **Two reading-order schemes**: span offsets or page position
//! - **Sentence splitting**: built-in rule tokenizer, or inject your own
//! - **Batch processing**: independent documents built in parallel with Rayon
//! - **Output formats**: JSON, Markdown, plain text

pub mod analysis;
pub mod detect;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use analysis::{AnalyzeResult, LayoutAnalyzer, ReplayAnalyzer};
pub use detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
pub use error::{Error, Result};
pub use hierarchy::{
    ClassifierKind, ExtendedRoleClassifier, HeadingClassifier, HierarchyBuilder, HierarchyOptions,
    OrderingScheme, RoleClassifier, ShapeClassifier,
};
pub use model::{
    BoundingBox, Document, Paragraph, ParagraphRole, Point, RecognizedParagraph, Section, Span,
    UNTITLED_SECTION,
};
pub use render::{HierarchyStats, JsonFormat, RenderOptions};
pub use text::{RuleTokenizer, SentenceTokenizer};

use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

use hierarchy::{order_paragraphs, validate_order};

/// Build a hierarchy from an analysis result stored as JSON.
///
/// # Arguments
///
/// * `name` - Document name recorded in the hierarchy
/// * `json` - Service response, either the envelope or the bare result
/// * `options` - Hierarchy options
pub fn build_from_analysis_json(
    name: &str,
    json: &str,
    options: &HierarchyOptions,
) -> Result<Document> {
    let result = AnalyzeResult::from_json(json)?;
    Unlayout::with_options(options.clone()).build_analysis(name, &result)
}

/// Build a hierarchy from an analysis result file.
///
/// The document is named after the file's base name.
///
/// # Example
///
/// ```no_run
/// use unlayout::{build_from_analysis_file, HierarchyOptions, OrderingScheme};
///
/// let options = HierarchyOptions::new().with_ordering(OrderingScheme::Spatial);
/// let doc = build_from_analysis_file("scan.json", &options).unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn build_from_analysis_file<P: AsRef<Path>>(
    path: P,
    options: &HierarchyOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    build_from_analysis_json(&document_name(path), &json, options)
}

/// Convert an analysis result file to hierarchy JSON with default options.
///
/// # Example
///
/// ```no_run
/// use unlayout::{to_json, JsonFormat};
///
/// let json = to_json("paper.analysis.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("paper.hierarchy.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = build_from_analysis_file(path, &HierarchyOptions::default())?;
    render::to_json(&doc, format)
}

/// Name a document after the base name of its path.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Builder for ordering, validating and folding recognized paragraphs.
///
/// # Example
///
/// ```
/// use unlayout::{ClassifierKind, RecognizedParagraph, Unlayout};
///
/// let paragraphs = vec![
///     RecognizedParagraph::new("Body before any heading.").with_span(20, 24),
///     RecognizedParagraph::new("Title").with_role("title").with_span(0, 5),
/// ];
/// let doc = Unlayout::new()
///     .with_classifier(ClassifierKind::Role)
///     .build("notes.pdf", paragraphs)?;
///
/// assert_eq!(doc.sections[0].title, "Title");
/// # Ok::<(), unlayout::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Unlayout {
    options: HierarchyOptions,
    classifier: Option<Arc<dyn HeadingClassifier>>,
    tokenizer: Option<Arc<dyn SentenceTokenizer>>,
}

impl Unlayout {
    /// Create a new Unlayout builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from hierarchy options.
    pub fn with_options(options: HierarchyOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Select a built-in heading classifier.
    pub fn with_classifier(mut self, kind: ClassifierKind) -> Self {
        self.options = self.options.with_classifier(kind);
        self.classifier = None;
        self
    }

    /// Use a custom heading classifier.
    pub fn with_custom_classifier(mut self, classifier: impl HeadingClassifier + 'static) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Set the reading-order scheme.
    pub fn with_ordering(mut self, ordering: OrderingScheme) -> Self {
        self.options = self.options.with_ordering(ordering);
        self
    }

    /// Trust the input order; it is validated instead of sorted.
    pub fn presorted(mut self) -> Self {
        self.options = self.options.presorted();
        self
    }

    /// Set the heading length bound of the shape classifier.
    pub fn with_heading_max_chars(mut self, max_chars: usize) -> Self {
        self.options = self.options.with_heading_max_chars(max_chars);
        self
    }

    /// Normalize paragraph text to Unicode NFC.
    pub fn normalize_unicode(mut self) -> Self {
        self.options = self.options.with_unicode_normalization(true);
        self
    }

    /// Use a custom sentence tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl SentenceTokenizer + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Get the options in effect.
    pub fn options(&self) -> &HierarchyOptions {
        &self.options
    }

    fn hierarchy_builder(&self) -> HierarchyBuilder {
        let mut builder = match &self.classifier {
            Some(classifier) => HierarchyBuilder::with_shared_classifier(classifier.clone())
                .with_unicode_normalization(self.options.normalize_unicode),
            None => HierarchyBuilder::from_options(&self.options),
        };
        if let Some(tokenizer) = &self.tokenizer {
            builder = builder.with_shared_tokenizer(tokenizer.clone());
        }
        builder
    }

    /// Order (or validate) paragraphs and build the hierarchy.
    pub fn build(&self, name: &str, paragraphs: Vec<RecognizedParagraph>) -> Result<Document> {
        let ordering = self.options.ordering;
        let ordered = if self.options.sort {
            order_paragraphs(paragraphs, ordering)?
        } else {
            validate_order(&paragraphs, ordering)?;
            paragraphs
        };
        Ok(self.hierarchy_builder().build(name, &ordered))
    }

    /// Build the hierarchy of an analysis result.
    pub fn build_analysis(&self, name: &str, result: &AnalyzeResult) -> Result<Document> {
        self.build(name, result.to_paragraphs()?)
    }

    /// Detect the source format, run the analyzer, and build the hierarchy.
    ///
    /// Analyzer failures are returned as-is; they never yield an empty tree.
    pub fn process(
        &self,
        analyzer: &dyn LayoutAnalyzer,
        name: &str,
        data: &[u8],
    ) -> Result<Document> {
        let format = detect_format_from_bytes(data)?;
        log::info!("Analyzing {} ({}) with {}", name, format, analyzer.name());

        let paragraphs = analyzer.analyze(data, format).map_err(|e| {
            log::error!("Layout analysis of {} failed: {}", name, e);
            e
        })?;
        self.build(name, paragraphs)
    }

    /// Build many independent documents in parallel.
    ///
    /// Returns one result per input, in input order.
    pub fn build_many(
        &self,
        inputs: Vec<(String, Vec<RecognizedParagraph>)>,
    ) -> Vec<Result<Document>> {
        inputs
            .into_par_iter()
            .map(|(name, paragraphs)| self.build(&name, paragraphs))
            .collect()
    }

    /// Build hierarchies for many analysis result files in parallel.
    ///
    /// A failing file does not affect the others.
    pub fn build_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<Document>> {
        paths
            .par_iter()
            .map(|path| -> Result<Document> {
                let path = path.as_ref();
                let json = std::fs::read_to_string(path)?;
                let result = AnalyzeResult::from_json(&json)?;
                self.build_analysis(&document_name(path), &result)
            })
            .collect()
    }
}

impl std::fmt::Debug for Unlayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unlayout")
            .field("options", &self.options)
            .field("custom_classifier", &self.classifier.is_some())
            .field("custom_tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanned(content: &str, role: &str, offset: usize) -> RecognizedParagraph {
        RecognizedParagraph::new(content)
            .with_role(role)
            .with_span(offset, content.len())
    }

    #[test]
    fn test_unlayout_builder() {
        let unlayout = Unlayout::new()
            .with_classifier(ClassifierKind::Shape)
            .with_ordering(OrderingScheme::Spatial)
            .normalize_unicode()
            .presorted();

        assert_eq!(unlayout.options().classifier, ClassifierKind::Shape);
        assert_eq!(unlayout.options().ordering, OrderingScheme::Spatial);
        assert!(unlayout.options().normalize_unicode);
        assert!(!unlayout.options().sort);
    }

    #[test]
    fn test_unlayout_builder_default() {
        let unlayout = Unlayout::default();
        assert_eq!(unlayout.options().classifier, ClassifierKind::Role);
        assert!(unlayout.options().sort);
    }

    #[test]
    fn test_build_sorts_by_span() {
        let doc = Unlayout::new()
            .build(
                "d",
                vec![
                    spanned("Later text.", "body", 30),
                    spanned("Heading", "title", 0),
                    spanned("Early text.", "body", 10),
                ],
            )
            .unwrap();

        assert_eq!(doc.titles(), vec!["Heading"]);
        let texts: Vec<_> = doc.paragraphs().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["Early text.", "Later text."]);
    }

    #[test]
    fn test_presorted_rejects_unsorted_input() {
        let result = Unlayout::new()
            .presorted()
            .build("d", vec![spanned("b", "body", 5), spanned("a", "body", 1)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_missing_order_key_rejected() {
        let result = Unlayout::new().build("d", vec![RecognizedParagraph::new("no span")]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_custom_classifier_and_tokenizer() {
        let doc = Unlayout::new()
            .with_custom_classifier(|p: &RecognizedParagraph| p.trimmed().starts_with("##"))
            .with_tokenizer(|text: &str| vec![text.to_uppercase()])
            .build("d", vec![spanned("## Top", "body", 0), spanned("body", "body", 9)])
            .unwrap();

        assert_eq!(doc.sections[0].title, "## Top");
        assert_eq!(doc.sections[0].paragraphs[0].sentences, vec!["BODY"]);
    }

    #[test]
    fn test_build_from_analysis_json() {
        let json = r#"{"analyzeResult": {"paragraphs": [
            {"content": "Summary", "role": "title", "spans": [{"offset": 0, "length": 7}]},
            {"content": "It works. Mostly.", "spans": [{"offset": 8, "length": 17}]}
        ]}}"#;
        let doc = build_from_analysis_json("r.pdf", json, &HierarchyOptions::default()).unwrap();

        assert_eq!(doc.name, "r.pdf");
        assert_eq!(doc.sections[0].paragraphs[0].sentences, vec!["It works.", "Mostly."]);
    }

    #[test]
    fn test_build_many_keeps_order_and_isolates_failures() {
        let results = Unlayout::new().build_many(vec![
            ("a".to_string(), vec![spanned("A text.", "body", 0)]),
            ("b".to_string(), vec![RecognizedParagraph::new("no span")]),
            ("c".to_string(), vec![]),
        ]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "a");
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_document_name() {
        assert_eq!(document_name(Path::new("/tmp/x/report.json")), "report.json");
        assert_eq!(document_name(Path::new("plain")), "plain");
    }
}
