//! Rendering options for Markdown and text output.

/// Options for Markdown and plain-text rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit the document name as a top-level heading
    pub include_document_title: bool,

    /// Emit sections that have no paragraphs
    pub include_empty_sections: bool,

    /// Put each sentence on its own line instead of the paragraph text
    pub sentence_per_line: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the document title heading.
    pub fn with_document_title(mut self, include: bool) -> Self {
        self.include_document_title = include;
        self
    }

    /// Enable or disable output of sections without paragraphs.
    pub fn with_empty_sections(mut self, include: bool) -> Self {
        self.include_empty_sections = include;
        self
    }

    /// Enable or disable one-sentence-per-line output.
    pub fn with_sentence_per_line(mut self, enabled: bool) -> Self {
        self.sentence_per_line = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_document_title: true,
            include_empty_sections: true,
            sentence_per_line: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_document_title(false)
            .with_empty_sections(false)
            .with_sentence_per_line(true);

        assert!(!options.include_document_title);
        assert!(!options.include_empty_sections);
        assert!(options.sentence_per_line);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.include_document_title);
        assert!(options.include_empty_sections);
        assert!(!options.sentence_per_line);
    }
}
