//! Markdown rendering for document hierarchies.

use crate::error::Result;
use crate::model::{Document, Paragraph, Section};

use super::RenderOptions;

/// Convert a document to Markdown.
///
/// The document name becomes a level-1 heading, each section a level-2
/// heading, and each paragraph a block of text.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut blocks = Vec::new();

    if options.include_document_title {
        blocks.push(format!("# {}", escape_heading(&doc.name)));
    }

    for section in sections(doc, options) {
        blocks.push(format!("## {}", escape_heading(&section.title)));
        blocks.extend(section.paragraphs.iter().map(|p| paragraph_block(p, options)));
    }

    let mut output = blocks.join("\n\n");
    if !output.is_empty() {
        output.push('\n');
    }
    Ok(output)
}

pub(super) fn sections<'a>(
    doc: &'a Document,
    options: &'a RenderOptions,
) -> impl Iterator<Item = &'a Section> {
    doc.sections
        .iter()
        .filter(move |s| options.include_empty_sections || !s.is_empty())
}

pub(super) fn paragraph_block(paragraph: &Paragraph, options: &RenderOptions) -> String {
    if options.sentence_per_line {
        paragraph.sentences.join("\n")
    } else {
        paragraph.text.clone()
    }
}

/// Collapse line breaks so a title stays on its heading line.
fn escape_heading(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new("paper.pdf");
        let mut intro = Section::new("Introduction:");
        intro.add_paragraph(Paragraph::new(
            "First one. Second one.",
            vec!["First one.".into(), "Second one.".into()],
        ));
        doc.add_section(intro);
        doc.add_section(Section::new("Appendix\nA"));
        doc
    }

    #[test]
    fn test_to_markdown() {
        let md = to_markdown(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(
            md,
            "# paper.pdf\n\n## Introduction:\n\nFirst one. Second one.\n\n## Appendix A\n"
        );
    }

    #[test]
    fn test_to_markdown_sentence_per_line() {
        let options = RenderOptions::new()
            .with_document_title(false)
            .with_empty_sections(false)
            .with_sentence_per_line(true);
        let md = to_markdown(&sample(), &options).unwrap();
        assert_eq!(md, "## Introduction:\n\nFirst one.\nSecond one.\n");
    }

    #[test]
    fn test_empty_document() {
        let options = RenderOptions::new().with_document_title(false);
        assert_eq!(to_markdown(&Document::new("x"), &options).unwrap(), "");
    }
}
