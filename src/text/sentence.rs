//! Sentence tokenization.

use regex::Regex;
use std::collections::HashSet;

/// Splits paragraph text into sentences.
///
/// Implementations must be deterministic. Non-blank input should produce
/// at least one sentence; blank input produces none.
pub trait SentenceTokenizer: Send + Sync {
    /// Split `text` into ordered, trimmed sentences.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> SentenceTokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Abbreviations that end in a period without ending a sentence.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "fig", "figs", "eq", "vol",
    "pp", "inc", "ltd", "co", "corp", "dept", "approx", "cf", "al", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Terminators that close a sentence without a following space.
const CJK_TERMINATORS: &[char] = &['。', '！', '？'];

/// Rule-based sentence tokenizer.
///
/// Breaks after `.`, `!`, `?` and `…` (plus any closing quotes or
/// brackets) when followed by whitespace, and after CJK full stops
/// unconditionally. A break is suppressed after a known abbreviation or
/// a dotted acronym, and when the next sentence would start with a
/// lowercase letter. A single letter counts as an initial only when the
/// word before it is not lowercase ("J. R. R. Tolkien", "John F. Kennedy"),
/// so "plan B." and "but I." still end a sentence.
#[derive(Debug, Clone)]
pub struct RuleTokenizer {
    boundary: Regex,
    abbreviations: HashSet<String>,
}

impl RuleTokenizer {
    /// Create a tokenizer with the built-in English abbreviation list.
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r#"[.!?…]+["'”’)\]]*\s+|[。！？]+[」』”’）]*\s*"#)
                .expect("sentence boundary pattern is valid"),
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add abbreviations (case-insensitive, without the trailing period).
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }

    /// Check if `word` (without its final period) is a known abbreviation
    /// or a dotted acronym. Single letters are not abbreviations.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        let word = word.trim_start_matches(|c: char| "([{\"'“‘".contains(c));
        if word.is_empty() {
            return false;
        }
        if self.abbreviations.contains(&word.to_lowercase()) {
            return true;
        }

        // Dotted acronyms: "U.S", "e.g"
        word.contains('.') && word.split('.').all(is_single_letter)
    }

    /// Check if `word` is a single-letter initial, given the word before it.
    fn is_initial(word: &str, previous: Option<&str>) -> bool {
        let word = word.trim_start_matches(|c: char| "([{\"'“‘".contains(c));
        if !is_single_letter(word) || !word.chars().all(char::is_uppercase) {
            return false;
        }
        !previous
            .and_then(|p| p.chars().find(|c| c.is_alphabetic()))
            .is_some_and(char::is_lowercase)
    }

    fn is_boundary(&self, before: &str, delimiter: &str, after: &str) -> bool {
        if delimiter.starts_with(CJK_TERMINATORS) {
            return true;
        }

        if after.chars().next().is_some_and(|c| c.is_lowercase()) {
            return false;
        }

        if delimiter.starts_with('.') && !delimiter.starts_with("..") {
            let mut words = before.split_whitespace().rev();
            if let Some(word) = words.next() {
                if self.is_abbreviation(word) || Self::is_initial(word, words.next()) {
                    return false;
                }
            }
        }

        true
    }
}

impl Default for RuleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceTokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in self.boundary.find_iter(text) {
            if m.end() >= text.len() {
                break;
            }
            if !self.is_boundary(&text[start..m.start()], m.as_str(), &text[m.end()..]) {
                continue;
            }
            let end = m.start() + m.as_str().trim_end().len();
            push_sentence(&mut sentences, &text[start..end]);
            start = m.end();
        }

        push_sentence(&mut sentences, &text[start..]);
        sentences
    }
}

fn is_single_letter(part: &str) -> bool {
    let mut chars = part.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let sentence = candidate.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        RuleTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_two_sentences() {
        assert_eq!(
            split("This is the first sentence. This is the second."),
            vec!["This is the first sentence.", "This is the second."]
        );
    }

    #[test]
    fn test_single_sentence_without_terminator() {
        assert_eq!(split("Stray text"), vec!["Stray text"]);
        assert_eq!(split("Stray text."), vec!["Stray text."]);
    }

    #[test]
    fn test_blank_input() {
        assert!(split("").is_empty());
        assert!(split("   \n ").is_empty());
    }

    #[test]
    fn test_question_and_exclamation() {
        assert_eq!(
            split("Is it done? Yes! It is."),
            vec!["Is it done?", "Yes!", "It is."]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        assert_eq!(
            split("Dr. Smith arrived. He sat down."),
            vec!["Dr. Smith arrived.", "He sat down."]
        );
        assert_eq!(
            split("Use tools, e.g. Hammers. Then stop."),
            vec!["Use tools, e.g. Hammers.", "Then stop."]
        );
        assert_eq!(
            split("The U.S. Army left. It rained."),
            vec!["The U.S. Army left.", "It rained."]
        );
        assert_eq!(split("J. R. R. Tolkien wrote it."), vec!["J. R. R. Tolkien wrote it."]);
    }

    #[test]
    fn test_single_letter_ends_sentence_after_lowercase_word() {
        assert_eq!(
            split("We fall back to plan B. We start tomorrow."),
            vec!["We fall back to plan B.", "We start tomorrow."]
        );
        assert_eq!(
            split("It was there, but I. Then it was gone."),
            vec!["It was there, but I.", "Then it was gone."]
        );
        assert_eq!(
            split("President John F. Kennedy spoke."),
            vec!["President John F. Kennedy spoke."]
        );
        assert!(!RuleTokenizer::new().is_abbreviation("B"));
    }

    #[test]
    fn test_lowercase_continuation() {
        assert_eq!(split("Values approx. five. Next."), vec!["Values approx. five.", "Next."]);
        assert_eq!(split("See p. three of it."), vec!["See p. three of it."]);
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(
            split("Version 3.5 shipped. It works."),
            vec!["Version 3.5 shipped.", "It works."]
        );
    }

    #[test]
    fn test_closing_quotes() {
        assert_eq!(
            split("He said \"stop.\" Then he left."),
            vec!["He said \"stop.\"", "Then he left."]
        );
    }

    #[test]
    fn test_cjk_terminators() {
        assert_eq!(
            split("今日は晴れです。明日は雨です。"),
            vec!["今日は晴れです。", "明日は雨です。"]
        );
    }

    #[test]
    fn test_custom_abbreviations() {
        let tokenizer = RuleTokenizer::new().with_abbreviations(["Sec."]);
        assert_eq!(
            tokenizer.tokenize("See Sec. Two for details."),
            vec!["See Sec. Two for details."]
        );
        assert!(tokenizer.is_abbreviation("sec"));
    }

    #[test]
    fn test_closure_tokenizer() {
        let lines = |text: &str| text.lines().map(str::to_string).collect::<Vec<_>>();
        assert_eq!(lines.tokenize("a\nb"), vec!["a", "b"]);
    }
}
