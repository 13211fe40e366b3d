//! Text processing: sentence tokenization and normalization.

mod sentence;

pub use sentence::{RuleTokenizer, SentenceTokenizer};

use unicode_normalization::UnicodeNormalization;

/// Normalize text to Unicode NFC form.
///
/// Layout services sometimes report decomposed accents ("e\u{301}");
/// NFC keeps sentence text comparable with the source.
pub fn normalize_nfc(text: &str) -> String {
    text.nfc().collect()
}
