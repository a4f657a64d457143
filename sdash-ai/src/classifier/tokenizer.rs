//! Text normalization and word tokenization

use regex::Regex;
use std::sync::OnceLock;

fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_\s]").expect("punctuation pattern is valid"))
}

/// Lowercase, turn punctuation into whitespace and split into words
///
/// Word characters are ASCII letters, digits and `_`; anything else,
/// accented letters included, separates words.
///
/// Empty tokens are discarded, so blank input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    punctuation()
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
