//! Canonical text normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalize text to its canonical comparison form.
///
/// Applies Unicode NFKC (folding compatibility characters such as ligatures
/// and fullwidth forms), collapses every run of whitespace to a single
/// space, and trims both ends. Total function; never fails.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first alphabetic character, scanning left to right.
///
/// Leading non-alphabetic characters (list markers, digits, punctuation)
/// are preserved untouched: `"1. introduction"` becomes
/// `"1. Introduction"`.
pub fn capitalize_first_letter(text: &str) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, c)) => {
            let mut out = String::with_capacity(text.len() + 1);
            out.push_str(&text[..i]);
            out.extend(c.to_uppercase());
            out.push_str(&text[i + c.len_utf8()..]);
            out
        }
        None => text.to_string(),
    }
}

/// Whether the text has at least one cased character and no lowercase ones.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
