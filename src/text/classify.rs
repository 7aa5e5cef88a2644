//! Line-content classifiers.
//!
//! Pure boolean predicates over normalized text. The classifier owns every
//! pattern it matches against, compiled once at construction; the word
//! lexicons are static data so they can be inspected and tested on their
//! own.

use regex::Regex;

use crate::text::normalize;

/// Words that label signature blocks on forms and legal documents.
const SIGNATURE_WORDS: &[&str] = &[
    "date",
    "signature",
    "sign",
    "name",
    "witness",
    "seal",
    "stamp",
    "approved",
    "verified",
    "checked",
    "authorized",
    "place",
];

/// Words that label form fields and notice furniture.
const FORM_LABEL_WORDS: &[&str] = &[
    "address",
    "phone",
    "email",
    "rsvp",
    "contact",
    "location",
    "venue",
    "time",
    "date",
    "when",
    "where",
    "who",
    "what",
    "details",
    "info",
    "information",
    "notice",
    "announcement",
    "warning",
    "attention",
    "note",
    "memo",
    "subject",
    "from",
    "to",
    "cc",
    "bcc",
];

/// Function words whose presence marks running prose.
const PROSE_FUNCTION_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "by", "for", "with", "this", "that", "these",
    "those",
];

/// Articles and demonstratives that do not open headings.
const HEADING_STOP_OPENERS: &[&str] = &["the", "a", "an", "this", "that"];

/// Maximum words for heading text.
const MAX_HEADING_WORDS: usize = 12;

/// Maximum words for title text.
const MAX_TITLE_WORDS: usize = 10;

/// Word count above which a line is treated as prose overflow, not a label.
const MAX_LABEL_WORDS: usize = 15;

/// Minimum alphanumeric character density for meaningful text.
const MIN_ALNUM_DENSITY: f32 = 0.3;

/// Classifies lines into noise, form furniture, table numbering, prose, and
/// heading/title material.
///
/// One instance is built per pipeline and shared by every stage; all methods
/// take `&self` and have no side effects.
pub struct LineClassifier {
    numeric: Regex,
    date_patterns: Vec<Regex>,
    url_marker: Regex,
    parenthetical: Regex,
    separator_run: Regex,
    page_markers: Vec<Regex>,
    serial_patterns: Vec<Regex>,
    numbered_marker: Regex,
    bare_integer: Regex,
}

impl LineClassifier {
    /// Build a classifier with all patterns compiled.
    pub fn new() -> Self {
        Self {
            numeric: Regex::new(r"^\d+$").unwrap(),
            date_patterns: vec![
                Regex::new(r"(?i)^\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4}$").unwrap(),
                Regex::new(r"(?i)^\d{1,2}[/-]\d{1,2}[/-]\d{2,4}$").unwrap(),
                Regex::new(r"(?i)^[A-Za-z]{3,9}\s+\d{4}$").unwrap(),
                Regex::new(r"^\d{4}$").unwrap(),
            ],
            url_marker: Regex::new(r"www\.|\.com|\.org|\.net|https?://").unwrap(),
            parenthetical: Regex::new(r"^\([^)]*\)$").unwrap(),
            separator_run: Regex::new(r"^[-_=*#~`^]{3,}$").unwrap(),
            page_markers: vec![
                Regex::new(r"page\s+\d+").unwrap(),
                Regex::new(r"figure\s+\d+").unwrap(),
                Regex::new(r"table\s+\d+").unwrap(),
                Regex::new(r"\d+\s*/\s*\d+").unwrap(),
            ],
            serial_patterns: vec![
                Regex::new(r"^sr\.?\s*no\.?$").unwrap(),
                Regex::new(r"^s\.?\s*no\.?$").unwrap(),
                Regex::new(r"^sl\.?\s*no\.?$").unwrap(),
                Regex::new(r"^serial\s*no\.?$").unwrap(),
                Regex::new(r"^no\.?$").unwrap(),
                Regex::new(r"^#$").unwrap(),
                Regex::new(r"^item\s*no\.?$").unwrap(),
                Regex::new(r"^\d+\.?$").unwrap(),
                Regex::new(r"^\d+\)$").unwrap(),
                Regex::new(r"^[ivxlcdm]+\.?$").unwrap(),
            ],
            numbered_marker: Regex::new(r"^\d+[.)]\s").unwrap(),
            bare_integer: Regex::new(r"^\d+\.?$").unwrap(),
        }
    }

    /// Whether the text is layout noise rather than content.
    ///
    /// Catches near-empty strings, bare numbers, dates, URLs, parenthetical
    /// asides, separator rules, page/figure/table markers, over-long prose
    /// fragments, and strings dominated by punctuation.
    pub fn is_noise_content(&self, text: &str) -> bool {
        let text = normalize(text);
        if text.chars().count() < 2 {
            return true;
        }
        if self.numeric.is_match(&text) {
            return true;
        }
        if self.date_patterns.iter().any(|p| p.is_match(&text)) {
            return true;
        }
        let lower = text.to_lowercase();
        if self.url_marker.is_match(&lower) {
            return true;
        }
        if self.parenthetical.is_match(&text) {
            return true;
        }
        if self.separator_run.is_match(&text) {
            return true;
        }
        if self.page_markers.iter().any(|p| p.is_match(&lower)) {
            return true;
        }
        if text.split_whitespace().count() > MAX_LABEL_WORDS {
            return true;
        }
        let total = text.chars().count();
        let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
        if (alnum as f32) / (total as f32) < MIN_ALNUM_DENSITY {
            return true;
        }
        false
    }

    /// Whether the text labels a signature block ("Date:", "Witness", ...).
    pub fn is_signature_field(&self, text: &str) -> bool {
        let lower = normalize(text).to_lowercase();
        let clean = lower.trim_end_matches(':').trim();
        SIGNATURE_WORDS.contains(&clean)
    }

    /// Whether the text labels a form field ("Address:", "RSVP", ...).
    pub fn is_form_label(&self, text: &str) -> bool {
        let lower = normalize(text).to_lowercase();
        let clean = lower.trim_end_matches(':').trim();
        FORM_LABEL_WORDS.contains(&clean)
    }

    /// Whether the text is a serial-number header or row marker.
    ///
    /// Matches "Sr. No.", "No.", "#", "Item No", bare integers ("7", "7.",
    /// "7)"), and Roman numerals with an optional trailing dot.
    pub fn is_serial_number(&self, text: &str) -> bool {
        let lower = normalize(text).to_lowercase();
        self.serial_patterns.iter().any(|p| p.is_match(&lower))
    }

    /// Whether the text reads as running paragraph prose.
    pub fn is_paragraph_content(&self, text: &str) -> bool {
        let text = normalize(text);
        let word_count = text.split_whitespace().count();
        if word_count < 3 {
            return false;
        }
        if !text.chars().any(char::is_lowercase) {
            return false;
        }
        if self.is_noise_content(&text) || self.is_signature_field(&text) {
            return false;
        }
        if matches!(text.chars().last(), Some('.' | '!' | '?' | ';')) {
            return true;
        }
        let lower = text.to_lowercase();
        if lower
            .split_whitespace()
            .any(|w| PROSE_FUNCTION_WORDS.contains(&w))
        {
            return true;
        }
        if word_count >= 5 && text.chars().any(char::is_uppercase) {
            return true;
        }
        false
    }

    /// Whether the text is shaped like a heading.
    ///
    /// Headings carry letters, do not end in terminal punctuation, run 1 to
    /// 12 words, do not open with an article or demonstrative, and are not
    /// signature labels.
    pub fn is_valid_heading(&self, text: &str) -> bool {
        let text = normalize(text);
        if !text.chars().any(char::is_alphabetic) {
            return false;
        }
        if matches!(text.chars().last(), Some('.' | ';' | ',' | '!' | '?')) {
            return false;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() || words.len() > MAX_HEADING_WORDS {
            return false;
        }
        let first = words[0].to_lowercase();
        if HEADING_STOP_OPENERS.contains(&first.as_str()) {
            return false;
        }
        if self.is_signature_field(&text) {
            return false;
        }
        true
    }

    /// Whether the text is shaped like a document title.
    ///
    /// Titles carry letters, are not form/signature/noise material, do not
    /// end in '.', ';', ',' or '?' (a trailing '!' is allowed), and run 1 to
    /// 10 words.
    pub fn is_valid_title(&self, text: &str) -> bool {
        let text = normalize(text);
        if !text.chars().any(char::is_alphabetic) {
            return false;
        }
        if self.is_form_label(&text) || self.is_signature_field(&text) || self.is_noise_content(&text)
        {
            return false;
        }
        if matches!(text.chars().last(), Some('.' | ';' | ',' | '?')) {
            return false;
        }
        let word_count = text.split_whitespace().count();
        if word_count == 0 || word_count > MAX_TITLE_WORDS {
            return false;
        }
        true
    }

    /// Whether the text opens with a numbered-list marker ("1. ", "2) ").
    pub fn is_numbered_marker(&self, text: &str) -> bool {
        self.numbered_marker.is_match(text)
    }

    /// Parse a bare table-row integer ("7" or "7."), if the text is one.
    pub fn parse_bare_integer(&self, text: &str) -> Option<i64> {
        let t = text.trim();
        if !self.bare_integer.is_match(t) {
            return None;
        }
        t.trim_end_matches('.').parse().ok()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
