//! Heading candidate scoring.

use serde::{Deserialize, Serialize};

use crate::model::{BBox, Document, DocumentStats, FontRun};
use crate::text::{normalize, LineClassifier};

use super::options::ExtractOptions;
use super::tables::TableRows;

/// A line that scored high enough to be considered a heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Normalized line text
    pub text: String,
    /// Dominant font size in points
    pub size: f32,
    /// Whether any run in the line is bold
    pub bold: bool,
    /// Line bounding box, top-left origin
    pub bbox: BBox,
    /// Zero-based page number
    pub page: u32,
    /// Styled runs the line was merged from
    pub runs: Vec<FontRun>,
    /// Additive heading score
    pub score: i32,
    /// Gap in points above the line, 0 at page tops
    pub vertical_gap: f32,
    /// Font size relative to the document median
    pub size_ratio: f32,
}

impl HeadingCandidate {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Scores every line against the document baselines and keeps the ones
/// that clear the candidate threshold.
pub struct HeadingScorer<'a> {
    options: &'a ExtractOptions,
    classifier: &'a LineClassifier,
}

impl<'a> HeadingScorer<'a> {
    pub fn new(options: &'a ExtractOptions, classifier: &'a LineClassifier) -> Self {
        Self {
            options,
            classifier,
        }
    }

    /// Collect heading candidates in document order.
    pub fn score(
        &self,
        document: &Document,
        stats: &DocumentStats,
        title: &str,
        tables: &TableRows,
    ) -> Vec<HeadingCandidate> {
        let title_lower = normalize(title).to_lowercase();
        let mut candidates = Vec::new();

        for (index, line) in document.lines.iter().enumerate() {
            if !title_lower.is_empty() && line.normalized.to_lowercase() == title_lower {
                continue;
            }
            if !self.classifier.is_valid_heading(&line.normalized) {
                continue;
            }
            if tables.contains_y(line.bbox.y0) {
                continue;
            }

            let size_ratio = line.size / stats.median_font_size;
            let vertical_gap = match index.checked_sub(1).map(|p| &document.lines[p]) {
                Some(prev) if prev.page == line.page => line.bbox.y0 - prev.bbox.y1,
                _ => 0.0,
            };

            let mut score = 0;

            if size_ratio > self.options.size_ratio_strong {
                score += 4;
            } else if size_ratio > self.options.size_ratio_bold && line.bold {
                score += 3;
            } else if line.bold && stats.bold_frequency < self.options.sparse_bold_frequency {
                score += 3;
            }

            if vertical_gap > self.options.large_gap {
                score += 2;
            }

            if self.classifier.is_numbered_marker(&line.normalized) {
                score += 3;
            }

            let word_count = line.word_count();
            if word_count <= 6 && line.bold {
                score += 2;
            }

            if self.capitalized_fraction(&line.normalized) > self.options.capitalized_fraction {
                score += 2;
            }

            if score >= self.options.score_threshold {
                candidates.push(HeadingCandidate {
                    text: line.normalized.clone(),
                    size: line.size,
                    bold: line.bold,
                    bbox: line.bbox,
                    page: line.page,
                    runs: line.runs.clone(),
                    score,
                    vertical_gap,
                    size_ratio,
                });
            }
        }

        log::debug!("scored {} heading candidates", candidates.len());
        candidates
    }

    /// Fraction of words starting with an uppercase letter.
    fn capitalized_fraction(&self, text: &str) -> f32 {
        let words: Vec<&str> = text.split_whitespace().collect();
        let capitalized = words
            .iter()
            .filter(|word| {
                word.chars()
                    .next()
                    .map_or(false, |c| c.is_uppercase())
            })
            .count();
        capitalized as f32 / words.len().max(1) as f32
    }
}
