//! Title extraction from the first page.

use crate::model::{Document, DocumentStats, Line};
use crate::text::{capitalize_first_letter, is_all_uppercase, LineClassifier};

use super::options::ExtractOptions;

/// Picks the document title from the upper band of the first page.
pub struct TitleExtractor<'a> {
    options: &'a ExtractOptions,
    classifier: &'a LineClassifier,
}

impl<'a> TitleExtractor<'a> {
    pub fn new(options: &'a ExtractOptions, classifier: &'a LineClassifier) -> Self {
        Self {
            options,
            classifier,
        }
    }

    /// Extract the title, or an empty string when no line qualifies.
    ///
    /// Candidates come from the top band of page one, keep only lines
    /// within one point of the largest font, and tie-break on a layout
    /// score. Ties on the score keep the earliest candidate.
    pub fn extract(&self, document: &Document, stats: &DocumentStats) -> String {
        let band = stats.first_page_height * self.options.title_band_ratio;

        let candidates: Vec<&Line> = document
            .first_page_lines()
            .filter(|line| line.bbox.y0 <= band)
            .filter(|line| self.classifier.is_valid_title(&line.normalized))
            .filter(|line| !Self::is_parenthetical(&line.normalized))
            .collect();

        if candidates.is_empty() {
            return String::new();
        }

        let largest = candidates
            .iter()
            .map(|line| line.size)
            .fold(f32::NEG_INFINITY, f32::max);
        let finalists: Vec<&Line> = candidates
            .into_iter()
            .filter(|line| line.size >= largest - self.options.title_size_window)
            .collect();

        if finalists.len() == 1 {
            let title = capitalize_first_letter(&finalists[0].normalized);
            log::debug!("title from single finalist: {:?}", title);
            return title;
        }

        let mut best: Option<(&Line, i32)> = None;
        for line in finalists {
            let score = self.score(line, stats, band);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((line, score)),
            }
        }

        match best {
            Some((line, score)) => {
                let title = capitalize_first_letter(&line.normalized);
                log::debug!("title scored {}: {:?}", score, title);
                title
            }
            None => String::new(),
        }
    }

    fn score(&self, line: &Line, stats: &DocumentStats, band: f32) -> i32 {
        let mut score = 0;

        let size_ratio = line.size / stats.median_font_size;
        if size_ratio > 2.0 {
            score += 10;
        } else if size_ratio > 1.5 {
            score += 8;
        } else if size_ratio > 1.2 {
            score += 6;
        }

        let position_ratio = line.bbox.y0 / band;
        if position_ratio < 0.3 {
            score += 4;
        } else if position_ratio < 0.6 {
            score += 2;
        }

        if line.bold {
            score += 3;
        }

        match line.word_count() {
            1..=3 => score += 4,
            4..=6 => score += 2,
            n if n > 10 => score -= 2,
            _ => {}
        }

        if is_all_uppercase(&line.normalized) {
            score += 2;
        }

        let midline = self.options.reference_page_width / 2.0;
        if (line.bbox.x_center() - midline).abs() < self.options.title_center_tolerance {
            score += 2;
        }

        score
    }

    fn is_parenthetical(text: &str) -> bool {
        text.starts_with('(') && text.ends_with(')')
    }
}
