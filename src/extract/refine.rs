//! Candidate refinement filters.
//!
//! Scoring is deliberately permissive, so three structural filters run
//! afterwards: mixed-formatting lines are dropped, side-by-side column
//! headers collapse to their leftmost anchor, and candidates with no
//! prose below them are dropped as stray labels.

use std::collections::{HashMap, HashSet};

use crate::model::{Document, FontRun};
use crate::text::LineClassifier;

use super::options::RefinerConfig;
use super::score::HeadingCandidate;

pub struct CandidateRefiner<'a> {
    config: &'a RefinerConfig,
    classifier: &'a LineClassifier,
}

impl<'a> CandidateRefiner<'a> {
    pub fn new(config: &'a RefinerConfig, classifier: &'a LineClassifier) -> Self {
        Self { config, classifier }
    }

    /// Run the three filters in order and return the surviving candidates
    /// sorted by reading position.
    pub fn refine(
        &self,
        candidates: Vec<HeadingCandidate>,
        document: &Document,
    ) -> Vec<HeadingCandidate> {
        if candidates.is_empty() {
            return candidates;
        }
        let before = candidates.len();
        let candidates = self.drop_mixed_formatting(candidates);
        let candidates = self.drop_horizontal_neighbors(candidates);
        let candidates = self.drop_without_prose_below(candidates, document);
        log::debug!("refined {} candidates down to {}", before, candidates.len());
        candidates
    }

    /// A heading keeps one visual style; drop lines whose runs mix font
    /// sizes beyond the tolerance or mix bold with regular weight.
    fn drop_mixed_formatting(&self, mut candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        candidates.retain(|candidate| self.has_consistent_formatting(&candidate.runs));
        candidates
    }

    fn has_consistent_formatting(&self, runs: &[FontRun]) -> bool {
        if runs.len() <= 1 {
            return true;
        }
        let mut min_size = f32::INFINITY;
        let mut max_size = f32::NEG_INFINITY;
        for run in runs {
            min_size = min_size.min(run.size);
            max_size = max_size.max(run.size);
        }
        if max_size - min_size > self.config.run_size_tolerance {
            return false;
        }
        runs.iter().all(|run| run.bold == runs[0].bold)
    }

    /// Candidates sharing a row with a far-right neighbor are column
    /// headers, not headings. The leftmost line anchors the row and is
    /// kept; the neighbors to its right are dropped.
    fn drop_horizontal_neighbors(
        &self,
        candidates: Vec<HeadingCandidate>,
    ) -> Vec<HeadingCandidate> {
        if candidates.len() < 2 {
            return candidates;
        }

        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.bbox.y0.total_cmp(&b.bbox.y0))
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });

        let mut dropped = vec![false; sorted.len()];
        for i in 0..sorted.len() {
            if dropped[i] {
                continue;
            }
            let anchor_page = sorted[i].page;
            let anchor_y = sorted[i].bbox.y0;
            let anchor_right = sorted[i].bbox.x1;
            for j in (i + 1)..sorted.len() {
                if dropped[j] {
                    continue;
                }
                let other = &sorted[j];
                if other.page != anchor_page {
                    break;
                }
                if (other.bbox.y0 - anchor_y).abs() <= self.config.horizontal_y_tolerance {
                    if other.bbox.x0 - anchor_right >= self.config.min_horizontal_gap {
                        dropped[j] = true;
                    }
                } else if other.bbox.y0 > anchor_y + self.config.horizontal_y_tolerance {
                    break;
                }
            }
        }

        sorted
            .into_iter()
            .zip(dropped)
            .filter(|(_, drop)| !drop)
            .map(|(candidate, _)| candidate)
            .collect()
    }

    /// A real heading introduces prose. Look a bounded distance below each
    /// candidate for paragraph content and drop the ones with none.
    /// Candidates whose text cannot be located in the document are kept.
    fn drop_without_prose_below(
        &self,
        candidates: Vec<HeadingCandidate>,
        document: &Document,
    ) -> Vec<HeadingCandidate> {
        let mut text_to_index: HashMap<&str, usize> = HashMap::new();
        for (index, line) in document.lines.iter().enumerate() {
            // repeated text keeps the last position
            text_to_index.insert(line.normalized.as_str(), index);
        }

        let candidate_texts: HashSet<String> =
            candidates.iter().map(|c| c.text.clone()).collect();

        let mut kept = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match text_to_index.get(candidate.text.as_str()) {
                Some(&index) => {
                    if self.has_paragraph_below(index, document, &candidate_texts) {
                        kept.push(candidate);
                    }
                }
                None => kept.push(candidate),
            }
        }
        kept
    }

    fn has_paragraph_below(
        &self,
        heading_index: usize,
        document: &Document,
        candidate_texts: &HashSet<String>,
    ) -> bool {
        let heading = &document.lines[heading_index];
        let mut checked = 0;
        for line in &document.lines[heading_index + 1..] {
            if checked >= self.config.paragraph_scan_lines {
                break;
            }
            checked += 1;
            if line.page > heading.page + self.config.paragraph_scan_pages {
                break;
            }
            if candidate_texts.contains(&line.normalized) {
                continue;
            }
            if self.classifier.is_paragraph_content(&line.normalized) {
                return true;
            }
        }
        false
    }
}
