//! Outline extraction pipeline.
//!
//! The pipeline runs over a [`Document`] in fixed stages: document
//! baselines, title extraction, table-row detection, heading scoring,
//! candidate refinement, level assignment, and final assembly. Every
//! stage is deterministic; the same document always yields the same
//! outline.

mod assemble;
mod cluster;
mod level;
mod options;
mod refine;
mod score;
mod tables;
mod title;

pub use level::{ClusterLevelAssigner, LevelAssigner, SizeRankAssigner};
pub use options::{ExtractOptions, RefinerConfig, TableDetectorConfig};
pub use score::HeadingCandidate;
pub use tables::{TableDetector, TableRows};

use crate::model::{Document, DocumentStats, Outline};
use crate::text::LineClassifier;

use refine::CandidateRefiner;
use score::HeadingScorer;
use title::TitleExtractor;

/// The outline extraction pipeline.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{Document, OutlinePipeline, PdfSource};
///
/// # fn main() -> pdfoutline::Result<()> {
/// let source = PdfSource::open("report.pdf")?;
/// let document = Document::from_source(&source);
/// let outline = OutlinePipeline::new().run(&document);
/// println!("{} ({} headings)", outline.title, outline.outline.len());
/// # Ok(())
/// # }
/// ```
pub struct OutlinePipeline {
    options: ExtractOptions,
    classifier: LineClassifier,
    level_assigner: Box<dyn LevelAssigner>,
}

impl OutlinePipeline {
    /// Create a pipeline with default options and the clustering level
    /// assigner.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            classifier: LineClassifier::new(),
            level_assigner: Box::new(ClusterLevelAssigner),
        }
    }

    /// Replace the level assignment strategy.
    pub fn with_level_assigner(mut self, assigner: Box<dyn LevelAssigner>) -> Self {
        self.level_assigner = assigner;
        self
    }

    /// Extract the outline from a document.
    ///
    /// An empty document yields an empty outline. A document with no
    /// heading candidates yields the title alone.
    pub fn run(&self, document: &Document) -> Outline {
        if document.is_empty() {
            return Outline::empty();
        }

        let stats = DocumentStats::compute(document);
        log::debug!(
            "document baselines: median size {:.1}, bold frequency {:.2}",
            stats.median_font_size,
            stats.bold_frequency
        );

        let title = TitleExtractor::new(&self.options, &self.classifier).extract(document, &stats);
        let tables = TableDetector::new(self.options.table.clone())
            .detect(&document.lines, &self.classifier);
        let candidates = HeadingScorer::new(&self.options, &self.classifier)
            .score(document, &stats, &title, &tables);
        let candidates =
            CandidateRefiner::new(&self.options.refiner, &self.classifier)
                .refine(candidates, document);

        if candidates.is_empty() {
            return Outline {
                title,
                outline: Vec::new(),
            };
        }

        let levels = self.level_assigner.assign(&candidates);
        assemble::assemble(title, &candidates, &levels)
    }
}

impl Default for OutlinePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, HeadingLevel, Line, PageLines};

    fn make_line(text: &str, size: f32, bold: bool, y: f32, page: u32) -> Line {
        Line::new(text, size, bold, BBox::new(72.0, y, 272.0, y + size), page)
    }

    fn make_document(lines: Vec<Line>) -> Document {
        let mut pages: Vec<PageLines> = Vec::new();
        for line in lines {
            let page = line.page;
            if pages.last().map(|p| p.number) != Some(page) {
                pages.push(PageLines::new(page, 792.0));
            }
            pages.last_mut().unwrap().push(line);
        }
        Document::from_pages(pages)
    }

    fn report_document() -> Document {
        make_document(vec![
            make_line("Project Charter", 24.0, true, 72.0, 0),
            make_line("1. Introduction", 16.0, true, 150.0, 0),
            make_line(
                "This document establishes the scope and goals for the project.",
                11.0,
                false,
                180.0,
                0,
            ),
            make_line(
                "It also lists the stakeholders and the planned milestones.",
                11.0,
                false,
                195.0,
                0,
            ),
            make_line("1.1 Background", 13.0, true, 240.0, 0),
            make_line(
                "The project grew out of the quarterly planning review.",
                11.0,
                false,
                270.0,
                0,
            ),
            make_line("2. Requirements", 16.0, true, 90.0, 1),
            make_line(
                "Requirements were gathered from the engineering teams.",
                11.0,
                false,
                120.0,
                1,
            ),
            make_line(
                "Each requirement is tracked in the shared backlog.",
                11.0,
                false,
                135.0,
                1,
            ),
        ])
    }

    #[test]
    fn test_empty_document() {
        let outline = OutlinePipeline::new().run(&Document::new());
        assert_eq!(outline.title, "");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_report_outline() {
        let outline = OutlinePipeline::new().run(&report_document());

        assert_eq!(outline.title, "Project Charter");
        let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1. Introduction", "1.1 Background", "2. Requirements"]);
        assert_eq!(outline.outline[0].page, 0);
        assert_eq!(outline.outline[2].page, 1);
    }

    #[test]
    fn test_title_not_repeated_as_heading() {
        let outline = OutlinePipeline::new().run(&report_document());
        assert!(outline.outline.iter().all(|e| e.text != "Project Charter"));
    }

    #[test]
    fn test_numbered_sections_outrank_subsection() {
        let outline = OutlinePipeline::new().run(&report_document());
        let level_of = |text: &str| {
            outline
                .outline
                .iter()
                .find(|e| e.text == text)
                .map(|e| e.level)
                .unwrap()
        };
        let intro = level_of("1. Introduction");
        let background = level_of("1.1 Background");
        assert!(intro <= background);
        assert_eq!(level_of("2. Requirements"), intro);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let document = report_document();
        let pipeline = OutlinePipeline::new();
        let first = pipeline.run(&document);
        let second = pipeline.run(&document);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_table_page_yields_no_headings() {
        let document = make_document(vec![
            make_line("Inventory List", 18.0, true, 72.0, 0),
            make_line("1.", 11.0, false, 150.0, 0),
            make_line("2.", 11.0, false, 170.0, 0),
            make_line("3.", 11.0, false, 190.0, 0),
            Line::new("Bolt Assembly", 12.0, true, BBox::new(150.0, 151.0, 280.0, 163.0), 0),
            Line::new("Washer Pack", 12.0, true, BBox::new(150.0, 171.0, 280.0, 183.0), 0),
            Line::new("Hex Nut Set", 12.0, true, BBox::new(150.0, 191.0, 280.0, 203.0), 0),
        ]);
        let outline = OutlinePipeline::new().run(&document);
        assert_eq!(outline.title, "Inventory List");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_custom_level_assigner() {
        let outline = OutlinePipeline::new()
            .with_level_assigner(Box::new(SizeRankAssigner))
            .run(&report_document());
        assert!(!outline.outline.is_empty());
        assert!(outline.outline.iter().all(|e| e.level >= HeadingLevel::H1));
    }

    #[test]
    fn test_no_candidates_keeps_title() {
        let document = make_document(vec![
            make_line("Meeting Notes", 18.0, false, 72.0, 0),
            make_line(
                "attendees discussed the schedule for the next release",
                11.0,
                false,
                120.0,
                0,
            ),
            make_line(
                "the meeting closed after an hour of open discussion",
                11.0,
                false,
                135.0,
                0,
            ),
        ]);
        let outline = OutlinePipeline::new().run(&document);
        assert_eq!(outline.title, "Meeting Notes");
        assert!(outline.outline.is_empty());
    }
}
