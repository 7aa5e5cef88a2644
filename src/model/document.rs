//! Document-level line collection and frozen baselines.

use serde::{Deserialize, Serialize};

use crate::model::Line;
use crate::source::LineSource;

/// Page height assumed when a document has no readable first page
/// (US Letter, in points).
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Median font size assumed when a document carries no sized text.
const DEFAULT_MEDIAN_FONT_SIZE: f32 = 12.0;

/// The lines of a single parsed page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLines {
    /// 0-based page index
    pub number: u32,
    /// Page height in points
    pub height: f32,
    /// Lines in reading order (top to bottom, then left to right)
    pub lines: Vec<Line>,
}

impl PageLines {
    /// Create an empty page.
    pub fn new(number: u32, height: f32) -> Self {
        Self {
            number,
            height,
            lines: Vec::new(),
        }
    }

    /// Append a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }
}

/// All extracted lines of one document, in reading order across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Lines ordered by page, then top to bottom
    pub lines: Vec<Line>,
    /// Number of pages in the source document
    pub page_count: u32,
    /// Height of the first page, bounding the title search region
    pub first_page_height: f32,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            page_count: 0,
            first_page_height: DEFAULT_PAGE_HEIGHT,
        }
    }

    /// Build a document from per-page line batches.
    ///
    /// Pages are ordered by their index; the first page's height becomes the
    /// document's title-region bound.
    pub fn from_pages(mut pages: Vec<PageLines>) -> Self {
        pages.sort_by_key(|p| p.number);
        let page_count = pages.iter().map(|p| p.number + 1).max().unwrap_or(0);
        let first_page_height = pages
            .iter()
            .find(|p| p.number == 0)
            .map(|p| p.height)
            .unwrap_or(DEFAULT_PAGE_HEIGHT);
        let lines = pages.into_iter().flat_map(|p| p.lines).collect();
        Self {
            lines,
            page_count,
            first_page_height,
        }
    }

    /// Drain a [`LineSource`] page by page.
    ///
    /// A page that fails to parse is skipped with a warning; the rest of the
    /// document is still collected.
    pub fn from_source<S: LineSource>(source: &S) -> Self {
        let page_count = source.page_count();
        let mut pages = Vec::with_capacity(page_count as usize);
        for index in 0..page_count {
            match source.page_lines(index) {
                Ok(page) => pages.push(page),
                Err(e) => log::warn!("skipping page {}: {}", index, e),
            }
        }
        let mut doc = Self::from_pages(pages);
        doc.page_count = page_count;
        log::debug!(
            "collected {} lines from {} pages",
            doc.lines.len(),
            page_count
        );
        doc
    }

    /// Lines on the first page, in order.
    pub fn first_page_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|l| l.page == 0)
    }

    /// Whether the document has no extractable lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of extracted lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document-wide baselines, computed exactly once per document.
///
/// Every ratio-based decision downstream is relative to these values;
/// recomputing them mid-pipeline would make results order-dependent, so the
/// struct is a plain immutable value passed into each stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Median font size across all lines
    pub median_font_size: f32,
    /// Fraction of lines that render bold
    pub bold_frequency: f32,
    /// Height of the first page
    pub first_page_height: f32,
}

impl DocumentStats {
    /// Compute the baselines from a fully collected document.
    pub fn compute(doc: &Document) -> Self {
        let mut sizes: Vec<f32> = doc.lines.iter().map(|l| l.size).collect();
        let median_font_size = median(&mut sizes);
        let bold_frequency = if doc.lines.is_empty() {
            0.0
        } else {
            let bold = doc.lines.iter().filter(|l| l.bold).count();
            bold as f32 / doc.lines.len() as f32
        };
        Self {
            median_font_size,
            bold_frequency,
            first_page_height: doc.first_page_height,
        }
    }
}

/// Median of a sample; even-sized samples take the mean of the two middle
/// values.
fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return DEFAULT_MEDIAN_FONT_SIZE;
    }
    values.sort_by(f32::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn make_line(text: &str, size: f32, bold: bool, page: u32) -> Line {
        Line::new(text, size, bold, BBox::default(), page)
    }

    #[test]
    fn test_empty_document_defaults() {
        let doc = Document::new();
        let stats = DocumentStats::compute(&doc);
        assert_eq!(stats.median_font_size, DEFAULT_MEDIAN_FONT_SIZE);
        assert_eq!(stats.bold_frequency, 0.0);
        assert_eq!(stats.first_page_height, DEFAULT_PAGE_HEIGHT);
    }

    #[test]
    fn test_median_odd_and_even() {
        let mut pages = vec![PageLines::new(0, 800.0)];
        pages[0].push(make_line("alpha", 10.0, false, 0));
        pages[0].push(make_line("beta", 12.0, false, 0));
        pages[0].push(make_line("gamma", 20.0, false, 0));
        let doc = Document::from_pages(pages);
        assert_eq!(DocumentStats::compute(&doc).median_font_size, 12.0);

        let mut pages = vec![PageLines::new(0, 800.0)];
        pages[0].push(make_line("alpha", 10.0, false, 0));
        pages[0].push(make_line("beta", 12.0, false, 0));
        let doc = Document::from_pages(pages);
        assert_eq!(DocumentStats::compute(&doc).median_font_size, 11.0);
    }

    #[test]
    fn test_bold_frequency() {
        let mut page = PageLines::new(0, 792.0);
        page.push(make_line("one", 12.0, true, 0));
        page.push(make_line("two", 12.0, false, 0));
        page.push(make_line("three", 12.0, false, 0));
        page.push(make_line("four", 12.0, false, 0));
        let doc = Document::from_pages(vec![page]);
        assert_eq!(DocumentStats::compute(&doc).bold_frequency, 0.25);
    }

    #[test]
    fn test_from_pages_orders_and_measures() {
        let mut p1 = PageLines::new(1, 500.0);
        p1.push(make_line("second page", 12.0, false, 1));
        let mut p0 = PageLines::new(0, 700.0);
        p0.push(make_line("first page", 12.0, false, 0));

        let doc = Document::from_pages(vec![p1, p0]);
        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.first_page_height, 700.0);
        assert_eq!(doc.lines[0].page, 0);
        assert_eq!(doc.first_page_lines().count(), 1);
    }
}
