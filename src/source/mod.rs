//! Line sources.
//!
//! A line source adapts some paged document format into the positioned
//! [`Line`](crate::model::Line)s the pipeline consumes. The only shipped
//! source reads PDFs through `lopdf`; tests substitute in-memory sources.

mod pdf;

pub use pdf::PdfSource;

use crate::error::PageError;
use crate::model::PageLines;

/// A paged supplier of positioned text lines.
///
/// [`Document::from_source`](crate::model::Document::from_source) drains a
/// source page by page. Page faults are reported per page so one broken
/// page never discards the rest of the document.
pub trait LineSource {
    /// Number of pages in the source document.
    fn page_count(&self) -> u32;

    /// Extract the lines of the page at a 0-based index.
    fn page_lines(&self, index: u32) -> std::result::Result<PageLines, PageError>;
}
