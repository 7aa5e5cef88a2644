//! # pdfoutline
//!
//! Document-outline extraction for PDF files.
//!
//! This library recovers a document's title and heading hierarchy (H1/H2/H3)
//! from the positioned text of a PDF alone: font sizes, boldness, indentation,
//! and vertical spacing. No embedded bookmarks or tagged structure are
//! required.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     // Extract the outline of a PDF file
//!     let outline = extract_file("document.pdf")?;
//!
//!     // Render it as the JSON artifact
//!     let json = render::to_json(&outline, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Geometry-driven heuristics**: candidates scored against document-wide
//!   baselines (median font size, bold frequency)
//! - **Unsupervised level assignment**: Ward clustering over layout features,
//!   pluggable through the [`LevelAssigner`] trait
//! - **Table suppression**: serial-numbered rows and column headers never
//!   become headings
//! - **Degraded-but-valid output**: a failing document yields
//!   `{"title": "", "outline": []}` rather than an error mid-batch
//! - **Parallel batch driver**: directory-to-directory extraction over Rayon

pub mod batch;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use batch::{BatchEvent, BatchOptions, BatchStatus, BatchSummary};
pub use error::{Error, PageError, Result};
pub use extract::{
    ClusterLevelAssigner, ExtractOptions, HeadingCandidate, LevelAssigner, OutlinePipeline,
    RefinerConfig, SizeRankAssigner, TableDetectorConfig,
};
pub use model::{
    BBox, Document, DocumentStats, FontRun, HeadingLevel, Line, Outline, OutlineEntry, PageLines,
};
pub use render::JsonFormat;
pub use source::{LineSource, PdfSource};
pub use text::LineClassifier;

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
///
/// # Returns
///
/// A `Result` containing the extracted [`Outline`] or an error. Per-page
/// parse faults are skipped with a warning; only whole-document faults
/// (unreadable file, wrong magic, encryption) surface as `Err`.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_file;
///
/// let outline = extract_file("document.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let source = PdfSource::open(path)?;
    let document = Document::from_source(&source);
    Ok(OutlinePipeline::new().run(&document))
}

/// Extract the outline of a PDF file with custom thresholds.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().with_score_threshold(6);
/// let outline = extract_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Outline> {
    let source = PdfSource::open(path)?;
    let document = Document::from_source(&source);
    Ok(OutlinePipeline::with_options(options).run(&document))
}

/// Extract the outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let outline = extract_bytes(&data).unwrap();
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<Outline> {
    let source = PdfSource::from_bytes(data)?;
    let document = Document::from_source(&source);
    Ok(OutlinePipeline::new().run(&document))
}

/// Extract the outline of an in-memory PDF with custom thresholds.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Outline> {
    let source = PdfSource::from_bytes(data)?;
    let document = Document::from_source(&source);
    Ok(OutlinePipeline::with_options(options).run(&document))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_bytes_empty_data() {
        // Empty data should return an error
        let data: [u8; 0] = [];
        let result = extract_bytes(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_bytes_too_short() {
        // Data shorter than the PDF magic bytes should fail
        let data = b"%PDF";
        let result = extract_bytes(data);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_bytes_unknown_magic() {
        let data = b"<!DOCTYPE html><html></html>";
        let result = extract_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_truncated_body() {
        // Correct magic but no object structure behind it
        let data = b"%PDF-1.7\n%garbage";
        let result = extract_bytes(data);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_format_variants() {
        // Both JSON format variants should exist
        let _pretty = JsonFormat::Pretty;
        let _compact = JsonFormat::Compact;
    }

    #[test]
    fn test_pipeline_available_at_root() {
        let pipeline = OutlinePipeline::new();
        let outline = pipeline.run(&Document::new());
        assert!(outline.is_empty());
    }
}
