//! Error types for the pdfoutline library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Document-level errors.
///
/// An `Error` means the whole document could not be processed. Page-level
/// faults are represented by [`PageError`] and never escape the document
/// loader: the offending page is skipped and extraction continues.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF document is encrypted; extraction does not decrypt.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error parsing the PDF object structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error serializing the outline artifact.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-page extraction faults.
///
/// These are reported by a [`LineSource`](crate::source::LineSource) for a
/// single page. The document loader logs them and moves on to the next page.
#[derive(Error, Debug)]
pub enum PageError {
    /// The page has no content stream.
    #[error("page {0} has no content stream")]
    MissingContent(u32),

    /// The page's content stream could not be decoded.
    #[error("page {0} content decode failed: {1}")]
    ContentDecode(u32, String),

    /// A font referenced by the page could not be resolved.
    #[error("page {0} font decode failed: {1}")]
    FontDecode(u32, String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a valid PDF");
    }

    #[test]
    fn test_page_error_display() {
        let err = PageError::MissingContent(3);
        assert_eq!(err.to_string(), "page 3 has no content stream");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
