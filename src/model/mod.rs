//! Data model for outline extraction.
//!
//! This module defines the intermediate representation that bridges the
//! positioned-text geometry of a PDF and the outline pipeline: lines with
//! bounding boxes and font runs, the per-document line collection with its
//! frozen baselines, and the terminal outline artifact.

mod document;
mod line;
mod outline;

pub use document::{Document, DocumentStats, PageLines};
pub use line::{BBox, FontRun, Line};
pub use outline::{HeadingLevel, Outline, OutlineEntry};
