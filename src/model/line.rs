//! Positioned-line types.

use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// Axis-aligned bounding box of a line, in page units.
///
/// Coordinates use a top-left origin: `y0` is the line's top edge, `y1` its
/// bottom edge, and y grows downward. Sources working in PDF-native
/// bottom-up coordinates must convert before constructing lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Horizontal center.
    pub fn x_center(&self) -> f32 {
        self.x0 + self.width() / 2.0
    }
}

/// A maximal run of characters within a line sharing font size and bold
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRun {
    /// Text content of the run
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Whether the run renders bold
    pub bold: bool,
}

impl FontRun {
    /// Create a new font run.
    pub fn new(text: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
        }
    }
}

/// One physical line of text on a page.
///
/// Lines are produced once by a [`LineSource`](crate::source::LineSource)
/// and are immutable thereafter; every pipeline stage reads them through
/// shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Raw concatenated text of the line's runs
    pub text: String,
    /// NFKC-normalized, whitespace-collapsed text
    pub normalized: String,
    /// Font size in points (maximum across runs)
    pub size: f32,
    /// Whether any run renders bold
    pub bold: bool,
    /// Bounding box in top-left-origin page units
    pub bbox: BBox,
    /// 0-based page index
    pub page: u32,
    /// Ordered font runs composing the line
    pub runs: Vec<FontRun>,
}

impl Line {
    /// Create a line with a single implicit run.
    pub fn new(text: impl Into<String>, size: f32, bold: bool, bbox: BBox, page: u32) -> Self {
        let text = text.into();
        let runs = vec![FontRun::new(text.clone(), size, bold)];
        Self::from_runs(text, runs, bbox, page)
    }

    /// Create a line from explicit font runs.
    ///
    /// The line's `size` is the maximum run size and `bold` is true when any
    /// run is bold, matching how mixed-format lines render.
    pub fn from_runs(text: impl Into<String>, runs: Vec<FontRun>, bbox: BBox, page: u32) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        let size = runs.iter().map(|r| r.size).fold(0.0f32, f32::max);
        let bold = runs.iter().any(|r| r.bold);
        Self {
            text,
            normalized,
            size,
            bold,
            bbox,
            page,
            runs,
        }
    }

    /// Number of whitespace-separated words in the normalized text.
    pub fn word_count(&self) -> usize {
        self.normalized.split_whitespace().count()
    }
}
