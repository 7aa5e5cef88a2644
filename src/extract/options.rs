//! Pipeline thresholds and options.

/// Options controlling the outline pipeline.
///
/// Defaults carry the tuned thresholds; every value can be overridden with
/// the builder methods.
///
/// # Example
///
/// ```
/// use pdfoutline::ExtractOptions;
///
/// let options = ExtractOptions::new()
///     .with_title_band_ratio(0.5)
///     .with_score_threshold(5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Fraction of the first page's height searched for the title
    pub title_band_ratio: f32,

    /// Font-size window (points) below the largest valid title line that
    /// still competes for the title
    pub title_size_window: f32,

    /// Distance (points) from the page midline within which a title
    /// candidate counts as centered
    pub title_center_tolerance: f32,

    /// Reference page width (points) for the centering check
    pub reference_page_width: f32,

    /// Minimum additive score for a line to become a heading candidate
    pub score_threshold: i32,

    /// Size ratio over the document median that alone marks a heading
    pub size_ratio_strong: f32,

    /// Size ratio over the document median that marks a heading when bold
    pub size_ratio_bold: f32,

    /// Bold-line frequency below which boldness alone is a heading signal
    pub sparse_bold_frequency: f32,

    /// Vertical gap (points) above a line that earns the whitespace bonus
    pub large_gap: f32,

    /// Fraction of capitalized words that earns the title-case bonus
    pub capitalized_fraction: f32,

    /// Table-row detection thresholds
    pub table: TableDetectorConfig,

    /// Candidate refinement thresholds
    pub refiner: RefinerConfig,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            title_band_ratio: 0.6,
            title_size_window: 1.0,
            title_center_tolerance: 100.0,
            reference_page_width: 612.0,
            score_threshold: 4,
            size_ratio_strong: 1.3,
            size_ratio_bold: 1.15,
            sparse_bold_frequency: 0.2,
            large_gap: 20.0,
            capitalized_fraction: 0.7,
            table: TableDetectorConfig::default(),
            refiner: RefinerConfig::default(),
        }
    }
}

impl ExtractOptions {
    /// Create options with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title search band as a fraction of first-page height.
    pub fn with_title_band_ratio(mut self, ratio: f32) -> Self {
        self.title_band_ratio = ratio;
        self
    }

    /// Set the minimum heading-candidate score.
    pub fn with_score_threshold(mut self, threshold: i32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the table-detection thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table = config;
        self
    }

    /// Set the refinement thresholds.
    pub fn with_refiner_config(mut self, config: RefinerConfig) -> Self {
        self.refiner = config;
        self
    }
}

/// Thresholds for table-row detection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Width of the X buckets lines are grouped into (points)
    pub x_bucket_size: f32,

    /// Minimum lines in a bucket before it is scanned for numbered runs
    pub min_bucket_lines: usize,

    /// Y distance (points) within which a line belongs to a detected row
    pub row_y_tolerance: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            x_bucket_size: 10.0,
            min_bucket_lines: 3,
            row_y_tolerance: 8.0,
        }
    }
}

impl TableDetectorConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row membership tolerance.
    pub fn with_row_y_tolerance(mut self, tolerance: f32) -> Self {
        self.row_y_tolerance = tolerance;
        self
    }
}

/// Thresholds for the candidate refinement filters.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinerConfig {
    /// Maximum font-size spread (points) across a heading's runs
    pub run_size_tolerance: f32,

    /// Y distance (points) within which two candidates share a row
    pub horizontal_y_tolerance: f32,

    /// Horizontal gap (points) that marks side-by-side column headers
    pub min_horizontal_gap: f32,

    /// Lines scanned below a candidate for paragraph content
    pub paragraph_scan_lines: usize,

    /// Pages scanned below a candidate for paragraph content
    pub paragraph_scan_pages: u32,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            run_size_tolerance: 1.5,
            horizontal_y_tolerance: 10.0,
            min_horizontal_gap: 50.0,
            paragraph_scan_lines: 15,
            paragraph_scan_pages: 2,
        }
    }
}

impl RefinerConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }
}
