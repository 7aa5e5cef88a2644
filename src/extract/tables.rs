//! Table-row detection.
//!
//! Headings never live inside tables, but table cells often look like
//! headings (short, bold, large). This pass finds the Y coordinates of
//! likely table rows so the scorer can skip every line on them.

use std::collections::HashMap;

use crate::model::Line;
use crate::text::LineClassifier;

use super::options::TableDetectorConfig;

/// Detects table rows from serial-number cells and numbered columns.
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    pub fn new(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Collect the Y coordinates of detected table rows.
    ///
    /// Two signals feed the set: any line whose text is a serial-number
    /// marker, and runs of three consecutive integers stacked in one
    /// X bucket (a numbered table column).
    pub fn detect(&self, lines: &[Line], classifier: &LineClassifier) -> TableRows {
        let mut ys: Vec<f32> = Vec::new();

        for line in lines {
            if classifier.is_serial_number(&line.normalized) {
                ys.push(line.bbox.y0);
            }
        }

        let mut pages: HashMap<u32, Vec<&Line>> = HashMap::new();
        for line in lines {
            pages.entry(line.page).or_default().push(line);
        }

        for page_lines in pages.values() {
            let mut buckets: HashMap<i64, Vec<&Line>> = HashMap::new();
            for line in page_lines {
                let key = (line.bbox.x0 / self.config.x_bucket_size).round() as i64;
                buckets.entry(key).or_default().push(line);
            }

            for bucket in buckets.values_mut() {
                if bucket.len() < self.config.min_bucket_lines {
                    continue;
                }
                bucket.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));

                let numbered: Vec<(i64, f32)> = bucket
                    .iter()
                    .filter_map(|line| {
                        classifier
                            .parse_bare_integer(&line.normalized)
                            .map(|n| (n, line.bbox.y0))
                    })
                    .collect();

                for window in numbered.windows(3) {
                    let (a, b, c) = (window[0], window[1], window[2]);
                    if b.0 == a.0 + 1 && c.0 == a.0 + 2 {
                        ys.push(a.1);
                        ys.push(b.1);
                        ys.push(c.1);
                        break;
                    }
                }
            }
        }

        ys.sort_by(f32::total_cmp);
        ys.dedup();
        log::debug!("table detection found {} row coordinates", ys.len());
        TableRows {
            ys,
            tolerance: self.config.row_y_tolerance,
        }
    }
}

/// Y coordinates of detected table rows, with a membership tolerance.
#[derive(Debug, Clone)]
pub struct TableRows {
    ys: Vec<f32>,
    tolerance: f32,
}

impl TableRows {
    /// Whether a line at the given top Y sits on a detected row.
    pub fn contains_y(&self, y: f32) -> bool {
        self.ys.iter().any(|ty| (y - ty).abs() <= self.tolerance)
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }
}
