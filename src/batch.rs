//! Parallel batch driver over directories of PDF files.
//!
//! Maps every `*.pdf` in a directory to a `name.json` outline artifact.
//! A document that fails to parse degrades to the empty artifact instead of
//! aborting the run, and a failed write affects only its own file. Workers
//! fan out over rayon and report progress through a channel, so a caller can
//! drive a progress display from a single thread without shared state.

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::unbounded;
use rayon::prelude::*;

use crate::error::Result;
use crate::extract::{ExtractOptions, OutlinePipeline};
use crate::model::{Document, Outline};
use crate::render::{artifact_path, write_json_file, JsonFormat};
use crate::source::PdfSource;

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Directory for the JSON artifacts, created if absent. Artifacts land
    /// next to their inputs when unset.
    pub output_dir: Option<PathBuf>,
    /// JSON layout of the artifacts.
    pub format: JsonFormat,
    /// Pipeline thresholds applied to every document.
    pub extract: ExtractOptions,
}

impl BatchOptions {
    /// Create options with the default pipeline and pretty JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write artifacts into `dir` instead of next to the inputs.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the JSON layout of the artifacts.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the pipeline thresholds applied to every document.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }
}

/// Progress event emitted while a batch runs.
///
/// Events arrive on the thread that called [`process_files`], in completion
/// order rather than input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// A worker picked up a file.
    Started {
        /// The input PDF.
        input: PathBuf,
    },
    /// A file finished, one way or another.
    Finished {
        /// The input PDF.
        input: PathBuf,
        /// Where the artifact was (or would have been) written.
        artifact: PathBuf,
        /// What happened to the file.
        status: BatchStatus,
    },
}

/// Per-file outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// The outline was extracted and its artifact written.
    Extracted {
        /// Number of headings in the outline.
        headings: usize,
    },
    /// The document failed; the empty artifact was written in its place.
    Degraded {
        /// Why the document failed.
        reason: String,
    },
    /// The artifact could not be written at all.
    WriteFailed {
        /// Why the write failed.
        reason: String,
    },
}

/// Aggregate counts for a completed batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// PDF files found in the input directory.
    pub total: usize,
    /// Files whose outline was extracted and written.
    pub succeeded: usize,
    /// Files that degraded to the empty artifact.
    pub degraded: usize,
    /// Files whose artifact could not be written.
    pub write_failures: usize,
}

impl BatchSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    fn record(&mut self, event: &BatchEvent) {
        if let BatchEvent::Finished { status, .. } = event {
            match status {
                BatchStatus::Extracted { .. } => self.succeeded += 1,
                BatchStatus::Degraded { .. } => self.degraded += 1,
                BatchStatus::WriteFailed { .. } => self.write_failures += 1,
            }
        }
    }

    /// Whether every file produced a full outline artifact.
    pub fn is_clean(&self) -> bool {
        self.degraded == 0 && self.write_failures == 0
    }
}

/// Collect the PDF files of `dir` in deterministic lexicographic order.
///
/// The `.pdf` extension is matched case-insensitively; subdirectories are
/// not descended into.
pub fn scan_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract outlines for every PDF in `dir` and write the JSON artifacts.
///
/// Convenience wrapper over [`scan_dir`] and [`process_files`].
///
/// # Example
///
/// ```no_run
/// use pdfoutline::batch::{self, BatchOptions};
///
/// let options = BatchOptions::new().with_output_dir("out");
/// let summary = batch::process_dir("reports", &options, |_event| {})?;
/// println!("{}/{} extracted", summary.succeeded, summary.total);
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn process_dir<P, F>(dir: P, options: &BatchOptions, observer: F) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    F: FnMut(BatchEvent),
{
    let files = scan_dir(dir)?;
    process_files(&files, options, observer)
}

/// Process an explicit list of PDF files in parallel.
///
/// Every file yields an artifact: a document that fails to parse gets the
/// degraded empty outline written in its place, and a failed write is
/// reported in the summary without stopping the run. `observer` receives
/// [`BatchEvent`]s on the calling thread while workers run.
///
/// Returns `Err` only when the run itself cannot start (unreadable input
/// directory, output directory that cannot be created).
pub fn process_files<F>(
    files: &[PathBuf],
    options: &BatchOptions,
    mut observer: F,
) -> Result<BatchSummary>
where
    F: FnMut(BatchEvent),
{
    if let Some(dir) = options.output_dir.as_deref() {
        fs::create_dir_all(dir)?;
    }

    let pipeline = OutlinePipeline::with_options(options.extract.clone());
    let output_dir = options.output_dir.as_deref();
    let format = options.format;
    let mut summary = BatchSummary::new(files.len());

    let (tx, rx) = unbounded();
    std::thread::scope(|scope| {
        let pipeline = &pipeline;
        scope.spawn(move || {
            files.par_iter().for_each_with(tx, |tx, input| {
                let artifact = artifact_for(input, output_dir);
                let _ = tx.send(BatchEvent::Started {
                    input: input.clone(),
                });
                let status = process_file(input, &artifact, pipeline, format);
                let _ = tx.send(BatchEvent::Finished {
                    input: input.clone(),
                    artifact,
                    status,
                });
            });
        });
        // All senders drop when the workers finish, ending this loop.
        for event in rx {
            summary.record(&event);
            observer(event);
        }
    });

    Ok(summary)
}

fn process_file(
    input: &Path,
    artifact: &Path,
    pipeline: &OutlinePipeline,
    format: JsonFormat,
) -> BatchStatus {
    let outline = match extract_outline(input, pipeline) {
        Ok(outline) => outline,
        Err(err) => {
            log::warn!("{}: {}, writing empty outline", input.display(), err);
            return match write_json_file(&Outline::empty(), artifact, format) {
                Ok(()) => BatchStatus::Degraded {
                    reason: err.to_string(),
                },
                Err(write_err) => {
                    log::warn!("{}: {}", artifact.display(), write_err);
                    BatchStatus::WriteFailed {
                        reason: write_err.to_string(),
                    }
                }
            };
        }
    };

    match write_json_file(&outline, artifact, format) {
        Ok(()) => BatchStatus::Extracted {
            headings: outline.len(),
        },
        Err(err) => {
            log::warn!("{}: {}", artifact.display(), err);
            BatchStatus::WriteFailed {
                reason: err.to_string(),
            }
        }
    }
}

fn extract_outline(input: &Path, pipeline: &OutlinePipeline) -> Result<Outline> {
    let source = PdfSource::open(input)?;
    let document = Document::from_source(&source);
    Ok(pipeline.run(&document))
}

fn artifact_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let stem = input.file_stem().unwrap_or_default();
            dir.join(stem).with_extension("json")
        }
        None => artifact_path(input),
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
