//! JSON rendering for extracted outlines.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline to JSON.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline)?,
        JsonFormat::Compact => serde_json::to_string(outline)?,
    };
    Ok(json)
}

/// Write an outline artifact to disk.
pub fn write_json_file<P: AsRef<Path>>(outline: &Outline, path: P, format: JsonFormat) -> Result<()> {
    let json = to_json(outline, format)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

/// The artifact path for an input document: the same file name with a
/// `.json` extension.
pub fn artifact_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("json")
}
