//! Rendering of extracted outlines to output artifacts.

mod json;

pub use json::{artifact_path, to_json, write_json_file, JsonFormat};
