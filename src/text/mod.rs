//! Text normalization and content classification.
//!
//! Everything here is a pure function of its input text: normalization
//! produces the canonical form every comparison runs on, and the classifier
//! predicates sort lines into noise, form furniture, table numbering, prose,
//! and heading/title material.

mod classify;
mod normalize;

pub use classify::LineClassifier;
pub use normalize::{capitalize_first_letter, is_all_uppercase, normalize};
