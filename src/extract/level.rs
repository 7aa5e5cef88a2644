//! Heading level assignment.

use crate::model::HeadingLevel;

use super::cluster::{standardize, ward_cluster};
use super::score::HeadingCandidate;

/// Strategy for mapping heading candidates to H1/H2/H3 levels.
///
/// The returned vector is parallel to the input slice.
pub trait LevelAssigner: Send + Sync {
    fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<HeadingLevel>;
}

/// Default assigner: clusters candidates on layout features and ranks
/// the clusters by mean font size.
///
/// Six features feed the clustering: font size, boldness, left edge,
/// vertical gap, text length, and heading score. A lone candidate is
/// always H1. Clusters beyond the third largest all map to H3.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterLevelAssigner;

impl LevelAssigner for ClusterLevelAssigner {
    fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<HeadingLevel> {
        match candidates.len() {
            0 => Vec::new(),
            1 => vec![HeadingLevel::H1],
            n => {
                let mut features: Vec<Vec<f64>> = candidates
                    .iter()
                    .map(|candidate| {
                        vec![
                            candidate.size as f64,
                            if candidate.bold { 1.0 } else { 0.0 },
                            candidate.bbox.x0 as f64,
                            candidate.vertical_gap as f64,
                            candidate.text.chars().count() as f64,
                            candidate.score as f64,
                        ]
                    })
                    .collect();
                standardize(&mut features);

                let k = 3.min(2.max(n / 2));
                let labels = ward_cluster(&features, k);

                let cluster_count = labels.iter().max().map_or(0, |max| max + 1);
                let mut size_sums = vec![0.0f64; cluster_count];
                let mut counts = vec![0usize; cluster_count];
                for (index, &label) in labels.iter().enumerate() {
                    size_sums[label] += candidates[index].size as f64;
                    counts[label] += 1;
                }

                // rank clusters largest mean font first
                let mut order: Vec<usize> = (0..cluster_count).collect();
                order.sort_by(|&a, &b| {
                    let mean_a = size_sums[a] / counts[a] as f64;
                    let mean_b = size_sums[b] / counts[b] as f64;
                    mean_b.total_cmp(&mean_a)
                });
                let mut rank_of = vec![0usize; cluster_count];
                for (rank, &label) in order.iter().enumerate() {
                    rank_of[label] = rank;
                }

                labels
                    .iter()
                    .map(|&label| HeadingLevel::from_rank(rank_of[label]))
                    .collect()
            }
        }
    }
}

/// Deterministic fallback assigner: levels follow the rank of the
/// candidate's font size among the distinct sizes in the set.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeRankAssigner;

impl LevelAssigner for SizeRankAssigner {
    fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<HeadingLevel> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let mut sizes: Vec<f32> = candidates.iter().map(|c| c.size).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();

        candidates
            .iter()
            .map(|candidate| {
                let rank = sizes
                    .iter()
                    .position(|&size| size == candidate.size)
                    .unwrap_or(sizes.len().saturating_sub(1));
                HeadingLevel::from_rank(rank)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn make_candidate(size: f32, gap: f32, text: &str) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            size,
            bold: size > 13.0,
            bbox: BBox::new(72.0, 100.0, 272.0, 100.0 + size),
            page: 0,
            runs: Vec::new(),
            score: 5,
            vertical_gap: gap,
            size_ratio: size / 11.0,
        }
    }

    #[test]
    fn test_empty_candidates() {
        assert!(ClusterLevelAssigner.assign(&[]).is_empty());
    }

    #[test]
    fn test_single_candidate_is_h1() {
        let candidates = vec![make_candidate(16.0, 30.0, "Overview")];
        assert_eq!(ClusterLevelAssigner.assign(&candidates), vec![HeadingLevel::H1]);
    }

    #[test]
    fn test_two_candidates_split_by_size() {
        let candidates = vec![
            make_candidate(20.0, 40.0, "Chapter"),
            make_candidate(12.0, 10.0, "Subsection"),
        ];
        let levels = ClusterLevelAssigner.assign(&candidates);
        // n = 2 gives k = 2, ranked by mean size
        assert_eq!(levels, vec![HeadingLevel::H1, HeadingLevel::H2]);
    }

    #[test]
    fn test_three_tiers() {
        let candidates = vec![
            make_candidate(20.0, 40.0, "Part One"),
            make_candidate(20.0, 40.0, "Part Two"),
            make_candidate(15.0, 25.0, "Chapter One"),
            make_candidate(15.0, 25.0, "Chapter Two"),
            make_candidate(12.0, 8.0, "Detail One"),
            make_candidate(12.0, 8.0, "Detail Two"),
        ];
        let levels = ClusterLevelAssigner.assign(&candidates);
        assert_eq!(levels[0], HeadingLevel::H1);
        assert_eq!(levels[1], HeadingLevel::H1);
        assert_eq!(levels[2], HeadingLevel::H2);
        assert_eq!(levels[3], HeadingLevel::H2);
        assert_eq!(levels[4], HeadingLevel::H3);
        assert_eq!(levels[5], HeadingLevel::H3);
    }

    #[test]
    fn test_larger_font_never_deeper_level() {
        let candidates = vec![
            make_candidate(22.0, 40.0, "Alpha"),
            make_candidate(17.0, 20.0, "Beta"),
            make_candidate(17.0, 20.0, "Gamma"),
            make_candidate(11.5, 5.0, "Delta"),
        ];
        let levels = ClusterLevelAssigner.assign(&candidates);
        for i in 0..candidates.len() {
            for j in 0..candidates.len() {
                if candidates[i].size > candidates[j].size {
                    assert!(
                        levels[i] <= levels[j],
                        "size {} got {:?}, size {} got {:?}",
                        candidates[i].size,
                        levels[i],
                        candidates[j].size,
                        levels[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_size_rank_assigner() {
        let candidates = vec![
            make_candidate(18.0, 30.0, "One"),
            make_candidate(14.0, 20.0, "Two"),
            make_candidate(12.0, 10.0, "Three"),
            make_candidate(10.0, 5.0, "Four"),
            make_candidate(18.0, 30.0, "Five"),
        ];
        let levels = SizeRankAssigner.assign(&candidates);
        assert_eq!(
            levels,
            vec![
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H3,
                HeadingLevel::H1,
            ]
        );
    }
}
