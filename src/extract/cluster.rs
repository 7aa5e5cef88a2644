//! Feature standardization and Ward agglomerative clustering.
//!
//! Candidate sets are small (tens of rows, six features); the
//! agglomeration is the naive O(n^3) merge scan over them.

/// Scale each feature column to zero mean and unit variance in place.
///
/// Variance is the population variance. Columns with zero variance are
/// centered but not scaled, so constant features cannot produce NaN.
pub fn standardize(features: &mut [Vec<f64>]) {
    if features.is_empty() {
        return;
    }
    let rows = features.len() as f64;
    let dims = features[0].len();

    for dim in 0..dims {
        let mean = features.iter().map(|row| row[dim]).sum::<f64>() / rows;
        let variance = features
            .iter()
            .map(|row| {
                let delta = row[dim] - mean;
                delta * delta
            })
            .sum::<f64>()
            / rows;
        let std = variance.sqrt();
        let scale = if std == 0.0 { 1.0 } else { std };
        for row in features.iter_mut() {
            row[dim] = (row[dim] - mean) / scale;
        }
    }
}

struct Cluster {
    centroid: Vec<f64>,
    weight: f64,
    members: Vec<usize>,
}

/// Cluster rows into `k` groups with Ward linkage and return one label
/// per row.
///
/// Each step merges the pair whose weighted centroid distance
/// `|A||B| / (|A| + |B|) * d(A, B)^2` is smallest, the pair that least
/// increases within-cluster variance. Ties keep the first pair in scan
/// order. Labels are arbitrary identifiers; callers rank the clusters
/// themselves.
pub fn ward_cluster(features: &[Vec<f64>], k: usize) -> Vec<usize> {
    let n = features.len();
    if n == 0 {
        return Vec::new();
    }
    let k = k.clamp(1, n);

    let mut clusters: Vec<Cluster> = features
        .iter()
        .enumerate()
        .map(|(index, row)| Cluster {
            centroid: row.clone(),
            weight: 1.0,
            members: vec![index],
        })
        .collect();

    while clusters.len() > k {
        let mut best = (0, 1, f64::INFINITY);
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let cost = merge_cost(&clusters[i], &clusters[j]);
                if cost < best.2 {
                    best = (i, j, cost);
                }
            }
        }

        let (i, j, _) = best;
        let absorbed = clusters.swap_remove(j);
        let target = &mut clusters[i];
        let total = target.weight + absorbed.weight;
        for (dim, value) in target.centroid.iter_mut().enumerate() {
            *value = (*value * target.weight + absorbed.centroid[dim] * absorbed.weight) / total;
        }
        target.weight = total;
        target.members.extend(absorbed.members);
    }

    let mut labels = vec![0; n];
    for (label, cluster) in clusters.iter().enumerate() {
        for &member in &cluster.members {
            labels[member] = label;
        }
    }
    labels
}

fn merge_cost(a: &Cluster, b: &Cluster) -> f64 {
    let squared_distance: f64 = a
        .centroid
        .iter()
        .zip(&b.centroid)
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    a.weight * b.weight / (a.weight + b.weight) * squared_distance
}
