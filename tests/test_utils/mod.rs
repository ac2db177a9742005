use kmeanspp::Cluster;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create synthetic data with well-separated clusters of uniform noise
/// around `num_clusters` centers spaced `separation` apart.
/// Returns (data, true_labels)
#[allow(dead_code)]
pub fn create_separated_clusters(
    num_clusters: usize,
    points_per_cluster: usize,
    dim: usize,
    separation: f64,
    seed: u64,
) -> (Array2<f64>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let total_points = num_clusters * points_per_cluster;
    let mut data = Array2::<f64>::zeros((total_points, dim));
    let mut true_labels = Vec::with_capacity(total_points);

    for cluster_id in 0..num_clusters {
        let center: Vec<f64> = (0..dim)
            .map(|d| (cluster_id as f64) * separation + (d as f64) * 0.1)
            .collect();

        for point_id in 0..points_per_cluster {
            let idx = cluster_id * points_per_cluster + point_id;
            true_labels.push(cluster_id);

            for d in 0..dim {
                let noise: f64 = rng.gen_range(-0.5..0.5);
                data[(idx, d)] = center[d] + noise;
            }
        }
    }

    (data, true_labels)
}

/// Mean of the given rows of `data`.
#[allow(dead_code)]
pub fn mean_of(data: &Array2<f64>, rows: &[usize]) -> Array1<f64> {
    let mut sum = Array1::<f64>::zeros(data.ncols());
    for &i in rows {
        sum += &data.row(i);
    }
    sum / rows.len() as f64
}

/// Check that every point appears in exactly one cluster.
#[allow(dead_code)]
pub fn is_partition(clusters: &[Cluster], n: usize) -> bool {
    let mut seen = vec![0usize; n];
    for cluster in clusters {
        for &i in &cluster.members {
            if i >= n {
                return false;
            }
            seen[i] += 1;
        }
    }
    seen.iter().all(|&count| count == 1)
}

/// Verify that each point is assigned to its nearest centroid
/// (ties resolved toward the lower cluster index).
#[allow(dead_code)]
pub fn verify_optimal_assignment(data: &Array2<f64>, clusters: &[Cluster]) -> bool {
    for (label, cluster) in clusters.iter().enumerate() {
        for &i in &cluster.members {
            let point = data.row(i);
            let dist_to = |c: &Cluster| {
                point
                    .iter()
                    .zip(c.centroid.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
            };
            let assigned = dist_to(cluster);
            for (other, c) in clusters.iter().enumerate() {
                let d = dist_to(c);
                if d < assigned || (d == assigned && other < label) {
                    return false;
                }
            }
        }
    }
    true
}

/// Assert two vectors are equal within `eps` per coordinate.
#[allow(dead_code)]
pub fn assert_close(actual: &Array1<f64>, expected: &Array1<f64>, eps: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (a - e).abs() <= eps,
            "expected {expected}, got {actual} (eps {eps})"
        );
    }
}
