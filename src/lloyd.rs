use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cluster::{inertia, Cluster};
use crate::config::{EmptyClusterPolicy, KMeansConfig};
use crate::distance::squared_distance_unchecked;

/// Outcome of a refinement run.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub clusters: Vec<Cluster>,
    /// Number of assignment + update passes performed.
    pub iterations: usize,
    /// Whether every centroid settled within the tolerance.
    pub converged: bool,
    /// Total within-cluster sum of squares after each update.
    pub inertia_history: Vec<f64>,
}

impl Refinement {
    pub fn inertia(&self) -> f64 {
        self.inertia_history.last().copied().unwrap_or(f64::NAN)
    }
}

/// Index of the closest centroid and its squared distance.
/// Ties go to the lowest index.
pub(crate) fn nearest_centroid(point: ArrayView1<f64>, clusters: &[Cluster]) -> (usize, f64) {
    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (j, cluster) in clusters.iter().enumerate() {
        let dist = squared_distance_unchecked(point, cluster.centroid.view());
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    (best, best_dist)
}

/// Assigns every point to its nearest centroid and rebuilds the member lists.
pub(crate) fn assign_points(points: &Array2<f64>, clusters: &mut [Cluster]) {
    let centroids: &[Cluster] = clusters;
    let labels: Vec<usize> = points
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|row| nearest_centroid(row, centroids).0)
        .collect();

    for cluster in clusters.iter_mut() {
        cluster.members.clear();
    }
    for (i, &label) in labels.iter().enumerate() {
        clusters[label].members.push(i);
    }
}

/// Lloyd's iteration over `clusters`, in place.
///
/// Stops once the pass count exceeds `max_iter`, so a non-zero `max_iter`
/// allows up to `max_iter + 1` passes. `max_iter = 0` runs until
/// convergence, bounded by `config.safety_cap` passes.
pub(crate) fn refine(
    points: &Array2<f64>,
    clusters: &mut [Cluster],
    max_iter: usize,
    config: &KMeansConfig,
) -> Refinement {
    let cap = if max_iter == 0 {
        config.safety_cap
    } else {
        max_iter.saturating_add(1)
    };

    let mut iterations = 0;
    let mut converged = false;
    let mut inertia_history = Vec::new();

    while iterations < cap {
        iterations += 1;

        assign_points(points, clusters);

        let previous: Vec<_> = clusters.iter().map(|c| c.centroid.clone()).collect();
        let mut empty = Vec::new();
        for (idx, cluster) in clusters.iter_mut().enumerate() {
            if !cluster.update_centroid(points) {
                empty.push(idx);
            }
        }
        if !empty.is_empty() {
            warn!(
                iteration = iterations,
                empty = ?empty,
                policy = %config.empty_cluster,
                "clusters received no members"
            );
            handle_empty_clusters(points, clusters, &empty, config.empty_cluster);
        }

        let max_shift = previous
            .iter()
            .zip(clusters.iter())
            .map(|(old, c)| squared_distance_unchecked(old.view(), c.centroid.view()).sqrt())
            .fold(0.0, f64::max);
        let current = inertia(points, clusters);
        inertia_history.push(current);
        debug!(iteration = iterations, max_shift, inertia = current, "lloyd iteration");

        if max_shift <= config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        info!(iterations, "k-means converged");
    } else {
        info!(iterations, cap, "k-means stopped at iteration cap");
    }

    Refinement {
        clusters: clusters.to_vec(),
        iterations,
        converged,
        inertia_history,
    }
}

fn handle_empty_clusters(
    points: &Array2<f64>,
    clusters: &mut [Cluster],
    empty: &[usize],
    policy: EmptyClusterPolicy,
) {
    match policy {
        EmptyClusterPolicy::KeepCentroid => {}
        EmptyClusterPolicy::FarthestPoint => {
            // Distance of each point to the centroid of the cluster it belongs to.
            let mut spread = vec![0.0f64; points.nrows()];
            for cluster in clusters.iter() {
                for &i in &cluster.members {
                    spread[i] = squared_distance_unchecked(points.row(i), cluster.centroid.view());
                }
            }
            for &idx in empty {
                let mut farthest = 0usize;
                let mut farthest_dist = f64::NEG_INFINITY;
                for (i, &d) in spread.iter().enumerate() {
                    if d > farthest_dist {
                        farthest_dist = d;
                        farthest = i;
                    }
                }
                clusters[idx].centroid = points.row(farthest).to_owned();
                // Never hand the same point to two empty clusters.
                spread[farthest] = f64::NEG_INFINITY;
            }
        }
    }
}
