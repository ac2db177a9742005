use ndarray::{Array1, Array2};
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::distance::squared_distance_unchecked;
use crate::error::{KMeansError, Result};

/// K-means++ initialization.
///
/// The first centroid is a uniformly random point; every further centroid
/// is sampled with probability proportional to the squared distance from
/// the point to its nearest already chosen centroid. The returned
/// centroids are owned copies of the chosen rows.
pub fn kmeans_plus_plus<R: Rng + ?Sized>(
    points: &Array2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Vec<Array1<f64>>> {
    let n = points.nrows();
    if n == 0 {
        return Err(KMeansError::EmptyInput);
    }
    if k == 0 || k > n {
        return Err(KMeansError::InvalidK { k, n });
    }

    let mut centroids = Vec::with_capacity(k);
    let first = rng.gen_range(0..n);
    centroids.push(points.row(first).to_owned());
    debug!(centroid = 0, point = first, "k-means++ pick");

    // Squared distance from every point to its nearest chosen centroid.
    let mut min_sq_dists = vec![f64::INFINITY; n];

    for i in 1..k {
        update_min_distances(points, &centroids[i - 1], &mut min_sq_dists);

        let chosen = sample_weighted(&min_sq_dists, rng);
        centroids.push(points.row(chosen).to_owned());
        debug!(
            centroid = i,
            point = chosen,
            weight = min_sq_dists[chosen],
            "k-means++ pick"
        );
    }

    Ok(centroids)
}

/// Folds the newest centroid into the running nearest-centroid distances.
fn update_min_distances(points: &Array2<f64>, latest: &Array1<f64>, min_sq_dists: &mut [f64]) {
    min_sq_dists
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, min_dist)| {
            let dist = squared_distance_unchecked(points.row(i), latest.view());
            if dist < *min_dist {
                *min_dist = dist;
            }
        });
}

/// Draws an index with probability proportional to its weight.
///
/// A uniform value in `[0, total)` is compared against the running sum of
/// weights and the first index whose cumulative weight exceeds it wins. If
/// rounding leaves the draw unmatched, the last index with positive weight
/// is returned. Zero total weight degrades to a uniform draw.
pub(crate) fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty());
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.gen_range(0..weights.len());
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > target {
            return i;
        }
    }

    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}
