use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::cluster::Cluster;
use crate::config::KMeansConfig;
use crate::convert::vectors_to_array;
use crate::error::{KMeansError, Result};
use crate::lloyd::{self, Refinement};
use crate::seeding::kmeans_plus_plus;

/// State of one clustering run: the point set, the current clusters and
/// the random source used for seeding.
///
/// Construction validates the input and seeds k centroids with k-means++.
/// [`KMeans::refine`] then runs Lloyd's iteration from the current
/// centroids.
#[derive(Debug)]
pub struct KMeans {
    points: Array2<f64>,
    clusters: Vec<Cluster>,
    k: usize,
    config: KMeansConfig,
    rng: StdRng,
}

impl KMeans {
    /// Seeds a run over `points` with the default configuration.
    pub fn new(points: &[Vec<f64>], k: usize) -> Result<Self> {
        Self::with_config(points, k, KMeansConfig::default())
    }

    pub fn with_config(points: &[Vec<f64>], k: usize, config: KMeansConfig) -> Result<Self> {
        let points = vectors_to_array(points)?;
        Self::from_array(points, k, config)
    }

    /// Seeds a run over the rows of `points`.
    pub fn from_array(points: Array2<f64>, k: usize, config: KMeansConfig) -> Result<Self> {
        config.validate()?;
        if points.nrows() == 0 {
            return Err(KMeansError::EmptyInput);
        }
        if points.ncols() == 0 {
            return Err(KMeansError::ZeroDimension);
        }
        check_finite(&points)?;
        if k == 0 || k > points.nrows() {
            return Err(KMeansError::InvalidK {
                k,
                n: points.nrows(),
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut run = KMeans {
            points,
            clusters: Vec::new(),
            k,
            config,
            rng,
        };
        run.reseed()?;
        Ok(run)
    }

    /// Replaces the current centroids with a fresh k-means++ draw over the
    /// current point set.
    pub fn reseed(&mut self) -> Result<()> {
        let centroids = kmeans_plus_plus(&self.points, self.k, &mut self.rng)?;
        self.clusters = centroids.into_iter().map(Cluster::new).collect();
        info!(
            points = self.points.nrows(),
            dim = self.points.ncols(),
            k = self.k,
            "seeded k-means++ centroids"
        );
        Ok(())
    }

    /// Runs Lloyd's iteration until every centroid moves by at most the
    /// configured tolerance, or the pass count exceeds `max_iter` (at most
    /// `max_iter + 1` passes). `max_iter = 0` means no cap other than the
    /// configured safety bound.
    pub fn refine(&mut self, max_iter: usize) -> Refinement {
        lloyd::refine(&self.points, &mut self.clusters, max_iter, &self.config)
    }

    /// Appends points to the run. Clusters are not recomputed; the next
    /// [`KMeans::refine`] call sees the new points.
    pub fn add_points(&mut self, points: &[Vec<f64>]) -> Result<()> {
        let dim = self.dim();
        for p in points {
            if p.len() != dim {
                return Err(KMeansError::DimensionMismatch {
                    expected: dim,
                    found: p.len(),
                });
            }
        }
        let offset = self.points.nrows();
        for (i, p) in points.iter().enumerate() {
            if p.iter().any(|v| !v.is_finite()) {
                return Err(KMeansError::NonFinite { index: offset + i });
            }
        }
        for p in points {
            self.points.push_row(ArrayView1::from(p.as_slice()))?;
        }
        debug!(added = points.len(), total = self.points.nrows(), "points appended");
        Ok(())
    }

    /// Index of the cluster whose centroid is nearest to `point`.
    pub fn predict(&self, point: &[f64]) -> Result<usize> {
        if point.len() != self.dim() {
            return Err(KMeansError::DimensionMismatch {
                expected: self.dim(),
                found: point.len(),
            });
        }
        Ok(lloyd::nearest_centroid(ArrayView1::from(point), &self.clusters).0)
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

fn check_finite(points: &Array2<f64>) -> Result<()> {
    for (i, row) in points.rows().into_iter().enumerate() {
        if row.iter().any(|v| !v.is_finite()) {
            return Err(KMeansError::NonFinite { index: i });
        }
    }
    Ok(())
}
