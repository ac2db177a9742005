use std::fmt;

use crate::error::{KMeansError, Result};

/// Centroid tolerance below which a run is considered converged.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Iteration bound applied when `refine` is called with `max_iter = 0`.
pub const DEFAULT_SAFETY_CAP: usize = 10_000;

/// What to do with a cluster that receives no members in an assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Retain the previous centroid unchanged.
    #[default]
    KeepCentroid,
    /// Move the centroid onto the point farthest from its own centroid.
    FarthestPoint,
}

impl fmt::Display for EmptyClusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyClusterPolicy::KeepCentroid => write!(f, "keep"),
            EmptyClusterPolicy::FarthestPoint => write!(f, "farthest"),
        }
    }
}

impl std::str::FromStr for EmptyClusterPolicy {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "keep-centroid" => Ok(Self::KeepCentroid),
            "farthest" | "farthest-point" => Ok(Self::FarthestPoint),
            other => Err(KMeansError::InvalidConfig(format!(
                "unsupported empty cluster policy '{other}'"
            ))),
        }
    }
}

/// Knobs for a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Maximum centroid movement (Euclidean) still counted as converged.
    pub tolerance: f64,
    /// Iteration bound for unbounded refinement.
    pub safety_cap: usize,
    pub empty_cluster: EmptyClusterPolicy,
    /// RNG seed for k-means++; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            safety_cap: DEFAULT_SAFETY_CAP,
            empty_cluster: EmptyClusterPolicy::default(),
            seed: None,
        }
    }
}

impl KMeansConfig {
    /// Config with a fixed seed and defaults elsewhere.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(KMeansError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if self.safety_cap == 0 {
            return Err(KMeansError::InvalidConfig(
                "safety_cap must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
