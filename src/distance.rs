use ndarray::{ArrayBase, ArrayView1, Data, Ix1, Zip};

use crate::error::{KMeansError, Result};

/// Euclidean distance between two vectors of equal length.
///
/// Returns [`KMeansError::DimensionMismatch`] when the lengths differ.
pub fn euclidean_distance<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    squared_euclidean_distance(a, b).map(f64::sqrt)
}

/// Squared Euclidean distance; used for seeding weights and inertia.
pub fn squared_euclidean_distance<S1, S2>(
    a: &ArrayBase<S1, Ix1>,
    b: &ArrayBase<S2, Ix1>,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.len() != b.len() {
        return Err(KMeansError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(squared_distance_unchecked(a.view(), b.view()))
}

/// Squared distance for rows already known to share a dimensionality
/// (rows of the point matrix against cluster centroids).
pub(crate) fn squared_distance_unchecked(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    Zip::from(a).and(b).fold(0.0, |acc, &x, &y| {
        let diff = x - y;
        acc + diff * diff
    })
}
