use ndarray::{Array2, ArrayView1};

use crate::cluster::Cluster;
use crate::error::{KMeansError, Result};

/// Packs equal-length vectors into a row-major matrix.
pub fn vectors_to_array(vectors: &[Vec<f64>]) -> Result<Array2<f64>> {
    let first = vectors.first().ok_or(KMeansError::EmptyInput)?;
    let dim = first.len();
    if dim == 0 {
        return Err(KMeansError::ZeroDimension);
    }

    let mut flat = Vec::with_capacity(vectors.len() * dim);
    for v in vectors {
        if v.len() != dim {
            return Err(KMeansError::DimensionMismatch {
                expected: dim,
                found: v.len(),
            });
        }
        flat.extend_from_slice(v);
    }
    Ok(Array2::from_shape_vec((vectors.len(), dim), flat)?)
}

/// Unpacks matrix rows back into owned vectors.
pub fn array_to_vectors(array: &Array2<f64>) -> Vec<Vec<f64>> {
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Stacks cluster centroids into a `k x dim` matrix.
pub fn centroids_matrix(clusters: &[Cluster]) -> Result<Array2<f64>> {
    let views: Vec<ArrayView1<f64>> = clusters.iter().map(|c| c.centroid.view()).collect();
    Ok(ndarray::stack(ndarray::Axis(0), &views)?)
}
