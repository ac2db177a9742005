use ndarray::{Array1, Array2, Axis};

use crate::distance::squared_distance_unchecked;

/// A centroid plus the indices of the points currently assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: Array1<f64>,
    /// Row indices into the run's point matrix.
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn new(centroid: Array1<f64>) -> Self {
        Cluster {
            centroid,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Copies the member rows out of `points`.
    pub fn member_points(&self, points: &Array2<f64>) -> Array2<f64> {
        points.select(Axis(0), &self.members)
    }

    /// Sum of squared distances from the members to the centroid.
    pub fn sum_of_squares(&self, points: &Array2<f64>) -> f64 {
        self.members
            .iter()
            .map(|&i| squared_distance_unchecked(points.row(i), self.centroid.view()))
            .sum()
    }

    /// Moves the centroid to the mean of the current members.
    ///
    /// Returns `false` and leaves the centroid untouched when the cluster
    /// has no members.
    pub(crate) fn update_centroid(&mut self, points: &Array2<f64>) -> bool {
        if self.members.is_empty() {
            return false;
        }
        let mut sum = Array1::<f64>::zeros(points.ncols());
        for &i in &self.members {
            sum += &points.row(i);
        }
        sum /= self.members.len() as f64;
        self.centroid = sum;
        true
    }
}

/// Total within-cluster sum of squared distances.
pub fn inertia(points: &Array2<f64>, clusters: &[Cluster]) -> f64 {
    clusters.iter().map(|c| c.sum_of_squares(points)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn update_moves_centroid_to_member_mean() {
        let points = array![[0.0, 0.0], [2.0, 4.0], [100.0, 100.0]];
        let mut cluster = Cluster::new(array![50.0, 50.0]);
        cluster.members = vec![0, 1];

        assert!(cluster.update_centroid(&points));
        assert_eq!(cluster.centroid, array![1.0, 2.0]);
        assert_eq!(cluster.member_points(&points), array![[0.0, 0.0], [2.0, 4.0]]);
    }

    #[test]
    fn empty_cluster_keeps_its_centroid() {
        let points = array![[0.0, 0.0], [2.0, 4.0]];
        let mut cluster = Cluster::new(array![7.0, 7.0]);

        assert!(!cluster.update_centroid(&points));
        assert_eq!(cluster.centroid, array![7.0, 7.0]);
        assert!(cluster.is_empty());
    }

    #[test]
    fn inertia_sums_squared_member_distances() {
        let points = array![[0.0, 0.0], [0.0, 2.0], [10.0, 0.0]];
        let mut a = Cluster::new(array![0.0, 1.0]);
        a.members = vec![0, 1];
        let mut b = Cluster::new(array![10.0, 0.0]);
        b.members = vec![2];

        assert_eq!(inertia(&points, &[a, b]), 2.0);
    }
}
