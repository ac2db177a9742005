//! k-means++ clustering.
//!
//! A run is seeded with k-means++ ([`seeding::kmeans_plus_plus`]) and then
//! refined with Lloyd's iteration until every centroid settles within a
//! tolerance or an iteration budget runs out.
//!
//! ```no_run
//! use kmeanspp::{KMeans, KMeansConfig};
//!
//! let points = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
//! let mut run = KMeans::with_config(&points, 2, KMeansConfig::seeded(42))?;
//! let result = run.refine(0);
//! for cluster in &result.clusters {
//!     println!("{} -> {:?}", cluster.centroid, cluster.members);
//! }
//! # Ok::<(), kmeanspp::KMeansError>(())
//! ```

pub mod cluster;
pub mod config;
pub mod convert;
pub mod distance;
pub mod error;
pub mod kmeans;
pub mod lloyd;
pub mod seeding;

pub use cluster::{inertia, Cluster};
pub use config::{EmptyClusterPolicy, KMeansConfig};
pub use distance::{euclidean_distance, squared_euclidean_distance};
pub use error::{KMeansError, Result};
pub use kmeans::KMeans;
pub use lloyd::Refinement;
