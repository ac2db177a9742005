use anyhow::Result;
use clap::Parser;
use kmeanspp::convert::centroids_matrix;
use kmeanspp::{EmptyClusterPolicy, KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::prelude::*;
use rand_distr::Normal;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Clusters a synthetic dataset with k-means++ and prints a summary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of data points
    #[arg(long, env = "KMEANS_SAMPLES", default_value = "100000")]
    samples: usize,

    /// Number of dimensions
    #[arg(long, env = "KMEANS_FEATURES", default_value = "10")]
    features: usize,

    /// Number of desired clusters
    #[arg(long, env = "KMEANS_CLUSTERS", default_value = "5")]
    clusters: usize,

    /// Stop once the pass count exceeds this; 0 runs until convergence
    #[arg(long, env = "KMEANS_MAX_ITER", default_value = "100")]
    max_iter: usize,

    /// Centroid movement below which the run counts as converged
    #[arg(long, env = "KMEANS_TOLERANCE", default_value = "1e-6")]
    tolerance: f64,

    /// RNG seed for data generation and seeding
    #[arg(long, env = "KMEANS_SEED")]
    seed: Option<u64>,

    /// Standard deviation of each blob; 0 draws uniform noise instead
    #[arg(long, env = "KMEANS_SPREAD", default_value = "5.0")]
    spread: f64,

    /// Empty cluster policy: keep | farthest
    #[arg(long, env = "KMEANS_EMPTY_CLUSTER", default_value = "keep")]
    empty_cluster: EmptyClusterPolicy,
}

/// Uses JSON output when `RUST_LOG_FORMAT=json`.
fn init_tracing() {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().flatten_event(true))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

fn generate_random_matrix<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Array2<f64> {
    Array2::random_using((rows, cols), Uniform::new(0.0, 1.0), rng)
}

/// Points scattered around `n_clusters` centers drawn from N(50, 10).
fn generate_blobs<R: Rng>(
    n_samples: usize,
    n_features: usize,
    n_clusters: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let center_distribution = Normal::new(50.0, 10.0)?;
    let centers: Vec<Vec<f64>> = (0..n_clusters)
        .map(|_| {
            (0..n_features)
                .map(|_| center_distribution.sample(rng))
                .collect()
        })
        .collect();

    let point_distribution = Normal::new(0.0, spread)?;
    let mut data = Vec::with_capacity(n_samples * n_features);
    for _ in 0..n_samples {
        let center = &centers[rng.gen_range(0..n_clusters)];
        for &feature in center {
            data.push(feature + point_distribution.sample(rng));
        }
    }

    Ok(Array2::from_shape_vec((n_samples, n_features), data)?)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    anyhow::ensure!(args.clusters > 0, "--clusters must be at least 1");

    println!("Generating random dataset...");
    println!(
        "Number of Samples: {}, Number of Features: {}, Number of Clusters: {}",
        args.samples, args.features, args.clusters
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data = if args.spread > 0.0 {
        generate_blobs(
            args.samples,
            args.features,
            args.clusters,
            args.spread,
            &mut rng,
        )?
    } else {
        generate_random_matrix(args.samples, args.features, &mut rng)
    };

    println!("Dataset generated.");

    let config = KMeansConfig {
        tolerance: args.tolerance,
        empty_cluster: args.empty_cluster,
        seed: args.seed,
        ..KMeansConfig::default()
    };
    let mut run = KMeans::from_array(data, args.clusters, config)?;

    println!("Starting k-means clustering...");
    let result = run.refine(args.max_iter);
    println!(
        "Clustering completed after {} iterations (converged: {}).",
        result.iterations, result.converged
    );

    println!("Final Centroids:\n{}", centroids_matrix(&result.clusters)?);
    println!("Inertia: {:.4}", result.inertia());
    println!("Cluster Assignment Counts:");
    for (cluster_id, cluster) in result.clusters.iter().enumerate() {
        println!("Cluster {}: {} points", cluster_id, cluster.len());
    }

    Ok(())
}
