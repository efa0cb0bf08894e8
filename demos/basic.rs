//! Basic example demonstrating lloyd-kmeans usage
//!
//! Run with: cargo run --example basic --release

use lloyd_kmeans::io::initial_from_first_k;
use lloyd_kmeans::{KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== lloyd-kmeans example ===\n");

    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    // Points scattered around 3 centers, interleaved so the first 3 rows
    // come from different clusters
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));
    let mut data = Array2::<f64>::zeros((n_samples, n_features));
    for i in 0..n_samples {
        let center = centers[i % n_clusters];
        data[[i, 0]] = center[0] + noise[[i, 0]];
        data[[i, 1]] = center[1] + noise[[i, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let initial = initial_from_first_k(&data.view(), n_clusters).expect("Seeding failed");
    let config = KMeansConfig::new(n_clusters).with_max_iters(100).with_tol(1e-6);

    let mut kmeans = KMeans::with_config(config);
    kmeans
        .fit(&data.view(), &initial.view())
        .expect("Clustering failed");

    println!(
        "\nFinished after {} iterations (converged: {})",
        kmeans.n_iterations(),
        kmeans.converged()
    );

    println!("\nLearned centroids:");
    let centroids = kmeans.centroids().expect("Model is fitted");
    for (i, row) in centroids.outer_iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", i, row[0], row[1]);
    }

    let labels = kmeans.predict(&data.view()).expect("Prediction failed");
    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in &labels {
        cluster_counts[label] += 1;
    }

    println!("\nCluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }

    println!("\n=== Done! ===");
}
