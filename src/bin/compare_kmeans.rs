//! Binary for comparing lloyd-kmeans output against reference centroids
//!
//! Reads points and initial centroids from .npy files, runs k-means, and
//! saves the resulting centroids to another .npy file for comparison.
//!
//! Usage: `compare-kmeans <points.npy> <initial.npy> <output.npy> <max_iters> <tol>`

use lloyd_kmeans::{lloyd, KMeansConfig};
use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::env;
use std::fs::File;
use std::io::BufReader;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 6 {
        eprintln!(
            "Usage: {} <points.npy> <initial.npy> <output.npy> <max_iters> <tol>",
            args[0]
        );
        std::process::exit(1);
    }

    let points_path = &args[1];
    let initial_path = &args[2];
    let output_path = &args[3];
    let max_iters: usize = args[4].parse()?;
    let tol: f64 = args[5].parse()?;

    let points: Array2<f64> = Array2::read_npy(BufReader::new(File::open(points_path)?))?;
    let initial: Array2<f64> = Array2::read_npy(BufReader::new(File::open(initial_path)?))?;

    info!(
        n_points = points.nrows(),
        dim = points.ncols(),
        k = initial.nrows(),
        max_iters,
        tol,
        "loaded inputs"
    );

    let config = KMeansConfig::new(initial.nrows())
        .with_max_iters(max_iters)
        .with_tol(tol);
    let result = lloyd(&points.view(), &initial.view(), &config)?;

    info!(
        n_iterations = result.n_iterations,
        converged = result.converged,
        "finished"
    );

    let writer = File::create(output_path)?;
    result.centroids.write_npy(writer)?;

    info!(path = %output_path, "saved centroids");

    Ok(())
}
