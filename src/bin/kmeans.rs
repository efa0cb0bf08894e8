//! Command-line front end: cluster points read from stdin or files.
//!
//! Usage: `kmeans <K> [MAX_ITER] [--eps E] [--input FILE] [--join FILE] [--centroids FILE]`
//!
//! Prints one final centroid per line with 4 decimals.

use clap::Parser;
use lloyd_kmeans::io::{
    initial_from_first_k, inner_join, read_keyed_points, read_points, write_centroids,
    DEFAULT_DELIMITER, DEFAULT_PRECISION,
};
use lloyd_kmeans::params::ClusterParams;
use lloyd_kmeans::{lloyd, KMeansError};
use ndarray::Array2;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kmeans")]
#[command(about = "Cluster points with Lloyd's k-means", long_about = None)]
struct Cli {
    /// Number of clusters (1 < K < number of points)
    k: usize,

    /// Maximum number of iterations (1 < MAX_ITER < 1000, default 400)
    max_iter: Option<usize>,

    /// Convergence threshold (default 1e-3)
    #[arg(short, long)]
    eps: Option<f64>,

    /// Read points from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Inner-join keyed records of --input with this file (first column is the key)
    #[arg(short, long, requires = "input")]
    join: Option<PathBuf>,

    /// Initial centroids file (defaults to the first K points)
    #[arg(short, long)]
    centroids: Option<PathBuf>,

    /// Component delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Decimals printed per component
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Log per-iteration progress to stderr (debug level; RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), KMeansError> {
    let points = load_points(cli)?;
    let params = ClusterParams::resolve(cli.k, cli.max_iter, cli.eps, points.nrows())?;

    let initial = match &cli.centroids {
        Some(path) => read_points(open(path)?, cli.delimiter)?,
        None => initial_from_first_k(&points.view(), params.k)?,
    };

    let result = lloyd(&points.view(), &initial.view(), &params.to_config())?;

    write_centroids(io::stdout().lock(), &result.centroids.view(), cli.precision)
}

fn load_points(cli: &Cli) -> Result<Array2<f64>, KMeansError> {
    match (&cli.input, &cli.join) {
        (Some(left), Some(right)) => {
            let left = read_keyed_points(open(left)?, cli.delimiter)?;
            let right = read_keyed_points(open(right)?, cli.delimiter)?;
            inner_join(&left, &right)
        }
        (Some(path), None) => read_points(open(path)?, cli.delimiter),
        (None, _) => read_points(io::stdin().lock(), cli.delimiter),
    }
}

fn open(path: &Path) -> Result<BufReader<File>, KMeansError> {
    let file = File::open(path).map_err(|e| {
        KMeansError::Io(io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    Ok(BufReader::new(file))
}
