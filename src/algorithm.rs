use crate::config::KMeansConfig;
use crate::distance::{assign_labels, compute_max_shift};
use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2};
use std::time::Instant;
use tracing::{debug, info};

/// Result of Lloyd's iteration
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Final centroids, shape (k, dim)
    pub centroids: Array2<f64>,
    /// Cluster of each point from the last assignment step. Empty when no
    /// iteration ran.
    pub labels: Vec<usize>,
    /// Number of assignment + update passes performed
    pub n_iterations: usize,
    /// Whether the loop stopped because the shift dropped below `tol`
    pub converged: bool,
    /// Largest centroid movement of the last pass (0 when no pass ran)
    pub max_shift: f64,
}

/// Per-cluster running sums and point counts for one update step.
#[derive(Debug)]
pub(crate) struct ClusterAccumulator {
    sums: Array2<f64>,
    counts: Vec<usize>,
}

impl ClusterAccumulator {
    pub(crate) fn try_new(k: usize, dim: usize) -> Result<Self, KMeansError> {
        Ok(Self {
            sums: try_zeros_matrix(k, dim, "cluster sums")?,
            counts: try_filled(k, 0usize, "cluster sizes")?,
        })
    }

    fn reset(&mut self) {
        self.sums.fill(0.0);
        self.counts.fill(0);
    }

    /// Add every point to the running sum of its cluster.
    ///
    /// Runs serially in point order so the summation order never changes.
    fn accumulate(&mut self, points: &ArrayView2<f64>, labels: &[usize]) {
        for (point, &label) in points.outer_iter().zip(labels) {
            self.counts[label] += 1;
            let mut sum = self.sums.row_mut(label);
            sum += &point;
        }
    }

    /// Write each cluster's mean into `out`. Clusters that received no points
    /// keep their row from `previous`. Returns the number of such clusters.
    fn write_means(&self, previous: &ArrayView2<f64>, out: &mut Array2<f64>) -> usize {
        let mut empty = 0;
        for (k, mut row) in out.outer_iter_mut().enumerate() {
            let count = self.counts[k];
            if count > 0 {
                let n = count as f64;
                row.zip_mut_with(&self.sums.row(k), |c, &s| *c = s / n);
            } else {
                row.assign(&previous.row(k));
                empty += 1;
            }
        }
        empty
    }
}

/// Check the engine preconditions for a point set, initial centroid set and
/// configuration.
pub(crate) fn validate_inputs(
    points: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
    config: &KMeansConfig,
) -> Result<(), KMeansError> {
    let n_points = points.nrows();
    let dim = points.ncols();
    let k = config.k;

    if n_points == 0 {
        return Err(KMeansError::InsufficientData(
            "point set is empty".to_string(),
        ));
    }

    if dim == 0 {
        return Err(KMeansError::InvalidDimensions(
            "points must have at least one component".to_string(),
        ));
    }

    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if initial_centroids.nrows() != k {
        return Err(KMeansError::InvalidK(format!(
            "expected {} initial centroids, got {}",
            k,
            initial_centroids.nrows()
        )));
    }

    if initial_centroids.ncols() != dim {
        return Err(KMeansError::InvalidDimensions(format!(
            "points have {} components but initial centroids have {}",
            dim,
            initial_centroids.ncols()
        )));
    }

    if let Some(pos) = points.iter().position(|x| !x.is_finite()) {
        return Err(KMeansError::NonFinite(format!(
            "point {} has a non-finite component",
            pos / dim
        )));
    }

    if let Some(pos) = initial_centroids.iter().position(|x| !x.is_finite()) {
        return Err(KMeansError::NonFinite(format!(
            "initial centroid {} has a non-finite component",
            pos / dim
        )));
    }

    if config.tol.is_nan() || config.tol < 0.0 {
        return Err(KMeansError::InvalidTolerance(format!(
            "tolerance must be non-negative, got {}",
            config.tol
        )));
    }

    Ok(())
}

/// Run Lloyd's algorithm from the given initial centroids.
///
/// Each pass assigns every point to its nearest centroid, replaces each
/// centroid by the mean of its points (empty clusters keep their previous
/// value) and measures the largest centroid movement. The newly computed
/// centroids always become the current set; the loop then stops if that
/// movement is strictly below `config.tol`, or once `config.max_iters`
/// passes have run.
///
/// `points` is only read. The result is bit-identical for identical inputs.
pub fn lloyd(
    points: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
    config: &KMeansConfig,
) -> Result<KMeansResult, KMeansError> {
    validate_inputs(points, initial_centroids, config)?;

    let n_points = points.nrows();
    let dim = points.ncols();
    let k = config.k;

    debug!(n_points, dim, k, max_iters = config.max_iters, tol = config.tol, "starting k-means");

    let mut centroids = try_zeros_matrix(k, dim, "centroids")?;
    centroids.assign(initial_centroids);
    let mut next_centroids = try_zeros_matrix(k, dim, "new centroids")?;
    let mut accumulator = ClusterAccumulator::try_new(k, dim)?;
    let mut labels: Vec<usize> = Vec::new();
    labels
        .try_reserve_exact(n_points)
        .map_err(|e| KMeansError::Allocation(format!("assignments: {}", e)))?;

    let mut n_iterations = 0;
    let mut converged = false;
    let mut max_shift = 0.0;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        // Assignment
        assign_labels(points, &centroids.view(), &mut labels);

        // Update
        accumulator.reset();
        accumulator.accumulate(points, &labels);
        let empty_clusters = accumulator.write_means(&centroids.view(), &mut next_centroids);

        // Commit, then decide whether to continue
        max_shift = compute_max_shift(&centroids.view(), &next_centroids.view());
        std::mem::swap(&mut centroids, &mut next_centroids);

        debug!(
            iteration = n_iterations,
            max_shift,
            empty_clusters,
            elapsed_us = iter_start.elapsed().as_micros() as u64,
            "k-means iteration"
        );

        if max_shift < config.tol {
            converged = true;
            break;
        }
    }

    if converged {
        info!(n_iterations, max_shift, tol = config.tol, "k-means converged");
    } else {
        info!(n_iterations, max_shift, "k-means reached iteration cap");
    }

    Ok(KMeansResult {
        centroids,
        labels,
        n_iterations,
        converged,
        max_shift,
    })
}

/// Run k-means and return only the final centroids.
///
/// `k` and `dim` are the caller's declared shape: `points` must be
/// `(n_points, dim)` and `initial_centroids` must be `(k, dim)`.
///
/// # Errors
///
/// Input-class errors for any shape or parameter violation, and
/// [`KMeansError::Allocation`] when working buffers cannot be allocated.
pub fn fit(
    points: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
    k: usize,
    dim: usize,
    max_iter: usize,
    eps: f64,
) -> Result<Array2<f64>, KMeansError> {
    if points.ncols() != dim {
        return Err(KMeansError::InvalidDimensions(format!(
            "expected points with {} components, got {}",
            dim,
            points.ncols()
        )));
    }

    let config = KMeansConfig::new(k).with_max_iters(max_iter).with_tol(eps);
    lloyd(points, initial_centroids, &config).map(|result| result.centroids)
}

/// Predict cluster assignments for new data using trained centroids
pub fn predict_labels(
    points: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
) -> Result<Vec<usize>, KMeansError> {
    let mut labels = Vec::new();
    labels
        .try_reserve_exact(points.nrows())
        .map_err(|e| KMeansError::Allocation(format!("assignments: {}", e)))?;
    assign_labels(points, centroids, &mut labels);
    Ok(labels)
}

fn try_filled<T: Clone>(len: usize, value: T, what: &str) -> Result<Vec<T>, KMeansError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| KMeansError::Allocation(format!("{}: {}", what, e)))?;
    buf.resize(len, value);
    Ok(buf)
}

fn try_zeros_matrix(rows: usize, cols: usize, what: &str) -> Result<Array2<f64>, KMeansError> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        KMeansError::Allocation(format!("{}: {} x {} overflows", what, rows, cols))
    })?;
    let buf = try_filled(len, 0.0f64, what)?;
    Array2::from_shape_vec((rows, cols), buf)
        .map_err(|e| KMeansError::InvalidDimensions(format!("{}: {}", what, e)))
}
