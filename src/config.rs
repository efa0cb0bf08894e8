/// Iteration cap used when the caller does not supply one.
pub const DEFAULT_MAX_ITERS: usize = 400;

/// Convergence threshold used when the caller does not supply one.
pub const DEFAULT_TOL: f64 = 1e-3;

/// Exclusive upper bound on the iteration cap accepted from the command line.
pub const MAX_ITERS_UPPER_BOUND: usize = 1000;

/// Configuration for Lloyd's k-means iteration
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assignment + update passes. Zero returns the
    /// initial centroids untouched.
    pub max_iters: usize,

    /// Convergence threshold. Iteration stops as soon as the largest
    /// per-cluster centroid movement is strictly below this value.
    /// Must be non-negative; zero disables early stopping.
    pub tol: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: DEFAULT_MAX_ITERS,
            tol: DEFAULT_TOL,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}
