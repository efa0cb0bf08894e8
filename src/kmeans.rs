use crate::algorithm::{lloyd, predict_labels, KMeansResult};
use crate::config::KMeansConfig;
use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2};

/// Lloyd's k-means model with a scikit-learn style API.
///
/// Initial centroids are always supplied by the caller; the model never
/// picks seeds on its own.
///
/// # Example
///
/// ```
/// use lloyd_kmeans::KMeans;
/// use ndarray::array;
///
/// let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
/// let initial = array![[0.0, 0.0], [10.0, 0.0]];
///
/// let mut kmeans = KMeans::new(2, 2);
/// kmeans.fit(&points.view(), &initial.view()).unwrap();
///
/// let centroids = kmeans.centroids().unwrap();
/// assert_eq!(centroids.row(0).to_vec(), vec![0.0, 0.5]);
/// assert_eq!(kmeans.predict(&points.view()).unwrap(), vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of components per point
    dim: usize,

    /// Outcome of the last fit (None if not yet fitted)
    result: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new model with the default iteration cap and tolerance.
    ///
    /// # Arguments
    ///
    /// * `dim` - Number of components per point
    /// * `k` - Number of clusters
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(dim: usize, k: usize) -> Self {
        assert!(k > 0, "k must be greater than 0");

        Self {
            config: KMeansConfig::new(k),
            dim,
            result: None,
        }
    }

    /// Create a new model with custom configuration. The dimension is taken
    /// from the first call to [`fit`](Self::fit).
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            dim: 0,
            config,
            result: None,
        }
    }

    /// Fit the model, starting from `initial_centroids` of shape (k, dim).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The point dimension differs from the model's
    /// - `initial_centroids` does not have exactly k rows of the same dimension
    /// - Working buffers cannot be allocated
    pub fn fit(
        &mut self,
        points: &ArrayView2<f64>,
        initial_centroids: &ArrayView2<f64>,
    ) -> Result<&mut Self, KMeansError> {
        let n_features = points.ncols();

        if self.dim == 0 {
            self.dim = n_features;
        } else if n_features != self.dim {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.dim, n_features
            )));
        }

        let result = lloyd(points, initial_centroids, &self.config)?;
        self.result = Some(result);
        Ok(self)
    }

    /// Nearest-centroid label for each point, using the fitted centroids.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted yet or the data
    /// dimension does not match.
    pub fn predict(&self, points: &ArrayView2<f64>) -> Result<Vec<usize>, KMeansError> {
        let result = self.result.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = points.ncols();
        if n_features != self.dim {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.dim, n_features
            )));
        }

        predict_labels(points, &result.centroids.view())
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(
        &mut self,
        points: &ArrayView2<f64>,
        initial_centroids: &ArrayView2<f64>,
    ) -> Result<Vec<usize>, KMeansError> {
        self.fit(points, initial_centroids)?;
        self.predict(points)
    }

    /// Centroids of the fitted model, `None` before the first fit.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.result.as_ref().map(|r| &r.centroids)
    }

    /// Labels from the last assignment step of the fit.
    pub fn labels(&self) -> Option<&[usize]> {
        self.result.as_ref().map(|r| r.labels.as_slice())
    }

    /// Number of passes the last fit performed (0 before fitting).
    pub fn n_iterations(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.n_iterations)
    }

    /// Whether the last fit stopped on the tolerance rather than the cap.
    pub fn converged(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.converged)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of components per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
