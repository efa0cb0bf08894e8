//! Validation of user-supplied clustering parameters.
//!
//! These bounds are stricter than what the engine itself needs: they
//! describe what the command-line front end accepts.

use crate::config::{KMeansConfig, DEFAULT_MAX_ITERS, DEFAULT_TOL, MAX_ITERS_UPPER_BOUND};
use crate::error::KMeansError;

/// Require `1 < k < n_points`.
pub fn validate_k(k: usize, n_points: usize) -> Result<usize, KMeansError> {
    if k <= 1 || k >= n_points {
        return Err(KMeansError::InvalidK(format!(
            "Incorrect number of clusters! expected 1 < K < {}, got {}",
            n_points, k
        )));
    }
    Ok(k)
}

/// Require `1 < max_iter < 1000`, defaulting to 400 when absent.
pub fn validate_max_iters(max_iters: Option<usize>) -> Result<usize, KMeansError> {
    match max_iters {
        None => Ok(DEFAULT_MAX_ITERS),
        Some(n) if n > 1 && n < MAX_ITERS_UPPER_BOUND => Ok(n),
        Some(n) => Err(KMeansError::InvalidMaxIters(format!(
            "Incorrect maximum iteration! expected 1 < max_iter < {}, got {}",
            MAX_ITERS_UPPER_BOUND, n
        ))),
    }
}

/// Require a non-negative threshold, defaulting to 1e-3 when absent.
pub fn validate_eps(eps: Option<f64>) -> Result<f64, KMeansError> {
    match eps {
        None => Ok(DEFAULT_TOL),
        Some(e) if e >= 0.0 && e.is_finite() => Ok(e),
        Some(e) => Err(KMeansError::InvalidTolerance(format!(
            "Invalid epsilon! expected a finite eps >= 0, got {}",
            e
        ))),
    }
}

/// Validated clustering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    pub k: usize,
    pub max_iters: usize,
    pub eps: f64,
}

impl ClusterParams {
    /// Validate raw parameters against a point set of `n_points` points.
    pub fn resolve(
        k: usize,
        max_iters: Option<usize>,
        eps: Option<f64>,
        n_points: usize,
    ) -> Result<Self, KMeansError> {
        Ok(Self {
            k: validate_k(k, n_points)?,
            max_iters: validate_max_iters(max_iters)?,
            eps: validate_eps(eps)?,
        })
    }

    /// Engine configuration for these parameters.
    pub fn to_config(&self) -> KMeansConfig {
        KMeansConfig::new(self.k)
            .with_max_iters(self.max_iters)
            .with_tol(self.eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_k_bounds() {
        assert!(validate_k(1, 10).is_err());
        assert!(validate_k(10, 10).is_err());
        assert_eq!(validate_k(2, 10).unwrap(), 2);
        assert_eq!(validate_k(9, 10).unwrap(), 9);
    }

    #[test]
    fn test_validate_max_iters() {
        assert_eq!(validate_max_iters(None).unwrap(), 400);
        assert_eq!(validate_max_iters(Some(2)).unwrap(), 2);
        assert_eq!(validate_max_iters(Some(999)).unwrap(), 999);
        assert!(matches!(
            validate_max_iters(Some(1)),
            Err(KMeansError::InvalidMaxIters(_))
        ));
        assert!(validate_max_iters(Some(1000)).is_err());
    }

    #[test]
    fn test_validate_eps() {
        assert_eq!(validate_eps(None).unwrap(), 1e-3);
        assert_eq!(validate_eps(Some(0.0)).unwrap(), 0.0);
        assert!(validate_eps(Some(-0.1)).is_err());
        assert!(validate_eps(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_resolve() {
        let params = ClusterParams::resolve(3, None, Some(0.01), 20).unwrap();
        let config = params.to_config();
        assert_eq!(config.k, 3);
        assert_eq!(config.max_iters, 400);
        assert_eq!(config.tol, 0.01);

        assert!(matches!(
            ClusterParams::resolve(3, None, None, 3),
            Err(KMeansError::InvalidK(_))
        ));
    }
}
