//! # lloyd-kmeans
//!
//! Deterministic k-means clustering (Lloyd's algorithm) over ndarray, starting
//! from centroids chosen by the caller.
//!
//! ## Features
//!
//! - **Reproducible**: identical inputs give bit-identical centroids; ties go
//!   to the lowest-indexed centroid and empty clusters keep their position
//! - **Parallel assignment**: the nearest-centroid scan uses rayon, while
//!   accumulation stays in point order
//! - **ndarray compatible**: points and centroids are `Array2<f64>`, one row
//!   per vector
//! - **Structured errors**: input problems and allocation failures are
//!   reported as distinct [`KMeansError`] kinds, never as sentinel values
//!
//! ## Example
//!
//! ```rust
//! use lloyd_kmeans::fit;
//! use ndarray::array;
//!
//! let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//! let initial = array![[0.0, 0.0], [10.0, 0.0]];
//!
//! let centroids = fit(&points.view(), &initial.view(), 2, 2, 10, 1e-3).unwrap();
//! assert_eq!(centroids, array![[0.0, 0.5], [10.0, 0.5]]);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use lloyd_kmeans::{lloyd, KMeansConfig};
//! use ndarray::{array, s};
//!
//! let points = array![[1.0], [2.0], [9.0], [10.0], [11.0]];
//! let initial = points.slice(s![..2, ..]).to_owned();
//!
//! let config = KMeansConfig::new(2).with_max_iters(50).with_tol(1e-9);
//! let result = lloyd(&points.view(), &initial.view(), &config).unwrap();
//!
//! assert!(result.converged);
//! assert_eq!(result.labels, vec![0, 0, 1, 1, 1]);
//! ```
//!
//! ## Python
//!
//! Enable the `python` feature to build a `lloyd_kmeans` extension module
//! exposing `fit(points, centroids, K, max_iter, dim, eps)`.

mod algorithm;
mod config;
mod distance;
mod error;
pub mod io;
mod kmeans;
pub mod params;

#[cfg(feature = "python")]
mod python;

pub use algorithm::{fit, lloyd, KMeansResult};
pub use config::{KMeansConfig, DEFAULT_MAX_ITERS, DEFAULT_TOL, MAX_ITERS_UPPER_BOUND};
pub use distance::euclidean;
pub use error::{ErrorKind, KMeansError};
pub use kmeans::KMeans;
