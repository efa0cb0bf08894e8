//! Python bindings using PyO3
//!
//! Build with: maturin develop --release --features python
//! Import in Python: import lloyd_kmeans

#![cfg(feature = "python")]

use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::error::{ErrorKind, KMeansError};

fn to_py_err(err: KMeansError) -> PyErr {
    match err.kind() {
        ErrorKind::Allocation => PyMemoryError::new_err(err.to_string()),
        ErrorKind::Input => PyValueError::new_err(err.to_string()),
    }
}

/// Flatten a sequence of rows into an (rows, dim) array.
///
/// Row widths are checked before anything is allocated, and the flat buffer
/// is reserved fallibly so an oversized request surfaces as `MemoryError`.
fn to_matrix(rows: Vec<Vec<f64>>, dim: usize, what: &str) -> PyResult<ndarray::Array2<f64>> {
    check_rows(&rows, dim, what).map_err(|e| PyValueError::new_err(e.to_string()))?;
    flatten_rows(rows, dim, what).map_err(to_py_err)
}

fn check_rows(rows: &[Vec<f64>], dim: usize, what: &str) -> Result<(), KMeansError> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(KMeansError::InvalidDimensions(format!(
                "{} row {} has {} components, expected {}",
                what,
                i,
                row.len(),
                dim
            )));
        }
    }
    Ok(())
}

fn flatten_rows(
    rows: Vec<Vec<f64>>,
    dim: usize,
    what: &str,
) -> Result<ndarray::Array2<f64>, KMeansError> {
    let n = rows.len();
    let len = n.checked_mul(dim).ok_or_else(|| {
        KMeansError::Allocation(format!("{}: {} x {} overflows", what, n, dim))
    })?;

    let mut flat = Vec::new();
    flat.try_reserve_exact(len)
        .map_err(|e| KMeansError::Allocation(format!("{}: {}", what, e)))?;
    for row in rows {
        flat.extend(row);
    }

    ndarray::Array2::from_shape_vec((n, dim), flat)
        .map_err(|e| KMeansError::InvalidDimensions(format!("{}: {}", what, e)))
}

/// Run Lloyd's k-means from the given initial centroids.
///
/// Args:
///     points: list of N points, each a list of `dim` floats
///     centroids: list of K initial centroids
///     K: number of clusters
///     max_iter: iteration cap
///     dim: number of components per point
///     eps: convergence threshold
///
/// Returns:
///     list of K final centroids
#[pyfunction]
#[pyo3(name = "fit")]
#[allow(non_snake_case)]
fn py_fit(
    py: Python<'_>,
    points: Vec<Vec<f64>>,
    centroids: Vec<Vec<f64>>,
    K: usize,
    max_iter: usize,
    dim: usize,
    eps: f64,
) -> PyResult<Vec<Vec<f64>>> {
    let points = to_matrix(points, dim, "points")?;
    let centroids = to_matrix(centroids, dim, "centroids")?;

    let result = py
        .allow_threads(|| crate::fit(&points.view(), &centroids.view(), K, dim, max_iter, eps))
        .map_err(to_py_err)?;

    Ok(result.outer_iter().map(|row| row.to_vec()).collect())
}

/// Python module definition
#[pymodule]
fn lloyd_kmeans(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_fit, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rows_rejects_short_row_before_allocating() {
        // A declared width of 2^40 must fail on row length, not abort on allocation
        let rows = vec![vec![1.0, 2.0]];
        let err = check_rows(&rows, 1 << 40, "points").unwrap_err();
        assert!(matches!(err, KMeansError::InvalidDimensions(_)));
    }

    #[test]
    fn test_flatten_rows_overflow_is_allocation_error() {
        let rows = vec![Vec::new(), Vec::new()];
        let err = flatten_rows(rows, usize::MAX, "points").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);
    }

    #[test]
    fn test_flatten_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let matrix = flatten_rows(rows, 2, "points").unwrap();
        assert_eq!(matrix, ndarray::array![[1.0, 2.0], [3.0, 4.0]]);
    }
}
