use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Euclidean distance between two vectors of equal length.
///
/// `sqrt(sum((a[i] - b[i])^2))`, accumulated in index order.
#[inline]
pub fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "euclidean: length mismatch");

    let mut sum = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let d = x - y;
        sum += d * d;
    }
    sum.sqrt()
}

/// Index of the centroid closest to `point`.
///
/// Centroids are scanned in index order with a strict `<`, so among
/// centroids at exactly the same distance the lowest index wins.
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> usize {
    let mut best_k = 0;
    let mut best_dist = f64::INFINITY;

    for (k, centroid) in centroids.outer_iter().enumerate() {
        let dist = euclidean(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_k = k;
        }
    }

    best_k
}

/// Assign every point to its nearest centroid, writing into `labels`.
///
/// Points are independent of each other, so the scan runs in parallel.
/// `labels` must be empty with capacity for `points.nrows()` entries.
pub fn assign_labels(points: &ArrayView2<f64>, centroids: &ArrayView2<f64>, labels: &mut Vec<usize>) {
    debug_assert_eq!(points.ncols(), centroids.ncols());
    labels.clear();
    labels.par_extend(
        (0..points.nrows())
            .into_par_iter()
            .map(|i| nearest_centroid(&points.row(i), centroids)),
    );
}

/// Largest Euclidean distance between corresponding rows of the old and
/// new centroid sets.
///
/// A NaN shift makes the result NaN, which never compares below a tolerance.
pub fn compute_max_shift(old_centroids: &ArrayView2<f64>, new_centroids: &ArrayView2<f64>) -> f64 {
    debug_assert_eq!(old_centroids.dim(), new_centroids.dim());

    (0..old_centroids.nrows())
        .into_par_iter()
        .map(|k| euclidean(&old_centroids.row(k), &new_centroids.row(k)))
        .reduce(|| 0.0, nan_max)
}

#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
