//! Element-wise verification of multiplier outputs

use crate::Matrix;

/// Default absolute tolerance for element-wise comparison
pub const DEFAULT_TOLERANCE: f32 = 1e-3;

/// Returns true if every element pair satisfies `|ref - data| <= tolerance`
///
/// Matrices of different dimensions never match. Pure and total: never
/// panics, never errors.
///
/// # Example
///
/// ```
/// use baldosa::{verify, Matrix};
///
/// let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Matrix::from_vec(2, vec![1.0005, 2.0, 3.0, 4.0]).unwrap();
/// assert!(verify::matches(&a, &b, verify::DEFAULT_TOLERANCE));
/// assert!(!verify::matches(&a, &b, 1e-6));
/// ```
pub fn matches(reference: &Matrix, data: &Matrix, tolerance: f32) -> bool {
    if reference.dim() != data.dim() {
        return false;
    }
    reference
        .as_slice()
        .iter()
        .zip(data.as_slice())
        .all(|(r, d)| (r - d).abs() <= tolerance)
}

/// Largest absolute element-wise difference between two matrices
///
/// Used for diagnostic reporting next to the match verdict. Returns
/// `f32::INFINITY` if the dimensions differ.
pub fn max_abs_diff(reference: &Matrix, data: &Matrix) -> f32 {
    if reference.dim() != data.dim() {
        return f32::INFINITY;
    }
    reference
        .as_slice()
        .iter()
        .zip(data.as_slice())
        .map(|(r, d)| (r - d).abs())
        .fold(0.0, f32::max)
}
