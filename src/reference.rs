//! Sequential reference multiplier
//!
//! The canonical triple-nested-loop product. It is deliberately unoptimized:
//! it serves as the correctness oracle for the tiled multiplier and as the
//! sequential timing baseline, so the accumulation order must stay fixed
//! (row-major, left-to-right over `k`) and bit-reproducible across runs.

use crate::{BaldosaError, Matrix, Result};

/// Computes `C = A × B` with the canonical accumulation order
///
/// `C[i,j] = Σ_k A[i,k] × B[k,j]`, with `k` ascending. Deterministic: the
/// same inputs always produce bit-identical output.
///
/// # Errors
///
/// Returns `SizeMismatch` if the two matrices differ in dimension.
///
/// # Example
///
/// ```
/// use baldosa::{reference, Matrix};
///
/// let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Matrix::from_vec(2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
/// let c = reference::multiply(&a, &b).unwrap();
///
/// // [[1, 2],   [[5, 6],   [[19, 22],
/// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.dim() != b.dim() {
        return Err(BaldosaError::SizeMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }

    let n = a.dim();
    let mut c = Matrix::zeros(n)?;
    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let c_data = c.as_mut_slice();

    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0f32;
            for k in 0..n {
                sum += a_data[i * n + k] * b_data[k * n + j];
            }
            c_data[i * n + j] = sum;
        }
    }

    Ok(c)
}
