//! Square matrix storage for Baldosa
//!
//! Provides the dense square `f32` matrix that both multipliers operate on.
//!
//! # Example
//!
//! ```
//! use baldosa::Matrix;
//!
//! let m = Matrix::zeros(3).unwrap();
//! assert_eq!(m.dim(), 3);
//! ```

use rand::Rng;

use crate::{BaldosaError, Result};

/// A dense square matrix with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row. The dimension is always positive; the
/// constructors reject `dim == 0`.
///
/// # Storage Layout
///
/// For a 2x2 matrix:
/// ```text
/// [[a, b],
///  [c, d]]
/// ```
/// Data is stored as: [a, b, c, d]
///
/// # Example
///
/// ```
/// use baldosa::Matrix;
///
/// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m.get(0, 0), Some(&1.0));
/// assert_eq!(m.get(0, 1), Some(&2.0));
/// assert_eq!(m.get(1, 0), Some(&3.0));
/// assert_eq!(m.get(1, 1), Some(&4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a matrix filled with zeros
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `dim == 0`
    ///
    /// # Example
    ///
    /// ```
    /// use baldosa::Matrix;
    ///
    /// let m = Matrix::zeros(3).unwrap();
    /// assert_eq!(m.get(1, 1), Some(&0.0));
    /// ```
    pub fn zeros(dim: usize) -> Result<Self> {
        Self::check_dim(dim)?;
        Ok(Matrix {
            dim,
            data: vec![0.0; dim * dim],
        })
    }

    /// Creates an identity matrix (1s on the diagonal)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `dim == 0`
    ///
    /// # Example
    ///
    /// ```
    /// use baldosa::Matrix;
    ///
    /// let m = Matrix::identity(3).unwrap();
    /// assert_eq!(m.get(0, 0), Some(&1.0));
    /// assert_eq!(m.get(0, 1), Some(&0.0));
    /// assert_eq!(m.get(1, 1), Some(&1.0));
    /// ```
    pub fn identity(dim: usize) -> Result<Self> {
        Self::check_dim(dim)?;
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Ok(Matrix { dim, data })
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `dim == 0`, or `SizeMismatch` if
    /// `data.len() != dim * dim`
    ///
    /// # Example
    ///
    /// ```
    /// use baldosa::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.dim(), 2);
    /// ```
    pub fn from_vec(dim: usize, data: Vec<f32>) -> Result<Self> {
        Self::check_dim(dim)?;
        if data.len() != dim * dim {
            return Err(BaldosaError::SizeMismatch {
                expected: dim * dim,
                actual: data.len(),
            });
        }
        Ok(Matrix { dim, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `dim == 0`, or `SizeMismatch` if
    /// `data.len() != dim * dim`
    pub fn from_slice(dim: usize, data: &[f32]) -> Result<Self> {
        Self::from_vec(dim, data.to_vec())
    }

    /// Creates a matrix filled with uniform random values in `[0, 1)`
    ///
    /// The caller supplies the RNG, so a seeded `StdRng` gives reproducible
    /// inputs while `StdRng::from_entropy()` gives fresh ones.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `dim == 0`
    ///
    /// # Example
    ///
    /// ```
    /// use baldosa::Matrix;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let m = Matrix::random(4, &mut rng).unwrap();
    /// assert!(m.as_slice().iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random<R: Rng>(dim: usize, rng: &mut R) -> Result<Self> {
        Self::check_dim(dim)?;
        let data = (0..dim * dim).map(|_| rng.gen::<f32>()).collect();
        Ok(Matrix { dim, data })
    }

    /// Returns the matrix dimension (the matrix is `dim x dim`)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f32> {
        if row >= self.dim || col >= self.dim {
            None
        } else {
            self.data.get(row * self.dim + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        if row >= self.dim || col >= self.dim {
            None
        } else {
            let idx = row * self.dim + col;
            self.data.get_mut(idx)
        }
    }

    /// Returns a reference to the underlying row-major data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    fn check_dim(dim: usize) -> Result<()> {
        if dim == 0 {
            return Err(BaldosaError::InvalidInput(
                "matrix dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
