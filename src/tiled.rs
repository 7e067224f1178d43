//! Tiled parallel multiplier
//!
//! Mirrors the structure of a GPU shared-memory matmul kernel on CPU threads:
//! the output matrix is partitioned into square tiles, each tile is computed
//! by a group of `tile_width × tile_width` worker threads (one worker per
//! output element), and each group walks the shared dimension one tile-step
//! at a time through a small shared working buffer.
//!
//! Per tile-step, every group runs the same four-phase protocol:
//!
//! 1. Each worker loads one element of A and one of B into the shared tile
//!    buffers, zero-filling positions that fall outside the matrix.
//! 2. Barrier: the tile must be fully populated before anyone reads it.
//! 3. Each worker accumulates the tile's dot-product contribution into a
//!    private running sum.
//! 4. Barrier: nobody may overwrite the buffers for the next step while a
//!    slower groupmate is still reading them.
//!
//! Groups are independent and run in parallel across the tile grid (via
//! rayon with the `parallel` feature); no synchronization crosses a group
//! boundary. All `unsafe` is isolated in this module; the public API is safe.

use std::cell::UnsafeCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Barrier;

use crate::{BaldosaError, Matrix, Result};

/// Default tile width (matches the 16×16 workgroup size of the GPU kernels
/// this multiplier is modeled on)
pub const DEFAULT_TILE_WIDTH: usize = 16;

/// Shared per-group working buffer for one tile of input data
///
/// Interior mutability is required because every worker in a group writes
/// its own slot while the others write theirs. Synchronization is external:
/// the group barrier separates the write phase from the read phase.
struct TileBuffer {
    slots: Box<[UnsafeCell<f32>]>,
}

// SAFETY: Workers access the buffer under the group's barrier protocol:
// 1. During a load phase, each slot is written by exactly one worker
//    (slot index is derived from the worker's unique local coordinates).
// 2. A barrier separates every load phase from the following read phase,
//    so no slot is read while it may still be written.
// 3. A second barrier separates the read phase from the next load phase,
//    so no slot is rewritten while it may still be read.
unsafe impl Sync for TileBuffer {}

impl TileBuffer {
    fn new(len: usize) -> Self {
        let slots = (0..len).map(|_| UnsafeCell::new(0.0)).collect();
        TileBuffer { slots }
    }

    /// # Safety
    ///
    /// Caller must be the unique writer of `idx` in the current phase, with
    /// all readers held behind a barrier.
    unsafe fn store(&self, idx: usize, value: f32) {
        *self.slots[idx].get() = value;
    }

    /// # Safety
    ///
    /// Caller must be past the barrier that ends the write phase for the
    /// current tile-step.
    unsafe fn load(&self, idx: usize) -> f32 {
        *self.slots[idx].get()
    }
}

/// Tiled parallel matrix multiplier
///
/// # Example
///
/// ```
/// use baldosa::{Matrix, TiledMultiplier};
///
/// let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Matrix::identity(2).unwrap();
///
/// let multiplier = TiledMultiplier::new(2).unwrap();
/// let c = multiplier.multiply(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), a.as_slice());
/// ```
#[derive(Debug, Clone)]
pub struct TiledMultiplier {
    tile_width: usize,
}

impl TiledMultiplier {
    /// Creates a multiplier with the given tile width
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `tile_width == 0`
    pub fn new(tile_width: usize) -> Result<Self> {
        if tile_width == 0 {
            return Err(BaldosaError::InvalidInput(
                "tile width must be positive".to_string(),
            ));
        }
        Ok(TiledMultiplier { tile_width })
    }

    /// Returns the configured tile width
    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    /// Computes `C = A × B` with the tiled worker-group algorithm
    ///
    /// The result matches [`crate::reference::multiply`] within
    /// [`crate::verify::DEFAULT_TOLERANCE`] per element. The dimension does
    /// not have to be a multiple of the tile width: boundary tiles are
    /// zero-filled on load, which contributes nothing to in-range sums, and
    /// out-of-range workers never write an output element.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the dimensions differ, or `Execution` if a
    /// worker fails; on execution failure no partial result escapes.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.dim() != b.dim() {
            return Err(BaldosaError::SizeMismatch {
                expected: a.dim(),
                actual: b.dim(),
            });
        }

        let mut result = Matrix::zeros(a.dim())?;

        // A panicking worker unwinds through its group's scope and lands
        // here; the half-written result is dropped and the failure becomes
        // a fatal Execution error.
        catch_unwind(AssertUnwindSafe(|| self.run_grid(a, b, &mut result)))
            .map_err(|payload| BaldosaError::Execution(panic_message(payload.as_ref())))?;

        Ok(result)
    }

    /// Runs one worker group per output tile across the tile grid
    fn run_grid(&self, a: &Matrix, b: &Matrix, result: &mut Matrix) {
        let n = a.dim();
        let tiles = n.div_ceil(self.tile_width);
        let groups = tiles * tiles;

        // Raw output pointer shared across groups. Groups partition the
        // output coordinates, so all writes through it are disjoint.
        let out = AtomicPtr::new(result.as_mut_slice().as_mut_ptr());

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..groups)
                .into_par_iter()
                .for_each(|group| self.run_group(a, b, &out, group / tiles, group % tiles));
        }

        #[cfg(not(feature = "parallel"))]
        for group in 0..groups {
            self.run_group(a, b, &out, group / tiles, group % tiles);
        }
    }

    /// Runs the worker group for one output tile to completion
    ///
    /// Spawns `tile_width²` workers sharing one barrier and two tile
    /// buffers; joins them all before returning.
    fn run_group(
        &self,
        a: &Matrix,
        b: &Matrix,
        out: &AtomicPtr<f32>,
        tile_row: usize,
        tile_col: usize,
    ) {
        let tw = self.tile_width;
        let n = a.dim();
        let steps = n.div_ceil(tw);

        let barrier = Barrier::new(tw * tw);
        let a_tile = TileBuffer::new(tw * tw);
        let b_tile = TileBuffer::new(tw * tw);
        let a_data = a.as_slice();
        let b_data = b.as_slice();

        std::thread::scope(|scope| {
            for local_row in 0..tw {
                for local_col in 0..tw {
                    let barrier = &barrier;
                    let a_tile = &a_tile;
                    let b_tile = &b_tile;

                    scope.spawn(move || {
                        let row = tile_row * tw + local_row;
                        let col = tile_col * tw + local_col;
                        let mut sum = 0.0f32;

                        for step in 0..steps {
                            // Load phase: this worker's slot in each buffer.
                            // Positions outside the matrix are zero-filled,
                            // which is neutral for in-range accumulation.
                            let a_col = step * tw + local_col;
                            let a_val = if row < n && a_col < n {
                                a_data[row * n + a_col]
                            } else {
                                0.0
                            };
                            let b_row = step * tw + local_row;
                            let b_val = if b_row < n && col < n {
                                b_data[b_row * n + col]
                            } else {
                                0.0
                            };

                            // SAFETY: (local_row, local_col) is unique within
                            // the group, so this worker is the sole writer of
                            // these slots; readers wait at the barrier below.
                            unsafe {
                                a_tile.store(local_row * tw + local_col, a_val);
                                b_tile.store(local_row * tw + local_col, b_val);
                            }

                            // Tile fully populated before anyone reads it
                            barrier.wait();

                            // SAFETY: past the load barrier every slot read
                            // here was written exactly once this step.
                            for i in 0..tw {
                                sum += unsafe {
                                    a_tile.load(local_row * tw + i) * b_tile.load(i * tw + local_col)
                                };
                            }

                            // Everyone done reading before the next load
                            // phase may overwrite the buffers
                            barrier.wait();
                        }

                        if row < n && col < n {
                            // SAFETY: Disjoint-write partitioning:
                            // 1. Each worker owns exactly one (row, col).
                            // 2. Groups cover disjoint output tiles.
                            // 3. row * n + col is in bounds (checked above).
                            // 4. The scope joins all writers before the
                            //    result is handed back to the caller.
                            unsafe {
                                *out.load(Ordering::Relaxed).add(row * n + col) = sum;
                            }
                        }
                    });
                }
            }
        });
    }
}

impl Default for TiledMultiplier {
    fn default() -> Self {
        TiledMultiplier {
            tile_width: DEFAULT_TILE_WIDTH,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reference, verify};

    fn assert_matches_reference(n: usize, tile_width: usize) {
        let a = Matrix::from_vec(n, (0..n * n).map(|i| ((i % 13) as f32) * 0.25).collect()).unwrap();
        let b =
            Matrix::from_vec(n, (0..n * n).map(|i| (((i * 7) % 11) as f32) * 0.5).collect()).unwrap();

        let expected = reference::multiply(&a, &b).unwrap();
        let tiled = TiledMultiplier::new(tile_width)
            .unwrap()
            .multiply(&a, &b)
            .unwrap();

        assert!(
            verify::matches(&expected, &tiled, verify::DEFAULT_TOLERANCE),
            "tiled {n}×{n} (tile width {tile_width}) differs from reference, max_diff={}",
            verify::max_abs_diff(&expected, &tiled)
        );
    }

    #[test]
    fn test_exact_tile_multiple() {
        assert_matches_reference(8, 4);
    }

    #[test]
    fn test_dimension_not_tile_multiple() {
        assert_matches_reference(5, 2);
        assert_matches_reference(7, 4);
    }

    #[test]
    fn test_matrix_smaller_than_tile() {
        assert_matches_reference(3, 4);
    }

    #[test]
    fn test_single_worker_groups() {
        assert_matches_reference(4, 1);
    }

    #[test]
    fn test_single_element() {
        let a = Matrix::from_vec(1, vec![3.0]).unwrap();
        let b = Matrix::from_vec(1, vec![4.0]).unwrap();
        let c = TiledMultiplier::new(2).unwrap().multiply(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[12.0]);
    }

    #[test]
    fn test_zero_tile_width_rejected() {
        assert_eq!(
            TiledMultiplier::new(0).unwrap_err(),
            BaldosaError::InvalidInput("tile width must be positive".to_string())
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Matrix::zeros(2).unwrap();
        let b = Matrix::zeros(3).unwrap();
        let err = TiledMultiplier::default().multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            BaldosaError::SizeMismatch {
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_default_tile_width() {
        assert_eq!(TiledMultiplier::default().tile_width(), DEFAULT_TILE_WIDTH);
    }
}
