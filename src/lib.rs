//! Baldosa: Tiled Matrix Multiplication with Verification
//!
//! **Baldosa** (Spanish: "floor tile") multiplies square single-precision
//! matrices with a tiled, barrier-synchronized worker grid modeled on GPU
//! shared-memory kernels, and checks the result against a straightforward
//! sequential reference:
//!
//! 1. **Tiled parallel multiplier** - one worker per output element, worker
//!    groups per output tile, shared tile buffers, two-barrier load/compute
//!    protocol
//! 2. **Sequential reference** - canonical triple-loop product, the
//!    correctness oracle and timing baseline
//! 3. **Verifier** - element-wise comparison with an absolute tolerance
//! 4. **Harness** - random inputs, per-path timing, verdict reporting
//!
//! # Design Principles
//!
//! - **One worker, one output element**: the output space is partitioned
//!   exactly once; no locking on the result
//! - **Barrier-paired tile steps**: load → barrier → accumulate → barrier,
//!   never a read of a half-written tile
//! - **Zero unsafe in public API**: `unsafe` is isolated in the tiled
//!   multiplier's buffer and output-write internals
//! - **Mismatch is a verdict, not an error**: only execution failure aborts
//!
//! # Quick Start
//!
//! ```rust
//! use baldosa::{Matrix, TiledMultiplier};
//!
//! let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::identity(2).unwrap();
//!
//! let c = TiledMultiplier::new(2).unwrap().multiply(&a, &b).unwrap();
//! assert_eq!(c.as_slice(), a.as_slice());
//! ```

pub mod error;
pub mod harness;
pub mod matrix;
pub mod reference;
pub mod tiled;
pub mod verify;

pub use error::{BaldosaError, Result};
pub use harness::{HarnessConfig, HarnessReport};
pub use matrix::Matrix;
pub use tiled::{TiledMultiplier, DEFAULT_TILE_WIDTH};
pub use verify::DEFAULT_TOLERANCE;
