//! Run harness: generate inputs, drive both multipliers, time, verify
//!
//! A single-shot batch computation: random A and B, tiled multiply (timed),
//! reference multiply (timed), element-wise verification, report. The tiled
//! path runs and completes first; if it fails, the run aborts before the
//! reference path or verification ever start.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::tiled::DEFAULT_TILE_WIDTH;
use crate::{reference, verify, Matrix, Result, TiledMultiplier};

/// Default matrix dimension for a harness run
pub const DEFAULT_DIM: usize = 512;

/// Configuration for a harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Matrix dimension (matrices are `n × n`)
    pub n: usize,
    /// Tile width for the parallel multiplier
    pub tile_width: usize,
    /// Seed for input generation; `None` draws from entropy
    pub seed: Option<u64>,
    /// Absolute per-element tolerance for verification
    pub tolerance: f32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            n: DEFAULT_DIM,
            tile_width: DEFAULT_TILE_WIDTH,
            seed: None,
            tolerance: verify::DEFAULT_TOLERANCE,
        }
    }
}

/// Outcome of a harness run
#[derive(Debug, Clone)]
pub struct HarnessReport {
    /// Wall-clock time of the tiled parallel multiply, in milliseconds
    pub tiled_ms: f64,
    /// Wall-clock time of the sequential reference multiply, in milliseconds
    pub reference_ms: f64,
    /// Whether every element pair was within tolerance
    pub matched: bool,
    /// Largest absolute element-wise difference observed
    pub max_abs_diff: f32,
}

impl HarnessReport {
    /// Reference time divided by tiled time
    pub fn speedup(&self) -> f64 {
        if self.tiled_ms > 0.0 {
            self.reference_ms / self.tiled_ms
        } else {
            f64::INFINITY
        }
    }
}

/// Runs the full compare-and-verify pipeline
///
/// Timing brackets only the two multiply calls; input generation and buffer
/// setup are excluded from both measurements.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero dimension or tile width, and
/// `Execution` if the tiled path fails; a mismatch verdict is NOT an error.
///
/// # Example
///
/// ```
/// use baldosa::{harness, HarnessConfig};
///
/// let config = HarnessConfig {
///     n: 8,
///     tile_width: 4,
///     seed: Some(42),
///     ..HarnessConfig::default()
/// };
/// let report = harness::run(&config).unwrap();
/// assert!(report.matched);
/// ```
pub fn run(config: &HarnessConfig) -> Result<HarnessReport> {
    let multiplier = TiledMultiplier::new(config.tile_width)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let a = Matrix::random(config.n, &mut rng)?;
    let b = Matrix::random(config.n, &mut rng)?;

    let start = Instant::now();
    let c_tiled = multiplier.multiply(&a, &b)?;
    let tiled_ms = start.elapsed().as_secs_f64() * 1e3;

    let start = Instant::now();
    let c_reference = reference::multiply(&a, &b)?;
    let reference_ms = start.elapsed().as_secs_f64() * 1e3;

    Ok(HarnessReport {
        tiled_ms,
        reference_ms,
        matched: verify::matches(&c_reference, &c_tiled, config.tolerance),
        max_abs_diff: verify::max_abs_diff(&c_reference, &c_tiled),
    })
}
