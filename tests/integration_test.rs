//! Integration Test Suite
//!
//! End-to-end coverage of the tiled multiplier against the sequential
//! reference, the algebraic properties of the product, and the harness
//! pipeline.
//!
//! Coverage:
//! - Tiled vs reference agreement over random matrices and tile widths
//! - Boundary handling when the dimension is not a tile multiple
//! - Identity and zero algebraic properties
//! - Degenerate 1×1 case
//! - Harness scenario: match verdict, finite non-negative timings
//! - Reference determinism (bit-identical repeats)

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use baldosa::{harness, reference, verify, HarnessConfig, Matrix, TiledMultiplier};

const PROPTEST_CASES: u32 = 32;

// ============================================================================
// PROPERTY TESTS - TILED VS REFERENCE
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// The tiled multiplier agrees with the reference for arbitrary
    /// dimensions and tile widths, including non-divisible combinations
    #[test]
    fn integration_tiled_matches_reference(
        n in 1usize..24,
        tile_width in 1usize..8,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Matrix::random(n, &mut rng).unwrap();
        let b = Matrix::random(n, &mut rng).unwrap();

        let expected = reference::multiply(&a, &b).unwrap();
        let tiled = TiledMultiplier::new(tile_width).unwrap().multiply(&a, &b).unwrap();

        prop_assert!(
            verify::matches(&expected, &tiled, verify::DEFAULT_TOLERANCE),
            "max_diff={}",
            verify::max_abs_diff(&expected, &tiled)
        );
    }

    /// A × I == A for both multipliers
    #[test]
    fn integration_identity_property(
        n in 1usize..16,
        tile_width in 1usize..8,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Matrix::random(n, &mut rng).unwrap();
        let identity = Matrix::identity(n).unwrap();

        let tiled = TiledMultiplier::new(tile_width).unwrap().multiply(&a, &identity).unwrap();
        prop_assert!(verify::matches(&a, &tiled, verify::DEFAULT_TOLERANCE));

        let sequential = reference::multiply(&a, &identity).unwrap();
        prop_assert!(verify::matches(&a, &sequential, verify::DEFAULT_TOLERANCE));
    }

    /// A × 0 == 0 for both multipliers
    #[test]
    fn integration_zero_property(
        n in 1usize..16,
        tile_width in 1usize..8,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Matrix::random(n, &mut rng).unwrap();
        let zero = Matrix::zeros(n).unwrap();

        let tiled = TiledMultiplier::new(tile_width).unwrap().multiply(&a, &zero).unwrap();
        prop_assert!(tiled.as_slice().iter().all(|&x| x == 0.0));

        let sequential = reference::multiply(&a, &zero).unwrap();
        prop_assert!(sequential.as_slice().iter().all(|&x| x == 0.0));
    }
}

// ============================================================================
// BOUNDARY AND DEGENERATE CASES
// ============================================================================

/// n = 17 with tile width 16: one full tile plus a one-element fringe in
/// each grid direction; zero-fill padding must not corrupt any element
#[test]
fn integration_boundary_17_with_tile_16() {
    let mut rng = StdRng::seed_from_u64(1717);
    let a = Matrix::random(17, &mut rng).unwrap();
    let b = Matrix::random(17, &mut rng).unwrap();

    let expected = reference::multiply(&a, &b).unwrap();
    let tiled = TiledMultiplier::new(16).unwrap().multiply(&a, &b).unwrap();

    assert!(
        verify::matches(&expected, &tiled, verify::DEFAULT_TOLERANCE),
        "boundary 17/16 differs, max_diff={}",
        verify::max_abs_diff(&expected, &tiled)
    );
}

#[test]
fn integration_degenerate_1x1() {
    let a = Matrix::from_vec(1, vec![0.5]).unwrap();
    let b = Matrix::from_vec(1, vec![0.25]).unwrap();

    let tiled = TiledMultiplier::new(16).unwrap().multiply(&a, &b).unwrap();
    assert_eq!(tiled.as_slice(), &[0.125]);
}

// ============================================================================
// HARNESS SCENARIO
// ============================================================================

/// Scenario from the demo: random uniform inputs, default tolerance. Run at
/// a CI-friendly size; the binary keeps the full 512 default.
#[test]
fn integration_harness_scenario() {
    let config = HarnessConfig {
        n: 48,
        tile_width: 16,
        seed: Some(42),
        ..HarnessConfig::default()
    };

    let report = harness::run(&config).unwrap();

    assert!(report.matched, "max_diff={}", report.max_abs_diff);
    assert!(report.tiled_ms.is_finite() && report.tiled_ms >= 0.0);
    assert!(report.reference_ms.is_finite() && report.reference_ms >= 0.0);
}

// ============================================================================
// DETERMINISM
// ============================================================================

/// The reference multiplier is a pure function with a fixed accumulation
/// order: repeated runs are bit-identical
#[test]
fn integration_reference_idempotence() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = Matrix::random(9, &mut rng).unwrap();
    let b = Matrix::random(9, &mut rng).unwrap();

    let c1 = reference::multiply(&a, &b).unwrap();
    let c2 = reference::multiply(&a, &b).unwrap();
    assert_eq!(c1.as_slice(), c2.as_slice());
}
