//! Tests for cleaning, sorting, grids and windows.
//!
//! ## Test Organization
//!
//! 1. **Cleaning** - Missing value removal
//! 2. **Sorting** - Stable ordering and distinct counts
//! 3. **Grids** - Evenly spaced evaluation points
//! 4. **Windows** - Span calculation and nearest-neighbour recentering

use approx::assert_relative_eq;

use statrecipes::internals::primitives::grid::linspace;
use statrecipes::internals::primitives::sorting::{
    clean_and_sort, count_distinct, drop_missing, sort_by_x,
};
use statrecipes::internals::primitives::window::Window;

// ============================================================================
// Cleaning Tests
// ============================================================================

/// Test that pairs with a missing coordinate are dropped together.
#[test]
fn test_drop_missing_pairs() {
    let x = [1.0, f64::NAN, 3.0, 4.0, f64::INFINITY];
    let y = [1.0, 2.0, f64::NAN, 4.0, 5.0];

    let (cx, cy) = drop_missing(&x, &y);
    assert_eq!(cx, vec![1.0, 4.0]);
    assert_eq!(cy, vec![1.0, 4.0]);
}

// ============================================================================
// Sorting Tests
// ============================================================================

/// Test sorting by x keeps pairs together and ties in input order.
#[test]
fn test_sort_by_x_stable() {
    let sorted = sort_by_x(vec![3.0, 1.0, 2.0, 1.0], vec![30.0, 10.0, 20.0, 11.0]);

    assert_eq!(sorted.x, vec![1.0, 1.0, 2.0, 3.0]);
    assert_eq!(sorted.y, vec![10.0, 11.0, 20.0, 30.0]);
}

/// Test the combined clean-and-sort step and distinct counting.
#[test]
fn test_clean_and_sort_distinct() {
    let x = [2.0, 1.0, f64::NAN, 2.0, 3.0];
    let y = [1.0, 1.0, 1.0, 1.0, 1.0];

    let sorted = clean_and_sort(&x, &y);
    assert_eq!(sorted.len(), 4);
    assert_eq!(sorted.x, vec![1.0, 2.0, 2.0, 3.0]);
    assert_eq!(sorted.distinct_x(), 3);

    assert_eq!(count_distinct::<f64>(&[]), 0);
    assert_eq!(count_distinct(&[5.0, 5.0, 5.0]), 1);
}

// ============================================================================
// Grid Tests
// ============================================================================

/// Test evenly spaced grids, including the degenerate sizes.
#[test]
fn test_linspace() {
    let grid = linspace(0.0, 1.0, 5);
    assert_eq!(grid.len(), 5);
    for (g, expected) in grid.iter().zip([0.0, 0.25, 0.5, 0.75, 1.0]) {
        assert_relative_eq!(*g, expected, epsilon = 1e-15);
    }

    assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    assert!(linspace(2.0, 5.0, 0).is_empty());
}

/// Test that the last grid point is exactly the upper bound.
#[test]
fn test_linspace_pins_upper_bound() {
    let grid = linspace(0.1, 0.7, 7);
    assert_eq!(grid[0], 0.1);
    assert_eq!(grid[6], 0.7);
    assert!(grid.windows(2).all(|w| w[0] < w[1]));
}

/// Test that a range wider than the largest float still yields a finite grid.
#[test]
fn test_linspace_extreme_range() {
    let grid: Vec<f64> = linspace(-1e308, 1e308, 5);

    assert!(grid.iter().all(|g| g.is_finite()));
    assert_eq!(grid[0], -1e308);
    assert_eq!(grid[4], 1e308);
    assert_relative_eq!(grid[1], -5e307, max_relative = 1e-12);
    assert_eq!(grid[2], 0.0);
    assert_relative_eq!(grid[3], 5e307, max_relative = 1e-12);
    assert!(grid.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Window Tests
// ============================================================================

/// Test the window size calculation.
#[test]
fn test_calculate_span() {
    assert_eq!(Window::calculate_span(10, 0.3), 3);
    assert_eq!(Window::calculate_span(10, 0.05), 2);
    assert_eq!(Window::calculate_span(10, 1.0), 10);
    assert_eq!(Window::calculate_span(1, 0.5), 1);
    assert_eq!(Window::calculate_span(100, 0.2), 20);
}

/// Test that recentering on an arbitrary target picks its nearest neighbours.
#[test]
fn test_recenter_on_target() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let mut window = Window::initialize(0, 3, x.len());
    assert_eq!((window.left, window.right), (0, 2));

    window.recenter_on(&x, 4.2, x.len());
    assert_eq!((window.left, window.right), (3, 5));
    assert_eq!(window.len(), 3);
    assert_relative_eq!(window.max_distance(&x, 4.2), 1.2, epsilon = 1e-12);

    window.recenter_on(&x, 7.0, x.len());
    assert_eq!((window.left, window.right), (5, 7));
}
