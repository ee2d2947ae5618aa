//! Gauss-Lobatto-Legendre points and weights.
//!
//! The n GLL points on an interval are the images of the roots of
//! (1-x²)P'_{n-1}(x), which include both endpoints. Spectral elements
//! collocate their degrees of freedom at these points; the associated
//! weights are the integration weights of the nodal basis, so their sum
//! equals the interval length.

use super::legendre::{legendre, legendre_and_derivative};
use std::f64::consts::PI;

/// Compute n Gauss-Lobatto-Legendre points and weights on [x0, x1].
///
/// Returns `(points, weights)` with `points[0] == x0`,
/// `points[n-1] == x1` and positive weights summing to `x1 - x0`.
/// Interior points come from Newton iteration on P'_{n-1} seeded with
/// Chebyshev-Lobatto points.
///
/// # Panics
/// Panics if `n < 2` or `x1 <= x0`.
pub fn gauss_lobatto_points(n: usize, x0: f64, x1: f64) -> (Vec<f64>, Vec<f64>) {
    assert!(n >= 2, "Gauss-Lobatto rule needs at least two points");
    assert!(x1 > x0, "Invalid interval bounds");

    let order = n - 1;

    // Reference points on [-1, 1], endpoints exact
    let mut ref_points: Vec<f64> = (0..n)
        .map(|j| -(PI * j as f64 / order as f64).cos())
        .collect();
    ref_points[0] = -1.0;
    ref_points[order] = 1.0;

    // Newton iteration for the interior roots of P'_{order}.
    // With L(x) = (1-x²)P'_N(x) one has L'(x) = -N(N+1)P_N(x), so the
    // update is x += (1-x²)P'_N / (N(N+1)P_N).
    let scale = (order * (order + 1)) as f64;
    for x in ref_points.iter_mut().take(order).skip(1) {
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(order, *x);
            let update = (1.0 - *x * *x) * dp / (scale * p);
            *x += update;
            if update.abs() < 1e-15 {
                break;
            }
        }
    }

    // Reference weights w_j = 2 / (N(N+1) P_N(x_j)²), then the affine map
    // onto [x0, x1] scales weights by the half-width.
    let half = 0.5 * (x1 - x0);
    let mid = 0.5 * (x1 + x0);

    let points: Vec<f64> = ref_points.iter().map(|&x| mid + half * x).collect();
    let weights: Vec<f64> = ref_points
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            half * 2.0 / (scale * p * p)
        })
        .collect();

    (points, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_count() {
        for n in 2..=8 {
            let (g, w) = gauss_lobatto_points(n, 0.0, 1.0);
            assert_eq!(g.len(), n);
            assert_eq!(w.len(), n);
            assert!((g[0] - 0.0).abs() < 1e-15);
            assert!((g[n - 1] - 1.0).abs() < 1e-15);
        }
    }

    #[test]
    fn weights_positive_and_normalized() {
        for n in 2..=8 {
            let (_, w) = gauss_lobatto_points(n, 0.0, 1.0);
            assert!(w.iter().all(|&wi| wi > 0.0));
            let sum: f64 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-14, "n={}: sum={}", n, sum);
        }
    }

    #[test]
    fn symmetric_about_midpoint() {
        for n in 2..=7 {
            let (g, w) = gauss_lobatto_points(n, 0.0, 1.0);
            for i in 0..n / 2 {
                assert!((g[i] + g[n - 1 - i] - 1.0).abs() < 1e-14);
                assert!((w[i] - w[n - 1 - i]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn known_four_point_rule() {
        // n = 4 on [0,1]: interior points (1 ± 1/sqrt(5))/2,
        // weights 1/12, 5/12, 5/12, 1/12.
        let (g, w) = gauss_lobatto_points(4, 0.0, 1.0);
        let a = 0.5 * (1.0 - 1.0 / 5.0_f64.sqrt());
        assert!((g[1] - a).abs() < 1e-14);
        assert!((g[2] - (1.0 - a)).abs() < 1e-14);
        assert!((w[0] - 1.0 / 12.0).abs() < 1e-14);
        assert!((w[1] - 5.0 / 12.0).abs() < 1e-14);
    }

    #[test]
    fn quadrature_exactness() {
        // An n-point GLL rule is exact for polynomials of degree 2n-3.
        for n in 2..=6 {
            let (g, w) = gauss_lobatto_points(n, 0.0, 1.0);
            for k in 0..=(2 * n - 3) {
                let exact = 1.0 / (k + 1) as f64; // ∫_0^1 x^k dx
                let numerical: f64 = g
                    .iter()
                    .zip(w.iter())
                    .map(|(&x, &wi)| wi * x.powi(k as i32))
                    .sum();
                assert!(
                    (numerical - exact).abs() < 1e-13,
                    "n={}, degree {}: {} vs {}",
                    n,
                    k,
                    numerical,
                    exact
                );
            }
        }
    }
}
