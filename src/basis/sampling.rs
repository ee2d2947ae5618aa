//! Sampling of the GLL tensor-product finite element basis.
//!
//! A spectral element of order nP carries an nP × nP grid of coefficients
//! at the tensor product of 1D Gauss-Lobatto-Legendre points on [0, 1].
//! Sampling evaluates every cardinal function at a parametric point (α, β),
//! producing the coefficient matrix C with C[p][q] = ℓ_p(α) ℓ_q(β). The
//! cardinal property makes C a Kronecker delta at collocation points, and
//! the basis sums to one everywhere.
//!
//! The monotone variant replaces the high-order cardinals with piecewise
//! bilinear interpolation on the GLL subgrid: C is then non-negative, still
//! sums to one, and reproduces fields linear in (α, β) exactly, at the cost
//! of formal order.

use crate::polynomial::gauss_lobatto_points;
use faer::Mat;

/// Precomputed 1D GLL point set for basis sampling on [0, 1]².
#[derive(Clone, Debug)]
pub struct GllBasis {
    /// Points per direction
    np: usize,
    /// 1D collocation points on [0, 1]
    nodes: Vec<f64>,
    /// 1D quadrature weights, summing to 1
    weights: Vec<f64>,
}

impl GllBasis {
    /// Build the basis of nP points per direction.
    ///
    /// # Panics
    /// Panics if `np < 2`.
    pub fn new(np: usize) -> Self {
        let (nodes, weights) = gauss_lobatto_points(np, 0.0, 1.0);
        Self { np, nodes, weights }
    }

    pub fn np(&self) -> usize {
        self.np
    }

    /// 1D collocation points on [0, 1].
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// 1D quadrature weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Evaluate every 1D Lagrange cardinal at x.
    fn cardinals(&self, x: f64) -> Vec<f64> {
        (0..self.np)
            .map(|p| {
                let mut value = 1.0;
                for m in 0..self.np {
                    if m != p {
                        value *= (x - self.nodes[m]) / (self.nodes[p] - self.nodes[m]);
                    }
                }
                value
            })
            .collect()
    }

    /// Sample the tensor-product cardinal basis at (α, β) ∈ [0, 1]².
    ///
    /// Writes C[p][q] = ℓ_p(α) ℓ_q(β) into `coeff`, which must be nP × nP.
    pub fn sample(&self, alpha: f64, beta: f64, coeff: &mut Mat<f64>) {
        assert_eq!(coeff.nrows(), self.np);
        assert_eq!(coeff.ncols(), self.np);

        let la = self.cardinals(alpha);
        let lb = self.cardinals(beta);

        for p in 0..self.np {
            for q in 0..self.np {
                coeff[(p, q)] = la[p] * lb[q];
            }
        }
    }

    /// Index of the GLL subcell containing x, in [0, np-2].
    fn subcell(&self, x: f64) -> usize {
        let mut i = 0;
        while i + 2 < self.np && x >= self.nodes[i + 1] {
            i += 1;
        }
        i
    }

    /// Sample the monotone (piecewise bilinear) basis at (α, β) ∈ [0, 1]².
    ///
    /// The four coefficients of the subcell containing the point receive
    /// bilinear hat weights; all others are zero. Every entry lies in
    /// [0, 1] and the matrix sums to one.
    pub fn sample_monotone(&self, alpha: f64, beta: f64, coeff: &mut Mat<f64>) {
        assert_eq!(coeff.nrows(), self.np);
        assert_eq!(coeff.ncols(), self.np);

        for p in 0..self.np {
            for q in 0..self.np {
                coeff[(p, q)] = 0.0;
            }
        }

        let i = self.subcell(alpha);
        let j = self.subcell(beta);

        let xi = (alpha - self.nodes[i]) / (self.nodes[i + 1] - self.nodes[i]);
        let eta = (beta - self.nodes[j]) / (self.nodes[j + 1] - self.nodes[j]);

        coeff[(i, j)] = (1.0 - xi) * (1.0 - eta);
        coeff[(i + 1, j)] = xi * (1.0 - eta);
        coeff[(i, j + 1)] = (1.0 - xi) * eta;
        coeff[(i + 1, j + 1)] = xi * eta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_sum(m: &Mat<f64>) -> f64 {
        let mut sum = 0.0;
        for p in 0..m.nrows() {
            for q in 0..m.ncols() {
                sum += m[(p, q)];
            }
        }
        sum
    }

    #[test]
    fn partition_of_unity() {
        for np in 2..=6 {
            let basis = GllBasis::new(np);
            let mut coeff = Mat::zeros(np, np);
            for &alpha in &[0.0, 0.13, 0.5, 0.77, 1.0] {
                for &beta in &[0.0, 0.29, 0.64, 1.0] {
                    basis.sample(alpha, beta, &mut coeff);
                    assert!(
                        (matrix_sum(&coeff) - 1.0).abs() < 1e-12,
                        "np={}, ({}, {})",
                        np,
                        alpha,
                        beta
                    );
                }
            }
        }
    }

    #[test]
    fn kronecker_delta_at_collocation_points() {
        let np = 4;
        let basis = GllBasis::new(np);
        let mut coeff = Mat::zeros(np, np);
        for p0 in 0..np {
            for q0 in 0..np {
                basis.sample(basis.nodes()[p0], basis.nodes()[q0], &mut coeff);
                for p in 0..np {
                    for q in 0..np {
                        let expected = if p == p0 && q == q0 { 1.0 } else { 0.0 };
                        assert!((coeff[(p, q)] - expected).abs() < 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn high_order_basis_goes_negative() {
        // Cardinal functions overshoot between their nodes; this is the
        // behavior the monotone variant is there to avoid.
        let np = 4;
        let basis = GllBasis::new(np);
        let mut coeff = Mat::zeros(np, np);
        basis.sample(0.9, 0.5, &mut coeff);
        let min = (0..np)
            .flat_map(|p| (0..np).map(move |q| (p, q)))
            .map(|(p, q)| coeff[(p, q)])
            .fold(f64::INFINITY, f64::min);
        assert!(min < -1e-3, "expected a negative cardinal value, min={}", min);
    }

    #[test]
    fn monotone_nonnegative_partition_of_unity() {
        for np in 2..=5 {
            let basis = GllBasis::new(np);
            let mut coeff = Mat::zeros(np, np);
            for &alpha in &[0.0, 0.08, 0.31, 0.5, 0.86, 1.0] {
                for &beta in &[0.0, 0.45, 0.97, 1.0] {
                    basis.sample_monotone(alpha, beta, &mut coeff);
                    assert!((matrix_sum(&coeff) - 1.0).abs() < 1e-12);
                    for p in 0..np {
                        for q in 0..np {
                            assert!(coeff[(p, q)] >= 0.0);
                            assert!(coeff[(p, q)] <= 1.0 + 1e-14);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn monotone_reproduces_linear_fields() {
        // Coefficients of f(α, β) = a α + b β + c at the collocation points
        // must be interpolated back exactly.
        let np = 4;
        let basis = GllBasis::new(np);
        let (a, b, c) = (0.7, -0.4, 0.2);
        let mut coeff = Mat::zeros(np, np);
        for &alpha in &[0.05, 0.33, 0.52, 0.94] {
            for &beta in &[0.11, 0.68, 0.99] {
                basis.sample_monotone(alpha, beta, &mut coeff);
                let mut value = 0.0;
                for p in 0..np {
                    for q in 0..np {
                        let nodal = a * basis.nodes()[p] + b * basis.nodes()[q] + c;
                        value += coeff[(p, q)] * nodal;
                    }
                }
                let expected = a * alpha + b * beta + c;
                assert!(
                    (value - expected).abs() < 1e-13,
                    "({}, {}): {} vs {}",
                    alpha,
                    beta,
                    value,
                    expected
                );
            }
        }
    }

    #[test]
    fn monotone_delta_at_collocation_points() {
        let np = 4;
        let basis = GllBasis::new(np);
        let mut coeff = Mat::zeros(np, np);
        for p0 in 0..np {
            for q0 in 0..np {
                basis.sample_monotone(basis.nodes()[p0], basis.nodes()[q0], &mut coeff);
                assert!((coeff[(p0, q0)] - 1.0).abs() < 1e-12);
            }
        }
    }
}
