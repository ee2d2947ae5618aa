//! Symmetric quadrature rules on the reference triangle.
//!
//! Points are stored as barycentric triples (λ0, λ1, λ2) with weights
//! normalized to sum to 1, so that for a triangle with corners a, b, c
//! and area A:
//! ∫ f dA ≈ A · Σ_l w_l f(λ0·a + λ1·b + λ2·c)
//!
//! The rules are fully symmetric: permuting the corners leaves the point
//! set invariant, so the integral does not depend on corner ordering.

/// A symmetric barycentric quadrature rule on the reference triangle.
#[derive(Clone, Debug)]
pub struct TriangularQuadratureRule {
    /// Barycentric coordinates of each quadrature point
    points: Vec<[f64; 3]>,
    /// Weights, summing to 1
    weights: Vec<f64>,
    /// Polynomial degree integrated exactly
    order: usize,
}

impl TriangularQuadratureRule {
    /// Build the rule of the given polynomial order.
    ///
    /// Supported orders: 1 (centroid), 2 (3-point), 4 (6-point). The
    /// 6-point rule integrates quartics exactly and is the standard
    /// choice for remap weight integration.
    ///
    /// # Panics
    /// Panics on an unsupported order.
    pub fn new(order: usize) -> Self {
        let (points, weights): (Vec<[f64; 3]>, Vec<f64>) = match order {
            1 => {
                let c = 1.0 / 3.0;
                (vec![[c, c, c]], vec![1.0])
            }
            2 => {
                // Midpoint-of-edge rule, exact for quadratics
                let w = 1.0 / 3.0;
                (
                    vec![
                        [0.5, 0.5, 0.0],
                        [0.0, 0.5, 0.5],
                        [0.5, 0.0, 0.5],
                    ],
                    vec![w, w, w],
                )
            }
            4 => {
                // Two symmetric orbits of three points each
                let a = 0.445948490915965;
                let b = 0.091576213509771;
                let wa = 0.223381589678011;
                let wb = 0.109951743655322;
                (
                    vec![
                        [1.0 - 2.0 * a, a, a],
                        [a, 1.0 - 2.0 * a, a],
                        [a, a, 1.0 - 2.0 * a],
                        [1.0 - 2.0 * b, b, b],
                        [b, 1.0 - 2.0 * b, b],
                        [b, b, 1.0 - 2.0 * b],
                    ],
                    vec![wa, wa, wa, wb, wb, wb],
                )
            }
            _ => panic!("Unsupported triangular quadrature order: {}", order),
        };

        Self {
            points,
            weights,
            order,
        }
    }

    /// Number of quadrature points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the rule is empty (never, kept for iterator-style APIs).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Barycentric coordinates of point `l`.
    pub fn point(&self, l: usize) -> [f64; 3] {
        self.points[l]
    }

    /// Weight of point `l`.
    pub fn weight(&self, l: usize) -> f64 {
        self.weights[l]
    }

    /// Polynomial degree integrated exactly.
    pub fn order(&self) -> usize {
        self.order
    }
}
