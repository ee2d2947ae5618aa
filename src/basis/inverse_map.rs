//! Forward and inverse parametric maps for curvilinear quadrilaterals.
//!
//! A source element with corner nodes n0..n3 (counter-clockwise) is the
//! image of the unit square under the normalized bilinear map
//!
//!   X(α, β) = B(α, β) / |B(α, β)|,
//!   B(α, β) = (1-α)(1-β) n0 + α(1-β) n1 + αβ n2 + (1-α)β n3.
//!
//! The inverse map recovers (α, β) for a point on the sphere by Newton
//! iteration, measuring the residual in an orthonormal tangent basis at
//! the query point so that the 2×2 Newton system stays well conditioned.
//! The iteration itself does not range-check its result; the caller
//! decides what parametric coordinates outside [0, 1]² mean.

use crate::mesh::Node;

/// Evaluate the normalized bilinear map and its tangent derivatives.
///
/// Returns `(X, ∂X/∂α, ∂X/∂β)`; the derivatives lie in the tangent plane
/// of the sphere at X.
pub fn local_map_derivatives(corners: &[Node; 4], alpha: f64, beta: f64) -> (Node, Node, Node) {
    let [n0, n1, n2, n3] = corners;

    let mut b = Node::new(0.0, 0.0, 0.0);
    b = b.combine(1.0, n0, (1.0 - alpha) * (1.0 - beta));
    b = b.combine(1.0, n1, alpha * (1.0 - beta));
    b = b.combine(1.0, n2, alpha * beta);
    b = b.combine(1.0, n3, (1.0 - alpha) * beta);

    // ∂B/∂α = (1-β)(n1-n0) + β(n2-n3), ∂B/∂β = (1-α)(n3-n0) + α(n2-n1)
    let db_da = n1
        .combine(1.0 - beta, n0, -(1.0 - beta))
        .combine(1.0, &n2.combine(beta, n3, -beta), 1.0);
    let db_db = n3
        .combine(1.0 - alpha, n0, -(1.0 - alpha))
        .combine(1.0, &n2.combine(alpha, n1, -alpha), 1.0);

    let mag = b.magnitude();
    let x = Node::new(b.x / mag, b.y / mag, b.z / mag);

    // d(B/|B|) = (I - XXᵀ) dB / |B|
    let project = |d: &Node| {
        let radial = x.dot(d);
        Node::new(
            (d.x - radial * x.x) / mag,
            (d.y - radial * x.y) / mag,
            (d.z - radial * x.z) / mag,
        )
    };

    (x, project(&db_da), project(&db_db))
}

/// Evaluate the normalized bilinear map at (α, β).
pub fn apply_local_map(corners: &[Node; 4], alpha: f64, beta: f64) -> Node {
    let [n0, n1, n2, n3] = corners;
    let mut b = Node::new(0.0, 0.0, 0.0);
    b = b.combine(1.0, n0, (1.0 - alpha) * (1.0 - beta));
    b = b.combine(1.0, n1, alpha * (1.0 - beta));
    b = b.combine(1.0, n2, alpha * beta);
    b = b.combine(1.0, n3, (1.0 - alpha) * beta);
    b.normalized()
}

/// Orthonormal tangent basis at a unit vector.
fn tangent_basis(x: &Node) -> (Node, Node) {
    // Seed with the coordinate axis least aligned with x
    let ax = x.x.abs();
    let ay = x.y.abs();
    let az = x.z.abs();
    let seed = if ax <= ay && ax <= az {
        Node::new(1.0, 0.0, 0.0)
    } else if ay <= az {
        Node::new(0.0, 1.0, 0.0)
    } else {
        Node::new(0.0, 0.0, 1.0)
    };
    let e1 = x.cross(&seed).normalized();
    let e2 = x.cross(&e1);
    (e1, e2)
}

/// Recover the parametric coordinates of a spherical point inside a
/// curvilinear quadrilateral.
///
/// Newton iteration from the element center; converges quadratically for
/// points inside the element. The returned coordinates are raw iteration
/// output: callers must apply their own tolerance for points marginally
/// outside [0, 1]².
pub fn apply_inverse_map(corners: &[Node; 4], point: &Node) -> (f64, f64) {
    let (e1, e2) = tangent_basis(point);

    let mut alpha = 0.5;
    let mut beta = 0.5;

    for _ in 0..50 {
        let (x, xa, xb) = local_map_derivatives(corners, alpha, beta);

        let r = Node::new(x.x - point.x, x.y - point.y, x.z - point.z);
        let r1 = r.dot(&e1);
        let r2 = r.dot(&e2);

        // 2×2 Newton system in the tangent basis
        let j11 = xa.dot(&e1);
        let j12 = xb.dot(&e1);
        let j21 = xa.dot(&e2);
        let j22 = xb.dot(&e2);

        let det = j11 * j22 - j12 * j21;
        if det.abs() < 1e-30 {
            break;
        }

        let da = (r1 * j22 - r2 * j12) / det;
        let db = (r2 * j11 - r1 * j21) / det;

        alpha -= da;
        beta -= db;

        if da.abs() + db.abs() < 1e-15 {
            break;
        }
    }

    (alpha, beta)
}
