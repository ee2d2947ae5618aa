//! Geodesic areas of spherical triangles and polygons.
//!
//! Triangle areas use the spherical-excess formula in the Oosterom-Strackee
//! arctangent form,
//! tan(E/2) = |a · (b × c)| / (1 + a·b + b·c + c·a),
//! which stays accurate for thin and small triangles where summing corner
//! angles loses precision. Polygon areas fan-triangulate from the first
//! vertex; excess areas are additive over any decomposition whose pieces
//! share great-circle edges.

use super::spherical::Node;

/// Geodesic area of the spherical triangle with unit-vector corners a, b, c.
pub fn spherical_triangle_area(a: &Node, b: &Node, c: &Node) -> f64 {
    let numerator = a.dot(&b.cross(c)).abs();
    let denominator = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * numerator.atan2(denominator)
}

/// Geodesic area of a spherical polygon given by node indices.
pub fn spherical_face_area(face: &[usize], nodes: &[Node]) -> f64 {
    let n0 = &nodes[face[0]];
    (0..face.len() - 2)
        .map(|k| spherical_triangle_area(n0, &nodes[face[k + 1]], &nodes[face[k + 2]]))
        .sum()
}
