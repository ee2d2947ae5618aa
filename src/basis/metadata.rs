//! GLL metadata generation for spectral-element meshes.
//!
//! A spectral-element mesh carries, per element, an nP × nP grid of global
//! node ids (coincident collocation points on shared edges receive one id)
//! and of GLL Jacobians (the quadrature weight times the surface Jacobian
//! of the element map at the node). External metadata formats store the
//! ids 1-based; this module generates the same convention so that
//! downstream consumers subtract 1 exactly once, at the sparse scatter.

use std::collections::HashMap;

use crate::basis::inverse_map::local_map_derivatives;
use crate::basis::sampling::GllBasis;
use crate::mesh::{Node, SphereMesh};
use crate::remap::RemapError;

/// Coordinate quantization for unifying coincident collocation points.
const NODE_QUANTUM: f64 = 1e-10;

/// Per-element GLL node ids and Jacobians for a spectral-element mesh.
#[derive(Clone, Debug)]
pub struct GllMetadata {
    np: usize,
    n_elem: usize,
    /// Number of distinct global collocation points
    n_dofs: usize,
    /// 1-based global node ids, laid out as [p][q][element]
    node_ids: Vec<usize>,
    /// GLL Jacobians, laid out as [p][q][element]
    jacobians: Vec<f64>,
    /// Position of each global collocation point, indexed 0-based
    dof_nodes: Vec<Node>,
}

impl GllMetadata {
    pub fn np(&self) -> usize {
        self.np
    }

    pub fn n_elements(&self) -> usize {
        self.n_elem
    }

    /// Number of distinct global collocation points.
    pub fn n_dofs(&self) -> usize {
        self.n_dofs
    }

    /// Position of a global collocation point (0-based id).
    pub fn dof_node(&self, g: usize) -> Node {
        self.dof_nodes[g]
    }

    fn index(&self, p: usize, q: usize, e: usize) -> usize {
        (p * self.np + q) * self.n_elem + e
    }

    /// 1-based global id of collocation point (p, q) on element e.
    pub fn node_id(&self, p: usize, q: usize, e: usize) -> usize {
        self.node_ids[self.index(p, q, e)]
    }

    /// GLL Jacobian of collocation point (p, q) on element e.
    pub fn jacobian(&self, p: usize, q: usize, e: usize) -> f64 {
        self.jacobians[self.index(p, q, e)]
    }

    /// Sum of the GLL Jacobians of element e (its numerical area).
    pub fn element_area(&self, e: usize) -> f64 {
        let mut total = 0.0;
        for p in 0..self.np {
            for q in 0..self.np {
                total += self.jacobian(p, q, e);
            }
        }
        total
    }

    /// Rescale each element's Jacobians so that their sum matches the
    /// given face areas.
    ///
    /// Quadrature makes the numerical element area differ from the
    /// geodesic one by the integration error; aligning the two makes the
    /// per-element consistency and conservation constraint families
    /// jointly feasible, so downstream reconciliation can satisfy both
    /// exactly.
    ///
    /// # Panics
    /// Panics if `face_area` does not have one entry per element.
    pub fn scale_to_areas(&mut self, face_area: &[f64]) {
        assert_eq!(face_area.len(), self.n_elem);
        for e in 0..self.n_elem {
            let factor = face_area[e] / self.element_area(e);
            for p in 0..self.np {
                for q in 0..self.np {
                    let ix = self.index(p, q, e);
                    self.jacobians[ix] *= factor;
                }
            }
        }
    }

    /// Accumulated Jacobian per global collocation point (0-based),
    /// i.e. the area each degree of freedom is responsible for.
    pub fn dof_areas(&self) -> Vec<f64> {
        let mut areas = vec![0.0; self.n_dofs];
        for e in 0..self.n_elem {
            for p in 0..self.np {
                for q in 0..self.np {
                    areas[self.node_id(p, q, e) - 1] += self.jacobian(p, q, e);
                }
            }
        }
        areas
    }
}

/// Generate GLL metadata for a quadrilateral spectral-element mesh.
///
/// Numbers the collocation points globally (coincident points across
/// element boundaries share an id) and integrates the per-node Jacobians.
/// Returns the metadata together with the mesh's total numerical area,
/// which converges to the geodesic area with the quadrature order.
pub fn generate_gll_metadata(
    mesh: &SphereMesh,
    np: usize,
) -> Result<(GllMetadata, f64), RemapError> {
    let basis = GllBasis::new(np);
    let n_elem = mesh.n_faces();

    let mut node_ids = vec![0usize; np * np * n_elem];
    let mut jacobians = vec![0.0; np * np * n_elem];
    let mut dof_nodes: Vec<Node> = Vec::new();
    let mut unifier: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut total_area = 0.0;

    for (e, face) in mesh.faces.iter().enumerate() {
        if face.len() != 4 {
            return Err(RemapError::NonQuadrilateralFace {
                face: e,
                edges: face.len(),
            });
        }

        let corners = [
            mesh.nodes[face[0]],
            mesh.nodes[face[1]],
            mesh.nodes[face[2]],
            mesh.nodes[face[3]],
        ];

        for p in 0..np {
            for q in 0..np {
                let alpha = basis.nodes()[p];
                let beta = basis.nodes()[q];
                let (x, xa, xb) = local_map_derivatives(&corners, alpha, beta);

                let id = unify_node(&mut unifier, &x);
                if id > dof_nodes.len() {
                    dof_nodes.push(x);
                }
                let jac = basis.weights()[p] * basis.weights()[q] * xa.cross(&xb).magnitude();

                let ix = (p * np + q) * n_elem + e;
                node_ids[ix] = id;
                jacobians[ix] = jac;
                total_area += jac;
            }
        }
    }

    let metadata = GllMetadata {
        np,
        n_elem,
        n_dofs: unifier.len(),
        node_ids,
        jacobians,
        dof_nodes,
    };

    Ok((metadata, total_area))
}

/// Look up or assign the 1-based global id of a collocation point.
fn unify_node(unifier: &mut HashMap<(i64, i64, i64), usize>, x: &Node) -> usize {
    let key = (
        (x.x / NODE_QUANTUM).round() as i64,
        (x.y / NODE_QUANTUM).round() as i64,
        (x.z / NODE_QUANTUM).round() as i64,
    );
    let next = unifier.len() + 1;
    *unifier.entry(key).or_insert(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::spherical_face_area;

    /// Two geodesic quads sharing an edge on the equator band.
    fn two_panel_mesh() -> SphereMesh {
        let nodes = vec![
            Node::new(1.0, -0.4, -0.2).normalized(),
            Node::new(1.0, 0.0, -0.2).normalized(),
            Node::new(1.0, 0.4, -0.2).normalized(),
            Node::new(1.0, 0.4, 0.2).normalized(),
            Node::new(1.0, 0.0, 0.2).normalized(),
            Node::new(1.0, -0.4, 0.2).normalized(),
        ];
        let faces = vec![vec![0, 1, 4, 5], vec![1, 2, 3, 4]];
        let mut mesh = SphereMesh::new(nodes, faces);
        mesh.calculate_face_areas();
        mesh
    }

    #[test]
    fn shared_edge_nodes_are_unified() {
        let mesh = two_panel_mesh();
        let np = 4;
        let (meta, _) = generate_gll_metadata(&mesh, np).unwrap();

        // 2 elements × 16 points, minus the nP shared points on the edge
        assert_eq!(meta.n_dofs(), 2 * np * np - np);

        // The shared edge is α = 1 on element 0 and α = 0 on element 1
        // (element 1 starts at the shared vertices), with matching β.
        for q in 0..np {
            assert_eq!(meta.node_id(np - 1, q, 0), meta.node_id(0, q, 1));
        }
    }

    #[test]
    fn jacobians_positive_and_sum_to_area() {
        let mesh = two_panel_mesh();
        let (meta, numerical_area) = generate_gll_metadata(&mesh, 4).unwrap();

        for e in 0..2 {
            for p in 0..4 {
                for q in 0..4 {
                    assert!(meta.jacobian(p, q, e) > 0.0);
                }
            }
        }

        let geometric: f64 = mesh.face_area.iter().sum();
        assert!(
            (numerical_area - geometric).abs() < 1e-4,
            "numerical {} vs geometric {}",
            numerical_area,
            geometric
        );

        // Element sums agree with the global total
        let by_element: f64 = (0..2).map(|e| meta.element_area(e)).sum();
        assert!((by_element - numerical_area).abs() < 1e-13);
    }

    #[test]
    fn dof_areas_partition_the_mesh() {
        let mesh = two_panel_mesh();
        let (meta, numerical_area) = generate_gll_metadata(&mesh, 4).unwrap();
        let dof_areas = meta.dof_areas();
        assert_eq!(dof_areas.len(), meta.n_dofs());
        let sum: f64 = dof_areas.iter().sum();
        assert!((sum - numerical_area).abs() < 1e-13);
    }

    #[test]
    fn rejects_non_quadrilateral() {
        let nodes = vec![
            Node::new(1.0, 0.0, 0.0),
            Node::new(0.0, 1.0, 0.0),
            Node::new(0.0, 0.0, 1.0),
        ];
        let mesh = SphereMesh::new(nodes, vec![vec![0, 1, 2]]);
        assert!(generate_gll_metadata(&mesh, 4).is_err());
    }

    #[test]
    fn refinement_converges_to_geodesic_area() {
        // Numerical area error should shrink rapidly with nP.
        let mesh = two_panel_mesh();
        let geometric: f64 = mesh
            .faces
            .iter()
            .map(|f| spherical_face_area(f, &mesh.nodes))
            .sum();
        let (_, area2) = generate_gll_metadata(&mesh, 2).unwrap();
        let (_, area6) = generate_gll_metadata(&mesh, 6).unwrap();
        assert!((area6 - geometric).abs() < (area2 - geometric).abs());
        assert!((area6 - geometric).abs() < 1e-8);
    }
}
