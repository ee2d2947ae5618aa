//! Mesh representation for unstructured spherical grids.
//!
//! A mesh is a flat node array plus per-face vertex index lists; faces are
//! spherical polygons whose edges are great-circle arcs. Overlap meshes
//! additionally record, for each face, the source and target faces it was
//! cut from. Overlap faces are grouped contiguously by source face; the
//! remap construction relies on that ordering.

use super::area::spherical_face_area;

/// Point on the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Node) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Node) -> Node {
        Node {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Radial projection onto the unit sphere.
    pub fn normalized(&self) -> Node {
        let m = self.magnitude();
        Node {
            x: self.x / m,
            y: self.y / m,
            z: self.z / m,
        }
    }

    /// Componentwise linear combination `a*self + b*other`.
    pub fn combine(&self, a: f64, other: &Node, b: f64) -> Node {
        Node {
            x: a * self.x + b * other.x,
            y: a * self.y + b * other.y,
            z: a * self.z + b * other.z,
        }
    }
}

/// Unstructured mesh of spherical polygons.
#[derive(Clone, Debug, Default)]
pub struct SphereMesh {
    /// Unit-sphere vertex coordinates
    pub nodes: Vec<Node>,

    /// Face vertex lists (counter-clockwise as seen from outside the
    /// sphere), at least three vertices per face
    pub faces: Vec<Vec<usize>>,

    /// Geodesic face areas; filled by [`SphereMesh::calculate_face_areas`]
    pub face_area: Vec<f64>,

    /// For overlap meshes: source face of each overlap face
    pub first_face_ix: Vec<usize>,

    /// For overlap meshes: target face of each overlap face
    pub second_face_ix: Vec<usize>,
}

impl SphereMesh {
    /// Create a mesh from nodes and face lists. Areas start empty.
    pub fn new(nodes: Vec<Node>, faces: Vec<Vec<usize>>) -> Self {
        for (i, face) in faces.iter().enumerate() {
            assert!(face.len() >= 3, "Face {} has fewer than 3 vertices", i);
        }
        Self {
            nodes,
            faces,
            face_area: Vec::new(),
            first_face_ix: Vec::new(),
            second_face_ix: Vec::new(),
        }
    }

    /// Attach overlap correspondence arrays (one entry per face).
    pub fn with_overlap_indices(mut self, first: Vec<usize>, second: Vec<usize>) -> Self {
        assert_eq!(first.len(), self.faces.len());
        assert_eq!(second.len(), self.faces.len());
        self.first_face_ix = first;
        self.second_face_ix = second;
        self
    }

    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Compute all geodesic face areas; returns the total.
    pub fn calculate_face_areas(&mut self) -> f64 {
        self.face_area = self
            .faces
            .iter()
            .map(|face| spherical_face_area(face, &self.nodes))
            .collect();
        self.face_area.iter().sum()
    }

    /// Largest source-face index referenced by the overlap, plus one.
    ///
    /// The producer emits overlap faces against a specific pair of meshes;
    /// comparing this count with the candidate source mesh's face count
    /// detects a swapped or mismatched overlap file.
    pub fn max_first_face_count(&self) -> usize {
        self.first_face_ix
            .iter()
            .map(|&ix| ix + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check that overlap faces are grouped contiguously by source face:
    /// once the scan leaves a source face it must never return to it.
    pub fn overlap_is_grouped(&self) -> bool {
        let mut seen = vec![false; self.max_first_face_count()];
        let mut last = usize::MAX;
        for &ix in &self.first_face_ix {
            if ix != last {
                if seen[ix] {
                    return false;
                }
                seen[ix] = true;
                last = ix;
            }
        }
        true
    }
}
