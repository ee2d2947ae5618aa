//! # remap-rs
//!
//! Offline conservative remapping between unstructured meshes on the sphere.
//!
//! Given a spectral-element source mesh, a finite-volume target mesh and a
//! precomputed overlap mesh (whose faces are the geometric intersections of
//! source and target faces), this crate assembles a sparse linear operator
//! that restricts nodal source fields onto target faces while preserving
//! constants (consistency) and area-weighted integrals (conservation), with
//! an optional monotone mode that keeps all weights in [0, 1].
//!
//! Building blocks:
//! - Legendre polynomials and Gauss-Lobatto-Legendre rules
//! - Symmetric triangular quadrature in barycentric form
//! - Spherical mesh representation with geodesic face areas
//! - GLL tensor-product basis sampling and the inverse parametric map
//! - Constrained least-squares reconciliation of local weight blocks
//! - Sparse offline-map accumulation and verification

pub mod basis;
pub mod mesh;
pub mod polynomial;
pub mod quadrature;
pub mod remap;

pub use basis::{
    GllBasis, GllMetadata, apply_inverse_map, apply_local_map, generate_gll_metadata,
};
pub use mesh::{Node, SphereMesh, spherical_face_area, spherical_triangle_area};
pub use polynomial::{gauss_lobatto_points, legendre, legendre_and_derivative};
pub use quadrature::TriangularQuadratureRule;
pub use remap::{
    OfflineMap, OverlapGroup, OverlapGroups, RemapError, RemapSummary,
    enforce_consistency_conservation, remap_se_to_fv, remap_se_to_fv_low_order,
};
