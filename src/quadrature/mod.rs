//! Quadrature rules on reference domains.
//!
//! Symmetric triangular rules in barycentric form, used to integrate over
//! the sub-triangles of overlap faces.

mod triangle;

pub use triangle::TriangularQuadratureRule;
