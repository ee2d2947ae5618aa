//! Error types for offline-map construction.
//!
//! All variants are fatal: map construction aborts and no partial operator
//! is handed back. Recoverable conditions (partially covered elements,
//! global area mismatch) are not errors; they are reported through
//! [`RemapSummary`](super::RemapSummary).

use thiserror::Error;

/// Fatal failure during offline-map construction.
#[derive(Debug, Error)]
pub enum RemapError {
    /// A quadrature point inverted to parametric coordinates outside the
    /// source element. Indicates a malformed overlap mesh.
    #[error("Inverse map out of range ({alpha:.5e} {beta:.5e})")]
    InverseMapOutOfRange { alpha: f64, beta: f64 },

    /// The spectral-element path requires quadrilateral source faces.
    #[error("Only quadrilateral elements allowed for spectral element remapping (face {face} has {edges} edges)")]
    NonQuadrilateralFace { face: usize, edges: usize },

    /// Cholesky factorization of the Schur system failed; the constraint
    /// matrix has lost rank, typically from degenerate overlap areas.
    #[error("Unable to solve SPD Schur system: {0}")]
    IndefiniteSchur(String),

    /// GLL metadata and source mesh disagree on the element count.
    #[error("Metadata describes {metadata} elements but the source mesh has {mesh}")]
    ElementCountMismatch { metadata: usize, mesh: usize },
}
