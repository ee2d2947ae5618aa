//! Spectral-element basis machinery.
//!
//! This module provides:
//! - Sampling of the GLL tensor-product basis (and its monotone variant)
//! - The forward bilinear spherical map and its Newton inverse
//! - GLL metadata generation (global node numbering and Jacobians)

mod inverse_map;
mod metadata;
mod sampling;

pub use inverse_map::{apply_inverse_map, apply_local_map, local_map_derivatives};
pub use metadata::{GllMetadata, generate_gll_metadata};
pub use sampling::GllBasis;
