//! Offline-map construction.
//!
//! This module assembles the sparse remap operator:
//! - Overlap-mesh iteration grouped by source face
//! - High-order and low-order spectral-element to finite-volume assembly
//! - Constrained reconciliation of local weight blocks
//! - The sparse operator itself, with post-hoc verification

mod error;
mod offline_map;
mod overlap;
mod reconcile;
mod se_fv;

pub use error::RemapError;
pub use offline_map::OfflineMap;
pub use overlap::{OverlapGroup, OverlapGroups, fan_triangle};
pub use reconcile::enforce_consistency_conservation;
pub use se_fv::{RemapSummary, remap_se_to_fv, remap_se_to_fv_low_order};
