//! Constrained reconciliation of local remap weight blocks.
//!
//! Quadrature produces a raw block W (rows = overlap faces of one source
//! element, columns = the element's GLL coefficients) that satisfies the
//! remap constraints only up to quadrature error. Reconciliation finds the
//! closest block W′ in the Frobenius norm with
//!
//! - consistency: Σ_k W′[j][k] = 1 for every row j, and
//! - conservation: Σ_j a_T[j] W′[j][k] = a_S[k] for every column k,
//!
//! where a_S are the element's GLL Jacobians and a_T the overlap face
//! areas. The two families share one linearly dependent equation (global
//! area balance), so the last conservation equation is dropped; it then
//! holds automatically.
//!
//! The minimization is solved through its KKT system reduced to the Schur
//! complement: with C the constraint matrix and b the targets,
//! vec(W′) = vec(W) − Cᵀλ where C Cᵀ λ = C·vec(W) − b. Dropping the
//! redundant equation leaves C with full row rank, so C Cᵀ is symmetric
//! positive definite and a Cholesky solve applies. C Cᵀ is assembled from
//! its closed form rather than by dense multiplication.

use faer::linalg::solvers::Solve;
use faer::{Mat, Side};

use super::error::RemapError;

/// Force consistency and conservation on a local weight block.
///
/// `coeff` is the raw (n_rows × n_cols) block, modified in place;
/// `source_area` has length n_cols and `target_area` length n_rows. With
/// `monotone` set, the corrected block is afterwards blended toward the
/// Jacobian-proportional low-order block just far enough to clear any
/// negative entries; the blend preserves both constraint families.
pub fn enforce_consistency_conservation(
    source_area: &[f64],
    target_area: &[f64],
    coeff: &mut Mat<f64>,
    monotone: bool,
) -> Result<(), RemapError> {
    let n_rows = coeff.nrows();
    let n_cols = coeff.ncols();
    assert_eq!(source_area.len(), n_cols);
    assert_eq!(target_area.len(), n_rows);

    let n_coeff = n_rows * n_cols;
    let n_cond = n_rows + n_cols - 1;

    // Constraint matrix, one row per retained equation, and its targets.
    // Row i < n_rows: consistency on block row i.
    // Row n_rows + j, j < n_cols - 1: conservation on block column j.
    let mut c = Mat::<f64>::zeros(n_cond, n_coeff);
    let mut b = vec![0.0; n_cond];

    for i in 0..n_rows {
        for j in 0..n_cols {
            c[(i, i * n_cols + j)] = 1.0;
        }
        b[i] = 1.0;
    }
    for j in 0..n_cols - 1 {
        for i in 0..n_rows {
            c[(n_rows + j, i * n_cols + j)] = target_area[i];
        }
        b[n_rows + j] = source_area[j];
    }

    // Schur matrix C Cᵀ from its closed form: the consistency block is
    // n_cols·I, the conservation block Σ a_T²·I, and the cross block has
    // entry a_T[i] wherever a consistency and a conservation equation
    // touch the same coefficient.
    let p: f64 = target_area.iter().map(|&a| a * a).sum();

    let mut cct = Mat::<f64>::zeros(n_cond, n_cond);
    for i in 0..n_rows {
        cct[(i, i)] = n_cols as f64;
        for j in 0..n_cols - 1 {
            cct[(i, n_rows + j)] = target_area[i];
            cct[(n_rows + j, i)] = target_area[i];
        }
    }
    for j in 0..n_cols - 1 {
        cct[(n_rows + j, n_rows + j)] = p;
    }

    // Residual y = C·vec(W) - b
    let mut y = Mat::<f64>::zeros(n_cond, 1);
    for r in 0..n_cond {
        let mut dot = 0.0;
        for i in 0..n_rows {
            for j in 0..n_cols {
                dot += c[(r, i * n_cols + j)] * coeff[(i, j)];
            }
        }
        y[(r, 0)] = dot - b[r];
    }

    let llt = cct
        .as_ref()
        .llt(Side::Lower)
        .map_err(|e| RemapError::IndefiniteSchur(format!("{e:?}")))?;
    let lambda = llt.solve(&y);

    // vec(W') = vec(W) - Cᵀ λ
    for i in 0..n_rows {
        for j in 0..n_cols {
            let mut correction = 0.0;
            for r in 0..n_cond {
                correction += c[(r, i * n_cols + j)] * lambda[(r, 0)];
            }
            coeff[(i, j)] -= correction;
        }
    }

    if monotone {
        blend_monotone(source_area, coeff);
    }

    Ok(())
}

/// Blend a reconciled block toward the low-order block until non-negative.
///
/// The low-order reference distributes each row in proportion to the GLL
/// Jacobians, W_lo[j][k] = a_S[k] / Σ a_S, which satisfies consistency by
/// normalization and conservation whenever the element is fully covered.
/// The blend factor is the smallest one clearing every negative entry.
fn blend_monotone(source_area: &[f64], coeff: &mut Mat<f64>) {
    let n_rows = coeff.nrows();
    let n_cols = coeff.ncols();

    let total_jacobian: f64 = source_area.iter().sum();

    let mut blend: f64 = 0.0;
    for i in 0..n_rows {
        for j in 0..n_cols {
            let value = coeff[(i, j)];
            if value < 0.0 {
                let low = source_area[j] / total_jacobian;
                blend = blend.max(-value / (low - value).abs());
            }
        }
    }

    if blend > 0.0 {
        for i in 0..n_rows {
            for j in 0..n_cols {
                let low = source_area[j] / total_jacobian;
                coeff[(i, j)] = (1.0 - blend) * coeff[(i, j)] + blend * low;
            }
        }
    }
}
