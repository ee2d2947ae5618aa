//! Offline-map assembly for spectral-element sources and finite-volume
//! targets.
//!
//! The high-order path walks the overlap mesh one source element at a
//! time: every overlap face is fan-triangulated, each sub-triangle is
//! integrated with a symmetric triangular rule, quadrature points are
//! pulled back through the element's inverse parametric map, and the GLL
//! basis sampled there accumulates into the element's raw weight block.
//! Fully covered elements then get their block reconciled to exact
//! consistency and conservation before scattering into the sparse map;
//! partially covered elements keep their raw block and are reported.
//!
//! The low-order path skips quadrature entirely and distributes each
//! overlap face over the element's GLL nodes in proportion to their
//! Jacobians. It is first-order accurate but positive by construction.

use faer::Mat;

use crate::basis::{GllBasis, GllMetadata, apply_inverse_map};
use crate::mesh::{SphereMesh, spherical_triangle_area};
use crate::quadrature::TriangularQuadratureRule;

use super::error::RemapError;
use super::offline_map::OfflineMap;
use super::overlap::{OverlapGroups, fan_triangle};
use super::reconcile::enforce_consistency_conservation;

/// Slack accepted from the inverse map before declaring a point outside
/// its source element; in-range values are clamped to [0, 1].
const INVERSE_MAP_TOLERANCE: f64 = 1e-12;

/// Overlap-vs-element area mismatch beyond which an element counts as
/// partially covered and reconciliation is skipped.
const PARTIAL_COVER_TOLERANCE: f64 = 1e-10;

/// Non-fatal observations from an assembly pass.
#[derive(Clone, Debug, Default)]
pub struct RemapSummary {
    /// Source faces in the input mesh
    pub n_source_faces: usize,
    /// Source faces that contributed at least one overlap face
    pub n_covered_faces: usize,
    /// Source faces whose overlap did not cover them; their raw weight
    /// blocks were kept without reconciliation
    pub partial_elements: Vec<usize>,
    /// Total geodesic area of the overlap mesh
    pub overlap_area: f64,
}

impl RemapSummary {
    /// Mismatch between overlap area and a reference source area. Beyond
    /// [`PARTIAL_COVER_TOLERANCE`] the source is only partially covered
    /// globally and post-hoc operator checks are not meaningful.
    pub fn global_cover_mismatch(&self, source_area: f64) -> f64 {
        (self.overlap_area - source_area).abs()
    }

    /// Print the pass in human-readable form.
    pub fn print_summary(&self) {
        println!("=== Remap Assembly ===");
        println!(
            "Source faces:  {} ({} covered)",
            self.n_source_faces, self.n_covered_faces
        );
        println!("Overlap area:  {:.15e}", self.overlap_area);
        if self.partial_elements.is_empty() {
            println!("Partial elements: none");
        } else {
            println!("Partial elements: {:?}", self.partial_elements);
        }
    }
}

/// Assemble the high-order spectral-element to finite-volume operator.
///
/// `metadata` supplies the source mesh's global GLL node ids (1-based)
/// and Jacobians; `map` receives area-normalized contributions keyed by
/// (target face, 0-based global node id). All meshes must have face areas
/// computed. With `monotone` set, basis sampling switches to the monotone
/// variant and reconciled blocks are blended until non-negative.
pub fn remap_se_to_fv(
    mesh_input: &SphereMesh,
    mesh_output: &SphereMesh,
    mesh_overlap: &SphereMesh,
    metadata: &GllMetadata,
    monotone: bool,
    map: &mut OfflineMap,
) -> Result<RemapSummary, RemapError> {
    if metadata.n_elements() != mesh_input.n_faces() {
        return Err(RemapError::ElementCountMismatch {
            metadata: metadata.n_elements(),
            mesh: mesh_input.n_faces(),
        });
    }

    let np = metadata.np();
    let basis = GllBasis::new(np);
    let rule = TriangularQuadratureRule::new(4);

    let mut sample = Mat::<f64>::zeros(np, np);

    let mut summary = RemapSummary {
        n_source_faces: mesh_input.n_faces(),
        overlap_area: mesh_overlap.face_area.iter().sum(),
        ..Default::default()
    };

    for group in OverlapGroups::new(mesh_overlap) {
        let e = group.source_face;
        let face = &mesh_input.faces[e];
        if face.len() != 4 {
            return Err(RemapError::NonQuadrilateralFace {
                face: e,
                edges: face.len(),
            });
        }
        summary.n_covered_faces += 1;

        let corners = [
            mesh_input.nodes[face[0]],
            mesh_input.nodes[face[1]],
            mesh_input.nodes[face[2]],
            mesh_input.nodes[face[3]],
        ];

        // Raw weight block: rows = overlap faces of this element,
        // columns = flattened GLL coefficients p·nP + q.
        let mut coeff = Mat::<f64>::zeros(group.count, np * np);

        for j in 0..group.count {
            let ix = group.first + j;
            let overlap_face = &mesh_overlap.faces[ix];
            let overlap_area = mesh_overlap.face_area[ix];

            for k in 0..overlap_face.len() - 2 {
                let (i0, i1, i2) = fan_triangle(overlap_face, k);
                let n0 = mesh_overlap.nodes[i0];
                let n1 = mesh_overlap.nodes[i1];
                let n2 = mesh_overlap.nodes[i2];

                let triangle_area = spherical_triangle_area(&n0, &n1, &n2);

                for l in 0..rule.len() {
                    let g = rule.point(l);
                    let point = n0
                        .combine(g[0], &n1, g[1])
                        .combine(1.0, &n2, g[2])
                        .normalized();

                    let (alpha, beta) = apply_inverse_map(&corners, &point);
                    if !(-INVERSE_MAP_TOLERANCE..=1.0 + INVERSE_MAP_TOLERANCE).contains(&alpha)
                        || !(-INVERSE_MAP_TOLERANCE..=1.0 + INVERSE_MAP_TOLERANCE).contains(&beta)
                    {
                        return Err(RemapError::InverseMapOutOfRange { alpha, beta });
                    }
                    let alpha = alpha.clamp(0.0, 1.0);
                    let beta = beta.clamp(0.0, 1.0);

                    if monotone {
                        basis.sample_monotone(alpha, beta, &mut sample);
                    } else {
                        basis.sample(alpha, beta, &mut sample);
                    }

                    let scale = rule.weight(l) * triangle_area / overlap_area;
                    for p in 0..np {
                        for q in 0..np {
                            coeff[(j, p * np + q)] += scale * sample[(p, q)];
                        }
                    }
                }
            }
        }

        // Element area vectors for the constraint step
        let mut source_area = vec![0.0; np * np];
        for p in 0..np {
            for q in 0..np {
                source_area[p * np + q] = metadata.jacobian(p, q, e);
            }
        }

        let target_area: Vec<f64> = group
            .faces()
            .map(|ix| mesh_overlap.face_area[ix])
            .collect();
        let covered: f64 = target_area.iter().sum();

        if (covered - mesh_input.face_area[e]).abs() > PARTIAL_COVER_TOLERANCE {
            summary.partial_elements.push(e);
        } else {
            enforce_consistency_conservation(&source_area, &target_area, &mut coeff, monotone)?;
        }

        // Scatter into the sparse operator; this is the one place the
        // 1-based external node ids become 0-based.
        for j in 0..group.count {
            let ix = group.first + j;
            let target_face = mesh_overlap.second_face_ix[ix];
            let scale = mesh_overlap.face_area[ix] / mesh_output.face_area[target_face];

            for p in 0..np {
                for q in 0..np {
                    map.add(
                        target_face,
                        metadata.node_id(p, q, e) - 1,
                        coeff[(j, p * np + q)] * scale,
                    );
                }
            }
        }
    }

    Ok(summary)
}

/// Assemble the low-order spectral-element to finite-volume operator.
///
/// Each overlap face receives every GLL coefficient of its source element
/// weighted by the node's share of the element Jacobian. No quadrature,
/// no reconciliation; the result is consistent and conservative by
/// construction and always monotone.
pub fn remap_se_to_fv_low_order(
    mesh_input: &SphereMesh,
    mesh_output: &SphereMesh,
    mesh_overlap: &SphereMesh,
    metadata: &GllMetadata,
    map: &mut OfflineMap,
) -> Result<RemapSummary, RemapError> {
    if metadata.n_elements() != mesh_input.n_faces() {
        return Err(RemapError::ElementCountMismatch {
            metadata: metadata.n_elements(),
            mesh: mesh_input.n_faces(),
        });
    }

    let np = metadata.np();

    let mut summary = RemapSummary {
        n_source_faces: mesh_input.n_faces(),
        overlap_area: mesh_overlap.face_area.iter().sum(),
        ..Default::default()
    };

    for group in OverlapGroups::new(mesh_overlap) {
        let e = group.source_face;
        let total_jacobian = metadata.element_area(e);
        summary.n_covered_faces += 1;

        for ix in group.faces() {
            let target_face = mesh_overlap.second_face_ix[ix];
            let scale = mesh_overlap.face_area[ix] / mesh_output.face_area[target_face];

            for p in 0..np {
                for q in 0..np {
                    map.add(
                        target_face,
                        metadata.node_id(p, q, e) - 1,
                        metadata.jacobian(p, q, e) / total_jacobian * scale,
                    );
                }
            }
        }
    }

    Ok(summary)
}
