//! Hypothesis validation: on-contour scoring and angular-coverage
//! reliability.
//!
//! The score is the fraction of the triplet's arc points whose algebraic
//! distance to the fitted ellipse stays inside the configured band. Even a
//! high-scoring hypothesis can rest on arcs covering a sliver of the
//! contour, so a second gate approximates the angular circumference the
//! arcs span: the rotated endpoint extents of the three arcs, normalized by
//! `3(a + b)` and clamped to 1. Both gates are strict; survivors carry the
//! mean of the two values as their final score.

use crate::arcs::QuarterArc;
use crate::detector::EllipseParams;
use crate::estimator::EllipseCandidate;
use crate::types::Ellipse;

/// Score the candidates against their source arcs, dropping every
/// hypothesis that fails either cutoff.
pub fn validate_candidates(
    candidates: Vec<EllipseCandidate>,
    arena: &[QuarterArc],
    params: &EllipseParams,
) -> Vec<Ellipse> {
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let arcs = [
            &arena[candidate.arc1],
            &arena[candidate.arc2],
            &arena[candidate.arc3],
        ];

        let total_points: usize = arcs.iter().map(|arc| arc.points.len()).sum();
        let on_contour: usize = arcs
            .iter()
            .map(|arc| points_on_contour(arc, &candidate, params.distance_to_ellipse_contour))
            .sum();
        let score = if on_contour > 0 {
            on_contour as f32 / total_points as f32
        } else {
            0.0
        };
        if score <= params.distance_to_ellipse_contour_score_cutoff {
            continue;
        }

        let span: f32 = arcs
            .iter()
            .map(|arc| rotated_endpoint_span(arc, &candidate))
            .sum();
        let reliability = (span / (3.0 * (candidate.a_axis + candidate.b_axis))).min(1.0);
        if reliability <= params.reliability_cutoff {
            continue;
        }

        out.push(Ellipse {
            center: candidate.center,
            rho: candidate.rho,
            a_axis: candidate.a_axis,
            b_axis: candidate.b_axis,
            score: (score + reliability) * 0.5,
        });
    }
    out
}

/// Count arc points within the contour band of the candidate ellipse.
fn points_on_contour(arc: &QuarterArc, candidate: &EllipseCandidate, band: f32) -> usize {
    let cos = candidate.rho.cos();
    let sin = candidate.rho.sin();
    let inv_a_sq = 1.0 / (candidate.a_axis * candidate.a_axis);
    let inv_b_sq = 1.0 / (candidate.b_axis * candidate.b_axis);

    let mut count = 0usize;
    for point in &arc.points {
        let dx = point[0] as f32 - candidate.center.x;
        let dy = point[1] as f32 - candidate.center.y;
        // ry uses the opposite y sign from rotated_endpoint_span; the
        // cutoffs are calibrated against exactly these formulas
        let rx = dx * cos - dy * sin;
        let ry = dx * sin - dy * cos;
        let h = rx * rx * inv_a_sq + ry * ry * inv_b_sq;
        if (h - 1.0).abs() < band {
            count += 1;
        }
    }
    count
}

/// Extent between the arc's rotated endpoints, the angular-coverage proxy.
fn rotated_endpoint_span(arc: &QuarterArc, candidate: &EllipseCandidate) -> f32 {
    let first = arc.points[0];
    let last = arc.points[arc.points.len() - 1];
    let start_x = first[0] as f32 - candidate.center.x;
    let start_y = first[1] as f32 - candidate.center.y;
    let end_x = last[0] as f32 - candidate.center.x;
    let end_y = last[1] as f32 - candidate.center.y;

    let cos = candidate.rho.cos();
    let sin = candidate.rho.sin();
    let r1x = start_x * cos - start_y * sin;
    let r1y = start_x * sin + start_y * cos;
    let r2x = end_x * cos - end_y * sin;
    let r2y = end_x * sin + end_y * cos;

    (r2x - r1x).abs() + (r2y - r1y).abs()
}
