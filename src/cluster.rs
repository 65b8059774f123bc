//! Hypothesis clustering: keep the best-scoring representative of each
//! detected ellipse.
//!
//! Hypotheses are visited in descending score order; a hypothesis joins the
//! retained list only if it differs from every retained ellipse in at least
//! one of center, either axis, or (for elongated pairs) rotation. The
//! thresholds are relative to the ellipse size, so large and small ellipses
//! cluster at comparable looseness.

use crate::types::Ellipse;
use std::f32::consts::PI;

/// Relative center distance under which two hypotheses can be the same
/// ellipse (fraction of the smaller minor axis).
const CENTER_TOLERANCE_FRACTION: f32 = 0.1;
/// Normalized angular distance above which elongated pairs are distinct.
const ANGLE_TOLERANCE_FRACTION: f32 = 0.1;
/// Axis ratio below which an ellipse is elongated enough for the rotation
/// predicate to apply.
const ELONGATION_RATIO: f32 = 0.9;

/// Deduplicate scored hypotheses, keeping the highest-scoring member of
/// each cluster. Rotation is normalized to [0, π) on the way through.
pub fn cluster_ellipses(mut hypotheses: Vec<Ellipse>) -> Vec<Ellipse> {
    hypotheses.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut retained: Vec<Ellipse> = Vec::with_capacity(hypotheses.len());
    for mut hypothesis in hypotheses {
        hypothesis.rho = normalize_rho(hypothesis.rho);
        if !retained.iter().any(|kept| same_ellipse(&hypothesis, kept)) {
            retained.push(hypothesis);
        }
    }
    retained
}

/// Wrap a rotation into [0, π).
pub(crate) fn normalize_rho(mut rho: f32) -> f32 {
    while rho < 0.0 {
        rho += PI;
    }
    while rho > PI {
        rho -= PI;
    }
    rho
}

fn same_ellipse(a: &Ellipse, b: &Ellipse) -> bool {
    let center_tolerance = a.b_axis.min(b.b_axis) * CENTER_TOLERANCE_FRACTION;
    let delta = a.center - b.center;
    if delta.norm_squared() > center_tolerance * center_tolerance {
        return false;
    }

    if (a.a_axis - b.a_axis).abs() / a.a_axis.max(b.a_axis) > 1.0 {
        return false;
    }

    if (a.b_axis - b.b_axis).abs() / a.b_axis.max(b.b_axis) > 1.0 {
        return false;
    }

    let angle = (a.rho - b.rho).abs();
    let angular_distance = (PI - angle).min(angle) / PI;
    if angular_distance > ANGLE_TOLERANCE_FRACTION
        && a.b_axis / a.a_axis < ELONGATION_RATIO
        && b.b_axis / b.a_axis < ELONGATION_RATIO
    {
        return false;
    }

    true
}
