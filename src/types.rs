use nalgebra::Point2;
use serde::Serialize;

/// A detected ellipse.
///
/// `rho` is the rotation of the major axis in radians, normalized to
/// [0, π); `score` blends the on-contour fraction with the angular-coverage
/// reliability and lies in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    /// Center in pixel coordinates (x right, y down)
    pub center: Point2<f32>,
    /// Major-axis rotation in radians, [0, π)
    pub rho: f32,
    /// Major semi-axis in pixels
    pub a_axis: f32,
    /// Minor semi-axis in pixels (`b_axis <= a_axis`)
    pub b_axis: f32,
    /// Combined validation score in [0, 1]
    pub score: f32,
}
