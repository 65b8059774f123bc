//! Parameter types configuring the detector stages.
//!
//! Defaults aim for robust behaviour on general inputs. For tuning, start
//! with `min_arc_pixel_count` and the two score cutoffs; the contour band
//! is the most input-dependent knob.

use serde::{Deserialize, Serialize};

/// Detector-wide parameters controlling the arc-to-ellipse pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EllipseParams {
    /// Minimum pixel count of an arc.
    pub min_arc_pixel_count: usize,
    /// Minimum bounding-box side; also the straightness threshold of the
    /// diagonal-distance test.
    pub min_bounding_box_size: i32,
    /// Test every arc point against the bounding-box diagonal instead of
    /// the 25%/50%/75% samples.
    pub check_all_arc_points_for_straight_line: bool,
    /// Pixel tolerance when comparing bounding-box sides of arc pairs.
    pub mutual_position_bounding_box_pixel_tolerance: i32,
    /// Number of parallel chords drawn between two arcs for the center
    /// estimate.
    pub number_of_parallel_chords: usize,
    /// Maximum distance between the two implied centers of a triplet, as a
    /// fraction of the image diagonal.
    pub center_distance_percent: f32,
    /// Half-width of the algebraic contour band counting a point as on the
    /// ellipse. The originating paper uses 0.1; 0.5 performs much better on
    /// synthetic inputs.
    pub distance_to_ellipse_contour: f32,
    /// Minimum on-contour fraction for a hypothesis to survive.
    pub distance_to_ellipse_contour_score_cutoff: f32,
    /// Minimum angular-coverage reliability for a hypothesis to survive.
    pub reliability_cutoff: f32,
    /// Estimate the center as the median of seven candidates instead of
    /// the mean of six.
    pub use_median_center: bool,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            min_arc_pixel_count: 16,
            min_bounding_box_size: 3,
            check_all_arc_points_for_straight_line: false,
            mutual_position_bounding_box_pixel_tolerance: 1,
            number_of_parallel_chords: 16,
            center_distance_percent: 0.05,
            distance_to_ellipse_contour: 0.5,
            distance_to_ellipse_contour_score_cutoff: 0.4,
            reliability_cutoff: 0.4,
            use_median_center: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let params = EllipseParams::default();
        assert_eq!(params.min_arc_pixel_count, 16);
        assert_eq!(params.min_bounding_box_size, 3);
        assert!(!params.check_all_arc_points_for_straight_line);
        assert_eq!(params.mutual_position_bounding_box_pixel_tolerance, 1);
        assert_eq!(params.number_of_parallel_chords, 16);
        assert!((params.center_distance_percent - 0.05).abs() < 1e-6);
        assert!((params.distance_to_ellipse_contour - 0.5).abs() < 1e-6);
        assert!((params.distance_to_ellipse_contour_score_cutoff - 0.4).abs() < 1e-6);
        assert!((params.reliability_cutoff - 0.4).abs() < 1e-6);
        assert!(params.use_median_center);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let params: EllipseParams =
            serde_json::from_str(r#"{"minArcPixelCount": 24, "useMedianCenter": false}"#)
                .expect("partial params must parse");
        assert_eq!(params.min_arc_pixel_count, 24);
        assert!(!params.use_median_center);
        assert_eq!(params.number_of_parallel_chords, 16);
    }
}
