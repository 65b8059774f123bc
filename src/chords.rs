//! Parallel-chord families between two adjacent arcs and the ellipse center
//! they imply.
//!
//! For a pair of arcs hypothesized to lie on the same ellipse, a reference
//! chord is drawn from an endpoint of one arc to the midpoint of the other.
//! Chords parallel to the reference are then found by binary search along
//! the second arc, using the sign of the cross-product against the
//! reference direction; when the search brackets two adjacent points the
//! exact intersection with the connecting segment is interpolated instead
//! of snapping to the nearer pixel.
//!
//! The midpoints of parallel chords lie on a line through the ellipse
//! center. Pairing the i-th midpoint with the (i+N/2)-th yields N/2 slope
//! samples whose median, anchored at the median midpoint, is a Theil-Sen
//! estimate of that line; intersecting the two estimates of a pair gives
//! the implied center.

use crate::arcs::{Quadrant, QuarterArc};
use crate::math::{median, sign_i32};
use nalgebra::Point2;

/// A family needs at least two chords to carry a line estimate.
const MIN_CHORDS: usize = 2;

/// Vertical reference chords would zero the cross-product terms; the
/// reference y-delta is clamped away from zero after the slope is taken.
const DY_REFERENCE_EPSILON: f32 = 1e-5;

/// A family of mutually parallel chords between two arcs, with the
/// Theil-Sen line estimate through their midpoints.
#[derive(Clone, Debug)]
pub struct ParallelChords {
    /// Slope of the reference chord (arc endpoint to companion midpoint)
    pub reference_slope: f32,
    /// Midpoint of each accepted chord
    pub midpoints: Vec<Point2<f32>>,
    /// Slope of each accepted chord
    pub slopes: Vec<f32>,
    /// Slopes of the midpoint-pair lines feeding the median
    pub perpendicular_slopes: Vec<f32>,
    /// Median of `perpendicular_slopes`
    pub median_slope: f32,
    /// Coordinate-wise median of the midpoints
    pub median_centroid: Point2<f32>,
}

impl ParallelChords {
    fn from_samples(reference_slope: f32, midpoints: Vec<Point2<f32>>, slopes: Vec<f32>) -> Self {
        let size = midpoints.len();
        let middle = size / 2;
        let mut perpendicular_slopes = Vec::with_capacity(middle);
        let mut xs = vec![0.0f32; size];
        let mut ys = vec![0.0f32; size];
        for i in 0..middle {
            let p1 = midpoints[i];
            let p2 = midpoints[i + middle];
            perpendicular_slopes.push((p2.y - p1.y) / (p2.x - p1.x));
            xs[i] = p1.x;
            xs[i + middle] = p2.x;
            ys[i] = p1.y;
            ys[i + middle] = p2.y;
        }
        if size % 2 == 1 {
            let last = midpoints[size - 1];
            xs[size - 1] = last.x;
            ys[size - 1] = last.y;
        }
        let median_centroid = Point2::new(median(&mut xs), median(&mut ys));
        let mut scratch = perpendicular_slopes.clone();
        let median_slope = median(&mut scratch);
        Self {
            reference_slope,
            midpoints,
            slopes,
            perpendicular_slopes,
            median_slope,
            median_centroid,
        }
    }
}

/// The two chord families between an adjacent arc pair and the center their
/// Theil-Sen lines intersect at.
#[derive(Clone, Debug)]
pub struct CenterEstimate {
    /// Chords from the start of the outer arc to the inner arc's midpoint
    pub head: ParallelChords,
    /// Chords from the inner arc's end back across the outer arc
    pub tail: ParallelChords,
    /// Intersection of the two midpoint lines
    pub center: Point2<f32>,
}

/// Build both chord families for the pair (`arc2` is the clockwise-next arc
/// after `arc1` in quadrant order) and intersect their midpoint lines.
/// Returns `None` when either family has fewer than two chords.
pub fn chords_and_center(
    arc2: &QuarterArc,
    arc1: &QuarterArc,
    chord_count: usize,
) -> Option<CenterEstimate> {
    let head = parallel_chords(arc2, arc1, true, chord_count)?;
    let tail = parallel_chords(arc1, arc2, false, chord_count)?;
    let center = intersect_center_lines(&head, &tail);
    Some(CenterEstimate { head, tail, center })
}

/// Intersect the Theil-Sen midpoint lines of two chord families.
pub(crate) fn intersect_center_lines(
    chord2: &ParallelChords,
    chord1: &ParallelChords,
) -> Point2<f32> {
    let m1 = chord1.median_slope;
    let m2 = chord2.median_slope;
    let c1 = chord1.median_centroid;
    let c2 = chord2.median_centroid;
    let cx = (c1.y - m1 * c1.x - c2.y + m2 * c2.x) / (m2 - m1);
    let cy = (m2 * c1.y - m1 * c2.y + m2 * m1 * (c2.x - c1.x)) / (m2 - m1);
    Point2::new(cx, cy)
}

#[inline]
fn point_chord(p2x: f32, p2y: f32, x1: i32, y1: i32) -> (Point2<f32>, f32) {
    let midpoint = Point2::new((p2x + x1 as f32) / 2.0, (p2y + y1 as f32) / 2.0);
    let slope = (p2y - y1 as f32) / (p2x - x1 as f32);
    (midpoint, slope)
}

/// One chord family: reference from an endpoint of `arc2` to the midpoint
/// of `arc1`, chords from sampled `arc1` points to parallel-matched points
/// on `arc2`.
///
/// The point lists are sorted by ascending x while the construction assumes
/// clockwise traversal, so endpoint and walk direction flip for the
/// lower-half quadrants.
pub(crate) fn parallel_chords(
    arc2: &QuarterArc,
    arc1: &QuarterArc,
    start_of_arc2: bool,
    chord_count: usize,
) -> Option<ParallelChords> {
    let middle1 = arc1.points[arc1.points.len() / 2];

    let last2 = arc2.points.len() - 1;
    let reference_index = match arc2.quadrant {
        Quadrant::One | Quadrant::Two => {
            if start_of_arc2 {
                0
            } else {
                last2
            }
        }
        Quadrant::Three | Quadrant::Four => {
            if start_of_arc2 {
                last2
            } else {
                0
            }
        }
    };
    let reference = arc2.points[reference_index];
    let dx_ref = (reference[0] - middle1[0]) as f32;
    let mut dy_ref = (reference[1] - middle1[1]) as f32;
    let reference_slope = dy_ref / dx_ref;
    if dy_ref == 0.0 {
        dy_ref = DY_REFERENCE_EPSILON;
    }

    let half1 = arc1.points.len() / 2;
    let sample_count = chord_count.min(half1);
    let mut indices: Vec<usize> = Vec::with_capacity(sample_count);
    if chord_count < half1 {
        let step_direction = match arc1.quadrant {
            Quadrant::One | Quadrant::Two => {
                if start_of_arc2 {
                    -1.0
                } else {
                    1.0
                }
            }
            Quadrant::Three | Quadrant::Four => {
                if start_of_arc2 {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        let step = half1 as f32 / chord_count as f32 * step_direction;
        let mut current = half1 as f32 + step / 2.0;
        for _ in 0..chord_count {
            indices.push(current as usize);
            current += step;
        }
    } else {
        let lower_half_arc1 = matches!(arc1.quadrant, Quadrant::Three | Quadrant::Four);
        let first_half = start_of_arc2 != lower_half_arc1;
        if first_half {
            indices.extend(0..half1);
        } else {
            indices.extend(half1..half1 + sample_count);
        }
    }

    let mut midpoints = Vec::with_capacity(sample_count);
    let mut slopes = Vec::with_capacity(sample_count);
    for &index in &indices {
        let p1 = arc1.points[index];
        let (x1, y1) = (p1[0], p1[1]);
        let cross =
            |p2: [i32; 2]| (p2[0] - x1) as f32 * dy_ref - (p2[1] - y1) as f32 * dx_ref;

        let mut lo = 0usize;
        let mut hi = last2;
        let mut sign_lo = sign_i32(cross(arc2.points[lo]));
        if sign_lo == 0 {
            let p2 = arc2.points[lo];
            let (midpoint, slope) = point_chord(p2[0] as f32, p2[1] as f32, x1, y1);
            midpoints.push(midpoint);
            slopes.push(slope);
            continue;
        }
        let mut sign_hi = sign_i32(cross(arc2.points[hi]));
        if sign_hi == 0 {
            let p2 = arc2.points[hi];
            let (midpoint, slope) = point_chord(p2[0] as f32, p2[1] as f32, x1, y1);
            midpoints.push(midpoint);
            slopes.push(slope);
            continue;
        }
        // without a sign bracket no parallel point exists on arc2
        if sign_lo + sign_hi != 0 {
            continue;
        }

        let mut mid = (lo + hi) / 2;
        while hi - lo > 2 {
            let sign_mid = sign_i32(cross(arc2.points[mid]));
            if sign_mid == 0 {
                break;
            }
            if sign_mid + sign_lo == 0 {
                sign_hi = sign_mid;
                hi = mid;
            } else {
                sign_lo = sign_mid;
                lo = mid;
            }
            mid = (lo + hi) / 2;
        }

        let p_mid = arc2.points[mid];
        let sign_mid = sign_i32(cross(p_mid));
        if sign_mid == 0 {
            let (midpoint, slope) = point_chord(p_mid[0] as f32, p_mid[1] as f32, x1, y1);
            midpoints.push(midpoint);
            slopes.push(slope);
            continue;
        }

        // the parallel point lies between p_mid and the bracketing endpoint;
        // intersect the reference-direction line with that segment
        let other = if sign_mid + sign_hi == 0 {
            arc2.points[hi]
        } else {
            arc2.points[lo]
        };
        let (ix, iy) = if other[0] == p_mid[0] {
            let ix = other[0] as f32;
            let iy = reference_slope * (other[0] - x1) as f32 + y1 as f32;
            let y_min = other[1].min(p_mid[1]) as f32;
            let y_max = other[1].max(p_mid[1]) as f32;
            if iy < y_min || iy > y_max {
                continue;
            }
            (ix, iy)
        } else {
            let segment_slope =
                (other[1] - p_mid[1]) as f32 / (other[0] - p_mid[0]) as f32;
            let segment_intercept = p_mid[1] as f32 - p_mid[0] as f32 * segment_slope;
            let reference_intercept = y1 as f32 - x1 as f32 * reference_slope;
            let ix = (reference_intercept - segment_intercept) / (segment_slope - reference_slope);
            (ix, segment_slope * ix + segment_intercept)
        };
        let (midpoint, slope) = point_chord(ix, iy, x1, y1);
        midpoints.push(midpoint);
        slopes.push(slope);
    }

    if midpoints.len() < MIN_CHORDS {
        return None;
    }
    Some(ParallelChords::from_samples(reference_slope, midpoints, slopes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcs::{Quadrant, QuarterArc};

    /// Quarter arc of a circle in screen coordinates (y grows down).
    /// `deg_from`/`deg_to` are screen angles: 270° is the top of the circle.
    fn circle_arc(
        cx: f32,
        cy: f32,
        r: f32,
        deg_from: i32,
        deg_to: i32,
        quadrant: Quadrant,
    ) -> QuarterArc {
        let mut points: Vec<[i32; 2]> = (deg_from * 4..=deg_to * 4)
            .map(|q| {
                let rad = (q as f32 / 4.0).to_radians();
                [
                    (cx + r * rad.cos()).round() as i32,
                    (cy + r * rad.sin()).round() as i32,
                ]
            })
            .collect();
        points.sort_unstable();
        points.dedup();
        QuarterArc::new(points, quadrant)
    }

    #[test]
    fn adjacent_circle_arcs_imply_the_circle_center() {
        // upper-right (Q1) and upper-left (Q2) quarters of a circle
        let q1 = circle_arc(60.0, 60.0, 40.0, 271, 359, Quadrant::One);
        let q2 = circle_arc(60.0, 60.0, 40.0, 181, 269, Quadrant::Two);

        let estimate = chords_and_center(&q2, &q1, 16).expect("chord families must exist");
        let center = estimate.center;
        assert!(
            (center.x - 60.0).abs() < 3.0 && (center.y - 60.0).abs() < 3.0,
            "implied center too far from the truth: ({}, {})",
            center.x,
            center.y
        );
    }

    #[test]
    fn lower_pair_also_recovers_the_center() {
        let q3 = circle_arc(60.0, 60.0, 40.0, 91, 179, Quadrant::Three);
        let q4 = circle_arc(60.0, 60.0, 40.0, 1, 89, Quadrant::Four);

        let estimate = chords_and_center(&q4, &q3, 16).expect("chord families must exist");
        let center = estimate.center;
        assert!(
            (center.x - 60.0).abs() < 3.0 && (center.y - 60.0).abs() < 3.0,
            "implied center too far from the truth: ({}, {})",
            center.x,
            center.y
        );
    }

    #[test]
    fn chord_family_is_parallel_to_its_reference() {
        let q1 = circle_arc(60.0, 60.0, 40.0, 271, 359, Quadrant::One);
        let q2 = circle_arc(60.0, 60.0, 40.0, 181, 269, Quadrant::Two);

        let family = parallel_chords(&q2, &q1, true, 16).expect("family must exist");
        assert!(family.midpoints.len() >= 2);
        for &slope in &family.slopes {
            assert!(
                (slope - family.reference_slope).abs()
                    < 0.2 * (1.0 + family.reference_slope.abs()),
                "chord slope {slope} deviates from reference {}",
                family.reference_slope
            );
        }
    }

    #[test]
    fn too_short_arcs_produce_no_family() {
        let q1 = QuarterArc::new(vec![[10, 10], [11, 9], [12, 9]], Quadrant::One);
        let q2 = QuarterArc::new(vec![[2, 10], [3, 9]], Quadrant::Two);
        assert!(chords_and_center(&q2, &q1, 16).is_none());
    }

    #[test]
    fn intersection_of_known_lines() {
        // lines y = x (centroid (2, 2)) and y = -x + 8 (centroid (6, 2))
        // meet at (4, 4)
        let make = |slope: f32, centroid: Point2<f32>| ParallelChords {
            reference_slope: 0.0,
            midpoints: Vec::new(),
            slopes: Vec::new(),
            perpendicular_slopes: Vec::new(),
            median_slope: slope,
            median_centroid: centroid,
        };
        let a = make(1.0, Point2::new(2.0, 2.0));
        let b = make(-1.0, Point2::new(6.0, 2.0));
        let center = intersect_center_lines(&a, &b);
        assert!((center.x - 4.0).abs() < 1e-5, "cx={}", center.x);
        assert!((center.y - 4.0).abs() < 1e-5, "cy={}", center.y);
    }
}
