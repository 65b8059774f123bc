use crate::math::sign_i32;

/// Index of an arc inside the segmentation arena.
pub type ArcId = usize;

/// Gradient-sign pool of an arc, after the screen-space inversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientSign {
    Positive,
    Negative,
}

/// Convex side of an arc: `Up` bulges toward smaller y (screen up).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convexity {
    Up,
    Down,
}

/// Quarter-ellipse quadrant, counter-clockwise: Q1 is the upper-right
/// quarter in screen coordinates (y down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    One,
    Two,
    Three,
    Four,
}

impl Quadrant {
    /// Quadrant implied by an arc's gradient pool and convex side.
    pub fn from_signs(gradient: GradientSign, convexity: Convexity) -> Self {
        match (gradient, convexity) {
            (GradientSign::Positive, Convexity::Up) => Quadrant::One,
            (GradientSign::Negative, Convexity::Up) => Quadrant::Two,
            (GradientSign::Positive, Convexity::Down) => Quadrant::Three,
            (GradientSign::Negative, Convexity::Down) => Quadrant::Four,
        }
    }

    /// Gradient pool of arcs labeled with this quadrant.
    pub fn gradient(self) -> GradientSign {
        match self {
            Quadrant::One | Quadrant::Three => GradientSign::Positive,
            Quadrant::Two | Quadrant::Four => GradientSign::Negative,
        }
    }

    /// Convex side of arcs labeled with this quadrant.
    pub fn convexity(self) -> Convexity {
        match self {
            Quadrant::One | Quadrant::Two => Convexity::Up,
            Quadrant::Three | Quadrant::Four => Convexity::Down,
        }
    }
}

/// Sign of the gradient product at a pixel, inverted because y grows down
/// on screen. Every stage that reads a gradient sign goes through this
/// helper so the inversion cannot be applied twice.
#[inline]
pub fn oriented_gradient_sign(gx: f32, gy: f32) -> i32 {
    -(sign_i32(gx) * sign_i32(gy))
}

/// Axis-aligned pixel bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl BoundingBox {
    pub fn from_points(points: &[[i32; 2]]) -> Self {
        let mut bbox = Self {
            top: i32::MAX,
            bottom: i32::MIN,
            left: i32::MAX,
            right: i32::MIN,
        };
        for p in points {
            bbox.left = bbox.left.min(p[0]);
            bbox.right = bbox.right.max(p[0]);
            bbox.top = bbox.top.min(p[1]);
            bbox.bottom = bbox.bottom.max(p[1]);
        }
        bbox
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A connected run of edge pixels that survived the length and curvature
/// filters but has not been quadrant-classified yet. Points are sorted by
/// (x asc, y asc), the order the convexity and chord stages require.
#[derive(Clone, Debug)]
pub struct CandidateArc {
    pub points: Vec<[i32; 2]>,
    pub bbox: BoundingBox,
}

/// A quadrant-labeled quarter-ellipse arc. Immutable once classified.
#[derive(Clone, Debug)]
pub struct QuarterArc {
    pub points: Vec<[i32; 2]>,
    pub bbox: BoundingBox,
    pub quadrant: Quadrant,
}

impl QuarterArc {
    /// Build an arc from `(x asc, y asc)`-sorted points.
    pub fn new(points: Vec<[i32; 2]>, quadrant: Quadrant) -> Self {
        let bbox = BoundingBox::from_points(&points);
        Self {
            points,
            bbox,
            quadrant,
        }
    }
}

/// Diagonal-distance curvature test.
///
/// The arc is compared against the bounding-box diagonal whose direction is
/// picked by the oriented gradient sign (positive arcs run along the
/// top-left→bottom-right diagonal). Test points are either the whole arc or
/// the 25%/50%/75% samples; a point further than half the minimum box size
/// from the diagonal makes the arc curved.
pub(super) fn is_curved_line(
    points: &[[i32; 2]],
    bbox: &BoundingBox,
    gradient: i32,
    min_bounding_box_size: i32,
    check_all_points: bool,
) -> bool {
    if bbox.width() < min_bounding_box_size || bbox.height() < min_bounding_box_size {
        return false;
    }

    let x1 = bbox.left;
    let x2 = bbox.right;
    let (y1, y2) = if gradient > 0 {
        (bbox.top, bbox.bottom)
    } else {
        (bbox.bottom, bbox.top)
    };

    let quarter = [
        points[(points.len() as f32 * 0.25) as usize],
        points[(points.len() as f32 * 0.5) as usize],
        points[(points.len() as f32 * 0.75) as usize],
    ];
    let check_points: &[[i32; 2]] = if check_all_points || points.len() <= 3 {
        points
    } else {
        &quarter
    };

    let dy = (y2 - y1) as i64;
    let dx = (x2 - x1) as i64;
    let denominator = ((dy * dy + dx * dx) as f32).sqrt();
    let numerator_part = x2 as i64 * y1 as i64 - y2 as i64 * x1 as i64;
    for p in check_points {
        let dist = (dy * p[0] as i64 - dx * p[1] as i64 + numerator_part).abs() as f32 / denominator;
        // distance is measured from the diagonal, so double it to compare
        // against the box-size threshold
        if dist * 2.0 > min_bounding_box_size as f32 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_roundtrips_signs() {
        for q in [
            Quadrant::One,
            Quadrant::Two,
            Quadrant::Three,
            Quadrant::Four,
        ] {
            assert_eq!(Quadrant::from_signs(q.gradient(), q.convexity()), q);
        }
    }

    #[test]
    fn oriented_sign_inverts_product() {
        assert_eq!(oriented_gradient_sign(1.0, 1.0), -1);
        assert_eq!(oriented_gradient_sign(-2.0, 3.0), 1);
        assert_eq!(oriented_gradient_sign(0.0, 3.0), 0);
    }

    #[test]
    fn diagonal_run_is_straight() {
        // a run along the main diagonal carries oriented sign +1, which
        // selects the matching (top-left to bottom-right) box diagonal
        let points: Vec<[i32; 2]> = (0..20).map(|i| [i, i]).collect();
        let bbox = BoundingBox::from_points(&points);
        assert!(!is_curved_line(&points, &bbox, 1, 3, false));
    }

    #[test]
    fn bowed_run_is_curved() {
        // quarter circle of radius 20 around the origin
        let points: Vec<[i32; 2]> = (0..=20)
            .map(|i| {
                let x = i as f32;
                let y = (400.0 - x * x).sqrt();
                [i, y.round() as i32]
            })
            .collect();
        let bbox = BoundingBox::from_points(&points);
        assert!(is_curved_line(&points, &bbox, -1, 3, false));
    }

    #[test]
    fn tiny_bounding_box_is_straight() {
        let points: Vec<[i32; 2]> = (0..10).map(|i| [i, 1]).collect();
        let bbox = BoundingBox::from_points(&points);
        assert!(!is_curved_line(&points, &bbox, 1, 3, true));
    }
}
