//! Convex-side classification and quadrant pooling.
//!
//! With points sorted by x, the area between the arc and the top of its
//! bounding box is accumulated one column at a time; comparing it against
//! the area below decides which way the arc bulges. Combined with the
//! gradient pool this yields the ellipse quadrant the arc could belong to.
use super::arc::{CandidateArc, Convexity, GradientSign, Quadrant, QuarterArc};
use super::ArcId;
use super::Segmentation;

/// Arena of classified arcs plus per-quadrant index pools.
pub struct ClassifiedArcs {
    pub arena: Vec<QuarterArc>,
    pub q1: Vec<ArcId>,
    pub q2: Vec<ArcId>,
    pub q3: Vec<ArcId>,
    pub q4: Vec<ArcId>,
}

impl ClassifiedArcs {
    pub fn quadrant_counts(&self) -> [usize; 4] {
        [self.q1.len(), self.q2.len(), self.q3.len(), self.q4.len()]
    }
}

/// Label every candidate arc with a quadrant; arcs with balanced areas (no
/// convex side) are dropped.
pub fn classify_arcs(segmentation: Segmentation) -> ClassifiedArcs {
    let mut out = ClassifiedArcs {
        arena: Vec::with_capacity(segmentation.positive.len() + segmentation.negative.len()),
        q1: Vec::new(),
        q2: Vec::new(),
        q3: Vec::new(),
        q4: Vec::new(),
    };
    for arc in segmentation.positive {
        push_classified(&mut out, arc, GradientSign::Positive);
    }
    for arc in segmentation.negative {
        push_classified(&mut out, arc, GradientSign::Negative);
    }
    out
}

fn push_classified(out: &mut ClassifiedArcs, arc: CandidateArc, gradient: GradientSign) {
    let Some(convexity) = arc_convexity(&arc) else {
        return;
    };
    let quadrant = Quadrant::from_signs(gradient, convexity);
    let id = out.arena.len();
    match quadrant {
        Quadrant::One => out.q1.push(id),
        Quadrant::Two => out.q2.push(id),
        Quadrant::Three => out.q3.push(id),
        Quadrant::Four => out.q4.push(id),
    }
    out.arena.push(QuarterArc {
        points: arc.points,
        bbox: arc.bbox,
        quadrant,
    });
}

/// Convex side from the area split inside the bounding box, or `None` when
/// the split is degenerate.
fn arc_convexity(arc: &CandidateArc) -> Option<Convexity> {
    let mut area_over = 0i64;
    let mut previous_x = i32::MIN;
    for p in &arc.points {
        if p[0] != previous_x {
            area_over += (p[1] - arc.bbox.top).abs() as i64;
        }
        previous_x = p[0];
    }
    let area_bbox = arc.bbox.width() as i64 * arc.bbox.height().abs() as i64;
    let area_under = area_bbox - arc.points.len() as i64 - area_over;

    if area_bbox == 0 {
        None
    } else if area_under > area_over {
        Some(Convexity::Up)
    } else if area_under < area_over {
        Some(Convexity::Down)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcs::BoundingBox;

    fn candidate(points: Vec<[i32; 2]>) -> CandidateArc {
        let bbox = BoundingBox::from_points(&points);
        CandidateArc { points, bbox }
    }

    fn half_circle_points(upper: bool) -> Vec<[i32; 2]> {
        // half circle of radius 20 around (20, 20); `upper` keeps the arch
        // over the box, i.e. small y
        let mut points: Vec<[i32; 2]> = (0..=40)
            .map(|x| {
                let dx = (x - 20) as f32;
                let dy = (400.0 - dx * dx).max(0.0).sqrt();
                let y = if upper { 20.0 - dy } else { 20.0 + dy };
                [x, y.round() as i32]
            })
            .collect();
        points.sort();
        points.dedup();
        points
    }

    #[test]
    fn arch_over_the_box_is_convex_up() {
        let arc = candidate(half_circle_points(true));
        assert_eq!(arc_convexity(&arc), Some(Convexity::Up));
    }

    #[test]
    fn bowl_under_the_box_is_convex_down() {
        let arc = candidate(half_circle_points(false));
        assert_eq!(arc_convexity(&arc), Some(Convexity::Down));
    }

    #[test]
    fn classification_routes_pools_by_sign_pair() {
        let seg = Segmentation {
            positive: vec![candidate(half_circle_points(true))],
            negative: vec![candidate(half_circle_points(false))],
            stats: Default::default(),
        };
        let classified = classify_arcs(seg);
        assert_eq!(classified.quadrant_counts(), [1, 0, 0, 1]);
        assert_eq!(classified.arena[0].quadrant, Quadrant::One);
        assert_eq!(classified.arena[1].quadrant, Quadrant::Four);
    }
}
