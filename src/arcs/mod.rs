//! Arc segmentation: from edge pixels to quadrant-labeled quarter arcs.
//!
//! The segmenter performs:
//!
//! - Connected-component labeling over edge pixels grouped by the oriented
//!   gradient-sign product (`labeling`), visiting each pixel once in a
//!   row-major scan with an equivalence map for label collisions.
//! - Length and curvature filtering: components shorter than
//!   `min_arc_pixel_count` or flatter than the diagonal-distance test are
//!   rejected, with per-cause counters for tuning.
//! - Point ordering: surviving arcs are sorted by (x asc, y asc); both the
//!   convexity classifier and the chord sampler index into that order.
//! - Quadrant classification (`convexity`): the convex side combined with
//!   the gradient pool assigns each arc one of the four ellipse quadrants.
//!
//! Arcs live in an arena (`ClassifiedArcs::arena`) and are referenced by
//! index from triplets and hypotheses, so no reference counting is needed;
//! the arena outlives all derived data within one detection run.

mod arc;
mod convexity;
mod labeling;

pub use arc::{
    oriented_gradient_sign, ArcId, BoundingBox, CandidateArc, Convexity, GradientSign, Quadrant,
    QuarterArc,
};
pub use convexity::{classify_arcs, ClassifiedArcs};

use crate::detector::EllipseParams;
use crate::diagnostics::ArcStats;
use crate::edges::EdgeMap;

/// Candidate arcs split by gradient pool, with rejection counters.
pub struct Segmentation {
    pub positive: Vec<CandidateArc>,
    pub negative: Vec<CandidateArc>,
    pub stats: ArcStats,
}

/// Group edge pixels into candidate arcs and filter short and straight runs.
pub fn segment_arcs(map: &EdgeMap, params: &EllipseParams) -> Segmentation {
    let regions = labeling::connected_regions(map);
    let mut segmentation = Segmentation {
        positive: Vec::with_capacity(regions.groups.len()),
        negative: Vec::with_capacity(regions.groups.len()),
        stats: ArcStats {
            total_segments: regions.total,
            short_rejected: 0,
            straight_rejected: 0,
        },
    };

    for mut points in regions.groups {
        if points.len() < params.min_arc_pixel_count {
            segmentation.stats.short_rejected += 1;
            continue;
        }
        let bbox = BoundingBox::from_points(&points);
        // sign product is constant across the component by construction
        let first = points[0];
        let offset = map.idx(first[0] as usize, first[1] as usize);
        let gradient = oriented_gradient_sign(map.grad_x[offset], map.grad_y[offset]);
        if !arc::is_curved_line(
            &points,
            &bbox,
            gradient,
            params.min_bounding_box_size,
            params.check_all_arc_points_for_straight_line,
        ) {
            segmentation.stats.straight_rejected += 1;
            continue;
        }
        points.sort_unstable();
        let arc = CandidateArc { points, bbox };
        if gradient > 0 {
            segmentation.positive.push(arc);
        } else {
            segmentation.negative.push(arc);
        }
    }

    segmentation
}

#[cfg(test)]
mod tests;
