//! Arc-triplet search over the four cyclic quadrant orderings.
//!
//! A triplet (arc1, arc2, arc3) covers three consecutive quadrants counter-
//! clockwise. Candidate pairs are pre-filtered by a mutual-position check on
//! their bounding boxes (with a small pixel tolerance), then the two
//! adjacent pairs must imply nearly the same ellipse center: the implied
//! centers may differ by at most `center_distance_percent` of the image
//! diagonal.

use crate::arcs::{ArcId, ClassifiedArcs, QuarterArc};
use crate::chords::{chords_and_center, CenterEstimate};
use crate::detector::EllipseParams;

/// Three quadrant-consecutive arcs with the chord families and centers of
/// their two adjacent pairs. `arc1` is the first quadrant of the cycle,
/// `arc2` the middle, `arc3` the last.
#[derive(Clone, Debug)]
pub struct TripletCandidate {
    pub arc1: ArcId,
    pub arc2: ArcId,
    pub arc3: ArcId,
    /// Chord families and implied center between arc2 and arc1
    pub pair21: CenterEstimate,
    /// Chord families and implied center between arc3 and arc2
    pub pair32: CenterEstimate,
}

/// Scan all four cyclic quadrant orderings for center-consistent triplets.
pub fn find_triplets(
    arcs: &ClassifiedArcs,
    image_diagonal: f32,
    params: &EllipseParams,
) -> Vec<TripletCandidate> {
    let allowed = params.center_distance_percent * image_diagonal;
    let allowed_sq = allowed * allowed;
    let tol = params.mutual_position_bounding_box_pixel_tolerance;
    let chords = params.number_of_parallel_chords;

    let mut out = Vec::new();
    // (Q1, Q2, Q3)
    collect_family(
        arcs,
        (&arcs.q1, &arcs.q2, &arcs.q3),
        |q1, q2| q2.bbox.right < q1.bbox.left + tol,
        |q2, q3| q3.bbox.top > q2.bbox.bottom - tol,
        allowed_sq,
        chords,
        &mut out,
    );
    // (Q2, Q3, Q4)
    collect_family(
        arcs,
        (&arcs.q2, &arcs.q3, &arcs.q4),
        |q2, q3| q3.bbox.top > q2.bbox.bottom - tol,
        |q3, q4| q4.bbox.left > q3.bbox.right - tol,
        allowed_sq,
        chords,
        &mut out,
    );
    // (Q3, Q4, Q1)
    collect_family(
        arcs,
        (&arcs.q3, &arcs.q4, &arcs.q1),
        |q3, q4| q4.bbox.left > q3.bbox.right - tol,
        |q4, q1| q1.bbox.bottom < q4.bbox.top + tol,
        allowed_sq,
        chords,
        &mut out,
    );
    // (Q4, Q1, Q2)
    collect_family(
        arcs,
        (&arcs.q4, &arcs.q1, &arcs.q2),
        |q4, q1| q1.bbox.bottom < q4.bbox.top + tol,
        |q1, q2| q2.bbox.right < q1.bbox.left + tol,
        allowed_sq,
        chords,
        &mut out,
    );
    out
}

fn collect_family(
    arcs: &ClassifiedArcs,
    (first_ids, middle_ids, last_ids): (&[ArcId], &[ArcId], &[ArcId]),
    first_middle_ok: impl Fn(&QuarterArc, &QuarterArc) -> bool,
    middle_last_ok: impl Fn(&QuarterArc, &QuarterArc) -> bool,
    allowed_distance_sq: f32,
    chord_count: usize,
    out: &mut Vec<TripletCandidate>,
) {
    for &first in first_ids {
        let first_arc = &arcs.arena[first];
        for &middle in middle_ids {
            let middle_arc = &arcs.arena[middle];
            if !first_middle_ok(first_arc, middle_arc) {
                continue;
            }
            let Some(pair21) = chords_and_center(middle_arc, first_arc, chord_count) else {
                continue;
            };
            for &last in last_ids {
                let last_arc = &arcs.arena[last];
                if !middle_last_ok(middle_arc, last_arc) {
                    continue;
                }
                let Some(pair32) = chords_and_center(last_arc, middle_arc, chord_count) else {
                    continue;
                };
                let delta = pair21.center - pair32.center;
                if delta.norm_squared() < allowed_distance_sq {
                    out.push(TripletCandidate {
                        arc1: first,
                        arc2: middle,
                        arc3: last,
                        pair21: pair21.clone(),
                        pair32,
                    });
                }
            }
        }
    }
}
