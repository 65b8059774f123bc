//! Ellipse parameter estimation from a validated arc triplet.
//!
//! The center pools six pairwise line intersections (plus, optionally, the
//! mean of the two interim pair centers) and takes a coordinate-wise median
//! for outlier robustness. Rotation ρ and axis ratio n come from the slope
//! invariants of the two chord-family pairs, voted into 1°/1% accumulators;
//! the major semi-axis is voted per arc point at 1 px resolution. Peaks are
//! the mean of the maximum-count bins, ties averaged.

use crate::arcs::QuarterArc;
use crate::chords::{intersect_center_lines, ParallelChords};
use crate::detector::EllipseParams;
use crate::math::{mean, median, Accumulator};
use crate::triplets::TripletCandidate;
use nalgebra::Point2;
use std::f32::consts::{FRAC_PI_2, PI};

/// A parametrized hypothesis awaiting validation.
#[derive(Clone, Debug)]
pub struct EllipseCandidate {
    pub arc1: usize,
    pub arc2: usize,
    pub arc3: usize,
    pub center: Point2<f32>,
    pub rho: f32,
    pub a_axis: f32,
    pub b_axis: f32,
}

/// Estimate (center, ρ, a, b) for one triplet. Returns `None` when every
/// slope pair was degenerate or no semi-axis vote landed.
pub fn estimate_parameters(
    triplet: &TripletCandidate,
    arena: &[QuarterArc],
    max_semi_axis: usize,
    params: &EllipseParams,
) -> Option<EllipseCandidate> {
    let p21 = &triplet.pair21;
    let p32 = &triplet.pair32;

    let mut xs = [0.0f32; 7];
    let mut ys = [0.0f32; 7];
    let candidates = [
        p32.center,
        p21.center,
        intersect_center_lines(&p21.head, &p32.head),
        intersect_center_lines(&p21.tail, &p32.head),
        intersect_center_lines(&p21.head, &p32.tail),
        intersect_center_lines(&p21.tail, &p32.tail),
    ];
    for (i, c) in candidates.iter().enumerate() {
        xs[i] = c.x;
        ys[i] = c.y;
    }

    let center = if params.use_median_center {
        xs[6] = (xs[0] + xs[1]) * 0.5;
        ys[6] = (ys[0] + ys[1]) * 0.5;
        Point2::new(median(&mut xs), median(&mut ys))
    } else {
        Point2::new(mean(&xs[..6]), mean(&ys[..6]))
    };

    let mut rho_accumulator = Accumulator::new(180);
    let mut n_accumulator = Accumulator::new(101);
    vote_rho_and_ratio(&p21.head, &p32.head, &mut rho_accumulator, &mut n_accumulator);
    vote_rho_and_ratio(&p21.head, &p32.tail, &mut rho_accumulator, &mut n_accumulator);
    vote_rho_and_ratio(&p21.tail, &p32.head, &mut rho_accumulator, &mut n_accumulator);
    vote_rho_and_ratio(&p21.tail, &p32.tail, &mut rho_accumulator, &mut n_accumulator);

    let n = n_accumulator.peak_mean()? / 100.0;
    let rho = rho_accumulator.peak_mean()? * PI / 180.0;

    let mut a_accumulator = Accumulator::new(max_semi_axis);
    for arc in [triplet.arc3, triplet.arc2, triplet.arc1] {
        vote_semi_axis(&arena[arc], &center, n, rho, &mut a_accumulator);
    }
    let a_axis = a_accumulator.peak_mean()?;

    Some(EllipseCandidate {
        arc1: triplet.arc1,
        arc2: triplet.arc2,
        arc3: triplet.arc3,
        center,
        rho,
        a_axis,
        b_axis: a_axis * n,
    })
}

/// Vote ρ and n for every perpendicular-slope combination of a chord-family
/// pair. `q1`/`q3` are the reference slopes, `q2`/`q4` run over the
/// midpoint-line slopes.
fn vote_rho_and_ratio(
    chord2: &ParallelChords,
    chord1: &ParallelChords,
    rho_accumulator: &mut Accumulator,
    n_accumulator: &mut Accumulator,
) {
    let q1 = chord2.reference_slope;
    let q3 = chord1.reference_slope;
    for &q2 in &chord2.perpendicular_slopes {
        let q1q2 = q1 * q2;
        for &q4 in &chord1.perpendicular_slopes {
            let q3q4 = q3 * q4;

            let gamma = q1q2 - q3q4;
            if gamma == 0.0 {
                continue;
            }
            let beta = (q3q4 + 1.0) * (q1 + q2) - (q1q2 + 1.0) * (q3 + q4);
            let k = (-beta + (beta * beta + 4.0 * gamma * gamma).sqrt()) / (2.0 * gamma);

            let z = ((q1 - k) * (q2 - k)) / ((1.0 + q1 * k) * (1.0 + q2 * k));
            if z < 0.0 {
                let n_plus = (-z).sqrt();
                let rho = k.atan() + if n_plus <= 1.0 { 0.0 } else { FRAC_PI_2 };
                let n = if n_plus <= 1.0 { n_plus } else { 1.0 / n_plus };

                rho_accumulator.vote(((rho * 180.0 / PI + 180.0).round() as i32) % 180);
                n_accumulator.vote((n * 100.0).round() as i32);
            }
        }
    }
}

/// Vote the major semi-axis implied by each arc point given (center, n, ρ).
fn vote_semi_axis(
    arc: &QuarterArc,
    center: &Point2<f32>,
    n: f32,
    rho: f32,
    accumulator: &mut Accumulator,
) {
    let k = rho.tan();
    let cos_rho = rho.cos();
    let n_squared = n * n;
    let denom_recip = 1.0 / (k * k + 1.0).sqrt();
    for point in &arc.points {
        let dx = point[0] as f32 - center.x;
        let dy = point[1] as f32 - center.y;
        let x0 = (dx + dy * k) * denom_recip;
        let y0 = (-dx * k + dy) * denom_recip;
        let a_rotated = ((x0 * x0 * n_squared + y0 * y0) / n_squared).sqrt() * denom_recip;
        let a = (a_rotated / cos_rho).abs();
        accumulator.vote(a.round() as i32);
    }
}
