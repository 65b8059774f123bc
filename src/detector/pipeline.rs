//! Detector pipeline driving ellipse detection end-to-end.
//!
//! The [`EllipseDetector`] exposes a small API: point it at an [`EdgeMap`]
//! and get the deduplicated ellipse list, or the full [`DetectionReport`]
//! with stage statistics and timings. Internally it chains arc
//! segmentation, convexity classification, triplet search, parameter
//! voting, validation and clustering.
//!
//! Typical usage:
//! ```no_run
//! use ellipse_detector::{EllipseDetector, EllipseParams};
//! use ellipse_detector::edges::EdgeMap;
//!
//! # fn example(map: &EdgeMap) {
//! let mut detector = EllipseDetector::new(EllipseParams::default());
//! detector.set_edge_map(map);
//! match detector.detect() {
//!     Ok(ellipses) => println!("found {}", ellipses.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```
use super::options::EllipseParams;
use crate::arcs::{classify_arcs, segment_arcs};
use crate::cluster::cluster_ellipses;
use crate::diagnostics::{
    ArcStats, CandidateStats, DetectionReport, QuadrantCounts, TimingBreakdown,
};
use crate::edges::EdgeMap;
use crate::estimator::estimate_parameters;
use crate::triplets::find_triplets;
use crate::types::Ellipse;
use crate::validate::validate_candidates;
use log::debug;
use std::time::Instant;

/// Configuration failures surfaced by [`EllipseDetector::detect`].
///
/// Numerical degeneracies inside the pipeline are never surfaced; they
/// prune the affected hypothesis and reduce recall only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// `detect()` was invoked before `set_edge_map()`.
    MissingEdgeMap,
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::MissingEdgeMap => {
                write!(f, "no edge map set; call set_edge_map() before detect()")
            }
        }
    }
}

impl std::error::Error for DetectError {}

/// Single-shot ellipse detector over a borrowed edge map.
///
/// The detector owns every transient buffer of one run and frees them when
/// `detect()` returns; only the segmentation counters stick around for
/// inspection. Construct a fresh detector per image.
pub struct EllipseDetector<'a> {
    params: EllipseParams,
    edge_map: Option<&'a EdgeMap>,
    arc_stats: ArcStats,
}

impl<'a> EllipseDetector<'a> {
    /// Create a detector with the supplied parameters.
    pub fn new(params: EllipseParams) -> Self {
        Self {
            params,
            edge_map: None,
            arc_stats: ArcStats::default(),
        }
    }

    /// Borrow the edge map for subsequent `detect()` calls.
    pub fn set_edge_map(&mut self, map: &'a EdgeMap) {
        self.edge_map = Some(map);
    }

    pub fn params(&self) -> &EllipseParams {
        &self.params
    }

    /// Connected components found by the last run, before filtering.
    pub fn total_segment_count(&self) -> usize {
        self.arc_stats.total_segments
    }

    /// Components the last run rejected as too short.
    pub fn short_line_count(&self) -> usize {
        self.arc_stats.short_rejected
    }

    /// Components the last run rejected as straight.
    pub fn straight_line_count(&self) -> usize {
        self.arc_stats.straight_rejected
    }

    /// Run the detector, returning the deduplicated ellipse list.
    pub fn detect(&mut self) -> Result<Vec<Ellipse>, DetectError> {
        Ok(self.detect_with_diagnostics()?.ellipses)
    }

    /// Run the detector and return the detailed report.
    pub fn detect_with_diagnostics(&mut self) -> Result<DetectionReport, DetectError> {
        let map = self.edge_map.ok_or(DetectError::MissingEdgeMap)?;
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        debug!(
            "EllipseDetector::detect start w={} h={}",
            map.width, map.height
        );

        let stage_start = Instant::now();
        let segmentation = segment_arcs(map, &self.params);
        self.arc_stats = segmentation.stats;
        timing.push("arcSegmentation", elapsed_ms(stage_start));
        debug!(
            "arc segmentation: total={} short={} straight={} kept={}",
            segmentation.stats.total_segments,
            segmentation.stats.short_rejected,
            segmentation.stats.straight_rejected,
            segmentation.positive.len() + segmentation.negative.len()
        );

        let stage_start = Instant::now();
        let arcs = classify_arcs(segmentation);
        let quadrants = QuadrantCounts::from_counts(arcs.quadrant_counts());
        timing.push("convexityClassification", elapsed_ms(stage_start));
        debug!(
            "convexity classification: q1={} q2={} q3={} q4={}",
            quadrants.q1, quadrants.q2, quadrants.q3, quadrants.q4
        );

        let stage_start = Instant::now();
        let triplets = find_triplets(&arcs, map.diagonal(), &self.params);
        timing.push("tripletSearch", elapsed_ms(stage_start));
        debug!("triplet search: {} center-consistent triplets", triplets.len());

        let stage_start = Instant::now();
        let max_semi_axis = map.diagonal().ceil() as usize + 1;
        let candidates: Vec<_> = triplets
            .iter()
            .filter_map(|triplet| {
                estimate_parameters(triplet, &arcs.arena, max_semi_axis, &self.params)
            })
            .collect();
        timing.push("parameterEstimation", elapsed_ms(stage_start));
        debug!("parameter estimation: {} hypotheses", candidates.len());

        let mut stats = CandidateStats {
            triplets: triplets.len(),
            estimated: candidates.len(),
            validated: 0,
            clustered: 0,
        };

        let stage_start = Instant::now();
        let validated = validate_candidates(candidates, &arcs.arena, &self.params);
        stats.validated = validated.len();
        timing.push("validation", elapsed_ms(stage_start));
        debug!("validation: {} hypotheses passed", stats.validated);

        let stage_start = Instant::now();
        let ellipses = cluster_ellipses(validated);
        stats.clustered = ellipses.len();
        timing.push("clustering", elapsed_ms(stage_start));

        timing.total_ms = elapsed_ms(total_start);
        debug!(
            "EllipseDetector::detect done ellipses={} total_ms={:.3}",
            stats.clustered, timing.total_ms
        );

        Ok(DetectionReport {
            ellipses,
            arcs: self.arc_stats,
            quadrants,
            candidates: stats,
            timing,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{EdgeMap, EDGE_SENTINEL};

    #[test]
    fn detect_without_edge_map_is_a_config_error() {
        let mut detector = EllipseDetector::new(EllipseParams::default());
        assert_eq!(detector.detect(), Err(DetectError::MissingEdgeMap));
    }

    #[test]
    fn empty_edge_map_yields_empty_result() {
        let map = EdgeMap::empty(64, 64);
        let mut detector = EllipseDetector::new(EllipseParams::default());
        detector.set_edge_map(&map);
        let report = detector.detect_with_diagnostics().expect("map is set");
        assert!(report.ellipses.is_empty());
        assert_eq!(report.arcs.total_segments, 0);
    }

    #[test]
    fn zero_gradient_edges_yield_empty_result_without_panicking() {
        let mut map = EdgeMap::empty(64, 64);
        for x in 10..50 {
            for y in [20usize, 30, 40] {
                let i = map.idx(x, y);
                map.edge[i] = EDGE_SENTINEL;
            }
        }
        let mut detector = EllipseDetector::new(EllipseParams::default());
        detector.set_edge_map(&map);
        let report = detector.detect_with_diagnostics().expect("map is set");
        assert!(report.ellipses.is_empty());
        assert_eq!(report.arcs.total_segments, 0);
    }

    #[test]
    fn counters_are_reported_after_detect() {
        let mut map = EdgeMap::empty(40, 40);
        for i in 1..39 {
            let offset = map.idx(i, i);
            map.edge[offset] = EDGE_SENTINEL;
            map.grad_x[offset] = 1.0;
            map.grad_y[offset] = -1.0;
        }
        let mut detector = EllipseDetector::new(EllipseParams::default());
        detector.set_edge_map(&map);
        let ellipses = detector.detect().expect("map is set");
        assert!(ellipses.is_empty());
        assert_eq!(detector.total_segment_count(), 1);
        assert!(detector.straight_line_count() >= 1);
        assert_eq!(detector.short_line_count(), 0);
    }
}
