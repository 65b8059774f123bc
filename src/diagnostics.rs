//! Structured diagnostics returned alongside the detection result.
//!
//! [`DetectionReport`] is the detailed entry point: the final ellipse list
//! plus per-stage statistics and a timing breakdown. Everything serializes
//! to camelCase JSON for tooling.

use crate::types::Ellipse;
use serde::Serialize;

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one detection run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Segmentation counters, reported even when the result list is empty.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcStats {
    /// Connected components found before filtering
    pub total_segments: usize,
    /// Components below the minimum pixel count
    pub short_rejected: usize,
    /// Components failing the curvature test
    pub straight_rejected: usize,
}

/// Arcs per quadrant after convexity classification.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantCounts {
    pub q1: usize,
    pub q2: usize,
    pub q3: usize,
    pub q4: usize,
}

impl QuadrantCounts {
    pub fn from_counts(counts: [usize; 4]) -> Self {
        Self {
            q1: counts[0],
            q2: counts[1],
            q3: counts[2],
            q4: counts[3],
        }
    }
}

/// Hypothesis counts through the estimation and filtering stages.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStats {
    /// Center-consistent arc triplets found
    pub triplets: usize,
    /// Triplets surviving parameter estimation
    pub estimated: usize,
    /// Hypotheses passing score and reliability cutoffs
    pub validated: usize,
    /// Ellipses remaining after clustering
    pub clustered: usize,
}

/// Full result of one detection run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub ellipses: Vec<Ellipse>,
    pub arcs: ArcStats,
    pub quadrants: QuadrantCounts,
    pub candidates: CandidateStats,
    pub timing: TimingBreakdown,
}
