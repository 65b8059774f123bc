//! Ellipse detector orchestrating the arc-to-ellipse pipeline.
//!
//! Overview
//! - Segments edge pixels into gradient-consistent connected arcs and drops
//!   short or straight runs.
//! - Classifies each arc's convex side to assign an ellipse quadrant.
//! - Searches the four cyclic quadrant orderings for arc triplets whose
//!   parallel-chord center estimates agree.
//! - Votes rotation, axis ratio and major semi-axis in integer-binned
//!   accumulators per triplet.
//! - Validates hypotheses against their source arc points and deduplicates
//!   near-identical ellipses, keeping the best-scoring representative.
//!
//! Modules
//! - `options` – the [`EllipseParams`] knobs with reference defaults.
//! - `pipeline` – the [`EllipseDetector`] implementation.
//!
//! The detector is single-threaded and holds no state across runs beyond
//! the last run's counters; the documented pattern is a fresh detector per
//! image.

pub mod options;
mod pipeline;

pub use options::EllipseParams;
pub use pipeline::{DetectError, EllipseDetector};
