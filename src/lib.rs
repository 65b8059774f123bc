#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod edges;
pub mod image;
pub mod types;

// Pipeline-stage modules — public for tooling and tests, but considered
// unstable internals.
pub mod arcs;
pub mod chords;
pub mod cluster;
pub mod estimator;
pub mod math;
pub mod triplets;
pub mod validate;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectError, EllipseDetector, EllipseParams};
pub use crate::diagnostics::DetectionReport;
pub use crate::edges::EdgeMap;
pub use crate::types::Ellipse;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ellipse_detector::prelude::*;
///
/// # fn main() {
/// let map = EdgeMap::empty(640, 480);
/// let mut detector = EllipseDetector::new(EllipseParams::default());
/// detector.set_edge_map(&map);
/// let report = detector.detect_with_diagnostics().unwrap();
/// println!(
///     "ellipses={} segments={}",
///     report.ellipses.len(),
///     report.arcs.total_segments
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::detector::{EllipseDetector, EllipseParams};
    pub use crate::diagnostics::DetectionReport;
    pub use crate::edges::EdgeMap;
    pub use crate::types::Ellipse;
}
