//! Edge processing: image gradients, non-maximum suppression and the edge
//! map consumed by the detector.
//!
//! This module provides the minimal building blocks the ellipse pipeline
//! needs from its edge front end:
//!
//! - Gaussian pre-smoothing so crisp inputs carry gradients along their
//!   whole contour instead of only at raster steps.
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy` and magnitude.
//! - A lightweight non-maximum suppression on the gradient magnitude with a
//!   direction-aligned 4-neighborhood, marking surviving pixels in an
//!   [`EdgeMap`].
//! - The [`EdgeMap`] buffers themselves, which any external edge detector
//!   can also fill directly as long as gradients are defined at every edge
//!   pixel.
//!
//! Border handling clamps indices in gradient computation and skips the
//! outermost 1-pixel frame in NMS, matching the segmenter's border contract.

pub mod blur;
pub mod grad;
pub mod map;
pub mod nms;

pub use blur::gaussian_blur;
pub use grad::{image_gradients, Grad, GradientKernel};
pub use map::{EdgeMap, EdgeMapError, EDGE_SENTINEL};
