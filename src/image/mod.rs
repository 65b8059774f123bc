//! Image buffers and I/O helpers.
//!
//! - `u8`: read-only `ImageU8<'a>` view over 8-bit grayscale buffers.
//! - `f32`: owned `ImageF32` buffer for numeric processing (row-major,
//!   stride == w).
//! - `io`: loading grayscale images and writing JSON reports.
//!
//! Ownership is explicit: views borrow external data, `ImageF32` owns and
//! mutates. Hot loops use simple row-major indexing.
pub mod f32;
pub mod io;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::{load_grayscale_image, write_json_file, GrayImageU8};
pub use self::u8::ImageU8;
