//! Separable Gaussian pre-smoothing.
//!
//! Crisp binary inputs have exactly-zero derivatives inside the flat raster
//! runs of a shallow contour, which fragments the gradient-sign components
//! downstream. A small blur spreads each step across neighboring pixels so
//! the contour carries usable gradients end to end, the same role the
//! Gaussian stage plays in a classic Canny front end.
use crate::image::ImageF32;

/// Normalized 5-tap Gaussian `[1, 4, 6, 4, 1] / 16`.
const GAUSSIAN_5TAP: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Blur with the 5-tap Gaussian, horizontal then vertical pass. Borders
/// replicate.
pub fn gaussian_blur(l: &ImageF32) -> ImageF32 {
    let w = l.w;
    let h = l.h;
    let mut horizontal = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let radius = GAUSSIAN_5TAP.len() as isize / 2;
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let xi = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                sum += l.get(xi, y) * tap;
            }
            horizontal.set(x, y, sum);
        }
    }
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let yi = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
                sum += horizontal.get(x, yi) * tap;
            }
            out.set(x, y, sum);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_is_unchanged() {
        let mut img = ImageF32::new(8, 8);
        for v in img.data.iter_mut() {
            *v = 0.5;
        }
        let blurred = gaussian_blur(&img);
        for &v in &blurred.data {
            assert!((v - 0.5).abs() < 1e-6, "flat value drifted to {v}");
        }
    }

    #[test]
    fn step_spreads_monotonically() {
        let mut img = ImageF32::new(16, 4);
        for y in 0..4 {
            for x in 8..16 {
                img.set(x, y, 1.0);
            }
        }
        let blurred = gaussian_blur(&img);
        let row: Vec<f32> = (0..16).map(|x| blurred.get(x, 1)).collect();
        for pair in row.windows(2) {
            assert!(
                pair[1] >= pair[0] - 1e-6,
                "blurred step must stay monotonic: {row:?}"
            );
        }
        assert!(row[5] < 0.1 && row[10] > 0.9, "tails must stay flat: {row:?}");
        assert!(
            blurred.get(7, 1) > 0.0 && blurred.get(8, 1) < 1.0,
            "the step itself must spread"
        );
    }
}
