use crate::image::ImageF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_KERNEL_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Per-pixel gradients with magnitude.
#[derive(Clone, Debug)]
pub struct Grad {
    pub gx: ImageF32,
    pub gy: ImageF32,
    pub mag: ImageF32,
}

/// 3×3 derivative kernel selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientKernel {
    #[default]
    Sobel,
    Scharr,
}

impl GradientKernel {
    fn kernels(self) -> (&'static Kernel3, &'static Kernel3) {
        match self {
            GradientKernel::Sobel => (&SOBEL_KERNEL_X, &SOBEL_KERNEL_Y),
            GradientKernel::Scharr => (&SCHARR_KERNEL_X, &SCHARR_KERNEL_Y),
        }
    }
}

/// Compute per-pixel gradients with the selected kernel. Borders replicate.
pub fn image_gradients(l: &ImageF32, kernel: GradientKernel) -> Grad {
    let (kernel_x, kernel_y) = kernel.kernels();
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, &yy) in y_idx.iter().enumerate() {
                let kernel_row_x = &kernel_x[ky];
                let kernel_row_y = &kernel_y[ky];
                for (xx, (&kx_weight, &ky_weight)) in x_idx
                    .iter()
                    .zip(kernel_row_x.iter().zip(kernel_row_y.iter()))
                {
                    let sample = l.get(*xx, yy);
                    sum_x += sample * kx_weight;
                    sum_y += sample * ky_weight;
                }
            }

            gx.set(x, y, sum_x);
            gy.set(x, y, sum_y);
            mag.set(x, y, (sum_x * sum_x + sum_y * sum_y).sqrt());
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: usize, height: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in 0..height {
            for x in split_x..width {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn vertical_step_yields_horizontal_gradient() {
        let img = step_image(16, 16, 8);
        let grad = image_gradients(&img, GradientKernel::Sobel);
        let gx = grad.gx.get(8, 8);
        let gy = grad.gy.get(8, 8);
        assert!(gx > 0.0, "expected positive gx at the step, got {gx}");
        assert_eq!(gy, 0.0, "no vertical change expected, got gy={gy}");
    }

    #[test]
    fn flat_image_has_zero_magnitude() {
        let img = ImageF32::new(8, 8);
        let grad = image_gradients(&img, GradientKernel::Scharr);
        assert!(grad.mag.data.iter().all(|&m| m == 0.0));
    }
}
