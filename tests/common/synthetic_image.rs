/// Renders filled ellipses the brute-force way: a dense parametric sweep
/// over angle and shrinking radius. Slow but hole-free, which is what the
/// edge front end needs.
pub fn black_image(width: usize, height: usize) -> Vec<u8> {
    vec![0u8; width * height]
}

/// Paint a filled white ellipse. `rho` is the major-axis rotation in
/// radians; the y-axis points down, matching image coordinates.
pub fn draw_filled_ellipse(
    img: &mut [u8],
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    rho: f32,
    a: f32,
    b: f32,
) {
    assert!(a > 0.0 && b > 0.0 && b <= a, "expect 0 < b <= a");
    let ratio = b / a;
    let cos_rho = rho.cos();
    let sin_rho = rho.sin();

    let mut angle = 0.0f32;
    while angle < 360.0 {
        let radians = angle.to_radians();
        let cos_t = radians.cos();
        let sin_t = radians.sin();
        let mut radius = a;
        while radius >= 0.0 {
            let a_t = radius;
            let b_t = a_t * ratio;
            let x = a_t * cos_t * cos_rho + b_t * sin_t * sin_rho;
            let y = -a_t * cos_t * sin_rho + b_t * sin_t * cos_rho;
            let px = (cx + x).round() as i32;
            let py = (cy - y).round() as i32;
            if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < height {
                img[py as usize * width + px as usize] = 255;
            }
            radius -= 0.2;
        }
        angle += 0.2;
    }
}

/// Paint a white diagonal band of the given half-width from the top-left
/// toward the bottom-right corner.
pub fn draw_diagonal_band(img: &mut [u8], width: usize, height: usize, half_width: i32) {
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if (x - y).abs() <= half_width {
                img[y as usize * width + x as usize] = 255;
            }
        }
    }
}
