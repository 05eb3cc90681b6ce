//! Raster geometry: rectangle fills, rotation, Gaussian blur and ellipse drawing
//!
//! All operations work on single-channel [`Mask`] grids except
//! [`gaussian_blur_channels`], which blurs each channel of a patch independently.

use crate::io::configuration::{ELLIPSE_STEP_DEGREES, GAUSSIAN_KERNEL_SPAN};
use crate::spatial::raster::{Mask, Patch};
use ndarray::{Array2, Axis};
use std::ops::Range;

/// Set every value inside a rectangle, clipped to the mask bounds
pub fn fill_rect(mask: &mut Mask, rows: Range<usize>, cols: Range<usize>, value: f32) {
    let (height, width) = mask.dim();
    for row in rows.start..rows.end.min(height) {
        for col in cols.start..cols.end.min(width) {
            if let Some(v) = mask.get_mut((row, col)) {
                *v = value;
            }
        }
    }
}

fn value_at(mask: &Mask, row: usize, col: usize) -> f32 {
    mask.get((row, col)).copied().unwrap_or(0.0)
}

// Edge-replicate bilinear lookup
fn sample_bilinear(mask: &Mask, y: f32, x: f32) -> f32 {
    let (rows, cols) = mask.dim();
    let x = x.clamp(0.0, (cols - 1) as f32);
    let y = y.clamp(0.0, (rows - 1) as f32);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let (top_left, top_right) = (value_at(mask, y0, x0), value_at(mask, y0, x1));
    let (bottom_left, bottom_right) = (value_at(mask, y1, x0), value_at(mask, y1, x1));
    let top = fx.mul_add(top_right - top_left, top_left);
    let bottom = fx.mul_add(bottom_right - bottom_left, bottom_left);
    fy.mul_add(bottom - top, top)
}

/// Rotate a mask counter-clockwise by `angle_degrees` about its center
///
/// The center is `(cols/2, rows/2)` in pixel coordinates. Destination
/// pixels are mapped back into the source and sampled bilinearly;
/// coordinates outside the source take the nearest edge value.
pub fn rotate(mask: &Mask, angle_degrees: f32) -> Mask {
    let (rows, cols) = mask.dim();
    if rows == 0 || cols == 0 {
        return mask.clone();
    }

    let cx = cols as f32 / 2.0;
    let cy = rows as f32 / 2.0;
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let dx = c as f32 - cx;
        let dy = r as f32 - cy;
        let sx = cos.mul_add(dx, -sin * dy) + cx;
        let sy = sin.mul_add(dx, cos * dy) + cy;
        sample_bilinear(mask, sy, sx)
    })
}

/// Normalized 1D Gaussian kernel sized `round(2 * span * sigma + 1)`, forced odd
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let size = ((sigma * GAUSSIAN_KERNEL_SPAN).mul_add(2.0, 1.0).round() as usize) | 1;
    let center = (size / 2) as f32;
    let denominator = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denominator).exp()
        })
        .collect();
    let total: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= total;
    }
    kernel
}

/// Mirror an out-of-range index without repeating the edge (`dcb|abcd|cba`)
pub fn reflect_101(index: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = index.rem_euclid(period);
    if m >= len as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// Separable Gaussian blur with reflect-101 borders
pub fn gaussian_blur(mask: &Mask, sigma: f32) -> Mask {
    let (rows, cols) = mask.dim();
    if rows == 0 || cols == 0 || sigma <= 0.0 {
        return mask.clone();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    let horizontal = Array2::from_shape_fn((rows, cols), |(r, c)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, weight)| {
                let src = reflect_101(c as isize + k as isize - radius, cols);
                weight * value_at(mask, r, src)
            })
            .sum::<f32>()
    });

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, weight)| {
                let src = reflect_101(r as isize + k as isize - radius, rows);
                weight * value_at(&horizontal, src, c)
            })
            .sum::<f32>()
    })
}

/// Blur every channel of a patch independently
pub fn gaussian_blur_channels(patch: &Patch, sigma: f32) -> Patch {
    let mut blurred = patch.clone();
    for (mut dst, src) in blurred
        .axis_iter_mut(Axis(2))
        .zip(patch.axis_iter(Axis(2)))
    {
        dst.assign(&gaussian_blur(&src.to_owned(), sigma));
    }
    blurred
}

fn set_pixel(mask: &mut Mask, x: i64, y: i64, value: f32) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(v) = mask.get_mut((y as usize, x as usize)) {
        *v = value;
    }
}

// Bresenham line between two integer points, clipped to the mask
fn draw_line(mask: &mut Mask, from: (i64, i64), to: (i64, i64), value: f32) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        set_pixel(mask, x, y, value);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Closed polyline approximating an axis-aligned ellipse
///
/// `center` and the returned points are `(x, y)`; the first and last
/// points coincide.
pub fn ellipse_polyline(center: (i64, i64), axes: (u32, u32)) -> Vec<(i64, i64)> {
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    let (rx, ry) = (f64::from(axes.0), f64::from(axes.1));

    (0..=360_u32)
        .step_by(ELLIPSE_STEP_DEGREES)
        .map(|degrees| {
            let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
            (
                rx.mul_add(cos, cx).round() as i64,
                ry.mul_add(sin, cy).round() as i64,
            )
        })
        .collect()
}

/// Draw an axis-aligned ellipse into a mask
///
/// The outline is always traced one pixel wide. When `filled`, every pixel
/// whose center lies within the ellipse widened by half a pixel is set too,
/// so zero radii still mark the center pixel.
pub fn draw_ellipse(
    mask: &mut Mask,
    center: (i64, i64),
    axes: (u32, u32),
    filled: bool,
    value: f32,
) {
    if filled {
        let (cx, cy) = (center.0 as f64, center.1 as f64);
        let rx = f64::from(axes.0) + 0.5;
        let ry = f64::from(axes.1) + 0.5;
        for ((r, c), v) in mask.indexed_iter_mut() {
            let nx = (c as f64 - cx) / rx;
            let ny = (r as f64 - cy) / ry;
            if nx.mul_add(nx, ny * ny) <= 1.0 {
                *v = value;
            }
        }
    }

    let points = ellipse_polyline(center, axes);
    for (&from, &to) in points.iter().zip(points.iter().skip(1)) {
        draw_line(mask, from, to, value);
    }
}
