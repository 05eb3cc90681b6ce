//! Per-pixel colorspace conversions
//!
//! HSV uses hue in degrees `[0, 360)` with saturation and value in `[0, 1]`.
//! sRGB companding follows IEC 61966-2-1. XYZ and CIE Lab use the 2° observer
//! with the D65 illuminant, so Lab distances are in the units the zipper
//! threshold is calibrated for.

use crate::io::configuration::PATCH_CHANNELS;
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array3, ArrayBase, Axis, Data, Ix3, Zip};

/// D65 reference white in XYZ
pub const D65_WHITE: [f64; 3] = [0.950_47, 1.0, 1.088_83];

// Linear sRGB to XYZ, rows produce X, Y and Z
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

// Below this normalized value the cube root is replaced by a line
const LAB_EPSILON: f64 = 0.008_856;
const LAB_SLOPE: f64 = 7.787;

/// Convert an RGB triple in `[0,1]` to HSV
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max;
    let saturation = if max > 0.0 { delta / max } else { 0.0 };

    let mut hue = if delta <= 0.0 {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        60.0 * (g - b) / delta
    } else if (max - g).abs() < f32::EPSILON {
        60.0f32.mul_add((b - r) / delta, 120.0)
    } else {
        60.0f32.mul_add((r - g) / delta, 240.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    [hue, saturation, value]
}

/// Convert an HSV triple back to RGB
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [hue, saturation, value] = hsv;
    if saturation <= 0.0 {
        return [value, value, value];
    }

    let h = hue.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = value * (1.0 - saturation);
    let q = value * saturation.mul_add(-f, 1.0);
    let t = value * saturation.mul_add(-(1.0 - f), 1.0);

    match sector as u32 {
        0 => [value, t, p],
        1 => [q, value, p],
        2 => [p, value, t],
        3 => [p, q, value],
        4 => [t, p, value],
        _ => [value, p, q],
    }
}

/// Inverse sRGB companding of one channel value
pub fn srgb_to_linear(v: f32) -> f32 {
    if v > 0.040_45 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// Forward sRGB companding of one channel value
pub fn linear_to_srgb(v: f32) -> f32 {
    if v > 0.003_130_8 {
        1.055f32.mul_add(v.powf(1.0 / 2.4), -0.055)
    } else {
        v * 12.92
    }
}

/// Linearize every value of a patch
pub fn patch_srgb_to_linear(patch: &Array3<f32>) -> Array3<f32> {
    patch.mapv(srgb_to_linear)
}

/// Apply sRGB companding to every value of a patch
pub fn patch_linear_to_srgb(patch: &Array3<f32>) -> Array3<f32> {
    patch.mapv(linear_to_srgb)
}

/// Convert an sRGB triple to CIE XYZ, linearizing each channel first
pub fn rgb_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    let linear = rgb.map(srgb_to_linear);
    RGB_TO_XYZ.map(|row| {
        row.iter()
            .zip(&linear)
            .fold(0.0, |acc, (&w, &v)| w.mul_add(v, acc))
    })
}

fn lab_response(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_SLOPE.mul_add(t, 16.0 / 116.0)
    }
}

/// Convert a CIE XYZ triple to CIE Lab relative to [`D65_WHITE`]
///
/// `L` spans `[0, 100]` for in-gamut input; `a` and `b` are signed.
pub fn xyz_to_lab(xyz: [f32; 3]) -> [f32; 3] {
    let [fx, fy, fz] = [0, 1, 2].map(|i| {
        let value = xyz.get(i).copied().map_or(0.0, f64::from);
        let white = D65_WHITE.get(i).copied().unwrap_or(1.0);
        lab_response(value / white)
    });

    [
        116.0f64.mul_add(fy, -16.0) as f32,
        (500.0 * (fx - fy)) as f32,
        (200.0 * (fy - fz)) as f32,
    ]
}

/// Convert an sRGB triple straight to CIE Lab
pub fn srgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    xyz_to_lab(rgb_to_xyz(rgb))
}

/// Apply a per-pixel conversion to every pixel of a 3-channel raster
///
/// # Errors
///
/// Returns an error if the raster does not have exactly 3 channels
pub fn map_pixels<S, F>(patch: &ArrayBase<S, Ix3>, convert: F) -> Result<Array3<f32>>
where
    S: Data<Elem = f32>,
    F: Fn([f32; 3]) -> [f32; 3],
{
    let channels = patch.dim().2;
    if channels != PATCH_CHANNELS {
        return Err(invalid_parameter(
            "patch",
            &channels,
            &"pixel conversions need exactly 3 channels",
        ));
    }

    let mut out = Array3::zeros(patch.raw_dim());
    Zip::from(out.lanes_mut(Axis(2)))
        .and(patch.lanes(Axis(2)))
        .for_each(|mut dst, src| {
            let mut pixel = [0.0; 3];
            for (value, &v) in pixel.iter_mut().zip(src.iter()) {
                *value = v;
            }
            for (d, v) in dst.iter_mut().zip(convert(pixel)) {
                *d = v;
            }
        });
    Ok(out)
}

/// Convert every pixel of an sRGB patch to XYZ
///
/// # Errors
///
/// Returns an error if the patch does not have exactly 3 channels
pub fn patch_rgb_to_xyz<S: Data<Elem = f32>>(patch: &ArrayBase<S, Ix3>) -> Result<Array3<f32>> {
    map_pixels(patch, rgb_to_xyz)
}

/// Convert every pixel of an XYZ raster to Lab
///
/// # Errors
///
/// Returns an error if the raster does not have exactly 3 channels
pub fn patch_xyz_to_lab<S: Data<Elem = f32>>(xyz: &ArrayBase<S, Ix3>) -> Result<Array3<f32>> {
    map_pixels(xyz, xyz_to_lab)
}

/// Convert every pixel of an sRGB patch to Lab
///
/// # Errors
///
/// Returns an error if the patch does not have exactly 3 channels
pub fn patch_srgb_to_lab<S: Data<Elem = f32>>(patch: &ArrayBase<S, Ix3>) -> Result<Array3<f32>> {
    map_pixels(patch, srgb_to_lab)
}
