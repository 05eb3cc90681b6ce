//! Tests for HSV conversion, sRGB companding and XYZ/Lab conversion

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use patchsynth::PatchError;
    use patchsynth::math::color::{
        D65_WHITE, hsv_to_rgb, linear_to_srgb, map_pixels, patch_linear_to_srgb,
        patch_rgb_to_xyz, patch_srgb_to_lab, patch_srgb_to_linear, patch_xyz_to_lab, rgb_to_hsv,
        rgb_to_xyz, srgb_to_lab, srgb_to_linear, xyz_to_lab,
    };

    fn assert_close(a: [f32; 3], b: [f32; 3], tolerance: f32) {
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < tolerance, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_close(rgb_to_hsv([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0], 1e-6);
        assert_close(rgb_to_hsv([0.0, 1.0, 0.0]), [120.0, 1.0, 1.0], 1e-4);
        assert_close(rgb_to_hsv([0.0, 0.0, 1.0]), [240.0, 1.0, 1.0], 1e-4);
        assert_close(rgb_to_hsv([1.0, 0.0, 1.0]), [300.0, 1.0, 1.0], 1e-4);
    }

    // Tests gray and black inputs have zero saturation
    // Verified by dividing by max without the zero guard
    #[test]
    fn test_rgb_to_hsv_achromatic() {
        assert_close(rgb_to_hsv([0.4, 0.4, 0.4]), [0.0, 0.0, 0.4], 1e-6);
        assert_close(rgb_to_hsv([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-6);
        assert_close(hsv_to_rgb([200.0, 0.0, 0.7]), [0.7, 0.7, 0.7], 1e-6);
    }

    // Tests conversion round trip over a spread of colors
    // Verified by swapping two sector outputs in hsv_to_rgb
    #[test]
    fn test_hsv_round_trip() {
        let colors = [
            [0.2, 0.5, 0.9],
            [0.9, 0.8, 0.1],
            [0.3, 0.9, 0.35],
            [0.6, 0.1, 0.4],
            [0.05, 0.5, 0.5],
            [0.99, 0.2, 0.01],
        ];
        for rgb in colors {
            assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, 1e-5);
        }
    }

    #[test]
    fn test_hsv_to_rgb_wraps_hue() {
        assert_close(hsv_to_rgb([360.0, 1.0, 1.0]), [1.0, 0.0, 0.0], 1e-5);
        assert_close(hsv_to_rgb([-120.0, 1.0, 1.0]), hsv_to_rgb([240.0, 1.0, 1.0]), 1e-5);
    }

    // Tests both branches of the companding curves
    // Verified by swapping the 0.04045 and 0.0031308 thresholds
    #[test]
    fn test_srgb_companding_branches() {
        assert!((srgb_to_linear(0.04) - 0.04 / 12.92).abs() < 1e-7);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-5);
        assert!((linear_to_srgb(0.003) - 0.003 * 12.92).abs() < 1e-7);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-5);
        assert!((srgb_to_linear(0.5) - 0.214_041).abs() < 1e-4);
    }

    #[test]
    fn test_srgb_round_trip() {
        for i in 0..=20 {
            let v = i as f32 / 20.0;
            assert!((linear_to_srgb(srgb_to_linear(v)) - v).abs() < 1e-5);
        }
    }

    #[test]
    fn test_patch_companding_maps_every_value() {
        let patch = Array3::from_elem((2, 3, 3), 0.5_f32);
        let linear = patch_srgb_to_linear(&patch);
        assert_eq!(linear.dim(), (2, 3, 3));
        assert!(linear.iter().all(|v| (v - srgb_to_linear(0.5)).abs() < 1e-7));

        let back = patch_linear_to_srgb(&linear);
        assert!(back.iter().all(|v| (v - 0.5).abs() < 1e-5));
    }

    // Tests sRGB white maps to the D65 white point and to L = 100
    // Verified by dropping the linearization before the matrix
    #[test]
    fn test_white_and_black_in_xyz_and_lab() {
        assert_close(rgb_to_xyz([1.0, 1.0, 1.0]), [0.950_456, 1.0, 1.088_754], 1e-4);
        assert_close(rgb_to_xyz([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-7);
        assert_close(srgb_to_lab([1.0, 1.0, 1.0]), [100.0, 0.0, 0.0], 1e-2);
        assert_close(srgb_to_lab([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-4);

        let white = D65_WHITE.map(|v| v as f32);
        assert_close(xyz_to_lab(white), [100.0, 0.0, 0.0], 1e-4);
    }

    // Tests dark values take the linear branch below the cube-root knee
    // Verified by applying the cube root to every ratio
    #[test]
    fn test_lab_linear_branch() {
        let y = 0.004_f32;
        let expected_l = 116.0 * (7.787 * y + 16.0 / 116.0) - 16.0;
        let [l, a, b] = xyz_to_lab([0.0, y, 0.0]);
        assert!((l - expected_l).abs() < 1e-4, "L {l}");
        assert!((l - 903.3 * y).abs() < 1e-2);
        assert!(a < 0.0 && b > 0.0);

        let [bright, _, _] = xyz_to_lab([0.0, 0.5, 0.0]);
        assert!((bright - (116.0 * 0.5_f32.cbrt() - 16.0)).abs() < 1e-3);
    }

    #[test]
    fn test_lab_primaries_have_expected_signs() {
        let [l, a, b] = srgb_to_lab([1.0, 0.0, 0.0]);
        assert!((l - 53.24).abs() < 0.1, "L {l}");
        assert!(a > 75.0 && b > 60.0);

        let [_, _, yellow_blue] = srgb_to_lab([0.0, 0.0, 1.0]);
        assert!(yellow_blue < -100.0, "b {yellow_blue}");
    }

    // Tests patch conversions agree with the per-pixel functions
    // Verified by zipping output lanes against the wrong axis
    #[test]
    fn test_patch_lab_matches_pixels() {
        let patch = Array3::from_shape_fn((3, 4, 3), |(r, c, ch)| {
            (r * 12 + c * 3 + ch) as f32 / 36.0
        });
        let Ok(lab) = patch_srgb_to_lab(&patch) else {
            unreachable!("three-channel patch rejected");
        };
        let Ok(xyz) = patch_rgb_to_xyz(&patch.view()) else {
            unreachable!("three-channel view rejected");
        };
        let Ok(chained) = patch_xyz_to_lab(&xyz) else {
            unreachable!("xyz raster rejected");
        };
        assert_eq!(lab.dim(), (3, 4, 3));

        for r in 0..3 {
            for c in 0..4 {
                let pixel = [0, 1, 2].map(|ch| patch.get((r, c, ch)).copied().unwrap_or(0.0));
                let got = [0, 1, 2].map(|ch| lab.get((r, c, ch)).copied().unwrap_or(f32::NAN));
                let via = [0, 1, 2].map(|ch| chained.get((r, c, ch)).copied().unwrap_or(f32::NAN));
                assert_close(got, srgb_to_lab(pixel), 1e-4);
                assert_close(via, got, 1e-4);
            }
        }
    }

    #[test]
    fn test_pixel_map_rejects_wrong_channel_count() {
        let rgba = Array3::<f32>::zeros((2, 2, 4));
        assert!(matches!(
            map_pixels(&rgba, |p| p),
            Err(PatchError::InvalidParameter { parameter: "patch", .. })
        ));
        assert!(patch_srgb_to_lab(&Array3::<f32>::zeros((2, 2, 1))).is_err());
    }
}
