//! Tests for sine, stroke and ellipse mask synthesis

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use patchsynth::PatchError;
    use patchsynth::math::random::RandomSource;
    use patchsynth::synthesis::masks::{
        EllipseShape, MaskShape, PatchKind, ellipse_mask, sample_angle, sine_mask, stroke_mask,
    };

    fn count_zeros(mask: &Array2<f32>) -> usize {
        mask.iter().filter(|&&v| v == 0.0).count()
    }

    #[test]
    fn test_patch_kind_parsing() {
        assert_eq!("sine".parse::<PatchKind>().ok(), Some(PatchKind::Sine));
        assert_eq!(" Stroke ".parse::<PatchKind>().ok(), Some(PatchKind::Stroke));
        assert_eq!("ELLIPSE".parse::<PatchKind>().ok(), Some(PatchKind::Ellipse));

        match "gabor".parse::<PatchKind>() {
            Err(PatchError::UnsupportedKind { kind }) => assert_eq!(kind, "gabor"),
            other => unreachable!("Expected UnsupportedKind, got {other:?}"),
        }
    }

    #[test]
    fn test_patch_kind_names_round_trip() {
        for kind in PatchKind::ALL {
            assert_eq!(kind.to_string().parse::<PatchKind>().ok(), Some(kind));
        }
    }

    // Tests the grating value at the origin is exactly one half
    // Verified by adding a phase offset to the sine argument
    #[test]
    fn test_sine_mask_origin_is_half() {
        for angle in [0.0, 37.0, 90.0, 135.0] {
            let mask = sine_mask(32, angle);
            assert!(mask.get((0, 0)).is_some_and(|&v| (v - 0.5).abs() < f32::EPSILON));
            assert!(mask.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_sine_mask_horizontal_grating_is_row_invariant() {
        let mask = sine_mask(16, 0.0);
        for r in 1..16 {
            assert_eq!(mask.row(r), mask.row(0));
        }
    }

    // Tests the grating period shrinks along the sweep direction
    // Verified by setting the frequency ramp to zero
    #[test]
    fn test_sine_mask_period_shrinks() {
        let size = 128;
        let mask = sine_mask(size, 0.0);
        let above: Vec<bool> = mask.row(0).iter().map(|&v| v >= 0.5).collect();

        let crossings: Vec<usize> = above
            .iter()
            .zip(above.iter().skip(1))
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(x, _)| x)
            .collect();
        assert!(crossings.len() > 10);

        let first = crossings.first().copied().unwrap_or(0);
        let last_gap = crossings
            .iter()
            .rev()
            .take(2)
            .fold(0, |acc, &x| if acc == 0 { x } else { acc - x });
        assert!(first > 3 * last_gap, "first {first}, last gap {last_gap}");

        let early = crossings.iter().filter(|&&x| x < size / 2).count();
        let late = crossings.len() - early;
        assert!(late > early);
    }

    // Tests a full-width stroke at angle 0 zeroes the whole central band
    // Verified by shrinking the band by one row
    #[test]
    fn test_stroke_full_width_band() {
        let size = 32;
        let mask = stroke_mask(size, size as u32, 0.0);

        for r in size / 4..size * 3 / 4 {
            assert!(mask.row(r).iter().all(|&v| v == 0.0), "row {r} not zero");
        }
        assert!(mask.row(0).iter().all(|&v| (v - 1.0).abs() < f32::EPSILON));
        assert!(mask.row(size - 1).iter().all(|&v| (v - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_stroke_band_width() {
        let mask = stroke_mask(16, 2, 0.0);
        assert_eq!(count_zeros(&mask), 8 * 2);
        assert!(mask.get((8, 7)).is_some_and(|&v| v == 0.0));
        assert!(mask.get((8, 8)).is_some_and(|&v| v == 0.0));
        assert!(mask.get((8, 9)).is_some_and(|&v| (v - 1.0).abs() < f32::EPSILON));
    }

    // Tests a quarter turn lays the four-pixel bar across rows 15 to 18
    // Verified by rotating clockwise instead of counter-clockwise
    #[test]
    fn test_stroke_quarter_turn_is_horizontal() {
        let mask = stroke_mask(32, 4, 90.0);
        assert!(mask.get((17, 16)).is_some_and(|&v| v < 0.01));
        assert!(mask.get((18, 12)).is_some_and(|&v| v < 0.01));
        assert!(mask.get((16, 16)).is_some_and(|&v| v < 0.01));
        assert!(mask.get((14, 16)).is_some_and(|&v| v > 0.99));
        assert!(mask.get((19, 16)).is_some_and(|&v| v > 0.99));
        assert!(mask.get((16, 4)).is_some_and(|&v| v > 0.99));
        assert!(mask.get((0, 0)).is_some_and(|&v| v > 0.99));

        let diagonal = stroke_mask(32, 4, 45.0);
        assert!(diagonal.iter().all(|&v| (-1e-5..=1.0 + 1e-5).contains(&v)));
        assert!(diagonal.iter().any(|&v| v < 0.01));
    }

    // Tests the boundary flag selects a thin ring over a filled region
    // Verified by inverting the filled argument
    #[test]
    fn test_ellipse_boundary_flag() {
        let size = 32;
        let mut shape = EllipseShape {
            center: (16, 16),
            boundary_only: true,
            radii: (10, 6),
            blur_sigma: 0,
        };
        let ring = ellipse_mask(size, &shape);
        let ring_zeros = count_zeros(&ring);
        assert!(ring_zeros > 0 && ring_zeros < size * size);

        shape.boundary_only = false;
        let disc = ellipse_mask(size, &shape);
        assert!(count_zeros(&disc) > ring_zeros);
        assert!(disc.get((16, 16)).is_some_and(|&v| v == 0.0));
        assert!(ring.get((16, 16)).is_some_and(|&v| (v - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_ellipse_blur_stays_in_unit_range() {
        let shape = EllipseShape {
            center: (8, 8),
            boundary_only: false,
            radii: (4, 4),
            blur_sigma: 3,
        };
        let mask = ellipse_mask(16, &shape);
        assert!(mask.iter().all(|&v| (-1e-5..=1.0 + 1e-5).contains(&v)));
        assert!(mask.iter().any(|&v| v > 0.01 && v < 0.99));
    }

    // Tests sampled parameters stay inside their documented ranges
    // Verified by drawing the width from randint(8) instead of randint(1, 8)
    #[test]
    fn test_sampled_parameters_in_range() {
        let mut rng = RandomSource::new(99);
        for _ in 0..500 {
            match MaskShape::sample(PatchKind::Stroke, &mut rng, 32) {
                MaskShape::Stroke { width, angle } => {
                    assert!((1..=8).contains(&width));
                    assert!((0.0..=180.0).contains(&angle));
                }
                other => unreachable!("Expected stroke, got {other:?}"),
            }

            match MaskShape::sample(PatchKind::Ellipse, &mut rng, 32) {
                MaskShape::Ellipse(shape) => {
                    assert!((16..=17).contains(&shape.center.0));
                    assert!((16..=17).contains(&shape.center.1));
                    assert!(shape.radii.0 < 16 && shape.radii.1 < 16);
                    assert!(shape.blur_sigma <= 8);
                }
                other => unreachable!("Expected ellipse, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ellipse_sample_on_single_pixel() {
        let mut rng = RandomSource::new(4);
        let shape = MaskShape::sample(PatchKind::Ellipse, &mut rng, 1);
        assert_eq!(shape.kind(), PatchKind::Ellipse);
        if let MaskShape::Ellipse(ellipse) = shape {
            assert_eq!(ellipse.radii, (0, 0));
        }
        assert_eq!(shape.render(1).dim(), (1, 1));
    }

    // Tests roughly half of the angles are snapped to multiples of 45
    // Verified by always snapping
    #[test]
    fn test_angle_snapping_rate() {
        let mut rng = RandomSource::new(17);
        let n = 4000;
        let snapped = (0..n)
            .map(|_| sample_angle(&mut rng))
            .filter(|a| (a / 45.0 - (a / 45.0).round()).abs() < 1e-6)
            .count();
        let ratio = snapped as f64 / f64::from(n);
        assert!((0.45..0.55).contains(&ratio), "snapped ratio {ratio}");
    }

    #[test]
    fn test_shape_kind_matches_request() {
        let mut rng = RandomSource::new(1);
        for kind in PatchKind::ALL {
            assert_eq!(MaskShape::sample(kind, &mut rng, 8).kind(), kind);
        }
    }
}
