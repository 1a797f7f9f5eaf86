use plutonium_panels::dither::{dither, pattern_step, shade, Coverage};

#[test]
fn fully_transparent_always_discards() {
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(dither(x, y, 0.0), Coverage::Discard);
            assert_eq!(dither(x, y, 0.03), Coverage::Discard);
        }
    }
}

#[test]
fn opaque_is_never_discarded_and_written_opaque() {
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(dither(x, y, 1.0), Coverage::Keep);
            assert_eq!(dither(x, y, 0.97), Coverage::Keep);
            assert_eq!(shade([0.2, 0.4, 0.6, 1.0], x, y), Some([0.2, 0.4, 0.6, 1.0]));
        }
    }
}

#[test]
fn quarter_alpha_keeps_only_pattern_slot_zero() {
    // interval 4, step = x + 2y
    assert_eq!(pattern_step(0, 0, 4), 0);
    assert_eq!(dither(0, 0, 0.25), Coverage::Keep);
    assert_eq!(dither(1, 0, 0.25), Coverage::Discard);
    assert_eq!(dither(4, 0, 0.25), Coverage::Keep);
    assert_eq!(dither(2, 1, 0.25), Coverage::Keep);
    assert_eq!(dither(0, 1, 0.25), Coverage::Discard);
    assert_eq!(shade([1.0, 0.0, 0.0, 0.25], 0, 0), Some([1.0, 0.0, 0.0, 1.0]));
}

#[test]
fn three_quarter_alpha_drops_only_pattern_slot_zero() {
    assert_eq!(dither(0, 0, 0.75), Coverage::Discard);
    assert_eq!(dither(1, 0, 0.75), Coverage::Keep);
    assert_eq!(dither(2, 1, 0.75), Coverage::Discard);
    assert_eq!(shade([1.0, 1.0, 1.0, 0.75], 0, 0), None);
}

#[test]
fn half_alpha_is_a_checkerboard() {
    for y in 0..6 {
        for x in 0..6 {
            let expected = if (x + y) % 2 == 0 {
                Coverage::Discard
            } else {
                Coverage::Keep
            };
            assert_eq!(dither(x, y, 0.5), expected, "at ({}, {})", x, y);
        }
    }
}

#[test]
fn kept_density_tracks_alpha() {
    let density = |alpha: f32| {
        let mut kept = 0;
        for y in 0..64 {
            for x in 0..64 {
                if dither(x, y, alpha) == Coverage::Keep {
                    kept += 1;
                }
            }
        }
        kept as f32 / (64.0 * 64.0)
    };
    for alpha in [0.1f32, 0.25, 0.5, 0.75, 0.9] {
        assert!(
            (density(alpha) - alpha).abs() < 0.06,
            "alpha {} kept {}",
            alpha,
            density(alpha)
        );
    }
    assert!(density(0.2) < density(0.4));
    assert!(density(0.6) < density(0.8));
}

#[test]
fn nan_alpha_is_dropped() {
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(dither(x, y, f32::NAN), Coverage::Discard);
            assert_eq!(shade([1.0, 1.0, 1.0, f32::NAN], x, y), None);
        }
    }
}
