//! Ordered dithering that stands in for alpha blending.
//!
//! Panels are drawn with blending off and the depth test on. A translucent
//! fragment is either written fully opaque or dropped; coverage comes from how
//! densely fragments survive across the screen. This is the CPU twin of the
//! fragment stage in `shaders/panel.frag.wgsl` and must stay in lockstep.

use crate::utils::Color;

/// At or below this alpha every fragment is dropped.
pub const ALPHA_DISCARD_MAX: f32 = 0.03;
/// At or above this alpha every fragment is kept.
pub const ALPHA_OPAQUE_MIN: f32 = 0.97;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Keep,
    Discard,
}

/// Pattern slot of a fragment for a given interval.
pub fn pattern_step(x: i32, y: i32, interval: i32) -> i32 {
    x + y * (interval >> 1) + y * (interval >> 3)
}

/// Keep/drop decision for the fragment at pixel `(x, y)` with alpha `alpha`.
///
/// Below one half, only every `floor(1 / a)`-th slot survives. From one half
/// up, only every `floor(1 / (1 - a))`-th slot is dropped.
///
/// A NaN alpha is treated as fully transparent.
pub fn dither(x: i32, y: i32, alpha: f32) -> Coverage {
    if alpha.is_nan() || alpha <= ALPHA_DISCARD_MAX {
        return Coverage::Discard;
    }
    if alpha >= ALPHA_OPAQUE_MIN {
        return Coverage::Keep;
    }

    if alpha < 0.5 {
        let interval = (1.0 / alpha) as i32;
        if pattern_step(x, y, interval) % interval != 0 {
            return Coverage::Discard;
        }
    } else {
        let interval = (1.0 / (1.0 - alpha)) as i32;
        if pattern_step(x, y, interval) % interval == 0 {
            return Coverage::Discard;
        }
    }
    Coverage::Keep
}

/// Final fragment color: `None` when dropped, otherwise the color with alpha
/// forced to one.
pub fn shade(color: Color, x: i32, y: i32) -> Option<Color> {
    match dither(x, y, color[3]) {
        Coverage::Discard => None,
        Coverage::Keep => Some([color[0], color[1], color[2], 1.0]),
    }
}
