// extensions/easing.rs
//
// Easing curves and scalar interpolation helpers used by the effect ramps.
// Pure math, no knowledge of lights or sequencers.

use std::f32::consts::PI;
use serde::{Deserialize, Serialize};

/// Shape applied to a normalized ramp parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    /// Quarter sine, slow start.
    SineIn,
    /// Quarter sine, slow end.
    SineOut,
    SineInOut,
    /// Sharp flash-like rise.
    ExpoIn,
    /// Sharp flash-like decay.
    ExpoOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]. Every curve maps 0 → 0 and 1 → 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),

            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            // Exact at the ends; the raw formula misses 0 and 1 by ~1e-3.
            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else if t == 1.0 { 1.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Easing::ExpoOut => {
                if t == 0.0 { 0.0 } else if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Linearly map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// Not clamped. A degenerate source range maps everything to `to_min`.
#[inline]
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    let span = from_max - from_min;
    if span == 0.0 {
        return to_min;
    }
    lerp(to_min, to_max, (value - from_min) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
    ];

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn remap_sine_range_to_unit() {
        assert_eq!(remap(-1.0, -1.0, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(remap(0.0, -1.0, 1.0, 0.0, 1.0), 0.5);
        assert_eq!(remap(1.0, -1.0, 1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn remap_degenerate_range() {
        assert_eq!(remap(5.0, 2.0, 2.0, 3.0, 9.0), 3.0);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }

    #[test]
    fn easing_parses_snake_case() {
        let easing: Easing = serde_json::from_str("\"quad_in_out\"").unwrap();
        assert_eq!(easing, Easing::QuadInOut);
    }
}
