use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a single transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Eased progress of a transition `elapsed` into its run, in `0.0..=1.0`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.easing.apply(t)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style cubic bezier with control points `(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The decelerating curve used for column reorder transitions.
    pub const REORDER: Easing = Easing::CubicBezier(0.22, 1.0, 0.36, 1.0);

    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Evaluate a unit cubic bezier at horizontal position `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    let curve = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton's method, falling back to bisection on flat slopes.
    let mut s = x;
    for _ in 0..8 {
        let error = curve(x1, x2, s) - x;
        if error.abs() < 1e-5 {
            return curve(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - error / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = curve(x1, x2, s);
        if (value - x).abs() < 1e-5 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    curve(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_bezier_endpoints_and_shape() {
        let easing = Easing::REORDER;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        // Decelerating curve runs ahead of linear early on.
        assert!(easing.apply(0.25) > 0.25);
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = easing.apply(step as f32 / 20.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_linear_bezier_matches_identity() {
        let easing = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_duration_completes() {
        let config = TransitionConfig::new(Duration::ZERO, Easing::Linear);
        assert_eq!(config.progress(Duration::from_millis(5)), 1.0);
    }
}
