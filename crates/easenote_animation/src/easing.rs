//! Easing functions
//!
//! Maps linear progress `t` in `[0, 1]` to eased progress. Every curve is
//! pinned so that `apply(0.0) == 0.0` and `apply(1.0) == 1.0` exactly.

/// Timing curve applied to a tween's linear progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    #[default]
    EaseInOut,
    /// Arbitrary CSS-style cubic bezier `(x1, y1, x2, y2)`
    ///
    /// `x1` and `x2` are clamped to `[0, 1]` so the curve stays a function of time.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing to linear progress `t`
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 || t.is_nan() {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }
}

/// One axis of a cubic bezier with endpoints fixed at 0 and 1
fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_derivative(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve the curve parameter for `x`, then evaluate `y`
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    // Newton-Raphson converges in a handful of steps for well-behaved curves
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return bezier_axis(y1, y2, s);
        }
        let d = bezier_axis_derivative(x1, x2, s);
        if d.abs() < EPSILON {
            break;
        }
        s -= err / d;
    }

    // Flat derivative: fall back to bisection
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_axis(y1, y2, s)
}
