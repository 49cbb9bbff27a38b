//! Animatable value types
//!
//! Provides the [`Interpolate`] trait and implementations for scalars and
//! the 2D geometry types from `easenote_core`.

use easenote_core::Vec2;

/// Trait for values that can be linearly interpolated
///
/// Composite values (several fields animated together) implement this
/// field by field, which keeps every field on the same clock.
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Vec2 Implementation
// ============================================================================

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
        assert_eq!(800.0_f32.lerp(&0.0, 0.0), 800.0);
    }

    #[test]
    fn test_vec2_interpolation() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, -20.0);
        let mid = a.lerp(&b, 0.5);

        assert!(mid.approx_eq(&Vec2::new(5.0, -10.0), 1e-6));
    }
}
