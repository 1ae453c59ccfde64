//! Interpolation between keyframe values.

use super::types::KeyValue;

/// Trait for values that can be blended between two keyframes.
///
/// `t = 0.0` yields `self`, `t = 1.0` yields `to`.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for [f32; 3] {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        [
            lerp(self[0], to[0], t),
            lerp(self[1], to[1], t),
            lerp(self[2], to[2], t),
        ]
    }
}

impl Interpolate for KeyValue {
    /// Both values must have the same shape; otherwise `self` is returned unchanged.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Self::Scalar(from), Self::Scalar(to)) => Self::Scalar(from.interpolate(to, t)),
            (Self::Vector(from), Self::Vector(to)) => Self::Vector(from.interpolate(to, t)),
            _ => *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_interpolation() {
        let v = KeyValue::Scalar(1.0).interpolate(&KeyValue::Scalar(0.4), 0.5);
        assert!((v.as_scalar().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_vector_interpolation() {
        let v = KeyValue::scale(1.0).interpolate(&KeyValue::scale(2.0), 0.25);
        assert_eq!(v.as_vector(), Some([1.25, 1.25, 1.0]));
    }

    #[test]
    fn test_mismatched_shapes_hold_start() {
        let from = KeyValue::Scalar(0.3);
        assert_eq!(from.interpolate(&KeyValue::scale(2.0), 0.5), from);
    }
}
