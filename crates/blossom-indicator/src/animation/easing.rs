//! Easing curves for keyframe segments.
//!
//! Compositor backends interpolate between keyframes with either a linear
//! ramp or a cubic bezier. The named presets are the curves compositors ship
//! with; `Ease` applies to keyframes that carry no explicit curve.

use serde::{Deserialize, Serialize};

/// Timing curve through (0, 0), (x1, y1), (x2, y2), (1, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const EASE: Self = Self::new_unchecked(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::new_unchecked(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new_unchecked(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new_unchecked(0.42, 0.0, 0.58, 1.0);

    /// Curve with control points checked: x values must lie in [0, 1] so
    /// the curve stays a function of time.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Self> {
        let in_range = |x: f32| (0.0..=1.0).contains(&x);
        (in_range(x1) && in_range(x2) && y1.is_finite() && y2.is_finite())
            .then_some(Self::new_unchecked(x1, y1, x2, y2))
    }

    const fn new_unchecked(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for linear `progress` in [0, 1].
    pub fn solve(&self, progress: f32) -> f32 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.parameter_for_x(progress);
        component(self.y1, self.y2, t)
    }

    // Newton-Raphson, falling back to bisection where the slope flattens.
    fn parameter_for_x(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = component(self.x1, self.x2, t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = derivative(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = t.clamp(lo, hi);
        for _ in 0..32 {
            let value = component(self.x1, self.x2, t);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

/// 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
fn component(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Easing of one keyframe segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bezier(CubicBezier),
}

impl EasingFunction {
    /// Bezier form of the curve; `None` for a linear ramp.
    pub fn curve(&self) -> Option<CubicBezier> {
        match self {
            Self::Linear => None,
            Self::Ease => Some(CubicBezier::EASE),
            Self::EaseIn => Some(CubicBezier::EASE_IN),
            Self::EaseOut => Some(CubicBezier::EASE_OUT),
            Self::EaseInOut => Some(CubicBezier::EASE_IN_OUT),
            Self::Bezier(curve) => Some(*curve),
        }
    }

    /// Eased progress at `t`, clamped to [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.curve() {
            Some(curve) => curve.solve(t),
            None => t,
        }
    }
}
