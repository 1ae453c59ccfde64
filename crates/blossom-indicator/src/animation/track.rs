//! Keyframe tracks: timed sequences of values for one channel of one layer.
//!
//! A track is pure data. Backends turn it into a native animation; the
//! [`sim`](crate::sim) backend evaluates it directly with [`KeyframeTrack::value_at`].
//!
//! ```
//! use blossom_indicator::animation::{Channel, KeyframeTrack};
//!
//! let pulse = KeyframeTrack::new("pulse", Channel::Opacity)
//!     .duration_ms(1500.0)
//!     .keyframe(0.0, 1.0)
//!     .keyframe(0.5, 0.4)
//!     .keyframe(1.0, 1.0);
//! assert!(pulse.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::error::TrackError;
use super::interpolate::Interpolate;
use super::types::{Channel, KeyValue};

/// How often a track repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Iterations {
    /// Loop until cancelled.
    #[default]
    Forever,
    /// Play a single pass, then hold nothing.
    Once,
}

impl Iterations {
    /// Check if playback continues at the given (fractional) iteration.
    pub fn should_continue(&self, current_iteration: f32) -> bool {
        match self {
            Self::Forever => true,
            Self::Once => current_iteration < 1.0,
        }
    }
}

/// A single point on a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the track timeline (0.0 to 1.0).
    pub fraction: f32,
    pub value: KeyValue,
    /// Easing used when interpolating TO this keyframe.
    /// If None, the track's default easing applies.
    pub easing: Option<EasingFunction>,
}

/// One animated channel: keyframes, duration and loop behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    pub name: String,
    pub channel: Channel,
    /// Keyframes sorted by fraction.
    pub keyframes: Vec<Keyframe>,
    /// Duration of one iteration in milliseconds.
    pub duration_ms: f32,
    pub iterations: Iterations,
    pub default_easing: EasingFunction,
}

impl KeyframeTrack {
    /// Create an empty forever-looping track with the default easing.
    pub fn new(name: impl Into<String>, channel: Channel) -> Self {
        Self {
            name: name.into(),
            channel,
            keyframes: Vec::new(),
            duration_ms: 0.0,
            iterations: Iterations::Forever,
            default_easing: EasingFunction::Ease,
        }
    }

    pub fn duration_ms(mut self, duration: f32) -> Self {
        self.duration_ms = duration;
        self
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn default_easing(mut self, easing: EasingFunction) -> Self {
        self.default_easing = easing;
        self
    }

    /// Add a keyframe at `fraction`, keeping keyframes sorted.
    pub fn keyframe(self, fraction: f32, value: impl Into<KeyValue>) -> Self {
        self.insert(Keyframe {
            fraction,
            value: value.into(),
            easing: None,
        })
    }

    /// Add a keyframe with its own easing curve.
    pub fn keyframe_eased(
        self,
        fraction: f32,
        value: impl Into<KeyValue>,
        easing: EasingFunction,
    ) -> Self {
        self.insert(Keyframe {
            fraction,
            value: value.into(),
            easing: Some(easing),
        })
    }

    fn insert(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        // Stable sort: equal fractions keep insertion order.
        self.keyframes.sort_by(|a, b| {
            a.fraction
                .partial_cmp(&b.fraction)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Check the track is well formed.
    ///
    /// Fractions must start at 0, end at 1 and never decrease; every value
    /// must be finite and match the channel's value shape; the duration must
    /// be finite and positive.
    pub fn validate(&self) -> Result<(), TrackError> {
        let name = || self.name.clone();

        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(TrackError::BadDuration {
                name: name(),
                duration_ms: self.duration_ms,
            });
        }

        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TrackError::Empty(name())),
        };
        if first.fraction != 0.0 {
            return Err(TrackError::BadStart {
                name: name(),
                found: first.fraction,
            });
        }
        if last.fraction != 1.0 {
            return Err(TrackError::BadEnd {
                name: name(),
                found: last.fraction,
            });
        }

        let expected = self.channel.value_kind();
        let mut previous = 0.0;
        for (index, kf) in self.keyframes.iter().enumerate() {
            if kf.fraction < previous {
                return Err(TrackError::OutOfOrder { name: name(), index });
            }
            previous = kf.fraction;

            if kf.value.kind() != expected {
                return Err(TrackError::WrongValueKind {
                    name: name(),
                    index,
                    expected,
                    found: kf.value.kind(),
                });
            }
            if !kf.value.is_finite() {
                return Err(TrackError::NonFinite { name: name(), index });
            }
        }

        Ok(())
    }

    /// Find the keyframes surrounding `fraction`.
    ///
    /// Returns (from, to, local_progress) where local_progress is 0.0-1.0
    /// between the two keyframes.
    pub fn find_keyframes(&self, fraction: f32) -> Option<(&Keyframe, &Keyframe, f32)> {
        if self.keyframes.is_empty() {
            return None;
        }

        let fraction = fraction.clamp(0.0, 1.0);

        let mut from_idx = 0;
        let mut to_idx = 0;
        for (i, kf) in self.keyframes.iter().enumerate() {
            if kf.fraction <= fraction {
                from_idx = i;
            }
            if kf.fraction >= fraction {
                to_idx = i;
                break;
            }
            to_idx = i;
        }

        let from_kf = &self.keyframes[from_idx];
        let to_kf = &self.keyframes[to_idx];

        let range = to_kf.fraction - from_kf.fraction;
        let local_progress = if from_idx == to_idx || range <= 0.0 {
            0.0
        } else {
            (fraction - from_kf.fraction) / range
        };

        Some((from_kf, to_kf, local_progress))
    }

    /// Value of the track at `fraction` of one iteration.
    pub fn value_at(&self, fraction: f32) -> Option<KeyValue> {
        let (from_kf, to_kf, local_progress) = self.find_keyframes(fraction)?;
        let easing = to_kf.easing.unwrap_or(self.default_easing);
        Some(from_kf.value.interpolate(&to_kf.value, easing.evaluate(local_progress)))
    }

    /// Fraction of the current iteration after `elapsed_ms` of playback.
    ///
    /// A finished single-pass track reports 1.0.
    pub fn fraction_at(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }

        let progress = elapsed_ms.max(0.0) / self.duration_ms;
        if !self.iterations.should_continue(progress) {
            return 1.0;
        }
        progress.fract()
    }

    /// Value of the track after `elapsed_ms` of playback.
    pub fn sample(&self, elapsed_ms: f32) -> Option<KeyValue> {
        self.value_at(self.fraction_at(elapsed_ms))
    }
}
