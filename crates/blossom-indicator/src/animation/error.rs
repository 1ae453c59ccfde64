//! Error types for the animation engine.
//!
//! None of these reach the host: the controller logs and recovers from each
//! one locally.

use thiserror::Error;

use super::types::{Channel, ValueKind, VisualId};

/// Failures reported by a rendering backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositorError {
    /// The visual does not accept animations on this channel.
    #[error("visual {visual:?} does not support the {channel:?} channel")]
    UnsupportedChannel { visual: VisualId, channel: Channel },

    /// The visual is no longer part of the rendered tree.
    #[error("visual {0:?} is no longer in the tree")]
    StaleVisual(VisualId),

    /// The backend refused a track definition.
    #[error("invalid track: {0}")]
    InvalidTrack(#[from] TrackError),
}

/// Structural problems with a keyframe track.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("track `{0}` has no keyframes")]
    Empty(String),

    #[error("track `{name}` must start at fraction 0, found {found}")]
    BadStart { name: String, found: f32 },

    #[error("track `{name}` must end at fraction 1, found {found}")]
    BadEnd { name: String, found: f32 },

    #[error("track `{name}` fractions go backwards at keyframe {index}")]
    OutOfOrder { name: String, index: usize },

    #[error("track `{name}` keyframe {index} is {found:?}, channel expects {expected:?}")]
    WrongValueKind {
        name: String,
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("track `{name}` keyframe {index} has a non-finite value")]
    NonFinite { name: String, index: usize },

    #[error("track `{name}` has invalid duration {duration_ms}ms")]
    BadDuration { name: String, duration_ms: f32 },
}
