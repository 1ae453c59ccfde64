//! Core animation types and data structures.
//!
//! This module defines the fundamental types shared by every engine component:
//! - `Channel`: The four animatable property channels of a visual layer
//! - `ChannelSet`: Capability set of channels a handle accepts
//! - `KeyValue`: Scalar or vector keyframe value
//! - `VisualHandle`: Opaque reference to one renderable layer
//! - `AnimationId`: Unique identifier for a started animation

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of a renderable layer in the host's visual tree.
///
/// Identities are issued by the tree; a rebuilt tree issues fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualId(pub u64);

/// Property channel of a visual layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Opacity,
    Scale,
    Translation,
    /// Rotation about the visual's center point, in degrees.
    Rotation,
}

impl Channel {
    /// Every channel, in cancellation order.
    pub const ALL: [Channel; 4] = [
        Channel::Opacity,
        Channel::Scale,
        Channel::Translation,
        Channel::Rotation,
    ];

    /// Returns the value shape keyframes on this channel must use.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Opacity | Self::Rotation => ValueKind::Scalar,
            Self::Scale | Self::Translation => ValueKind::Vector,
        }
    }

    /// Value a layer shows on this channel when nothing animates it.
    pub fn identity(&self) -> KeyValue {
        match self {
            Self::Opacity => KeyValue::Scalar(1.0),
            Self::Rotation => KeyValue::Scalar(0.0),
            Self::Scale => KeyValue::Vector([1.0, 1.0, 1.0]),
            Self::Translation => KeyValue::Vector([0.0, 0.0, 0.0]),
        }
    }

    /// Capability bit for this channel.
    pub fn flag(&self) -> ChannelSet {
        match self {
            Self::Opacity => ChannelSet::OPACITY,
            Self::Scale => ChannelSet::SCALE,
            Self::Translation => ChannelSet::TRANSLATION,
            Self::Rotation => ChannelSet::ROTATION,
        }
    }
}

bitflags::bitflags! {
    /// Channels a visual handle accepts animations on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ChannelSet: u8 {
        const OPACITY     = 0b0000_0001;
        const SCALE       = 0b0000_0010;
        /// Only ever enabled on the dot layer.
        const TRANSLATION = 0b0000_0100;
        const ROTATION    = 0b0000_1000;
    }
}

impl ChannelSet {
    /// Channels available on ring and container layers.
    pub const OVERLAY: ChannelSet = ChannelSet::OPACITY
        .union(ChannelSet::SCALE)
        .union(ChannelSet::ROTATION);
}

/// Shape of a keyframe value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Vector,
}

/// A keyframe value: scalar (opacity, rotation) or xyz vector (scale, translation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Scalar(f32),
    Vector([f32; 3]),
}

impl KeyValue {
    /// Uniform xy scale with z left at 1.
    pub fn scale(s: f32) -> Self {
        Self::Vector([s, s, 1.0])
    }

    /// Non-uniform xy scale with z left at 1.
    pub fn scale_xy(x: f32, y: f32) -> Self {
        Self::Vector([x, y, 1.0])
    }

    /// Planar translation.
    pub fn offset(x: f32, y: f32) -> Self {
        Self::Vector([x, y, 0.0])
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vector(_) => ValueKind::Vector,
        }
    }

    /// Try to extract a scalar value.
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract a vector value.
    pub fn as_vector(&self) -> Option<[f32; 3]> {
        match self {
            Self::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Vector(v) => v.iter().all(|c| c.is_finite()),
        }
    }
}

impl From<f32> for KeyValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v as f32)
    }
}

impl From<[f32; 3]> for KeyValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vector(v)
    }
}

/// Structural role of a layer inside the indicator's visual tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// The main centered circle.
    Dot,
    /// The n-th burst ring, in creation order.
    Ring(usize),
    /// The glow/orbit/beacon container.
    Container,
}

/// Opaque reference to one renderable layer.
///
/// Carries the channels the layer accepts so callers can skip unsupported
/// channels without asking the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle {
    pub id: VisualId,
    pub role: LayerRole,
    pub channels: ChannelSet,
}

impl VisualHandle {
    pub fn new(id: VisualId, role: LayerRole, channels: ChannelSet) -> Self {
        Self { id, role, channels }
    }

    /// Whether this layer accepts animations on `channel`.
    pub fn supports(&self, channel: Channel) -> bool {
        self.channels.contains(channel.flag())
    }
}
