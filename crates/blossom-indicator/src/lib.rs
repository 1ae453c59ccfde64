//! Animation orchestration engine for the Blossom status indicator.
//!
//! Maps an [`AnimationVariant`] to keyframe tracks, starts them on the dot,
//! ring and container layers of a host's render tree, compensates for
//! backends that cannot delay an animation's start, and tears every session
//! down cleanly on stop or restart.

pub mod animation;
pub mod sim;
pub mod tokens;

pub use animation::{
    AnimationVariant, Compositor, CompositorError, IndicatorAnimator, KeyframeTrack,
    RingAnimationRecord, StartRequest, TimingAdapter, TimingCapability, VisualTree,
};
pub use tokens::{ColorTag, SizeTag};
