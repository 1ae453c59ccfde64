//! Animation orchestration for the status indicator.
//!
//! This module provides:
//! - **Tracks**: keyframe sequences for one channel of one layer
//! - **Catalog**: the variant dispatch table of dot tracks and ring recipes
//! - **Rings**: expand-fade, glow, orbit and beacon motions for secondary layers
//! - **Timing**: delayed-start compensation for manual-timing backends
//! - **Controller**: the start / stop / restart session lifecycle
//!
//! # Architecture
//!
//! ```text
//! IndicatorAnimator
//!   ├── catalog (variant → tracks, ring recipes)
//!   ├── TimingAdapter (native delay | deferred creation)
//!   └── HandleTracker (every handle of the live session)
//!         └── Compositor (host backend)
//! ```

pub mod catalog;
pub mod compositor;
pub mod controller;
pub mod easing;
pub mod error;
pub mod interpolate;
pub mod rings;
pub mod timing;
pub mod track;
pub mod tracker;
pub mod types;
pub mod variant;

pub use compositor::{Compositor, TimingCapability, VisualTree};
pub use controller::{IndicatorAnimator, StartRequest};
pub use easing::{CubicBezier, EasingFunction};
pub use error::{CompositorError, TrackError};
pub use interpolate::Interpolate;
pub use rings::{RingAnimationRecord, RingBurst};
pub use timing::{
    DeferredMotion, DelayTimer, DispatchQueue, Dispatcher, Motion, SessionToken, ThreadTimer,
    TimingAdapter,
};
pub use track::{Iterations, Keyframe, KeyframeTrack};
pub use tracker::HandleTracker;
pub use types::{
    AnimationId, Channel, ChannelSet, KeyValue, LayerRole, ValueKind, VisualHandle, VisualId,
};
pub use variant::{AnimationVariant, ContainerMotion, UnknownVariant};
