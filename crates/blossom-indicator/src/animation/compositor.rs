//! Rendering backend contract.
//!
//! The engine never talks to a native compositor directly. A host implements
//! [`Compositor`] for its backend and [`VisualTree`] for its current render
//! tree; [`crate::sim`] provides in-memory implementations of both.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::CompositorError;
use super::track::KeyframeTrack;
use super::types::{AnimationId, Channel, LayerRole, VisualHandle};

/// Whether the backend can natively delay an animation's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingCapability {
    /// Delays passed to [`Compositor::start_animation`] are honored.
    Native,
    /// Animations track time from creation; a delay must be realized by
    /// deferring creation itself.
    Manual,
}

/// Animation primitives of a rendering backend.
///
/// All methods are called on the UI thread.
pub trait Compositor {
    fn timing(&self) -> TimingCapability;

    /// Start `track` on `handle`, replacing whatever runs on that channel.
    fn start_animation(
        &mut self,
        handle: &VisualHandle,
        track: &KeyframeTrack,
        delay: Duration,
    ) -> Result<AnimationId, CompositorError>;

    /// Cancel the animation on `channel`. Cancelling an idle channel is not an error.
    fn stop_animation(
        &mut self,
        handle: &VisualHandle,
        channel: Channel,
    ) -> Result<(), CompositorError>;

    /// Pivot for scale and rotation, in the visual's own coordinates.
    fn set_center_point(
        &mut self,
        handle: &VisualHandle,
        x: f32,
        y: f32,
    ) -> Result<(), CompositorError>;

    /// Static opacity shown while no animation drives the channel.
    fn set_opacity(&mut self, handle: &VisualHandle, opacity: f32)
        -> Result<(), CompositorError>;
}

/// Access to the indicator's layers in the host's current render tree.
pub trait VisualTree {
    /// Current handle for `role`, or `None` if the layer does not exist.
    ///
    /// Must be answered from the live tree every time: a styling or layout
    /// pass may rebuild layers and invalidate earlier handles.
    fn resolve(&self, role: LayerRole) -> Option<VisualHandle>;
}

impl<T: VisualTree + ?Sized> VisualTree for &T {
    fn resolve(&self, role: LayerRole) -> Option<VisualHandle> {
        (**self).resolve(role)
    }
}
