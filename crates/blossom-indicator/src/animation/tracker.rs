//! Bookkeeping of every visual animated during the current session.

use tracing::{trace, warn};

use super::compositor::Compositor;
use super::types::{Channel, VisualHandle};

/// Handles touched by the live session, in the order they were first tracked.
#[derive(Debug, Default)]
pub struct HandleTracker {
    handles: Vec<VisualHandle>,
}

impl HandleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `handle` to the live set. Tracking the same visual twice is a no-op.
    pub fn track(&mut self, handle: VisualHandle) {
        if !self.handles.iter().any(|h| h.id == handle.id) {
            self.handles.push(handle);
        }
    }

    /// Cancel every channel of every tracked handle, then forget them all.
    ///
    /// Channels a handle does not support are skipped. A failed cancellation
    /// is logged and never stops the sweep; the set is cleared regardless.
    pub fn stop_all<C: Compositor>(&mut self, compositor: &mut C) {
        for handle in self.handles.drain(..) {
            for channel in Channel::ALL {
                if !handle.supports(channel) {
                    trace!(visual = ?handle.id, ?channel, "skipping unsupported channel");
                    continue;
                }
                if let Err(err) = compositor.stop_animation(&handle, channel) {
                    warn!(visual = ?handle.id, ?channel, %err, "failed to cancel animation");
                }
            }
        }
    }

    pub fn handles(&self) -> &[VisualHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::{ChannelSet, LayerRole, VisualId};
    use crate::sim::SimCompositor;

    #[test]
    fn test_track_is_idempotent() {
        let mut tracker = HandleTracker::new();
        let dot = VisualHandle::new(VisualId(1), LayerRole::Dot, ChannelSet::all());
        tracker.track(dot);
        tracker.track(dot);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_stop_all_skips_unsupported_channels_and_clears() {
        let mut compositor = SimCompositor::native();
        let mut tracker = HandleTracker::new();
        let dot = VisualHandle::new(VisualId(1), LayerRole::Dot, ChannelSet::all());
        let ring = VisualHandle::new(VisualId(2), LayerRole::Ring(0), ChannelSet::OVERLAY);
        tracker.track(dot);
        tracker.track(ring);

        tracker.stop_all(&mut compositor);

        assert!(tracker.is_empty());
        // Translation is never requested on the ring, so no call fails.
        assert_eq!(compositor.failed_calls(), 0);
        assert_eq!(compositor.stop_calls(), 4 + 3);
    }

    #[test]
    fn test_stop_all_on_empty_tracker() {
        let mut compositor = SimCompositor::native();
        let mut tracker = HandleTracker::new();
        tracker.stop_all(&mut compositor);
        assert_eq!(compositor.stop_calls(), 0);
    }
}
