//! Session lifecycle controller.
//!
//! `IndicatorAnimator` is the only type a host talks to. It runs a two-state
//! machine (`Idle` and `Animating`) with three transitions:
//!
//! - **Start** resolves the dot, ring and container layers from the live
//!   tree, mints a new session token and starts every motion of the variant.
//!   Starting while a session is live stops that session first.
//! - **Stop** revokes the token, cancels every tracked handle and forgets
//!   the dot. It is safe to call in any state.
//! - **Restart** is Stop followed by Start against handles resolved afresh,
//!   replaying the cached ring records.
//!
//! Missing layers are skipped with a warning: an indicator that animates
//! less is acceptable, a host that crashes is not.

use std::time::Duration;

use blossom_config::TimingMode;
use tracing::{debug, warn};

use super::catalog;
use super::compositor::{Compositor, VisualTree};
use super::rings::{self, RingAnimationRecord};
use super::timing::{Motion, SessionToken, TimingAdapter};
use super::tracker::HandleTracker;
use super::types::{LayerRole, VisualHandle};
use super::variant::AnimationVariant;

/// Parameters of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartRequest {
    pub variant: AnimationVariant,
    pub size_px: f32,
    pub rings: Vec<RingAnimationRecord>,
}

impl StartRequest {
    /// Request with the variant's own ring recipe.
    pub fn new(variant: AnimationVariant, size_px: f32) -> Self {
        Self {
            variant,
            size_px,
            rings: RingAnimationRecord::from_recipe(size_px, catalog::ring_bursts(variant)),
        }
    }

    /// Replace the ring records, e.g. for a host-customised ring layout.
    pub fn with_rings(mut self, rings: Vec<RingAnimationRecord>) -> Self {
        self.rings = rings;
        self
    }
}

/// Drives the status indicator's animations on a [`Compositor`].
#[derive(Debug)]
pub struct IndicatorAnimator<C: Compositor> {
    compositor: C,
    timing: TimingAdapter,
    tracker: HandleTracker,
    token: SessionToken,
    dot: Option<VisualHandle>,
    variant: AnimationVariant,
    size_px: f32,
    rings: Vec<RingAnimationRecord>,
}

impl<C: Compositor> IndicatorAnimator<C> {
    pub fn new(compositor: C, timing: TimingAdapter) -> Self {
        Self {
            compositor,
            timing,
            tracker: HandleTracker::new(),
            token: SessionToken::revoked(),
            dot: None,
            variant: AnimationVariant::Default,
            size_px: 0.0,
            rings: Vec::new(),
        }
    }

    /// Animator whose manual delays run on worker threads.
    pub fn threaded(compositor: C, mode: TimingMode) -> Self {
        Self::new(compositor, TimingAdapter::threaded(mode))
    }

    /// Start a session. A live session is stopped first.
    pub fn start_dot_animation<T: VisualTree>(&mut self, tree: &T, request: StartRequest) {
        if self.is_animating() {
            debug!("start requested while animating; stopping previous session");
            self.stop_animation();
        }

        self.variant = request.variant;
        self.size_px = request.size_px;
        self.rings = request.rings;

        if !self.variant.animates() {
            debug!(variant = %self.variant, "variant is static; nothing to start");
            return;
        }

        self.token = SessionToken::new();
        debug!(variant = %self.variant, size_px = self.size_px, "starting session");

        let mut dot_tracks = Vec::new();
        let mut container_tracks = Vec::new();
        for (layer, track) in catalog::tracks_for(self.variant, self.size_px) {
            match layer {
                LayerRole::Dot => dot_tracks.push(track),
                LayerRole::Container => container_tracks.push(track),
                LayerRole::Ring(_) => {}
            }
        }

        self.dot = tree.resolve(LayerRole::Dot);
        match self.dot {
            Some(dot) => {
                let half = self.size_px / 2.0;
                let motion = Motion::new(dot, dot_tracks).center((half, half));
                self.schedule(motion, Duration::ZERO);
            }
            None => warn!("dot layer missing from tree; skipping dot animation"),
        }

        for record in self.rings.clone() {
            let Some(handle) = tree.resolve(record.element) else {
                warn!(layer = ?record.element, "ring layer missing from tree; skipping");
                continue;
            };
            let motion = Motion::new(handle, rings::expand_fade_tracks(&record.burst()))
                .center(record.center());
            self.schedule(motion, Duration::from_millis(u64::from(record.delay_ms)));
        }

        if let Some(container_motion) = self.variant.container_motion() {
            match tree.resolve(LayerRole::Container) {
                Some(handle) => {
                    let motion = Motion::new(handle, container_tracks)
                        .center(rings::container_center(container_motion, self.size_px))
                        .initial_opacity(rings::container_initial_opacity(container_motion));
                    self.schedule(motion, Duration::ZERO);
                }
                None => warn!("container layer missing from tree; skipping container animation"),
            }
        }
    }

    /// End the session. Idempotent.
    pub fn stop_animation(&mut self) {
        self.token.revoke();
        self.tracker.stop_all(&mut self.compositor);
        self.dot = None;
        debug!(variant = %self.variant, "session stopped");
    }

    /// Stop, then start again against the current tree.
    ///
    /// Cached ring records are replayed unchanged when the variant stays the
    /// same; a new size only updates their `size_at_creation`. A new variant
    /// brings its own recipe.
    pub fn restart_animations<T: VisualTree>(
        &mut self,
        tree: &T,
        variant: Option<AnimationVariant>,
        size_px: Option<f32>,
    ) {
        let variant = variant.unwrap_or(self.variant);
        let size_px = size_px.unwrap_or(self.size_px);

        let rings = if variant != self.variant {
            RingAnimationRecord::from_recipe(size_px, catalog::ring_bursts(variant))
        } else if size_px != self.size_px {
            self.rings
                .iter()
                .map(|r| RingAnimationRecord {
                    size_at_creation: size_px,
                    ..*r
                })
                .collect()
        } else {
            self.rings.clone()
        };

        self.stop_animation();
        self.start_dot_animation(
            tree,
            StartRequest {
                variant,
                size_px,
                rings,
            },
        );
    }

    /// Host attached the indicator to a live tree.
    pub fn on_attached<T: VisualTree>(&mut self, tree: &T, variant: AnimationVariant, size_px: f32) {
        self.start_dot_animation(tree, StartRequest::new(variant, size_px));
    }

    /// Host detached the indicator.
    pub fn on_detached(&mut self) {
        self.stop_animation();
    }

    /// Host changed variant, size or theme and rebuilt its tree.
    pub fn on_variant_or_size_changed<T: VisualTree>(
        &mut self,
        tree: &T,
        variant: AnimationVariant,
        size_px: f32,
    ) {
        self.restart_animations(tree, Some(variant), Some(size_px));
    }

    /// Start every deferred motion whose delay has elapsed.
    ///
    /// Must be called on the UI thread, typically once per frame. Returns
    /// the number of motions started.
    pub fn pump(&mut self) -> usize {
        self.timing.drain(&mut self.compositor, &mut self.tracker)
    }

    pub fn is_animating(&self) -> bool {
        self.token.is_live()
    }

    pub fn variant(&self) -> AnimationVariant {
        self.variant
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn dot(&self) -> Option<VisualHandle> {
        self.dot
    }

    pub fn tracked_handles(&self) -> &[VisualHandle] {
        self.tracker.handles()
    }

    pub fn ring_records(&self) -> &[RingAnimationRecord] {
        &self.rings
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    fn schedule(&mut self, motion: Motion, delay: Duration) {
        self.timing.schedule(
            &mut self.compositor,
            &mut self.tracker,
            &self.token,
            motion,
            delay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::Channel;
    use crate::sim::{SimCompositor, SimTimer, SimTree};
    use crate::animation::timing::DispatchQueue;

    fn animator(compositor: SimCompositor) -> (IndicatorAnimator<SimCompositor>, SimTimer) {
        let (dispatcher, queue) = DispatchQueue::channel();
        let timer = SimTimer::new(dispatcher);
        let timing = TimingAdapter::new(TimingMode::Auto, timer.clone(), queue);
        (IndicatorAnimator::new(compositor, timing), timer)
    }

    #[test]
    fn test_start_request_uses_recipe() {
        let request = StartRequest::new(AnimationVariant::Ripple, 20.0);
        assert_eq!(request.rings.len(), 3);
        assert_eq!(request.rings[2].delay_ms, 800);
        assert!(request.rings.iter().all(|r| r.size_at_creation == 20.0));

        let custom = request.with_rings(Vec::new());
        assert!(custom.rings.is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let tree = SimTree::new(0, false);
        let (mut animator, _) = animator(SimCompositor::native());

        animator.stop_animation();
        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Pulse, 24.0));
        animator.stop_animation();
        animator.stop_animation();

        assert!(!animator.is_animating());
        assert!(animator.tracked_handles().is_empty());
        assert_eq!(animator.dot(), None);
    }

    #[test]
    fn test_static_variants_start_nothing() {
        let tree = SimTree::new(0, false);
        for variant in [AnimationVariant::Default, AnimationVariant::Battery] {
            let (mut animator, _) = animator(SimCompositor::native());
            animator.start_dot_animation(&tree, StartRequest::new(variant, 20.0));
            assert!(!animator.is_animating());
            assert!(animator.tracked_handles().is_empty());
            assert_eq!(animator.compositor().start_count(), 0);
        }
    }

    #[test]
    fn test_stale_ring_does_not_block_session() {
        let tree = SimTree::new(2, false);
        let dot = tree.resolve(LayerRole::Dot).unwrap();
        let stale = tree.resolve(LayerRole::Ring(0)).unwrap();
        let live = tree.resolve(LayerRole::Ring(1)).unwrap();
        let (mut animator, _) = animator(SimCompositor::native());

        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Splash, 20.0));
        animator.compositor_mut().retire(stale.id);
        animator.stop_animation();

        // One rejected stop per overlay channel; the other layers stop cleanly.
        assert_eq!(animator.compositor().stale_calls(), 3);
        assert_eq!(animator.compositor().running(dot.id), 0);
        assert_eq!(animator.compositor().running(live.id), 0);
        assert!(animator.tracked_handles().is_empty());
        assert!(!animator.is_animating());

        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Splash, 20.0));
        assert!(animator.is_animating());
        assert!(animator.compositor().running(dot.id) > 0);
        assert_eq!(animator.compositor().running(live.id), 2);
        assert_eq!(animator.compositor().running(stale.id), 0);
        assert!(animator.compositor().stale_calls() > 3);
    }

    #[test]
    fn test_missing_dot_keeps_rings() {
        let mut tree = SimTree::new(1, false);
        tree.remove(LayerRole::Dot);
        let (mut animator, _) = animator(SimCompositor::native());

        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Ping, 20.0));

        assert!(animator.is_animating());
        assert_eq!(animator.dot(), None);
        assert_eq!(animator.tracked_handles().len(), 1);
        assert_eq!(animator.tracked_handles()[0].role, LayerRole::Ring(0));
    }

    #[test]
    fn test_restart_with_new_size_keeps_ring_parameters() {
        let tree = SimTree::new(2, false);
        let (mut animator, _) = animator(SimCompositor::native());
        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Sonar, 20.0));
        let before = animator.ring_records().to_vec();

        animator.restart_animations(&tree, None, Some(26.0));

        let after = animator.ring_records();
        assert_eq!(after.len(), before.len());
        for (a, b) in before.iter().zip(after) {
            assert_eq!(b.size_at_creation, 26.0);
            assert_eq!(a.burst(), b.burst());
        }
    }

    #[test]
    fn test_restart_with_new_variant_uses_its_recipe() {
        let tree = SimTree::new(3, true);
        let (mut animator, _) = animator(SimCompositor::native());
        animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Ping, 20.0));

        animator.restart_animations(&tree, Some(AnimationVariant::Glow), None);

        assert_eq!(animator.variant(), AnimationVariant::Glow);
        assert!(animator.ring_records().is_empty());
        let container = tree.resolve(LayerRole::Container).unwrap();
        assert!(animator.compositor().sample(container.id, Channel::Opacity).is_some());
    }

    #[test]
    fn test_restart_to_static_variant_stops() {
        let tree = SimTree::new(0, false);
        let (mut animator, _) = animator(SimCompositor::native());
        animator.on_attached(&tree, AnimationVariant::Pulse, 20.0);
        assert!(animator.is_animating());

        animator.on_variant_or_size_changed(&tree, AnimationVariant::WifiSignal, 20.0);
        assert!(!animator.is_animating());
        assert!(animator.tracked_handles().is_empty());

        animator.on_detached();
        assert!(!animator.is_animating());
    }
}
