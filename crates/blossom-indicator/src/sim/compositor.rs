//! In-memory compositor.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::animation::compositor::{Compositor, TimingCapability};
use crate::animation::error::CompositorError;
use crate::animation::track::KeyframeTrack;
use crate::animation::types::{AnimationId, Channel, KeyValue, VisualHandle, VisualId};

/// State of an animation running on the simulated compositor.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum AnimationState {
    /// Waiting out a native start delay.
    Pending,
    Running,
    Finished,
}

/// One animation bound to a (visual, channel) pair.
#[derive(Debug, Clone)]
pub struct ActiveAnimation {
    pub id: AnimationId,
    pub track: KeyframeTrack,
    /// Time since creation, delay included.
    pub elapsed_ms: f32,
    pub delay_ms: f32,
    pub state: AnimationState,
}

impl ActiveAnimation {
    fn new(track: KeyframeTrack, delay_ms: f32) -> Self {
        let state = if delay_ms > 0.0 {
            AnimationState::Pending
        } else {
            AnimationState::Running
        };
        Self {
            id: AnimationId::new(),
            track,
            elapsed_ms: 0.0,
            delay_ms,
            state,
        }
    }

    /// Advance by `delta_ms`. Returns `true` while the animation is active.
    fn update(&mut self, delta_ms: f32) -> bool {
        if self.state == AnimationState::Finished {
            return false;
        }

        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < self.delay_ms {
            return true;
        }
        self.state = AnimationState::Running;

        let iteration = self.active_elapsed() / self.track.duration_ms;
        if !self.track.iterations.should_continue(iteration) {
            self.state = AnimationState::Finished;
            return false;
        }
        true
    }

    fn active_elapsed(&self) -> f32 {
        (self.elapsed_ms - self.delay_ms).max(0.0)
    }

    /// Current value; `None` while the start delay has not elapsed.
    pub fn current_value(&self) -> Option<KeyValue> {
        match self.state {
            AnimationState::Pending => None,
            AnimationState::Running | AnimationState::Finished => {
                self.track.sample(self.active_elapsed())
            }
        }
    }
}

/// Reference [`Compositor`] that evaluates tracks in virtual time.
///
/// A later start on the same (visual, channel) replaces the earlier one, as
/// native compositors do. A manual-timing instance ignores start delays
/// entirely: an animation handed a delay starts counting immediately.
///
/// Visuals passed to [`retire`](Self::retire) are gone from the rendered
/// tree; every later call on them fails with [`CompositorError::StaleVisual`].
#[derive(Debug)]
pub struct SimCompositor {
    timing: TimingCapability,
    animations: HashMap<(VisualId, Channel), ActiveAnimation>,
    centers: HashMap<VisualId, (f32, f32)>,
    opacities: HashMap<VisualId, f32>,
    retired: HashSet<VisualId>,
    start_count: usize,
    stop_calls: usize,
    failed_calls: usize,
    stale_calls: usize,
}

impl SimCompositor {
    pub fn new(timing: TimingCapability) -> Self {
        Self {
            timing,
            animations: HashMap::new(),
            centers: HashMap::new(),
            opacities: HashMap::new(),
            retired: HashSet::new(),
            start_count: 0,
            stop_calls: 0,
            failed_calls: 0,
            stale_calls: 0,
        }
    }

    /// Backend that honors start delays.
    pub fn native() -> Self {
        Self::new(TimingCapability::Native)
    }

    /// Backend that silently drops start delays.
    pub fn manual() -> Self {
        Self::new(TimingCapability::Manual)
    }

    /// Tear `visual` down, as a host rebuild does to replaced elements.
    pub fn retire(&mut self, visual: VisualId) {
        self.animations.retain(|(v, _), _| *v != visual);
        self.centers.remove(&visual);
        self.opacities.remove(&visual);
        self.retired.insert(visual);
    }

    /// Advance every animation by `delta_ms`.
    pub fn advance(&mut self, delta_ms: f32) {
        for animation in self.animations.values_mut() {
            animation.update(delta_ms);
        }
    }

    /// Value currently shown by the animation on (`visual`, `channel`).
    pub fn sample(&self, visual: VisualId, channel: Channel) -> Option<KeyValue> {
        self.animations
            .get(&(visual, channel))
            .and_then(ActiveAnimation::current_value)
    }

    /// Like [`sample`](Self::sample), but falls back to the static value.
    pub fn value_or_identity(&self, visual: VisualId, channel: Channel) -> KeyValue {
        if let Some(value) = self.sample(visual, channel) {
            return value;
        }
        match (channel, self.opacities.get(&visual)) {
            (Channel::Opacity, Some(&opacity)) => KeyValue::Scalar(opacity),
            _ => channel.identity(),
        }
    }

    pub fn animation(&self, visual: VisualId, channel: Channel) -> Option<&ActiveAnimation> {
        self.animations.get(&(visual, channel))
    }

    /// Number of channels of `visual` with an animation attached.
    pub fn running(&self, visual: VisualId) -> usize {
        self.animations.keys().filter(|(v, _)| *v == visual).count()
    }

    pub fn center_point(&self, visual: VisualId) -> Option<(f32, f32)> {
        self.centers.get(&visual).copied()
    }

    pub fn opacity(&self, visual: VisualId) -> Option<f32> {
        self.opacities.get(&visual).copied()
    }

    /// Total successful `start_animation` calls.
    pub fn start_count(&self) -> usize {
        self.start_count
    }

    /// Total `stop_animation` calls, failed ones included.
    pub fn stop_calls(&self) -> usize {
        self.stop_calls
    }

    /// Calls rejected because the channel is unsupported.
    pub fn failed_calls(&self) -> usize {
        self.failed_calls
    }

    /// Calls rejected because the visual was retired.
    pub fn stale_calls(&self) -> usize {
        self.stale_calls
    }

    fn check_live(&mut self, handle: &VisualHandle) -> Result<(), CompositorError> {
        if !self.retired.contains(&handle.id) {
            return Ok(());
        }
        self.stale_calls += 1;
        Err(CompositorError::StaleVisual(handle.id))
    }

    fn check(&mut self, handle: &VisualHandle, channel: Channel) -> Result<(), CompositorError> {
        self.check_live(handle)?;
        if handle.supports(channel) {
            return Ok(());
        }
        self.failed_calls += 1;
        Err(CompositorError::UnsupportedChannel {
            visual: handle.id,
            channel,
        })
    }
}

impl Compositor for SimCompositor {
    fn timing(&self) -> TimingCapability {
        self.timing
    }

    fn start_animation(
        &mut self,
        handle: &VisualHandle,
        track: &KeyframeTrack,
        delay: Duration,
    ) -> Result<AnimationId, CompositorError> {
        self.check(handle, track.channel)?;
        track.validate()?;

        let delay_ms = match self.timing {
            TimingCapability::Native => delay.as_millis() as f32,
            TimingCapability::Manual => 0.0,
        };
        let animation = ActiveAnimation::new(track.clone(), delay_ms);
        let id = animation.id;
        self.animations.insert((handle.id, track.channel), animation);
        self.start_count += 1;
        Ok(id)
    }

    fn stop_animation(
        &mut self,
        handle: &VisualHandle,
        channel: Channel,
    ) -> Result<(), CompositorError> {
        self.stop_calls += 1;
        self.check(handle, channel)?;
        self.animations.remove(&(handle.id, channel));
        Ok(())
    }

    fn set_center_point(
        &mut self,
        handle: &VisualHandle,
        x: f32,
        y: f32,
    ) -> Result<(), CompositorError> {
        self.check_live(handle)?;
        self.centers.insert(handle.id, (x, y));
        Ok(())
    }

    fn set_opacity(&mut self, handle: &VisualHandle, opacity: f32) -> Result<(), CompositorError> {
        self.check_live(handle)?;
        self.opacities.insert(handle.id, opacity);
        Ok(())
    }
}
