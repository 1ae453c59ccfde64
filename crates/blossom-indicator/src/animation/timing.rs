//! Delayed-start compensation for backends without native start delays.
//!
//! On a [`TimingCapability::Native`] backend a delay is handed straight to
//! the compositor. On a manual backend an animation starts counting the
//! moment it is created, so a delayed motion is not created at all until the
//! delay has elapsed:
//!
//! ```text
//! schedule ──► DelayTimer (worker) ──► DispatchQueue ──► drain (UI thread)
//!                  │ token dead?                            │ token dead?
//!                  └─► drop                                 └─► drop
//! ```
//!
//! Every session carries its own [`SessionToken`]. Stopping a session revokes
//! its token, which turns every in-flight continuation into a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blossom_config::TimingMode;
use tracing::{debug, trace, warn};

use super::compositor::{Compositor, TimingCapability};
use super::track::KeyframeTrack;
use super::tracker::HandleTracker;
use super::types::VisualHandle;

/// Liveness flag shared between a session and its deferred work.
#[derive(Debug, Clone)]
pub struct SessionToken(Arc<AtomicBool>);

impl SessionToken {
    /// A fresh, live token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// A token that was never live.
    pub fn revoked() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::revoked()
    }
}

/// Everything needed to animate one layer: pivot, initial opacity and tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub handle: VisualHandle,
    pub center: Option<(f32, f32)>,
    pub initial_opacity: Option<f32>,
    pub tracks: Vec<KeyframeTrack>,
}

impl Motion {
    pub fn new(handle: VisualHandle, tracks: Vec<KeyframeTrack>) -> Self {
        Self {
            handle,
            center: None,
            initial_opacity: None,
            tracks,
        }
    }

    pub fn center(mut self, (x, y): (f32, f32)) -> Self {
        self.center = Some((x, y));
        self
    }

    pub fn initial_opacity(mut self, opacity: Option<f32>) -> Self {
        self.initial_opacity = opacity;
        self
    }
}

/// A motion waiting for its delay, bound to the session that scheduled it.
#[derive(Debug, Clone)]
pub struct DeferredMotion {
    pub token: SessionToken,
    pub motion: Motion,
}

static_assertions::assert_impl_all!(DeferredMotion: Send);
static_assertions::assert_impl_all!(SessionToken: Send, Sync);

/// Sending half of a [`DispatchQueue`], handed to delay timers.
#[derive(Debug, Clone)]
pub struct Dispatcher(Sender<DeferredMotion>);

impl Dispatcher {
    /// Post a due motion to the UI thread. Returns false if the queue is gone.
    pub fn post(&self, job: DeferredMotion) -> bool {
        self.0.send(job).is_ok()
    }
}

/// Due motions waiting to be started on the UI thread.
#[derive(Debug)]
pub struct DispatchQueue {
    receiver: Receiver<DeferredMotion>,
}

impl DispatchQueue {
    pub fn channel() -> (Dispatcher, DispatchQueue) {
        let (tx, rx) = mpsc::channel();
        (Dispatcher(tx), DispatchQueue { receiver: rx })
    }

    /// Take every motion delivered so far without blocking.
    pub fn poll(&self) -> Vec<DeferredMotion> {
        self.receiver.try_iter().collect()
    }
}

/// Single-shot alarm: deliver `job` to the dispatch queue after `delay`.
pub trait DelayTimer: Send {
    fn defer(&self, delay: Duration, job: DeferredMotion);
}

/// Sleeps on a worker thread per job.
#[derive(Debug, Clone)]
pub struct ThreadTimer {
    dispatcher: Dispatcher,
}

impl ThreadTimer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

impl DelayTimer for ThreadTimer {
    fn defer(&self, delay: Duration, job: DeferredMotion) {
        let dispatcher = self.dispatcher.clone();
        let spawned = thread::Builder::new()
            .name("blossom-delay".into())
            .spawn(move || {
                thread::sleep(delay);
                if !job.token.is_live() {
                    return;
                }
                let visual = job.motion.handle.id;
                if !dispatcher.post(job) {
                    trace!(?visual, "dispatch queue closed; dropping deferred motion");
                }
            });

        if let Err(err) = spawned {
            warn!(%err, "failed to spawn delay thread; dropping deferred motion");
        }
    }
}

/// Decides between native and manual scheduling and runs due continuations.
pub struct TimingAdapter {
    mode: TimingMode,
    timer: Box<dyn DelayTimer>,
    queue: DispatchQueue,
}

impl std::fmt::Debug for TimingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingAdapter")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl TimingAdapter {
    pub fn new(mode: TimingMode, timer: impl DelayTimer + 'static, queue: DispatchQueue) -> Self {
        Self {
            mode,
            timer: Box::new(timer),
            queue,
        }
    }

    /// Adapter backed by a [`ThreadTimer`].
    pub fn threaded(mode: TimingMode) -> Self {
        let (dispatcher, queue) = DispatchQueue::channel();
        Self::new(mode, ThreadTimer::new(dispatcher), queue)
    }

    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    /// Whether delays must be realized by deferral on this backend.
    pub fn is_manual(&self, backend: TimingCapability) -> bool {
        match self.mode {
            TimingMode::Auto => backend == TimingCapability::Manual,
            TimingMode::Manual => true,
            TimingMode::Native => false,
        }
    }

    /// Start `motion` now, or defer it whole when the backend cannot delay.
    ///
    /// Nothing happens if `token` is already revoked.
    pub fn schedule<C: Compositor>(
        &self,
        compositor: &mut C,
        tracker: &mut HandleTracker,
        token: &SessionToken,
        motion: Motion,
        delay: Duration,
    ) {
        if !token.is_live() {
            return;
        }

        if !delay.is_zero() && self.is_manual(compositor.timing()) {
            debug!(
                visual = ?motion.handle.id,
                delay_ms = delay.as_millis() as u64,
                "deferring motion until delay elapses"
            );
            self.timer.defer(
                delay,
                DeferredMotion {
                    token: token.clone(),
                    motion,
                },
            );
            return;
        }

        start_motion(compositor, tracker, motion, delay);
    }

    /// Run every delivered continuation on the calling thread.
    ///
    /// Returns the number of motions started. Continuations whose session
    /// was stopped are dropped without touching any visual.
    pub fn drain<C: Compositor>(&self, compositor: &mut C, tracker: &mut HandleTracker) -> usize {
        let mut started = 0;
        for job in self.queue.poll() {
            if !job.token.is_live() {
                debug!(visual = ?job.motion.handle.id, "dropping continuation of stopped session");
                continue;
            }
            start_motion(compositor, tracker, job.motion, Duration::ZERO);
            started += 1;
        }
        started
    }
}

/// Track the handle, apply pivot and opacity, then start each supported track.
fn start_motion<C: Compositor>(
    compositor: &mut C,
    tracker: &mut HandleTracker,
    motion: Motion,
    delay: Duration,
) {
    let handle = motion.handle;
    tracker.track(handle);

    if let Some((x, y)) = motion.center {
        if let Err(err) = compositor.set_center_point(&handle, x, y) {
            warn!(visual = ?handle.id, %err, "failed to set center point");
        }
    }
    if let Some(opacity) = motion.initial_opacity {
        if let Err(err) = compositor.set_opacity(&handle, opacity) {
            warn!(visual = ?handle.id, %err, "failed to set initial opacity");
        }
    }

    for track in &motion.tracks {
        if !handle.supports(track.channel) {
            trace!(visual = ?handle.id, channel = ?track.channel, "channel unsupported, skipping");
            continue;
        }
        match compositor.start_animation(&handle, track, delay) {
            Ok(id) => trace!(visual = ?handle.id, track = %track.name, ?id, "started"),
            Err(err) => warn!(visual = ?handle.id, track = %track.name, %err, "failed to start"),
        }
    }
}
