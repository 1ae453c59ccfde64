//! Virtual-time delay timer.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::animation::timing::{DeferredMotion, DelayTimer, Dispatcher};

#[derive(Debug)]
struct Pending {
    due_ms: u64,
    job: DeferredMotion,
}

#[derive(Debug)]
struct State {
    now_ms: u64,
    pending: Vec<Pending>,
}

/// [`DelayTimer`] driven by [`SimTimer::advance`] instead of the wall clock.
///
/// Clones share one clock, so a test can keep a handle while the timing
/// adapter owns another.
#[derive(Debug, Clone)]
pub struct SimTimer {
    state: Arc<Mutex<State>>,
    dispatcher: Dispatcher,
}

impl SimTimer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                now_ms: 0,
                pending: Vec::new(),
            })),
            dispatcher,
        }
    }

    /// Move the clock forward and post every job that became due, earliest first.
    pub fn advance(&self, ms: u64) {
        let due = {
            let mut state = self.lock();
            state.now_ms += ms;
            let now = state.now_ms;

            let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
                state.pending.drain(..).partition(|p| p.due_ms <= now);
            state.pending = waiting;
            due.sort_by_key(|p| p.due_ms);
            due
        };

        for pending in due {
            if pending.job.token.is_live() {
                self.dispatcher.post(pending.job);
            }
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.lock().now_ms
    }

    /// Jobs still waiting for their delay.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DelayTimer for SimTimer {
    fn defer(&self, delay: Duration, job: DeferredMotion) {
        let mut state = self.lock();
        let due_ms = state.now_ms + delay.as_millis() as u64;
        state.pending.push(Pending { due_ms, job });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::timing::{DispatchQueue, Motion, SessionToken};
    use crate::animation::types::{ChannelSet, LayerRole, VisualHandle, VisualId};

    fn job(id: u64, token: &SessionToken) -> DeferredMotion {
        let handle = VisualHandle::new(VisualId(id), LayerRole::Ring(0), ChannelSet::OVERLAY);
        DeferredMotion {
            token: token.clone(),
            motion: Motion::new(handle, Vec::new()),
        }
    }

    #[test]
    fn test_delivers_in_due_order() {
        let (dispatcher, queue) = DispatchQueue::channel();
        let timer = SimTimer::new(dispatcher);
        let token = SessionToken::new();

        timer.defer(Duration::from_millis(200), job(2, &token));
        timer.defer(Duration::from_millis(100), job(1, &token));
        timer.advance(150);
        assert_eq!(timer.pending(), 1);

        timer.advance(50);
        let ids: Vec<u64> = queue.poll().iter().map(|j| j.motion.handle.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(timer.now_ms(), 200);
    }

    #[test]
    fn test_revoked_jobs_are_dropped() {
        let (dispatcher, queue) = DispatchQueue::channel();
        let timer = SimTimer::new(dispatcher);
        let token = SessionToken::new();

        timer.defer(Duration::from_millis(10), job(1, &token));
        token.revoke();
        timer.advance(10);

        assert!(queue.poll().is_empty());
        assert_eq!(timer.pending(), 0);
    }
}
