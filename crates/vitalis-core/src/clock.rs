//! Host frame clock and frame request guards.
//!
//! The host owns one [`FrameClock`] and advances it once per display frame.
//! Components that are animating hold a [`FrameRequest`]; while any request
//! is alive the host keeps ticking. Dropping or cancelling the request
//! unschedules it, so an unmounted component can never be called back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Timing information for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Monotonic frame counter
    pub frame: u64,
    /// Time since the clock started, in milliseconds
    pub elapsed_ms: f64,
    /// Time since the previous frame, in milliseconds
    pub delta_ms: f64,
}

#[derive(Debug, Default)]
struct ClockState {
    active: BTreeSet<u64>,
    frame: u64,
    elapsed_ms: f64,
}

#[derive(Debug, Default)]
struct ClockInner {
    next_id: AtomicU64,
    state: Mutex<ClockState>,
}

impl ClockInner {
    fn state(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared frame scheduler. Cloning yields another handle to the same clock.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    inner: Arc<ClockInner>,
}

impl FrameClock {
    /// Create a clock at frame zero with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule frame callbacks until the returned guard is dropped.
    #[must_use]
    pub fn request(&self) -> FrameRequest {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.state().active.insert(id);
        trace!(id = id, "frame request registered");
        FrameRequest {
            inner: Arc::clone(&self.inner),
            id: Some(id),
        }
    }

    /// Number of live frame requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.state().active.len()
    }

    /// Whether any component still wants frames.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending() > 0
    }

    /// Advance by `delta_ms` and return the new frame's timing.
    pub fn advance(&self, delta_ms: f64) -> FrameTime {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        let mut state = self.inner.state();
        state.frame += 1;
        state.elapsed_ms += delta_ms;
        FrameTime {
            frame: state.frame,
            elapsed_ms: state.elapsed_ms,
            delta_ms,
        }
    }

    /// Timing of the most recent frame without advancing.
    #[must_use]
    pub fn now(&self) -> FrameTime {
        let state = self.inner.state();
        FrameTime {
            frame: state.frame,
            elapsed_ms: state.elapsed_ms,
            delta_ms: 0.0,
        }
    }
}

/// Guard for a scheduled frame callback.
///
/// Removed from the clock on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
pub struct FrameRequest {
    inner: Arc<ClockInner>,
    id: Option<u64>,
}

impl FrameRequest {
    /// Unschedule now.
    pub fn cancel(mut self) {
        self.release();
    }

    /// Whether this request is still scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id
            .is_some_and(|id| self.inner.state().active.contains(&id))
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.inner.state().active.remove(&id);
            trace!(id = id, "frame request released");
        }
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.release();
    }
}
