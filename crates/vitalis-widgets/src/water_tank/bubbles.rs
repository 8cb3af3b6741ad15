//! Bubble burst: three bubbles rise, drift and fade with staggered starts
//! whenever the trigger flips on.

use tracing::debug;
use vitalis_core::animation::interpolate;
use vitalis_core::{AnimatedValue, BubbleConfig, FrameClock, FrameRequest, Progress, Track};

const OPACITY_IN: [f64; 3] = [0.0, 0.2, 1.0];
const OPACITY_OUT: [f64; 3] = [0.0, 1.0, 0.0];
const SCALE_IN: [f64; 3] = [0.0, 0.2, 1.0];
const SCALE_OUT: [f64; 3] = [0.5, 1.0, 1.0];
const DRIFT_IN: [f64; 3] = [0.0, 0.5, 1.0];
// Horizontal sway per bubble, in points.
const DRIFT_OUT: [[f64; 3]; 3] = [[0.0, 6.0, -4.0], [0.0, -5.0, 3.0], [0.0, 4.0, -2.0]];

/// Derived visual state of one bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleState {
    /// 0 when hidden
    pub opacity: f64,
    /// Horizontal offset from the bubble's anchor
    pub dx: f64,
    /// Vertical offset; negative is up
    pub dy: f64,
    /// Size multiplier
    pub scale: f64,
}

impl BubbleState {
    /// Map a progress value in `[0, 1]` to the bubble's visuals.
    #[must_use]
    pub fn at(progress: f64, index: usize, rise_distance: f64) -> Self {
        let drift = &DRIFT_OUT[index % DRIFT_OUT.len()];
        Self {
            opacity: interpolate(progress, &OPACITY_IN, &OPACITY_OUT),
            dx: interpolate(progress, &DRIFT_IN, drift),
            dy: interpolate(progress, &[0.0, 1.0], &[0.0, -rise_distance]),
            scale: interpolate(progress, &SCALE_IN, &SCALE_OUT),
        }
    }

    /// Whether the bubble should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Runs the staggered bubble burst.
#[derive(Debug)]
pub struct BubbleSequencer {
    progress: Vec<AnimatedValue>,
    config: BubbleConfig,
    clock: FrameClock,
    frame: Option<FrameRequest>,
    trigger: bool,
}

impl BubbleSequencer {
    /// Create an idle sequencer with all bubbles at progress 0.
    #[must_use]
    pub fn new(clock: FrameClock, config: BubbleConfig) -> Self {
        let progress = vec![AnimatedValue::new(0.0); config.delays_ms.len()];
        Self {
            progress,
            config,
            clock,
            frame: None,
            trigger: false,
        }
    }

    /// Restart the burst from zero, superseding one in flight.
    pub fn trigger(&mut self) {
        for (value, delay) in self.progress.iter_mut().zip(&self.config.delays_ms) {
            value.set_value(0.0);
            value.start(Track::timing(1.0, self.config.duration_ms).with_delay(*delay));
        }
        if self.frame.is_none() {
            self.frame = Some(self.clock.request());
        }
        debug!(bubbles = self.progress.len(), "bubble burst triggered");
    }

    /// Feed the trigger input. A burst starts only on a false → true edge.
    ///
    /// Returns `true` if a burst started.
    pub fn set_trigger(&mut self, trigger: bool) -> bool {
        let rising = trigger && !self.trigger;
        self.trigger = trigger;
        if rising {
            self.trigger();
        }
        rising
    }

    /// Advance every bubble. Returns `true` while the burst is playing.
    ///
    /// When the last bubble completes all progress values return to 0 and
    /// the frame request is released.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.frame.is_none() {
            return false;
        }
        let mut running = false;
        for value in &mut self.progress {
            running |= value.advance(dt_ms) == Progress::Running;
        }
        if !running {
            self.reset();
        }
        running
    }

    /// Stop the burst and hide every bubble.
    pub fn stop(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        for value in &mut self.progress {
            value.set_value(0.0);
        }
        if self.frame.take().is_some() {
            debug!("bubble burst finished");
        }
    }

    /// Whether a burst is playing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.frame.is_some()
    }

    /// Raw progress of each bubble.
    #[must_use]
    pub fn progress(&self) -> Vec<f64> {
        self.progress.iter().map(AnimatedValue::value).collect()
    }

    /// Visual state of each bubble.
    #[must_use]
    pub fn states(&self) -> Vec<BubbleState> {
        self.progress
            .iter()
            .enumerate()
            .map(|(i, value)| BubbleState::at(value.value(), i, self.config.rise_distance))
            .collect()
    }

    /// Bubble radius at scale 1.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.config.radius
    }
}
