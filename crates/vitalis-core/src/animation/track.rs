//! Declarative animation tracks: sequences of tweens and springs with an
//! optional repeat.
//!
//! ```
//! use vitalis_core::animation::{Easing, Track};
//!
//! // Scroll one tile width, jump back, forever.
//! let track = Track::timing(300.0, 2300.0)
//!     .then(Track::timing(0.0, 0.0))
//!     .repeat_forever();
//! assert_eq!(track.steps().len(), 2);
//!
//! let fade = Track::timing(1.0, 200.0).with_easing(Easing::EaseOut).with_delay(100.0);
//! assert_eq!(fade.steps()[0].delay_ms(), 100.0);
//! ```

use super::easing::Easing;
use super::spring::SpringConfig;
use serde::{Deserialize, Serialize};

/// One segment of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Timed interpolation to `to`
    Tween {
        /// Target value
        to: f64,
        /// Duration in milliseconds
        duration_ms: f64,
        /// Wait before starting, in milliseconds
        delay_ms: f64,
        /// Easing curve
        easing: Easing,
    },
    /// Spring towards `to` until at rest
    Spring {
        /// Target value
        to: f64,
        /// Physics parameters
        config: SpringConfig,
        /// Wait before starting, in milliseconds
        delay_ms: f64,
    },
}

impl Step {
    /// Value this step ends at.
    #[must_use]
    pub const fn target(&self) -> f64 {
        match *self {
            Self::Tween { to, .. } | Self::Spring { to, .. } => to,
        }
    }

    /// Start delay in milliseconds.
    #[must_use]
    pub const fn delay_ms(&self) -> f64 {
        match *self {
            Self::Tween { delay_ms, .. } | Self::Spring { delay_ms, .. } => delay_ms,
        }
    }

    fn set_delay(&mut self, delay: f64) {
        match self {
            Self::Tween { delay_ms, .. } | Self::Spring { delay_ms, .. } => *delay_ms = delay,
        }
    }
}

/// How many times a track plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Repeat {
    /// Play once
    #[default]
    Once,
    /// Play `n` times
    Times(u32),
    /// Loop until stopped
    Forever,
}

/// An ordered list of steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    steps: Vec<Step>,
    repeat: Repeat,
}

impl Track {
    /// Linear tween to `to` over `duration_ms`.
    #[must_use]
    pub fn timing(to: f64, duration_ms: f64) -> Self {
        Self {
            steps: vec![Step::Tween {
                to,
                duration_ms: sanitize_ms(duration_ms),
                delay_ms: 0.0,
                easing: Easing::Linear,
            }],
            repeat: Repeat::Once,
        }
    }

    /// Spring to `to`.
    #[must_use]
    pub fn spring(to: f64, config: SpringConfig) -> Self {
        Self {
            steps: vec![Step::Spring {
                to,
                config,
                delay_ms: 0.0,
            }],
            repeat: Repeat::Once,
        }
    }

    /// Append another track's steps.
    #[must_use]
    pub fn then(mut self, next: Self) -> Self {
        self.steps.extend(next.steps);
        self
    }

    /// Delay the first step.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        if let Some(first) = self.steps.first_mut() {
            first.set_delay(sanitize_ms(delay_ms));
        }
        self
    }

    /// Easing for the last tween step.
    #[must_use]
    pub fn with_easing(mut self, curve: Easing) -> Self {
        if let Some(Step::Tween { easing, .. }) = self.steps.last_mut() {
            *easing = curve;
        }
        self
    }

    /// Loop until stopped.
    #[must_use]
    pub const fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    /// Play `times` times in total.
    #[must_use]
    pub const fn repeat(mut self, times: u32) -> Self {
        self.repeat = Repeat::Times(times);
        self
    }

    /// Steps in play order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Repeat mode.
    #[must_use]
    pub const fn repeat_mode(&self) -> Repeat {
        self.repeat
    }

    /// Value the track settles at when it finishes.
    #[must_use]
    pub fn final_value(&self) -> Option<f64> {
        self.steps.last().map(Step::target)
    }

    /// Whether another iteration follows iteration number `completed`.
    pub(crate) const fn continues_after(&self, completed: u32) -> bool {
        match self.repeat {
            Repeat::Once => false,
            Repeat::Times(n) => completed < n,
            Repeat::Forever => true,
        }
    }
}

fn sanitize_ms(ms: f64) -> f64 {
    if ms.is_finite() {
        ms.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_builders() {
        let track = Track::timing(1.0, 750.0)
            .with_delay(150.0)
            .with_easing(Easing::EaseOut);
        assert_eq!(
            track.steps()[0],
            Step::Tween {
                to: 1.0,
                duration_ms: 750.0,
                delay_ms: 150.0,
                easing: Easing::EaseOut,
            }
        );
        assert_eq!(track.repeat_mode(), Repeat::Once);
        assert_eq!(track.final_value(), Some(1.0));
    }

    #[test]
    fn test_track_then_and_repeat() {
        let track = Track::timing(-300.0, 1450.0)
            .then(Track::timing(0.0, 0.0))
            .repeat_forever();
        assert_eq!(track.steps().len(), 2);
        assert_eq!(track.final_value(), Some(0.0));
        assert!(track.continues_after(1_000));
    }

    #[test]
    fn test_track_repeat_times() {
        let track = Track::timing(1.0, 10.0).repeat(3);
        assert!(track.continues_after(1));
        assert!(track.continues_after(2));
        assert!(!track.continues_after(3));
        assert!(!Track::timing(1.0, 1.0).continues_after(1));
    }

    #[test]
    fn test_track_sanitizes_durations() {
        let track = Track::timing(1.0, -5.0).with_delay(f64::NAN);
        assert_eq!(
            track.steps()[0],
            Step::Tween {
                to: 1.0,
                duration_ms: 0.0,
                delay_ms: 0.0,
                easing: Easing::Linear,
            }
        );
    }

    #[test]
    fn test_spring_step() {
        let track = Track::spring(0.9, SpringConfig::TAB_FOCUS);
        assert_eq!(track.steps()[0].target(), 0.9);
        assert_eq!(track.steps()[0].delay_ms(), 0.0);
    }
}
