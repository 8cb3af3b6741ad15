//! A scalar driven over time by a [`Track`].

use super::spring::Spring;
use super::track::{Step, Track};

/// Outcome of advancing an [`AnimatedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Nothing is playing
    Idle,
    /// A track is still playing
    Running,
    /// The track completed during this advance
    Finished,
}

#[derive(Debug, Clone)]
struct Run {
    track: Track,
    index: usize,
    /// Time spent in the current step, delay included
    elapsed_ms: f64,
    /// Value when the current step started moving
    from: f64,
    /// Value each iteration restarts from
    origin: f64,
    completed: u32,
    iteration_ms: f64,
    spring: Option<Spring>,
    /// Velocity handed to the first spring of a superseding track
    carry_velocity: f64,
}

/// A mutable scalar owned by exactly one component.
///
/// Starting a track supersedes whatever was playing. Time left over when a
/// step completes flows into the next step within the same advance.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f64,
    run: Option<Run>,
}

impl AnimatedValue {
    /// Create an idle value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value, run: None }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Whether a track is playing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Target of the step currently playing.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        let run = self.run.as_ref()?;
        run.track.steps().get(run.index).map(Step::target)
    }

    /// Velocity of the spring currently playing, in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.run.as_ref().map_or(0.0, |run| {
            run.spring
                .as_ref()
                .map_or(run.carry_velocity, |spring| spring.velocity)
        })
    }

    /// Play `track` from the current value, replacing any running track.
    ///
    /// A spring cut off mid-flight hands its velocity to the new track's
    /// first spring step.
    pub fn start(&mut self, track: Track) {
        let carry_velocity = match track.steps().first() {
            Some(Step::Spring { .. }) => self.velocity(),
            _ => 0.0,
        };
        self.run = if track.steps().is_empty() {
            None
        } else {
            Some(Run {
                track,
                index: 0,
                elapsed_ms: 0.0,
                from: self.value,
                origin: self.value,
                completed: 0,
                iteration_ms: 0.0,
                spring: None,
                carry_velocity,
            })
        };
    }

    /// Stop where it is.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Jump to `value`, stopping any running track.
    pub fn set_value(&mut self, value: f64) {
        self.run = None;
        self.value = value;
    }

    /// Advance by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) -> Progress {
        let mut remaining = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let Some(run) = self.run.as_mut() else {
            return Progress::Idle;
        };

        loop {
            let Some(step) = run.track.steps().get(run.index).copied() else {
                self.run = None;
                return Progress::Finished;
            };

            let delay = step.delay_ms();
            if run.elapsed_ms < delay {
                let wait = delay - run.elapsed_ms;
                if remaining < wait {
                    run.elapsed_ms += remaining;
                    run.iteration_ms += remaining;
                    return Progress::Running;
                }
                remaining -= wait;
                run.iteration_ms += wait;
                run.elapsed_ms = delay;
                run.from = self.value;
            }

            match step {
                Step::Tween {
                    to,
                    duration_ms,
                    easing,
                    ..
                } => {
                    let available = (duration_ms - (run.elapsed_ms - delay)).max(0.0);
                    if remaining < available {
                        run.elapsed_ms += remaining;
                        run.iteration_ms += remaining;
                        let t = (run.elapsed_ms - delay) / duration_ms;
                        self.value = (to - run.from).mul_add(easing.apply(t), run.from);
                        return Progress::Running;
                    }
                    remaining -= available;
                    run.iteration_ms += available;
                    self.value = to;
                }
                Step::Spring { to, config, .. } => {
                    let current = self.value;
                    let carry = std::mem::take(&mut run.carry_velocity);
                    let spring = run.spring.get_or_insert_with(|| {
                        let mut spring = Spring::new(current).with_config(config);
                        spring.velocity = carry;
                        spring.set_target(to);
                        spring
                    });
                    let leftover = spring.advance(remaining);
                    run.iteration_ms += remaining - leftover;
                    self.value = spring.value;
                    if !spring.at_rest {
                        return Progress::Running;
                    }
                    remaining = leftover;
                }
            }

            run.index += 1;
            run.elapsed_ms = 0.0;
            run.from = self.value;
            run.spring = None;
            run.carry_velocity = 0.0;

            if run.index >= run.track.steps().len() {
                run.completed = run.completed.saturating_add(1);
                if !run.track.continues_after(run.completed) {
                    self.run = None;
                    return Progress::Finished;
                }
                let instantaneous = run.iteration_ms <= 0.0;
                run.index = 0;
                run.iteration_ms = 0.0;
                run.from = run.origin;
                self.value = run.origin;
                if instantaneous {
                    // An iteration that takes no time would spin forever.
                    return Progress::Running;
                }
            }
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
