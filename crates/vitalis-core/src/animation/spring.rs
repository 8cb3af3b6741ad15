//! Damped spring physics.

use serde::{Deserialize, Serialize};

/// Spring physics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Mass of the object (affects inertia)
    pub mass: f64,
    /// Stiffness of the spring (affects speed)
    pub stiffness: f64,
    /// Damping coefficient (affects bounciness)
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::TAB_FOCUS
    }
}

impl SpringConfig {
    /// Focus scale spring used by the tab bar.
    pub const TAB_FOCUS: Self = Self {
        mass: 0.5,
        stiffness: 150.0,
        damping: 15.0,
    };

    /// Create custom spring config.
    #[must_use]
    pub const fn custom(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Damping ratio ζ = c / (2·√(k·m)).
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.mass * self.stiffness).sqrt())
    }

    /// Whether the spring oscillates around its target.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Mass, stiffness and damping positive and finite.
    ///
    /// An undamped spring never settles.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.mass.is_finite()
            && self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass > 0.0
            && self.stiffness > 0.0
            && self.damping > 0.0
    }
}

/// Largest integration step in milliseconds.
const MAX_STEP_MS: f64 = 1.0;

/// A spring-animated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    /// Current value
    pub value: f64,
    /// Target value
    pub target: f64,
    /// Current velocity in units per second
    pub velocity: f64,
    /// Spring configuration
    pub config: SpringConfig,
    /// Whether the spring has settled
    pub at_rest: bool,
    /// Settling threshold for both displacement and speed
    pub precision: f64,
}

impl Spring {
    /// Create a spring resting at `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            target: initial,
            velocity: 0.0,
            config: SpringConfig::default(),
            at_rest: true,
            precision: 0.001,
        }
    }

    /// Set spring configuration.
    #[must_use]
    pub const fn with_config(mut self, config: SpringConfig) -> Self {
        self.config = config;
        self
    }

    /// Retarget, keeping the current velocity.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > f64::EPSILON || !self.is_settled() {
            self.target = target;
            self.at_rest = false;
        }
    }

    fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.precision && self.velocity.abs() < self.precision
    }

    /// Integrate for `dt_ms` milliseconds.
    ///
    /// Returns the unused time if the spring came to rest part way through.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        if self.at_rest {
            return dt_ms.max(0.0);
        }
        if !self.config.is_valid() {
            self.set_immediate(self.target);
            return dt_ms.max(0.0);
        }
        let mut remaining = dt_ms.max(0.0);
        while remaining > 0.0 {
            let step_ms = remaining.min(MAX_STEP_MS);
            let dt = step_ms / 1000.0;
            let displacement = self.value - self.target;
            let acceleration = self
                .config
                .stiffness
                .mul_add(-displacement, -self.config.damping * self.velocity)
                / self.config.mass;
            // Semi-implicit Euler
            self.velocity += acceleration * dt;
            self.value += self.velocity * dt;
            remaining -= step_ms;
            if self.is_settled() {
                self.set_immediate(self.target);
                return remaining;
            }
        }
        0.0
    }

    /// Jump to `value` and stop.
    pub fn set_immediate(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_config_tab_focus() {
        let c = SpringConfig::TAB_FOCUS;
        assert_eq!(c.mass, 0.5);
        assert_eq!(c.stiffness, 150.0);
        assert_eq!(c.damping, 15.0);
        assert!(c.is_valid());
        assert!(c.damping_ratio() > 0.8 && c.damping_ratio() < 0.9);
        assert!(c.is_underdamped());
    }

    #[test]
    fn test_spring_config_invalid() {
        assert!(!SpringConfig::custom(0.0, 100.0, 10.0).is_valid());
        assert!(!SpringConfig::custom(1.0, f64::NAN, 10.0).is_valid());
        assert!(!SpringConfig::custom(1.0, 100.0, -1.0).is_valid());
        assert!(!SpringConfig::custom(0.5, 150.0, 0.0).is_valid());
    }

    #[test]
    fn test_undamped_spring_snaps_instead_of_ringing() {
        let mut spring = Spring::new(1.0).with_config(SpringConfig::custom(0.5, 150.0, 0.0));
        spring.set_target(0.9);
        spring.advance(16.0);
        assert!(spring.at_rest);
        assert_eq!(spring.value, 0.9);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(1.0);
        spring.set_target(0.9);
        assert!(!spring.at_rest);
        let mut elapsed = 0.0;
        while !spring.at_rest && elapsed < 5000.0 {
            spring.advance(16.0);
            elapsed += 16.0;
        }
        assert!(spring.at_rest);
        assert_eq!(spring.value, 0.9);
        assert!(elapsed < 2000.0, "settled after {elapsed} ms");
    }

    #[test]
    fn test_spring_overshoots_when_underdamped() {
        let mut spring = Spring::new(0.9);
        spring.set_target(1.0);
        let mut peak = 0.0f64;
        for _ in 0..100 {
            spring.advance(16.0);
            peak = peak.max(spring.value);
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_spring_returns_leftover_time() {
        let mut spring = Spring::new(0.0);
        spring.set_target(1.0);
        let leftover = spring.advance(10_000.0);
        assert!(spring.at_rest);
        assert!(leftover > 0.0 && leftover < 10_000.0);
        assert_eq!(spring.advance(5.0), 5.0);
    }

    #[test]
    fn test_spring_invalid_config_snaps() {
        let mut spring = Spring::new(0.0).with_config(SpringConfig::custom(0.0, 1.0, 1.0));
        spring.set_target(3.0);
        spring.advance(16.0);
        assert_eq!(spring.value, 3.0);
        assert!(spring.at_rest);
    }
}
