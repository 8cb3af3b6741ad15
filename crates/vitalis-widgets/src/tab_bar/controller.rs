//! Per-tab focus animation: a spring on scale and a timed fade on opacity,
//! started together whenever the tab gains or loses focus.

use vitalis_core::{AnimatedValue, Progress, TabConfig, Track};

/// Focus choreography for one tab.
#[derive(Debug, Clone)]
pub struct TabAnimationController {
    focused: bool,
    scale: AnimatedValue,
    opacity: AnimatedValue,
    config: TabConfig,
}

impl TabAnimationController {
    /// Create a controller resting in the given focus state.
    #[must_use]
    pub fn new(focused: bool, config: &TabConfig) -> Self {
        let (scale, opacity) = Self::targets(focused, config);
        Self {
            focused,
            scale: AnimatedValue::new(scale),
            opacity: AnimatedValue::new(opacity),
            config: config.clone(),
        }
    }

    fn targets(focused: bool, config: &TabConfig) -> (f64, f64) {
        if focused {
            (config.focused_scale, config.focused_opacity)
        } else {
            (config.unfocused_scale, config.unfocused_opacity)
        }
    }

    /// Animate towards the new focus state. Returns `false` if unchanged.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        if focused == self.focused {
            return false;
        }
        self.focused = focused;
        let (scale, opacity) = Self::targets(focused, &self.config);
        self.scale.start(Track::spring(scale, self.config.spring));
        self.opacity
            .start(Track::timing(opacity, self.config.opacity_duration_ms));
        true
    }

    /// Advance both animations. Returns `true` while either is running.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let scale = self.scale.advance(dt_ms);
        let opacity = self.opacity.advance(dt_ms);
        scale == Progress::Running || opacity == Progress::Running
    }

    /// Jump both values to their resting targets.
    pub fn finish(&mut self) {
        let (scale, opacity) = Self::targets(self.focused, &self.config);
        self.scale.set_value(scale);
        self.opacity.set_value(opacity);
    }

    /// Whether the tab is focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether either animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.scale.is_running() || self.opacity.is_running()
    }

    /// Current scale.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale.value()
    }

    /// Current opacity.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        self.opacity.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_core::SpringConfig;

    fn run_until_idle(controller: &mut TabAnimationController, step: f64) -> f64 {
        let mut elapsed = 0.0;
        while controller.advance(step) && elapsed < 10_000.0 {
            elapsed += step;
        }
        elapsed + step
    }

    #[test]
    fn test_initial_values_are_resting_targets() {
        let config = TabConfig::default();
        let focused = TabAnimationController::new(true, &config);
        assert_eq!((focused.scale(), focused.opacity()), (1.0, 1.0));
        let unfocused = TabAnimationController::new(false, &config);
        assert_eq!((unfocused.scale(), unfocused.opacity()), (0.9, 0.6));
        assert!(!focused.is_animating());
    }

    #[test]
    fn test_set_focused_noop_when_unchanged() {
        let mut c = TabAnimationController::new(true, &TabConfig::default());
        assert!(!c.set_focused(true));
        assert!(!c.is_animating());
    }

    #[test]
    fn test_blur_runs_spring_and_fade_together() {
        let mut c = TabAnimationController::new(true, &TabConfig::default());
        assert!(c.set_focused(false));
        assert!(c.is_animating());
        c.advance(100.0);
        assert!((c.opacity() - 0.8).abs() < 1e-9);
        assert!(c.scale() < 1.0 && c.scale() > 0.9 - 0.01);
        c.advance(100.0);
        assert!((c.opacity() - 0.6).abs() < 1e-9);
        run_until_idle(&mut c, 16.0);
        assert_eq!(c.scale(), 0.9);
        assert!(!c.is_animating());
    }

    #[test]
    fn test_refocus_mid_animation_retargets() {
        let mut c = TabAnimationController::new(false, &TabConfig::default());
        c.set_focused(true);
        c.advance(50.0);
        let mid_opacity = c.opacity();
        c.set_focused(false);
        c.advance(100.0);
        assert!(c.opacity() < mid_opacity);
        run_until_idle(&mut c, 16.0);
        assert_eq!((c.scale(), c.opacity()), (0.9, 0.6));
    }

    #[test]
    fn test_refocus_keeps_scale_momentum() {
        let mut c = TabAnimationController::new(true, &TabConfig::default());
        c.set_focused(false);
        c.advance(50.0);
        let at_refocus = c.scale();
        c.set_focused(true);
        c.advance(4.0);
        // Still shrinking for a moment before heading back up.
        assert!(c.scale() < at_refocus);
        run_until_idle(&mut c, 16.0);
        assert_eq!(c.scale(), 1.0);
    }

    #[test]
    fn test_undamped_spring_still_goes_idle() {
        let config = TabConfig {
            spring: SpringConfig::custom(0.5, 150.0, 0.0),
            ..TabConfig::default()
        };
        let mut c = TabAnimationController::new(true, &config);
        c.set_focused(false);
        let elapsed = run_until_idle(&mut c, 16.0);
        assert!(elapsed < 1000.0, "idle after {elapsed} ms");
        assert!(!c.is_animating());
        assert_eq!((c.scale(), c.opacity()), (0.9, 0.6));
    }

    #[test]
    fn test_finish_snaps_to_targets() {
        let mut c = TabAnimationController::new(false, &TabConfig::default());
        c.set_focused(true);
        c.advance(10.0);
        c.finish();
        assert!(!c.is_animating());
        assert_eq!((c.scale(), c.opacity()), (1.0, 1.0));
    }
}
