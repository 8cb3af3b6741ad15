//! Displayed fill percentage.

use vitalis_core::FillConfig;

/// Fill percentage, always inside the configured range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillLevel {
    percent: f32,
}

impl FillLevel {
    /// Lowest displayed fill by default.
    pub const MIN_PERCENT: f32 = 25.0;
    /// Highest displayed fill by default.
    pub const MAX_PERCENT: f32 = 65.0;

    /// Clamp `percent` into the default range.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        Self::clamped(percent, Self::MIN_PERCENT, Self::MAX_PERCENT)
    }

    /// Clamp `percent` into the configured range.
    #[must_use]
    pub fn with_config(percent: f32, config: &FillConfig) -> Self {
        Self::clamped(percent, config.min_percent, config.max_percent)
    }

    fn clamped(percent: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let percent = if percent.is_nan() {
            min
        } else {
            percent.clamp(min, max)
        };
        Self { percent }
    }

    /// Clamped percentage.
    #[must_use]
    pub const fn percent(&self) -> f32 {
        self.percent
    }

    /// Height of the water column inside a container of `height`.
    #[must_use]
    pub fn height_in(&self, height: f32) -> f32 {
        height * self.percent / 100.0
    }
}

impl Default for FillLevel {
    fn default() -> Self {
        Self::new(Self::MIN_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_clamping_table() {
        let cases = [
            (-10.0, 25.0),
            (0.0, 25.0),
            (25.0, 25.0),
            (45.0, 45.0),
            (65.0, 65.0),
            (100.0, 65.0),
        ];
        for (input, expected) in cases {
            assert_eq!(FillLevel::new(input).percent(), expected, "input {input}");
        }
    }

    #[test]
    fn test_fill_non_finite() {
        assert_eq!(FillLevel::new(f32::NAN).percent(), 25.0);
        assert_eq!(FillLevel::new(f32::INFINITY).percent(), 65.0);
        assert_eq!(FillLevel::new(f32::NEG_INFINITY).percent(), 25.0);
    }

    #[test]
    fn test_fill_custom_range() {
        let config = FillConfig {
            min_percent: 10.0,
            max_percent: 90.0,
        };
        assert_eq!(FillLevel::with_config(95.0, &config).percent(), 90.0);
        assert_eq!(FillLevel::with_config(5.0, &config).percent(), 10.0);
    }

    #[test]
    fn test_fill_height() {
        assert_eq!(FillLevel::new(50.0).height_in(200.0), 100.0);
    }

    proptest! {
        #[test]
        fn prop_fill_always_in_range(p in proptest::num::f32::ANY) {
            let level = FillLevel::new(p).percent();
            prop_assert!((25.0..=65.0).contains(&level));
        }
    }
}
