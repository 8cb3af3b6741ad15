//! Tunable motion constants, loadable from TOML.
//!
//! Every field has a default, so an empty file (or a file with a single
//! section) is a valid config:
//!
//! ```
//! use vitalis_core::MotionConfig;
//!
//! let config = MotionConfig::from_toml("[wave]\nback_duration_ms = 3000.0\n").unwrap();
//! assert_eq!(config.wave.back_duration_ms, 3000.0);
//! assert_eq!(config.wave.front_duration_ms, 1450.0);
//! ```

use crate::animation::SpringConfig;
use crate::error::ConfigError;
use crate::theme::Palette;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Filled and outline glyph names for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPair {
    /// Glyph shown when the tab is focused
    pub filled: String,
    /// Glyph shown otherwise
    pub outline: String,
}

impl IconPair {
    /// Create a pair.
    #[must_use]
    pub fn new(filled: impl Into<String>, outline: impl Into<String>) -> Self {
        Self {
            filled: filled.into(),
            outline: outline.into(),
        }
    }
}

/// Tab bar geometry and focus choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabConfig {
    /// Bar height in pixels
    pub height: f32,
    /// Top corner radius
    pub corner_radius: f32,
    /// Radius of the centered notch
    pub cutout_radius: f32,
    /// Scale of the focused tab
    pub focused_scale: f64,
    /// Scale of unfocused tabs
    pub unfocused_scale: f64,
    /// Opacity of the focused tab
    pub focused_opacity: f64,
    /// Opacity of unfocused tabs
    pub unfocused_opacity: f64,
    /// Opacity tween duration
    pub opacity_duration_ms: f64,
    /// Route rendered as the raised circular button
    pub home_route: String,
    /// How far the home button rises above the bar
    pub home_lift: f32,
    /// Home button diameter
    pub home_diameter: f32,
    /// Glyph size for regular tabs
    pub icon_size: f32,
    /// Glyph size for the home button
    pub home_icon_size: f32,
    /// Label font size
    pub label_size: f32,
    /// Focus scale spring
    pub spring: SpringConfig,
    /// Extra or replacement glyphs by route name
    pub icons: BTreeMap<String, IconPair>,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            height: 64.0,
            corner_radius: 16.0,
            cutout_radius: 36.0,
            focused_scale: 1.0,
            unfocused_scale: 0.9,
            focused_opacity: 1.0,
            unfocused_opacity: 0.6,
            opacity_duration_ms: 200.0,
            home_route: "HomeTab".to_string(),
            home_lift: 24.0,
            home_diameter: 60.0,
            icon_size: 24.0,
            home_icon_size: 28.0,
            label_size: 11.0,
            spring: SpringConfig::TAB_FOCUS,
            icons: BTreeMap::new(),
        }
    }
}

/// Wave scroll timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// One back-layer cycle (scrolls right)
    pub back_duration_ms: f64,
    /// One front-layer cycle (scrolls left)
    pub front_duration_ms: f64,
    /// Tile width before the first layout pass
    pub default_width: f32,
    /// Drawn height of the wave band
    pub height: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            back_duration_ms: 2300.0,
            front_duration_ms: 1450.0,
            default_width: 300.0,
            height: 20.0,
        }
    }
}

/// Bubble burst timing and travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Run length of each bubble
    pub duration_ms: f64,
    /// Start delay per bubble; exactly three entries
    pub delays_ms: Vec<f64>,
    /// Upward travel over a full run
    pub rise_distance: f64,
    /// Bubble radius at full scale
    pub radius: f32,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750.0,
            delays_ms: vec![0.0, 100.0, 150.0],
            rise_distance: 60.0,
            radius: 5.0,
        }
    }
}

/// Fill percentage clamp range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Lowest displayed fill
    pub min_percent: f32,
    /// Highest displayed fill
    pub max_percent: f32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            min_percent: 25.0,
            max_percent: 65.0,
        }
    }
}

/// All motion and theme settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Tab bar
    pub tab: TabConfig,
    /// Wave layers
    pub wave: WaveConfig,
    /// Bubble burst
    pub bubbles: BubbleConfig,
    /// Fill range
    pub fill: FillConfig,
    /// Colors
    pub theme: Palette,
}

impl MotionConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = "vitalis.toml";

    /// Parse and validate a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid or values are out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "loaded motion config");
        Ok(config)
    }

    /// Write the config as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tab = &self.tab;
        positive("tab.height", f64::from(tab.height))?;
        non_negative("tab.corner_radius", f64::from(tab.corner_radius))?;
        non_negative("tab.cutout_radius", f64::from(tab.cutout_radius))?;
        if !tab.spring.is_valid() {
            return Err(invalid(
                "tab.spring needs finite mass > 0, stiffness > 0 and damping > 0",
            ));
        }
        positive("tab.focused_scale", tab.focused_scale)?;
        positive("tab.unfocused_scale", tab.unfocused_scale)?;
        unit("tab.focused_opacity", tab.focused_opacity)?;
        unit("tab.unfocused_opacity", tab.unfocused_opacity)?;
        non_negative("tab.opacity_duration_ms", tab.opacity_duration_ms)?;
        non_negative("tab.home_lift", f64::from(tab.home_lift))?;
        positive("tab.home_diameter", f64::from(tab.home_diameter))?;
        positive("tab.icon_size", f64::from(tab.icon_size))?;
        positive("tab.home_icon_size", f64::from(tab.home_icon_size))?;

        positive("wave.back_duration_ms", self.wave.back_duration_ms)?;
        positive("wave.front_duration_ms", self.wave.front_duration_ms)?;
        positive("wave.default_width", f64::from(self.wave.default_width))?;
        non_negative("wave.height", f64::from(self.wave.height))?;

        let bubbles = &self.bubbles;
        positive("bubbles.duration_ms", bubbles.duration_ms)?;
        if bubbles.delays_ms.len() != 3 {
            return Err(invalid(format!(
                "bubbles.delays_ms needs exactly 3 entries, got {}",
                bubbles.delays_ms.len()
            )));
        }
        for delay in &bubbles.delays_ms {
            non_negative("bubbles.delays_ms", *delay)?;
        }
        non_negative("bubbles.rise_distance", bubbles.rise_distance)?;
        positive("bubbles.radius", f64::from(bubbles.radius))?;

        let fill = &self.fill;
        non_negative("fill.min_percent", f64::from(fill.min_percent))?;
        non_negative("fill.max_percent", f64::from(fill.max_percent))?;
        if fill.min_percent > fill.max_percent || fill.max_percent > 100.0 {
            return Err(invalid(format!(
                "fill range {}..={} must be ordered and within 0..=100",
                fill.min_percent, fill.max_percent
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be > 0, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be >= 0, got {value}")))
    }
}

fn unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be within 0..=1, got {value}")))
    }
}
