//! Color palette shared by the tab bar and water tank.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A color palette for theming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Accent color: focused tab tint and home button fill
    pub primary: Color,
    /// Glyph color on the accent
    pub on_primary: Color,
    /// Tab bar and tank background
    pub surface: Color,
    /// Unfocused tab tint
    pub inactive: Color,
    /// Text on the surface
    pub on_surface: Color,
    /// One of the two water shades
    pub water_deep: Color,
    /// The other water shade
    pub water_shallow: Color,
    /// Tank outline
    pub tank_outline: Color,
    /// Bubble fill
    pub bubble: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

impl Palette {
    /// Light palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::rgb(0.16, 0.47, 0.96),
            on_primary: Color::WHITE,
            surface: Color::WHITE,
            inactive: Color::rgb(0.55, 0.57, 0.6),
            on_surface: Color::rgb(0.13, 0.13, 0.13),
            water_deep: Color::rgb(0.08, 0.4, 0.75),
            water_shallow: Color::rgb(0.39, 0.71, 0.96),
            tank_outline: Color::rgb(0.82, 0.86, 0.9),
            bubble: Color::new(1.0, 1.0, 1.0, 0.8),
        }
    }

    /// Dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::rgb(0.51, 0.71, 1.0),
            on_primary: Color::BLACK,
            surface: Color::rgb(0.12, 0.12, 0.14),
            inactive: Color::rgb(0.45, 0.46, 0.5),
            on_surface: Color::WHITE,
            water_deep: Color::rgb(0.05, 0.28, 0.55),
            water_shallow: Color::rgb(0.2, 0.5, 0.8),
            tank_outline: Color::rgb(0.3, 0.32, 0.36),
            bubble: Color::new(1.0, 1.0, 1.0, 0.6),
        }
    }

    /// Water shades ordered `(back, front)`: the darker shade sits behind.
    #[must_use]
    pub fn wave_shades(&self) -> (Color, Color) {
        Color::darker_lighter(self.water_deep, self.water_shallow)
    }
}
