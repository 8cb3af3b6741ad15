//! Route name to icon glyph lookup.

use std::collections::BTreeMap;
use vitalis_core::IconPair;

/// Glyph pair used for routes without a mapping.
pub const FALLBACK_FILLED: &str = "ellipse";
/// Outline glyph used for routes without a mapping.
pub const FALLBACK_OUTLINE: &str = "ellipse-outline";

// (route, filled, outline)
const BUILTIN: &[(&str, &str, &str)] = &[
    ("HomeTab", "home", "home-outline"),
    ("HydrationTab", "water", "water-outline"),
    ("WorkoutTab", "barbell", "barbell-outline"),
    ("NutritionTab", "nutrition", "nutrition-outline"),
    ("ProgressTab", "stats-chart", "stats-chart-outline"),
    ("ProfileTab", "person", "person-outline"),
];

/// Glyphs for `route_name`: configured overrides first, then the built-in
/// table, then the fallback pair.
#[must_use]
pub fn icon_for(route_name: &str, overrides: &BTreeMap<String, IconPair>) -> IconPair {
    if let Some(pair) = overrides.get(route_name) {
        return pair.clone();
    }
    BUILTIN
        .iter()
        .find(|(route, _, _)| *route == route_name)
        .map_or_else(
            || IconPair::new(FALLBACK_FILLED, FALLBACK_OUTLINE),
            |(_, filled, outline)| IconPair::new(*filled, *outline),
        )
}

/// Glyph to draw for a tab in the given focus state.
#[must_use]
pub fn glyph_for(route_name: &str, focused: bool, overrides: &BTreeMap<String, IconPair>) -> String {
    let pair = icon_for(route_name, overrides);
    if focused {
        pair.filled
    } else {
        pair.outline
    }
}
