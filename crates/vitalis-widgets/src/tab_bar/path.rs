//! Outline of the tab bar: a rounded-top rectangle with a semicircular notch
//! carved into the middle of its top edge.

use tracing::warn;
use vitalis_core::{PathData, Sweep, TabConfig};

/// Default top corner radius.
pub const CORNER_RADIUS: f32 = 16.0;
/// Default notch radius.
pub const CUTOUT_RADIUS: f32 = 36.0;

/// Radii for the bar outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabBarPath {
    /// Top-left and top-right corner radius
    pub corner_radius: f32,
    /// Notch radius
    pub cutout_radius: f32,
}

impl Default for TabBarPath {
    fn default() -> Self {
        Self {
            corner_radius: CORNER_RADIUS,
            cutout_radius: CUTOUT_RADIUS,
        }
    }
}

impl From<&TabConfig> for TabBarPath {
    fn from(config: &TabConfig) -> Self {
        Self {
            corner_radius: config.corner_radius,
            cutout_radius: config.cutout_radius,
        }
    }
}

impl TabBarPath {
    /// Build the outline for a `width` × `height` bar with its origin at the
    /// top-left corner.
    ///
    /// Non-finite or non-positive dimensions yield an empty path. On bars
    /// too narrow for both corners and the notch, the radii shrink so the
    /// three arcs never overlap.
    #[must_use]
    pub fn generate(&self, width: f32, height: f32) -> PathData {
        let mut path = PathData::new();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "tab bar path requested for degenerate size");
            return path;
        }

        let center = width / 2.0;
        let corner = self.corner_radius.max(0.0).min(center).min(height);
        let cutout = self.cutout_radius.max(0.0).min(center - corner);

        path.move_to(0.0, height)
            .line_to(0.0, corner)
            .arc_to(corner, Sweep::Clockwise, corner, 0.0)
            .line_to(center - cutout, 0.0)
            .arc_to(cutout, Sweep::CounterClockwise, center + cutout, 0.0)
            .line_to(width - corner, 0.0)
            .arc_to(corner, Sweep::Clockwise, width, corner)
            .line_to(width, height)
            .close();
        path
    }
}

/// Outline with the default radii.
#[must_use]
pub fn generate_path(width: f32, height: f32) -> PathData {
    TabBarPath::default().generate(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vitalis_core::{PathSegment, Point};

    fn cutout_arc(path: &PathData) -> Option<(Point, Point, f32)> {
        let segments = path.segments();
        segments.iter().enumerate().find_map(|(i, seg)| match *seg {
            PathSegment::ArcTo {
                radius,
                sweep: Sweep::CounterClockwise,
                to,
            } => match segments.get(i.checked_sub(1)?)? {
                PathSegment::LineTo(from) => Some((*from, to, radius)),
                _ => None,
            },
            _ => None,
        })
    }

    // =========================================================================
    // Shape
    // =========================================================================

    #[test]
    fn test_generate_path_svg_for_phone_width() {
        let path = generate_path(375.0, 64.0);
        assert_eq!(
            path.to_string(),
            "M0 64 L0 16 A16 16 0 0 1 16 0 L151.5 0 A36 36 0 0 0 223.5 0 \
             L359 0 A16 16 0 0 1 375 16 L375 64 Z"
        );
    }

    #[test]
    fn test_generate_path_starts_bottom_left_and_closes() {
        let path = generate_path(320.0, 70.0);
        assert_eq!(path.segments()[0], PathSegment::MoveTo(Point::new(0.0, 70.0)));
        assert!(path.is_closed());
    }

    #[test]
    fn test_notch_dips_into_bar() {
        let path = generate_path(400.0, 64.0);
        let deepest = path
            .flatten(0.05)
            .into_iter()
            .flatten()
            .filter(|p| (p.x - 200.0).abs() < 0.5)
            .fold(f32::MIN, |acc, p| if p.y < 60.0 { acc.max(p.y) } else { acc });
        assert!((deepest - 36.0).abs() < 0.1, "deepest = {deepest}");
    }

    #[test]
    fn test_bounds_match_bar() {
        let bounds = generate_path(300.0, 64.0).bounds().unwrap();
        assert!(bounds.x.abs() < 1e-3 && bounds.y.abs() < 1e-3);
        assert!((bounds.width - 300.0).abs() < 1e-3);
        assert!((bounds.height - 64.0).abs() < 1e-3);
    }

    #[test]
    fn test_radii_are_independent_of_size() {
        for (w, h) in [(200.0, 50.0), (375.0, 64.0), (1024.0, 90.0)] {
            let (_, _, radius) = cutout_arc(&generate_path(w, h)).unwrap();
            assert_eq!(radius, CUTOUT_RADIUS);
        }
    }

    // =========================================================================
    // Degenerate input
    // =========================================================================

    #[test]
    fn test_degenerate_dimensions_yield_empty_path() {
        assert!(generate_path(0.0, 64.0).is_empty());
        assert!(generate_path(300.0, -1.0).is_empty());
        assert!(generate_path(f32::NAN, 64.0).is_empty());
        assert!(generate_path(f32::INFINITY, 64.0).is_empty());
    }

    #[test]
    fn test_narrow_bar_shrinks_radii() {
        let path = generate_path(60.0, 64.0);
        let (from, to, radius) = cutout_arc(&path).unwrap();
        assert_eq!(radius, 14.0);
        assert_eq!(from.x, 16.0);
        assert_eq!(to.x, 44.0);
        let tiny = generate_path(10.0, 4.0);
        assert_eq!(tiny.segments()[1], PathSegment::LineTo(Point::new(0.0, 4.0)));
    }

    #[test]
    fn test_custom_radii_from_config() {
        let config = TabConfig {
            corner_radius: 8.0,
            cutout_radius: 30.0,
            ..TabConfig::default()
        };
        let (from, to, radius) = cutout_arc(&TabBarPath::from(&config).generate(300.0, 60.0)).unwrap();
        assert_eq!((from.x, to.x, radius), (120.0, 180.0, 30.0));
    }

    proptest! {
        #[test]
        fn prop_cutout_centered(w in 1.0f32..2000.0, h in 1.0f32..400.0) {
            let path = generate_path(w, h);
            prop_assert!(path.is_closed());
            let (from, to, _) = cutout_arc(&path).unwrap();
            prop_assert!((((from.x + to.x) / 2.0) - w / 2.0).abs() < 1e-3);
            prop_assert!(from.x >= 0.0 && to.x <= w);
        }
    }
}
