//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle and are additionally driven
//! by the host frame loop:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: accept allocated bounds
//! 3. **Paint**: record draw commands onto a [`Canvas`]
//! 4. **Tick**: advance owned animations by one [`FrameTime`]
//! 5. **Unmount**: release every scheduled frame callback
//!
//! # Examples
//!
//! ```
//! use vitalis_core::{TypeId, WidgetId};
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::clock::FrameTime;
use crate::constraints::Constraints;
use crate::draw::Transform2D;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::path::PathData;
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Record draw commands.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events, optionally producing a message.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Advance owned animations. Returns `true` while a repaint is needed.
    fn tick(&mut self, _frame: FrameTime) -> bool {
        false
    }

    /// Stop every running animation and release scheduled frames.
    fn unmount(&mut self) {}

    /// Accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Test ID for automated testing.
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Current bounds after layout.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
pub trait Canvas {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle with rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Stroke a rectangle with rounded corners.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32);

    /// Fill vector path data.
    fn fill_path(&mut self, path: &PathData, color: Color);

    /// Fill a polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Draw text at a position.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a named icon glyph centered on `center`.
    fn draw_glyph(&mut self, name: &str, center: Point, size: f32, color: Color);

    /// Push a clip rectangle.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip rectangle.
    fn pop_clip(&mut self);

    /// Push a transform.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);

    /// Push a group opacity.
    fn push_opacity(&mut self, alpha: f32);

    /// Pop the group opacity.
    fn pop_opacity(&mut self);
}

/// Text style for rendering text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    Normal,
    /// Medium (500)
    Medium,
    /// Bold (700)
    Bold,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_widget_id_hash() {
        let mut set = HashSet::new();
        set.insert(WidgetId::new(1));
        set.insert(WidgetId::new(1));
        set.insert(WidgetId::new(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_type_id() {
        assert_eq!(TypeId::of::<u8>(), TypeId::of::<u8>());
        assert_ne!(TypeId::of::<u8>(), TypeId::of::<u16>());
    }

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 16.0);
        assert_eq!(style.weight, FontWeight::Normal);
    }

    #[test]
    fn test_layout_result_default() {
        assert_eq!(LayoutResult::default().size, Size::ZERO);
    }
}
