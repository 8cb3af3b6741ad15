//! Input events delivered to widgets by the host.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer pressed
    MouseDown {
        /// Position of the press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Pointer released
    MouseUp {
        /// Position of the release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Tap recognized by the host gesture layer
    GestureTap {
        /// Position
        position: Point,
    },
    /// Long press recognized by the host gesture layer
    GestureLongPress {
        /// Position
        position: Point,
    },
    /// Host viewport resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Position for pointer-like events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::GestureTap { position }
            | Self::GestureLongPress { position } => Some(*position),
            Self::Resize { .. } => None,
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button (or a touch)
    Left,
    /// Secondary button
    Right,
    /// Middle button
    Middle,
}
