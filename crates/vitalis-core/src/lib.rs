//! Core types and traits for the Vitalis motion engines.
//!
//! This crate provides the foundations the widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Vector paths with SVG serialization: [`PathData`]
//! - Color representation: [`Color`] with relative luminance
//! - Rendering: [`DrawCommand`], the [`Canvas`] trait and [`RecordingCanvas`]
//! - The [`Widget`] trait and input [`Event`]s
//! - Frame scheduling: [`FrameClock`] and [`FrameRequest`] guards
//! - Animation: easing, springs, tracks and [`AnimatedValue`]
//! - Configuration: [`MotionConfig`] and the [`Palette`]

pub mod animation;
mod canvas;
mod clock;
mod color;
mod config;
mod constraints;
pub mod draw;
mod error;
mod event;
mod geometry;
mod path;
mod theme;
pub mod widget;

pub use animation::{AnimatedValue, Easing, Progress, SpringConfig, Track};
pub use canvas::RecordingCanvas;
pub use clock::{FrameClock, FrameRequest, FrameTime};
pub use color::{Color, ColorParseError};
pub use config::{BubbleConfig, FillConfig, IconPair, MotionConfig, TabConfig, WaveConfig};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle, Transform2D};
pub use error::ConfigError;
pub use event::{Event, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use path::{PathData, PathSegment, Sweep};
pub use theme::Palette;
pub use widget::{Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget, WidgetId};
