//! Canvas implementations for rendering.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, Transform2D};
use crate::geometry::{Point, Rect};
use crate::path::PathData;
use crate::widget::{Canvas, TextStyle};
use crate::Color;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scope {
    Clip(Rect),
    Transform(Transform2D),
    Opacity(f32),
}

/// A Canvas that records draw operations as `DrawCommand`s.
///
/// Clip, transform and opacity pushes open a nested scope; the matching pop
/// closes it into a single [`DrawCommand::Clip`], [`DrawCommand::Group`] or
/// [`DrawCommand::Opacity`]. Used for tests and for serializing a frame.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    scopes: Vec<(Scope, Vec<DrawCommand>)>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    ///
    /// Scopes still open are closed first.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        while !self.scopes.is_empty() {
            self.close_scope();
        }
        std::mem::take(&mut self.commands)
    }

    /// Every recorded command including nested ones, depth first.
    #[must_use]
    pub fn all_commands(&self) -> Vec<&DrawCommand> {
        self.commands.iter().flat_map(DrawCommand::walk).collect()
    }

    /// Number of top-level commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.scopes.is_empty()
    }

    /// Number of open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.scopes.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        match self.scopes.last_mut() {
            Some((_, children)) => children.push(command),
            None => self.commands.push(command),
        }
    }

    fn close_scope(&mut self) {
        if let Some((scope, children)) = self.scopes.pop() {
            let command = match scope {
                Scope::Clip(bounds) => DrawCommand::Clip { bounds, children },
                Scope::Transform(transform) => DrawCommand::Group {
                    children,
                    transform,
                },
                Scope::Opacity(alpha) => DrawCommand::Opacity { alpha, children },
            };
            self.push(command);
        }
    }

    fn pop_matching(&mut self, kind: &str, matches: fn(&Scope) -> bool) {
        match self.scopes.last() {
            Some((scope, _)) if matches(scope) => self.close_scope(),
            _ => warn!(kind = kind, "unbalanced pop on recording canvas"),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::filled_rect(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push(DrawCommand::rounded_rect(rect, radius, color));
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        self.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::stroke(StrokeStyle { color, width }),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.push(DrawCommand::filled_circle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            style: BoxStyle::stroke(StrokeStyle { color, width }),
        });
    }

    fn fill_path(&mut self, path: &PathData, color: Color) {
        self.push(DrawCommand::FillPath {
            data: path.clone(),
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.push(DrawCommand::Path {
            points: points.to_vec(),
            closed: true,
            style: StrokeStyle { color, width: 0.0 },
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_glyph(&mut self, name: &str, center: Point, size: f32, color: Color) {
        self.push(DrawCommand::Glyph {
            name: name.to_string(),
            center,
            size,
            color,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.scopes.push((Scope::Clip(rect), Vec::new()));
    }

    fn pop_clip(&mut self) {
        self.pop_matching("clip", |s| matches!(s, Scope::Clip(_)));
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.scopes.push((Scope::Transform(transform), Vec::new()));
    }

    fn pop_transform(&mut self) {
        self.pop_matching("transform", |s| matches!(s, Scope::Transform(_)));
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.scopes
            .push((Scope::Opacity(alpha.clamp(0.0, 1.0)), Vec::new()));
    }

    fn pop_opacity(&mut self) {
        self.pop_matching("opacity", |s| matches!(s, Scope::Opacity(_)));
    }
}
