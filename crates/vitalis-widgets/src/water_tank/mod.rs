//! Water tank: a clipped container whose water surface scrolls forever in
//! two layers, with a bubble burst on demand and a value readout on top.

mod bubbles;
mod fill;
mod wave;

pub use bubbles::{BubbleSequencer, BubbleState};
pub use fill::FillLevel;
pub use wave::{tile_path, WaveEngine, WaveLayer, REFERENCE_HEIGHT, REFERENCE_WIDTH};

use std::any::Any;
use tracing::debug;
use vitalis_core::{
    Canvas, Color, Constraints, Event, FillConfig, FontWeight, FrameClock, FrameTime, LayoutResult,
    MotionConfig, Palette, PathData, Point, Rect, Size, TextStyle, Transform2D, TypeId,
    WaveConfig, Widget,
};

/// Corner radius of the container.
pub const TANK_CORNER_RADIUS: f32 = 24.0;
/// Height used when the parent leaves it unconstrained.
pub const DEFAULT_HEIGHT: f32 = 300.0;

const VALUE_TEXT_SIZE: f32 = 32.0;
const UNIT_TEXT_SIZE: f32 = 14.0;
// Horizontal bubble anchors as fractions of the width.
const BUBBLE_ANCHORS: [f32; 3] = [0.3, 0.5, 0.7];
const BUBBLE_BOTTOM_INSET: f32 = 12.0;

/// Hydration tank widget.
///
/// Creating the tank mounts it: the wave loops start immediately and keep a
/// frame request alive until [`Widget::unmount`]. An unmounted tank ignores
/// triggers, relayouts and ticks.
#[derive(Debug)]
pub struct WaterTank {
    fill: FillLevel,
    fill_config: FillConfig,
    wave: WaveEngine,
    wave_config: WaveConfig,
    bubbles: BubbleSequencer,
    palette: Palette,
    display_value: String,
    display_unit: String,
    bounds: Rect,
    test_id_value: Option<String>,
    mounted: bool,
}

impl WaterTank {
    /// Create and mount a tank with default settings.
    #[must_use]
    pub fn new(clock: FrameClock) -> Self {
        Self::from_config(clock, &MotionConfig::default())
    }

    /// Create and mount a tank from a full motion config.
    #[must_use]
    pub fn from_config(clock: FrameClock, config: &MotionConfig) -> Self {
        let mut wave = WaveEngine::new(clock.clone(), config.wave.clone());
        wave.start();
        Self {
            fill: FillLevel::with_config(config.fill.min_percent, &config.fill),
            fill_config: config.fill.clone(),
            wave,
            wave_config: config.wave.clone(),
            bubbles: BubbleSequencer::new(clock, config.bubbles.clone()),
            palette: config.theme.clone(),
            display_value: String::new(),
            display_unit: String::new(),
            bounds: Rect::default(),
            test_id_value: None,
            mounted: true,
        }
    }

    /// Set the initial fill percentage.
    #[must_use]
    pub fn with_fill_percent(mut self, percent: f32) -> Self {
        self.set_fill_percent(percent);
        self
    }

    /// Set the readout text. Both strings are drawn verbatim.
    #[must_use]
    pub fn with_display(mut self, value: impl Into<String>, unit: impl Into<String>) -> Self {
        self.display_value = value.into();
        self.display_unit = unit.into();
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Update the fill percentage; out-of-range values are clamped.
    pub fn set_fill_percent(&mut self, percent: f32) {
        self.fill = FillLevel::with_config(percent, &self.fill_config);
    }

    /// Feed the bubble trigger. A burst starts on a false → true edge.
    pub fn set_animated(&mut self, animated: bool) -> bool {
        if !self.mounted {
            debug!(animated, "ignoring trigger on unmounted tank");
            return false;
        }
        self.bubbles.set_trigger(animated)
    }

    /// Update the readout text.
    pub fn set_display(&mut self, value: impl Into<String>, unit: impl Into<String>) {
        self.display_value = value.into();
        self.display_unit = unit.into();
    }

    /// Whether the tank is still mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Displayed fill.
    #[must_use]
    pub const fn fill(&self) -> FillLevel {
        self.fill
    }

    /// Wave engine.
    #[must_use]
    pub const fn wave(&self) -> &WaveEngine {
        &self.wave
    }

    /// Bubble sequencer.
    #[must_use]
    pub const fn bubbles(&self) -> &BubbleSequencer {
        &self.bubbles
    }

    /// Y coordinate of the flat water line.
    #[must_use]
    pub fn water_line(&self) -> f32 {
        self.bounds.bottom() - self.fill.height_in(self.bounds.height)
    }

    fn paint_wave(&self, canvas: &mut dyn Canvas, tile: &PathData, layer: WaveLayer, color: Color) {
        let top = self.water_line() - self.wave_config.height;
        for left in self.wave.copies(layer) {
            canvas.push_transform(Transform2D::translate(self.bounds.x + left, top));
            canvas.fill_path(tile, color);
            canvas.pop_transform();
        }
    }

    fn paint_bubbles(&self, canvas: &mut dyn Canvas) {
        let base_y = self.bounds.bottom() - BUBBLE_BOTTOM_INSET;
        for (i, state) in self.bubbles.states().iter().enumerate() {
            if !state.is_visible() {
                continue;
            }
            let anchor = BUBBLE_ANCHORS[i % BUBBLE_ANCHORS.len()];
            let center = Point::new(
                anchor.mul_add(self.bounds.width, self.bounds.x) + state.dx as f32,
                base_y + state.dy as f32,
            );
            let color = self
                .palette
                .bubble
                .with_alpha(self.palette.bubble.a * state.opacity as f32);
            canvas.fill_circle(center, self.bubbles.radius() * state.scale as f32, color);
        }
    }

    fn paint_readout(&self, canvas: &mut dyn Canvas) {
        if self.display_value.is_empty() && self.display_unit.is_empty() {
            return;
        }
        let center = self.bounds.center();
        // Rough centering; hosts measure text precisely.
        let width_of = |text: &str, size: f32| text.chars().count() as f32 * size * 0.55;
        let value_style = TextStyle {
            size: VALUE_TEXT_SIZE,
            color: self.palette.on_surface,
            weight: FontWeight::Bold,
        };
        canvas.draw_text(
            &self.display_value,
            Point::new(
                center.x - width_of(&self.display_value, VALUE_TEXT_SIZE) / 2.0,
                center.y - VALUE_TEXT_SIZE / 2.0,
            ),
            &value_style,
        );
        let unit_style = TextStyle {
            size: UNIT_TEXT_SIZE,
            color: self.palette.on_surface,
            weight: FontWeight::Medium,
        };
        canvas.draw_text(
            &self.display_unit,
            Point::new(
                center.x - width_of(&self.display_unit, UNIT_TEXT_SIZE) / 2.0,
                center.y + VALUE_TEXT_SIZE / 2.0,
            ),
            &unit_style,
        );
    }
}

impl Widget for WaterTank {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.wave.tile_width(), DEFAULT_HEIGHT))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        if self.mounted {
            self.wave.on_layout(bounds.width);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.bounds.size().is_drawable() {
            return;
        }
        canvas.fill_rounded_rect(self.bounds, TANK_CORNER_RADIUS, self.palette.surface);
        canvas.push_clip(self.bounds);

        let (back, front) = self.palette.wave_shades();
        let tile = tile_path(self.wave.tile_width(), self.wave_config.height);
        self.paint_wave(canvas, &tile, WaveLayer::Back, back);
        let line = self.water_line();
        canvas.fill_rect(
            Rect::new(self.bounds.x, line, self.bounds.width, self.bounds.bottom() - line),
            front,
        );
        self.paint_wave(canvas, &tile, WaveLayer::Front, front);
        self.paint_bubbles(canvas);

        canvas.pop_clip();
        canvas.stroke_rounded_rect(self.bounds, TANK_CORNER_RADIUS, self.palette.tank_outline, 2.0);
        self.paint_readout(canvas);
    }

    // Window resizes reach the tank through `layout` with its own bounds.
    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn tick(&mut self, frame: FrameTime) -> bool {
        if !self.mounted {
            return false;
        }
        let wave = self.wave.advance(frame.delta_ms);
        let bubbles = self.bubbles.advance(frame.delta_ms);
        wave || bubbles
    }

    fn unmount(&mut self) {
        self.mounted = false;
        self.wave.stop();
        self.bubbles.stop();
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Water tank")
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_core::{DrawCommand, RecordingCanvas};

    fn tank(clock: &FrameClock) -> WaterTank {
        let mut tank = WaterTank::new(clock.clone())
            .with_fill_percent(45.0)
            .with_display("1.2", "L");
        tank.layout(Rect::new(0.0, 0.0, 300.0, 400.0));
        tank
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    #[test]
    fn test_creation_starts_wave_loops() {
        let clock = FrameClock::new();
        let tank = WaterTank::new(clock.clone());
        assert!(tank.wave().is_running());
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_unmount_leaves_no_pending_frames() {
        let clock = FrameClock::new();
        let mut tank = tank(&clock);
        tank.set_animated(true);
        assert_eq!(clock.pending(), 2);
        tank.tick(clock.advance(16.0));
        tank.unmount();
        assert_eq!(clock.pending(), 0);
        assert!(!tank.tick(clock.advance(16.0)));
    }

    #[test]
    fn test_unmounted_tank_ignores_trigger_layout_and_tick() {
        let clock = FrameClock::new();
        let mut tank = WaterTank::new(clock.clone());
        tank.unmount();
        assert!(!tank.is_mounted());

        assert!(!tank.set_animated(true));
        assert!(!tank.bubbles().is_active());
        assert_eq!(clock.pending(), 0);

        tank.layout(Rect::new(0.0, 0.0, 412.0, 400.0));
        assert_eq!(clock.pending(), 0);
        assert!(!tank.wave().is_running());
        assert_eq!(tank.bounds().width, 412.0);

        assert!(!tank.tick(clock.advance(16.0)));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_tick_keeps_running_while_mounted() {
        let clock = FrameClock::new();
        let mut tank = tank(&clock);
        for _ in 0..300 {
            assert!(tank.tick(clock.advance(16.0)));
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    #[test]
    fn test_fill_percent_clamped() {
        let clock = FrameClock::new();
        let mut tank = tank(&clock);
        tank.set_fill_percent(100.0);
        assert_eq!(tank.fill().percent(), 65.0);
        tank.set_fill_percent(-3.0);
        assert_eq!(tank.fill().percent(), 25.0);
        assert_eq!(tank.water_line(), 300.0);
    }

    #[test]
    fn test_animated_edge_triggers_bubbles() {
        let clock = FrameClock::new();
        let mut tank = tank(&clock);
        assert!(tank.set_animated(true));
        assert!(!tank.set_animated(true));
        assert!(tank.bubbles().is_active());
    }

    #[test]
    fn test_layout_adopts_tile_width() {
        let clock = FrameClock::new();
        let tank = tank(&clock);
        assert_eq!(tank.wave().tile_width(), 300.0);
        let mut wide = tank;
        wide.layout(Rect::new(0.0, 0.0, 412.0, 400.0));
        assert_eq!(wide.wave().tile_width(), 412.0);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_window_resize_keeps_measured_tile_width() {
        let clock = FrameClock::new();
        let mut tank = WaterTank::new(clock.clone());
        tank.layout(Rect::new(37.5, 200.0, 300.0, 400.0));
        assert!(tank
            .event(&Event::Resize {
                width: 375.0,
                height: 812.0
            })
            .is_none());
        assert_eq!(tank.wave().tile_width(), tank.bounds().width);
        assert_eq!(tank.wave().tile_width(), 300.0);

        tank.layout(Rect::new(24.0, 96.0, 327.0, 400.0));
        assert_eq!(tank.wave().tile_width(), 327.0);
    }

    // =========================================================================
    // Paint
    // =========================================================================

    #[test]
    fn test_paint_order() {
        let clock = FrameClock::new();
        let tank = tank(&clock);
        let mut canvas = RecordingCanvas::new();
        tank.paint(&mut canvas);
        let top = canvas.commands();
        assert!(matches!(top[0], DrawCommand::Rect { .. }));
        let DrawCommand::Clip { children, .. } = &top[1] else {
            panic!("Expected Clip, got {:?}", top[1]);
        };
        // back copies, body rect, front copies
        assert_eq!(children.len(), 5);
        assert!(matches!(children[2], DrawCommand::Rect { .. }));
        assert!(children
            .iter()
            .enumerate()
            .all(|(i, c)| i == 2 || matches!(c, DrawCommand::Group { .. })));
        assert!(matches!(top[2], DrawCommand::Rect { .. }));
        let texts: Vec<&str> = top
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["1.2", "L"]);
    }

    #[test]
    fn test_paint_bubbles_when_triggered() {
        let clock = FrameClock::new();
        let mut tank = tank(&clock);
        tank.set_animated(true);
        tank.tick(clock.advance(200.0));
        let mut canvas = RecordingCanvas::new();
        tank.paint(&mut canvas);
        let circles = canvas
            .all_commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 3);
    }

    #[test]
    fn test_paint_skips_before_layout() {
        let tank = WaterTank::new(FrameClock::new());
        let mut canvas = RecordingCanvas::new();
        tank.paint(&mut canvas);
        assert!(canvas.is_empty());
    }
}
