//! Animated bottom tab bar with a notched outline and a raised home button.

mod controller;
mod icons;
mod path;

pub use controller::TabAnimationController;
pub use icons::{glyph_for, icon_for, FALLBACK_FILLED, FALLBACK_OUTLINE};
pub use path::{generate_path, TabBarPath, CORNER_RADIUS, CUTOUT_RADIUS};

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use tracing::debug;
use vitalis_core::{
    Canvas, Constraints, Event, FontWeight, FrameClock, FrameRequest, FrameTime, LayoutResult,
    MouseButton, Palette, PathData, Point, Rect, Size, TabConfig, TextStyle, Transform2D, TypeId,
    Widget,
};

/// Identity of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRoute {
    /// Unique key
    pub key: String,
    /// Route name used for icon lookup and the default label
    pub name: String,
}

impl TabRoute {
    /// Create a route.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Per-route display options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabOptions {
    /// Label override
    pub title: Option<String>,
}

/// Kind of navigation event emitted by the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// `tabPress`
    TabPress,
    /// `tabLongPress`
    TabLongPress,
}

/// Event delivered to navigation listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// Event kind
    pub kind: NavigationEventKind,
    /// Key of the route the event targets
    pub target: String,
    /// Whether listeners may prevent the default action
    pub can_prevent_default: bool,
}

/// Listener verdict for an emitted event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitResult {
    /// A listener prevented the default action
    pub default_prevented: bool,
}

/// The navigation container the bar reports to.
pub trait NavigationHost {
    /// Deliver an event to listeners.
    fn emit(&mut self, event: &NavigationEvent) -> EmitResult;

    /// Switch to `route`.
    fn navigate(&mut self, route: &TabRoute);
}

/// Message produced when a tab is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPressed {
    /// Index of the pressed tab
    pub index: usize,
    /// Route key
    pub key: String,
    /// Long press rather than a tap
    pub long_press: bool,
}

/// Label for a route: the configured title, or the route name, with the
/// first `Tab` removed.
#[must_use]
pub fn tab_label(route: &TabRoute, options: Option<&TabOptions>) -> String {
    let raw = options
        .and_then(|o| o.title.as_deref())
        .unwrap_or(&route.name);
    raw.replacen("Tab", "", 1)
}

/// Bottom tab bar widget.
pub struct TabBar {
    routes: Vec<TabRoute>,
    options: BTreeMap<String, TabOptions>,
    active_index: usize,
    controllers: Vec<TabAnimationController>,
    config: TabConfig,
    palette: Palette,
    outline: PathData,
    bounds: Rect,
    pressed: Option<usize>,
    clock: FrameClock,
    frame: Option<FrameRequest>,
    test_id_value: Option<String>,
}

impl TabBar {
    /// Create a bar with the first route focused.
    #[must_use]
    pub fn new(routes: Vec<TabRoute>, clock: FrameClock) -> Self {
        let config = TabConfig::default();
        let controllers = Self::controllers_for(routes.len(), 0, &config);
        Self {
            routes,
            options: BTreeMap::new(),
            active_index: 0,
            controllers,
            config,
            palette: Palette::default(),
            outline: PathData::new(),
            bounds: Rect::default(),
            pressed: None,
            clock,
            frame: None,
            test_id_value: None,
        }
    }

    fn controllers_for(count: usize, active: usize, config: &TabConfig) -> Vec<TabAnimationController> {
        (0..count)
            .map(|i| TabAnimationController::new(i == active, config))
            .collect()
    }

    /// Use a tab config. Animations restart from resting values.
    #[must_use]
    pub fn with_config(mut self, config: TabConfig) -> Self {
        self.controllers = Self::controllers_for(self.routes.len(), self.active_index, &config);
        self.config = config;
        self.outline = PathData::new();
        self
    }

    /// Use a palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set options for the route with `key`.
    #[must_use]
    pub fn with_options(mut self, key: impl Into<String>, options: TabOptions) -> Self {
        self.options.insert(key.into(), options);
        self
    }

    /// Start with `index` focused, without animating.
    #[must_use]
    pub fn with_active_index(mut self, index: usize) -> Self {
        if index < self.routes.len() {
            self.active_index = index;
            self.controllers = Self::controllers_for(self.routes.len(), index, &self.config);
        }
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Routes in display order.
    #[must_use]
    pub fn routes(&self) -> &[TabRoute] {
        &self.routes
    }

    /// Focused index.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Animation state of tab `index`.
    #[must_use]
    pub fn controller(&self, index: usize) -> Option<&TabAnimationController> {
        self.controllers.get(index)
    }

    /// Label shown under tab `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<String> {
        let route = self.routes.get(index)?;
        Some(tab_label(route, self.options.get(&route.key)))
    }

    /// Current outline in bar-local coordinates.
    #[must_use]
    pub const fn outline(&self) -> &PathData {
        &self.outline
    }

    /// Whether tab `index` is the raised home button.
    #[must_use]
    pub fn is_home(&self, index: usize) -> bool {
        self.routes
            .get(index)
            .is_some_and(|r| r.name == self.config.home_route)
    }

    /// Whether any tab is mid-animation.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.controllers.iter().any(TabAnimationController::is_animating)
    }

    /// Apply a new focused index from the navigation state.
    pub fn set_active_index(&mut self, index: usize) {
        if index >= self.routes.len() || index == self.active_index {
            return;
        }
        debug!(from = self.active_index, to = index, "tab focus changed");
        self.active_index = index;
        for (i, controller) in self.controllers.iter_mut().enumerate() {
            controller.set_focused(i == index);
        }
        if self.is_animating() && self.frame.is_none() {
            self.frame = Some(self.clock.request());
        }
    }

    /// Handle a tap on tab `index`.
    ///
    /// Always emits a cancelable `tabPress`. Navigates only when the tab is
    /// not already focused and no listener prevented the default. Returns
    /// whether navigation was requested.
    pub fn press(&self, index: usize, host: &mut dyn NavigationHost) -> bool {
        let Some(route) = self.routes.get(index) else {
            return false;
        };
        let result = host.emit(&NavigationEvent {
            kind: NavigationEventKind::TabPress,
            target: route.key.clone(),
            can_prevent_default: true,
        });
        let focused = index == self.active_index;
        if focused || result.default_prevented {
            debug!(
                key = %route.key,
                focused,
                prevented = result.default_prevented,
                "tab press without navigation"
            );
            return false;
        }
        debug!(key = %route.key, "navigating to tab");
        host.navigate(route);
        true
    }

    /// Handle a long press on tab `index`.
    pub fn long_press(&self, index: usize, host: &mut dyn NavigationHost) {
        if let Some(route) = self.routes.get(index) {
            host.emit(&NavigationEvent {
                kind: NavigationEventKind::TabLongPress,
                target: route.key.clone(),
                can_prevent_default: false,
            });
        }
    }

    /// Run an input event through hit testing and report any press to
    /// `host`.
    pub fn handle_event(
        &mut self,
        event: &Event,
        host: &mut dyn NavigationHost,
    ) -> Option<TabPressed> {
        let message = self.event(event)?;
        let pressed = message.downcast::<TabPressed>().ok()?;
        if pressed.long_press {
            self.long_press(pressed.index, host);
        } else {
            self.press(pressed.index, host);
        }
        Some(*pressed)
    }

    fn slot_width(&self) -> f32 {
        if self.routes.is_empty() {
            0.0
        } else {
            self.bounds.width / self.routes.len() as f32
        }
    }

    /// Bounds of the slot for tab `index`.
    #[must_use]
    pub fn tab_rect(&self, index: usize) -> Rect {
        let width = self.slot_width();
        Rect::new(
            (index as f32).mul_add(width, self.bounds.x),
            self.bounds.y,
            width,
            self.bounds.height,
        )
    }

    fn home_center(&self, index: usize) -> Point {
        let slot = self.tab_rect(index);
        Point::new(
            slot.center().x,
            self.bounds.y - self.config.home_lift + self.config.home_diameter / 2.0,
        )
    }

    /// Tab under `point`, including the part of the home button above the
    /// bar.
    #[must_use]
    pub fn tab_at_point(&self, point: Point) -> Option<usize> {
        if self.routes.is_empty() || self.slot_width() <= 0.0 {
            return None;
        }
        let home_radius = self.config.home_diameter / 2.0;
        let home = (0..self.routes.len())
            .find(|&i| self.is_home(i) && self.home_center(i).distance(&point) <= home_radius);
        if home.is_some() {
            return home;
        }
        if !self.bounds.contains_point(&point) {
            return None;
        }
        let index = ((point.x - self.bounds.x) / self.slot_width()) as usize;
        Some(index.min(self.routes.len() - 1))
    }

    fn build_outline(&self) -> PathData {
        TabBarPath::from(&self.config).generate(self.bounds.width, self.bounds.height)
    }

    fn paint_tab(&self, index: usize, canvas: &mut dyn Canvas) {
        let (Some(route), Some(controller)) = (self.routes.get(index), self.controllers.get(index))
        else {
            return;
        };
        let focused = controller.is_focused();
        let glyph = glyph_for(&route.name, focused, &self.config.icons);
        let slot = self.tab_rect(index);

        if self.is_home(index) {
            let center = self.home_center(index);
            let radius = self.config.home_diameter / 2.0;
            canvas.push_transform(Transform2D::scale_about(center, controller.scale() as f32));
            canvas.push_opacity(controller.opacity() as f32);
            if focused {
                canvas.fill_circle(center, radius, self.palette.primary);
                canvas.draw_glyph(&glyph, center, self.config.home_icon_size, self.palette.on_primary);
            } else {
                canvas.fill_circle(center, radius, self.palette.surface);
                canvas.stroke_circle(center, radius, self.palette.primary, 2.0);
                canvas.draw_glyph(&glyph, center, self.config.home_icon_size, self.palette.primary);
            }
            canvas.pop_opacity();
            canvas.pop_transform();
            return;
        }

        let tint = if focused {
            self.palette.primary
        } else {
            self.palette.inactive
        };
        let center = slot.center();
        canvas.push_transform(Transform2D::scale_about(center, controller.scale() as f32));
        canvas.push_opacity(controller.opacity() as f32);
        canvas.draw_glyph(
            &glyph,
            Point::new(center.x, center.y - self.config.label_size / 2.0),
            self.config.icon_size,
            tint,
        );
        let label = tab_label(route, self.options.get(&route.key));
        let style = TextStyle {
            size: self.config.label_size,
            color: tint,
            weight: if focused {
                FontWeight::Medium
            } else {
                FontWeight::Normal
            },
        };
        // Rough centering; hosts measure text precisely.
        let text_width = label.chars().count() as f32 * self.config.label_size * 0.55;
        canvas.draw_text(
            &label,
            Point::new(
                center.x - text_width / 2.0,
                center.y + self.config.icon_size / 2.0 + self.config.label_size / 2.0,
            ),
            &style,
        );
        canvas.pop_opacity();
        canvas.pop_transform();
    }
}

impl std::fmt::Debug for TabBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabBar")
            .field("routes", &self.routes)
            .field("active_index", &self.active_index)
            .field("bounds", &self.bounds)
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

impl Widget for TabBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.biggest().width, self.config.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        if bounds.size() != self.bounds.size() || self.outline.is_empty() {
            self.bounds = bounds;
            self.outline = self.build_outline();
        } else {
            self.bounds = bounds;
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.outline.is_empty() {
            canvas.push_transform(Transform2D::translate(self.bounds.x, self.bounds.y));
            canvas.fill_path(&self.outline, self.palette.surface);
            canvas.pop_transform();
        }
        for index in 0..self.routes.len() {
            self.paint_tab(index, canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let (index, long_press) = match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.pressed = self.tab_at_point(*position);
                return None;
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let down = self.pressed.take()?;
                let up = self.tab_at_point(*position)?;
                if down != up {
                    return None;
                }
                (up, false)
            }
            Event::GestureTap { position } => (self.tab_at_point(*position)?, false),
            Event::GestureLongPress { position } => {
                self.pressed = None;
                (self.tab_at_point(*position)?, true)
            }
            _ => return None,
        };
        let key = self.routes.get(index)?.key.clone();
        Some(Box::new(TabPressed {
            index,
            key,
            long_press,
        }))
    }

    fn tick(&mut self, frame: FrameTime) -> bool {
        let mut running = false;
        for controller in &mut self.controllers {
            running |= controller.advance(frame.delta_ms);
        }
        if !running {
            self.frame = None;
        }
        running
    }

    fn unmount(&mut self) {
        for controller in &mut self.controllers {
            controller.finish();
        }
        self.frame = None;
        self.pressed = None;
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Tab bar")
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
