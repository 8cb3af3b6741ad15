//! Integration tests for vitalis-widgets: widgets driven by a shared frame
//! clock the way a host render loop drives them.

use proptest::prelude::*;
use vitalis_core::{
    DrawCommand, Event, FrameClock, MotionConfig, PathSegment, Point, Rect, RecordingCanvas,
    Sweep, Widget,
};
use vitalis_widgets::{
    generate_path, BubbleSequencer, EmitResult, FillLevel, NavigationEvent, NavigationHost,
    TabBar, TabRoute, WaterTank, WaveEngine, WaveLayer,
};

#[derive(Default)]
struct RecordingHost {
    pressed: Vec<String>,
    navigated: Vec<String>,
}

impl NavigationHost for RecordingHost {
    fn emit(&mut self, event: &NavigationEvent) -> EmitResult {
        self.pressed.push(event.target.clone());
        EmitResult::default()
    }

    fn navigate(&mut self, route: &TabRoute) {
        self.navigated.push(route.key.clone());
    }
}

fn routes() -> Vec<TabRoute> {
    ["HydrationTab", "WorkoutTab", "HomeTab", "ProgressTab", "ProfileTab"]
        .iter()
        .map(|name| TabRoute::new(name.to_lowercase(), *name))
        .collect()
}

/// Run every frame the clock has scheduled, up to `limit`.
fn pump(clock: &FrameClock, widget: &mut dyn Widget, dt: f64, limit: usize) -> usize {
    let mut frames = 0;
    while clock.has_pending() && frames < limit {
        widget.tick(clock.advance(dt));
        frames += 1;
    }
    frames
}

// =============================================================================
// Tab bar
// =============================================================================

proptest! {
    #[test]
    fn prop_tab_path_closed_and_centered(width in 80.0f32..2000.0, height in 40.0f32..200.0) {
        let path = generate_path(width, height);
        prop_assert!(path.is_closed());
        let notch = path.segments().windows(2).find_map(|pair| match pair {
            [PathSegment::LineTo(start), PathSegment::ArcTo { sweep: Sweep::CounterClockwise, to, .. }] => {
                Some((*start, *to))
            }
            _ => None,
        });
        let (start, end) = notch.unwrap();
        prop_assert!(((start.x + end.x) / 2.0 - width / 2.0).abs() < 1e-2);
        prop_assert_eq!(start.y, 0.0);
        prop_assert_eq!(end.y, 0.0);
    }
}

#[test]
fn test_focus_change_animates_both_tabs_concurrently() {
    let clock = FrameClock::new();
    let mut bar = TabBar::new(routes(), clock.clone());
    bar.layout(Rect::new(0.0, 736.0, 375.0, 64.0));
    bar.set_active_index(2);

    for _ in 0..10 {
        bar.tick(clock.advance(20.0));
    }
    let old = bar.controller(0).unwrap();
    let new = bar.controller(2).unwrap();
    assert!((old.opacity() - 0.6).abs() < 1e-9);
    assert!((new.opacity() - 1.0).abs() < 1e-9);

    pump(&clock, &mut bar, 16.0, 1000);
    assert_eq!(clock.pending(), 0);
    let old = bar.controller(0).unwrap();
    let new = bar.controller(2).unwrap();
    assert_eq!((old.scale(), old.opacity()), (0.9, 0.6));
    assert_eq!((new.scale(), new.opacity()), (1.0, 1.0));
}

#[test]
fn test_tapping_focused_tab_does_not_navigate() {
    let mut bar = TabBar::new(routes(), FrameClock::new());
    bar.layout(Rect::new(0.0, 736.0, 375.0, 64.0));
    let mut host = RecordingHost::default();

    bar.handle_event(
        &Event::GestureTap {
            position: Point::new(20.0, 770.0),
        },
        &mut host,
    );
    assert_eq!(host.pressed, vec!["hydrationtab".to_string()]);
    assert!(host.navigated.is_empty());

    bar.handle_event(
        &Event::GestureTap {
            position: Point::new(187.5, 720.0),
        },
        &mut host,
    );
    assert_eq!(host.navigated, vec!["hometab".to_string()]);
}

// =============================================================================
// Water tank
// =============================================================================

#[test]
fn test_fill_clamping_inputs() {
    let outputs: Vec<f32> = [-10.0, 0.0, 25.0, 45.0, 65.0, 100.0]
        .into_iter()
        .map(|p| FillLevel::new(p).percent())
        .collect();
    assert_eq!(outputs, vec![25.0, 25.0, 25.0, 45.0, 65.0, 65.0]);
}

#[test]
fn test_back_wave_cycle_returns_to_zero_and_keeps_moving() {
    let clock = FrameClock::new();
    let mut wave = WaveEngine::new(clock.clone(), MotionConfig::default().wave);
    wave.start();
    // 2300 ms in 25 ms frames lands exactly on the cycle boundary.
    for _ in 0..92 {
        wave.advance(clock.advance(25.0).delta_ms);
    }
    assert_eq!(wave.offset(WaveLayer::Back), 0.0);
    wave.advance(clock.advance(25.0).delta_ms);
    assert!(wave.offset(WaveLayer::Back) > 0.0);
}

#[test]
fn test_double_trigger_keeps_bubbles_in_range() {
    let clock = FrameClock::new();
    let mut bubbles = BubbleSequencer::new(clock.clone(), MotionConfig::default().bubbles);
    bubbles.trigger();
    for step in 0..120 {
        if step == 20 {
            bubbles.trigger();
        }
        bubbles.advance(clock.advance(16.0).delta_ms);
        for state in bubbles.states() {
            assert!((0.0..=1.0).contains(&state.opacity), "opacity {}", state.opacity);
            assert!((0.0..=1.0).contains(&state.scale), "scale {}", state.scale);
        }
    }
    assert!(!bubbles.is_active());
}

#[test]
fn test_unmounting_tank_cancels_all_frames() {
    let clock = FrameClock::new();
    let mut tank = WaterTank::new(clock.clone()).with_fill_percent(50.0);
    tank.layout(Rect::new(0.0, 0.0, 320.0, 400.0));
    tank.set_animated(true);
    for _ in 0..5 {
        tank.tick(clock.advance(16.0));
    }
    assert!(clock.has_pending());
    tank.unmount();
    assert_eq!(clock.pending(), 0);

    tank.set_animated(false);
    tank.set_animated(true);
    tank.layout(Rect::new(0.0, 0.0, 280.0, 400.0));
    assert_eq!(pump(&clock, &mut tank, 16.0, 10), 0);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_render_loop_paints_both_widgets() {
    let clock = FrameClock::new();
    let mut bar = TabBar::new(routes(), clock.clone());
    let mut tank = WaterTank::new(clock.clone()).with_display("750", "ml");
    bar.layout(Rect::new(0.0, 736.0, 375.0, 64.0));
    tank.layout(Rect::new(37.5, 200.0, 300.0, 400.0));
    bar.set_active_index(4);

    for _ in 0..30 {
        let frame = clock.advance(16.0);
        bar.tick(frame);
        tank.tick(frame);
    }

    let mut canvas = RecordingCanvas::new();
    tank.paint(&mut canvas);
    bar.paint(&mut canvas);
    let all = canvas.all_commands();
    assert!(all.iter().any(|c| matches!(c, DrawCommand::Clip { .. })));
    assert!(all.iter().any(|c| matches!(c, DrawCommand::Text { content, .. } if content == "ml")));
    assert!(all.iter().any(|c| matches!(c, DrawCommand::Glyph { name, .. } if name == "person")));

    let json = serde_json::to_string(&canvas.take_commands()).unwrap();
    assert!(json.contains("FillPath"));
}
