//! Animated navigation and hydration widgets for Vitalis.
//!
//! - [`TabBar`]: bottom tab bar with a notched outline, a raised home button
//!   and spring-driven focus animation
//! - [`WaterTank`]: fill gauge with a seamlessly looping two-layer wave and a
//!   staggered bubble burst
//!
//! Widgets own their animation state and hold a [`vitalis_core::FrameRequest`]
//! only while something is moving.

pub mod tab_bar;
pub mod water_tank;

pub use tab_bar::{
    generate_path, tab_label, EmitResult, NavigationEvent, NavigationEventKind, NavigationHost,
    TabAnimationController, TabBar, TabBarPath, TabOptions, TabPressed, TabRoute,
};
pub use water_tank::{
    tile_path, BubbleSequencer, BubbleState, FillLevel, WaterTank, WaveEngine, WaveLayer,
};
