//! Animation system: easing curves, spring physics, declarative tracks and
//! the frame-driven [`AnimatedValue`] that plays them.
//!
//! Every value is advanced explicitly by its owner with the frame delta, so
//! dropping the owner is all it takes to stop an animation.

mod easing;
mod interpolation;
mod spring;
mod track;
mod value;

pub use easing::Easing;
pub use interpolation::interpolate;
pub use spring::{Spring, SpringConfig};
pub use track::{Repeat, Step, Track};
pub use value::{AnimatedValue, Progress};
