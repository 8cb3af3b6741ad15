//! Seamless wave scroll: two layers of a tileable wave strip looping in
//! opposite directions at different speeds.
//!
//! Each layer's offset runs from 0 to exactly one tile width and then snaps
//! back to 0 in zero time. The strip is drawn twice back to back, so the
//! frame after the snap is pixel-identical to the frame before it.

use tracing::{debug, warn};
use vitalis_core::{
    AnimatedValue, FrameClock, FrameRequest, PathData, Progress, Track, WaveConfig,
};

/// Width of the reference tile the wave path is authored in.
pub const REFERENCE_WIDTH: f32 = 1000.0;
/// Height of the reference tile.
pub const REFERENCE_HEIGHT: f32 = 100.0;

/// One wave tile scaled to `width` × `height`.
///
/// Two crests across the tile; the left and right edges meet at the same
/// height and slope so copies join without a seam.
#[must_use]
pub fn tile_path(width: f32, height: f32) -> PathData {
    let mut path = PathData::new();
    path.move_to(0.0, 50.0)
        .quad_to(125.0, 10.0, 250.0, 50.0)
        .quad_to(375.0, 90.0, 500.0, 50.0)
        .quad_to(625.0, 10.0, 750.0, 50.0)
        .quad_to(875.0, 90.0, 1000.0, 50.0)
        .line_to(1000.0, 100.0)
        .line_to(0.0, 100.0)
        .close();
    path.scale(width / REFERENCE_WIDTH, height / REFERENCE_HEIGHT)
}

/// Which way a layer scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveLayer {
    /// Darker layer, scrolls right
    Back,
    /// Lighter layer, scrolls left
    Front,
}

/// Drives the two wave offsets.
#[derive(Debug)]
pub struct WaveEngine {
    back: AnimatedValue,
    front: AnimatedValue,
    tile_width: f32,
    config: WaveConfig,
    clock: FrameClock,
    frame: Option<FrameRequest>,
}

impl WaveEngine {
    /// Create an idle engine using the default tile width.
    #[must_use]
    pub fn new(clock: FrameClock, config: WaveConfig) -> Self {
        Self {
            back: AnimatedValue::new(0.0),
            front: AnimatedValue::new(0.0),
            tile_width: config.default_width,
            config,
            clock,
            frame: None,
        }
    }

    /// Start both loops from offset 0.
    pub fn start(&mut self) {
        let width = f64::from(self.tile_width);
        self.back.set_value(0.0);
        self.front.set_value(0.0);
        self.back.start(
            Track::timing(width, self.config.back_duration_ms)
                .then(Track::timing(0.0, 0.0))
                .repeat_forever(),
        );
        self.front.start(
            Track::timing(-width, self.config.front_duration_ms)
                .then(Track::timing(0.0, 0.0))
                .repeat_forever(),
        );
        if self.frame.is_none() {
            self.frame = Some(self.clock.request());
        }
        debug!(tile_width = self.tile_width, "wave loops started");
    }

    /// Stop both loops and release the frame request.
    pub fn stop(&mut self) {
        if self.frame.take().is_some() {
            debug!("wave loops stopped");
        }
        self.back.stop();
        self.front.stop();
    }

    /// Whether the loops are running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Adopt a measured width. Running loops restart when it changes.
    ///
    /// Returns `true` if the tile width changed.
    pub fn on_layout(&mut self, width: f32) -> bool {
        if !(width.is_finite() && width > 0.0) {
            warn!(width, "ignoring degenerate wave width");
            return false;
        }
        if (width - self.tile_width).abs() <= f32::EPSILON {
            return false;
        }
        debug!(from = self.tile_width, to = width, "wave tile width changed");
        self.tile_width = width;
        if self.is_running() {
            self.stop();
            self.start();
        }
        true
    }

    /// Advance both offsets. Returns `true` while running.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        let back = self.back.advance(dt_ms);
        let front = self.front.advance(dt_ms);
        let running = back == Progress::Running || front == Progress::Running;
        if !running {
            self.frame = None;
        }
        running
    }

    /// Current tile width.
    #[must_use]
    pub const fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Current offset of a layer.
    #[must_use]
    pub fn offset(&self, layer: WaveLayer) -> f32 {
        match layer {
            WaveLayer::Back => self.back.value() as f32,
            WaveLayer::Front => self.front.value() as f32,
        }
    }

    /// Offset of the back layer, in `[0, tile_width]`.
    #[must_use]
    pub fn back_offset(&self) -> f32 {
        self.offset(WaveLayer::Back)
    }

    /// Offset of the front layer, in `[-tile_width, 0]`.
    #[must_use]
    pub fn front_offset(&self) -> f32 {
        self.offset(WaveLayer::Front)
    }

    /// Left edges of the two tile copies for a layer.
    ///
    /// The back layer moves right, so its second copy trails on the left;
    /// the front layer moves left, so its second copy leads on the right.
    /// Either way the pair covers `0..tile_width` at every offset.
    #[must_use]
    pub fn copies(&self, layer: WaveLayer) -> [f32; 2] {
        let offset = self.offset(layer);
        match layer {
            WaveLayer::Back => [offset - self.tile_width, offset],
            WaveLayer::Front => [offset, offset + self.tile_width],
        }
    }
}
