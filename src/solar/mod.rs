//! The solar system scene.
//!
//! - `catalog` lists the bodies with their hand-picked sizes and speeds
//! - `body` builds a planet (pivot, sphere and optional ring)
//! - `system` is the flow animating the sun and the planets
//! - `starfield` is the flow drawing the star background

use instant::Instant;

use crate::flow::{FlowConstructor, GraphicsFlow, constructor};

pub mod body;
pub mod catalog;
pub mod starfield;
pub mod system;

pub use body::{Planet, create_planet};
pub use starfield::Starfield;
pub use system::SolarSystem;

/// State shared by the solar system flows.
#[derive(Debug)]
pub struct OrreryState {
    frames: u64,
    frames_at_last_rate: u64,
    last_rate: Instant,
}

impl Default for OrreryState {
    fn default() -> Self {
        Self {
            frames: 0,
            frames_at_last_rate: 0,
            last_rate: Instant::now(),
        }
    }
}

impl OrreryState {
    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Frames rendered since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames per second since the previous call.
    pub fn frame_rate(&mut self) -> f64 {
        let elapsed = self.last_rate.elapsed().as_secs_f64();
        let frames = self.frames - self.frames_at_last_rate;
        self.frames_at_last_rate = self.frames;
        self.last_rate = Instant::now();
        if elapsed > 0.0 {
            frames as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// The star background first, then the bodies.
pub fn flows() -> Vec<FlowConstructor<OrreryState>> {
    vec![
        constructor(|ctx| async move {
            Box::new(Starfield::new(ctx).await) as Box<dyn GraphicsFlow<OrreryState>>
        }),
        constructor(|ctx| async move {
            Box::new(SolarSystem::new(ctx).await) as Box<dyn GraphicsFlow<OrreryState>>
        }),
    ]
}
