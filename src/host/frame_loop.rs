//! Frame-driven game loop
//!
//! The host's scheduler calls `FrameLoop::on_frame` once per display refresh.
//! The loop ticks the simulation, draws, and asks for the next frame until
//! `stop` is called. Ticking waits for every registered asset to load.

use crate::renderer::{RenderSurface, draw_frame};
use crate::sim::{FrameReport, GameState, tick};

/// Something that can ask the display for one more frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Drives the simulation from frame callbacks
#[derive(Debug)]
pub struct FrameLoop<S> {
    scheduler: S,
    running: bool,
    /// Assets still loading
    assets_pending: usize,
    /// Frames simulated by this loop
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// Create a stopped loop waiting on `assets` loads
    pub fn new(scheduler: S, assets: usize) -> Self {
        Self {
            scheduler,
            running: false,
            assets_pending: assets,
            frames: 0,
        }
    }

    /// Record one finished asset load
    pub fn asset_loaded(&mut self) {
        self.assets_pending = self.assets_pending.saturating_sub(1);
        if self.assets_pending == 0 {
            log::info!("All assets loaded");
        }
    }

    pub fn assets_ready(&self) -> bool {
        self.assets_pending == 0
    }

    /// Begin requesting frames (no-op if already running)
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.scheduler.request_frame();
        log::info!("Frame loop started");
    }

    /// Stop after the current frame; later callbacks are ignored
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Frame loop stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// One display refresh: tick and draw (once assets are ready), then
    /// request the next frame. Returns the tick report if the game advanced.
    pub fn on_frame<R: RenderSurface + ?Sized>(
        &mut self,
        state: &mut GameState,
        surface: &mut R,
    ) -> Option<FrameReport> {
        if !self.running {
            return None;
        }

        let report = if self.assets_ready() {
            let report = tick(state);
            draw_frame(state, surface);
            self.frames += 1;
            Some(report)
        } else {
            None
        };

        self.scheduler.request_frame();
        report
    }
}
