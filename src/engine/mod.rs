//! The engine context: one owned struct per hosted animation, holding the
//! viewport, timeline, cell collection and scheduled-frame handle.

mod render_loop;
mod resize;
mod scheduler;

pub use render_loop::{render_frame, FrameOutcome, FrameThrottle};
pub use resize::{FixedSize, ResizeSource, Viewport};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::simulation::{Direction, Pixel, Timeline};
use crate::surface::Surface;

pub struct PixelEngine<S, F> {
    config: EngineConfig,
    rng: StdRng,
    surface: Option<S>,
    scheduler: F,
    viewport: Viewport,
    timeline: Timeline,
    pixels: Vec<Pixel>,
    pending_frame: Option<FrameHandle>,
    throttle: FrameThrottle,
    phase: Option<Direction>,
    observing: bool,
}

impl<S: Surface, F: FrameScheduler> PixelEngine<S, F> {
    /// Create an idle engine. Nothing is built or scheduled until the first
    /// size notification arrives through [`PixelEngine::start`].
    pub fn new(config: EngineConfig, scheduler: F) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let timeline = Timeline::new(config.animation_duration);
        let throttle = FrameThrottle::new(config.frame_interval());

        Self {
            config,
            rng,
            surface: None,
            scheduler,
            viewport: Viewport::default(),
            timeline,
            pixels: Vec::new(),
            pending_frame: None,
            throttle,
            phase: None,
            observing: false,
        }
    }

    pub fn with_surface(config: EngineConfig, surface: S, scheduler: F) -> Self {
        let mut engine = Self::new(config, scheduler);
        engine.attach_surface(surface);
        engine
    }

    /// Attach a drawing surface, sizing its backing store to the viewport.
    pub fn attach_surface(&mut self, mut surface: S) {
        surface.resize(self.viewport.width, self.viewport.height);
        self.surface = Some(surface);
    }

    /// Detach the surface; subsequent ticks skip until one is attached.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Cancel the scheduled frame, if any.
    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            log::trace!("Cancelling frame {}", handle.id());
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Request the next frame. A handle that never fired is superseded.
    fn schedule_frame(&mut self) {
        self.cancel_frame();
        self.pending_frame = Some(self.scheduler.request_frame());
    }
}
