use crate::engine::scheduler::FrameScheduler;
use crate::engine::PixelEngine;
use crate::simulation::build_grid;
use crate::surface::Surface;

/// Device-pixel size of the drawing area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Floor a content box to whole pixels. Negative, NaN and infinite
    /// extents collapse to zero.
    pub fn from_content_box(width: f64, height: f64) -> Self {
        Self::new(floor_extent(width), floor_extent(height))
    }
}

fn floor_extent(value: f64) -> u32 {
    if value.is_finite() {
        value.floor() as u32
    } else {
        0
    }
}

/// Push-based size notifications for the hosting container.
///
/// `observe` starts the subscription and reports the current content box;
/// later changes are delivered by the host through
/// [`PixelEngine::handle_resize`].
pub trait ResizeSource {
    fn observe(&mut self) -> (f64, f64);

    fn disconnect(&mut self);
}

/// A container that never changes size.
#[derive(Clone, Debug)]
pub struct FixedSize {
    width: f64,
    height: f64,
    connected: bool,
}

impl FixedSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl ResizeSource for FixedSize {
    fn observe(&mut self) -> (f64, f64) {
        self.connected = true;
        (self.width, self.height)
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl<S: Surface, F: FrameScheduler> PixelEngine<S, F> {
    /// Subscribe to the container and build the first grid from the size it
    /// reports.
    pub fn start<R: ResizeSource + ?Sized>(&mut self, source: &mut R) {
        if self.observing {
            log::warn!("Engine already observing a container, restarting");
        }
        let (width, height) = source.observe();
        self.observing = true;
        log::info!("Pixel engine started");
        self.handle_resize(width, height);
    }

    /// Rebuild everything for a new container size and restart the loop.
    ///
    /// Any frame scheduled for the old grid is cancelled first so two loops
    /// never write to the same surface.
    pub fn handle_resize(&mut self, width: f64, height: f64) {
        self.cancel_frame();

        self.viewport = Viewport::from_content_box(width, height);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(self.viewport.width, self.viewport.height);
        }

        self.pixels = build_grid(
            self.viewport.width,
            self.viewport.height,
            &self.config,
            &mut self.rng,
        );
        log::debug!(
            "Grid rebuilt for {}x{}: {} cells",
            self.viewport.width,
            self.viewport.height,
            self.pixels.len()
        );

        self.timeline.reset();
        self.phase = None;
        self.schedule_frame();
    }

    /// Cancel the loop and stop observing. Safe to call repeatedly.
    pub fn stop<R: ResizeSource + ?Sized>(&mut self, source: &mut R) {
        self.cancel_frame();
        if self.observing {
            source.disconnect();
            self.observing = false;
            log::info!("Pixel engine stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::{FrameOutcome, ManualScheduler};
    use crate::surface::RasterSurface;
    use std::time::Instant;

    type TestEngine = PixelEngine<RasterSurface, ManualScheduler>;

    fn engine(config: EngineConfig) -> TestEngine {
        PixelEngine::with_surface(config, RasterSurface::default(), ManualScheduler::new())
    }

    fn seeded() -> EngineConfig {
        EngineConfig {
            seed: Some(77),
            ..Default::default()
        }
    }

    #[test]
    fn test_content_box_is_floored() {
        assert_eq!(Viewport::from_content_box(12.9, 7.2), Viewport::new(12, 7));
        assert_eq!(Viewport::from_content_box(-4.0, f64::NAN), Viewport::new(0, 0));
        assert_eq!(Viewport::from_content_box(f64::INFINITY, 3.0), Viewport::new(0, 3));
    }

    #[test]
    fn test_start_builds_grid_and_schedules() {
        let mut source = FixedSize::new(12.0, 12.0);
        let mut engine = engine(EngineConfig {
            max_pixel_size: Some(3),
            ..seeded()
        });
        engine.start(&mut source);

        assert!(source.is_connected());
        assert!(engine.is_observing());
        assert_eq!(engine.viewport(), Viewport::new(12, 12));
        assert_eq!(engine.pixels().len(), 4);
        assert_eq!(engine.scheduler().pending().len(), 1);

        let surface = engine.surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (12, 12));
    }

    #[test]
    fn test_resize_supersedes_pending_frame() {
        let mut engine = engine(seeded());
        engine.start(&mut FixedSize::new(60.0, 60.0));
        let first = engine.pending_frame().unwrap();

        for size in [80.0, 100.0, 120.0] {
            engine.handle_resize(size, size);
        }

        let pending = engine.scheduler().pending();
        assert_eq!(pending.len(), 1);
        assert_ne!(pending[0], first);
        assert_eq!(engine.pending_frame(), Some(pending[0]));
        assert_eq!(engine.scheduler().cancelled_count(), 3);
    }

    #[test]
    fn test_resize_resets_timeline_and_rebuilds() {
        let mut engine = engine(seeded());
        engine.start(&mut FixedSize::new(60.0, 60.0));

        let start = Instant::now();
        let interval = engine.config().frame_interval();
        for i in 0..30 {
            engine.scheduler_mut().take_due();
            engine.tick(start + interval * i);
        }
        assert_eq!(engine.timeline().ticker(), 30.0);
        let old_count = engine.pixels().len();

        engine.handle_resize(120.0, 60.0);
        assert_eq!(engine.timeline().ticker(), 0.0);
        assert!(engine.pixels().len() > old_count);
        assert!(engine.pixels().iter().all(|p| p.size() == 0.0));
        assert_eq!(engine.surface().unwrap().painted_count(), 0);
    }

    #[test]
    fn test_zero_size_container() {
        let mut engine = engine(seeded());
        engine.start(&mut FixedSize::new(0.0, 0.0));
        assert!(engine.pixels().is_empty());

        engine.scheduler_mut().take_due();
        assert!(matches!(
            engine.tick(Instant::now()),
            FrameOutcome::Rendered { .. }
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut source = FixedSize::new(60.0, 60.0);
        let mut engine = engine(seeded());

        // stopping a never-started engine is harmless
        engine.stop(&mut source);
        assert_eq!(engine.scheduler().cancelled_count(), 0);

        engine.start(&mut source);
        engine.stop(&mut source);
        engine.stop(&mut source);

        assert!(!source.is_connected());
        assert!(!engine.is_observing());
        assert!(engine.pending_frame().is_none());
        assert!(engine.scheduler().pending().is_empty());
        assert_eq!(engine.scheduler().cancelled_count(), 1);
    }

    #[test]
    fn test_surface_attached_late_is_sized() {
        let mut engine: TestEngine = PixelEngine::new(seeded(), ManualScheduler::new());
        engine.start(&mut FixedSize::new(30.0, 20.0));
        engine.attach_surface(RasterSurface::default());
        let surface = engine.surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (30, 20));
    }
}
