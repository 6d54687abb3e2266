use std::time::Instant;

use pixel_wave::{
    Direction, EngineConfig, FixedSize, FrameOutcome, ManualScheduler, PixelEngine, RasterSurface,
};

/// Totals from a headless run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: u32,
    pub growing: u32,
    pub shrinking: u32,
    /// Shrink waves that finished hiding every cell
    pub completed_cycles: u32,
    pub cells: usize,
    pub painted: usize,
}

/// Drive the engine against an in-memory raster on a synthetic clock, one
/// frame interval per step.
pub fn run(config: EngineConfig, width: u32, height: u32, frames: u32) -> RunSummary {
    let interval = config.frame_interval();
    let mut engine = PixelEngine::with_surface(config, RasterSurface::default(), ManualScheduler::new());
    let mut source = FixedSize::new(f64::from(width), f64::from(height));
    engine.start(&mut source);

    let mut summary = RunSummary {
        cells: engine.pixels().len(),
        ..Default::default()
    };
    let start = Instant::now();

    for i in 0..frames {
        if !engine.scheduler_mut().take_due() {
            break;
        }
        if let FrameOutcome::Rendered {
            direction,
            all_hidden,
        } = engine.tick(start + interval * i)
        {
            summary.rendered += 1;
            match direction {
                Direction::Growing => summary.growing += 1,
                Direction::Shrinking => summary.shrinking += 1,
            }
            if all_hidden {
                summary.completed_cycles += 1;
            }
        }
    }

    summary.painted = engine.surface().map_or(0, RasterSurface::painted_count);
    log::info!(
        "Headless run: {} frames ({} growing, {} shrinking), {} completed cycles, {} cells, {} painted pixels, ticker {}",
        summary.rendered,
        summary.growing,
        summary.shrinking,
        summary.completed_cycles,
        summary.cells,
        summary.painted,
        engine.timeline().ticker()
    );

    engine.stop(&mut source);
    summary
}
