use std::time::{Duration, Instant};

use crate::engine::resize::Viewport;
use crate::engine::scheduler::FrameScheduler;
use crate::engine::PixelEngine;
use crate::simulation::{Direction, Pixel, Timeline};
use crate::surface::Surface;

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No surface attached
    Skipped,
    /// Too soon after the previous rendered frame
    Throttled,
    Rendered {
        direction: Direction,
        /// Shrinking and every cell finished hiding this frame
        all_hidden: bool,
    },
}

/// Caps the effective update rate regardless of how often ticks arrive.
#[derive(Clone, Debug)]
pub struct FrameThrottle {
    interval: Duration,
    previous: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            previous: None,
        }
    }

    /// True if a frame should run at `now`. The first call always runs.
    ///
    /// The remainder of the elapsed time is carried over so the cadence does
    /// not drift when callbacks arrive slightly late.
    pub fn ready(&mut self, now: Instant) -> bool {
        let Some(previous) = self.previous else {
            self.previous = Some(now);
            return true;
        };

        let elapsed = now.saturating_duration_since(previous);
        if elapsed < self.interval {
            return false;
        }

        let interval_nanos = self.interval.as_nanos().max(1);
        let remainder = Duration::from_nanos((elapsed.as_nanos() % interval_nanos) as u64);
        self.previous = Some(now - remainder);
        true
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Render one frame: clear, resolve the direction, step and draw every cell,
/// flush the surface, then move the timeline. A shrink phase that has fully hidden every cell
/// rewinds the ticker immediately.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    timeline: &mut Timeline,
    pixels: &mut [Pixel],
) -> FrameOutcome {
    surface.clear_rect(
        0.0,
        0.0,
        f64::from(viewport.width),
        f64::from(viewport.height),
    );

    let direction = timeline.resolve();
    let mut all_hidden = true;

    for pixel in pixels.iter_mut() {
        match direction {
            Direction::Growing => pixel.advance_show(),
            Direction::Shrinking => {
                pixel.advance_hide();
                all_hidden &= pixel.is_hidden();
            }
        }
        pixel.draw(surface);
    }
    surface.flush();

    timeline.advance();

    let all_hidden = direction == Direction::Shrinking && all_hidden;
    if all_hidden {
        timeline.rewind();
    }

    FrameOutcome::Rendered {
        direction,
        all_hidden,
    }
}

impl<S: Surface, F: FrameScheduler> PixelEngine<S, F> {
    /// Per-frame callback. Always re-arms the scheduler first, so the loop only
    /// stops when the owner cancels the pending frame.
    pub fn tick(&mut self, now: Instant) -> FrameOutcome {
        self.schedule_frame();

        let Some(surface) = self.surface.as_mut() else {
            log::trace!("No drawing surface, skipping frame");
            return FrameOutcome::Skipped;
        };

        if !self.throttle.ready(now) {
            return FrameOutcome::Throttled;
        }

        let outcome = render_frame(
            surface,
            self.viewport,
            &mut self.timeline,
            &mut self.pixels,
        );

        if let FrameOutcome::Rendered {
            direction,
            all_hidden,
        } = outcome
        {
            if self.phase != Some(direction) {
                log::debug!(
                    "Phase {:?} at ticker {}",
                    direction,
                    self.timeline.ticker()
                );
                self.phase = Some(direction);
            }
            if all_hidden {
                log::debug!("All cells hidden, restarting cycle");
            }
        }

        outcome
    }
}
