use rand::Rng;

use crate::color::Hsl;
use crate::config::{FALLBACK_BOUND_SIZE, SHRINK_STEP};
use crate::simulation::random::random_range;
use crate::surface::Surface;

/// Smallest size a flickering cell oscillates down to
pub const MIN_SIZE: f64 = 0.5;

/// Inputs the grid computes for each lattice point.
#[derive(Clone, Copy, Debug)]
pub struct PixelParams {
    pub x: f64,
    pub y: f64,
    pub color: Hsl,
    /// Shared speed cap; each cell draws its own fraction of it
    pub speed: f64,
    pub delay: f64,
    pub delay_hide: f64,
    pub counter_step: f64,
    /// Size of the cell's box; non-positive falls back to 2
    pub bound_size: f64,
}

/// One animated grid cell.
///
/// Grows in once its delay has passed, flickers between [`MIN_SIZE`] and its
/// own `max_size`, then shrinks away during the hide phase.
/// Invariant: `0 <= size <= max_size <= max_size_available`.
#[derive(Clone, Debug)]
pub struct Pixel {
    x: f64,
    y: f64,
    color: Hsl,
    speed: f64,
    size: f64,
    size_step: f64,
    max_size: f64,
    max_size_available: f64,
    size_direction: f64,
    delay: f64,
    delay_hide: f64,
    counter: f64,
    counter_hide: f64,
    counter_step: f64,
    is_hidden: bool,
    is_flicking: bool,
}

impl Pixel {
    pub fn new<R: Rng + ?Sized>(params: PixelParams, rng: &mut R) -> Self {
        let max_size_available = if params.bound_size > 0.0 {
            params.bound_size
        } else {
            FALLBACK_BOUND_SIZE
        };
        let speed = random_range(rng, 0.1, 0.9) * params.speed;
        let size_step = random_range(rng, 0.0, 0.5);
        // Boxes smaller than MIN_SIZE still cap the ceiling at the box
        let max_size = random_range(rng, MIN_SIZE, max_size_available).min(max_size_available);

        Self {
            x: params.x,
            y: params.y,
            color: params.color,
            speed,
            size: 0.0,
            size_step,
            max_size,
            max_size_available,
            size_direction: 1.0,
            delay: params.delay,
            delay_hide: params.delay_hide,
            counter: 0.0,
            counter_hide: 0.0,
            counter_step: params.counter_step,
            is_hidden: false,
            is_flicking: false,
        }
    }

    /// One frame of the growing phase.
    pub fn advance_show(&mut self) {
        self.is_hidden = false;
        self.counter_hide = 0.0;

        if self.counter <= self.delay {
            self.counter += self.counter_step;
            return;
        }

        if self.size >= self.max_size {
            self.is_flicking = true;
        }

        if self.is_flicking {
            self.flicker();
        } else {
            self.size = (self.size + self.size_step).min(self.max_size);
        }
    }

    /// One frame of the shrinking phase.
    pub fn advance_hide(&mut self) {
        self.counter = 0.0;

        if self.counter_hide <= self.delay_hide {
            self.counter_hide += self.counter_step;
            // keep shimmering until the wave reaches this cell
            if self.is_flicking {
                self.flicker();
            }
            return;
        }

        self.is_flicking = false;

        if self.size <= 0.0 {
            self.size = 0.0;
            self.is_hidden = true;
            return;
        }

        self.size = (self.size - SHRINK_STEP).max(0.0);
    }

    fn flicker(&mut self) {
        if self.size >= self.max_size {
            self.size_direction = -1.0;
        } else if self.size <= MIN_SIZE {
            self.size_direction = 1.0;
        }
        self.size = (self.size + self.size_direction * self.speed).clamp(0.0, self.max_size);
    }

    /// Fill the current square, centred in the cell's box.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.size <= 0.0 {
            return;
        }
        let offset = (self.max_size_available - self.size) / 2.0;
        surface.fill_rect(
            self.x + offset,
            self.y + offset,
            self.size,
            self.size,
            self.color,
        );
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn color(&self) -> Hsl {
        self.color
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    pub fn max_size_available(&self) -> f64 {
        self.max_size_available
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn delay_hide(&self) -> f64 {
        self.delay_hide
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn is_flicking(&self) -> bool {
        self.is_flicking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<(f64, f64, f64, f64)>,
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, _color: Hsl) {
            self.fills.push((x, y, w, h));
        }
    }

    fn params(delay: f64) -> PixelParams {
        PixelParams {
            x: 12.0,
            y: 18.0,
            color: Hsl::new(200.0, 100.0, 70.0),
            speed: 0.25,
            delay,
            delay_hide: delay,
            counter_step: 1.0,
            bound_size: 3.0,
        }
    }

    fn pixel(seed: u64, delay: f64) -> Pixel {
        Pixel::new(params(delay), &mut StdRng::seed_from_u64(seed))
    }

    fn assert_bounds(p: &Pixel) {
        assert!(p.size >= 0.0 && p.size <= p.max_size, "size {} max {}", p.size, p.max_size);
        assert!(p.max_size >= MIN_SIZE && p.max_size <= p.max_size_available);
    }

    #[test]
    fn test_construction_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = Pixel::new(params(0.0), &mut rng);
            assert!(p.speed >= 0.1 * 0.25 && p.speed < 0.9 * 0.25);
            assert!((0.0..0.5).contains(&p.size_step));
            assert_eq!(p.size, 0.0);
            assert!(!p.is_hidden && !p.is_flicking);
            assert_bounds(&p);
        }
    }

    #[test]
    fn test_unset_bound_falls_back() {
        let p = Pixel::new(
            PixelParams {
                bound_size: 0.0,
                ..params(0.0)
            },
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(p.max_size_available, FALLBACK_BOUND_SIZE);
    }

    #[test]
    fn test_waits_for_delay() {
        let mut p = pixel(5, 3.0);
        // counter 0,1,2,3 are all <= delay
        for _ in 0..4 {
            p.advance_show();
            assert_eq!(p.size, 0.0);
        }
        p.size_step = 0.1;
        p.advance_show();
        assert!(p.size > 0.0);
    }

    #[test]
    fn test_growth_is_monotonic_until_flicker() {
        for seed in 0..50 {
            let mut p = pixel(seed, 0.0);
            p.size_step = p.size_step.max(0.01);
            let mut last = p.size;
            for _ in 0..500 {
                p.advance_show();
                assert_bounds(&p);
                if p.is_flicking {
                    break;
                }
                assert!(p.size >= last);
                last = p.size;
            }
            assert!(p.is_flicking, "seed {} never reached max size", seed);
        }
    }

    #[test]
    fn test_flicker_stays_contained() {
        for seed in 0..50 {
            let mut p = pixel(seed, 0.0);
            p.size_step = 0.4;
            let mut directions = Vec::new();
            for _ in 0..2000 {
                p.advance_show();
                assert_bounds(&p);
                if p.is_flicking {
                    assert!(p.size >= MIN_SIZE - p.speed - 1e-9);
                    directions.push(p.size_direction);
                }
            }
            assert!(directions.contains(&-1.0));
        }
    }

    #[test]
    fn test_hide_reaches_terminal_state() {
        let mut p = pixel(9, 0.0);
        p.size_step = 0.4;
        for _ in 0..50 {
            p.advance_show();
        }
        assert!(p.size > 0.0);

        let mut frames = 0;
        while !p.is_hidden {
            p.advance_hide();
            assert_bounds(&p);
            frames += 1;
            assert!(frames < 1000, "cell never hid");
        }
        assert_eq!(p.size, 0.0);
        assert!(!p.is_flicking);

        for _ in 0..10 {
            p.advance_hide();
            assert_eq!(p.size, 0.0);
            assert!(p.is_hidden);
        }
    }

    #[test]
    fn test_flickers_while_waiting_to_hide() {
        let mut p = pixel(11, 0.0);
        p.size_step = 0.4;
        while !p.is_flicking {
            p.advance_show();
        }
        p.delay_hide = 100.0;
        let before = p.size;
        p.advance_hide();
        assert!(p.is_flicking);
        assert_ne!(p.size, before);
    }

    #[test]
    fn test_show_clears_hidden_state() {
        let mut p = pixel(13, 50.0);
        p.is_hidden = true;
        p.counter_hide = 7.0;
        p.advance_show();
        assert!(!p.is_hidden);
        assert_eq!(p.counter_hide, 0.0);
    }

    #[test]
    fn test_hide_resets_show_counter() {
        let mut p = pixel(17, 50.0);
        p.advance_show();
        p.advance_show();
        assert!(p.counter > 0.0);
        p.advance_hide();
        assert_eq!(p.counter, 0.0);
    }

    #[test]
    fn test_draw_centres_square() {
        let mut p = pixel(19, 0.0);
        p.size = 1.0;
        let mut surface = RecordingSurface::default();
        p.draw(&mut surface);
        assert_eq!(surface.fills, vec![(13.0, 19.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_draw_skips_empty_cells() {
        let p = pixel(23, 0.0);
        let mut surface = RecordingSurface::default();
        p.draw(&mut surface);
        assert!(surface.fills.is_empty());
    }
}
