use rand::Rng;

use crate::color::Hsl;
use crate::config::{
    EngineConfig, COUNTER_STEP_FACTOR, MIN_SHARED_SPEED, PALETTE_LIGHTNESS_MAX,
    PALETTE_LIGHTNESS_MIN, PALETTE_SATURATION, PALETTE_SIZE,
};
use crate::simulation::pixel::{Pixel, PixelParams};
use crate::simulation::random::random_range;

/// Build the full, ordered cell collection for a viewport.
///
/// Lattice points are scanned column by column (x outer, y inner) with stride
/// `gap`; points whose box would overflow the viewport are skipped. The box
/// tested is the one the cell is built with, so a zero bound (gap 0 or 1)
/// excludes against the fallback size. Every
/// cell's delay is its distance to the bottom-centre focal point, so the wave
/// starts there and radiates upward.
pub fn build_grid<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<Pixel> {
    let palette = generate_palette(config, rng);
    let counter_step = (f64::from(width) + f64::from(height)) * COUNTER_STEP_FACTOR;
    let speed = random_range(rng, MIN_SHARED_SPEED, config.animation_speed);

    let stride = config.stride() as usize;
    let bound = config.cell_box();
    let mut pixels = Vec::new();

    for x in (0..width).step_by(stride) {
        if f64::from(x) + bound > f64::from(width) {
            continue;
        }
        for y in (0..height).step_by(stride) {
            if f64::from(y) + bound > f64::from(height) {
                continue;
            }
            let color = palette[rng.gen_range(0..palette.len())];
            let delay = focal_distance(f64::from(x), f64::from(y), width, height);
            let delay_hide = focal_distance(f64::from(x), f64::from(y), width, height);

            pixels.push(Pixel::new(
                PixelParams {
                    x: f64::from(x),
                    y: f64::from(y),
                    color,
                    speed,
                    delay,
                    delay_hide,
                    counter_step,
                    bound_size: bound,
                },
                rng,
            ));
        }
    }

    pixels
}

/// Evenly spaced hues over `[hue_start, hue_start + hue_range]` with random
/// lightness.
pub fn generate_palette<R: Rng + ?Sized>(config: &EngineConfig, rng: &mut R) -> Vec<Hsl> {
    let hue_start = config
        .hue_start
        .unwrap_or_else(|| random_range(rng, 0.0, 360.0));
    let spacing = config.hue_range / (PALETTE_SIZE - 1) as f64;

    (0..PALETTE_SIZE)
        .map(|i| {
            let lightness = random_range(rng, PALETTE_LIGHTNESS_MIN, PALETTE_LIGHTNESS_MAX);
            Hsl::new(hue_start + spacing * i as f64, PALETTE_SATURATION, lightness)
        })
        .collect()
}

/// Distance from `(x, y)` to the bottom-centre of the viewport.
pub fn focal_distance(x: f64, y: f64, width: u32, height: u32) -> f64 {
    let dx = x - f64::from(width) * 0.5;
    let dy = y - f64::from(height);
    (dx * dx + dy * dy).sqrt()
}
