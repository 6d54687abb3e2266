mod app;
mod error;
mod gpu;
mod headless;

use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use pixel_wave::config::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_ANIMATION_SPEED, DEFAULT_GAP, DEFAULT_HUE_RANGE,
    DEFAULT_TARGET_FPS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use pixel_wave::EngineConfig;

use crate::app::App;
use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "pixel-wave", version, about = "Animated pixel-grid reveal background")]
struct Cli {
    /// Pixel pitch between cells.
    #[arg(long, default_value_t = DEFAULT_GAP)]
    gap: u32,

    /// Upper bound for per-cell flicker speed.
    #[arg(long, default_value_t = DEFAULT_ANIMATION_SPEED)]
    speed: f64,

    /// Base palette hue in degrees (random when omitted).
    #[arg(long)]
    hue_start: Option<f64>,

    /// Spread of palette hues in degrees.
    #[arg(long, default_value_t = DEFAULT_HUE_RANGE)]
    hue_range: f64,

    /// Ceiling on any cell's box size (defaults to half the gap).
    #[arg(long)]
    max_pixel_size: Option<u32>,

    /// Frames the growing phase runs before reversing.
    #[arg(long, default_value_t = DEFAULT_ANIMATION_DURATION)]
    duration: u32,

    /// Frame-rate cap.
    #[arg(long, default_value_t = DEFAULT_TARGET_FPS)]
    fps: u32,

    /// Seed for reproducible grids.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width (logical pixels).
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: u32,

    /// Initial window height (logical pixels).
    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: u32,

    /// Run this many frames without a window and log a summary.
    #[arg(long)]
    headless: Option<u32>,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            gap: self.gap,
            animation_speed: self.speed,
            hue_start: self.hue_start,
            hue_range: self.hue_range,
            max_pixel_size: self.max_pixel_size,
            animation_duration: self.duration,
            target_fps: self.fps,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.engine_config();

    if let Some(frames) = cli.headless {
        headless::run(config, cli.width, cli.height, frames);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, (cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
