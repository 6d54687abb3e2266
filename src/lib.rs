//! Cellular reveal/conceal animation: a grid of square cells that grow in,
//! flicker, and shrink away again as a wave radiating from the bottom-centre
//! of the viewport, driven by one reversible timeline.

pub mod color;
pub mod config;
pub mod engine;
pub mod simulation;
pub mod surface;

pub use color::Hsl;
pub use config::EngineConfig;
pub use engine::{
    FixedSize, FrameHandle, FrameOutcome, FrameScheduler, ManualScheduler, PixelEngine,
    ResizeSource, Viewport,
};
pub use simulation::{Direction, Pixel, Timeline};
pub use surface::{RasterSurface, Surface};
