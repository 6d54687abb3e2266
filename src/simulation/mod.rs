pub mod grid;
pub mod pixel;
pub mod random;
pub mod timeline;

pub use grid::build_grid;
pub use pixel::{Pixel, PixelParams, MIN_SIZE};
pub use timeline::{Direction, Timeline};
