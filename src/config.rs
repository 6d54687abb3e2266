use std::time::Duration;

/// Lattice pitch between cells, in pixels
pub const DEFAULT_GAP: u32 = 6;

/// Upper bound for the shared per-grid flicker speed
pub const DEFAULT_ANIMATION_SPEED: f64 = 0.25;

/// Spread of palette hues in degrees
pub const DEFAULT_HUE_RANGE: f64 = 50.0;

/// Frames the growing phase runs before the timeline reverses
pub const DEFAULT_ANIMATION_DURATION: u32 = 360;

/// Frame throttle target
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Number of colours in a generated palette
pub const PALETTE_SIZE: usize = 5;

/// Palette saturation, in percent
pub const PALETTE_SATURATION: f64 = 100.0;

/// Palette lightness is drawn from [MIN, MAX)
pub const PALETTE_LIGHTNESS_MIN: f64 = 50.0;
pub const PALETTE_LIGHTNESS_MAX: f64 = 100.0;

/// Lower bound of the shared speed drawn per grid
pub const MIN_SHARED_SPEED: f64 = 0.008;

/// Delay counters fill at (width + height) * this per frame
pub const COUNTER_STEP_FACTOR: f64 = 0.005;

/// Fixed shrink per frame once a cell's hide delay has passed
pub const SHRINK_STEP: f64 = 0.05;

/// Cell box size used when the grid supplies none
pub const FALLBACK_BOUND_SIZE: f64 = 2.0;

// ============================================
// Host window
// ============================================

/// Initial window inner size (logical pixels)
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;

/// Colour behind the transparent raster (linear RGB)
pub const BACKGROUND: [f64; 3] = [0.05, 0.05, 0.08];

/// Engine configuration. Every option has a default; `None` values are
/// resolved per grid build (hue start) or derived from other options.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub gap: u32,
    pub animation_speed: f64,
    pub hue_start: Option<f64>,
    pub hue_range: f64,
    pub max_pixel_size: Option<u32>,
    pub animation_duration: u32,
    pub target_fps: u32,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            hue_start: None,
            hue_range: DEFAULT_HUE_RANGE,
            max_pixel_size: None,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            target_fps: DEFAULT_TARGET_FPS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Lattice stride; a zero gap would never advance the scan.
    pub fn stride(&self) -> u32 {
        self.gap.max(1)
    }

    /// Per-cell box size: explicit value or half the gap.
    pub fn cell_bound(&self) -> u32 {
        self.max_pixel_size.unwrap_or(self.gap / 2)
    }

    /// Box each cell is drawn in, with the fallback applied to a zero bound.
    /// Grid exclusion and cell sizing both use this value.
    pub fn cell_box(&self) -> f64 {
        match self.cell_bound() {
            0 => FALLBACK_BOUND_SIZE,
            bound => f64::from(bound),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.gap, 6);
        assert_eq!(config.cell_bound(), 3);
        assert_eq!(config.animation_duration, 360);
        assert!(config.hue_start.is_none());
    }

    #[test]
    fn test_explicit_max_pixel_size_wins() {
        let config = EngineConfig {
            gap: 10,
            max_pixel_size: Some(2),
            ..Default::default()
        };
        assert_eq!(config.cell_bound(), 2);
    }

    #[test]
    fn test_frame_interval_sixty_fps() {
        let interval = EngineConfig::default().frame_interval();
        assert!((interval.as_secs_f64() * 1000.0 - 1000.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_gap_stride() {
        let config = EngineConfig {
            gap: 0,
            ..Default::default()
        };
        assert_eq!(config.stride(), 1);
        assert_eq!(config.cell_bound(), 0);
        assert_eq!(config.cell_box(), FALLBACK_BOUND_SIZE);
    }

    #[test]
    fn test_cell_box_matches_explicit_bound() {
        let config = EngineConfig {
            max_pixel_size: Some(u32::MAX),
            ..Default::default()
        };
        assert_eq!(config.cell_box(), f64::from(u32::MAX));
        assert_eq!(EngineConfig::default().cell_box(), 3.0);
    }
}
