use std::fmt;

/// HSL colour: hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Opaque sRGB bytes
    pub fn to_rgba8(self) -> [u8; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_byte(r), to_byte(g), to_byte(b), 255]
    }
}

/// CSS notation, e.g. `hsl(210.0, 100.0%, 62.5%)`
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.1}, {:.1}%, {:.1}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(Hsl::new(42.0, 100.0, 100.0).to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Hsl::new(42.0, 100.0, 0.0).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_hue_wraps_past_360() {
        assert_eq!(
            Hsl::new(400.0, 100.0, 50.0).to_rgba8(),
            Hsl::new(40.0, 100.0, 50.0).to_rgba8()
        );
    }

    #[test]
    fn test_css_display() {
        assert_eq!(
            Hsl::new(210.0, 100.0, 62.5).to_string(),
            "hsl(210.0, 100.0%, 62.5%)"
        );
    }
}
