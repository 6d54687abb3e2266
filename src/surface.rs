use vello_cpu::kurbo::Rect;
use vello_cpu::peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

use crate::color::Hsl;

/// 2D raster drawing target. Only the primitives the engine needs.
pub trait Surface {
    /// Resize the backing store. Implicitly clears it.
    fn resize(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Hsl);

    /// End of frame; surfaces that batch draw calls rasterize here.
    fn flush(&mut self) {}
}

/// CPU raster backed by a `vello_cpu` pixmap.
///
/// Fills are recorded into a render context and rasterized (anti-aliased,
/// premultiplied RGBA8) on [`Surface::flush`]. Extents are capped at
/// `u16::MAX`; a zero-sized raster records nothing.
pub struct RasterSurface {
    width: u16,
    height: u16,
    pixmap: Pixmap,
    ctx: Option<RenderContext>,
    pending: usize,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let width = clamp_extent(width);
        let height = clamp_extent(height);
        Self {
            width,
            height,
            pixmap: Pixmap::new(width, height),
            ctx: new_context(width, height),
            pending: 0,
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Premultiplied RGBA of one pixel, as of the last flush
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y * self.width() + x) * 4) as usize;
        let data = self.pixmap.data_as_u8_slice();
        Some([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }

    /// Row-major premultiplied bytes, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Number of pixels with any alpha
    pub fn painted_count(&self) -> usize {
        self.as_bytes()
            .chunks_exact(4)
            .filter(|px| px[3] > 0)
            .count()
    }

    /// Rasterize recorded fills into the pixmap and start a fresh context.
    fn render_pending(&mut self) {
        if self.pending == 0 {
            return;
        }
        if let Some(mut ctx) = self.ctx.take() {
            ctx.flush();
            ctx.render_to_pixmap(&mut self.pixmap);
        }
        self.ctx = new_context(self.width, self.height);
        self.pending = 0;
    }
}

impl Surface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let full = f64::from(self.width);
        let tall = f64::from(self.height);
        let covers_all = x <= 0.0 && y <= 0.0 && x + width >= full && y + height >= tall;

        if covers_all {
            // pending fills would land inside the cleared area anyway
            self.ctx = new_context(self.width, self.height);
            self.pending = 0;
        } else {
            self.render_pending();
        }

        let x0 = x.max(0.0).floor().min(full) as usize;
        let x1 = (x + width).ceil().clamp(0.0, full) as usize;
        let y0 = y.max(0.0).floor().min(tall) as usize;
        let y1 = (y + height).ceil().clamp(0.0, tall) as usize;
        if x0 >= x1 {
            return;
        }

        let stride = usize::from(self.width) * 4;
        let data = self.pixmap.data_as_u8_slice_mut();
        for row in y0..y1 {
            data[row * stride + x0 * 4..row * stride + x1 * 4].fill(0);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Hsl) {
        if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        let [r, g, b, a] = color.to_rgba8();
        ctx.set_paint(Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&Rect::new(x, y, x + width, y + height));
        self.pending += 1;
    }

    fn flush(&mut self) {
        self.render_pending();
    }
}

fn clamp_extent(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn new_context(width: u16, height: u16) -> Option<RenderContext> {
    (width > 0 && height > 0).then(|| RenderContext::new(width, height))
}
