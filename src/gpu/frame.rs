use wgpu::{Buffer, BufferUsages, Device, Queue, Texture, TextureView};

use pixel_wave::RasterSurface;

/// Blit parameters passed to the shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlitParams {
    /// Linear RGB colour behind transparent raster pixels, alpha unused
    pub background: [f32; 4],
}

/// GPU copy of the CPU raster, re-uploaded after every rendered frame
pub struct FrameTexture {
    texture: Texture,
    pub view: TextureView,
    pub params_buffer: Buffer,
    width: u32,
    height: u32,
}

impl FrameTexture {
    /// Create a texture matching the raster's size.
    /// Returns `None` for a zero-sized raster, which wgpu cannot represent.
    pub fn new(device: &Device, queue: &Queue, width: u32, height: u32, background: [f64; 3]) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // raster bytes are sRGB encoded, premultiplied alpha
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blit-params-buffer"),
            size: std::mem::size_of::<BlitParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = BlitParams {
            background: [
                background[0] as f32,
                background[1] as f32,
                background[2] as f32,
                1.0,
            ],
        };
        queue.write_buffer(&params_buffer, 0, bytemuck::bytes_of(&params));

        Some(Self {
            texture,
            view,
            params_buffer,
            width,
            height,
        })
    }

    pub fn matches(&self, raster: &RasterSurface) -> bool {
        self.width == raster.width() && self.height == raster.height()
    }

    /// Copy the raster into the texture; sizes must match
    pub fn upload(&self, queue: &Queue, raster: &RasterSurface) {
        if !self.matches(raster) {
            log::warn!(
                "Raster {}x{} does not match frame texture {}x{}",
                raster.width(),
                raster.height(),
                self.width,
                self.height
            );
            return;
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            raster.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_size() {
        assert_eq!(std::mem::size_of::<BlitParams>(), 16);
    }
}
