//! Depth attachment and image textures.
//!
//! Images arrive as encoded bytes (JPEG or PNG), are decoded with the
//! `image` crate, scaled down to the device's texture limit when needed,
//! and uploaded as RGBA8.

use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::GlobeError;

/// Depth buffer format shared by all pipelines.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A depth attachment sized to the surface.
pub struct DepthTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    /// Create a depth target with the given dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// A sampled RGBA8 texture.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl ImageTexture {
    /// Upload an RGBA image. `srgb` selects sRGB decoding on sample
    /// (color maps) versus raw values (height maps).
    #[must_use]
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &RgbaImage,
        srgb: bool,
    ) -> Self {
        let (width, height) = image.dimensions();
        Self::upload(device, queue, label, width, height, image.as_raw(), srgb)
    }

    /// A 1x1 texture of one color, used until the real image arrives.
    #[must_use]
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: [u8; 4],
        srgb: bool,
    ) -> Self {
        Self::upload(device, queue, label, 1, 1, &rgba, srgb)
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
        srgb: bool,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Decode a JPEG or PNG into RGBA8.
///
/// # Errors
///
/// Returns [`GlobeError::Texture`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, GlobeError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgba8())
}

/// Scale `image` down (keeping its aspect) so neither edge exceeds
/// `max_dimension`. Smaller images are returned unchanged.
#[must_use]
pub fn fit_within(image: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let max = max_dimension.max(1);
    if width <= max && height <= max {
        return image;
    }
    let scale = f64::from(max) / f64::from(width.max(height));
    let new_width = ((f64::from(width) * scale).round() as u32).clamp(1, max);
    let new_height = ((f64::from(height) * scale).round() as u32).clamp(1, max);
    log::info!(
        "scaling {width}x{height} image to {new_width}x{new_height} \
         for the device"
    );
    image::imageops::resize(&image, new_width, new_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    #[test]
    fn decodes_png() {
        let src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn garbage_is_a_texture_error() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(matches!(err, GlobeError::Texture(_)));
    }

    #[test]
    fn fit_keeps_small_images() {
        let image = RgbaImage::new(100, 50);
        assert_eq!(fit_within(image, 2048).dimensions(), (100, 50));
    }

    #[test]
    fn fit_scales_to_limit_keeping_aspect() {
        let image = RgbaImage::new(8192, 4096);
        assert_eq!(fit_within(image, 2048).dimensions(), (2048, 1024));
    }
}
