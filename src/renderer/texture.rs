//! Checkerboard texture for the cube faces.
//!
//! The image is generated in memory with [`image::RgbaImage`] and uploaded once.
//! Light checks are white so the face color shows through unchanged; dark checks
//! darken it.

use crate::renderer::pipeline_builder::BindGroupLayoutBuilder;
use image::{Rgba, RgbaImage};

pub const LIGHT_CHECK: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const DARK_CHECK: Rgba<u8> = Rgba([110, 110, 110, 255]);

/// Builds a `size` x `size` checkerboard with `checks` squares per side.
///
/// The top-left square is light. `size` should be a multiple of `checks`;
/// otherwise the last row and column of squares are truncated.
pub fn checker_image(size: u32, checks: u32) -> RgbaImage {
    let cell = (size / checks.max(1)).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            LIGHT_CHECK
        } else {
            DARK_CHECK
        }
    })
}

/// GPU side of the checker texture, bound at group 1.
pub struct CheckerTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl CheckerTexture {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Checker Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest magnification keeps the check borders sharp up close.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Checker Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Checker Texture Layout")
            .with_texture(0, wgpu::ShaderStages::FRAGMENT)
            .with_sampler(1, wgpu::ShaderStages::FRAGMENT)
            .build();

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Checker Texture Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            sampler,
            bind_group_layout,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the check pattern on a 4x4 image with two checks per side.
    #[test]
    fn test_checker_pattern() {
        let image = checker_image(4, 2);
        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(*image.get_pixel(0, 0), LIGHT_CHECK);
        assert_eq!(*image.get_pixel(1, 1), LIGHT_CHECK);
        assert_eq!(*image.get_pixel(2, 0), DARK_CHECK);
        assert_eq!(*image.get_pixel(0, 3), DARK_CHECK);
        assert_eq!(*image.get_pixel(3, 3), LIGHT_CHECK);
    }

    /// Tests that both colors appear equally often on the default texture.
    #[test]
    fn test_checker_balance() {
        let image = checker_image(64, 4);
        let light = image.pixels().filter(|p| **p == LIGHT_CHECK).count();
        assert_eq!(light, 64 * 64 / 2);
        assert_eq!(image.as_raw().len(), 64 * 64 * 4);
    }

    /// Tests that a zero check count yields a single light square.
    #[test]
    fn test_zero_checks() {
        let image = checker_image(2, 0);
        assert!(image.pixels().all(|p| *p == LIGHT_CHECK));
    }
}
