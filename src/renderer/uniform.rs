//! Uniform buffer utilities for the cube grid pipelines.
//!
//! [`CameraUniform`] carries the per-frame view and projection matrices plus the
//! two flat colors. Both the face and the outline pipeline read it from group 0.

use crate::math::MathError;
use crate::renderer::pipeline_builder::BindGroupLayoutBuilder;
use crate::scene::FrameTransforms;
use wgpu::util::DeviceExt;

/// Camera and color uniforms shared by every draw call in a frame.
///
/// Matrices are column-major, ready for WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Tint multiplied into the sampled face texture.
    pub face_color: [f32; 4],
    pub line_color: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new([1.0; 4], [1.0; 4])
    }
}

impl CameraUniform {
    /// Identity view and projection with the given colors.
    pub fn new(face_color: [f32; 4], line_color: [f32; 4]) -> Self {
        let identity = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self {
            view: identity,
            projection: identity,
            face_color,
            line_color,
        }
    }

    /// Copies the frame's view and projection in. Colors are left alone.
    pub fn update_from_frame(&mut self, frame: &FrameTransforms) -> Result<(), MathError> {
        self.view = frame.view.to_cols_array_2d()?;
        self.projection = frame.projection.to_cols_array_2d()?;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Creates a GPU buffer containing the uniform data.
    ///
    /// # Arguments
    /// * `device` - The wgpu device to create the buffer with.
    ///
    /// # Returns
    /// A [`wgpu::Buffer`] usable as a uniform and writable from the queue.
    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Creates a bind group and layout for the uniform buffer at binding 0.
    ///
    /// # Returns
    /// A tuple of (`wgpu::BindGroup`, `wgpu::BindGroupLayout`).
    pub fn create_bind_group(
        &self,
        buffer: &wgpu::Buffer,
        device: &wgpu::Device,
    ) -> (wgpu::BindGroup, wgpu::BindGroupLayout) {
        // Colors are read by the fragment stage.
        let layout = BindGroupLayoutBuilder::new(device)
            .with_label("camera_bind_group_layout")
            .with_uniform_buffer::<CameraUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build();
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });
        (bind_group, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::scene::{GridLayout, OrthoVolume};

    /// Tests that the uniform matches the WGSL struct size and alignment.
    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 160);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
        assert_eq!(CameraUniform::default().as_bytes().len(), 160);
    }

    /// Tests copying the frame matrices into the uniform.
    #[test]
    fn test_update_from_frame() {
        let frame = FrameTransforms::build(
            &CameraState::default(),
            &GridLayout::default(),
            &OrthoVolume::default(),
        )
        .unwrap();

        let mut uniform = CameraUniform::new([0.5; 4], [0.25; 4]);
        uniform.update_from_frame(&frame).unwrap();

        // Translation lives in the last column.
        assert_eq!(uniform.view[3][2], -1.0);
        assert_eq!(uniform.projection[3][2], -1.0);
        assert_eq!(uniform.projection[2][2], -1.0);
        assert_eq!(uniform.face_color, [0.5; 4]);
        assert_eq!(uniform.line_color, [0.25; 4]);
    }
}
