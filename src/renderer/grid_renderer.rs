//! Instanced renderer for the cube grid.
//!
//! Owns two pipelines built from `shaders/cube.wgsl`:
//! 1. **Faces**: triangle list, textured and tinted with the face color
//! 2. **Outlines**: line list over the cube edges in the line color
//!
//! Each pipeline gets its own instance buffer of model matrices. Geometry is
//! uploaded once; matrices are rewritten every frame from a [`FrameTransforms`].

use crate::config::ViewerConfig;
use crate::math::MathError;
use crate::renderer::pipeline_builder::PipelineBuilder;
use crate::renderer::texture::{CheckerTexture, checker_image};
use crate::renderer::uniform::CameraUniform;
use crate::renderer::vertex::{CubeVertex, InstanceRaw, cube_edge_vertices, cube_face_geometry};
use crate::scene::FrameTransforms;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Index buffer plus the instance buffer drawn with it.
struct InstancedMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
}

impl InstancedMesh {
    fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[CubeVertex],
        indices: &[u16],
        instance_capacity: usize,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer: Self::create_instance_buffer(device, label, instance_capacity),
            instance_capacity,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Instance Buffer")),
            size: (capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Writes the instances, growing the buffer first if they don't fit.
    fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        instances: &[InstanceRaw],
    ) {
        if instances.len() > self.instance_capacity {
            self.instance_buffer = Self::create_instance_buffer(device, label, instances.len());
            self.instance_capacity = instances.len();
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
    }

    fn draw(&self, pass: &mut wgpu::RenderPass, instance_count: u32) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..instance_count);
    }
}

/// Renderer for the faces and outlines of every cube.
pub struct GridRenderer {
    pub face_pipeline: wgpu::RenderPipeline,
    pub outline_pipeline: wgpu::RenderPipeline,
    faces: InstancedMesh,
    outlines: InstancedMesh,
    instance_count: u32,
    pub uniforms: CameraUniform,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    pub checker: CheckerTexture,
    /// Recreated when the surface size changes.
    pub depth_texture: Option<wgpu::Texture>,
}

impl GridRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_config: &wgpu::SurfaceConfiguration,
        config: &ViewerConfig,
    ) -> Self {
        let uniforms = CameraUniform::new(config.face_color, config.line_color);
        let uniform_buffer = uniforms.create_buffer(device);
        let (uniform_bind_group, uniform_bind_group_layout) =
            uniforms.create_bind_group(&uniform_buffer, device);

        let image = checker_image(config.texture_size, config.texture_checks);
        let checker = CheckerTexture::new(device, queue, &image);

        let depth_stencil = wgpu::DepthStencilState {
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            format: DEPTH_FORMAT,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let face_pipeline = PipelineBuilder::new(device, surface_config.format)
            .with_label("Cube Face Pipeline")
            .with_shader(include_str!("shaders/cube.wgsl"))
            .with_fragment_entry("fs_face")
            .with_vertex_buffer(CubeVertex::desc())
            .with_vertex_buffer(InstanceRaw::desc())
            .with_bind_group_layout(&uniform_bind_group_layout)
            .with_bind_group_layout(&checker.bind_group_layout)
            .with_depth_stencil(depth_stencil.clone())
            .build();

        let outline_pipeline = PipelineBuilder::new(device, surface_config.format)
            .with_label("Cube Outline Pipeline")
            .with_shader(include_str!("shaders/cube.wgsl"))
            .with_fragment_entry("fs_outline")
            .with_vertex_buffer(CubeVertex::desc())
            .with_vertex_buffer(InstanceRaw::desc())
            .with_bind_group_layout(&uniform_bind_group_layout)
            .with_bind_group_layout(&checker.bind_group_layout)
            .with_topology(wgpu::PrimitiveTopology::LineList)
            .with_no_culling()
            .with_depth_stencil(depth_stencil)
            .build();

        let capacity = config.grid.cell_count();
        let (face_vertices, face_indices) = cube_face_geometry();
        let faces = InstancedMesh::new(device, "Cube Face", &face_vertices, &face_indices, capacity);
        let (edge_vertices, edge_indices) = cube_edge_vertices();
        let outlines =
            InstancedMesh::new(device, "Cube Outline", &edge_vertices, &edge_indices, capacity);

        Self {
            face_pipeline,
            outline_pipeline,
            faces,
            outlines,
            instance_count: 0,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            checker,
            depth_texture: None,
        }
    }

    /// Uploads the frame's camera and instance matrices.
    ///
    /// Nothing is written if any matrix is malformed, so the previous frame's
    /// data stays intact.
    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &FrameTransforms,
    ) -> Result<(), MathError> {
        let mut uniforms = self.uniforms;
        uniforms.update_from_frame(frame)?;
        let face_instances: Vec<InstanceRaw> =
            frame.model_columns()?.into_iter().map(InstanceRaw::from).collect();
        let outline_instances: Vec<InstanceRaw> =
            frame.outline_columns()?.into_iter().map(InstanceRaw::from).collect();

        self.uniforms = uniforms;
        queue.write_buffer(&self.uniform_buffer, 0, self.uniforms.as_bytes());
        self.faces
            .write_instances(device, queue, "Cube Face", &face_instances);
        self.outlines
            .write_instances(device, queue, "Cube Outline", &outline_instances);
        self.instance_count = face_instances.len() as u32;
        Ok(())
    }

    /// Returns a depth view matching the surface, recreating the texture on resize.
    pub fn update_depth_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = match self.depth_texture.take() {
            Some(texture) if texture.width() == width && texture.height() == height => texture,
            _ => device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }),
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth_texture = Some(texture);
        view
    }

    /// Draws faces first, then outlines, into an already begun pass.
    pub fn render(&self, pass: &mut wgpu::RenderPass) {
        if self.instance_count == 0 {
            return;
        }

        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_bind_group(1, &self.checker.bind_group, &[]);

        pass.set_pipeline(&self.face_pipeline);
        self.faces.draw(pass, self.instance_count);

        pass.set_pipeline(&self.outline_pipeline);
        self.outlines.draw(pass, self.instance_count);
    }
}
