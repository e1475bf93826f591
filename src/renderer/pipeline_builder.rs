//! # WGPU Pipeline Builder Utilities
//!
//! Builder patterns for the render pipelines and bind group layouts used by the
//! cube grid renderer. The face pass and the outline pass share one shader and
//! differ only in entry points and primitive topology, so both are produced by
//! the same [`PipelineBuilder`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! # let device: wgpu::Device = unimplemented!();
//! # let surface_format = wgpu::TextureFormat::Bgra8UnormSrgb;
//! # let cube_wgsl = "";
//! use cubegrid::renderer::pipeline_builder::{BindGroupLayoutBuilder, PipelineBuilder};
//! use cubegrid::renderer::uniform::CameraUniform;
//!
//! let layout = BindGroupLayoutBuilder::new(&device)
//!     .with_label("Camera Layout")
//!     .with_uniform_buffer::<CameraUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
//!     .build();
//!
//! let pipeline = PipelineBuilder::new(&device, surface_format)
//!     .with_label("Outline Pipeline")
//!     .with_shader(cube_wgsl)
//!     .with_fragment_entry("fs_outline")
//!     .with_bind_group_layout(&layout)
//!     .with_topology(wgpu::PrimitiveTopology::LineList)
//!     .build();
//! ```

const VERTEX_ENTRY: &str = "vs_main";

/// Builder for render pipelines.
///
/// ## Default Configuration
///
/// - Vertex entry point: `"vs_main"`, shared by every cube pipeline
/// - Fragment entry point: `"fs_main"`
/// - Blend state: `REPLACE` (cubes and outlines are opaque)
/// - Cull mode: `Back` face culling
/// - Primitive topology: `TriangleList`
/// - Front face: Counter-clockwise
///
/// Shader source must be provided via [`with_shader()`](PipelineBuilder::with_shader)
/// before calling [`build()`](PipelineBuilder::build).
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
    label: Option<&'a str>,
    shader_source: Option<&'a str>,
    fragment_entry: &'a str,
    vertex_buffers: Vec<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    cull_mode: Option<wgpu::Face>,
    topology: wgpu::PrimitiveTopology,
    depth_stencil: Option<wgpu::DepthStencilState>,
}

impl<'a> PipelineBuilder<'a> {
    /// Create a new pipeline builder with default settings.
    pub fn new(device: &'a wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            surface_format,
            label: None,
            shader_source: None,
            fragment_entry: "fs_main",
            vertex_buffers: Vec::new(),
            bind_group_layouts: Vec::new(),
            cull_mode: Some(wgpu::Face::Back),
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_stencil: None,
        }
    }

    /// Set the label used for the pipeline, shader module and pipeline layout.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the WGSL shader source. Required.
    pub fn with_shader(mut self, source: &'a str) -> Self {
        self.shader_source = Some(source);
        self
    }

    /// Select the fragment stage, e.g. `fs_face` or `fs_outline`.
    pub fn with_fragment_entry(mut self, entry: &'a str) -> Self {
        self.fragment_entry = entry;
        self
    }

    /// Add a vertex buffer layout. Slots are assigned in call order.
    pub fn with_vertex_buffer(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_buffers.push(layout);
        self
    }

    /// Add a bind group layout. Groups are assigned in call order.
    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    /// Disable face culling.
    pub fn with_no_culling(mut self) -> Self {
        self.cull_mode = None;
        self
    }

    /// Set the primitive topology, e.g. `LineList` for cube edges.
    pub fn with_topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Enable depth testing with the given state.
    pub fn with_depth_stencil(mut self, depth_stencil: wgpu::DepthStencilState) -> Self {
        self.depth_stencil = Some(depth_stencil);
        self
    }

    /// Build the render pipeline with the configured parameters.
    ///
    /// # Panics
    ///
    /// Panics if no shader source was provided.
    pub fn build(self) -> wgpu::RenderPipeline {
        let shader_source = self.shader_source.expect("Shader source must be provided");

        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: self.label,
                source: wgpu::ShaderSource::Wgsl(shader_source.into()),
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: self.label,
                bind_group_layouts: &self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: self.label,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(VERTEX_ENTRY),
                    buffers: &self.vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(self.fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: self.topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: self.cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: self.depth_stencil,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
    }
}

/// Layout entry for a filterable 2D float texture.
pub fn texture_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

/// Layout entry for a filtering sampler.
pub fn sampler_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Layout entry for a uniform buffer holding one `T`.
///
/// The minimum binding size is `size_of::<T>()`, so a buffer too small for the
/// shader struct is rejected when the bind group is created.
pub fn uniform_entry<T: bytemuck::Pod>(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

/// Builder for bind group layouts.
///
/// The camera uniform lives in group 0 and the checker texture in group 1:
///
/// ```rust,no_run
/// # let device: wgpu::Device = unimplemented!();
/// use cubegrid::renderer::pipeline_builder::BindGroupLayoutBuilder;
///
/// let layout = BindGroupLayoutBuilder::new(&device)
///     .with_label("Checker Texture Layout")
///     .with_texture(0, wgpu::ShaderStages::FRAGMENT)
///     .with_sampler(1, wgpu::ShaderStages::FRAGMENT)
///     .build();
/// ```
pub struct BindGroupLayoutBuilder<'a> {
    device: &'a wgpu::Device,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
    label: Option<&'a str>,
}

impl<'a> BindGroupLayoutBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            entries: Vec::new(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_texture(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(texture_entry(binding, visibility));
        self
    }

    pub fn with_sampler(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(sampler_entry(binding, visibility));
        self
    }

    /// Add a uniform buffer sized for `T`.
    pub fn with_uniform_buffer<T: bytemuck::Pod>(
        mut self,
        binding: u32,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        self.entries.push(uniform_entry::<T>(binding, visibility));
        self
    }

    pub fn build(self) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: self.label,
                entries: &self.entries,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::uniform::CameraUniform;

    /// Tests that the uniform entry carries the struct size as its minimum.
    #[test]
    fn test_uniform_entry_min_size() {
        let entry = uniform_entry::<CameraUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT);
        assert_eq!(entry.binding, 0);
        assert_eq!(entry.visibility, wgpu::ShaderStages::VERTEX_FRAGMENT);
        match entry.ty {
            wgpu::BindingType::Buffer {
                ty,
                min_binding_size,
                ..
            } => {
                assert_eq!(ty, wgpu::BufferBindingType::Uniform);
                assert_eq!(min_binding_size.map(|size| size.get()), Some(160));
            }
            other => panic!("expected a buffer binding, got {other:?}"),
        }
    }

    /// Tests the texture and sampler entries used by the checker bind group.
    #[test]
    fn test_texture_and_sampler_entries() {
        let texture = texture_entry(0, wgpu::ShaderStages::FRAGMENT);
        assert!(matches!(
            texture.ty,
            wgpu::BindingType::Texture {
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
                ..
            }
        ));

        let sampler = sampler_entry(1, wgpu::ShaderStages::FRAGMENT);
        assert_eq!(sampler.binding, 1);
        assert_eq!(
            sampler.ty,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
        );
    }
}
