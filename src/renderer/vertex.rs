//! Vertex definitions and unit cube geometry.
//!
//! Every cube in the grid is the same unit cube centered on the origin, drawn
//! instanced with its own model matrix. The faces use 24 vertices (four per side
//! so each side gets its own texture coordinates); the outline reuses the eight
//! corners as a line list.

/// Vertex of the textured unit cube.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Position in model space, each coordinate `±0.5`.
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl CubeVertex {
    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Per-instance model matrix, one column per attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<[[f32; 4]; 4]> for InstanceRaw {
    fn from(model: [[f32; 4]; 4]) -> Self {
        Self { model }
    }
}

/// Outward normal, then two in-plane axes with `u x v == normal`.
const SIDES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Corner signs along `(u, v)` with their texture coordinates, counter-clockwise
/// seen from outside.
const SIDE_CORNERS: [(f32, f32, [f32; 2]); 4] = [
    (-0.5, -0.5, [0.0, 1.0]),
    (0.5, -0.5, [1.0, 1.0]),
    (0.5, 0.5, [1.0, 0.0]),
    (-0.5, 0.5, [0.0, 0.0]),
];

/// Vertices and triangle-list indices for the six textured sides.
pub fn cube_face_geometry() -> (Vec<CubeVertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in SIDES {
        let base = vertices.len() as u16;
        for (su, sv, uv) in SIDE_CORNERS {
            let position = std::array::from_fn(|i| normal[i] * 0.5 + u[i] * su + v[i] * sv);
            vertices.push(CubeVertex { position, uv });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// The eight corners and line-list indices for the twelve edges.
///
/// Corner `i` has x, y, z set to `+0.5` where bits 0, 1, 2 of `i` are set.
pub fn cube_edge_geometry() -> ([[f32; 3]; 8], Vec<u16>) {
    let corners = std::array::from_fn(|i| {
        let sign = |bit: usize| if i & (1 << bit) != 0 { 0.5 } else { -0.5 };
        [sign(0), sign(1), sign(2)]
    });

    let mut indices = Vec::with_capacity(24);
    for corner in 0u16..8 {
        for bit in 0..3 {
            let other = corner | (1 << bit);
            if other != corner {
                indices.extend_from_slice(&[corner, other]);
            }
        }
    }

    (corners, indices)
}

/// Edge corners as [`CubeVertex`] so both pipelines share one vertex layout.
pub fn cube_edge_vertices() -> (Vec<CubeVertex>, Vec<u16>) {
    let (corners, indices) = cube_edge_geometry();
    let vertices = corners
        .into_iter()
        .map(|position| CubeVertex {
            position,
            uv: [0.0, 0.0],
        })
        .collect();
    (vertices, indices)
}
