//! Per-frame transform set for the cube grid.
//!
//! Every frame the renderer asks for a fresh [`FrameTransforms`]: one view
//! matrix from the camera, one orthographic projection, and for every grid cell
//! a model matrix for the textured faces plus a slightly larger outline matrix
//! for the edges. Nothing here is cached between frames.

use crate::camera::CameraState;
use crate::math::{MathError, Matrix};

/// Placement of the cubes on the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Cubes along x.
    pub width: u32,
    /// Cubes along z.
    pub length: u32,
    /// Edge length of one cube in world units.
    pub unit_length: f32,
    /// Extra scale applied to the outline so it sits just outside the faces.
    pub outline_scale: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            width: 3,
            length: 3,
            unit_length: 0.125,
            outline_scale: 1.01,
        }
    }
}

impl GridLayout {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.length as usize
    }

    /// World-space offset of cell `(column, row)`.
    ///
    /// The grid is shifted by half its extent so it straddles the origin.
    pub fn cell_offset(&self, column: u32, row: u32) -> [f32; 3] {
        let unit = self.unit_length;
        [
            column as f32 * unit - self.width as f32 * unit * 0.5,
            0.0,
            row as f32 * unit - self.length as f32 * unit * 0.5,
        ]
    }

    /// `translation * scale(unit_length)` for one cell.
    pub fn model_matrix(&self, column: u32, row: u32) -> Result<Matrix, MathError> {
        let [x, y, z] = self.cell_offset(column, row);
        let mut model = Matrix::translation(x, y, z);
        model.post_multiply(&Matrix::scale(self.unit_length))?;
        Ok(model)
    }

    /// `model * scale(outline_scale)`, grown in place from the scale matrix.
    pub fn outline_matrix(&self, model: &Matrix) -> Result<Matrix, MathError> {
        let mut outline = Matrix::scale(self.outline_scale);
        outline.pre_multiply(model)?;
        Ok(outline)
    }
}

/// Box mapped onto clip space by the orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoVolume {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoVolume {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 0.0,
            far: 2.0,
        }
    }
}

impl OrthoVolume {
    pub fn projection(&self) -> Result<Matrix, MathError> {
        Matrix::ortho(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Model for the faces and outline of one cube.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTransforms {
    pub column: u32,
    pub row: u32,
    pub model: Matrix,
    pub outline: Matrix,
}

/// Every matrix needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransforms {
    pub view: Matrix,
    pub projection: Matrix,
    pub cells: Vec<CellTransforms>,
}

impl FrameTransforms {
    /// Builds the frame's matrices, stopping at the first invalid input.
    ///
    /// A view that isn't finite is rejected so it never reaches the GPU.
    pub fn build(
        camera: &CameraState,
        grid: &GridLayout,
        volume: &OrthoVolume,
    ) -> Result<Self, MathError> {
        let view = camera.view_matrix()?;
        if !view.is_finite() {
            return Err(MathError::NonFiniteView);
        }
        let projection = volume.projection()?;

        let mut cells = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.length {
            for column in 0..grid.width {
                let model = grid.model_matrix(column, row)?;
                let outline = grid.outline_matrix(&model)?;
                cells.push(CellTransforms {
                    column,
                    row,
                    model,
                    outline,
                });
            }
        }

        Ok(Self {
            view,
            projection,
            cells,
        })
    }

    /// Column-major model matrices for the face instances.
    pub fn model_columns(&self) -> Result<Vec<[[f32; 4]; 4]>, MathError> {
        self.cells
            .iter()
            .map(|cell| cell.model.to_cols_array_2d())
            .collect()
    }

    /// Column-major model matrices for the outline instances.
    pub fn outline_columns(&self) -> Result<Vec<[[f32; 4]; 4]>, MathError> {
        self.cells
            .iter()
            .map(|cell| cell.outline.to_cols_array_2d())
            .collect()
    }
}
