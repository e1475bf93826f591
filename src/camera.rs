//! Eye position state driven by keyboard input.
//!
//! The eye starts one unit in front of the grid on +z and always looks at the
//! origin with +y up. Key presses nudge it along the three axes; the offsets
//! live in [`CameraState`], which the app threads through every frame.

use crate::math::{MathError, Matrix, Vector};

/// Distance of the starting eye position from the origin along +z.
pub const BASE_DEPTH: f32 = 1.0;

/// Default distance covered by one key press.
pub const DEFAULT_STEP: f32 = 0.01;

/// One nudge of the eye position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMove {
    Left,
    Right,
    Up,
    Down,
    /// Towards the grid (-z).
    Closer,
    /// Away from the grid (+z).
    Farther,
}

/// Accumulated eye offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub horizontal: f32,
    pub vertical: f32,
    pub depth: f32,
    pub step: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl CameraState {
    /// Creates a camera at the starting position moving `step` per nudge.
    pub fn new(step: f32) -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            depth: 0.0,
            step,
        }
    }

    pub fn nudge(&mut self, movement: CameraMove) {
        match movement {
            CameraMove::Left => self.horizontal -= self.step,
            CameraMove::Right => self.horizontal += self.step,
            CameraMove::Up => self.vertical += self.step,
            CameraMove::Down => self.vertical -= self.step,
            CameraMove::Closer => self.depth -= self.step,
            CameraMove::Farther => self.depth += self.step,
        }
    }

    /// Moves the eye back to its starting position. The step is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.step);
    }

    pub fn eye(&self) -> Vector {
        Vector::from([self.horizontal, self.vertical, BASE_DEPTH + self.depth])
    }

    pub fn at(&self) -> Vector {
        Vector::new(3)
    }

    pub fn up(&self) -> Vector {
        Vector::from([0.0, 1.0, 0.0])
    }

    /// View matrix for the current eye position.
    ///
    /// Moving the eye onto the origin yields the identity. Moving it onto the
    /// y axis makes `up` parallel to the view direction and the result is not
    /// finite.
    pub fn view_matrix(&self) -> Result<Matrix, MathError> {
        Matrix::look_at(&self.eye(), &self.at(), &self.up())
    }

    /// Lines shown in the eye position overlay.
    pub fn describe(&self) -> [String; 3] {
        [
            format!("X (horizontal, pointing right) = {:.2}", self.horizontal),
            format!("Y (vertical, pointing up) = {:.2}", self.vertical),
            format!(
                "Z (depth, pointing towards you) = {:.2}",
                BASE_DEPTH + self.depth
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    /// Tests that each move changes only its own axis in the expected direction.
    #[test]
    fn test_nudge_directions() {
        let mut camera = CameraState::new(0.5);

        camera.nudge(CameraMove::Right);
        camera.nudge(CameraMove::Right);
        camera.nudge(CameraMove::Left);
        assert_eq!(camera.horizontal, 0.5);

        camera.nudge(CameraMove::Down);
        assert_eq!(camera.vertical, -0.5);
        camera.nudge(CameraMove::Up);
        assert_eq!(camera.vertical, 0.0);

        camera.nudge(CameraMove::Closer);
        assert_eq!(camera.depth, -0.5);
        camera.nudge(CameraMove::Farther);
        camera.nudge(CameraMove::Farther);
        assert_eq!(camera.depth, 0.5);
    }

    /// Tests the eye, target and up vectors derived from the offsets.
    #[test]
    fn test_eye_vectors() {
        let mut camera = CameraState::new(0.25);
        camera.nudge(CameraMove::Left);
        camera.nudge(CameraMove::Up);
        camera.nudge(CameraMove::Closer);

        assert_eq!(camera.eye(), Vector::from([-0.25, 0.25, 0.75]));
        assert_eq!(camera.at(), Vector::from([0.0, 0.0, 0.0]));
        assert_eq!(camera.up(), Vector::from([0.0, 1.0, 0.0]));
    }

    /// Tests the view matrix at the starting position.
    #[test]
    fn test_default_view_matrix() {
        let view = CameraState::default().view_matrix().unwrap();
        let expected = Matrix::translation(0.0, 0.0, -1.0);
        for row in 0..4 {
            for col in 0..4 {
                assert_close(view.get(row, col), expected.get(row, col));
            }
        }
    }

    /// Tests that an eye moved onto the target falls back to the identity.
    #[test]
    fn test_view_matrix_at_target() {
        let mut camera = CameraState::new(0.5);
        camera.nudge(CameraMove::Closer);
        camera.nudge(CameraMove::Closer);
        assert_eq!(camera.eye(), camera.at());
        assert_eq!(camera.view_matrix().unwrap(), Matrix::identity(4));
    }

    /// Tests reset and the overlay text.
    #[test]
    fn test_reset_and_describe() {
        let mut camera = CameraState::default();
        camera.nudge(CameraMove::Left);
        camera.nudge(CameraMove::Farther);

        let lines = camera.describe();
        assert_eq!(lines[0], "X (horizontal, pointing right) = -0.01");
        assert_eq!(lines[1], "Y (vertical, pointing up) = 0.00");
        assert_eq!(lines[2], "Z (depth, pointing towards you) = 1.01");

        camera.reset();
        assert_eq!(camera, CameraState::default());
    }
}
