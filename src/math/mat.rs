use crate::math::{Axis, MathError, Vector, deg_to_rad};
use std::fmt;

/// A dense `rows x cols` matrix of `f32`, stored column-major.
///
/// Element `(row, col)` lives at offset `col * rows + row`, which is the layout
/// WGSL and GLSL expect for `mat4x4<f32>` uniforms.
///
/// Products come in three forms:
/// - [`Matrix::multiply`] leaves both operands alone and returns a new matrix.
/// - [`Matrix::post_multiply`] overwrites `self` with `self * rhs`.
/// - [`Matrix::pre_multiply`] overwrites `self` with `lhs * self`.
///
/// The in-place forms take `&mut self`, so the destination can never be the
/// other operand at the same time.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a zero-filled `size x size` matrix.
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::square(size);
        m.make_identity();
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Writes 1.0 on the diagonal. Other entries are left as they are.
    pub fn make_identity(&mut self) {
        self.make_diagonal(1.0);
    }

    /// Writes `value` into the first `min(rows, cols)` diagonal entries.
    pub fn make_diagonal(&mut self, value: f32) {
        for i in 0..self.rows.min(self.cols) {
            self.set(i, i, value);
        }
    }

    /// Panics if `(row, col)` is outside the matrix storage.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * self.rows + row]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * self.rows + row] = value;
    }

    pub fn add_to(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * self.rows + row] += value;
    }

    pub fn scale_element(&mut self, row: usize, col: usize, factor: f32) {
        self.data[col * self.rows + row] *= factor;
    }

    /// Returns `self * rhs` as a new matrix.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, MathError> {
        let data = Self::product(self, rhs)?;
        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    /// Replaces `self` with `self * rhs`.
    ///
    /// `self` takes the product's shape `(self.rows, rhs.cols)`. `rhs` is not
    /// touched. On error `self` is left unchanged.
    pub fn post_multiply(&mut self, rhs: &Matrix) -> Result<&mut Self, MathError> {
        let data = Self::product(self, rhs)?;
        self.cols = rhs.cols;
        self.data = data;
        Ok(self)
    }

    /// Replaces `self` with `lhs * self`.
    ///
    /// `self` takes the product's shape `(lhs.rows, self.cols)`. `lhs` is not
    /// touched. On error `self` is left unchanged.
    pub fn pre_multiply(&mut self, lhs: &Matrix) -> Result<&mut Self, MathError> {
        let data = Self::product(lhs, self)?;
        self.rows = lhs.rows;
        self.data = data;
        Ok(self)
    }

    /// Computes `a * b` into a fresh column-major buffer.
    fn product(a: &Matrix, b: &Matrix) -> Result<Vec<f32>, MathError> {
        if a.cols != b.rows {
            return Err(MathError::DimensionMismatch {
                left_cols: a.cols,
                right_rows: b.rows,
            });
        }

        let mut data = vec![0.0; a.rows * b.cols];
        for col in 0..b.cols {
            for row in 0..a.rows {
                data[col * a.rows + row] =
                    (0..a.cols).map(|k| a.get(row, k) * b.get(k, col)).sum();
            }
        }
        Ok(data)
    }

    /// Transforms a column vector: `self * v`.
    pub fn transform(&self, v: &Vector) -> Result<Vector, MathError> {
        if self.cols != v.size() {
            return Err(MathError::DimensionMismatch {
                left_cols: self.cols,
                right_rows: v.size(),
            });
        }

        let mut result = Vector::new(self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                result.add_to(row, self.get(row, col) * v[col]);
            }
        }
        Ok(result)
    }

    /// True when no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Copies the elements out in column-major order (`rows * cols` floats).
    pub fn to_cols_array(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Column-major `[[f32; 4]; 4]`, ready for a `mat4x4<f32>` uniform.
    pub fn to_cols_array_2d(&self) -> Result<[[f32; 4]; 4], MathError> {
        if self.rows != 4 || self.cols != 4 {
            return Err(MathError::NotFourByFour {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut columns = [[0.0; 4]; 4];
        for (col, column) in columns.iter_mut().enumerate() {
            column.copy_from_slice(&self.data[col * 4..col * 4 + 4]);
        }
        Ok(columns)
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Matrix {
        let mut m = Matrix::identity(4);
        m.set(0, 3, x);
        m.set(1, 3, y);
        m.set(2, 3, z);
        m
    }

    /// Uniform scale by `s` on x, y and z.
    pub fn scale(s: f32) -> Matrix {
        Matrix::scaling(s, s, s)
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix {
        let mut m = Matrix::square(4);
        m.set(0, 0, sx);
        m.set(1, 1, sy);
        m.set(2, 2, sz);
        m.set(3, 3, 1.0);
        m
    }

    /// Rotation about the x axis, angle in degrees.
    pub fn rotation_x(degrees: f32) -> Matrix {
        let (s, c) = deg_to_rad(degrees).sin_cos();
        let mut m = Matrix::identity(4);
        m.set(1, 1, c);
        m.set(1, 2, -s);
        m.set(2, 1, s);
        m.set(2, 2, c);
        m
    }

    /// Rotation about the y axis, angle in degrees.
    pub fn rotation_y(degrees: f32) -> Matrix {
        let (s, c) = deg_to_rad(degrees).sin_cos();
        let mut m = Matrix::identity(4);
        m.set(0, 0, c);
        m.set(0, 2, s);
        m.set(2, 0, -s);
        m.set(2, 2, c);
        m
    }

    /// Rotation about the z axis, angle in degrees.
    pub fn rotation_z(degrees: f32) -> Matrix {
        let (s, c) = deg_to_rad(degrees).sin_cos();
        let mut m = Matrix::identity(4);
        m.set(0, 0, c);
        m.set(0, 1, -s);
        m.set(1, 0, s);
        m.set(1, 1, c);
        m
    }

    /// Builds a view matrix looking from `eye` towards `at`.
    ///
    /// All three vectors must have 3 components. When `eye` and `at` are
    /// exactly equal there is no viewing direction and the identity is
    /// returned.
    ///
    /// The camera basis is `n = normalize(eye - at)`, `u = normalize(up x n)`,
    /// `v = normalize(n x u)`. Rows 0..3 hold `u`, `v` and `n`, and the last
    /// column moves `eye` to the origin.
    ///
    /// `up` must not be parallel to `eye - at`. If it is, `up x n` is zero and
    /// rows 0 and 1 come out NaN; check the result with [`Matrix::is_finite`].
    pub fn look_at(eye: &Vector, at: &Vector, up: &Vector) -> Result<Matrix, MathError> {
        for v in [eye, at, up] {
            if v.size() != 3 {
                return Err(MathError::NotThreeDimensional { size: v.size() });
            }
        }

        if eye == at {
            return Ok(Matrix::identity(4));
        }

        let n = eye.subtract(at)?.normalize();
        let u = up.cross(&n)?.normalize();
        let v = n.cross(&u)?.normalize();

        let mut m = Matrix::square(4);
        for (row, axis) in [&u, &v, &n].into_iter().enumerate() {
            for col in 0..3 {
                m.set(row, col, axis[col]);
            }
            m.set(row, 3, -eye.dot(axis)?);
        }
        m.set(3, 3, 1.0);
        Ok(m)
    }

    /// Orthographic projection of the box `[l, r] x [b, t] x [n, f]` onto the
    /// unit cube.
    ///
    /// z points into the screen, so `near < far` for a visible volume. Each
    /// pair of bounds must differ.
    pub fn ortho(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Result<Matrix, MathError> {
        if l == r {
            return Err(MathError::DegenerateVolume { axis: Axis::X });
        }
        if b == t {
            return Err(MathError::DegenerateVolume { axis: Axis::Y });
        }
        if n == f {
            return Err(MathError::DegenerateVolume { axis: Axis::Z });
        }

        let width = r - l;
        let height = t - b;
        let depth = f - n;

        let mut m = Matrix::square(4);
        m.set(0, 0, 2.0 / width);
        m.set(1, 1, 2.0 / height);
        m.set(2, 2, -2.0 / depth);
        m.set(0, 3, -(l + r) / width);
        m.set(1, 3, -(t + b) / height);
        m.set(2, 3, -(n + f) / depth);
        m.set(3, 3, 1.0);
        Ok(m)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:10.6}", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    fn assert_matrix_close(actual: &Matrix, expected: &Matrix) {
        assert_eq!((actual.rows(), actual.cols()), (expected.rows(), expected.cols()));
        for row in 0..actual.rows() {
            for col in 0..actual.cols() {
                assert_close(actual.get(row, col), expected.get(row, col));
            }
        }
    }

    fn sample(rows: usize, cols: usize, seed: f32) -> Matrix {
        let mut m = Matrix::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                m.set(row, col, seed + row as f32 * 1.5 - col as f32 * 0.25);
            }
        }
        m
    }

    /// Tests that elements are laid out column-major.
    #[test]
    fn test_column_major_layout() {
        let mut m = Matrix::new(2, 3);
        m.set(1, 0, 5.0);
        m.set(0, 2, 7.0);
        m.add_to(0, 2, 1.0);
        m.scale_element(1, 0, 2.0);

        let data = m.to_cols_array();
        assert_eq!(data.len(), 6);
        assert_eq!(data[1], 10.0);
        assert_eq!(data[4], 8.0);
    }

    /// Tests that make_diagonal honours its value and make_identity writes ones.
    #[test]
    fn test_make_diagonal_uses_value() {
        let mut m = Matrix::new(3, 2);
        m.make_diagonal(4.0);
        assert_eq!(m.get(0, 0), 4.0);
        assert_eq!(m.get(1, 1), 4.0);
        assert_eq!(m.get(2, 0), 0.0);

        m.make_identity();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
    }

    /// Tests that the identity is neutral for the pure product.
    #[test]
    fn test_identity_times_matrix() {
        let m = sample(4, 3, 2.0);
        let product = Matrix::identity(4).multiply(&m).unwrap();
        assert_eq!(product, m);
    }

    /// Tests a small product computed by hand.
    #[test]
    fn test_multiply_known_values() {
        let mut a = Matrix::new(2, 3);
        let mut b = Matrix::new(3, 2);
        for (i, value) in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_iter().enumerate() {
            a.set(i / 3, i % 3, value);
            b.set(i / 2, i % 2, value);
        }

        let c = a.multiply(&b).unwrap();
        assert_eq!((c.rows(), c.cols()), (2, 2));
        assert_eq!(c.get(0, 0), 22.0);
        assert_eq!(c.get(0, 1), 28.0);
        assert_eq!(c.get(1, 0), 49.0);
        assert_eq!(c.get(1, 1), 64.0);
    }

    /// Tests that mismatched inner dimensions are rejected.
    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 3);
        assert_eq!(
            a.multiply(&b),
            Err(MathError::DimensionMismatch {
                left_cols: 3,
                right_rows: 2
            })
        );
    }

    /// Tests that post_multiply matches the pure product and reshapes self.
    #[test]
    fn test_post_multiply_matches_pure() {
        let mut a = sample(2, 3, 1.0);
        let b = sample(3, 4, -2.0);
        let b_before = b.clone();
        let expected = a.clone().multiply(&b).unwrap();

        a.post_multiply(&b).unwrap();

        assert_eq!(a, expected);
        assert_eq!((a.rows(), a.cols()), (2, 4));
        assert_eq!(b, b_before);
    }

    /// Tests that pre_multiply matches the pure product and reshapes self.
    #[test]
    fn test_pre_multiply_matches_pure() {
        let a = sample(4, 3, 0.5);
        let mut b = sample(3, 2, 3.0);
        let a_before = a.clone();
        let expected = a.multiply(&b).unwrap();

        b.pre_multiply(&a).unwrap();

        assert_eq!(b, expected);
        assert_eq!((b.rows(), b.cols()), (4, 2));
        assert_eq!(a, a_before);
    }

    /// Tests that a failed in-place product leaves the destination intact.
    #[test]
    fn test_failed_in_place_product_keeps_destination() {
        let mut a = sample(2, 2, 1.0);
        let before = a.clone();
        let b = Matrix::new(3, 3);

        assert!(a.post_multiply(&b).is_err());
        assert!(a.pre_multiply(&b).is_err());
        assert_eq!(a, before);
    }

    /// Tests that a matrix can be multiplied in place by a copy of itself.
    #[test]
    fn test_in_place_square() {
        let mut m = sample(3, 3, 1.0);
        let expected = m.multiply(&m).unwrap();
        let copy = m.clone();
        m.post_multiply(&copy).unwrap();
        assert_eq!(m, expected);
    }

    /// Tests the translation builder by moving a point.
    #[test]
    fn test_translation_moves_point() {
        let t = Matrix::translation(1.0, -2.0, 0.5);
        let p = t.transform(&Vector::from([3.0, 3.0, 3.0, 1.0])).unwrap();
        assert_eq!(p, Vector::from([4.0, 1.0, 3.5, 1.0]));

        let direction = t.transform(&Vector::from([3.0, 3.0, 3.0, 0.0])).unwrap();
        assert_eq!(direction, Vector::from([3.0, 3.0, 3.0, 0.0]));
    }

    /// Tests the scale builders.
    #[test]
    fn test_scale() {
        let s = Matrix::scale(0.125);
        assert_eq!(s.get(0, 0), 0.125);
        assert_eq!(s.get(1, 1), 0.125);
        assert_eq!(s.get(2, 2), 0.125);
        assert_eq!(s.get(3, 3), 1.0);
        assert_eq!(s.get(0, 3), 0.0);

        let s = Matrix::scaling(1.0, 2.0, 3.0);
        let p = s.transform(&Vector::from([1.0, 1.0, 1.0, 1.0])).unwrap();
        assert_eq!(p, Vector::from([1.0, 2.0, 3.0, 1.0]));
    }

    /// Tests that quarter turns map axes the right-handed way.
    #[test]
    fn test_rotations_right_handed() {
        let x = Vector::from([1.0, 0.0, 0.0, 0.0]);
        let y = Vector::from([0.0, 1.0, 0.0, 0.0]);
        let z = Vector::from([0.0, 0.0, 1.0, 0.0]);

        let cases = [
            (Matrix::rotation_x(90.0), &y, [0.0, 0.0, 1.0, 0.0]),
            (Matrix::rotation_y(90.0), &z, [1.0, 0.0, 0.0, 0.0]),
            (Matrix::rotation_z(90.0), &x, [0.0, 1.0, 0.0, 0.0]),
        ];

        for (rotation, input, expected) in cases {
            let out = rotation.transform(input).unwrap();
            for (i, value) in expected.iter().enumerate() {
                assert_close(out[i], *value);
            }
        }
    }

    /// Tests that a full turn is the identity.
    #[test]
    fn test_rotation_full_turn() {
        assert_matrix_close(&Matrix::rotation_z(360.0), &Matrix::identity(4));
        assert_matrix_close(&Matrix::rotation_x(0.0), &Matrix::identity(4));
    }

    /// Tests the degenerate look-at where eye and target coincide.
    #[test]
    fn test_look_at_eye_equals_at() {
        for eye in [[0.0, 0.0, 0.0], [1.0, -2.0, 3.5]] {
            let eye = Vector::from(eye);
            let m = Matrix::look_at(&eye, &eye, &Vector::from([0.0, 1.0, 0.0])).unwrap();
            assert_eq!(m, Matrix::identity(4));
        }
    }

    /// Tests that an up vector along the view direction leaves NaN rows.
    #[test]
    fn test_look_at_parallel_up_is_not_finite() {
        let eye = Vector::from([0.0, 0.5, 0.0]);
        let at = Vector::from([0.0, 0.0, 0.0]);
        let up = Vector::from([0.0, 1.0, 0.0]);
        let view = Matrix::look_at(&eye, &at, &up).unwrap();
        assert!(view.get(0, 0).is_nan());
        assert!(!view.is_finite());
        assert!(Matrix::look_at(&eye, &at, &Vector::from([0.0, 0.0, 1.0]))
            .unwrap()
            .is_finite());
    }

    /// Tests that look-at rejects vectors that are not 3D.
    #[test]
    fn test_look_at_requires_three_components() {
        let eye = Vector::from([0.0, 0.0, 1.0, 1.0]);
        let at = Vector::new(3);
        let up = Vector::from([0.0, 1.0, 0.0]);
        assert_eq!(
            Matrix::look_at(&eye, &at, &up),
            Err(MathError::NotThreeDimensional { size: 4 })
        );
    }

    /// Tests the default viewer camera: eye on +z looking at the origin.
    #[test]
    fn test_look_at_from_positive_z() {
        let eye = Vector::from([0.0, 0.0, 1.0]);
        let at = Vector::new(3);
        let up = Vector::from([0.0, 1.0, 0.0]);

        let view = Matrix::look_at(&eye, &at, &up).unwrap();
        assert_matrix_close(&view, &Matrix::translation(0.0, 0.0, -1.0));

        // The eye itself maps to the camera origin.
        let p = view.transform(&Vector::from([0.0, 0.0, 1.0, 1.0])).unwrap();
        assert_close(p[0], 0.0);
        assert_close(p[1], 0.0);
        assert_close(p[2], 0.0);
    }

    /// Tests that the look-at basis is orthonormal and sends the target down -z.
    #[test]
    fn test_look_at_basis_orthonormal() {
        let eye = Vector::from([0.3, 0.8, 1.2]);
        let at = Vector::from([0.1, -0.2, 0.0]);
        let up = Vector::from([0.0, 1.0, 0.0]);
        let view = Matrix::look_at(&eye, &at, &up).unwrap();

        let rows: Vec<Vector> = (0..3)
            .map(|r| Vector::from([view.get(r, 0), view.get(r, 1), view.get(r, 2)]))
            .collect();
        for i in 0..3 {
            assert_close(rows[i].length(), 1.0);
            for j in (i + 1)..3 {
                assert_close(rows[i].dot(&rows[j]).unwrap(), 0.0);
            }
        }

        let distance = eye.subtract(&at).unwrap().length();
        let target = view
            .transform(&Vector::from([at[0], at[1], at[2], 1.0]))
            .unwrap();
        assert_close(target[0], 0.0);
        assert_close(target[1], 0.0);
        assert_close(target[2], -distance);
    }

    /// Tests the orthographic matrix entries for the viewer's default volume.
    #[test]
    fn test_ortho_entries() {
        let m = Matrix::ortho(-1.0, 1.0, -1.0, 1.0, 0.0, 2.0).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(2, 2), -1.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(1, 3), 0.0);
        assert_eq!(m.get(2, 3), -1.0);
        assert_eq!(m.get(3, 3), 1.0);
    }

    /// Tests where a camera-space point lands after projection.
    ///
    /// scale_z = -2 / (2 - 0) = -1 and translate_z = -(0 + 2) / 2 = -1,
    /// so z' = -1 * 1 - 1 = -2.
    #[test]
    fn test_ortho_maps_point() {
        let m = Matrix::ortho(-1.0, 1.0, -1.0, 1.0, 0.0, 2.0).unwrap();
        let p = m.transform(&Vector::from([0.0, 0.0, 1.0, 1.0])).unwrap();
        assert_eq!(p, Vector::from([0.0, 0.0, -2.0, 1.0]));

        let corner = m.transform(&Vector::from([1.0, -1.0, 0.0, 1.0])).unwrap();
        assert_eq!(corner, Vector::from([1.0, -1.0, -1.0, 1.0]));
    }

    /// Tests that a zero-extent volume fails on every axis.
    #[test]
    fn test_ortho_degenerate() {
        assert_eq!(
            Matrix::ortho(0.5, 0.5, -1.0, 1.0, 0.0, 2.0),
            Err(MathError::DegenerateVolume { axis: Axis::X })
        );
        assert_eq!(
            Matrix::ortho(-1.0, 1.0, 2.0, 2.0, 0.0, 2.0),
            Err(MathError::DegenerateVolume { axis: Axis::Y })
        );
        assert_eq!(
            Matrix::ortho(-1.0, 1.0, -1.0, 1.0, 3.0, 3.0),
            Err(MathError::DegenerateVolume { axis: Axis::Z })
        );
    }

    /// Tests the 4x4 upload helper.
    #[test]
    fn test_to_cols_array_2d() {
        let t = Matrix::translation(1.0, 2.0, 3.0);
        let columns = t.to_cols_array_2d().unwrap();
        assert_eq!(columns[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(columns[0], [1.0, 0.0, 0.0, 0.0]);

        assert_eq!(
            Matrix::new(3, 4).to_cols_array_2d(),
            Err(MathError::NotFourByFour { rows: 3, cols: 4 })
        );
    }
}
