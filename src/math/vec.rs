use crate::math::MathError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A fixed-length vector of `f32`, used for points and directions.
///
/// The length is chosen at creation and never changes. Binary operations check
/// that both sides have the same length and return [`MathError`] otherwise.
#[derive(Clone, Debug)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Creates a zero-filled vector of `size` elements.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> f32 {
        self.data[index]
    }

    pub fn set(&mut self, index: usize, value: f32) {
        self.data[index] = value;
    }

    pub fn add_to(&mut self, index: usize, value: f32) {
        self.data[index] += value;
    }

    pub fn scale_element(&mut self, index: usize, factor: f32) {
        self.data[index] *= factor;
    }

    /// Element-wise `self - other`.
    pub fn subtract(&self, other: &Self) -> Result<Self, MathError> {
        self.check_size(other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Element-wise `self + other`.
    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        self.check_size(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Right-handed cross product. Only defined for 3-vectors.
    pub fn cross(&self, other: &Self) -> Result<Self, MathError> {
        self.check_size(other)?;
        if self.size() != 3 {
            return Err(MathError::NotThreeDimensional { size: self.size() });
        }

        let (a, b) = (&self.data, &other.data);
        Ok(Self {
            data: vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ],
        })
    }

    /// Sum of element-wise products.
    ///
    /// Mismatched sizes are an error here like everywhere else in this module;
    /// no silent zero is returned.
    pub fn dot(&self, other: &Self) -> Result<f32, MathError> {
        self.check_size(other)?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Euclidean norm.
    pub fn length(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Returns a copy scaled to unit length.
    ///
    /// The zero vector has no direction: normalizing it yields NaN components.
    /// Callers must not pass one.
    pub fn normalize(&self) -> Self {
        let inverse_length = 1.0 / self.length();
        let mut result = self.clone();
        for i in 0..result.size() {
            result.scale_element(i, inverse_length);
        }
        result
    }

    fn check_size(&self, other: &Self) -> Result<(), MathError> {
        if self.size() != other.size() {
            return Err(MathError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }
}

/// Exact element-wise comparison; vectors of different sizes are never equal.
impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<const N: usize> From<[f32; N]> for Vector {
    fn from(values: [f32; N]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:.6}")?;
        }
        write!(f, ")")
    }
}
