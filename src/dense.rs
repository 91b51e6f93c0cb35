//! Dense binary matrix representation and functions.
//!
//! This module implements [`BitMatrix`], a dense matrix over GF(2) backed by
//! an `ndarray` array of [`GF2`](crate::gf2::GF2) elements. All operations
//! are value-semantic: they leave their operands untouched and return fresh
//! matrices.

use crate::gf2::GF2;
use ndarray::{s, Array2, Axis};
use num_traits::Zero;
use std::fmt;
use thiserror::Error;

pub(crate) mod gauss;

/// Dense matrix error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The input data is empty or not rectangular.
    #[error("matrix data must be rectangular and non-empty")]
    InvalidShape,
    /// The dimensions of the operands are incompatible.
    #[error("matrix dimensions are incompatible")]
    ShapeMismatch,
    /// An element access lies outside the matrix.
    #[error("index out of range")]
    IndexOutOfRange,
    /// The argument is not a permutation of the column indices.
    #[error("not a permutation of the column indices")]
    InvalidPermutation,
    /// The matrix has no inverse over GF(2).
    #[error("matrix is singular")]
    Singular,
}

/// A dense binary matrix.
///
/// # Examples
/// ```
/// # use ldpc_bp::dense::BitMatrix;
/// let m = BitMatrix::new(2, 3, &[[1, 0, 1], [0, 1, 1]]).unwrap();
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.cols(), 3);
/// assert!(m.get(0, 2).unwrap());
/// assert!(!m.get(1, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    pub(crate) data: Array2<GF2>,
}

impl BitMatrix {
    /// Creates a matrix from a rectangular grid of integers, reduced mod 2.
    ///
    /// # Errors
    /// Returns [`Error::InvalidShape`] if the grid is empty, has zero-length
    /// rows, or has rows of differing lengths.
    pub fn new<R: AsRef<[u8]>>(rows: usize, cols: usize, data: &[R]) -> Result<BitMatrix, Error> {
        if rows == 0 || cols == 0 || data.len() != rows {
            return Err(Error::InvalidShape);
        }
        let mut m = Array2::zeros((rows, cols));
        for (i, row) in data.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidShape);
            }
            for (j, &value) in row.iter().enumerate() {
                m[[i, j]] = GF2::from(value);
            }
        }
        Ok(BitMatrix { data: m })
    }

    /// Creates a matrix whose element (i, j) is one iff `f(i, j)` is `true`.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is zero.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> BitMatrix
    where
        F: FnMut(usize, usize) -> bool,
    {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive");
        BitMatrix {
            data: Array2::from_shape_fn((rows, cols), |(i, j)| GF2::from(f(i, j))),
        }
    }

    /// Creates the n × n identity matrix.
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn identity(n: usize) -> BitMatrix {
        BitMatrix::from_fn(n, n, |i, j| i == j)
    }

    /// Creates the all-zero matrix of the given size.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is zero.
    pub fn zero(rows: usize, cols: usize) -> BitMatrix {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive");
        BitMatrix {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Returns the number of rows of the matrix.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of columns of the matrix.
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Returns the element at the given position.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if the position lies outside the
    /// matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, Error> {
        self.data
            .get([row, col])
            .map(|v| v.as_bool())
            .ok_or(Error::IndexOutOfRange)
    }

    /// Returns `true` iff every element is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| v.is_zero())
    }

    /// Returns the transposed matrix.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_bp::dense::BitMatrix;
    /// let m = BitMatrix::new(2, 3, &[[1, 0, 1], [0, 1, 1]]).unwrap();
    /// assert_eq!(m.transpose().transpose(), m);
    /// ```
    pub fn transpose(&self) -> BitMatrix {
        BitMatrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Returns the sub-matrix formed by the columns `start..end`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] unless `start <= end <= cols`.
    pub fn columns(&self, start: usize, end: usize) -> Result<BitMatrix, Error> {
        if start > end || end > self.cols() {
            return Err(Error::IndexOutOfRange);
        }
        Ok(BitMatrix {
            data: self.data.slice(s![.., start..end]).to_owned(),
        })
    }

    /// Returns the matrix whose column j is column `permutation[j]` of
    /// `self`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPermutation`] if `permutation` is not a
    /// bijection on the column indices.
    pub fn permute_columns(&self, permutation: &[usize]) -> Result<BitMatrix, Error> {
        let cols = self.cols();
        if permutation.len() != cols {
            return Err(Error::InvalidPermutation);
        }
        let mut seen = vec![false; cols];
        for &p in permutation {
            if p >= cols || seen[p] {
                return Err(Error::InvalidPermutation);
            }
            seen[p] = true;
        }
        Ok(BitMatrix {
            data: Array2::from_shape_fn((self.rows(), cols), |(i, j)| {
                self.data[[i, permutation[j]]]
            }),
        })
    }

    /// Concatenates matrices side by side.
    ///
    /// # Errors
    /// Returns [`Error::InvalidShape`] if `matrices` is empty and
    /// [`Error::ShapeMismatch`] if the row counts differ.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_bp::dense::BitMatrix;
    /// let a = BitMatrix::identity(2);
    /// let b = BitMatrix::zero(2, 3);
    /// let m = BitMatrix::horiz_concat(&[a.clone(), b]).unwrap();
    /// assert_eq!(m.cols(), 5);
    /// assert_eq!(m.columns(0, 2).unwrap(), a);
    /// ```
    pub fn horiz_concat(matrices: &[BitMatrix]) -> Result<BitMatrix, Error> {
        let first = matrices.first().ok_or(Error::InvalidShape)?;
        if matrices.iter().any(|m| m.rows() != first.rows()) {
            return Err(Error::ShapeMismatch);
        }
        let views: Vec<_> = matrices.iter().map(|m| m.data.view()).collect();
        Ok(BitMatrix {
            data: ndarray::concatenate(Axis(1), &views).unwrap(),
        })
    }

    /// Concatenates matrices on top of each other.
    ///
    /// # Errors
    /// Returns [`Error::InvalidShape`] if `matrices` is empty and
    /// [`Error::ShapeMismatch`] if the column counts differ.
    pub fn vert_concat(matrices: &[BitMatrix]) -> Result<BitMatrix, Error> {
        let first = matrices.first().ok_or(Error::InvalidShape)?;
        if matrices.iter().any(|m| m.cols() != first.cols()) {
            return Err(Error::ShapeMismatch);
        }
        let views: Vec<_> = matrices.iter().map(|m| m.data.view()).collect();
        Ok(BitMatrix {
            data: ndarray::concatenate(Axis(0), &views).unwrap(),
        })
    }

    /// Multiplies this matrix with another matrix mod 2.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] unless `self.cols() == rhs.rows()`.
    pub fn mul(&self, rhs: &BitMatrix) -> Result<BitMatrix, Error> {
        if self.cols() != rhs.rows() {
            return Err(Error::ShapeMismatch);
        }
        Ok(BitMatrix {
            data: self.data.dot(&rhs.data),
        })
    }

    /// Adds (XOR) another matrix to this matrix.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] unless both shapes agree.
    pub fn add(&self, rhs: &BitMatrix) -> Result<BitMatrix, Error> {
        if self.rows() != rhs.rows() || self.cols() != rhs.cols() {
            return Err(Error::ShapeMismatch);
        }
        Ok(BitMatrix {
            data: &self.data + &rhs.data,
        })
    }

    /// Returns `true` iff the matrix is square and has full rank over GF(2).
    ///
    /// The matrix itself is never modified; elimination runs on a working
    /// copy.
    pub fn is_invertible(&self) -> bool {
        if self.rows() != self.cols() {
            return false;
        }
        let mut work = self.data.clone();
        let mut mirror = Array2::zeros((self.rows(), 0));
        gauss::gauss_jordan(&mut work, &mut mirror).is_ok()
    }

    /// Returns the inverse matrix over GF(2).
    ///
    /// # Errors
    /// Returns [`Error::Singular`] if the matrix is not square or not
    /// invertible.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_bp::dense::BitMatrix;
    /// let m = BitMatrix::new(2, 2, &[[1, 1], [0, 1]]).unwrap();
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(m.mul(&inv).unwrap(), BitMatrix::identity(2));
    /// ```
    pub fn inverse(&self) -> Result<BitMatrix, Error> {
        if self.rows() != self.cols() {
            return Err(Error::Singular);
        }
        let mut work = self.data.clone();
        let mut inv = BitMatrix::identity(self.rows()).data;
        match gauss::gauss_jordan(&mut work, &mut inv) {
            Ok(()) => Ok(BitMatrix { data: inv }),
            Err(gauss::Error::Singular) => Err(Error::Singular),
        }
    }
}

impl fmt::Display for BitMatrix {
    /// Renders the matrix as rows of space-separated 0/1 digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.outer_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", v)?;
            }
        }
        Ok(())
    }
}
