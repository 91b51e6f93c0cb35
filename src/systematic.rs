//! Systematic generator construction.
//!
//! This module derives the systematic generator matrix of a parity check
//! matrix H of shape (m, n) with n > m. Splitting H = [A | B] at column
//! k = n − m, the generator is G = [I_k | Aᵀ(Bᵀ)⁻¹], which exists whenever
//! the square right block B is invertible. Codes built this way carry the
//! message verbatim in the first k bits of every codeword.

use crate::dense::{gauss, BitMatrix};
use ndarray::s;
use thiserror::Error;

/// Generator construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The parity check matrix has at least as many rows as columns.
    #[error("the parity check matrix has at least as many rows as columns")]
    ParityOverdetermined,
    /// The square matrix formed by the last columns of the parity check
    /// matrix is singular, so no systematic generator exists for this
    /// column order.
    #[error("the right block of the parity check matrix is singular")]
    NonSystematic,
}

/// Computes the systematic generator matrix for a parity check matrix.
///
/// The returned matrix G has shape (n − m, n) and satisfies G · Hᵀ = 0.
///
/// # Errors
/// Returns [`Error::ParityOverdetermined`] if `h` has at least as many rows
/// as columns and [`Error::NonSystematic`] if the rightmost square block of
/// `h` is singular.
///
/// # Examples
/// ```
/// # use ldpc_bp::dense::BitMatrix;
/// # use ldpc_bp::systematic::generator_matrix;
/// let h = BitMatrix::horiz_concat(&[BitMatrix::zero(3, 3), BitMatrix::identity(3)]).unwrap();
/// let g = generator_matrix(&h).unwrap();
/// let expected =
///     BitMatrix::horiz_concat(&[BitMatrix::identity(3), BitMatrix::zero(3, 3)]).unwrap();
/// assert_eq!(g, expected);
/// ```
pub fn generator_matrix(h: &BitMatrix) -> Result<BitMatrix, Error> {
    let m = h.rows();
    let n = h.cols();
    if n <= m {
        return Err(Error::ParityOverdetermined);
    }
    let k = n - m;

    // Reduce the right block B to the identity; the mirrored left block
    // then holds B⁻¹A, whose transpose is the parity part Aᵀ(Bᵀ)⁻¹ of G.
    let mut right = h.data.slice(s![.., k..]).to_owned();
    let mut left = h.data.slice(s![.., ..k]).to_owned();
    match gauss::gauss_jordan(&mut right, &mut left) {
        Ok(()) => (),
        Err(gauss::Error::Singular) => return Err(Error::NonSystematic),
    }

    let parity = BitMatrix {
        data: left.reversed_axes(),
    };
    Ok(BitMatrix::horiz_concat(&[BitMatrix::identity(k), parity]).unwrap())
}
