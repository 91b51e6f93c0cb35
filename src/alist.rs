//! Mackay alist format for parity check matrices.
//!
//! The alist format is the usual textual interchange format for LDPC parity
//! check matrices. The first line gives the number of columns and rows, the
//! next three lines list maximum and per-node weights (skipped on read), and
//! the following lines give the 1-based row indices of the ones in each
//! column, then the 1-based column indices of the ones in each row (the
//! latter are redundant and ignored on read).

use crate::dense::BitMatrix;
use num_traits::One;
use thiserror::Error;

/// Alist parsing error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The data ends before the expected number of lines.
    #[error("alist data ends before the expected number of lines")]
    Truncated,
    /// A field could not be parsed as a number.
    #[error("alist contains a field that is not a valid number")]
    InvalidNumber,
    /// The declared dimensions describe an empty matrix.
    #[error("alist declares an empty matrix")]
    EmptyMatrix,
    /// A support entry points outside the declared dimensions.
    #[error("alist entry refers to a row outside the matrix")]
    EntryOutOfRange,
}

/// Constructs a matrix from its alist representation.
///
/// # Errors
/// Returns an [`Error`] describing the first problem found while parsing.
///
/// # Examples
/// ```
/// # use ldpc_bp::alist;
/// # use ldpc_bp::dense::BitMatrix;
/// let h = BitMatrix::identity(2);
/// let restored = alist::from_alist(&alist::to_alist(&h)).unwrap();
/// assert_eq!(restored, h);
/// ```
pub fn from_alist(alist: &str) -> Result<BitMatrix, Error> {
    let mut lines = alist.split('\n');
    let mut sizes = lines.next().ok_or(Error::Truncated)?.split_whitespace();
    let ncols: usize = sizes
        .next()
        .ok_or(Error::Truncated)?
        .parse()
        .map_err(|_| Error::InvalidNumber)?;
    let nrows: usize = sizes
        .next()
        .ok_or(Error::Truncated)?
        .parse()
        .map_err(|_| Error::InvalidNumber)?;
    if nrows == 0 || ncols == 0 {
        return Err(Error::EmptyMatrix);
    }
    // skip the maximum weights and the per-column and per-row weights
    lines.next();
    lines.next();
    lines.next();
    let mut data = vec![vec![0u8; ncols]; nrows];
    for col in 0..ncols {
        let line = lines.next().ok_or(Error::Truncated)?;
        for field in line.split_whitespace() {
            let row: usize = field.parse().map_err(|_| Error::InvalidNumber)?;
            if row == 0 || row > nrows {
                return Err(Error::EntryOutOfRange);
            }
            data[row - 1][col] = 1;
        }
    }
    // the trailing row supports are redundant and not processed
    Ok(BitMatrix::from_fn(nrows, ncols, |i, j| data[i][j] == 1))
}

/// Writes the alist representation of a matrix to a writer.
///
/// # Errors
/// Forwards any error returned by `write!`.
pub fn write_alist<W: std::fmt::Write>(matrix: &BitMatrix, w: &mut W) -> std::fmt::Result {
    let cols: Vec<Vec<usize>> = (0..matrix.cols())
        .map(|j| {
            (0..matrix.rows())
                .filter(|&i| matrix.data[[i, j]].is_one())
                .collect()
        })
        .collect();
    let rows: Vec<Vec<usize>> = (0..matrix.rows())
        .map(|i| {
            (0..matrix.cols())
                .filter(|&j| matrix.data[[i, j]].is_one())
                .collect()
        })
        .collect();
    writeln!(w, "{} {}", matrix.cols(), matrix.rows())?;
    let directions = [&cols, &rows];
    for dir in directions.iter() {
        write!(w, "{} ", dir.iter().map(|el| el.len()).max().unwrap_or(0))?;
    }
    writeln!(w)?;
    for dir in directions.iter() {
        for el in *dir {
            write!(w, "{} ", el.len())?;
        }
        writeln!(w)?;
    }
    for dir in directions.iter() {
        for el in *dir {
            for x in el {
                write!(w, "{} ", x + 1)?;
            }
            writeln!(w)?;
        }
    }
    Ok(())
}

/// Returns a [`String`] with the alist representation of a matrix.
pub fn to_alist(matrix: &BitMatrix) -> String {
    let mut s = String::new();
    // writing to a String cannot fail
    write_alist(matrix, &mut s).unwrap();
    s
}
