use crate::gf2::GF2;
use ndarray::Array2;
use num_traits::{One, Zero};
use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Error {
    Singular,
}

/// Reduces the square matrix `a` to the identity, mirroring every row
/// operation on `b`. On return `b` holds M⁻¹·B₀ where M and B₀ are the
/// initial contents of `a` and `b`.
///
/// Pivoting sorts the working rows `i..` of `a` into descending
/// lexicographic order (stable, mirrored on `b`) before eliminating column
/// `i`; if the pivot position is still zero afterwards, no row in the
/// working block can supply it and the matrix is singular.
pub(crate) fn gauss_jordan(a: &mut Array2<GF2>, b: &mut Array2<GF2>) -> Result<(), Error> {
    let r = a.nrows();
    debug_assert_eq!(r, a.ncols());
    debug_assert_eq!(r, b.nrows());

    // Forward elimination: zeros below each pivot.
    for i in 0..r {
        sort_rows_desc(a, b, i);
        if a[[i, i]].is_zero() {
            return Err(Error::Singular);
        }
        for j in i + 1..r {
            if a[[j, i]].is_one() {
                xor_row(a, i, j);
                xor_row(b, i, j);
            }
        }
    }

    // Back-substitution: zeros above each pivot.
    for i in (1..r).rev() {
        for j in (0..i).rev() {
            if a[[j, i]].is_one() {
                xor_row(a, i, j);
                xor_row(b, i, j);
            }
        }
    }

    Ok(())
}

// Stable insertion sort of rows `from..` of `a`, descending lexicographic,
// with every swap repeated on `b`.
fn sort_rows_desc(a: &mut Array2<GF2>, b: &mut Array2<GF2>, from: usize) {
    for i in from + 1..a.nrows() {
        for j in (from + 1..=i).rev() {
            if compare_rows(a, j - 1, j) == Ordering::Less {
                swap_rows(a, j - 1, j);
                swap_rows(b, j - 1, j);
            } else {
                break;
            }
        }
    }
}

fn compare_rows(a: &Array2<GF2>, i: usize, j: usize) -> Ordering {
    for t in 0..a.ncols() {
        match a[[i, t]].cmp(&a[[j, t]]) {
            Ordering::Equal => (),
            other => return other,
        }
    }
    Ordering::Equal
}

fn swap_rows(m: &mut Array2<GF2>, i: usize, j: usize) {
    for t in 0..m.ncols() {
        m.swap([i, t], [j, t]);
    }
}

// Adds (XOR) row `src` into row `dst`.
fn xor_row(m: &mut Array2<GF2>, src: usize, dst: usize) {
    for t in 0..m.ncols() {
        m[[dst, t]] = m[[dst, t]] + m[[src, t]];
    }
}
