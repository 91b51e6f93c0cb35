//! Tanner graph adjacency for a parity check matrix.
//!
//! The bipartite graph of a parity check matrix H relates check nodes (rows)
//! and symbol nodes (columns); the edges are the nonzero entries of H. This
//! module stores the graph as two index lists, one per direction, built once
//! per code instance.

use crate::dense::BitMatrix;
use num_traits::One;
use std::slice::Iter;

/// Sparse adjacency view of a parity check matrix.
///
/// # Examples
/// ```
/// # use ldpc_bp::dense::BitMatrix;
/// # use ldpc_bp::tanner::TannerGraph;
/// let h = BitMatrix::new(2, 3, &[[1, 1, 0], [0, 1, 1]]).unwrap();
/// let graph = TannerGraph::new(&h);
/// assert_eq!(graph.iter_check(0).copied().collect::<Vec<_>>(), [0, 1]);
/// assert_eq!(graph.iter_symbol(1).copied().collect::<Vec<_>>(), [0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TannerGraph {
    checks: Vec<Vec<usize>>,
    symbols: Vec<Vec<usize>>,
}

impl TannerGraph {
    /// Builds the adjacency lists of `h`.
    ///
    /// The matrix is scanned in row-major order, so every adjacency list
    /// comes out in ascending index order.
    pub fn new(h: &BitMatrix) -> TannerGraph {
        let mut checks = vec![Vec::new(); h.rows()];
        let mut symbols = vec![Vec::new(); h.cols()];
        for i in 0..h.rows() {
            for j in 0..h.cols() {
                if h.data[[i, j]].is_one() {
                    checks[i].push(j);
                    symbols[j].push(i);
                }
            }
        }
        TannerGraph { checks, symbols }
    }

    /// Returns the number of check nodes (rows of H).
    pub fn num_checks(&self) -> usize {
        self.checks.len()
    }

    /// Returns the number of symbol nodes (columns of H).
    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Returns an iterator over the symbols participating in a check.
    pub fn iter_check(&self, check: usize) -> Iter<'_, usize> {
        self.checks[check].iter()
    }

    /// Returns an iterator over the checks a symbol participates in.
    pub fn iter_symbol(&self, symbol: usize) -> Iter<'_, usize> {
        self.symbols[symbol].iter()
    }

    /// Returns the number of symbols in a check.
    pub fn check_degree(&self, check: usize) -> usize {
        self.checks[check].len()
    }

    /// Returns the number of checks a symbol participates in.
    pub fn symbol_degree(&self, symbol: usize) -> usize {
        self.symbols[symbol].len()
    }

    /// Returns `true` if the edge (check, symbol) is present.
    pub fn contains(&self, check: usize, symbol: usize) -> bool {
        // symbol lists are typically shorter, so search there
        self.symbols[symbol].contains(&check)
    }

    /// Returns `true` iff the hard bits satisfy every parity check.
    ///
    /// # Panics
    /// Panics if `bits` does not hold one bit per symbol node.
    pub fn syndrome_is_zero(&self, bits: &[u8]) -> bool {
        assert_eq!(bits.len(), self.num_symbols());
        !self
            .checks
            .iter()
            .any(|check| check.iter().filter(|&&j| bits[j] & 1 == 1).count() % 2 == 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example_graph() -> TannerGraph {
        let h = BitMatrix::new(
            3,
            6,
            &[[1, 1, 0, 1, 0, 0], [0, 1, 1, 0, 1, 0], [1, 0, 0, 0, 1, 1]],
        )
        .unwrap();
        TannerGraph::new(&h)
    }

    #[test]
    fn adjacency_lists() {
        let graph = example_graph();
        assert_eq!(graph.num_checks(), 3);
        assert_eq!(graph.num_symbols(), 6);
        let row: Vec<usize> = graph.iter_check(0).copied().collect();
        assert_eq!(row, [0, 1, 3]);
        let col: Vec<usize> = graph.iter_symbol(4).copied().collect();
        assert_eq!(col, [1, 2]);
        assert_eq!(graph.check_degree(1), 3);
        assert_eq!(graph.symbol_degree(0), 2);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = example_graph();
        for i in 0..graph.num_checks() {
            for &j in graph.iter_check(i) {
                assert!(graph.iter_symbol(j).any(|&r| r == i));
                assert!(graph.contains(i, j));
            }
        }
        for j in 0..graph.num_symbols() {
            for &i in graph.iter_symbol(j) {
                assert!(graph.iter_check(i).any(|&c| c == j));
            }
        }
        assert!(!graph.contains(0, 2));
    }

    #[test]
    fn lists_are_ascending() {
        let graph = example_graph();
        for i in 0..graph.num_checks() {
            let row: Vec<usize> = graph.iter_check(i).copied().collect();
            let mut sorted = row.clone();
            sorted.sort_unstable();
            assert_eq!(row, sorted);
        }
        for j in 0..graph.num_symbols() {
            let col: Vec<usize> = graph.iter_symbol(j).copied().collect();
            let mut sorted = col.clone();
            sorted.sort_unstable();
            assert_eq!(col, sorted);
        }
    }

    #[test]
    fn syndrome_test() {
        let graph = example_graph();
        assert!(graph.syndrome_is_zero(&[0, 0, 0, 0, 0, 0]));
        assert!(graph.syndrome_is_zero(&[1, 1, 1, 0, 0, 1]));
        // rows 0 and 2 see exactly one set bit
        assert!(!graph.syndrome_is_zero(&[1, 0, 0, 0, 0, 0]));
        // bits 0 and 1 cancel in row 0 but row 1 stays odd
        assert!(!graph.syndrome_is_zero(&[1, 1, 0, 0, 0, 1]));
    }
}
