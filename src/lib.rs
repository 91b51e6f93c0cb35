//! # ldpc-bp
//!
//! `ldpc_bp` implements binary LDPC block codes over GF(2): a dense bit
//! matrix type with the usual linear algebra, systematic generator
//! construction from a parity check matrix, and iterative soft-decision
//! decoding with the sum-product (belief propagation) algorithm on the
//! Tanner graph of the code.
//!
//! The main entry point is [`ldpc::Ldpc`], which is built from a parity
//! check matrix and a binary symmetric channel crossover probability and
//! offers [`encode`](ldpc::Ldpc::encode) and [`decode`](ldpc::Ldpc::decode).
//! The underlying pieces are usable on their own: [`dense::BitMatrix`] for
//! GF(2) matrix algebra, [`systematic::generator_matrix`] for generator
//! construction, [`tanner::TannerGraph`] for the adjacency view of a parity
//! check matrix, and [`alist`] for reading and writing matrices in the
//! Mackay alist format.

pub mod alist;
pub mod dense;
pub mod gf2;
pub mod ldpc;
pub mod systematic;
pub mod tanner;
