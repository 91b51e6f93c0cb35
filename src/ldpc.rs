//! LDPC encoding and sum-product decoding.
//!
//! This module provides [`Ldpc`], which couples a parity check matrix, its
//! systematic generator, and the Tanner graph of the code, and exposes
//! systematic encoding and iterative soft-decision decoding by belief
//! propagation over a binary symmetric channel.
//!
//! Decoding starts from the channel log-likelihood ratios of the received
//! hard bits, exchanges messages between symbol and check nodes with the
//! tanh/atanh sum-product rule, and stops as soon as the hard decision on
//! the posterior satisfies every parity check or the iteration cap is
//! reached. The decoder returns its best estimate either way; callers that
//! need to detect non-convergence can test the syndrome of the result
//! against [`TannerGraph::syndrome_is_zero`].

use crate::dense::{self, BitMatrix};
use crate::gf2::GF2;
use crate::systematic;
use crate::tanner::TannerGraph;
use ndarray::{Array1, Array2};
use thiserror::Error;

/// LDPC codec error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The bitflip chance lies outside the open interval (0, 0.5).
    #[error("bitflip chance must lie strictly between 0 and 0.5")]
    InvalidChannel,
    /// The generator matrix could not be constructed.
    #[error(transparent)]
    Generator(#[from] systematic::Error),
    /// A matrix or message dimension does not fit the code.
    #[error(transparent)]
    Matrix(#[from] dense::Error),
}

/// Observer of the decoder's per-iteration decisions.
///
/// The decoder calls [`on_iteration`](IterationObserver::on_iteration) after
/// every decision step: once with the initial hard decision (iteration 0)
/// and once per message-passing iteration. `estimate` holds the current hard
/// bits and `posterior` the LLRs they were decided from. Observers must
/// return promptly and cannot mutate the decoder.
pub trait IterationObserver {
    /// Receives the decision of one iteration.
    fn on_iteration(&mut self, iteration: usize, estimate: &[u8], posterior: &[f64]);
}

struct NullObserver;

impl IterationObserver for NullObserver {
    fn on_iteration(&mut self, _iteration: usize, _estimate: &[u8], _posterior: &[f64]) {}
}

/// Binary LDPC code with a sum-product decoder.
///
/// # Examples
/// ```
/// # use ldpc_bp::dense::BitMatrix;
/// # use ldpc_bp::ldpc::Ldpc;
/// let h = BitMatrix::horiz_concat(&[BitMatrix::zero(3, 3), BitMatrix::identity(3)]).unwrap();
/// let code = Ldpc::new(h, 0.1, 20).unwrap();
/// let codeword = code.encode(&[1, 0, 1]).unwrap();
/// assert_eq!(codeword, [1, 0, 1, 0, 0, 0]);
/// assert_eq!(code.decode(&codeword).unwrap(), codeword);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ldpc {
    g: BitMatrix,
    h: BitMatrix,
    graph: TannerGraph,
    bitflip_chance: f64,
    max_iterations: usize,
}

impl Ldpc {
    /// Creates a codec from a parity check matrix, deriving the systematic
    /// generator.
    ///
    /// # Errors
    /// Returns [`Error::InvalidChannel`] unless `bitflip_chance` lies in
    /// (0, 0.5), and a [`Error::Generator`] error if the generator cannot be
    /// derived from `h`.
    pub fn new(h: BitMatrix, bitflip_chance: f64, max_iterations: usize) -> Result<Ldpc, Error> {
        let g = systematic::generator_matrix(&h)?;
        Ldpc::with_generator(g, h, bitflip_chance, max_iterations)
    }

    /// Creates a codec from a pre-computed generator matrix.
    ///
    /// The generator is trusted: only its column count is checked against
    /// `h`, not G · Hᵀ = 0.
    ///
    /// # Errors
    /// Returns [`Error::Matrix`] if `g` and `h` disagree on the codeword
    /// length and [`Error::InvalidChannel`] for an invalid channel
    /// parameter.
    pub fn with_generator(
        g: BitMatrix,
        h: BitMatrix,
        bitflip_chance: f64,
        max_iterations: usize,
    ) -> Result<Ldpc, Error> {
        if g.cols() != h.cols() {
            return Err(dense::Error::ShapeMismatch.into());
        }
        check_chance(bitflip_chance)?;
        let graph = TannerGraph::new(&h);
        Ok(Ldpc {
            g,
            h,
            graph,
            bitflip_chance,
            max_iterations,
        })
    }

    /// Returns the generator matrix.
    pub fn generator(&self) -> &BitMatrix {
        &self.g
    }

    /// Returns the parity check matrix.
    pub fn parity_check(&self) -> &BitMatrix {
        &self.h
    }

    /// Returns the Tanner graph of the parity check matrix.
    pub fn graph(&self) -> &TannerGraph {
        &self.graph
    }

    /// Returns the number of message bits per codeword (k).
    pub fn message_bits(&self) -> usize {
        self.g.rows()
    }

    /// Returns the number of bits per codeword (n).
    pub fn encoded_bits(&self) -> usize {
        self.g.cols()
    }

    /// Returns the number of parity bits per codeword (m).
    pub fn parity_bits(&self) -> usize {
        self.h.rows()
    }

    /// Returns the crossover probability of the channel.
    pub fn bitflip_chance(&self) -> f64 {
        self.bitflip_chance
    }

    /// Returns the iteration cap of the decoder.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Changes the crossover probability of the channel.
    ///
    /// # Errors
    /// Returns [`Error::InvalidChannel`] unless the chance lies in (0, 0.5).
    pub fn set_bitflip_chance(&mut self, bitflip_chance: f64) -> Result<(), Error> {
        check_chance(bitflip_chance)?;
        self.bitflip_chance = bitflip_chance;
        Ok(())
    }

    /// Changes the iteration cap of the decoder.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// Encodes a message block of k bits into a codeword of n bits.
    ///
    /// # Errors
    /// Returns [`Error::Matrix`] if the message does not hold exactly
    /// [`message_bits`](Ldpc::message_bits) bits.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        if message.len() != self.message_bits() {
            return Err(dense::Error::ShapeMismatch.into());
        }
        Ok(self.encode_block(message))
    }

    /// Encodes a message of arbitrary length, splitting it into k-bit
    /// blocks and zero-padding the tail.
    pub fn encode_blocks(&self, message: &[u8]) -> Vec<u8> {
        let k = self.message_bits();
        let mut out = Vec::with_capacity(message.len().div_ceil(k) * self.encoded_bits());
        for block in message.chunks(k) {
            if block.len() == k {
                out.extend_from_slice(&self.encode_block(block));
            } else {
                let mut padded = block.to_vec();
                padded.resize(k, 0);
                out.extend_from_slice(&self.encode_block(&padded));
            }
        }
        out
    }

    fn encode_block(&self, message: &[u8]) -> Vec<u8> {
        let message: Array1<GF2> = message.iter().map(|&b| GF2::from(b)).collect();
        let codeword = message.dot(&self.g.data);
        codeword.iter().map(|&v| u8::from(v)).collect()
    }

    /// Decodes a received word of n hard bits.
    ///
    /// Returns the hard decision after belief propagation: the transmitted
    /// codeword when decoding converges, otherwise the estimate at the
    /// iteration cap.
    ///
    /// # Errors
    /// Returns [`Error::Matrix`] if the received word does not hold exactly
    /// [`encoded_bits`](Ldpc::encoded_bits) bits.
    pub fn decode(&self, received: &[u8]) -> Result<Vec<u8>, Error> {
        self.decode_with_observer(received, &mut NullObserver)
    }

    /// Decodes a received word, reporting every decision to an observer.
    ///
    /// # Errors
    /// Same as [`decode`](Ldpc::decode).
    pub fn decode_with_observer<O>(
        &self,
        received: &[u8],
        observer: &mut O,
    ) -> Result<Vec<u8>, Error>
    where
        O: IterationObserver,
    {
        if received.len() != self.encoded_bits() {
            return Err(dense::Error::ShapeMismatch.into());
        }
        Ok(self.propagate(received, observer))
    }

    /// Decodes a concatenation of codewords.
    ///
    /// # Errors
    /// Returns [`Error::Matrix`] unless the input length is a whole number
    /// of [`encoded_bits`](Ldpc::encoded_bits)-sized blocks.
    pub fn decode_blocks(&self, received: &[u8]) -> Result<Vec<u8>, Error> {
        let n = self.encoded_bits();
        if received.len() % n != 0 {
            return Err(dense::Error::ShapeMismatch.into());
        }
        let mut out = Vec::with_capacity(received.len());
        for block in received.chunks(n) {
            out.extend_from_slice(&self.propagate(block, &mut NullObserver));
        }
        Ok(out)
    }

    /// Strips the parity bits from a concatenation of decoded codewords,
    /// keeping the first k bits of every n-bit block and truncating the
    /// result to `data_len` bits.
    pub fn extract_data(&self, decoded: &[u8], data_len: usize) -> Vec<u8> {
        let n = self.encoded_bits();
        let k = self.message_bits();
        let mut data: Vec<u8> = decoded
            .chunks(n)
            .flat_map(|block| block.iter().take(k).copied())
            .collect();
        data.truncate(data_len);
        data
    }

    /// Returns the channel LLR of a received hard bit.
    ///
    /// The value is log((1 − p − y)/(p − y)): positive for y = 0, negative
    /// for y = 1, with the ratio itself positive for any p in (0, 0.5).
    fn channel_llr(&self, bit: u8) -> f64 {
        let y = f64::from(bit & 1);
        let p = self.bitflip_chance;
        ((1.0 - p - y) / (p - y)).ln()
    }

    fn propagate<O: IterationObserver>(&self, received: &[u8], observer: &mut O) -> Vec<u8> {
        let m = self.parity_bits();
        let n = self.encoded_bits();
        let llrs: Vec<f64> = received.iter().map(|&b| self.channel_llr(b)).collect();

        // Per-edge message scratch; only entries on edges of the Tanner
        // graph are ever read or written.
        let mut to_check = Array2::<f64>::zeros((m, n));
        let mut from_check = Array2::<f64>::zeros((m, n));
        for i in 0..m {
            for &j in self.graph.iter_check(i) {
                to_check[[i, j]] = llrs[j];
            }
        }

        let mut estimate = hard_decisions(&llrs);
        observer.on_iteration(0, &estimate, &llrs);

        let mut iteration = 0;
        while !self.graph.syndrome_is_zero(&estimate) && iteration < self.max_iterations {
            // Check node update: extrinsic tanh product per edge.
            for i in 0..m {
                for &j in self.graph.iter_check(i) {
                    let mut product = 1.0;
                    for &k in self.graph.iter_check(i) {
                        if k != j {
                            product *= (to_check[[i, k]] / 2.0).tanh();
                        }
                    }
                    from_check[[i, j]] = 2.0 * atanh(product);
                }
            }

            // Symbol node update: channel LLR plus extrinsic sums.
            for j in 0..n {
                for &i in self.graph.iter_symbol(j) {
                    let mut sum = 0.0;
                    for &k in self.graph.iter_symbol(j) {
                        if k != i {
                            sum += from_check[[k, j]];
                        }
                    }
                    to_check[[i, j]] = llrs[j] + sum;
                }
            }

            // Posterior estimate over all incoming check messages.
            let posterior: Vec<f64> = (0..n)
                .map(|j| {
                    llrs[j]
                        + self
                            .graph
                            .iter_symbol(j)
                            .map(|&k| from_check[[k, j]])
                            .sum::<f64>()
                })
                .collect();

            estimate = hard_decisions(&posterior);
            iteration += 1;
            observer.on_iteration(iteration, &estimate, &posterior);
        }

        estimate
    }
}

fn check_chance(bitflip_chance: f64) -> Result<(), Error> {
    if bitflip_chance > 0.0 && bitflip_chance < 0.5 {
        Ok(())
    } else {
        Err(Error::InvalidChannel)
    }
}

/// Hard decision per position: 1 where the LLR is negative, 0 elsewhere
/// (ties favor 0).
fn hard_decisions(llrs: &[f64]) -> Vec<u8> {
    llrs.iter().map(|&llr| u8::from(llr < 0.0)).collect()
}

// Products of tanh values can round to ±1, which atanh maps to ±∞; the
// clamp keeps every message finite.
const TANH_LIMIT: f64 = 1.0 - 1e-12;

fn atanh(x: f64) -> f64 {
    let x = x.clamp(-TANH_LIMIT, TANH_LIMIT);
    0.5 * ((1.0 + x) / (1.0 - x)).ln()
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    fn from_strings(rows: &[&str]) -> BitMatrix {
        let data: Vec<Vec<u8>> = rows.iter().map(|r| bits(r)).collect();
        BitMatrix::new(rows.len(), rows[0].len(), &data).unwrap()
    }

    fn example_h() -> BitMatrix {
        from_strings(&[
            "011011101111",
            "110101000010",
            "000011110000",
            "011000100010",
            "111010111010",
            "101000010100",
        ])
    }

    fn example_code() -> Ldpc {
        Ldpc::new(example_h(), 0.1, 20).unwrap()
    }

    // Columns 1 and 10 of the example parity check matrix coincide, so the
    // code cannot uniquely correct a single error at either position.
    const AMBIGUOUS: [usize; 2] = [1, 10];

    #[test]
    fn dimensions() {
        let code = example_code();
        assert_eq!(code.message_bits(), 6);
        assert_eq!(code.encoded_bits(), 12);
        assert_eq!(code.parity_bits(), 6);
        assert_eq!(code.generator().rows(), 6);
        assert_eq!(code.parity_check(), &example_h());
        assert_eq!(code.graph().num_checks(), 6);
        assert_eq!(code.bitflip_chance(), 0.1);
        assert_eq!(code.max_iterations(), 20);
    }

    #[test]
    fn invalid_channel() {
        for p in [0.6, 0.5, 0.0, -0.1, f64::NAN] {
            assert_eq!(
                Ldpc::new(example_h(), p, 20).unwrap_err(),
                Error::InvalidChannel
            );
        }
        let mut code = example_code();
        assert_eq!(
            code.set_bitflip_chance(0.5),
            Err(Error::InvalidChannel)
        );
        code.set_bitflip_chance(0.2).unwrap();
        assert_eq!(code.bitflip_chance(), 0.2);
    }

    #[test]
    fn non_systematic_parity_check() {
        // the right block has two equal columns
        let h = from_strings(&["101011", "010111", "001000"]);
        assert_eq!(
            Ldpc::new(h, 0.1, 20).unwrap_err(),
            Error::Generator(systematic::Error::NonSystematic)
        );
    }

    #[test]
    fn with_generator_checks_widths() {
        let h = example_h();
        let g = systematic::generator_matrix(&h).unwrap();
        assert!(Ldpc::with_generator(g.clone(), h, 0.1, 20).is_ok());
        let narrow = BitMatrix::identity(6);
        assert_eq!(
            Ldpc::with_generator(narrow, example_h(), 0.1, 20).unwrap_err(),
            Error::Matrix(dense::Error::ShapeMismatch)
        );
        assert_eq!(
            Ldpc::with_generator(g, example_h(), 0.6, 20).unwrap_err(),
            Error::InvalidChannel
        );
    }

    #[test]
    fn encode_is_systematic() {
        let code = example_code();
        let codeword = code.encode(&bits("111001")).unwrap();
        assert_eq!(codeword, bits("111001101010"));
        assert_eq!(&codeword[..6], bits("111001"));
        assert!(code.graph().syndrome_is_zero(&codeword));
        assert_eq!(
            code.encode(&bits("1110")).unwrap_err(),
            Error::Matrix(dense::Error::ShapeMismatch)
        );
    }

    #[test]
    fn decode_checks_length() {
        let code = example_code();
        assert_eq!(
            code.decode(&bits("101")).unwrap_err(),
            Error::Matrix(dense::Error::ShapeMismatch)
        );
    }

    #[test]
    fn clean_codewords_decode_immediately() {
        let code = example_code();
        for u in 0..64u32 {
            let message: Vec<u8> = (0..6).map(|b| ((u >> b) & 1) as u8).collect();
            let codeword = code.encode(&message).unwrap();
            let mut recorder = Recorder {
                iterations: Vec::new(),
                last_estimate: Vec::new(),
                posterior_len: 0,
            };
            let decoded = code.decode_with_observer(&codeword, &mut recorder).unwrap();
            assert_eq!(decoded, codeword);
            // the initial hard decision already satisfies every check
            assert_eq!(recorder.iterations, [0]);
        }
    }

    #[test]
    fn corrects_single_error() {
        let code = example_code();
        let codeword = code.encode(&bits("111001")).unwrap();
        let mut received = codeword.clone();
        received[6] ^= 1;
        let decoded = code.decode(&received).unwrap();
        assert_eq!(decoded, codeword);
        assert!(code.graph().syndrome_is_zero(&decoded));
    }

    #[test]
    fn corrects_every_correctable_single_error() {
        let code = example_code();
        for u in 0..64u32 {
            let message: Vec<u8> = (0..6).map(|b| ((u >> b) & 1) as u8).collect();
            let codeword = code.encode(&message).unwrap();
            for j in 0..12 {
                if AMBIGUOUS.contains(&j) {
                    continue;
                }
                let mut received = codeword.clone();
                received[j] ^= 1;
                assert_eq!(code.decode(&received).unwrap(), codeword);
            }
        }
    }

    #[test]
    fn decode_is_deterministic() {
        let code = example_code();
        let mut received = code.encode(&bits("111001")).unwrap();
        received[AMBIGUOUS[0]] ^= 1;
        let first = code.decode(&received).unwrap();
        let second = code.decode(&received).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iteration_cap_zero_returns_received_word() {
        let code = Ldpc::new(example_h(), 0.1, 0).unwrap();
        let mut received = code.encode(&bits("111001")).unwrap();
        received[6] ^= 1;
        assert_eq!(code.decode(&received).unwrap(), received);
    }

    struct Recorder {
        iterations: Vec<usize>,
        last_estimate: Vec<u8>,
        posterior_len: usize,
    }

    impl IterationObserver for Recorder {
        fn on_iteration(&mut self, iteration: usize, estimate: &[u8], posterior: &[f64]) {
            self.iterations.push(iteration);
            self.last_estimate = estimate.to_vec();
            self.posterior_len = posterior.len();
        }
    }

    #[test]
    fn observer_sees_every_decision() {
        let code = example_code();
        let codeword = code.encode(&bits("111001")).unwrap();
        let mut received = codeword.clone();
        received[6] ^= 1;
        let mut recorder = Recorder {
            iterations: Vec::new(),
            last_estimate: Vec::new(),
            posterior_len: 0,
        };
        let decoded = code.decode_with_observer(&received, &mut recorder).unwrap();
        assert_eq!(recorder.iterations, [0, 1]);
        assert_eq!(recorder.last_estimate, decoded);
        assert_eq!(recorder.posterior_len, 12);
    }

    #[test]
    fn observer_not_called_past_convergence() {
        let code = example_code();
        let codeword = code.encode(&bits("111001")).unwrap();
        let mut recorder = Recorder {
            iterations: Vec::new(),
            last_estimate: Vec::new(),
            posterior_len: 0,
        };
        code.decode_with_observer(&codeword, &mut recorder).unwrap();
        assert_eq!(recorder.iterations, [0]);
    }

    #[test]
    fn block_round_trip() {
        let code = example_code();
        let data = bits("1110010110");
        let encoded = code.encode_blocks(&data);
        assert_eq!(encoded.len(), 24);
        let decoded = code.decode_blocks(&encoded).unwrap();
        assert_eq!(code.extract_data(&decoded, data.len()), data);
        assert_eq!(
            code.decode_blocks(&encoded[..20]).unwrap_err(),
            Error::Matrix(dense::Error::ShapeMismatch)
        );
    }

    #[test]
    fn extract_data_strips_parity() {
        let code = example_code();
        let first = code.encode(&bits("111001")).unwrap();
        let second = code.encode(&bits("010110")).unwrap();
        let mut decoded = first;
        decoded.extend_from_slice(&second);
        assert_eq!(code.extract_data(&decoded, 12), bits("111001010110"));
        assert_eq!(code.extract_data(&decoded, 8), bits("11100101"));
    }

    #[test]
    fn llr_signs() {
        let code = example_code();
        let l0 = code.channel_llr(0);
        let l1 = code.channel_llr(1);
        assert!(l0 > 0.0);
        assert!(l1 < 0.0);
        assert!((l0 + l1).abs() < 1e-12);
        assert!(l0.is_finite() && l1.is_finite());
    }

    #[test]
    fn atanh_saturates_finitely() {
        assert!(atanh(1.0).is_finite());
        assert!(atanh(-1.0).is_finite());
        assert!(atanh(0.0) == 0.0);
        assert!((atanh(0.5) - 0.5493061443340548).abs() < 1e-12);
    }

    #[test]
    fn hard_decision_favors_zero_on_ties() {
        assert_eq!(hard_decisions(&[0.0, -0.0, 1.5, -1.5]), [0, 0, 0, 1]);
    }
}
