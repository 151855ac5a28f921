use wrapping_arithmetic::wrappit;
use crate::algorithm::AlgorithmId;
use crate::generator::{FromSeedBuffer, Generator};
use crate::seed::SeedBuffer;

// Pseudo-DES hashes a 64-bit (key, counter) block with four Feistel-like rounds
// of a nonlinear mixing function (Press et al., Numerical Recipes, psdes).
// Each round XORs the right word with a round constant, squares its halves,
// swaps the halves of the result and folds it into the left word.

/// Number of rounds applied per block.
pub const PSDES_ROUNDS: usize = 4;

const C1: [u32; PSDES_ROUNDS] = [0xbaa96887, 0x1e17d32c, 0x03bcdc3c, 0x0f33d1b2];
const C2: [u32; PSDES_ROUNDS] = [0x4b0f3b58, 0xe874f0c3, 0x6955c5a6, 0x55a7ca46];

/// Applies the pseudo-DES block transform to (left, right) in place.
#[wrappit]
pub fn psdes(left: &mut u32, right: &mut u32) {
    for round in 0 .. PSDES_ROUNDS {
        let swap = *right;
        let ia = *right ^ C1[round];
        let low = ia & 0xffff;
        let high = ia >> 16;
        let ib = low * low + !(high * high);
        *right = *left ^ (((ib >> 16) | (ib << 16)) ^ C2[round]) + low * high;
        *left = swap;
    }
}

/// Modular pseudo-DES generator. 32-bit output, 64-bit state.
#[derive(Clone, Eq, PartialEq)]
pub struct PseudoDes {
    /// Left block word, fixed for the lifetime of the generator.
    key: u32,
    /// Round counter, the right block word.
    counter: u32,
    /// Counter value at position 0.
    origin: u32,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for PseudoDes {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "PseudoDes {{}}")
    }
}

impl PseudoDes {

    /// Creates a generator from a raw (key, counter) seed pair.
    /// The pair is passed through the block transform once, so that
    /// nearby or low-entropy seeds do not show up in the first outputs.
    pub fn new(key: u32, counter: u32) -> Self {
        let mut key = key;
        let mut counter = counter;
        psdes(&mut key, &mut counter);
        PseudoDes { key, counter, origin: counter }
    }

    /// Generates the next 32-bit number.
    #[inline]
    pub fn next(&mut self) -> u32 {
        self.counter = self.counter.wrapping_add(1);
        let mut left = self.key;
        let mut right = self.counter;
        psdes(&mut left, &mut right);
        right
    }

    /// Skips `n` outputs in constant time.
    #[inline]
    pub fn skip(&mut self, n: u32) {
        self.counter = self.counter.wrapping_add(n);
    }

    /// Number of values generated since seeding, modulo 2**32.
    #[inline]
    pub fn position(&self) -> u32 {
        self.counter.wrapping_sub(self.origin)
    }
}

impl FromSeedBuffer for PseudoDes {
    /// Bytes 0..4 are the key word and bytes 4..8 the counter word, little-endian.
    /// Shorter buffers are zero-padded, longer ones truncated to the 64-bit block.
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self {
        PseudoDes::from_seed(seed.truncated::<8>())
    }
}

impl Generator for PseudoDes {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::EmodPdes
    }
}

use super::{impls, Error, RngCore, SeedableRng};

impl RngCore for PseudoDes {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PseudoDes {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        let key = u32::from_le_bytes([seed[0], seed[1], seed[2], seed[3]]);
        let counter = u32::from_le_bytes([seed[4], seed[5], seed[6], seed[7]]);
        PseudoDes::new(key, counter)
    }
}
