//! 64-bit Mersenne Twister (MT19937-64).
//!
//! Period 2^19937 - 1, 312 words of state. Seeding follows the reference
//! `init_genrand64` / `init_by_array64` routines of Matsumoto and Nishimura,
//! so outputs match the published reference implementation bit for bit.

use wrapping_arithmetic::wrappit;
use crate::algorithm::AlgorithmId;
use crate::generator::{FromSeedBuffer, Generator};
use crate::seed::SeedBuffer;

/// Words in the twister array.
pub const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xb5026f5aa96619e9;
/// Most significant 33 bits.
const UM: u64 = 0xffffffff80000000;
/// Least significant 31 bits.
const LM: u64 = 0x7fffffff;

/// 64-bit Mersenne Twister.
#[derive(Clone, Eq, PartialEq)]
pub struct MersenneTwister64 {
    mt: [u64; NN],
    /// Index of the next word to temper. NN means the array is exhausted.
    mti: usize,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for MersenneTwister64 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "MersenneTwister64 {{}}")
    }
}

impl MersenneTwister64 {

    /// Seeds from a single 64-bit value (`init_genrand64`).
    pub fn new(seed: u64) -> Self {
        let mut twister = MersenneTwister64 { mt: [0; NN], mti: NN };
        twister.init_genrand(seed);
        twister
    }

    /// Seeds from an array of 64-bit words (`init_by_array64`).
    /// An empty key seeds as `[0]`.
    pub fn from_key(key: &[u64]) -> Self {
        let mut twister = MersenneTwister64 { mt: [0; NN], mti: NN };
        if key.is_empty() {
            twister.init_by_array(&[0]);
        } else {
            twister.init_by_array(key);
        }
        twister
    }

    #[wrappit]
    fn init_genrand(&mut self, seed: u64) {
        self.mt[0] = seed;
        for i in 1 .. NN {
            let prev = self.mt[i - 1];
            self.mt[i] = (prev ^ (prev >> 62)) * 6364136223846793005 + i as u64;
        }
        self.mti = NN;
    }

    #[wrappit]
    fn init_by_array(&mut self, key: &[u64]) {
        self.init_genrand(19650218);
        let mut i: usize = 1;
        let mut j: usize = 0;
        for _ in 0 .. NN.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ ((prev ^ (prev >> 62)) * 3935559000370003845)) + key[j] + j as u64;
            i += 1;
            j += 1;
            if i >= NN {
                self.mt[0] = self.mt[NN - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0 .. NN - 1 {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ ((prev ^ (prev >> 62)) * 2862933555777941757)) - i as u64;
            i += 1;
            if i >= NN {
                self.mt[0] = self.mt[NN - 1];
                i = 1;
            }
        }
        // Most significant bit is 1, assuring a non-zero initial array.
        self.mt[0] = 1u64 << 63;
    }

    /// Regenerates all NN words of the array in one pass.
    fn twist(&mut self) {
        #[inline]
        fn mix(upper: u64, lower: u64, far: u64) -> u64 {
            let x = (upper & UM) | (lower & LM);
            let mag = if x & 1 == 1 { MATRIX_A } else { 0 };
            far ^ (x >> 1) ^ mag
        }
        for i in 0 .. NN - MM {
            self.mt[i] = mix(self.mt[i], self.mt[i + 1], self.mt[i + MM]);
        }
        for i in NN - MM .. NN - 1 {
            self.mt[i] = mix(self.mt[i], self.mt[i + 1], self.mt[i + MM - NN]);
        }
        self.mt[NN - 1] = mix(self.mt[NN - 1], self.mt[0], self.mt[MM - 1]);
        self.mti = 0;
    }

    /// Generates the next 64-bit number.
    #[inline]
    pub fn next(&mut self) -> u64 {
        if self.mti >= NN {
            self.twist();
        }
        let mut x = self.mt[self.mti];
        self.mti += 1;

        // Tempering.
        x ^= (x >> 29) & 0x5555555555555555;
        x ^= (x << 17) & 0x71d67fffeda60000;
        x ^= (x << 37) & 0xfff7eee000000000;
        x ^ (x >> 43)
    }

    /// Words left before the next twist.
    #[inline]
    pub fn remaining(&self) -> usize {
        NN - self.mti
    }
}

impl FromSeedBuffer for MersenneTwister64 {
    /// Up to 8 bytes: zero-extended little-endian word through `init_genrand64`.
    /// More than 8 bytes: little-endian words (last one zero-extended) through `init_by_array64`.
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self {
        if seed.len() <= 8 {
            MersenneTwister64::new(u64::from_le_bytes(seed.truncated::<8>()))
        } else {
            MersenneTwister64::from_key(&seed.u64_words())
        }
    }
}

impl Generator for MersenneTwister64 {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::Mt64
    }
}

use super::{Error, RngCore, SeedableRng};

impl RngCore for MersenneTwister64 {
    /// High 32 bits of the next 64-bit output.
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MersenneTwister64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        MersenneTwister64::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        MersenneTwister64::new(state)
    }
}
