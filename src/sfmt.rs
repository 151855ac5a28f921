//! SIMD-oriented Fast Mersenne Twister (SFMT-19937).
//!
//! The state is 156 lanes of 128 bits. One recursion step updates a whole lane
//! with lane-wide shifts and masks, and a full regeneration pass produces 624
//! 32-bit outputs at once. Lanes are plain `[u32; 4]` arrays, which the
//! compiler vectorizes on targets with 128-bit registers. Output order and
//! seeding match the reference implementation of Saito and Matsumoto.

use wrapping_arithmetic::wrappit;
use crate::algorithm::AlgorithmId;
use crate::generator::{FromSeedBuffer, Generator};
use crate::seed::SeedBuffer;

/// Number of 128-bit lanes.
pub const SFMT_N: usize = 156;
/// Number of 32-bit words in the state.
pub const SFMT_N32: usize = SFMT_N * 4;

const POS1: usize = 122;
const SL1: u32 = 18;
const SL2: u32 = 1;
const SR1: u32 = 11;
const SR2: u32 = 1;
const MSK: Lane = [0xdfffffef, 0xddfecb7f, 0xbffaffff, 0xbffffff6];
const PARITY: Lane = [0x00000001, 0x00000000, 0x00000000, 0x13c9e684];
const LAG: usize = 11;
const MID: usize = (SFMT_N32 - LAG) / 2;

/// One 128-bit lane, least significant word first.
pub type Lane = [u32; 4];

#[inline]
fn lane_to_u128(w: &Lane) -> u128 {
    w[0] as u128 | (w[1] as u128) << 32 | (w[2] as u128) << 64 | (w[3] as u128) << 96
}

#[inline]
fn u128_to_lane(x: u128) -> Lane {
    [x as u32, (x >> 32) as u32, (x >> 64) as u32, (x >> 96) as u32]
}

/// The SFMT recursion: a' = a ^ (a << 8*SL2) ^ ((b >> SR1) & MSK) ^ (c >> 8*SR2) ^ (d << SL1),
/// with 128-bit shifts on a and c and 32-bit shifts on b and d.
#[inline]
fn recursion(a: &Lane, b: &Lane, c: &Lane, d: &Lane) -> Lane {
    let x = u128_to_lane(lane_to_u128(a) << (SL2 * 8));
    let y = u128_to_lane(lane_to_u128(c) >> (SR2 * 8));
    let mut r = [0u32; 4];
    for k in 0 .. 4 {
        r[k] = a[k] ^ x[k] ^ ((b[k] >> SR1) & MSK[k]) ^ y[k] ^ (d[k] << SL1);
    }
    r
}

#[wrappit] #[inline]
fn func1(x: u32) -> u32 {
    (x ^ (x >> 27)) * 1664525
}

#[wrappit] #[inline]
fn func2(x: u32) -> u32 {
    (x ^ (x >> 27)) * 1566083941
}

/// Forces the state onto the full period by fixing one parity bit if needed.
fn period_certification(words: &mut [u32; SFMT_N32]) {
    let mut inner: u32 = 0;
    for k in 0 .. 4 {
        inner ^= words[k] & PARITY[k];
    }
    for shift in [16, 8, 4, 2, 1] {
        inner ^= inner >> shift;
    }
    if inner & 1 == 1 {
        return;
    }
    for k in 0 .. 4 {
        let mut work: u32 = 1;
        for _ in 0 .. 32 {
            if work & PARITY[k] != 0 {
                words[k] ^= work;
                return;
            }
            work <<= 1;
        }
    }
}

#[wrappit]
fn init_gen_rand(seed: u32) -> [u32; SFMT_N32] {
    let mut words = [0u32; SFMT_N32];
    words[0] = seed;
    for i in 1 .. SFMT_N32 {
        let prev = words[i - 1];
        words[i] = (prev ^ (prev >> 30)) * 1812433253 + i as u32;
    }
    period_certification(&mut words);
    words
}

#[wrappit]
fn init_by_array(key: &[u32]) -> [u32; SFMT_N32] {
    let mut words = [0x8b8b8b8bu32; SFMT_N32];
    let count: usize = (key.len() + 1).max(SFMT_N32) - 1;

    let mut r: u32 = func1(words[0] ^ words[MID] ^ words[SFMT_N32 - 1]);
    words[MID] += r;
    r += key.len() as u32;
    words[MID + LAG] += r;
    words[0] = r;

    let mut i: usize = 1;
    for j in 0 .. count {
        r = func1(words[i] ^ words[(i + MID) % SFMT_N32] ^ words[(i + SFMT_N32 - 1) % SFMT_N32]);
        words[(i + MID) % SFMT_N32] += r;
        r += i as u32;
        if j < key.len() {
            r += key[j];
        }
        words[(i + MID + LAG) % SFMT_N32] += r;
        words[i] = r;
        i = (i + 1) % SFMT_N32;
    }
    for _ in 0 .. SFMT_N32 {
        r = func2(words[i] + words[(i + MID) % SFMT_N32] + words[(i + SFMT_N32 - 1) % SFMT_N32]);
        words[(i + MID) % SFMT_N32] ^= r;
        r -= i as u32;
        words[(i + MID + LAG) % SFMT_N32] ^= r;
        words[i] = r;
        i = (i + 1) % SFMT_N32;
    }
    period_certification(&mut words);
    words
}

/// SIMD-oriented Fast Mersenne Twister. 32-bit output, 19968-bit state.
#[derive(Clone, Eq, PartialEq)]
pub struct SimdTwister {
    lanes: [Lane; SFMT_N],
    /// Index of the next 32-bit word to serve. SFMT_N32 means the block is used up.
    idx: usize,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for SimdTwister {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "SimdTwister {{}}")
    }
}

impl SimdTwister {

    fn from_words(words: &[u32; SFMT_N32]) -> Self {
        let mut lanes = [[0u32; 4]; SFMT_N];
        for (lane, chunk) in lanes.iter_mut().zip(words.chunks_exact(4)) {
            lane.copy_from_slice(chunk);
        }
        SimdTwister { lanes, idx: SFMT_N32 }
    }

    /// Seeds from a single 32-bit value (`init_gen_rand`).
    pub fn new(seed: u32) -> Self {
        SimdTwister::from_words(&init_gen_rand(seed))
    }

    /// Seeds from an array of 32-bit words (`init_by_array`).
    pub fn from_key(key: &[u32]) -> Self {
        SimdTwister::from_words(&init_by_array(key))
    }

    /// Regenerates every lane in one pass.
    fn generate_all(&mut self) {
        let mut r1 = self.lanes[SFMT_N - 2];
        let mut r2 = self.lanes[SFMT_N - 1];
        for i in 0 .. SFMT_N {
            let b = if i < SFMT_N - POS1 { self.lanes[i + POS1] } else { self.lanes[i + POS1 - SFMT_N] };
            let v = recursion(&self.lanes[i], &b, &r1, &r2);
            self.lanes[i] = v;
            r1 = r2;
            r2 = v;
        }
        self.idx = 0;
    }

    /// Generates the next 32-bit number.
    #[inline]
    pub fn next(&mut self) -> u32 {
        if self.idx >= SFMT_N32 {
            self.generate_all();
        }
        let x = self.lanes[self.idx / 4][self.idx % 4];
        self.idx += 1;
        x
    }

    /// Words left in the current block.
    #[inline]
    pub fn remaining(&self) -> usize {
        SFMT_N32 - self.idx
    }
}

impl FromSeedBuffer for SimdTwister {
    /// Up to 4 bytes: zero-extended little-endian word through `init_gen_rand`.
    /// More than 4 bytes: little-endian words (last one zero-extended) through `init_by_array`.
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self {
        if seed.len() <= 4 {
            SimdTwister::new(u32::from_le_bytes(seed.truncated::<4>()))
        } else {
            SimdTwister::from_key(&seed.u32_words())
        }
    }
}

impl Generator for SimdTwister {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::Sfmt
    }
}

use super::{impls, Error, RngCore, SeedableRng};

impl RngCore for SimdTwister {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    /// Two consecutive words, the first one low. From an even position this is
    /// the reference 64-bit output.
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

impl SeedableRng for SimdTwister {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        SimdTwister::new(u32::from_le_bytes(seed))
    }
}
