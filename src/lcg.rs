use wrapping_arithmetic::wrappit;
use crate::algorithm::AlgorithmId;
use crate::generator::{FromSeedBuffer, Generator};
use crate::seed::SeedBuffer;

// The modular LCG: a 32-bit register advanced by state <- state * a + c (mod 2**32).
// Marsaglia's multiplier 69069 with increment 1 meets the Hull-Dobell conditions
// (c odd, a - 1 divisible by 4), so every seed lies on the single 2**32 cycle.

/// LCG multiplier.
pub const LCG_MULTIPLIER: u32 = 69069;
/// LCG increment.
pub const LCG_INCREMENT: u32 = 1;

/// LCG iteration is state <- state * m + p.
/// Returns the (m, p) pair that iterates by n steps at once.
/// Assumes (m, p) is full period.
#[wrappit]
pub fn get_jump(m: u32, p: u32, n: u32) -> (u32, u32) {
    // Algorithm from Brown, F. B., "Random Number Generation with Arbitrary Stride",
    // Transactions of the American Nuclear Society, 1994.
    let mut unit_m = m;
    let mut unit_p = p;
    let mut jump_m: u32 = 1;
    let mut jump_p: u32 = 0;
    let mut delta = n;

    while delta > 0 {
        if delta & 1 == 1 {
            jump_m = jump_m * unit_m;
            jump_p = jump_p * unit_m + unit_p;
        }
        unit_p = (unit_m + 1) * unit_p;
        unit_m *= unit_m;
        delta >>= 1;
    }
    (jump_m, jump_p)
}

/// LCG iteration is state <- state * m + p.
/// Returns the number of iterations between origin state and the given state.
/// Assumes (m, p) is full period.
#[wrappit]
pub fn get_iterations(m: u32, p: u32, origin: u32, state: u32) -> u32 {
    let mut jump_m = m;
    let mut jump_p = p;
    let mut ordinal: u32 = 0;
    let mut bit: u32 = 1;
    let mut address = origin;

    while address != state {
        if (bit & address) != (bit & state) {
            address = address * jump_m + jump_p;
            ordinal = ordinal + bit;
        }
        jump_p = (jump_m + 1) * jump_p;
        jump_m *= jump_m;
        bit <<= 1;
    }
    ordinal
}

/// LCG iteration is state <- state * m + p.
/// Returns state after the specified number of iterations from the origin state.
#[wrappit]
pub fn get_state(m: u32, p: u32, origin: u32, iterations: u32) -> u32 {
    let mut jump_m = m;
    let mut jump_p = p;
    let mut state = origin;
    let mut ordinal = iterations;

    while ordinal > 0 {
        if ordinal & 1 == 1 {
            state = state * jump_m + jump_p;
        }
        jump_p = (jump_m + 1) * jump_p;
        jump_m *= jump_m;
        ordinal >>= 1;
    }
    state
}

/// Modular linear congruential generator. 32-bit output, 32-bit state.
#[derive(Clone, Eq, PartialEq)]
pub struct LinearCongruential {
    /// LCG register.
    state: u32,
    /// Register value at position 0.
    origin: u32,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for LinearCongruential {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "LinearCongruential {{}}")
    }
}

impl LinearCongruential {

    /// Creates a generator whose register starts at `seed`.
    pub fn new(seed: u32) -> Self {
        LinearCongruential { state: seed, origin: seed }
    }

    /// Advances to the next state.
    #[wrappit] #[inline]
    fn step(&mut self) {
        self.state = self.state * LCG_MULTIPLIER + LCG_INCREMENT;
    }

    /// Generates the next 32-bit number, which is the advanced register.
    #[inline]
    pub fn next(&mut self) -> u32 {
        self.step();
        self.state
    }

    /// Jumps forward (if steps > 0) or backward (if steps < 0).
    /// The cycle has length 2**32, so steps are taken modulo 2**32.
    pub fn jump(&mut self, steps: i64) {
        self.state = get_state(LCG_MULTIPLIER, LCG_INCREMENT, self.state, steps as u32);
    }

    /// Number of values generated since seeding, modulo 2**32.
    pub fn position(&self) -> u32 {
        get_iterations(LCG_MULTIPLIER, LCG_INCREMENT, self.origin, self.state)
    }

    /// Sets position relative to the seeded register.
    pub fn set_position(&mut self, position: u32) {
        self.state = get_state(LCG_MULTIPLIER, LCG_INCREMENT, self.origin, position);
    }

    /// Returns to the seeded register. Equivalent to set_position(0).
    #[inline]
    pub fn reset(&mut self) {
        self.state = self.origin;
    }
}

impl FromSeedBuffer for LinearCongruential {
    /// The first 4 bytes (little-endian) become the register.
    /// Shorter buffers are zero-padded, longer ones truncated.
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self {
        LinearCongruential::new(u32::from_le_bytes(seed.truncated::<4>()))
    }
}

impl Generator for LinearCongruential {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::EmodLcg
    }
}

use super::{impls, Error, RngCore, SeedableRng};

impl RngCore for LinearCongruential {
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

impl SeedableRng for LinearCongruential {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        LinearCongruential::new(u32::from_le_bytes(seed))
    }
}
