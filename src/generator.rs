use crate::algorithm::{AlgorithmId, OutputWidth};
use crate::seed::SeedBuffer;
use rand_core::RngCore;

/// Common contract of every PRNG backend.
///
/// Generation is total: once constructed, a generator always yields a value.
/// Instances are single-owner; they may be moved between threads but
/// concurrent use requires external synchronization.
pub trait Generator: RngCore + Send {
    /// Algorithm this instance was constructed as. Constant for its lifetime.
    fn identity(&self) -> AlgorithmId;

    /// Natural output unit of the algorithm.
    #[inline]
    fn width(&self) -> OutputWidth {
        self.identity().width()
    }

    /// Next value in the algorithm's natural width, widened to 64 bits.
    #[inline]
    fn next_value(&mut self) -> u64 {
        match self.width() {
            OutputWidth::Bits32 => u64::from(self.next_u32()),
            OutputWidth::Bits64 => self.next_u64(),
        }
    }
}

/// Deterministic construction from an arbitrary-length seed buffer.
///
/// Implementors document how buffers shorter or longer than their state
/// width are handled; construction succeeds for every length.
pub trait FromSeedBuffer: Sized {
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self;

    /// Shorthand for `from_seed_buffer(&SeedBuffer::new(bytes))`.
    fn from_seed_bytes(bytes: &[u8]) -> Self {
        Self::from_seed_buffer(&SeedBuffer::new(bytes))
    }
}
