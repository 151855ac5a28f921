//! AES-128 in counter mode as a random number generator.
//!
//! The keystream is AES-128(key, counter), counter a 128-bit big-endian block
//! incremented by one per block and wrapping at 2^128. Each ciphertext block
//! is served as four little-endian 32-bit words, so `fill_bytes` reproduces
//! the raw keystream exactly.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use rand_core::block::{BlockRng, BlockRngCore};
use crate::algorithm::AlgorithmId;
use crate::generator::{FromSeedBuffer, Generator};
use crate::seed::SeedBuffer;

/// Key width in bytes.
pub const KEY_BYTES: usize = 16;
/// Key plus initial counter block, in bytes.
pub const SEED_BYTES: usize = 32;

/// Block producer behind [`AesCounter`]: one cipher invocation per block.
#[derive(Clone)]
pub struct AesCounterCore {
    cipher: Aes128,
    /// Next counter block to encrypt.
    counter: u128,
}

impl BlockRngCore for AesCounterCore {
    type Item = u32;
    type Results = [u32; 4];

    fn generate(&mut self, results: &mut Self::Results) {
        let mut block = GenericArray::from(self.counter.to_be_bytes());
        self.cipher.encrypt_block(&mut block);
        for (word, chunk) in results.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        self.counter = self.counter.wrapping_add(1);
    }
}

/// AES-128 counter-mode generator. 32-bit output, 128-bit key, 128-bit counter.
#[derive(Clone)]
pub struct AesCounter {
    rng: BlockRng<AesCounterCore>,
}

// This Debug implementation does not expose key material.
impl core::fmt::Debug for AesCounter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "AesCounter {{}}")
    }
}

impl AesCounter {

    /// Creates a generator from a 128-bit key and an initial counter block.
    pub fn new(key: [u8; KEY_BYTES], counter: u128) -> Self {
        let cipher = Aes128::new(&GenericArray::from(key));
        AesCounter { rng: BlockRng::new(AesCounterCore { cipher, counter }) }
    }

    /// Counter value that the next cipher invocation will encrypt.
    #[inline]
    pub fn counter(&self) -> u128 {
        self.rng.core.counter
    }

    /// Words left in the current keystream block.
    #[inline]
    pub fn remaining(&self) -> usize {
        4 - self.rng.index()
    }
}

impl FromSeedBuffer for AesCounter {
    /// Bytes 0..16 are the key, zero-padded if short.
    /// Bytes 16..32, when present, are the big-endian initial counter block
    /// (zero-padded); otherwise the counter starts at zero.
    /// Bytes past 32 are XORed cyclically into the key.
    fn from_seed_buffer(seed: &SeedBuffer<'_>) -> Self {
        let bytes = seed.as_bytes();
        let mut key = [0u8; KEY_BYTES];
        let mut counter = [0u8; 16];
        SeedBuffer::new(&bytes[.. bytes.len().min(KEY_BYTES)]).truncate_into(&mut key);
        if bytes.len() > KEY_BYTES {
            SeedBuffer::new(&bytes[KEY_BYTES .. bytes.len().min(SEED_BYTES)]).truncate_into(&mut counter);
        }
        if bytes.len() > SEED_BYTES {
            let excess: [u8; KEY_BYTES] = SeedBuffer::new(&bytes[SEED_BYTES ..]).folded();
            for (k, e) in key.iter_mut().zip(excess.iter()) {
                *k ^= e;
            }
        }
        AesCounter::new(key, u128::from_be_bytes(counter))
    }
}

impl Generator for AesCounter {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::AesCtr
    }
}

use super::{CryptoRng, Error, RngCore, SeedableRng};

impl RngCore for AesCounter {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl CryptoRng for AesCounter {}

impl SeedableRng for AesCounter {
    type Seed = [u8; SEED_BYTES];

    fn from_seed(seed: Self::Seed) -> Self {
        AesCounter::from_seed_bytes(&seed)
    }
}
