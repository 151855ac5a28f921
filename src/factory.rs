use crate::aes_counter::AesCounter;
use crate::algorithm::AlgorithmId;
use crate::error::Result;
use crate::generator::{FromSeedBuffer, Generator};
use crate::lcg::LinearCongruential;
use crate::mt64::MersenneTwister64;
use crate::pseudo_des::PseudoDes;
use crate::randlib::{ChaChaLibrary, RandLib, RandLibrary};
use crate::seed::SeedBuffer;
use crate::sfmt::SimdTwister;

/// A constructed generator of any supported algorithm.
/// The twister variants are boxed to keep the enum small.
#[derive(Debug)]
pub enum Prng {
    LinearCongruential(LinearCongruential),
    PseudoDes(PseudoDes),
    MersenneTwister64(Box<MersenneTwister64>),
    SimdTwister(Box<SimdTwister>),
    AesCounter(AesCounter),
    RandLib(RandLib),
}

macro_rules! dispatch {
    ($self:expr, $rng:ident => $body:expr) => {
        match $self {
            Prng::LinearCongruential($rng) => $body,
            Prng::PseudoDes($rng) => $body,
            Prng::MersenneTwister64($rng) => $body,
            Prng::SimdTwister($rng) => $body,
            Prng::AesCounter($rng) => $body,
            Prng::RandLib($rng) => $body,
        }
    };
}

impl Generator for Prng {
    fn identity(&self) -> AlgorithmId {
        dispatch!(self, rng => rng.identity())
    }
}

use super::{Error, RngCore};

impl RngCore for Prng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        dispatch!(self, rng => rng.next_u32())
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        dispatch!(self, rng => rng.next_u64())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dispatch!(self, rng => rng.fill_bytes(dest))
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Error> {
        dispatch!(self, rng => rng.try_fill_bytes(dest))
    }
}

/// Maps algorithm identifiers to freshly seeded generators.
///
/// The factory holds no state besides the library binding used for
/// [`AlgorithmId::RandLib`]; every call builds an independent instance.
#[derive(Clone, Debug, Default)]
pub struct RandomFactory<L = ChaChaLibrary> {
    library: L,
}

impl RandomFactory {
    /// Factory using the default reference library.
    pub fn new() -> Self {
        RandomFactory { library: ChaChaLibrary }
    }
}

impl<L: RandLibrary> RandomFactory<L> {

    /// Factory whose RANDLIB generators come from `library`.
    pub fn with_library(library: L) -> Self {
        RandomFactory { library }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Constructs and seeds a generator.
    pub fn create_prng(&self, algorithm: AlgorithmId, seed: &[u8]) -> Result<Prng> {
        self.create_from_buffer(algorithm, &SeedBuffer::new(seed))
    }

    /// Like `create_prng`, for a numeric identifier from the external enumeration.
    /// Unknown codes fail with `InvalidAlgorithm`.
    pub fn create_prng_from_code(&self, code: u32, seed: &[u8]) -> Result<Prng> {
        self.create_prng(AlgorithmId::try_from(code)?, seed)
    }

    /// Entry point for foreign callers holding a seed (address, length) pair,
    /// where `None` is a null address. Both the identifier and the pair are
    /// validated before any backend is touched.
    pub fn create_prng_raw(&self, code: u32, seed: Option<&[u8]>, seed_len: usize) -> Result<Prng> {
        let algorithm = AlgorithmId::try_from(code)?;
        let seed = SeedBuffer::from_parts(seed, seed_len)?;
        self.create_from_buffer(algorithm, &seed)
    }

    pub fn create_from_buffer(&self, algorithm: AlgorithmId, seed: &SeedBuffer<'_>) -> Result<Prng> {
        let prng = match algorithm {
            AlgorithmId::EmodLcg => Prng::LinearCongruential(LinearCongruential::from_seed_buffer(seed)),
            AlgorithmId::EmodPdes => Prng::PseudoDes(PseudoDes::from_seed_buffer(seed)),
            AlgorithmId::Mt64 => Prng::MersenneTwister64(Box::new(MersenneTwister64::from_seed_buffer(seed))),
            AlgorithmId::Sfmt => Prng::SimdTwister(Box::new(SimdTwister::from_seed_buffer(seed))),
            AlgorithmId::AesCtr => Prng::AesCounter(AesCounter::from_seed_buffer(seed)),
            AlgorithmId::RandLib => Prng::RandLib(RandLib::with_library(&self.library, seed)?),
        };
        tracing::debug!(algorithm = %algorithm, seed_len = seed.len(), "constructed generator");
        Ok(prng)
    }
}

/// Constructs and seeds a generator with the default factory.
pub fn create_prng(algorithm: AlgorithmId, seed: &[u8]) -> Result<Prng> {
    RandomFactory::new().create_prng(algorithm, seed)
}

#[cfg(test)] mod tests {
    use super::*;
    use crate::error::{PrngError, UnknownIdentifier};

    #[test] pub fn dispatch_matches_backends() {
        let seed = [3u8, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3];
        let factory = RandomFactory::new();

        let mut a = factory.create_prng(AlgorithmId::EmodLcg, &seed).unwrap();
        let mut b = LinearCongruential::from_seed_bytes(&seed);
        assert_eq!(b.next_u32(), a.next_u32());

        let mut a = factory.create_prng(AlgorithmId::EmodPdes, &seed).unwrap();
        let mut b = PseudoDes::from_seed_bytes(&seed);
        assert_eq!(b.next_u32(), a.next_u32());

        let mut a = factory.create_prng(AlgorithmId::Mt64, &seed).unwrap();
        let mut b = MersenneTwister64::from_seed_bytes(&seed);
        assert_eq!(b.next_u64(), a.next_u64());

        let mut a = factory.create_prng(AlgorithmId::Sfmt, &seed).unwrap();
        let mut b = SimdTwister::from_seed_bytes(&seed);
        assert_eq!(b.next_u32(), a.next_u32());

        let mut a = factory.create_prng(AlgorithmId::AesCtr, &seed).unwrap();
        let mut b = AesCounter::from_seed_bytes(&seed);
        assert_eq!(b.next_u32(), a.next_u32());

        let mut a = factory.create_prng(AlgorithmId::RandLib, &seed).unwrap();
        let mut b = RandLib::new(&SeedBuffer::new(&seed)).unwrap();
        assert_eq!(b.next_u32(), a.next_u32());
    }

    #[test] pub fn identity_and_width() {
        for id in AlgorithmId::ALL {
            let mut prng = create_prng(id, &[1, 2, 3]).unwrap();
            assert_eq!(id, prng.identity());
            assert_eq!(id.width(), prng.width());
            prng.next_value();
            assert_eq!(id, prng.identity());
        }
    }

    #[test] pub fn natural_width_values() {
        let mut mt = create_prng(AlgorithmId::Mt64, &5489u64.to_le_bytes()).unwrap();
        assert_eq!(14514284786278117030, mt.next_value());
        let mut lcg = create_prng(AlgorithmId::EmodLcg, &[]).unwrap();
        assert_eq!(1, lcg.next_value());
        assert_eq!(69070, lcg.next_value());
    }

    #[test] pub fn unknown_codes_rejected() {
        let factory = RandomFactory::new();
        for code in [6u32, 7, 100, u32::MAX] {
            assert_eq!(
                PrngError::InvalidAlgorithm(UnknownIdentifier::Code(code)),
                factory.create_prng_from_code(code, &[1, 2, 3]).unwrap_err()
            );
        }
        for id in AlgorithmId::ALL {
            assert_eq!(id, factory.create_prng_from_code(id.code(), &[]).unwrap().identity());
        }
    }

    #[test] pub fn raw_entry_point() {
        let factory = RandomFactory::new();
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut a = factory.create_prng_raw(2, Some(&bytes[..]), 8).unwrap();
        let mut b = factory.create_prng(AlgorithmId::Mt64, &bytes).unwrap();
        assert_eq!(b.next_u64(), a.next_u64());
        assert!(factory.create_prng_raw(0, None, 0).is_ok());
        assert!(matches!(factory.create_prng_raw(0, None, 4), Err(PrngError::SeedContractViolation(_))));
        assert!(matches!(factory.create_prng_raw(0, Some(&bytes[..]), 0), Err(PrngError::SeedContractViolation(_))));
        // The identifier is checked first.
        assert!(matches!(factory.create_prng_raw(9, None, 4), Err(PrngError::InvalidAlgorithm(_))));
    }
}
