//! Swappable pseudo-random number generator engines.
//!
//! Six algorithms sit behind one [`Generator`] contract: a 32-bit linear
//! congruential generator, a pseudo-DES counter hash, the 64-bit Mersenne
//! Twister, SFMT-19937, AES-128 in counter mode, and an adapter over an
//! external reference library. [`RandomFactory`] maps an [`AlgorithmId`] and
//! an arbitrary-length seed buffer to a seeded instance.
//!
//! ```
//! use prng_engines::*;
//!
//! let mut rng = create_prng(AlgorithmId::Mt64, &5489u64.to_le_bytes()).unwrap();
//! assert_eq!(rng.next_u64(), 14514284786278117030);
//! ```

pub mod aes_counter;
pub mod algorithm;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod lcg;
pub mod mt64;
pub mod pseudo_des;
pub mod randlib;
pub mod seed;
pub mod sfmt;

pub use aes_counter::AesCounter;
pub use algorithm::{AlgorithmId, OutputWidth};
#[cfg(feature = "serde")]
pub use config::{GeneratorConfig, SeedSource};
pub use error::{PrngError, UnknownIdentifier};
pub use factory::{create_prng, Prng, RandomFactory};
pub use generator::{FromSeedBuffer, Generator};
pub use lcg::LinearCongruential;
pub use mt64::MersenneTwister64;
pub use pseudo_des::PseudoDes;
pub use randlib::{ChaChaLibrary, LibraryHandle, RandLib, RandLibrary};
pub use rand_core::*;
pub use seed::{parse_hex_seed, SeedBuffer};
pub use sfmt::SimdTwister;
