//! Generator configuration loaded from TOML.
//!
//! ```toml
//! algorithm = "MT64"
//! seed = 5489            # or seed = "0x0123_4567_89ab_cdef"
//! ```

use serde::Deserialize;
use std::path::Path;
use crate::algorithm::AlgorithmId;
use crate::error::{PrngError, Result};
use crate::factory::{Prng, RandomFactory};
use crate::randlib::RandLibrary;
use crate::seed::parse_hex_seed;

/// Seed as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeedSource {
    /// Integer seed, expanded to 8 little-endian bytes.
    Integer(u64),
    /// Hex digits, decoded with [`parse_hex_seed`].
    Hex(String),
}

impl SeedSource {
    /// Raw seed bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            SeedSource::Integer(x) => Ok(x.to_le_bytes().to_vec()),
            SeedSource::Hex(text) => parse_hex_seed(text),
        }
    }
}

/// Which generator to build, and how to seed it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    pub algorithm: AlgorithmId,

    /// Missing seed means the empty seed buffer.
    #[serde(default)]
    pub seed: Option<SeedSource>,
}

impl GeneratorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PrngError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PrngError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Seed bytes, empty if no seed was given.
    pub fn seed_bytes(&self) -> Result<Vec<u8>> {
        match &self.seed {
            Some(seed) => seed.to_bytes(),
            None => Ok(Vec::new()),
        }
    }

    /// Builds the configured generator with the default factory.
    pub fn build(&self) -> Result<Prng> {
        self.build_with(&RandomFactory::new())
    }

    pub fn build_with<L: RandLibrary>(&self, factory: &RandomFactory<L>) -> Result<Prng> {
        factory.create_prng(self.algorithm, &self.seed_bytes()?)
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use crate::generator::Generator;
    use crate::RngCore;

    #[test] pub fn integer_seed() {
        let config = GeneratorConfig::from_toml_str("algorithm = \"MT64\"\nseed = 5489\n").unwrap();
        assert_eq!(AlgorithmId::Mt64, config.algorithm);
        assert_eq!(Some(SeedSource::Integer(5489)), config.seed);
        let mut prng = config.build().unwrap();
        assert_eq!(14514284786278117030, prng.next_u64());
    }

    #[test] pub fn hex_seed() {
        let config = GeneratorConfig::from_toml_str("algorithm = \"AESCTR\"\nseed = \"0x000102030405060708090a0b0c0d0e0f\"\n").unwrap();
        assert_eq!(16, config.seed_bytes().unwrap().len());
        let mut prng = config.build().unwrap();
        assert_eq!(AlgorithmId::AesCtr, prng.identity());
        assert_eq!(0x373ba1c6, prng.next_u32());
    }

    #[test] pub fn missing_seed_is_empty() {
        let config = GeneratorConfig::from_toml_str("algorithm = \"EMODLCG\"").unwrap();
        assert_eq!(None, config.seed);
        let mut prng = config.build().unwrap();
        assert_eq!(1, prng.next_u32());
    }

    #[test] pub fn rejects_bad_input() {
        for text in [
            "algorithm = \"XORSHIFT\"",
            "seed = 1",
            "algorithm = \"MT64\"\nseed = [",
        ] {
            assert!(matches!(GeneratorConfig::from_toml_str(text), Err(PrngError::Config(_))));
        }
        let config = GeneratorConfig::from_toml_str("algorithm = \"SFMT\"\nseed = \"abc\"").unwrap();
        assert!(matches!(config.build(), Err(PrngError::MalformedSeed { .. })));
    }
}
