use crate::error::{PrngError, UnknownIdentifier};
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

/// Natural output unit of an algorithm.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OutputWidth {
    Bits32,
    Bits64,
}

impl OutputWidth {
    /// Number of bytes in one output value.
    pub fn bytes(self) -> usize {
        match self {
            OutputWidth::Bits32 => 4,
            OutputWidth::Bits64 => 8,
        }
    }
}

/// Names exactly one PRNG algorithm. Codes match the external enumeration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum AlgorithmId {
    /// Modular linear congruential generator.
    #[cfg_attr(feature = "serde", serde(rename = "EMODLCG"))]
    EmodLcg = 0,
    /// Modular pseudo-DES.
    #[cfg_attr(feature = "serde", serde(rename = "EMODPDES"))]
    EmodPdes = 1,
    /// 64-bit Mersenne Twister.
    #[cfg_attr(feature = "serde", serde(rename = "MT64"))]
    Mt64 = 2,
    /// SIMD-oriented fast Mersenne Twister.
    #[cfg_attr(feature = "serde", serde(rename = "SFMT"))]
    Sfmt = 3,
    /// AES counter-mode stream.
    #[cfg_attr(feature = "serde", serde(rename = "AESCTR"))]
    AesCtr = 4,
    /// Reference library adapter.
    #[cfg_attr(feature = "serde", serde(rename = "RANDLIB"))]
    RandLib = 5,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 6] = [
        AlgorithmId::EmodLcg,
        AlgorithmId::EmodPdes,
        AlgorithmId::Mt64,
        AlgorithmId::Sfmt,
        AlgorithmId::AesCtr,
        AlgorithmId::RandLib,
    ];

    /// External name, as used on command lines and in configuration.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::EmodLcg => "EMODLCG",
            AlgorithmId::EmodPdes => "EMODPDES",
            AlgorithmId::Mt64 => "MT64",
            AlgorithmId::Sfmt => "SFMT",
            AlgorithmId::AesCtr => "AESCTR",
            AlgorithmId::RandLib => "RANDLIB",
        }
    }

    /// Numeric code in the external enumeration.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Natural output width of the algorithm.
    pub fn width(self) -> OutputWidth {
        match self {
            AlgorithmId::Mt64 => OutputWidth::Bits64,
            _ => OutputWidth::Bits32,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for AlgorithmId {
    type Error = PrngError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        AlgorithmId::ALL
            .iter()
            .copied()
            .find(|id| id.code() == code)
            .ok_or(PrngError::InvalidAlgorithm(UnknownIdentifier::Code(code)))
    }
}

impl FromStr for AlgorithmId {
    type Err = PrngError;

    /// Accepts external names case-insensitively, with or without a `PRNG_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("PRNG_").unwrap_or(&upper);
        AlgorithmId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == bare)
            .ok_or_else(|| PrngError::InvalidAlgorithm(UnknownIdentifier::Name(trimmed.to_string())))
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn codes_round_trip() {
        for id in AlgorithmId::ALL {
            assert_eq!(Ok(id), AlgorithmId::try_from(id.code()));
        }
        assert_eq!(
            Err(PrngError::InvalidAlgorithm(UnknownIdentifier::Code(6))),
            AlgorithmId::try_from(6)
        );
        assert!(AlgorithmId::try_from(u32::MAX).is_err());
    }

    #[test] pub fn names_parse() {
        assert_eq!(Ok(AlgorithmId::Mt64), "MT64".parse());
        assert_eq!(Ok(AlgorithmId::Sfmt), "sfmt".parse());
        assert_eq!(Ok(AlgorithmId::AesCtr), "PRNG_AESCTR".parse());
        assert_eq!(Ok(AlgorithmId::EmodPdes), " prng_emodpdes ".parse());
        assert_eq!(
            Err(PrngError::InvalidAlgorithm(UnknownIdentifier::Name("MT19937".into()))),
            "MT19937".parse::<AlgorithmId>()
        );
        for id in AlgorithmId::ALL {
            assert_eq!(Ok(id), id.to_string().parse());
        }
    }

    #[test] pub fn widths() {
        assert_eq!(OutputWidth::Bits64, AlgorithmId::Mt64.width());
        assert_eq!(OutputWidth::Bits32, AlgorithmId::Sfmt.width());
        assert_eq!(8, AlgorithmId::Mt64.width().bytes());
        assert_eq!(4, AlgorithmId::EmodLcg.width().bytes());
    }
}
