//! Seed buffer normalization.
//!
//! Backends never index caller memory directly. They go through one of the
//! width policies below, each of which is total for any buffer length.

use crate::error::{PrngError, Result};

/// Borrowed view over the caller's seed bytes.
/// Backends copy what they need during construction and never retain the view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SeedBuffer<'a> {
    bytes: &'a [u8],
}

impl<'a> SeedBuffer<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        SeedBuffer { bytes }
    }

    /// Validates a foreign (address, length) pair.
    /// `None` stands for a null address.
    pub fn from_parts(bytes: Option<&'a [u8]>, declared_len: usize) -> Result<Self> {
        match bytes {
            None if declared_len != 0 => {
                Err(PrngError::SeedContractViolation("null seed address with nonzero length"))
            }
            None => Ok(SeedBuffer { bytes: &[] }),
            Some(bytes) if declared_len == 0 && !bytes.is_empty() => {
                Err(PrngError::SeedContractViolation("seed address supplied with zero length"))
            }
            Some(bytes) if declared_len > bytes.len() => {
                Err(PrngError::SeedContractViolation("declared seed length exceeds supplied bytes"))
            }
            Some(bytes) => Ok(SeedBuffer { bytes: &bytes[.. declared_len] }),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copies the leading bytes into `dst` and zero-pads the rest.
    /// Bytes past `dst.len()` are dropped.
    pub fn truncate_into(&self, dst: &mut [u8]) {
        let n = dst.len().min(self.bytes.len());
        dst[.. n].copy_from_slice(&self.bytes[.. n]);
        dst[n ..].fill(0);
    }

    /// Like `truncate_into`, but bytes past `dst.len()` are XORed back into
    /// `dst` cyclically, so every seed byte influences the result.
    pub fn fold_into(&self, dst: &mut [u8]) {
        dst.fill(0);
        if dst.is_empty() {
            return;
        }
        for (i, &b) in self.bytes.iter().enumerate() {
            dst[i % dst.len()] ^= b;
        }
    }

    /// Fixed-width window with the truncate policy.
    pub fn truncated<const N: usize>(&self) -> [u8; N] {
        let mut out = [0u8; N];
        self.truncate_into(&mut out);
        out
    }

    /// Fixed-width window with the fold policy.
    pub fn folded<const N: usize>(&self) -> [u8; N] {
        let mut out = [0u8; N];
        self.fold_into(&mut out);
        out
    }

    /// Little-endian 32-bit words; a trailing partial word is zero-extended.
    pub fn u32_words(&self) -> Vec<u32> {
        self.bytes
            .chunks(4)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[.. chunk.len()].copy_from_slice(chunk);
                u32::from_le_bytes(word)
            })
            .collect()
    }

    /// Little-endian 64-bit words; a trailing partial word is zero-extended.
    pub fn u64_words(&self) -> Vec<u64> {
        self.bytes
            .chunks(8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word[.. chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .collect()
    }
}

impl<'a> From<&'a [u8]> for SeedBuffer<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SeedBuffer::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SeedBuffer<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        SeedBuffer::new(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for SeedBuffer<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        SeedBuffer::new(bytes)
    }
}

/// Decodes a textual hex seed. An optional `0x` prefix is allowed and
/// whitespace or `_` separators are ignored. Byte order follows the text.
pub fn parse_hex_seed(text: &str) -> Result<Vec<u8>> {
    let malformed = |reason| PrngError::MalformedSeed { text: text.to_string(), reason };
    let body = text.trim();
    let body = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")).unwrap_or(body);
    let digits = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or_else(|| malformed("non-hex character")))
        .collect::<Result<Vec<u8>>>()?;
    if digits.len() % 2 != 0 {
        return Err(malformed("odd number of hex digits"));
    }
    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn from_parts_contract() {
        let bytes = [1u8, 2, 3];
        assert_eq!(Ok(SeedBuffer::new(&bytes)), SeedBuffer::from_parts(Some(&bytes[..]), 3));
        assert_eq!(Ok(SeedBuffer::new(&bytes[.. 2])), SeedBuffer::from_parts(Some(&bytes[..]), 2));
        assert_eq!(Ok(SeedBuffer::default()), SeedBuffer::from_parts(None, 0));
        assert_eq!(Ok(SeedBuffer::default()), SeedBuffer::from_parts(Some(&[][..]), 0));
        assert!(matches!(SeedBuffer::from_parts(None, 4), Err(PrngError::SeedContractViolation(_))));
        assert!(matches!(SeedBuffer::from_parts(Some(&bytes[..]), 0), Err(PrngError::SeedContractViolation(_))));
        assert!(matches!(SeedBuffer::from_parts(Some(&bytes[..]), 4), Err(PrngError::SeedContractViolation(_))));
    }

    #[test] pub fn truncate_pads_and_drops() {
        let seed = SeedBuffer::new(&[1, 2, 3]);
        assert_eq!([1, 2, 3, 0, 0], seed.truncated::<5>());
        assert_eq!([1, 2], seed.truncated::<2>());
        assert_eq!([0u8; 4], SeedBuffer::default().truncated::<4>());
    }

    #[test] pub fn fold_consumes_every_byte() {
        let seed = SeedBuffer::new(&[1, 2, 3, 4, 0x10, 0x20]);
        assert_eq!([0x11, 0x22, 3, 4], seed.folded::<4>());
        assert_eq!([1, 2, 3, 4, 0x10, 0x20, 0, 0], seed.folded::<8>());
        // A byte past the window changes the result.
        let other = SeedBuffer::new(&[1, 2, 3, 4, 0x10, 0x21]);
        assert_ne!(seed.folded::<4>(), other.folded::<4>());
        assert_eq!([0u8; 0], seed.folded::<0>());
    }

    #[test] pub fn word_expansion() {
        let seed = SeedBuffer::new(&[0x78, 0x56, 0x34, 0x12, 0xaa]);
        assert_eq!(vec![0x12345678, 0xaa], seed.u32_words());
        assert_eq!(vec![0xaa12345678], seed.u64_words());
        assert!(SeedBuffer::default().u32_words().is_empty());
        assert!(SeedBuffer::default().u64_words().is_empty());
    }

    #[test] pub fn hex_seeds() {
        assert_eq!(Ok(vec![0x01, 0x23, 0xab]), parse_hex_seed("0123ab"));
        assert_eq!(Ok(vec![0xde, 0xad, 0xbe, 0xef]), parse_hex_seed(" 0xDEAD_BEEF "));
        assert_eq!(Ok(vec![]), parse_hex_seed(""));
        assert!(matches!(parse_hex_seed("abc"), Err(PrngError::MalformedSeed { .. })));
        assert!(matches!(parse_hex_seed("zz"), Err(PrngError::MalformedSeed { .. })));
    }
}
