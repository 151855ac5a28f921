//! Adapter over an external reference PRNG library.
//!
//! The library is an opaque capability provider: [`RandLibrary::open`] takes
//! the raw seed bytes and hands back a [`LibraryHandle`]. The adapter owns
//! the handle exclusively and releases it exactly once, when the adapter is
//! dropped. If opening fails no adapter exists and nothing is left to release.

use rand_chacha::ChaCha20Rng;
use crate::algorithm::AlgorithmId;
use crate::error::Result;
use crate::generator::Generator;
use crate::seed::SeedBuffer;

/// A live generator resource acquired from a [`RandLibrary`].
/// Dropping the handle releases the resource.
pub trait LibraryHandle: Send {
    /// Next 32-bit value from the library.
    fn next_u32(&mut self) -> u32;
}

/// Entry points of a reference PRNG library.
pub trait RandLibrary {
    /// Library name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Seeds a new generator resource from the raw seed bytes.
    fn open(&self, seed: &[u8]) -> Result<Box<dyn LibraryHandle>>;
}

impl<L: RandLibrary + ?Sized> RandLibrary for &L {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn open(&self, seed: &[u8]) -> Result<Box<dyn LibraryHandle>> {
        (**self).open(seed)
    }
}

/// The default reference library: ChaCha20 from the `rand_chacha` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChaChaLibrary;

struct ChaChaHandle(ChaCha20Rng);

impl LibraryHandle for ChaChaHandle {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        rand_core::RngCore::next_u32(&mut self.0)
    }
}

impl RandLibrary for ChaChaLibrary {
    fn name(&self) -> &'static str {
        "rand_chacha::ChaCha20Rng"
    }

    /// ChaCha20 is keyed by 32 bytes. The seed is XOR-folded into the key,
    /// so every byte of a longer seed takes part.
    fn open(&self, seed: &[u8]) -> Result<Box<dyn LibraryHandle>> {
        let key: [u8; 32] = SeedBuffer::new(seed).folded();
        Ok(Box::new(ChaChaHandle(<ChaCha20Rng as rand_core::SeedableRng>::from_seed(key))))
    }
}

/// Reference library adapter. 32-bit output.
pub struct RandLib {
    library: &'static str,
    handle: Box<dyn LibraryHandle>,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for RandLib {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "RandLib {{ library: {:?} }}", self.library)
    }
}

impl RandLib {

    /// Opens a generator from the default library.
    pub fn new(seed: &SeedBuffer<'_>) -> Result<Self> {
        RandLib::with_library(&ChaChaLibrary, seed)
    }

    /// Opens a generator from `library`. The seed bytes are passed through unmodified.
    pub fn with_library<L: RandLibrary + ?Sized>(library: &L, seed: &SeedBuffer<'_>) -> Result<Self> {
        let handle = library.open(seed.as_bytes())?;
        tracing::debug!(library = library.name(), seed_len = seed.len(), "acquired library handle");
        Ok(RandLib { library: library.name(), handle })
    }

    /// Name of the wrapped library.
    pub fn library(&self) -> &'static str {
        self.library
    }

    #[inline]
    pub fn next(&mut self) -> u32 {
        self.handle.next_u32()
    }
}

impl Drop for RandLib {
    fn drop(&mut self) {
        // The boxed handle is released right after this body runs.
        tracing::debug!(library = self.library, "releasing library handle");
    }
}

impl Generator for RandLib {
    #[inline]
    fn identity(&self) -> AlgorithmId {
        AlgorithmId::RandLib
    }
}

use super::{impls, Error, RngCore};

impl RngCore for RandLib {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use crate::error::PrngError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Counts acquisitions and releases, and records the seed it was given.
    #[derive(Default)]
    struct CountingLibrary {
        opened: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
        seeds: Mutex<Vec<Vec<u8>>>,
        refuse: bool,
    }

    struct CountingHandle {
        state: u32,
        released: Arc<AtomicUsize>,
    }

    impl LibraryHandle for CountingHandle {
        fn next_u32(&mut self) -> u32 {
            self.state = self.state.wrapping_add(1);
            self.state
        }
    }

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl RandLibrary for CountingLibrary {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn open(&self, seed: &[u8]) -> Result<Box<dyn LibraryHandle>> {
            if self.refuse {
                return Err(PrngError::LibraryInit { library: self.name(), reason: "refused".into() });
            }
            self.seeds.lock().unwrap().push(seed.to_vec());
            self.opened.fetch_add(1, Ordering::SeqCst);
            let state = seed.first().copied().unwrap_or(0) as u32;
            Ok(Box::new(CountingHandle { state, released: self.released.clone() }))
        }
    }

    #[test] pub fn seed_passes_through_unmodified() {
        let library = CountingLibrary::default();
        let seed = [9u8, 8, 7, 6, 5, 4, 3, 2, 1, 0, 255];
        let mut rng = RandLib::with_library(&library, &SeedBuffer::new(&seed)).unwrap();
        assert_eq!(vec![seed.to_vec()], *library.seeds.lock().unwrap());
        assert_eq!(10, rng.next_u32());
        assert_eq!(11, rng.next_u32());
        assert_eq!("counting", rng.library());
    }

    #[test] pub fn handle_released_exactly_once() {
        let library = CountingLibrary::default();
        for n in 1 .. 20 {
            let rng = RandLib::with_library(&library, &SeedBuffer::new(&[n as u8])).unwrap();
            assert_eq!(n, library.opened.load(Ordering::SeqCst));
            assert_eq!(n - 1, library.released.load(Ordering::SeqCst));
            drop(rng);
            assert_eq!(n, library.released.load(Ordering::SeqCst));
        }
    }

    #[test] pub fn failed_open_is_surfaced() {
        let library = CountingLibrary { refuse: true, ..Default::default() };
        let err = RandLib::with_library(&library, &SeedBuffer::new(&[1, 2, 3])).unwrap_err();
        assert_eq!(PrngError::LibraryInit { library: "counting", reason: "refused".into() }, err);
        assert_eq!(0, library.opened.load(Ordering::SeqCst));
        assert_eq!(0, library.released.load(Ordering::SeqCst));
    }

    #[test] pub fn chacha_default() {
        let mut a = RandLib::new(&SeedBuffer::new(&[1, 2, 3])).unwrap();
        let mut b = RandLib::new(&SeedBuffer::new(&[1, 2, 3])).unwrap();
        let mut c = RandLib::new(&SeedBuffer::new(&[1, 2, 4])).unwrap();
        let xs: Vec<u32> = (0 .. 8).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0 .. 8).map(|_| b.next_u32()).collect();
        let zs: Vec<u32> = (0 .. 8).map(|_| c.next_u32()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);

        // Matches the library driven directly with the folded key.
        let mut key = [0u8; 32];
        key[.. 3].copy_from_slice(&[1, 2, 3]);
        let mut direct = <ChaCha20Rng as rand_core::SeedableRng>::from_seed(key);
        let ds: Vec<u32> = (0 .. 8).map(|_| direct.next_u32()).collect();
        assert_eq!(xs, ds);
    }
}
