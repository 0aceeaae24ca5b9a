//! Deterministic pixel scrambling.
//!
//! Scrambling spreads the secret's pixel values across the buffer before
//! encryption. It is a cheap obfuscation layer, not a security boundary:
//! the permutation is derived from a seed, and anyone who knows the seed
//! and the strategy can undo it without the key (see [`crate::pipeline::SeedMode`]
//! for binding the seed to the key).

use enum_dispatch::enum_dispatch;
use fastrand::Rng;

use crate::buffer::PixelBuffer;
use crate::error::VeilError;
use crate::result::Result;

pub mod chaos;
pub use chaos::{ArnoldMap, HenonMap, LogisticMap, TentMap};

/// A bijection over `[0, N)` with its inverse precomputed.
///
/// `indices[i]` is the source index that ends up at position `i` after
/// scrambling; `inverse` undoes that mapping. Deterministic given the same
/// seed, so encoder and decoder regenerate identical permutations and the
/// tables are never persisted.
#[derive(Debug, Clone)]
pub struct Permutation {
    indices: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    pub(crate) fn from_indices(indices: Vec<usize>) -> Self {
        let mut inverse = vec![0usize; indices.len()];
        for (position, &source) in indices.iter().enumerate() {
            inverse[source] = position;
        }

        Self { indices, inverse }
    }

    /// Fisher-Yates shuffle over a seeded stream.
    pub fn from_seed(seed: u64, length: usize) -> Self {
        let mut rng = Rng::with_seed(seed);
        let mut indices: Vec<usize> = (0..length).collect();

        for i in (1..length).rev() {
            let j = rng.usize(0..=i);
            indices.swap(i, j);
        }

        Self::from_indices(indices)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Reorders `data` so that `out[i] == data[indices[i]]`.
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.check_len(data.len())?;

        Ok(self.indices.iter().map(|&source| data[source]).collect())
    }

    /// Exact inverse of [`Permutation::apply`].
    pub fn invert(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.check_len(data.len())?;

        Ok(self.inverse.iter().map(|&position| data[position]).collect())
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.len() {
            return Err(VeilError::ShapeMismatch {
                expected: self.len(),
                actual,
            });
        }

        Ok(())
    }
}

/// Generates the permutation a strategy uses for a buffer of `length` samples.
///
/// Implementations must be deterministic: identical seed and length yield an
/// identical permutation on every call and every platform.
#[enum_dispatch]
pub trait Scrambler {
    fn permutation(&self, seed: u64, length: usize) -> Permutation;
}

/// The production strategy: a plain seeded Fisher-Yates shuffle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededShuffle;

impl Scrambler for SeededShuffle {
    fn permutation(&self, seed: u64, length: usize) -> Permutation {
        Permutation::from_seed(seed, length)
    }
}

/// Selectable scrambling strategy.
///
/// [`SeededShuffle`] is the only validated variant; the chaotic maps are
/// ported alternatives, see [`chaos`].
#[enum_dispatch(Scrambler)]
#[derive(Debug, Clone, Copy)]
pub enum ScramblerStrategy {
    SeededShuffle,
    LogisticMap,
    TentMap,
    HenonMap,
    ArnoldMap,
}

impl Default for ScramblerStrategy {
    fn default() -> Self {
        SeededShuffle.into()
    }
}

/// Reorders the samples of `buffer` with a freshly generated permutation.
/// Shape, mode and sample count are unchanged; only the element order moves.
pub fn scramble(
    buffer: &PixelBuffer,
    strategy: &ScramblerStrategy,
    seed: u64,
) -> Result<(PixelBuffer, Permutation)> {
    let permutation = strategy.permutation(seed, buffer.len());
    let scrambled = permutation.apply(buffer.samples())?;

    Ok((buffer.with_samples(scrambled)?, permutation))
}

/// Restores the original sample order. Fails with `ShapeMismatch` when the
/// buffer length differs from the permutation it is given.
pub fn unscramble(buffer: &PixelBuffer, permutation: &Permutation) -> Result<PixelBuffer> {
    let restored = permutation.invert(buffer.samples())?;

    buffer.with_samples(restored)
}
