//! The scramble -> encrypt -> frame -> embed pipeline and its exact inverse.
//!
//! `seal`/`unseal` stop at the framed container (the `.bin` workflow);
//! `conceal`/`reveal` additionally push the container through the LSB codec.
//! Both directions take the scrambling seed from the configuration — it is
//! never recovered from the container, so encoder and decoder must agree on
//! the same [`PipelineConfig`].

use log::debug;

use crate::buffer::PixelBuffer;
use crate::container::{self, Metadata};
use crate::crypto;
use crate::lsb;
use crate::metrics::{self, EntropyReport};
use crate::result::Result;
use crate::scramble::{scramble, unscramble, Scrambler, ScramblerStrategy};

/// Seed the original implementation hard-codes for every call.
pub const DEFAULT_SEED: u64 = 42;

/// Where the scrambling seed comes from.
///
/// `Fixed` reproduces the historical behavior: the permutation adds no
/// per-file secrecy and anyone knowing the algorithm can undo it without the
/// key. `KeyDerived` hashes the normalized key material into the seed so the
/// scrambling layer is bound to the key. Both sides must pick the same mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    Fixed(u64),
    KeyDerived,
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Fixed(DEFAULT_SEED)
    }
}

impl SeedMode {
    fn seed_for(&self, key: &str) -> u64 {
        match self {
            SeedMode::Fixed(seed) => *seed,
            SeedMode::KeyDerived => fnv1a(&crypto::normalize_key(key)),
        }
    }
}

/// FNV-1a, enough to spread key bytes over the seed space. Not a KDF; the
/// seed only feeds the permutation, never the cipher.
fn fnv1a(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x1000_0000_01b3;

    bytes.iter().fold(FNV_OFFSET, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineConfig {
    pub strategy: ScramblerStrategy,
    pub seed: SeedMode,
}

impl PipelineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: SeedMode::Fixed(seed),
            ..Self::default()
        }
    }
}

/// A framed container plus the entropy measurements taken while building it.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub container: Vec<u8>,
    pub entropy: EntropyReport,
}

/// A stego buffer plus the entropy measurements of the conceal run.
#[derive(Debug, Clone)]
pub struct Concealed {
    pub stego: PixelBuffer,
    pub entropy: EntropyReport,
}

/// Scrambles and encrypts `secret` into a standalone framed container.
pub fn seal(secret: &PixelBuffer, key: &str, config: &PipelineConfig) -> Result<Sealed> {
    let original_entropy = metrics::entropy(secret.samples());
    let metadata = Metadata::describe(secret);

    let seed = config.seed.seed_for(key);
    let (scrambled, _) = scramble(secret, &config.strategy, seed)?;
    debug!("scrambled {} samples with seed {seed}", scrambled.len());

    let key_bytes = crypto::normalize_key(key);
    let (iv, ciphertext) = crypto::encrypt(scrambled.samples(), &key_bytes);
    let encrypted_entropy = metrics::entropy(&ciphertext);
    debug!("encrypted into {} ciphertext bytes", ciphertext.len());

    let container = container::frame(&metadata, &iv, &ciphertext)?;

    Ok(Sealed {
        container,
        entropy: EntropyReport {
            original: original_entropy,
            encrypted: encrypted_entropy,
        },
    })
}

/// Exact inverse of [`seal`]: unframe, decrypt, rebuild, unscramble.
pub fn unseal(container: &[u8], key: &str, config: &PipelineConfig) -> Result<PixelBuffer> {
    let (metadata, iv, ciphertext) = container::unframe(container)?;

    let key_bytes = crypto::normalize_key(key);
    let plaintext = crypto::decrypt(&iv, &ciphertext, &key_bytes)?;

    let scrambled = metadata.rebuild(plaintext)?;
    let permutation = config
        .strategy
        .permutation(config.seed.seed_for(key), scrambled.len());

    unscramble(&scrambled, &permutation)
}

/// Runs the full triple layer: seal the secret, then embed the container
/// into the cover's LSBs. The capacity check happens inside the embed step,
/// before any cover sample is written.
pub fn conceal(
    secret: &PixelBuffer,
    cover: &PixelBuffer,
    key: &str,
    config: &PipelineConfig,
) -> Result<Concealed> {
    let sealed = seal(secret, key, config)?;
    debug!(
        "embedding {} container bytes into a cover with {} samples",
        sealed.container.len(),
        cover.len()
    );

    let stego = lsb::embed(cover, &sealed.container)?;

    Ok(Concealed {
        stego,
        entropy: sealed.entropy,
    })
}

/// Exact inverse of [`conceal`].
pub fn reveal(stego: &PixelBuffer, key: &str, config: &PipelineConfig) -> Result<PixelBuffer> {
    let container = lsb::extract(stego)?;

    unseal(&container, key, config)
}
