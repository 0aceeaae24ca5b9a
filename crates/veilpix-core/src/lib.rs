//! # Veilpix Core
//!
//! Hides one image (the secret) inside another (the cover) through three
//! reversible layers:
//!
//! 1. a deterministic pixel permutation ([`scramble`]),
//! 2. AES-256-CBC encryption of the scrambled samples ([`crypto`]),
//! 3. LSB embedding of the framed container into the cover ([`lsb`]).
//!
//! Every layer is bit-exactly invertible given the correct key, and
//! [`metrics`] quantifies how well the result conceals and preserves
//! information (entropy, NPCR, UACI, MSE, PSNR, neighbor correlation).
//!
//! # Usage Examples
//!
//! ## Conceal a secret image inside a cover
//!
//! ```no_run
//! veilpix_core::api::conceal::prepare()
//!     .with_secret_image("secret.png")
//!     .with_cover_image("cover.png")
//!     .with_key("SuperSecret42")
//!     .with_output("stego.png")
//!     .execute()
//!     .expect("Failed to conceal the secret image");
//! ```
//!
//! ## Reveal it again
//!
//! ```no_run
//! veilpix_core::api::reveal::prepare()
//!     .with_stego_image("stego.png")
//!     .with_key("SuperSecret42")
//!     .with_output("revealed.png")
//!     .execute()
//!     .expect("Failed to reveal the secret image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod buffer;
pub mod commands;
pub mod container;
pub mod crypto;
pub mod error;
pub mod lsb;
pub mod media;
pub mod metrics;
pub mod pipeline;
pub mod result;
pub mod scramble;

pub use crate::buffer::{ColorMode, PixelBuffer, SampleType};
pub use crate::container::Metadata;
pub use crate::error::VeilError;
pub use crate::metrics::{EncryptionAnalysis, EntropyReport, StegoAnalysis};
pub use crate::pipeline::{PipelineConfig, SeedMode, DEFAULT_SEED};
pub use crate::result::Result;
pub use crate::scramble::{Permutation, Scrambler, ScramblerStrategy, SeededShuffle};
