//! File-level command functions shared by the builder API and the CLI.
//!
//! Each function reads its inputs, runs the in-memory pipeline and writes a
//! single output artifact. Failures leave no partial output; progress goes
//! through `log`, never into the returned result.

use std::fs;
use std::path::Path;

use fastrand::Rng;
use log::info;

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::VeilError;
use crate::media;
use crate::metrics::{self, round_to, Direction, EncryptionAnalysis, EntropyReport, StegoAnalysis};
use crate::pipeline::{self, PipelineConfig};
use crate::result::Result;

/// Seed for the correlation subsampling in analysis reports. Any fixed value
/// works; it only has to make repeated runs comparable.
const ANALYSIS_SAMPLING_SEED: u64 = 0x5eed;

/// Hides `secret_image` inside `cover_image` and writes the stego image.
pub fn conceal(
    secret_image: &Path,
    cover_image: &Path,
    output: &Path,
    key: &str,
    config: &PipelineConfig,
) -> Result<EntropyReport> {
    let secret = media::decode(secret_image)?;
    let cover = media::decode(cover_image)?;
    info!(
        "concealing a {}x{} secret in a {}x{} cover",
        secret.width(),
        secret.height(),
        cover.width(),
        cover.height()
    );

    let concealed = pipeline::conceal(&secret, &cover, key, config)?;
    media::encode(&concealed.stego, output)?;
    info!("stego image written to {output:?}");

    Ok(concealed.entropy)
}

/// Recovers the secret image hidden in `stego_image`.
pub fn reveal(
    stego_image: &Path,
    output: &Path,
    key: &str,
    config: &PipelineConfig,
) -> Result<()> {
    let stego = media::decode(stego_image)?;
    let secret = pipeline::reveal(&stego, key, config)?;

    media::encode(&secret, output)?;
    info!("revealed secret written to {output:?}");

    Ok(())
}

/// Encrypts `secret_image` into a standalone container file (no cover).
pub fn seal(
    secret_image: &Path,
    output: &Path,
    key: &str,
    config: &PipelineConfig,
) -> Result<EntropyReport> {
    let secret = media::decode(secret_image)?;
    let sealed = pipeline::seal(&secret, key, config)?;

    fs::write(output, &sealed.container).map_err(|source| VeilError::WriteError { source })?;
    info!(
        "sealed container of {} bytes written to {output:?}",
        sealed.container.len()
    );

    Ok(sealed.entropy)
}

/// Decrypts a container file back into an image.
pub fn unseal(
    container_file: &Path,
    output: &Path,
    key: &str,
    config: &PipelineConfig,
) -> Result<()> {
    let container =
        fs::read(container_file).map_err(|source| VeilError::ReadError { source })?;
    let secret = pipeline::unseal(&container, key, config)?;

    media::encode(&secret, output)?;
    info!("unsealed image written to {output:?}");

    Ok(())
}

/// Compares an original image against its sealed container: entropy gain,
/// NPCR/UACI over the common prefix, and the residual neighbor correlation
/// of the first container bytes viewed as a small tile.
pub fn analyze_encryption(
    original_image: &Path,
    container_file: &Path,
) -> Result<EncryptionAnalysis> {
    let original = media::decode(original_image)?;
    let container =
        fs::read(container_file).map_err(|source| VeilError::ReadError { source })?;

    let common = original.len().min(container.len());
    let npcr = metrics::npcr(&original.samples()[..common], &container[..common]);
    let uaci = metrics::uaci(&original.samples()[..common], &container[..common]);

    let correlation = if container.len() >= 100 {
        let tile = PixelBuffer::new(ColorMode::Luma, 10, 10, container[..100].to_vec())?;
        let mut rng = Rng::with_seed(ANALYSIS_SAMPLING_SEED);
        metrics::correlation(&tile, Direction::Horizontal, &mut rng)
    } else {
        0.0
    };

    Ok(EncryptionAnalysis {
        entropy: EntropyReport {
            original: round_to(metrics::entropy(original.samples()), 4),
            encrypted: round_to(metrics::entropy(&container), 4),
        },
        npcr: round_to(npcr, 2),
        uaci: round_to(uaci, 2),
        correlation: round_to(correlation, 6),
    })
}

/// Compares a cover image against the stego image derived from it.
/// Differently-shaped images are incomparable and report zero for both
/// values; the identical-image PSNR sentinel only applies to equal shapes.
pub fn analyze_steganography(cover_image: &Path, stego_image: &Path) -> Result<StegoAnalysis> {
    let cover = media::decode(cover_image)?;
    let stego = media::decode(stego_image)?;

    if cover.shape() != stego.shape() {
        return Ok(StegoAnalysis { mse: 0.0, psnr: 0.0 });
    }

    let mse = metrics::mse(cover.samples(), stego.samples());

    Ok(StegoAnalysis {
        mse: round_to(mse, 4),
        psnr: round_to(metrics::psnr(mse), 2),
    })
}
