//! Security and quality metrics.
//!
//! Pure functions over byte slices and pixel buffers. They validate nothing
//! about where the data came from; the pipeline and the analyze commands
//! feed them original/encrypted/stego pairs.

use serde::Serialize;

use crate::buffer::{ColorMode, PixelBuffer};

/// Pair cap for neighbor correlation, keeps the metric O(1) on large images.
const CORRELATION_SAMPLE_CAP: usize = 5000;

/// PSNR reported for identical images (`mse == 0`), where the true value
/// diverges to infinity.
pub const PSNR_IDENTICAL: f64 = 100.0;

/// Shannon entropy of the byte distribution, in bits per byte.
///
/// Builds a 256-bin histogram, drops empty bins and sums `-p * log2(p)`.
/// Returns 0.0 for an empty buffer. Always within `[0, 8]`.
pub fn entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut histogram = [0u64; 256];
    for &byte in data {
        histogram[byte as usize] += 1;
    }

    let total = data.len() as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Number of Pixels Changed Ratio: percentage of differing samples.
///
/// Unequal lengths yield 0.0 rather than an error; the analyze commands
/// compare truncated prefixes and treat incomparable inputs as "no change".
pub fn npcr(a: &[u8], b: &[u8]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let differing = a.iter().zip(b).filter(|(x, y)| x != y).count();
    100.0 * differing as f64 / a.len() as f64
}

/// Unified Average Changed Intensity: mean normalized per-sample difference.
/// Same unequal-length policy as [`npcr`].
pub fn uaci(a: &[u8], b: &[u8]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let total: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).abs())
        .sum();
    100.0 * total / (a.len() as f64 * 255.0)
}

/// Mean squared per-sample difference, computed in floating point so the
/// unsigned samples never underflow. Same unequal-length policy as [`npcr`].
pub fn mse(a: &[u8], b: &[u8]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let total: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    total / a.len() as f64
}

/// Peak Signal-to-Noise Ratio in dB for 8-bit samples, derived from an MSE.
/// Reports [`PSNR_IDENTICAL`] when the images are identical.
pub fn psnr(mse: f64) -> f64 {
    if mse > 0.0 {
        10.0 * ((255.0 * 255.0) / mse).log10()
    } else {
        PSNR_IDENTICAL
    }
}

/// Neighbor axis for [`correlation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Pearson correlation between each pixel and its horizontal or vertical
/// neighbor, on the channel-averaged (grayscale) plane.
///
/// Large planes are subsampled to at most 5000 pairs through the caller's
/// RNG handle, keeping the sampling deterministic under a seeded generator.
/// Returns 0.0 when fewer than 2 pairs exist.
pub fn correlation(buffer: &PixelBuffer, direction: Direction, rng: &mut fastrand::Rng) -> f64 {
    let plane = gray_plane(buffer);
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    let mut pairs: Vec<(f64, f64)> = match direction {
        Direction::Horizontal => (0..height)
            .flat_map(|row| {
                let plane = &plane;
                (0..width.saturating_sub(1))
                    .map(move |col| (plane[row * width + col], plane[row * width + col + 1]))
            })
            .collect(),
        Direction::Vertical => (0..height.saturating_sub(1))
            .flat_map(|row| {
                let plane = &plane;
                (0..width).map(move |col| (plane[row * width + col], plane[(row + 1) * width + col]))
            })
            .collect(),
    };

    if pairs.len() > CORRELATION_SAMPLE_CAP {
        // partial Fisher-Yates, the first cap entries are a uniform sample
        for i in 0..CORRELATION_SAMPLE_CAP {
            let j = rng.usize(i..pairs.len());
            pairs.swap(i, j);
        }
        pairs.truncate(CORRELATION_SAMPLE_CAP);
    }

    pearson(&pairs)
}

/// Channel-averaged grayscale plane, one f64 per pixel.
fn gray_plane(buffer: &PixelBuffer) -> Vec<f64> {
    let samples = buffer.samples();
    match buffer.mode() {
        ColorMode::Luma => samples.iter().map(|&s| f64::from(s)).collect(),
        ColorMode::Rgb => samples
            .chunks_exact(3)
            .map(|px| (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0)
            .collect(),
    }
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    covariance / denominator
}

/// Entropy before and after encryption, reported by the conceal and seal
/// pipelines.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntropyReport {
    pub original: f64,
    pub encrypted: f64,
}

/// Report of the encryption analysis: original image versus sealed container.
#[derive(Debug, Clone, Serialize)]
pub struct EncryptionAnalysis {
    pub entropy: EntropyReport,
    pub npcr: f64,
    pub uaci: f64,
    pub correlation: f64,
}

/// Report of the steganography analysis: cover image versus stego image.
#[derive(Debug, Clone, Serialize)]
pub struct StegoAnalysis {
    pub mse: f64,
    pub psnr: f64,
}

/// Rounds to `decimals` places, the way the reports are published.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;

    #[test]
    fn entropy_of_empty_buffer_is_zero() {
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn entropy_of_constant_buffer_is_zero() {
        assert_eq!(entropy(&[100u8; 4096]), 0.0);
    }

    #[test]
    fn entropy_of_uniform_distribution_is_eight() {
        let uniform: Vec<u8> = (0..=255).collect();
        assert!((entropy(&uniform) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_stays_within_bounds() {
        let mixed: Vec<u8> = (0..10_000u32).map(|i| (i * i % 256) as u8).collect();
        let e = entropy(&mixed);
        assert!((0.0..=8.0).contains(&e), "entropy {e} out of bounds");
    }

    #[test]
    fn npcr_and_uaci_of_identical_buffers_are_zero() {
        let a: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        assert_eq!(npcr(&a, &a), 0.0);
        assert_eq!(uaci(&a, &a), 0.0);
    }

    #[test]
    fn npcr_counts_differing_samples() {
        let a = [0u8, 0, 0, 0];
        let b = [0u8, 1, 0, 1];
        assert_eq!(npcr(&a, &b), 50.0);
    }

    #[test]
    fn uaci_measures_intensity_difference() {
        let a = [0u8; 4];
        let b = [255u8; 4];
        assert!((uaci(&a, &b) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn shape_mismatch_yields_zero_by_policy() {
        let a = [1u8, 2, 3];
        let b = [1u8, 2];
        assert_eq!(npcr(&a, &b), 0.0);
        assert_eq!(uaci(&a, &b), 0.0);
        assert_eq!(mse(&a, &b), 0.0);
    }

    #[test]
    fn psnr_sentinel_for_identical_images() {
        let a = [42u8; 64];
        assert_eq!(mse(&a, &a), 0.0);
        assert_eq!(psnr(mse(&a, &a)), PSNR_IDENTICAL);
    }

    #[test]
    fn psnr_of_known_difference() {
        // constant difference of 1 -> mse 1 -> psnr = 10*log10(255^2)
        let a = [10u8; 100];
        let b = [11u8; 100];
        let m = mse(&a, &b);
        assert!((m - 1.0).abs() < 1e-12);
        assert!((psnr(m) - 20.0 * 255f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_smooth_gradient_is_high() {
        let data: Vec<u8> = (0..64 * 64).map(|i| ((i % 64) * 4) as u8).collect();
        let buffer = PixelBuffer::new(ColorMode::Luma, 64, 64, data).unwrap();
        let mut rng = fastrand::Rng::with_seed(1);

        let c = correlation(&buffer, Direction::Horizontal, &mut rng);
        assert!(c > 0.9, "gradient correlation was {c}");
    }

    #[test]
    fn correlation_of_constant_plane_is_zero() {
        let buffer = PixelBuffer::new(ColorMode::Luma, 8, 8, vec![7; 64]).unwrap();
        let mut rng = fastrand::Rng::with_seed(1);

        assert_eq!(correlation(&buffer, Direction::Horizontal, &mut rng), 0.0);
    }

    #[test]
    fn correlation_needs_two_pairs() {
        let buffer = PixelBuffer::new(ColorMode::Luma, 1, 2, vec![1, 2]).unwrap();
        let mut rng = fastrand::Rng::with_seed(1);

        // a 1-wide image has no horizontal neighbors at all
        assert_eq!(correlation(&buffer, Direction::Horizontal, &mut rng), 0.0);
        // but exactly one vertical pair, still below the minimum of two
        assert_eq!(correlation(&buffer, Direction::Vertical, &mut rng), 0.0);
    }

    #[test]
    fn correlation_sampling_is_deterministic_per_seed() {
        let data: Vec<u8> = (0..200 * 200).map(|i| (i * 7 % 256) as u8).collect();
        let buffer = PixelBuffer::new(ColorMode::Luma, 200, 200, data).unwrap();

        let a = correlation(&buffer, Direction::Horizontal, &mut fastrand::Rng::with_seed(9));
        let b = correlation(&buffer, Direction::Horizontal, &mut fastrand::Rng::with_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn rounding_matches_report_precision() {
        assert_eq!(round_to(7.123456789, 4), 7.1235);
        assert_eq!(round_to(99.987654, 2), 99.99);
    }
}
