use serde::{Deserialize, Serialize};

use crate::error::VeilError;
use crate::result::Result;

/// Color interpretation of a [`PixelBuffer`], named after the classic
/// PIL-style mode tags so metadata round-trips with the original wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "L")]
    Luma,
}

impl ColorMode {
    pub fn channels(&self) -> u32 {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Luma => 1,
        }
    }
}

/// Sample data type tag. Only 8-bit samples are produced by the image
/// boundary, but the tag travels through the container so a decoder can
/// reject anything it does not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleType {
    #[serde(rename = "uint8")]
    U8,
}

/// A flat, owned pixel buffer in row-major, channel-interleaved order.
///
/// Invariant: `data.len() == width * height * channels`. Every layer of the
/// pipeline consumes and produces whole buffers; nothing is mutated in place
/// across a layer boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    mode: ColorMode,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(mode: ColorMode, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * mode.channels() as usize;
        if data.len() != expected {
            return Err(VeilError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            mode,
            width,
            height,
            data,
        })
    }

    /// A buffer of the same shape and mode with different sample values.
    /// Fails with `ShapeMismatch` when the sample count differs.
    pub fn with_samples(&self, data: Vec<u8>) -> Result<Self> {
        Self::new(self.mode, self.width, self.height, data)
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of samples (pixel count times channels). One LSB can be
    /// hidden per sample, so this is also the embedding capacity in bits.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }

    /// Shape as `[height, width, channels]`, with the channel axis dropped
    /// for single-channel buffers, matching the numpy-array convention the
    /// container format was defined against.
    pub fn shape(&self) -> Vec<u32> {
        match self.mode {
            ColorMode::Rgb => vec![self.height, self.width, 3],
            ColorMode::Luma => vec![self.height, self.width],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_enforces_sample_count() {
        let ok = PixelBuffer::new(ColorMode::Rgb, 2, 2, vec![0; 12]);
        assert!(ok.is_ok());

        let err = PixelBuffer::new(ColorMode::Rgb, 2, 2, vec![0; 11]);
        match err {
            Err(VeilError::ShapeMismatch {
                expected: 12,
                actual: 11,
            }) => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn sample_count_check_survives_huge_dimensions() {
        // 65536 * 65536 * 3 overflows u32; the check must widen first
        match PixelBuffer::new(ColorMode::Rgb, 65_536, 65_536, Vec::new()) {
            Err(VeilError::ShapeMismatch { expected, actual: 0 }) => {
                assert_eq!(expected, 65_536usize * 65_536 * 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn luma_shape_has_no_channel_axis() {
        let buf = PixelBuffer::new(ColorMode::Luma, 3, 2, vec![0; 6]).unwrap();
        assert_eq!(buf.shape(), vec![2, 3]);

        let buf = PixelBuffer::new(ColorMode::Rgb, 3, 2, vec![0; 18]).unwrap();
        assert_eq!(buf.shape(), vec![2, 3, 3]);
    }
}
