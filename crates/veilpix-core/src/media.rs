//! Image file boundary.
//!
//! The only place where image files are decoded or encoded. Everything else
//! in the crate works on owned [`PixelBuffer`]s, so the codec dependency
//! stays confined to this module.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use log::error;

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::VeilError;
use crate::result::Result;

/// Decodes an image file into a flat pixel buffer.
///
/// Grayscale files stay single-channel; everything else is converted to RGB,
/// mirroring how the container format describes secrets.
pub fn decode(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| {
        error!("Error opening image {path:?}: {e}");
        VeilError::InvalidImageMedia
    })?;

    match img {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            PixelBuffer::new(ColorMode::Luma, width, height, gray.into_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            PixelBuffer::new(ColorMode::Rgb, width, height, rgb.into_raw())
        }
    }
}

/// Encodes a pixel buffer to a file; the format follows the file extension.
/// Stego output should stay in a lossless format (PNG), or the embedded
/// LSBs will not survive.
pub fn encode(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let width = buffer.width();
    let height = buffer.height();
    let data = buffer.samples().to_vec();

    let save_result = match buffer.mode() {
        ColorMode::Rgb => RgbImage::from_raw(width, height, data)
            .ok_or(VeilError::ImageEncodingError)?
            .save(path),
        ColorMode::Luma => GrayImage::from_raw(width, height, data)
            .ok_or(VeilError::ImageEncodingError)?
            .save(path),
    };

    save_result.map_err(|e| {
        error!("Error saving image {path:?}: {e}");
        VeilError::ImageEncodingError
    })
}
