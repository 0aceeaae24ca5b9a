//! Binary container framing.
//!
//! The payload embedded into a cover image (or written to a `.bin` file by
//! the seal command) is the concatenation
//!
//! ```text
//! metadata_length (u32, big-endian) || metadata (JSON) || iv (16 bytes) || ciphertext
//! ```
//!
//! Framing is a pure byte transformation with no side effects.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::buffer::{ColorMode, PixelBuffer, SampleType};
use crate::crypto::BLOCK_LEN;
use crate::error::VeilError;
use crate::result::Result;

/// Everything a decoder needs to rebuild a [`PixelBuffer`] from decrypted
/// bytes. Built from the secret at encode time, consumed and discarded after
/// the buffer is reconstructed at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub mode: ColorMode,
    pub shape: Vec<u32>,
    pub dtype: SampleType,
}

impl Metadata {
    pub fn describe(buffer: &PixelBuffer) -> Self {
        Self {
            mode: buffer.mode(),
            shape: buffer.shape(),
            dtype: SampleType::U8,
        }
    }

    /// Rebuilds the buffer this metadata describes from raw samples.
    /// Fails with `ShapeMismatch` when the sample count does not fit the
    /// declared shape, and `MetadataParseError` when shape and mode disagree.
    pub fn rebuild(&self, samples: Vec<u8>) -> Result<PixelBuffer> {
        let (height, width) = match (self.mode, self.shape.as_slice()) {
            (ColorMode::Luma, [h, w]) => (*h, *w),
            (ColorMode::Rgb, [h, w, 3]) => (*h, *w),
            _ => return Err(VeilError::MetadataParseError),
        };

        PixelBuffer::new(self.mode, width, height, samples)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|_| VeilError::MetadataParseError)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|_| VeilError::MetadataParseError)
    }
}

/// Serializes metadata, IV and ciphertext into one framed payload.
pub fn frame(metadata: &Metadata, iv: &[u8; BLOCK_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let metadata_bytes = metadata.to_bytes()?;

    let mut container =
        Vec::with_capacity(4 + metadata_bytes.len() + BLOCK_LEN + ciphertext.len());
    container.write_u32::<BigEndian>(metadata_bytes.len() as u32)?;
    container.extend_from_slice(&metadata_bytes);
    container.extend_from_slice(iv);
    container.extend_from_slice(ciphertext);

    Ok(container)
}

/// Splits a framed payload back into its fields.
pub fn unframe(container: &[u8]) -> Result<(Metadata, [u8; BLOCK_LEN], Vec<u8>)> {
    let mut cursor = Cursor::new(container);
    let metadata_length = cursor
        .read_u32::<BigEndian>()
        .map_err(|_| VeilError::TruncatedContainer)? as usize;

    let rest = &container[4..];
    if rest.len() < metadata_length + BLOCK_LEN {
        return Err(VeilError::TruncatedContainer);
    }

    let metadata = Metadata::from_bytes(&rest[..metadata_length])?;

    let mut iv = [0u8; BLOCK_LEN];
    iv.copy_from_slice(&rest[metadata_length..metadata_length + BLOCK_LEN]);

    let ciphertext = rest[metadata_length + BLOCK_LEN..].to_vec();
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(VeilError::TruncatedContainer);
    }

    Ok((metadata, iv, ciphertext))
}
