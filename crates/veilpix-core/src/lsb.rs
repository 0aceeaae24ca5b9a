//! LSB embedding and extraction.
//!
//! One payload bit goes into the least-significant bit of each cover sample
//! in buffer order (row-major, channel-interleaved). The stream starts with
//! a 32-bit big-endian header holding the payload bit count, followed by the
//! payload bytes MSB-first, matching the header's endianness.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::buffer::PixelBuffer;
use crate::error::VeilError;
use crate::result::Result;

/// Bits reserved for the length header at the start of the stream.
pub const LENGTH_HEADER_BITS: usize = 32;

/// Number of payload bytes a cover buffer can hold, header already deducted.
pub fn capacity_bytes(cover: &PixelBuffer) -> usize {
    cover.len().saturating_sub(LENGTH_HEADER_BITS) / 8
}

/// Embeds `payload` into the LSBs of a copy of `cover`.
///
/// The capacity check runs before any sample is written; on failure the
/// cover is untouched and no partial output exists.
pub fn embed(cover: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer> {
    let needed = LENGTH_HEADER_BITS + payload.len() * 8;
    let capacity = cover.len();
    if needed > capacity {
        return Err(VeilError::CoverTooSmall { needed, capacity });
    }

    let mut samples = cover.samples().to_vec();
    let bit_count = (payload.len() * 8) as u32;

    for (slot, shift) in samples[..LENGTH_HEADER_BITS]
        .iter_mut()
        .zip((0..LENGTH_HEADER_BITS as u32).rev())
    {
        *slot = (*slot & 0xFE) | ((bit_count >> shift) & 1) as u8;
    }

    let mut bits = BitReader::endian(Cursor::new(payload), BigEndian);
    for slot in samples[LENGTH_HEADER_BITS..needed].iter_mut() {
        let bit = bits.read_bit()?;
        *slot = (*slot & 0xFE) | u8::from(bit);
    }

    cover.with_samples(samples)
}

/// Extracts the embedded payload from a stego buffer.
///
/// Reads the 32-bit header, validates it against the remaining capacity and
/// packs the payload bits back into bytes, zero-padding the final byte when
/// the bit count is not a multiple of eight.
pub fn extract(stego: &PixelBuffer) -> Result<Vec<u8>> {
    let samples = stego.samples();
    let available = samples.len().saturating_sub(LENGTH_HEADER_BITS);

    let mut bit_count: u32 = 0;
    for sample in samples.iter().take(LENGTH_HEADER_BITS) {
        bit_count = (bit_count << 1) | u32::from(sample & 1);
    }

    if bit_count == 0 || bit_count as usize > available {
        return Err(VeilError::InvalidEmbeddedLength(bit_count));
    }

    let start = LENGTH_HEADER_BITS;
    let end = start + bit_count as usize;
    let mut bits = BitWriter::endian(Vec::new(), BigEndian);
    for sample in &samples[start..end] {
        bits.write_bit(sample & 1 == 1)?;
    }
    bits.byte_align()?;

    Ok(bits.into_writer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;

    fn cover(width: u32, height: u32) -> PixelBuffer {
        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        PixelBuffer::new(ColorMode::Rgb, width, height, data).unwrap()
    }

    #[test]
    fn embed_extract_round_trips() {
        let cover = cover(16, 16);
        let payload = b"veiled payload \x00\xff\x80\x01".to_vec();

        let stego = embed(&cover, &payload).unwrap();
        assert_eq!(stego.shape(), cover.shape());

        let extracted = extract(&stego).unwrap();
        assert_eq!(extracted, payload);
    }

    #[test]
    fn embedding_only_touches_lsbs() {
        let cover = cover(8, 8);
        let stego = embed(&cover, &[0b1010_1010; 4]).unwrap();

        for (before, after) in cover.samples().iter().zip(stego.samples()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn header_is_big_endian_and_bits_are_msb_first() {
        let cover = cover(8, 8);
        let stego = embed(&cover, &[0b1100_0001]).unwrap();
        let lsbs: Vec<u8> = stego.samples().iter().map(|s| s & 1).collect();

        // 8 payload bits -> header is 24 zero bits then 0b00001000
        assert!(lsbs[..28].iter().all(|&b| b == 0));
        assert_eq!(&lsbs[28..32], &[1, 0, 0, 0]);
        // payload byte MSB-first
        assert_eq!(&lsbs[32..40], &[1, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn capacity_boundary_is_exact() {
        // 4x8 RGB cover: 96 samples, so 32 header bits + 64 payload bits fit
        let cover = cover(8, 4);
        assert_eq!(capacity_bytes(&cover), 8);

        let stego = embed(&cover, &[0x5A; 8]).unwrap();
        assert_eq!(extract(&stego).unwrap(), vec![0x5A; 8]);

        match embed(&cover, &[0x5A; 9]) {
            Err(VeilError::CoverTooSmall {
                needed: 104,
                capacity: 96,
            }) => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn extract_rejects_oversized_length_header() {
        // all-ones LSBs claim u32::MAX bits of payload
        let data = vec![0xFFu8; 96];
        let stego = PixelBuffer::new(ColorMode::Rgb, 8, 4, data).unwrap();

        match extract(&stego) {
            Err(VeilError::InvalidEmbeddedLength(n)) => assert_eq!(n, u32::MAX),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn extract_rejects_zero_length_header() {
        let stego = cover(8, 4);
        let stego = stego
            .with_samples(stego.samples().iter().map(|s| s & 0xFE).collect())
            .unwrap();

        assert!(matches!(
            extract(&stego),
            Err(VeilError::InvalidEmbeddedLength(0))
        ));
    }

    #[test]
    fn extract_pads_ragged_bit_counts_with_zeros() {
        // hand-build a stream of 4 payload bits: 1011
        let mut samples = vec![0u8; 96];
        // header = 4 (bit 29 of the 32-bit big-endian header)
        samples[29] = 1;
        samples[32] = 1;
        samples[33] = 0;
        samples[34] = 1;
        samples[35] = 1;
        let stego = PixelBuffer::new(ColorMode::Rgb, 8, 4, samples).unwrap();

        assert_eq!(extract(&stego).unwrap(), vec![0b1011_0000]);
    }
}
