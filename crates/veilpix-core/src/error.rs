use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeilError {
    /// Represents an invalid or unreadable image file. For example, a broken PNG
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a cover image with fewer samples than the payload needs.
    /// Raised before any sample is touched, so there is never a partially
    /// written stego buffer.
    #[error("Cover too small: need {needed} bits, have {capacity} bits")]
    CoverTooSmall { needed: usize, capacity: usize },

    /// Represents an unpadding failure after decryption. A wrong key,
    /// corrupted ciphertext and truncated data are indistinguishable here,
    /// so the causes are reported generically.
    #[error("Invalid key or corrupted data")]
    InvalidKeyOrCorruptData,

    /// Represents an embedded length header that claims more bits than the
    /// stego buffer holds
    #[error("Invalid embedded data length: {0} bits")]
    InvalidEmbeddedLength(u32),

    /// Represents a container with fewer bytes than one of its fields declares
    #[error("Container is truncated")]
    TruncatedContainer,

    /// Represents metadata bytes that do not deserialize to a valid
    /// mode/shape/dtype triple
    #[error("Container metadata could not be parsed")]
    MetadataParseError,

    /// Represents a buffer whose length does not match the permutation
    /// (or declared shape) it is combined with
    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Represents a failure to read from input
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write an output file
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("API Error: No secret image set")]
    SecretNotSet,

    #[error("API Error: No cover image set")]
    CoverNotSet,

    #[error("API Error: No output path set")]
    TargetNotSet,

    #[error("API Error: No key set")]
    KeyNotSet,
}
