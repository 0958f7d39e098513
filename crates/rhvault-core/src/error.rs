use thiserror::Error;

use crate::media::image::capacity::required_square_side;

pub use rhvault_lockbox::LockboxError;

#[derive(Error, Debug)]
pub enum VaultError {
    /// Represents a payload that does not fit into the carrier image,
    /// detected before any pixel is touched
    #[error(
        "Capacity Error: the payload needs {needed_bits} bits but the image only holds \
         {capacity_bits} bits. A square image of at least {}x{} pixels is required",
        suggested_side(.needed_bits),
        suggested_side(.needed_bits)
    )]
    CapacityExceeded { needed_bits: u64, capacity_bits: u64 },

    /// Represents a failed tag verification, for example a wrong password or a modified image
    #[error("Authentication failed: wrong password or no intact secret inside the image")]
    Authentication,

    /// Represents a length header that promises more data than the image carries.
    /// Typical for images that contain no secret at all
    #[error("No secret found: {declared} bytes declared but only {available} bytes available")]
    TruncatedPayload { declared: u64, available: u64 },

    /// Represents a carrier that cannot be treated as lossless 8 bit RGB,
    /// for example a JPEG or a 16 bit PNG
    #[error("Image format is not supported: {0}")]
    UnsupportedImageFormat(String),

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents a broken key derivation setup, for example zero rounds
    #[error("Key derivation error")]
    KeyDerivation(LockboxError),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing secret")]
    MissingSecret,

    #[error("API Error: Missing password")]
    MissingPassword,
}

fn suggested_side(needed_bits: &u64) -> u64 {
    required_square_side(*needed_bits)
}

impl From<LockboxError> for VaultError {
    fn from(e: LockboxError) -> Self {
        match e {
            LockboxError::AuthenticationError | LockboxError::MalformedBlob { .. } => {
                VaultError::Authentication
            }
            e => VaultError::KeyDerivation(e),
        }
    }
}
