//! # rhvault core
//!
//! Hides a password protected secret in the least significant bits of a lossless RGB image.
//!
//! The secret is encrypted with AES-256-GCM under a key derived by PBKDF2-HMAC-SHA256,
//! prefixed with its length and written bit by bit into the lowest bit of every color channel.
//! Every channel after the payload gets a random lowest bit, so the used part of the image
//! cannot be told apart from the unused part.
//!
//! # Usage Examples
//!
//! ## Hide and reveal in memory
//!
//! ```rust
//! use image::RgbImage;
//! use rhvault_core::CodecOptions;
//!
//! // a low number of rounds keeps the example fast, use the default in real life
//! let opts = CodecOptions::default().with_kdf_rounds(1_000);
//! let cover = RgbImage::new(64, 64);
//!
//! let stego = rhvault_core::hide_with_options(
//!     &cover,
//!     b"hello world",
//!     "pw123",
//!     &opts,
//!     &mut rand::rngs::OsRng,
//! )
//! .expect("Failed to hide secret in image");
//!
//! let secret = rhvault_core::reveal_with_options(&stego, "pw123", &opts)
//!     .expect("Failed to reveal secret from image");
//! assert_eq!(secret, b"hello world");
//! ```
//!
//! ## Hide a file inside an image file
//!
//! ```rust,no_run
//! rhvault_core::api::hide::prepare()
//!     .with_secret_file("secret.txt")
//!     .with_password("SuperSecret42")
//!     .with_image("holiday.png")
//!     .with_output("holiday-with-a-secret.png")
//!     .execute()
//!     .expect("Failed to hide file in image");
//! ```
//!
//! ## Unveil it again
//!
//! ```rust,no_run
//! rhvault_core::api::unveil::prepare()
//!     .from_secret_file("holiday-with-a-secret.png")
//!     .using_password("SuperSecret42")
//!     .into_output_file("secret.txt")
//!     .execute()
//!     .expect("Failed to unveil secret from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod error;
pub mod media;
pub mod result;

use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

pub use crate::error::VaultError;
pub use crate::media::image::{capacity_bits, max_secret_len, LsbCodec};
pub use crate::media::{CodecOptions, CoverImage, LosslessFormat, Persist, RgbImage};
pub use crate::result::Result;

use crate::media::image::capacity;
use crate::media::payload::{CryptedPayloadCodec, PayloadDecoder, PayloadWithLengthHeader};

/// Hides `secret` in a copy of `cover`, protected by `password`.
/// Uses the default [`CodecOptions`] and the operating system's random number generator.
pub fn hide(cover: &RgbImage, secret: &[u8], password: &str) -> Result<RgbImage> {
    hide_with_rng(cover, secret, password, &mut OsRng)
}

/// same as [`hide`] with a caller provided source of salt, nonce and noise
pub fn hide_with_rng<R>(
    cover: &RgbImage,
    secret: &[u8],
    password: &str,
    rng: &mut R,
) -> Result<RgbImage>
where
    R: RngCore + CryptoRng,
{
    hide_with_options(cover, secret, password, &CodecOptions::default(), rng)
}

/// Hides `secret` in a copy of `cover`. The cover itself is never modified.
///
/// The capacity is checked before the key derivation runs,
/// a secret that cannot fit fails fast with [`VaultError::CapacityExceeded`].
pub fn hide_with_options<R>(
    cover: &RgbImage,
    secret: &[u8],
    password: &str,
    opts: &CodecOptions,
    rng: &mut R,
) -> Result<RgbImage>
where
    R: RngCore + CryptoRng,
{
    let codec = CryptedPayloadCodec::new(opts.lockbox()?, password);
    let needed_bits = capacity::payload_bits(codec.encoded_size(secret.len()));
    capacity::validate(needed_bits, capacity_bits(cover))?;
    debug!(
        "secret of {} bytes needs {needed_bits} of {} bits",
        secret.len(),
        capacity_bits(cover)
    );

    let payload = codec.encode(secret, rng)?;
    let mut stego = CoverImage::from_image(cover.clone());
    stego.hide_data(&payload, opts, rng)?;

    Ok(stego.into_image())
}

/// Recovers the secret [`hide`] put into `stego`.
///
/// A wrong password and a modified image look the same: [`VaultError::Authentication`].
/// Images without a secret usually fail with [`VaultError::TruncatedPayload`].
pub fn reveal(stego: &RgbImage, password: &str) -> Result<Vec<u8>> {
    reveal_with_options(stego, password, &CodecOptions::default())
}

pub fn reveal_with_options(
    stego: &RgbImage,
    password: &str,
    opts: &CodecOptions,
) -> Result<Vec<u8>> {
    let codec = CryptedPayloadCodec::new(opts.lockbox()?, password);
    let mut decoder = LsbCodec::decoder(stego);
    let available = decoder.remaining_bytes() as u64;

    codec.decode(&mut decoder, available)
}

/// Returns the still encrypted blob, `salt ‖ nonce ‖ tag ‖ ciphertext`, without any password.
pub fn extract_blob(stego: &RgbImage) -> Result<Vec<u8>> {
    let mut decoder = LsbCodec::decoder(stego);
    let available = decoder.remaining_bytes() as u64;

    PayloadWithLengthHeader.decode(&mut decoder, available)
}
