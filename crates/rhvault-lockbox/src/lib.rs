//! # Lockbox
//! Password based authenticated encryption for data that ends up inside an image.
//!
//! The key is derived with PBKDF2-HMAC-SHA256 and the data is sealed with AES-256-GCM.
//! The produced blob is self contained, only the password is needed to open it again:
//!
//! ```text
//! | salt (16) | nonce (12) | tag (16) | ciphertext (same length as the plaintext) |
//! ```

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key as AesKey, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

pub mod error;
pub mod kdf;

pub use crate::error::LockboxError;
pub use crate::kdf::{derive_key, PBKDF2_ROUNDS};

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

/// bytes a blob carries on top of the plaintext
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

pub type Result<T> = std::result::Result<T, LockboxError>;
pub type Key = [u8; KEY_LEN];
pub type Salt = [u8; SALT_LEN];

/// length of the blob [`Lockbox::encrypt`] produces for a plaintext of `plaintext_len` bytes
pub const fn sealed_len(plaintext_len: usize) -> usize {
    HEADER_LEN + plaintext_len
}

/// encrypt data with password,
/// uses PBKDF2-HMAC-SHA256 for key derivation and AES-256-GCM for encryption
pub fn encrypt_data(password: &str, data: &[u8]) -> Result<Vec<u8>> {
    Lockbox::default().encrypt(password, data, &mut OsRng)
}

/// decrypt data with password, counterpart of [`encrypt_data`]
pub fn decrypt_data(password: &str, data: &[u8]) -> Result<Vec<u8>> {
    Lockbox::default().decrypt(password, data)
}

/// Seals and opens blobs. The only knob is the number of PBKDF2 rounds,
/// both sides have to agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lockbox {
    rounds: u32,
}

impl Default for Lockbox {
    fn default() -> Self {
        Self {
            rounds: PBKDF2_ROUNDS,
        }
    }
}

impl Lockbox {
    pub fn with_rounds(rounds: u32) -> Result<Self> {
        if rounds == 0 {
            return Err(LockboxError::InvalidRounds);
        }

        Ok(Self { rounds })
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Encrypts `plaintext` under a key derived from `password`.
    /// Salt and nonce are drawn from `rng` on every call.
    pub fn encrypt<R>(&self, password: &str, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng,
    {
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut nonce);

        let key = kdf::derive_key_with_rounds(password, &salt, self.rounds);
        let cipher = Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(&key[..]));

        let mut blob = Vec::with_capacity(sealed_len(plaintext.len()));
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&[0u8; TAG_LEN]);
        blob.extend_from_slice(plaintext);

        let sealed = cipher.encrypt_in_place_detached(
            Nonce::from_slice(&nonce),
            b"",
            &mut blob[HEADER_LEN..],
        );
        let tag = match sealed {
            Ok(tag) => tag,
            Err(e) => {
                blob.zeroize();
                return Err(LockboxError::EncryptionError(e));
            }
        };
        blob[SALT_LEN + NONCE_LEN..HEADER_LEN].copy_from_slice(&tag);

        Ok(blob)
    }

    /// Opens a blob produced by [`Lockbox::encrypt`].
    /// Nothing of the plaintext is handed out unless the tag verifies.
    pub fn decrypt(&self, password: &str, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < HEADER_LEN {
            return Err(LockboxError::MalformedBlob {
                len: blob.len(),
                min: HEADER_LEN,
            });
        }
        let (salt, rest) = blob.split_at(SALT_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let mut salt_buf = [0u8; SALT_LEN];
        salt_buf.copy_from_slice(salt);
        let key = kdf::derive_key_with_rounds(password, &salt_buf, self.rounds);
        let cipher = Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(&key[..]));

        let mut plaintext = ciphertext.to_vec();
        if cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(nonce),
                b"",
                &mut plaintext,
                GenericArray::from_slice(tag),
            )
            .is_err()
        {
            // the buffer was already run through the key stream
            plaintext.zeroize();
            return Err(LockboxError::AuthenticationError);
        }

        Ok(plaintext)
    }
}
