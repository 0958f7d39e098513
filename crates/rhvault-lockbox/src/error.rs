pub use aes_gcm::Error as AesGcmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockboxError {
    /// PBKDF2 needs at least one round
    #[error("Key derivation needs at least one round")]
    InvalidRounds,

    /// The blob cannot even hold salt, nonce and tag
    #[error("Encrypted blob is malformed: {len} bytes is shorter than the {min} bytes header")]
    MalformedBlob { len: usize, min: usize },

    #[error("Encryption error")]
    EncryptionError(AesGcmError),

    /// Tag verification failed, either the password is wrong or the data was tampered with
    #[error("Authentication failed: wrong password or corrupted data")]
    AuthenticationError,
}
