use std::io::Read;

use log::debug;
use rand::{CryptoRng, RngCore};
use rhvault_lockbox::{sealed_len, Lockbox};

use super::{PayloadCodec, PayloadWithLengthHeader};
use crate::result::Result;

/// Encryption overhead: 16 bytes (salt) + 12 bytes (nonce) + 16 bytes (GCM auth tag)
pub const ENCRYPTION_OVERHEAD: usize = rhvault_lockbox::HEADER_LEN;

/// Everything a payload adds on top of the secret, length header plus encryption overhead
pub const PAYLOAD_OVERHEAD: usize = super::LENGTH_HEADER_LEN + ENCRYPTION_OVERHEAD;

/// Encrypts the secret and hands the blob to an inner codec for framing, and the way back.
pub struct CryptedPayloadCodec<'p> {
    inner_codec: Box<dyn PayloadCodec>,
    lockbox: Lockbox,
    password: &'p str,
}

impl<'p> CryptedPayloadCodec<'p> {
    pub fn new(lockbox: Lockbox, password: &'p str) -> Self {
        Self::with_inner_codec(Box::new(PayloadWithLengthHeader), lockbox, password)
    }

    pub fn with_inner_codec(
        inner_codec: Box<dyn PayloadCodec>,
        lockbox: Lockbox,
        password: &'p str,
    ) -> Self {
        Self {
            inner_codec,
            lockbox,
            password,
        }
    }

    /// secret → encrypted blob → payload ready for embedding
    pub fn encode<R>(&self, secret: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng,
    {
        let blob = self.lockbox.encrypt(self.password, secret, rng)?;
        debug!(
            "sealed {} secret bytes into a blob of {} bytes",
            secret.len(),
            blob.len()
        );

        self.inner_codec.encode(&blob)
    }

    /// payload size for a secret of `secret_len` bytes, known before anything gets encrypted
    pub fn encoded_size(&self, secret_len: usize) -> usize {
        self.inner_codec.encoded_size(sealed_len(secret_len))
    }

    /// extracted payload → encrypted blob → secret
    pub fn decode(&self, content: &mut dyn Read, available: u64) -> Result<Vec<u8>> {
        let blob = self.inner_codec.decode(content, available)?;
        debug!("extracted a blob of {} bytes", blob.len());

        Ok(self.lockbox.decrypt(self.password, &blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VaultError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn codec(password: &str) -> CryptedPayloadCodec<'_> {
        CryptedPayloadCodec::new(Lockbox::with_rounds(8).unwrap(), password)
    }

    #[test]
    fn test_encryption_codec() {
        let mut rng = StdRng::seed_from_u64(11);
        let payload = codec("password42").encode(b"hello world", &mut rng).unwrap();

        assert_eq!(payload.len(), codec("password42").encoded_size(11));
        assert_eq!(payload.len(), 11 + PAYLOAD_OVERHEAD);
        assert_eq!(payload[..4], [0, 0, 0, 55]);

        let available = payload.len() as u64;
        let secret = codec("password42")
            .decode(&mut Cursor::new(payload), available)
            .unwrap();
        assert_eq!(secret, b"hello world");
    }

    #[test]
    fn test_wrong_password() {
        let mut rng = StdRng::seed_from_u64(12);
        let payload = codec("password42").encode(b"hello world", &mut rng).unwrap();

        let available = payload.len() as u64;
        let result = codec("password43").decode(&mut Cursor::new(payload), available);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_empty_blob_is_not_a_secret() {
        let result = codec("pw").decode(&mut Cursor::new(vec![0, 0, 0, 0]), 4);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }
}
