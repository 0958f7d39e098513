use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{Key, Salt, KEY_LEN};

/// PBKDF2 rounds used when nothing else is configured.
/// Not stored in the blob, so changing it breaks every image written before.
pub const PBKDF2_ROUNDS: u32 = 200_000;

/// derives the AES-256 key from a password and a salt with PBKDF2-HMAC-SHA256
pub fn derive_key(password: &str, salt: &Salt) -> Zeroizing<Key> {
    derive_key_with_rounds(password, salt, PBKDF2_ROUNDS)
}

pub(crate) fn derive_key_with_rounds(password: &str, salt: &Salt, rounds: u32) -> Zeroizing<Key> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_sha256(password.as_bytes(), salt, rounds, &mut key[..]);

    key
}

#[inline]
fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha256>(password, salt, rounds, out);
}
