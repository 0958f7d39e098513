use rhvault_lockbox::{Lockbox, PBKDF2_ROUNDS};

use crate::result::Result;

/// Knobs for hiding and unveiling.
///
/// Neither value is stored inside the image, so unveiling has to use the same
/// `kdf_rounds` that were used for hiding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Number of PBKDF2-HMAC-SHA256 rounds used to derive the key from the password.
    pub kdf_rounds: u32,

    /// Every color channel after the payload gets a random least significant bit.
    /// Only tests switch this off, to look at the cover bits behind the payload.
    pub(crate) fill_unused_capacity: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            kdf_rounds: PBKDF2_ROUNDS,
            fill_unused_capacity: true,
        }
    }
}

impl CodecOptions {
    pub fn with_kdf_rounds(mut self, kdf_rounds: u32) -> Self {
        self.kdf_rounds = kdf_rounds;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_fill_unused_capacity(mut self, fill: bool) -> Self {
        self.fill_unused_capacity = fill;
        self
    }

    pub(crate) fn lockbox(&self) -> Result<Lockbox> {
        Ok(Lockbox::with_rounds(self.kdf_rounds)?)
    }
}
