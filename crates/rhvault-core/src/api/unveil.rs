use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use crate::media::CoverImage;
use crate::{CodecOptions, VaultError};

use super::Password;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, `kdf_rounds` has to match the ones used for hiding
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the file the secret will be saved to
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    /// Set the password the secret was hidden with
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Unveils the secret and returns it instead of writing it to a file
    pub fn reveal(&self) -> Result<Vec<u8>, VaultError> {
        let Some(secret_media) = self.secret_media.as_deref() else {
            return Err(VaultError::CarrierNotSet);
        };
        let Some(password) = self.password.as_deref() else {
            return Err(VaultError::MissingPassword);
        };

        let stego = CoverImage::from_file(secret_media)?;
        crate::reveal_with_options(stego.as_image(), password, &self.options)
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<(), VaultError> {
        let Some(output_file) = self.output_file.as_deref() else {
            return Err(VaultError::TargetNotSet);
        };

        let secret = zeroize::Zeroizing::new(self.reveal()?);
        fs::write(output_file, secret.as_slice()).map_err(|source| {
            error!("Error writing secret to {output_file:?}: {source}");
            VaultError::WriteError { source }
        })
    }
}
