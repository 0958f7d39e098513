use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use crate::media::CoverImage;
use crate::VaultError;

pub fn prepare() -> UnveilRawApi {
    UnveilRawApi::default()
}

/// Dumps the encrypted blob of an image, no password involved.
#[derive(Default, Debug)]
pub struct UnveilRawApi {
    secret_media: Option<PathBuf>,
    destination_file: Option<PathBuf>,
}

impl UnveilRawApi {
    /// This is the secret image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the raw file where the blob will be saved to
    pub fn into_raw_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<(), VaultError> {
        let Some(secret_media) = self.secret_media else {
            return Err(VaultError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(VaultError::TargetNotSet);
        };

        let stego = CoverImage::from_file(&secret_media)?;
        let blob = crate::extract_blob(stego.as_image())?;

        fs::write(&destination_file, blob).map_err(|source| {
            error!("Error writing blob to {destination_file:?}: {source}");
            VaultError::WriteError { source }
        })
    }
}
