use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::media::{CoverImage, LosslessFormat, Persist};
use crate::{CodecOptions, VaultError};

use super::Password;

pub fn prepare() -> HideApi {
    HideApi::default()
}

enum Secret {
    File(PathBuf),
    Data(Zeroizing<Vec<u8>>),
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Secret::File(path) => write!(f, "File({path:?})"),
            Secret::Data(data) => write!(f, "Data({} bytes)", data.len()),
        }
    }
}

#[derive(Default, Debug)]
pub struct HideApi {
    secret: Option<Secret>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// hides the content of this file, replaces any secret set before
    pub fn with_secret_file<A: AsRef<Path>>(mut self, secret_file: A) -> Self {
        self.secret = Some(Secret::File(secret_file.as_ref().to_path_buf()));
        self
    }

    /// hides these bytes, replaces any secret set before
    pub fn with_secret<D: Into<Vec<u8>>>(mut self, secret: D) -> Self {
        self.secret = Some(Secret::Data(Zeroizing::new(secret.into())));
        self
    }

    pub fn with_message(self, message: &str) -> Self {
        self.with_secret(message.as_bytes())
    }

    /// The cover image, PNG or BMP
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// The image with the secret, its extension decides between PNG and BMP
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password, `None` makes `execute` fail with [`VaultError::MissingPassword`]
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the hide process and blocks until it is finished
    pub fn execute(self) -> Result<(), VaultError> {
        self.execute_with_rng(&mut OsRng)
    }

    pub fn execute_with_rng<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<(), VaultError> {
        let Some(image) = self.image.as_deref() else {
            return Err(VaultError::CarrierNotSet);
        };
        let Some(output) = self.output.as_deref() else {
            return Err(VaultError::TargetNotSet);
        };
        let Some(password) = self.password.as_deref() else {
            return Err(VaultError::MissingPassword);
        };
        let secret = match &self.secret {
            None => return Err(VaultError::MissingSecret),
            Some(Secret::Data(data)) => data.clone(),
            Some(Secret::File(path)) => Zeroizing::new(fs::read(path).map_err(|source| {
                error!("Error reading secret file {path:?}: {source}");
                VaultError::ReadError { source }
            })?),
        };

        // an unusable target should not cost a key derivation
        LosslessFormat::from_path(output)?;

        let cover = CoverImage::from_file(image)?;
        let stego =
            crate::hide_with_options(cover.as_image(), &secret, password, &self.options, rng)?;

        CoverImage::from_image(stego).save_as(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_cover_file;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn fast() -> CodecOptions {
        CodecOptions::default().with_kdf_rounds(16)
    }

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = prepare_cover_file(temp_dir.path(), "cover.png", 32, 32);
        let output = temp_dir.path().join("image-with-secret.png");

        crate::api::hide::prepare()
            .with_message("Hello, World!")
            .with_image(&cover)
            .with_password("SuperSecret42")
            .with_options(fast())
            .with_output(&output)
            .execute()
            .expect("Failed to hide message in image");

        assert!(fs::metadata(&output).unwrap().len() > 0);
        let stego = CoverImage::from_file(&output).unwrap();
        assert_eq!(stego.dimensions(), (32, 32));
        assert_eq!(
            crate::reveal_with_options(stego.as_image(), "SuperSecret42", &fast())
                .unwrap(),
            b"Hello, World!"
        );
    }

    #[test]
    fn should_hide_a_file_into_a_bmp() {
        let temp_dir = tempdir().unwrap();
        let cover = prepare_cover_file(temp_dir.path(), "cover.png", 64, 64);
        let secret_file = temp_dir.path().join("secret.txt");
        fs::write(&secret_file, "top secret content").unwrap();
        let output = temp_dir.path().join("stego.bmp");

        prepare()
            .with_image(&cover)
            .with_secret_file(&secret_file)
            .using_password("pw")
            .with_options(fast())
            .with_output(&output)
            .execute_with_rng(&mut StdRng::seed_from_u64(5))
            .unwrap();

        let stego = CoverImage::from_file(&output).unwrap();
        assert_eq!(
            crate::reveal_with_options(stego.as_image(), "pw", &fast())
                .unwrap(),
            b"top secret content"
        );
    }

    #[test]
    fn should_complain_about_missing_parts() {
        assert!(matches!(
            prepare()
                .with_output("out.png")
                .with_message("x")
                .with_password("pw")
                .execute(),
            Err(VaultError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare()
                .with_image("in.png")
                .with_message("x")
                .with_password("pw")
                .execute(),
            Err(VaultError::TargetNotSet)
        ));
        assert!(matches!(
            prepare()
                .with_image("in.png")
                .with_output("out.png")
                .with_message("x")
                .execute(),
            Err(VaultError::MissingPassword)
        ));
        assert!(matches!(
            prepare()
                .with_image("in.png")
                .with_output("out.png")
                .with_password("pw")
                .execute(),
            Err(VaultError::MissingSecret)
        ));
    }

    #[test]
    fn should_not_write_anything_for_a_lossy_target() {
        let temp_dir = tempdir().unwrap();
        let cover = prepare_cover_file(temp_dir.path(), "cover.png", 32, 32);
        let output = temp_dir.path().join("stego.jpg");

        let result = prepare()
            .with_image(&cover)
            .with_message("x")
            .with_password("pw")
            .with_options(fast())
            .with_output(&output)
            .execute();

        assert!(matches!(result, Err(VaultError::UnsupportedImageFormat(_))));
        assert!(!output.exists());
    }

    #[test]
    fn should_not_write_anything_when_the_secret_does_not_fit() {
        let temp_dir = tempdir().unwrap();
        let cover = prepare_cover_file(temp_dir.path(), "cover.png", 8, 8);
        let output = temp_dir.path().join("stego.png");

        let result = prepare()
            .with_image(&cover)
            .with_secret(vec![0u8; 100])
            .with_password("pw")
            .with_options(fast())
            .with_output(&output)
            .execute();

        assert!(matches!(result, Err(VaultError::CapacityExceeded { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn debug_should_not_leak_secret_or_password() {
        let api = prepare()
            .with_message("very secret message")
            .with_password("hunter2");
        let debug = format!("{api:?}");

        assert!(!debug.contains("very secret message"), "{debug}");
        assert!(!debug.contains("hunter2"), "{debug}");
        assert!(debug.contains("19 bytes"), "{debug}");
    }
}
