use std::fs;
use std::io::{BufRead, Cursor, Seek, Write};
use std::path::Path;

use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, ImageError, ImageFormat};
use log::{debug, error};
use rand::RngCore;

pub use image::RgbImage;

use crate::error::VaultError;
use crate::media::image::{capacity, LsbCodec};
use crate::media::CodecOptions;
use crate::result::Result;

use super::Persist;

/// Container formats that store RGB pixels bit exact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LosslessFormat {
    Png,
    Bmp,
}

impl LosslessFormat {
    /// picks the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = ImageFormat::from_path(path).map_err(|_| {
            VaultError::UnsupportedImageFormat(format!("unknown image file extension of {path:?}"))
        })?;

        Self::try_from(format)
    }
}

impl TryFrom<ImageFormat> for LosslessFormat {
    type Error = VaultError;

    fn try_from(format: ImageFormat) -> Result<Self> {
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Bmp => Ok(Self::Bmp),
            other => Err(VaultError::UnsupportedImageFormat(format!(
                "{other:?} is not a supported lossless format"
            ))),
        }
    }
}

impl From<LosslessFormat> for ImageFormat {
    fn from(format: LosslessFormat) -> Self {
        match format {
            LosslessFormat::Png => ImageFormat::Png,
            LosslessFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

/// An 8 bit RGB raster that carries, or is about to carry, a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage(RgbImage);

impl CoverImage {
    pub fn from_image(img: RgbImage) -> Self {
        Self(img)
    }

    /// Normalizes grey, grey+alpha and RGBA rasters to RGB.
    /// Anything wider than 8 bits per channel would lose information and is refused.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self> {
        match img.color() {
            ColorType::Rgb8 => Ok(Self(match img {
                DynamicImage::ImageRgb8(rgb) => rgb,
                other => other.to_rgb8(),
            })),
            ColorType::L8 | ColorType::La8 | ColorType::Rgba8 => Ok(Self(img.to_rgb8())),
            other => Err(VaultError::UnsupportedImageFormat(format!(
                "{other:?} cannot be represented as 8 bit RGB without loss"
            ))),
        }
    }

    pub fn from_file(f: &Path) -> Result<Self> {
        let reader = ImageReader::open(f).map_err(|source| {
            error!("Error opening image {f:?}: {source}");
            VaultError::ReadError { source }
        })?;

        Self::from_image_reader(reader)
    }

    /// same as [`CoverImage::from_file`] for images that are already in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_image_reader(ImageReader::new(Cursor::new(bytes)))
    }

    fn from_image_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<Self> {
        let reader = reader
            .with_guessed_format()
            .map_err(|source| VaultError::ReadError { source })?;
        let Some(format) = reader.format() else {
            return Err(VaultError::UnsupportedImageFormat(
                "unrecognized image data".to_string(),
            ));
        };
        LosslessFormat::try_from(format)?;

        let img = reader.decode().map_err(|e| {
            error!("Error decoding image: {e}");
            match e {
                ImageError::Unsupported(e) => VaultError::UnsupportedImageFormat(e.to_string()),
                ImageError::IoError(source) => VaultError::ReadError { source },
                _ => VaultError::InvalidImageMedia,
            }
        })?;

        Self::from_dynamic_image(img)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn capacity_bits(&self) -> u64 {
        capacity::capacity_bits(&self.0)
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.0
    }

    pub fn into_image(self) -> RgbImage {
        self.0
    }

    /// Embeds `payload` into the least significant bits
    /// and randomizes the lowest bit of every channel after it.
    /// Nothing is modified if the payload does not fit.
    pub fn hide_data<R: RngCore + ?Sized>(
        &mut self,
        payload: &[u8],
        opts: &CodecOptions,
        rng: &mut R,
    ) -> Result<&mut Self> {
        let (width, height) = self.dimensions();
        let capacity_bits = self.capacity_bits();
        capacity::validate(capacity::payload_bits(payload.len()), capacity_bits)?;
        debug!(
            "hiding {} payload bytes in {width}x{height} pixels with {capacity_bits} bits capacity",
            payload.len()
        );

        let mut encoder = LsbCodec::encoder(&mut self.0);
        encoder.write_all(payload).map_err(|e| {
            error!("Error encoding image: {e}, kind {}", e.kind());
            match e.kind() {
                std::io::ErrorKind::WriteZero => VaultError::CapacityExceeded {
                    needed_bits: capacity::payload_bits(payload.len()),
                    capacity_bits,
                },
                _ => VaultError::ImageEncodingError,
            }
        })?;

        if opts.fill_unused_capacity {
            let filled = encoder.fill_with_noise(rng);
            debug!("filled {filled} unused channels with noise");
        }

        Ok(self)
    }

    pub fn save_to_writer<W: Write + Seek>(
        &self,
        mut writer: W,
        format: LosslessFormat,
    ) -> Result<()> {
        self.0
            .write_to(&mut writer, ImageFormat::from(format))
            .map_err(|e| {
                error!("Error saving image: {e}");
                VaultError::ImageEncodingError
            })
    }

    /// encodes the whole image into memory
    pub fn to_bytes(&self, format: LosslessFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.save_to_writer(&mut buffer, format)?;

        Ok(buffer.into_inner())
    }
}

impl Persist for CoverImage {
    /// The image is encoded completely before the file gets created,
    /// a failing encoder leaves no half written file behind.
    fn save_as(&self, file: &Path) -> Result<()> {
        let format = LosslessFormat::from_path(file)?;
        let bytes = self.to_bytes(format)?;

        fs::write(file, bytes).map_err(|e| {
            error!("Error writing file {file:?}: {e}");
            VaultError::WriteError { source: e }
        })
    }
}
