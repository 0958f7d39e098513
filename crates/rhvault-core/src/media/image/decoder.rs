use std::io::{Read, Result};
use std::slice::ChunksExact;

use image::RgbImage;

use crate::media::UnveilBit;

/// LSB source for `RgbImage`s, implements `Read`.
///
/// Walks the raster in the same order as [`ImageRgbColorMut`](super::encoder::ImageRgbColorMut)
/// and packs the lowest bits of 8 channels into one byte, most significant bit first.
/// Nothing is read ahead, a consumer that stops reading leaves the rest of the image untouched.
///
/// ## Example of usage
/// ```rust
/// use std::io::{Read, Write};
/// use image::RgbImage;
/// use rhvault_core::media::image::decoder::ImageRgbColor;
/// use rhvault_core::media::image::encoder::ImageRgbColorMut;
///
/// let mut image = RgbImage::new(8, 8);
/// ImageRgbColorMut::new(&mut image)
///     .write_all(b"Hi")
///     .expect("Cannot write secret");
///
/// let mut secret = [0; 2];
/// ImageRgbColor::new(&image)
///     .read_exact(&mut secret)
///     .expect("Cannot read 2 bytes from decoder");
/// assert_eq!(&secret, b"Hi");
/// ```
pub struct ImageRgbColor<'i> {
    colors: ChunksExact<'i, u8>,
}

impl<'i> ImageRgbColor<'i> {
    pub fn new(input: &'i RgbImage) -> Self {
        Self {
            colors: input.as_raw().chunks_exact(8),
        }
    }

    /// number of whole bytes that can still be read
    pub fn remaining_bytes(&self) -> usize {
        self.colors.len()
    }
}

impl Read for ImageRgbColor<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut read = 0;
        for (byte, colors) in buf.iter_mut().zip(self.colors.by_ref()) {
            *byte = colors
                .iter()
                .fold(0, |acc, color| (acc << 1) | u8::from(color.unveil_bit()));
            read += 1;
        }

        Ok(read)
    }
}
