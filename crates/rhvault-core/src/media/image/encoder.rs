use std::io::{Cursor, Result, Write};
use std::slice::IterMut;

use bitstream_io::{BigEndian, BitRead, BitReader};
use image::RgbImage;
use rand::RngCore;

use crate::media::HideBit;

/// LSB sink for `RgbImage`s, implements `Write`.
///
/// The raster is walked as one flat byte sequence: rows top to bottom, pixels left to right,
/// channels R, G, B. Every byte written occupies the lowest bit of 8 consecutive channels,
/// most significant bit first.
///
/// ## Example of usage
/// ```rust
/// use std::io::Write;
/// use image::RgbImage;
/// use rhvault_core::media::image::encoder::ImageRgbColorMut;
///
/// let mut image = RgbImage::new(4, 4);
/// ImageRgbColorMut::new(&mut image)
///     .write_all(&[0b1000_0001])
///     .expect("Cannot write secret byte");
///
/// assert_eq!(image.as_raw()[..8], [1, 0, 0, 0, 0, 0, 0, 1]);
/// ```
pub struct ImageRgbColorMut<'a> {
    colors: IterMut<'a, u8>,
}

impl<'a> ImageRgbColorMut<'a> {
    pub fn new(carrier: &'a mut RgbImage) -> Self {
        let colors: &'a mut [u8] = carrier;
        Self {
            colors: colors.iter_mut(),
        }
    }

    /// number of color channels not written yet
    pub fn remaining_bits(&self) -> usize {
        self.colors.len()
    }

    /// Overwrites the lowest bit of every remaining channel with a random bit.
    /// Returns the number of channels touched.
    pub fn fill_with_noise<R: RngCore + ?Sized>(self, rng: &mut R) -> usize {
        let colors = self.colors.into_slice();
        let mut noise = vec![0u8; colors.len().div_ceil(8)];
        rng.fill_bytes(&mut noise);

        for (chunk, random) in colors.chunks_mut(8).zip(noise) {
            for (i, color) in chunk.iter_mut().enumerate() {
                color.hide_bit((random >> i) & 1 == 1);
            }
        }

        colors.len()
    }
}

impl Write for ImageRgbColorMut<'_> {
    /// only whole bytes are written, a carrier with less than 8 channels left accepts nothing
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let whole_bytes = buf.len().min(self.colors.len() / 8);
        let mut bits = BitReader::endian(Cursor::new(&buf[..whole_bytes]), BigEndian);

        for color in self.colors.by_ref().take(whole_bytes * 8) {
            color.hide_bit(bits.read_bit()?);
        }

        Ok(whole_bytes)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
