use image::RgbImage;

use super::decoder::ImageRgbColor;
use super::encoder::ImageRgbColorMut;

/// Factory for decoder and encoder
pub struct LsbCodec;

impl LsbCodec {
    /// builds a LSB Image Decoder that implements Read
    pub fn decoder(input: &RgbImage) -> ImageRgbColor<'_> {
        ImageRgbColor::new(input)
    }

    /// builds a LSB Image Encoder that implements Write
    pub fn encoder(carrier: &mut RgbImage) -> ImageRgbColorMut<'_> {
        ImageRgbColorMut::new(carrier)
    }
}
