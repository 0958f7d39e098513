//! Capacity arithmetic for RGB carriers: one bit in every color channel byte.

use image::RgbImage;

use crate::error::VaultError;
use crate::media::payload::PAYLOAD_OVERHEAD;
use crate::result::Result;

/// R, G and B each carry one bit
pub const BITS_PER_PIXEL: u64 = 3;

/// number of bits `image` can carry
pub fn capacity_bits(image: &RgbImage) -> u64 {
    let (width, height) = image.dimensions();
    capacity_bits_for(width, height)
}

pub fn capacity_bits_for(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * BITS_PER_PIXEL
}

/// number of bits a payload of `payload_len` bytes occupies
pub fn payload_bits(payload_len: usize) -> u64 {
    payload_len as u64 * 8
}

/// Checks that `payload_bits` fit into `capacity_bits`.
/// Has to run before the first pixel gets mutated.
pub fn validate(payload_bits: u64, capacity_bits: u64) -> Result<()> {
    if payload_bits > capacity_bits {
        return Err(VaultError::CapacityExceeded {
            needed_bits: payload_bits,
            capacity_bits,
        });
    }

    Ok(())
}

/// the biggest secret in bytes that still fits into `image`,
/// after length header and encryption overhead
pub fn max_secret_len(image: &RgbImage) -> usize {
    let capacity_bytes = capacity_bits(image) / 8;
    usize::try_from(capacity_bytes)
        .unwrap_or(usize::MAX)
        .saturating_sub(PAYLOAD_OVERHEAD)
}

/// side length of the smallest square RGB image that offers `payload_bits`
pub fn required_square_side(payload_bits: u64) -> u64 {
    let pixels = payload_bits.div_ceil(BITS_PER_PIXEL);
    // the float root is a first guess and can be off by one for large values
    let mut side = (pixels as f64).sqrt() as u64;
    while side > 0 && covers(side - 1, pixels) {
        side -= 1;
    }
    while !covers(side, pixels) {
        side += 1;
    }

    side
}

fn covers(side: u64, pixels: u64) -> bool {
    side.checked_mul(side).map_or(true, |area| area >= pixels)
}
