use std::io::Read;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::debug;

use crate::error::VaultError;
use crate::result::Result;

/// the big endian `u32` in front of every payload
pub const LENGTH_HEADER_LEN: usize = 4;

pub trait PayloadEncoder {
    fn encode(&self, content: &[u8]) -> Result<Vec<u8>>;

    /// size of what `encode` produces for `content_len` bytes of content
    fn encoded_size(&self, content_len: usize) -> usize;
}

pub trait PayloadDecoder {
    /// `available` is the number of bytes `content` can still deliver at most
    fn decode(&self, content: &mut dyn Read, available: u64) -> Result<Vec<u8>>;
}

pub trait PayloadCodec: PayloadEncoder + PayloadDecoder {}

/// Prepends the content length, so the decoder knows where the data ends and the noise begins
/// ```text
/// | length: u32 big endian | content (length bytes) |
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PayloadWithLengthHeader;

impl PayloadEncoder for PayloadWithLengthHeader {
    fn encode(&self, content: &[u8]) -> Result<Vec<u8>> {
        frame(content)
    }

    fn encoded_size(&self, content_len: usize) -> usize {
        LENGTH_HEADER_LEN + content_len
    }
}

impl PayloadDecoder for PayloadWithLengthHeader {
    fn decode(&self, content: &mut dyn Read, available: u64) -> Result<Vec<u8>> {
        read_framed(content, available)
    }
}

impl PayloadCodec for PayloadWithLengthHeader {}

/// wraps `blob` into a payload: `BE-u32(len(blob)) ‖ blob`
pub fn frame(blob: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(blob.len()).map_err(|_| VaultError::CapacityExceeded {
        needed_bits: (LENGTH_HEADER_LEN as u64 + blob.len() as u64) * 8,
        capacity_bits: (LENGTH_HEADER_LEN as u64 + u64::from(u32::MAX)) * 8,
    })?;

    let mut buffer = Vec::with_capacity(LENGTH_HEADER_LEN + blob.len());
    buffer.write_u32::<BigEndian>(len)?;
    buffer.extend_from_slice(blob);

    Ok(buffer)
}

/// Reads the length header and then exactly the announced number of bytes, never more.
///
/// A length that exceeds what is left of the `available` bytes is refused
/// before anything beyond the header is read.
pub fn read_framed<R: Read + ?Sized>(reader: &mut R, available: u64) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(LENGTH_HEADER_LEN);
    Read::take(&mut *reader, LENGTH_HEADER_LEN as u64).read_to_end(&mut header)?;
    if header.len() < LENGTH_HEADER_LEN {
        return Err(VaultError::TruncatedPayload {
            declared: LENGTH_HEADER_LEN as u64,
            available: header.len() as u64,
        });
    }

    let declared = u64::from(BigEndian::read_u32(&header));
    let remaining = available.saturating_sub(LENGTH_HEADER_LEN as u64);
    debug!("length header announces {declared} of at most {remaining} bytes");
    if declared > remaining {
        return Err(VaultError::TruncatedPayload {
            declared,
            available: remaining,
        });
    }

    let mut blob = Vec::with_capacity(declared as usize);
    Read::take(&mut *reader, declared).read_to_end(&mut blob)?;
    if (blob.len() as u64) < declared {
        return Err(VaultError::TruncatedPayload {
            declared,
            available: blob.len() as u64,
        });
    }

    Ok(blob)
}

/// Splits a payload into the announced length and exactly that many bytes of `rest`.
/// Anything after them is ignored.
pub fn unframe(header: [u8; LENGTH_HEADER_LEN], rest: &[u8]) -> Result<(usize, &[u8])> {
    let declared = BigEndian::read_u32(&header);
    match usize::try_from(declared) {
        Ok(len) if len <= rest.len() => Ok((len, &rest[..len])),
        _ => Err(VaultError::TruncatedPayload {
            declared: u64::from(declared),
            available: rest.len() as u64,
        }),
    }
}
