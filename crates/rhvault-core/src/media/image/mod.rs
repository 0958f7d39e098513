pub mod capacity;
pub mod decoder;
pub mod encoder;
pub mod lsb_codec;

pub use capacity::{capacity_bits, max_secret_len};
pub use lsb_codec::LsbCodec;
