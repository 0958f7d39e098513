mod codec;
mod crypted;

pub use codec::*;
pub use crypted::*;
