/// writes one bit into the least significant bit of a color channel
pub trait HideBit {
    fn hide_bit(&mut self, bit: bool);
}

/// reads the least significant bit of a color channel
pub trait UnveilBit {
    fn unveil_bit(&self) -> bool;
}

impl HideBit for u8 {
    #[inline(always)]
    fn hide_bit(&mut self, bit: bool) {
        *self = (*self & (u8::MAX - 1)) | u8::from(bit);
    }
}

impl UnveilBit for u8 {
    #[inline(always)]
    fn unveil_bit(&self) -> bool {
        self & 1 == 1
    }
}
