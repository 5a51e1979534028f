//! The three members of the DACx0004 family.
//!
//! All three share the same 32 bit shift register. They only differ in how
//! many bits of the 16 bit data slot are significant. The data is always
//! left-justified, so a 12 bit part reads the top 12 bits and ignores the rest.

use core::convert::TryFrom;

/// Which chip we are talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Variant {
    /// DAC80004, 16 bit.
    Dac80004 = 0,
    /// DAC70004, 14 bit.
    Dac70004 = 1,
    /// DAC60004, 12 bit.
    Dac60004 = 2,
}

/// A variant tag that doesn't name any known chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariant(pub u8);

impl Variant {
    /// Number of significant data bits.
    pub const fn resolution(self) -> u8 {
        match self {
            Variant::Dac80004 => 16,
            Variant::Dac70004 => 14,
            Variant::Dac60004 => 12,
        }
    }

    /// Number of don't-care bits at the bottom of the data slot.
    pub const fn padding(self) -> u8 {
        16 - self.resolution()
    }

    /// Mask selecting the significant bits of a left-justified data value.
    pub const fn data_mask(self) -> u16 {
        0xffff << self.padding()
    }

    /// Largest right-aligned output code, i.e. full scale.
    pub const fn max_code(self) -> u16 {
        0xffff >> self.padding()
    }

    /// Left-justify a right-aligned output code into the data slot.
    ///
    /// Bits above [`Variant::max_code`] are shifted out.
    pub const fn justify(self, code: u16) -> u16 {
        code << self.padding()
    }
}

impl From<Variant> for u8 {
    fn from(v: Variant) -> Self {
        v as u8
    }
}

impl TryFrom<u8> for Variant {
    type Error = UnknownVariant;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Variant::Dac80004),
            1 => Ok(Variant::Dac70004),
            2 => Ok(Variant::Dac60004),
            _ => Err(UnknownVariant(tag)),
        }
    }
}
