//! Driver for the Texas Instruments DAC80004, DAC70004 and DAC60004.
//!
//! Quad channel 16/14/12 bit DACs with a 32 bit SPI shift register. The
//! driver packs commands into frames and hands them to an [`Interface`],
//! either [`SpiInterface`] on top of embedded-hal or anything else that can
//! shift bytes out.
//!
//! ```ignore
//! let iface = SpiInterface::builder(spi).ldac(ldac).clr(clr).build();
//! let mut dac = Dacx0004::init(Variant::Dac80004, iface)?;
//!
//! // Data is left-justified, 0x8000 is mid scale on all three parts.
//! dac.write_update(Address::A, 0x8000)?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod command;
mod dacx0004;
mod error;
mod frame;
mod interface;
mod spi;
mod variant;

pub use crate::command::{Address, ClearMode, Command, PowerMode, ReadWrite, ShiftRegister};
pub use crate::dacx0004::Dacx0004;
pub use crate::error::Error;
pub use crate::frame::{Frame, FRAME_LEN};
pub use crate::interface::{Callbacks, Interface, LevelFn, Line, ShiftFn};
pub use crate::spi::{Builder, NoPin, Slot, SpiError, SpiInterface, Unwired};
pub use crate::variant::{UnknownVariant, Variant};
