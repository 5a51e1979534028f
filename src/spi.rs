//! [`Interface`] on top of embedded-hal SPI and GPIO.
//!
//! The DACx0004 samples SDIN on the falling edge of SCLK, so the bus should
//! be set up for SPI mode 1 or 2 before handing it over. SYNC can either be
//! a plain GPIO given to the builder, or the SPI peripheral's own hardware
//! chip select, in which case the SYNC pin is simply left out.
//!
//! All pins are configured as outputs by the caller before they go in here.
//! There is no lazy setup on first use.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

use crate::frame::FRAME_LEN;
use crate::interface::{Interface, Line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiError<S, P> {
    Spi(S),
    Pin(P),
    /// Byte count not a multiple of the 4 byte frame. Nothing was sent.
    PartialFrame,
}

/// Placeholder for a control line that isn't wired to a GPIO.
///
/// The type parameter is the error type of the pins that are wired, so that
/// all lines share one error type.
#[derive(Debug)]
pub struct NoPin<P = Infallible>(PhantomData<P>);

impl<P> OutputPin for NoPin<P> {
    type Error = P;

    fn set_low(&mut self) -> Result<(), P> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), P> {
        Ok(())
    }
}

pub struct SpiInterface<SPI, SYNC, LDAC, CLR> {
    spi: SPI,
    sync: Option<SYNC>,
    ldac: Option<LDAC>,
    clr: Option<CLR>,
}

impl<SPI> SpiInterface<SPI, NoPin, NoPin, NoPin> {
    /// SPI only. SYNC is handled by the peripheral, LDAC and CLR are tied
    /// in hardware.
    pub fn new(spi: SPI) -> Self {
        SpiInterface {
            spi,
            sync: None,
            ldac: None,
            clr: None,
        }
    }

    /// Start wiring GPIOs. At least one pin must be given, for none use
    /// [`SpiInterface::new`].
    pub fn builder(spi: SPI) -> Builder<SPI, Unwired, Unwired, Unwired> {
        Builder {
            spi,
            sync: Unwired,
            ldac: Unwired,
            clr: Unwired,
        }
    }
}

impl<SPI, SYNC, LDAC, CLR> SpiInterface<SPI, SYNC, LDAC, CLR> {
    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, Option<SYNC>, Option<LDAC>, Option<CLR>) {
        (self.spi, self.sync, self.ldac, self.clr)
    }
}

impl<SPI, SYNC, LDAC, CLR, S, P> SpiInterface<SPI, SYNC, LDAC, CLR>
where
    SPI: Write<u8, Error = S>,
    SYNC: OutputPin<Error = P>,
{
    fn transfer(&mut self, frame: &[u8]) -> Result<(), SpiError<S, P>> {
        if let Some(sync) = &mut self.sync {
            sync.set_low().map_err(SpiError::Pin)?;
        }

        let sent = self.spi.write(frame).map_err(SpiError::Spi);

        // Release SYNC even if the write failed.
        let released = match &mut self.sync {
            Some(sync) => sync.set_high().map_err(SpiError::Pin),
            None => Ok(()),
        };

        sent.and(released)
    }
}

impl<SPI, SYNC, LDAC, CLR, S, P> Interface for SpiInterface<SPI, SYNC, LDAC, CLR>
where
    SPI: Write<u8, Error = S>,
    SYNC: OutputPin<Error = P>,
    LDAC: OutputPin<Error = P>,
    CLR: OutputPin<Error = P>,
{
    type Error = SpiError<S, P>;

    fn shift(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.len() % FRAME_LEN != 0 {
            return Err(SpiError::PartialFrame);
        }

        // SYNC has to go high between frames, each one is its own transfer.
        for frame in bytes.chunks_exact(FRAME_LEN) {
            self.transfer(frame)?;
        }

        Ok(())
    }

    fn has_line(&self, line: Line) -> bool {
        match line {
            Line::Sync => self.sync.is_some(),
            Line::Ldac => self.ldac.is_some(),
            Line::Clr => self.clr.is_some(),
        }
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        match line {
            Line::Sync => set_level(self.sync.as_mut(), high),
            Line::Ldac => set_level(self.ldac.as_mut(), high),
            Line::Clr => set_level(self.clr.as_mut(), high),
        }
        .map_err(SpiError::Pin)
    }
}

fn set_level<O: OutputPin>(pin: Option<&mut O>, high: bool) -> Result<(), O::Error> {
    match pin {
        Some(pin) if high => pin.set_high(),
        Some(pin) => pin.set_low(),
        None => Ok(()),
    }
}

/// Builder placeholder for a line that hasn't been given a pin.
#[derive(Debug)]
pub struct Unwired;

/// One line of the [`Builder`], either a pin or [`Unwired`].
///
/// `P` is the pin error type. An unwired line takes it from the lines that
/// are wired and ends up as a [`NoPin<P>`].
pub trait Slot<P> {
    type Pin: OutputPin<Error = P>;

    fn into_pin(self) -> Option<Self::Pin>;
}

impl<P> Slot<P> for Unwired {
    type Pin = NoPin<P>;

    fn into_pin(self) -> Option<NoPin<P>> {
        None
    }
}

impl<T, P> Slot<P> for T
where
    T: OutputPin<Error = P>,
{
    type Pin = T;

    fn into_pin(self) -> Option<T> {
        Some(self)
    }
}

/// Builder for [`SpiInterface`]. Lines left out are treated as not wired.
///
/// ```ignore
/// let iface = SpiInterface::builder(spi)
///     .ldac(ldac_pin)
///     .clr(clr_pin)
///     .build();
/// ```
#[derive(Debug)]
pub struct Builder<SPI, SYNC, LDAC, CLR> {
    spi: SPI,
    sync: SYNC,
    ldac: LDAC,
    clr: CLR,
}

impl<SPI, SYNC, LDAC, CLR> Builder<SPI, SYNC, LDAC, CLR> {
    /// SYNC as a GPIO, toggled around every frame.
    pub fn sync<T>(self, pin: T) -> Builder<SPI, T, LDAC, CLR> {
        Builder {
            spi: self.spi,
            sync: pin,
            ldac: self.ldac,
            clr: self.clr,
        }
    }

    pub fn ldac<T>(self, pin: T) -> Builder<SPI, SYNC, T, CLR> {
        Builder {
            spi: self.spi,
            sync: self.sync,
            ldac: pin,
            clr: self.clr,
        }
    }

    pub fn clr<T>(self, pin: T) -> Builder<SPI, SYNC, LDAC, T> {
        Builder {
            spi: self.spi,
            sync: self.sync,
            ldac: self.ldac,
            clr: pin,
        }
    }

    pub fn build<P>(
        self,
    ) -> SpiInterface<SPI, <SYNC as Slot<P>>::Pin, <LDAC as Slot<P>>::Pin, <CLR as Slot<P>>::Pin>
    where
        SYNC: Slot<P>,
        LDAC: Slot<P>,
        CLR: Slot<P>,
    {
        let sync = self.sync.into_pin();
        let ldac = self.ldac.into_pin();
        let clr = self.clr.into_pin();

        info!(
            "spi interface: sync {}, ldac {}, clr {}",
            sync.is_some(),
            ldac.is_some(),
            clr.is_some()
        );

        SpiInterface {
            spi: self.spi,
            sync,
            ldac,
            clr,
        }
    }
}
