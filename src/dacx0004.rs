//! Driver for the DAC80004/DAC70004/DAC60004 quad channel DACs.
//!
//! Datasheet here: <https://www.ti.com/lit/ds/symlink/dac80004.pdf>

use core::convert::TryInto;

use crate::command::{Address, ClearMode, Command, PowerMode, ShiftRegister};
use crate::error::Error;
use crate::frame::Frame;
use crate::interface::{Interface, Line};
use crate::variant::Variant;

/// Levels the control lines are put at on init: CLR inactive, LDAC low so
/// writes go straight to the outputs, and SYNC deselected.
const IDLE_LINES: [(Line, bool); 3] = [(Line::Clr, true), (Line::Ldac, false), (Line::Sync, true)];

pub struct Dacx0004<I> {
    iface: I,
    variant: Variant,
}

impl<I, E> Dacx0004<I>
where
    I: Interface<Error = E>,
{
    /// Set up a driver for `variant` talking through `iface`.
    ///
    /// `variant` is either a [`Variant`] or a raw `u8` tag. Control lines the
    /// interface has wired are driven to their idle levels. To keep ownership
    /// of the interface, pass `&mut iface`.
    pub fn init<V>(variant: V, mut iface: I) -> Result<Self, Error<E>>
    where
        V: TryInto<Variant>,
        Error<E>: From<V::Error>,
    {
        if !iface.is_ready() {
            return Err(Error::InvalidArgument);
        }
        let variant = variant.try_into()?;

        info!("init {:?}", variant);

        for (line, high) in IDLE_LINES.iter() {
            if iface.has_line(*line) {
                debug!("set {:?} {}", line, if *high { "high" } else { "low" });
                iface.set_line(*line, *high).map_err(Error::Interface)?;
            }
        }

        Ok(Dacx0004 { iface, variant })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn interface(&self) -> &I {
        &self.iface
    }

    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.iface
    }

    /// Give back the interface.
    pub fn release(self) -> I {
        self.iface
    }

    /// Encode `sr` and shift it out as one frame.
    pub fn write(&mut self, sr: &ShiftRegister) -> Result<(), Error<E>> {
        if !self.iface.is_ready() {
            return Err(Error::InvalidArgument);
        }

        let frame = Frame::encode(sr, self.variant);
        debug!("write {:02x?}", frame.0);

        self.iface.shift(frame.as_bytes()).map_err(Error::Interface)
    }

    /// Encode `sr` into `dest` without sending anything, for callers that do
    /// their own transfers (DMA etc).
    ///
    /// `dest` gets as many whole frames as fit, then the leading bytes of one
    /// more frame if there is space left. Returns the number of whole frames.
    pub fn format(&self, sr: &ShiftRegister, dest: &mut [u8]) -> usize {
        Frame::encode(sr, self.variant).fill(dest)
    }

    /// Write `value` to the buffer of `addr`, output unchanged until updated.
    pub fn write_buffer(&mut self, addr: Address, value: u16) -> Result<(), Error<E>> {
        self.write(&ShiftRegister::new(Command::WriteBuffer).address(addr).data(value))
    }

    /// Move the buffer of `addr` to its output.
    pub fn update(&mut self, addr: Address) -> Result<(), Error<E>> {
        self.write(&ShiftRegister::new(Command::Update).address(addr))
    }

    /// Write `value` to `addr` and update its output.
    pub fn write_update(&mut self, addr: Address, value: u16) -> Result<(), Error<E>> {
        self.write(&ShiftRegister::new(Command::WriteUpdate).address(addr).data(value))
    }

    /// Write `value` to `addr` and update all outputs.
    pub fn write_update_all(&mut self, addr: Address, value: u16) -> Result<(), Error<E>> {
        self.write(
            &ShiftRegister::new(Command::WriteUpdateAll)
                .address(addr)
                .data(value),
        )
    }

    pub fn power(&mut self, addr: Address, mode: PowerMode) -> Result<(), Error<E>> {
        info!("power {:?} {:?}", addr, mode);
        self.write(&ShiftRegister::new(Command::Power).address(addr).mode(mode))
    }

    /// Where the outputs go on a clear.
    pub fn clear_mode(&mut self, mode: ClearMode) -> Result<(), Error<E>> {
        info!("clear mode {:?}", mode);
        self.write(&ShiftRegister::new(Command::ClearModeRegister).mode(mode))
    }

    pub fn software_reset(&mut self) -> Result<(), Error<E>> {
        info!("software reset");
        self.write(&ShiftRegister::new(Command::SoftwareReset))
    }

    pub fn software_clear(&mut self) -> Result<(), Error<E>> {
        self.write(&ShiftRegister::new(Command::SoftwareClear))
    }

    pub fn nop(&mut self) -> Result<(), Error<E>> {
        self.write(&ShiftRegister::new(Command::Nop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Callbacks;

    /// Records everything the driver does to it.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<u8>,
        lines: Vec<(Line, bool)>,
        wired: &'static [Line],
        fail_on: Option<Line>,
        fail_shift: bool,
        unplugged: bool,
    }

    impl Interface for Recorder {
        type Error = &'static str;

        fn shift(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            if self.fail_shift {
                return Err("bus");
            }
            self.frames.extend_from_slice(bytes);
            Ok(())
        }

        fn is_ready(&self) -> bool {
            !self.unplugged
        }

        fn has_line(&self, line: Line) -> bool {
            self.wired.contains(&line)
        }

        fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
            if self.fail_on == Some(line) {
                return Err("pin");
            }
            self.lines.push((line, high));
            Ok(())
        }
    }

    const ALL_LINES: &[Line] = &[Line::Sync, Line::Ldac, Line::Clr];

    #[test]
    fn init_primes_lines_in_order() {
        let mut rec = Recorder {
            wired: ALL_LINES,
            ..Default::default()
        };
        Dacx0004::init(Variant::Dac80004, &mut rec).unwrap();
        assert_eq!(
            rec.lines,
            [(Line::Clr, true), (Line::Ldac, false), (Line::Sync, true)]
        );
        assert!(rec.frames.is_empty());
    }

    #[test]
    fn init_skips_unwired_lines() {
        let mut rec = Recorder {
            wired: &[Line::Ldac],
            ..Default::default()
        };
        Dacx0004::init(Variant::Dac60004, &mut rec).unwrap();
        assert_eq!(rec.lines, [(Line::Ldac, false)]);

        let mut rec = Recorder::default();
        Dacx0004::init(Variant::Dac60004, &mut rec).unwrap();
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn init_raw_tags() {
        let mut rec = Recorder::default();
        let dac = Dacx0004::init(1_u8, &mut rec).unwrap();
        assert_eq!(dac.variant(), Variant::Dac70004);

        let err = Dacx0004::init(3_u8, &mut rec).err();
        assert_eq!(err, Some(Error::UnknownVersion(3)));
    }

    #[test]
    fn init_rejects_before_touching_lines() {
        let mut rec = Recorder {
            wired: ALL_LINES,
            ..Default::default()
        };
        assert!(Dacx0004::init(7_u8, &mut rec).is_err());
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn init_stops_on_first_line_error() {
        let mut rec = Recorder {
            wired: ALL_LINES,
            fail_on: Some(Line::Ldac),
            ..Default::default()
        };
        let err = Dacx0004::init(Variant::Dac80004, &mut rec).err();
        assert_eq!(err, Some(Error::Interface("pin")));
        assert_eq!(rec.lines, [(Line::Clr, true)]);
    }

    #[test]
    fn init_not_ready_is_invalid() {
        let mut rec = Recorder {
            wired: ALL_LINES,
            unplugged: true,
            ..Default::default()
        };
        assert_eq!(
            Dacx0004::init(Variant::Dac80004, &mut rec).err(),
            Some(Error::InvalidArgument)
        );
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn write_shifts_one_frame() {
        let mut rec = Recorder::default();
        let mut dac = Dacx0004::init(Variant::Dac80004, &mut rec).unwrap();
        dac.write_update(Address::A, 0x1234).unwrap();
        drop(dac);
        assert_eq!(rec.frames, [0x03, 0x01, 0x23, 0x40]);
    }

    #[test]
    fn write_not_ready_is_invalid() {
        let mut rec = Recorder::default();
        let mut dac = Dacx0004::init(Variant::Dac80004, &mut rec).unwrap();
        dac.interface_mut().unplugged = true;

        assert_eq!(dac.nop(), Err(Error::InvalidArgument));

        // format still works, it never touches the interface.
        let mut buf = [0_u8; 4];
        assert_eq!(dac.format(&ShiftRegister::new(Command::Nop), &mut buf), 1);

        drop(dac);
        assert!(rec.frames.is_empty());
    }

    #[test]
    fn write_passes_shift_error_through() {
        let mut rec = Recorder {
            fail_shift: true,
            ..Default::default()
        };
        let mut dac = Dacx0004::init(Variant::Dac80004, &mut rec).unwrap();

        assert_eq!(dac.write_update(Address::A, 0x1234), Err(Error::Interface("bus")));
    }

    #[test]
    fn callbacks_error_passed_through() {
        fn shift(_: &[u8], _: &mut ()) -> Result<(), i32> {
            Err(42)
        }

        let mut dac = Dacx0004::init(Variant::Dac80004, Callbacks::new(shift, ())).unwrap();
        assert_eq!(dac.nop(), Err(Error::Interface(42)));
    }

    #[test]
    fn format_does_not_shift() {
        let mut rec = Recorder::default();
        let dac = Dacx0004::init(Variant::Dac80004, &mut rec).unwrap();

        let mut buf = [0_u8; 10];
        let full = dac.format(&ShiftRegister::new(Command::Nop), &mut buf);
        assert_eq!(full, 2);
        assert_eq!(buf, [0x0e, 0, 0, 0, 0x0e, 0, 0, 0, 0x0e, 0]);

        drop(dac);
        assert!(rec.frames.is_empty());
    }

    #[test]
    fn convenience_commands() {
        let mut rec = Recorder::default();
        let mut dac = Dacx0004::init(Variant::Dac60004, &mut rec).unwrap();

        dac.write_buffer(Address::D, 0xfff0).unwrap();
        dac.update(Address::D).unwrap();
        dac.write_update_all(Address::B, 0x8000).unwrap();
        dac.power(Address::All, PowerMode::HiZ).unwrap();
        dac.clear_mode(ClearMode::Mid).unwrap();
        dac.software_reset().unwrap();
        dac.software_clear().unwrap();
        drop(dac);

        assert_eq!(
            rec.frames,
            [
                0x00, 0x3f, 0xff, 0x00, // write buffer D
                0x01, 0x30, 0x00, 0x00, // update D
                0x02, 0x18, 0x00, 0x00, // write B, update all
                0x04, 0xf0, 0x00, 0x03, // power down all, hi-z
                0x05, 0x00, 0x00, 0x01, // clear to mid
                0x07, 0x00, 0x00, 0x00, // reset
                0x0b, 0x00, 0x00, 0x00, // clear
            ]
        );
    }
}
