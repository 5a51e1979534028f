//! The seam between the driver and whatever moves bits on the board.

/// The auxiliary control lines next to SCLK and SDIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Chip select. Low while a frame is shifted in.
    Sync,
    /// Load DAC. Tie low (or drive low) for writes to take effect immediately.
    Ldac,
    /// Clear. Active low, so high in normal operation.
    Clr,
}

/// Platform interface used by [`Dacx0004`](crate::Dacx0004).
///
/// Only `shift` is required. A board that doesn't route a control line to a
/// GPIO leaves `has_line` returning `false` for it, and the driver won't touch
/// it. In that case the hardware must hold the line at its idle level (CLR
/// high, LDAC low).
pub trait Interface {
    type Error;

    /// Shift `bytes` out MSB first. SYNC must be asserted around every 32 bit
    /// frame and released afterwards.
    fn shift(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Whether there is anything to shift into, for example a bus that can be
    /// detached. The driver refuses to `init` or `write` while this is false.
    fn is_ready(&self) -> bool {
        true
    }

    fn has_line(&self, _line: Line) -> bool {
        false
    }

    /// Drive `line` high or low. Only called when `has_line` is true.
    fn set_line(&mut self, _line: Line, _high: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn shift(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).shift(bytes)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn has_line(&self, line: Line) -> bool {
        (**self).has_line(line)
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        (**self).set_line(line, high)
    }
}

pub type ShiftFn<C, E> = fn(bytes: &[u8], ctx: &mut C) -> Result<(), E>;
pub type LevelFn<C, E> = fn(high: bool, ctx: &mut C) -> Result<(), E>;

/// Function table interface, for glue code that already has free functions
/// for the bus and pins.
///
/// `context` is handed to every call, which is how several chips can share
/// the same functions. `shift` is required, the control lines are optional.
///
/// ```
/// use dacx0004::{Callbacks, Dacx0004, Variant};
///
/// fn shift(bytes: &[u8], sent: &mut usize) -> Result<(), ()> {
///     *sent += bytes.len();
///     Ok(())
/// }
///
/// let cb = Callbacks::new(shift, 0_usize);
/// let dac = Dacx0004::init(Variant::Dac80004, cb).unwrap();
/// assert_eq!(dac.interface().context, 0);
/// ```
pub struct Callbacks<C, E> {
    pub shift: ShiftFn<C, E>,
    pub set_sync: Option<LevelFn<C, E>>,
    pub set_ldac: Option<LevelFn<C, E>>,
    pub set_clr: Option<LevelFn<C, E>>,
    pub context: C,
}

impl<C, E> Callbacks<C, E> {
    /// Only the required shift function, no control lines.
    pub fn new(shift: ShiftFn<C, E>, context: C) -> Self {
        Callbacks {
            shift,
            set_sync: None,
            set_ldac: None,
            set_clr: None,
            context,
        }
    }

    fn level_fn(&self, line: Line) -> Option<LevelFn<C, E>> {
        match line {
            Line::Sync => self.set_sync,
            Line::Ldac => self.set_ldac,
            Line::Clr => self.set_clr,
        }
    }
}

impl<C, E> Interface for Callbacks<C, E> {
    type Error = E;

    fn shift(&mut self, bytes: &[u8]) -> Result<(), E> {
        (self.shift)(bytes, &mut self.context)
    }

    fn has_line(&self, line: Line) -> bool {
        self.level_fn(line).is_some()
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), E> {
        match self.level_fn(line) {
            Some(f) => f(high, &mut self.context),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Ctx {
        shifted: Vec<u8>,
        ldac: Option<bool>,
    }

    fn shift(bytes: &[u8], ctx: &mut Ctx) -> Result<(), ()> {
        ctx.shifted.extend_from_slice(bytes);
        Ok(())
    }

    fn ldac(high: bool, ctx: &mut Ctx) -> Result<(), ()> {
        ctx.ldac = Some(high);
        Ok(())
    }

    #[test]
    fn callbacks_pass_context() {
        let mut cb = Callbacks::new(shift, Ctx::default());
        cb.set_ldac = Some(ldac);

        assert!(cb.is_ready());
        assert!(cb.has_line(Line::Ldac));
        assert!(!cb.has_line(Line::Sync));
        assert!(!cb.has_line(Line::Clr));

        cb.shift(&[1, 2, 3, 4]).unwrap();
        cb.set_line(Line::Ldac, false).unwrap();

        assert_eq!(cb.context.shifted, [1, 2, 3, 4]);
        assert_eq!(cb.context.ldac, Some(false));
    }

    #[test]
    fn callbacks_shift_error_passed_through() {
        fn broken(_: &[u8], tries: &mut u32) -> Result<(), u32> {
            *tries += 1;
            Err(42)
        }

        let mut cb = Callbacks::new(broken, 0);
        assert_eq!(cb.shift(&[1, 2, 3, 4]), Err(42));
        assert_eq!(cb.context, 1);
    }

    #[test]
    fn borrowed_interface_forwards() {
        fn push<I: Interface>(mut i: I) -> Result<(), I::Error> {
            assert!(i.is_ready());
            i.shift(&[9])
        }

        let mut cb = Callbacks::new(shift, Ctx::default());
        push(&mut cb).unwrap();
        push(&mut cb).unwrap();
        assert_eq!(cb.context.shifted, [9, 9]);
    }
}
