//! Logical contents of one shift register write.
//!
//! ```ignore
//! d31-d29 d28 d27-d24 d23-d20 d19-d4 d3-d0
//!   X X X  RW  command address  data   mode
//! ```

/// R/W bit. Only writes are meaningful, there is no read back path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadWrite {
    Write = 0,
    Read = 1,
}

impl Default for ReadWrite {
    fn default() -> Self {
        ReadWrite::Write
    }
}

/// The command field. Values 9, 12 and 15 are reserved by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Write to buffer n.
    WriteBuffer = 0x0,
    /// Update DAC n from its buffer.
    Update = 0x1,
    /// Write to buffer n and update all DACs (software LDAC).
    WriteUpdateAll = 0x2,
    /// Write to buffer n and update DAC n.
    WriteUpdate = 0x3,
    /// Power up/down DAC n, power mode in the mode field.
    Power = 0x4,
    /// Clear mode register, clear mode in the mode field.
    ClearModeRegister = 0x5,
    LdacRegister = 0x6,
    SoftwareReset = 0x7,
    DisableSdo = 0x8,
    ShortCircuitLimit = 0xa,
    SoftwareClear = 0xb,
    StatusRegister = 0xd,
    Nop = 0xe,
}

impl From<Command> for u8 {
    fn from(c: Command) -> Self {
        c as u8
    }
}

/// Channel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Address {
    A = 0x0,
    B = 0x1,
    C = 0x2,
    D = 0x3,
    All = 0xf,
}

impl From<Address> for u8 {
    fn from(a: Address) -> Self {
        a as u8
    }
}

/// Mode field for [`Command::Power`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerMode {
    /// Normal operation.
    Up = 0x0,
    /// Powered down, output 1k to GND.
    Gnd1k = 0x1,
    /// Powered down, output 100k to GND.
    Gnd100k = 0x2,
    /// Powered down, output high impedance.
    HiZ = 0x3,
}

impl From<PowerMode> for u8 {
    fn from(p: PowerMode) -> Self {
        p as u8
    }
}

/// Mode field for [`Command::ClearModeRegister`]. Where outputs go on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClearMode {
    Zero = 0x0,
    Mid = 0x1,
    Full = 0x2,
}

impl From<ClearMode> for u8 {
    fn from(c: ClearMode) -> Self {
        c as u8
    }
}

/// One command for the shift register, independent of chip variant.
///
/// Fields are kept as plain integers and masked to their width when encoded,
/// so out of range values wrap instead of failing.
///
/// ```
/// use dacx0004::{Address, Command, ShiftRegister};
///
/// let sr = ShiftRegister::new(Command::WriteUpdate)
///     .address(Address::B)
///     .data(0x8000);
/// assert_eq!(sr.address, 0x1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegister {
    pub rw: ReadWrite,
    /// 4 bit command.
    pub command: u8,
    /// 4 bit channel address.
    pub address: u8,
    /// Left-justified data. Only the top bits count on the 14 and 12 bit parts.
    pub data: u16,
    /// 4 bit mode, meaning depends on command.
    pub mode: u8,
}

impl ShiftRegister {
    pub fn new(command: impl Into<u8>) -> Self {
        ShiftRegister {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn address(mut self, address: impl Into<u8>) -> Self {
        self.address = address.into();
        self
    }

    pub fn data(mut self, data: u16) -> Self {
        self.data = data;
        self
    }

    pub fn mode(mut self, mode: impl Into<u8>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the R/W bit to read.
    pub fn read(mut self) -> Self {
        self.rw = ReadWrite::Read;
        self
    }
}
