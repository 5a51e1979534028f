//! Packing of a [`ShiftRegister`] into the 4 bytes clocked out on the wire.

use crate::command::ShiftRegister;
use crate::variant::Variant;

/// Size of one shift register frame on the wire.
pub const FRAME_LEN: usize = 4;

/// One encoded shift register write, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(pub [u8; FRAME_LEN]);

impl Frame {
    /// Pack `sr` for `variant`.
    ///
    /// No field is range checked. Anything wider than its slot is masked, and
    /// data bits below the variant's resolution are zeroed.
    pub fn encode(sr: &ShiftRegister, variant: Variant) -> Self {
        let word = ((sr.rw as u32 & 0x1) << 28)
            | ((sr.command as u32 & 0xf) << 24)
            | ((sr.address as u32 & 0xf) << 20)
            | (((sr.data & variant.data_mask()) as u32) << 4)
            | (sr.mode as u32 & 0xf);

        Frame(word.to_be_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Fill `dest` with back to back copies of the frame.
    ///
    /// A trailing space shorter than a frame gets the leading bytes of the
    /// frame. Returns the number of complete frames written.
    pub fn fill(&self, dest: &mut [u8]) -> usize {
        let mut chunks = dest.chunks_exact_mut(FRAME_LEN);
        let mut full = 0;

        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.0);
            full += 1;
        }

        let rest = chunks.into_remainder();
        let n = rest.len();
        rest.copy_from_slice(&self.0[..n]);

        full
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
