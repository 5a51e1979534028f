//! Wrapper for all the errors.

use core::convert::Infallible;

use crate::variant::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The interface failed. Passed on exactly as the interface reported it.
    Interface(E),
    /// The interface can't shift data (required function missing).
    InvalidArgument,
    /// Variant tag that isn't one of the known chips.
    UnknownVersion(u8),
}

impl<E> From<UnknownVariant> for Error<E> {
    fn from(e: UnknownVariant) -> Self {
        Error::UnknownVersion(e.0)
    }
}

// Lets an already typed Variant go through the same TryInto path as a raw tag.
impl<E> From<Infallible> for Error<E> {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
