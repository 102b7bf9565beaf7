use crate::Role;
use onewire_bus::OneWireError;

/// Results of DS1820-specific function calls.
pub type Ds1820Result<T, E> = Result<T, Ds1820Error<E>>;

/// Errors raised above the bus level.
#[derive(Debug, PartialEq, Eq)]
pub enum Ds1820Error<E> {
    /// The bus transaction failed.
    Bus(OneWireError<E>),
    /// No identity is registered for the role.
    Unassigned(Role),
    /// The identity does not carry the DS1820 family code.
    UnknownFamily(u8),
    /// No identity has been discovered yet.
    NotDiscovered,
}

impl<E> From<OneWireError<E>> for Ds1820Error<E> {
    fn from(value: OneWireError<E>) -> Self {
        Self::Bus(value)
    }
}

impl<E> Ds1820Error<E> {
    /// Returns `true` when no device answered the reset pulse.
    pub fn is_presence(&self) -> bool {
        matches!(self, Self::Bus(e) if e.is_presence())
    }
}
