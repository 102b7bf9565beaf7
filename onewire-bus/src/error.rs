/// One wire communication error type.
#[derive(Debug, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Other(E),
    /// No device answered the reset pulse with a presence pulse.
    NoDevicePresent,
    /// The bus line was found held low outside a reset cycle.
    BusFault,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}

impl<E> OneWireError<E> {
    /// Returns `true` for the presence failure of a reset cycle.
    pub fn is_presence(&self) -> bool {
        matches!(self, Self::NoDevicePresent)
    }
}
