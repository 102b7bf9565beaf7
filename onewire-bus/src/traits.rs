use crate::{
    DeviceIdentity, OneWireResult, ONEWIRE_MATCH_ROM_CMD, ONEWIRE_READ_ROM_CMD,
    ONEWIRE_SKIP_ROM_CMD,
};

/// Trait for 1-Wire communication.
/// This trait defines the basic operations required for 1-Wire communication, such as resetting the bus,
/// writing and reading bytes, and writing and reading bits.
pub trait OneWire {
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware.
    type BusError;

    /// Runs a reset/presence cycle.
    ///
    /// # Errors
    /// Returns [`OneWireError::NoDevicePresent`](crate::OneWireError::NoDevicePresent) if no
    /// device answered with a presence pulse, or a hardware error.
    fn reset(&mut self) -> OneWireResult<(), Self::BusError>;

    /// Writes a byte to the 1-Wire bus, least significant bit first.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError>;

    /// Reads a byte from the 1-Wire bus, least significant bit first.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError>;

    /// Writes a single bit to the 1-Wire bus.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit from the 1-Wire bus.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Writes a sequence of bytes.
    ///
    /// Masters with timing constraints should override this to keep the whole
    /// transfer inside one critical section.
    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Fills `buf` with bytes read from the bus.
    ///
    /// Masters with timing constraints should override this to keep the whole
    /// transfer inside one critical section.
    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    /// Addresses devices on the 1-Wire bus.
    ///
    /// Resets the bus, then sends Match ROM followed by the ROM code, or Skip ROM when
    /// `rom` is [`None`] to address every device at once.
    /// Note: a read after addressing all devices returns garbage on a bus with more than
    /// one device.
    fn address(&mut self, rom: Option<&DeviceIdentity>) -> OneWireResult<(), Self::BusError> {
        self.reset()?;
        match rom {
            Some(rom) => {
                self.write_byte(ONEWIRE_MATCH_ROM_CMD)?;
                self.write_bytes(rom.as_bytes())
            }
            None => self.write_byte(ONEWIRE_SKIP_ROM_CMD),
        }
    }

    /// Reads the ROM code of the only device on the bus.
    ///
    /// The bus must carry exactly one device. With several devices attached the
    /// returned code is the bitwise AND of all of them and is meaningless.
    fn read_rom(&mut self) -> OneWireResult<DeviceIdentity, Self::BusError> {
        self.reset()?;
        self.write_byte(ONEWIRE_READ_ROM_CMD)?;
        let mut rom = [0; 8];
        self.read_bytes(&mut rom)?;
        Ok(DeviceIdentity::new(rom))
    }
}
