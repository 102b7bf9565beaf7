use crate::{BitBangMaster, BusLine};
use embedded_hal::delay::DelayNs;
use onewire_bus::{OneWire, OneWireError, OneWireResult};

impl<L: BusLine, D: DelayNs> BitBangMaster<L, D> {
    /// One write slot. The caller holds the critical section.
    fn write_slot(&mut self, bit: bool) -> Result<(), L::Error> {
        let t = self.timing;
        self.line.drive()?;
        self.line.assert_high()?;
        self.line.assert_low()?;
        self.delay.delay_us(t.write_low_us);
        if bit {
            // a short low pulse reads as a one
            self.line.release()?;
        }
        self.delay.delay_us(t.write_remainder_us());
        self.line.release()
    }

    /// One read slot. The caller holds the critical section.
    fn read_slot(&mut self) -> Result<bool, L::Error> {
        let t = self.timing;
        self.line.drive()?;
        self.line.assert_high()?;
        self.line.assert_low()?;
        self.delay.delay_us(t.read_low_us);
        self.line.release()?;
        self.delay.delay_us(t.read_sample_us);
        let bit = self.line.sample()?;
        self.delay.delay_us(t.read_recovery_us);
        Ok(bit)
    }

    fn write_byte_slots(&mut self, byte: u8) -> OneWireResult<(), L::Error> {
        self.check_idle()?;
        for i in 0..8 {
            self.write_slot((byte >> i) & 1 != 0)?;
        }
        Ok(())
    }

    fn read_byte_slots(&mut self) -> OneWireResult<u8, L::Error> {
        self.check_idle()?;
        let mut byte = 0;
        for i in 0..8 {
            if self.read_slot()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }
}

impl<L: BusLine, D: DelayNs> OneWire for BitBangMaster<L, D> {
    type BusError = L::Error;

    /// Only the reset pulse and the presence sample are timing-critical; the driven-high
    /// recovery runs outside the critical section.
    fn reset(&mut self) -> OneWireResult<(), Self::BusError> {
        let t = self.timing;
        let present = critical_section::with(|_| -> Result<bool, L::Error> {
            self.line.drive()?;
            self.line.assert_high()?;
            self.line.assert_low()?;
            self.delay.delay_us(t.reset_low_us);
            self.line.release()?;
            self.delay.delay_us(t.presence_sample_us);
            // a device answers by pulling the released line low
            Ok(!self.line.sample()?)
        })?;
        self.line.drive()?;
        self.line.assert_high()?;
        self.delay.delay_us(t.reset_recovery_us);
        if present {
            Ok(())
        } else {
            log::debug!("no presence pulse after bus reset");
            Err(OneWireError::NoDevicePresent)
        }
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        critical_section::with(|_| self.write_byte_slots(byte))
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        critical_section::with(|_| self.read_byte_slots())
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        critical_section::with(|_| self.write_slot(bit))?;
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        Ok(critical_section::with(|_| self.read_slot())?)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        critical_section::with(|_| {
            for &b in bytes {
                self.write_byte_slots(b)?;
            }
            Ok(())
        })
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        critical_section::with(|_| {
            for b in buf.iter_mut() {
                *b = self.read_byte_slots()?;
            }
            Ok(())
        })
    }
}
