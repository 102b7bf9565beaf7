use linux_embedded_hal::sysfs_gpio::{Direction, Error, Pin};
use onewire_gpio::BusLine;

/// The 1-Wire data line on a sysfs GPIO.
///
/// The master drives by switching the pin to output and releases by switching it back
/// to input, leaving the level to the external pull-up.
///
/// Every direction or level change is a sysfs file write taking several to tens of
/// microseconds, longer than the 1 µs read pulse and 5 µs sample point of
/// [`Timing::STANDARD`](onewire_gpio::Timing::STANDARD). Slots therefore run late; use this
/// line for wiring checks on a bench, not for production sampling.
pub struct SysfsLine {
    gpio: u64,
    pin: Pin,
}

impl SysfsLine {
    /// Exports `gpio` and leaves it released.
    pub fn new(gpio: u64) -> Result<Self, Error> {
        let pin = Pin::new(gpio);
        pin.export()?;
        pin.set_direction(Direction::In)?;
        Ok(Self { gpio, pin })
    }
}

impl Drop for SysfsLine {
    fn drop(&mut self) {
        if let Err(e) = self.pin.unexport() {
            log::warn!("could not unexport GPIO {}: {e}", self.gpio);
        }
    }
}

impl BusLine for SysfsLine {
    type Error = Error;

    fn drive(&mut self) -> Result<(), Error> {
        // start high, a plain "out" would glitch the line low
        self.pin.set_direction(Direction::High)
    }

    fn release(&mut self) -> Result<(), Error> {
        self.pin.set_direction(Direction::In)
    }

    fn assert_low(&mut self) -> Result<(), Error> {
        self.pin.set_value(0)
    }

    fn assert_high(&mut self) -> Result<(), Error> {
        self.pin.set_value(1)
    }

    fn sample(&mut self) -> Result<bool, Error> {
        Ok(self.pin.get_value()? != 0)
    }
}
