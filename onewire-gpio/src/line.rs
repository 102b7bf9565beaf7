use embedded_hal::digital::{InputPin, OutputPin};

/// The single shared signal line of the bus.
///
/// The line is either *driven* by the master or *released*, in which case the external
/// pull-up (or a responding device) sets its level. Control passes between the master and
/// the devices only through [`drive`](BusLine::drive) and [`release`](BusLine::release).
pub trait BusLine {
    /// Error raised by the GPIO back-end.
    type Error;

    /// Take control of the line (configure it as an output).
    fn drive(&mut self) -> Result<(), Self::Error>;

    /// Hand the line back to the pull-up (configure it as an input).
    fn release(&mut self) -> Result<(), Self::Error>;

    /// Drive the line low. Only meaningful while driven.
    fn assert_low(&mut self) -> Result<(), Self::Error>;

    /// Drive the line high. Only meaningful while driven.
    fn assert_high(&mut self) -> Result<(), Self::Error>;

    /// Sample the logic level, `true` for high. Only valid while released.
    fn sample(&mut self) -> Result<bool, Self::Error>;
}

/// A [`BusLine`] on an open-drain GPIO.
///
/// Writing high lets the line float, so releasing and asserting high are the same pin
/// operation and no direction switch is needed. Works with any embedded-hal pin that is
/// both readable and writable, such as `OutputOpenDrain` or `Flex` pins.
pub struct OpenDrainLine<P> {
    pin: P,
    driven: bool,
}

impl<P> OpenDrainLine<P> {
    /// Wraps an open-drain pin.
    pub fn new(pin: P) -> Self {
        Self { pin, driven: false }
    }

    /// Whether the master currently holds the line.
    pub fn is_driven(&self) -> bool {
        self.driven
    }

    /// Gives the pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin + OutputPin> BusLine for OpenDrainLine<P> {
    type Error = P::Error;

    fn drive(&mut self) -> Result<(), Self::Error> {
        self.driven = true;
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.driven = false;
        self.pin.set_high()
    }

    fn assert_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn assert_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn sample(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}
