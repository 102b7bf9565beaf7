#![no_std]
//! Driver for DS1820 / DS18S20 1-Wire thermometers (family code `0x10`).
//!
//! The bus-level operations ([`broadcast_convert`], [`read_single_device_identity`],
//! [`read_scratchpad`]) work on anything implementing [`OneWire`]. On top of them,
//! [`SensorRegistry`] binds the brewery's sensor roles to device identities and
//! [`SensorHub`] runs the periodic conversion/read cycle and caches the results for the
//! display.
//!
//! Scratchpad frames are not CRC-checked. A corrupted frame decodes to a wrong but
//! plausible temperature.

use onewire_bus::{DeviceIdentity, OneWire, OneWireResult};

mod error;
mod hub;
mod registry;
mod scratchpad;
#[cfg(test)]
mod sim;

pub use error::{Ds1820Error, Ds1820Result};
pub use hub::{HubConfig, Reading, SensorHub};
pub use registry::{ParseRoleError, Role, SensorRegistry};
pub use scratchpad::{ScratchpadFrame, Temperature, decode};

/// Family code shared by every DS1820 identity.
pub const FAMILY_CODE: u8 = 0x10;

/// Worst-case temperature conversion time.
pub const CONVERSION_TIME_MS: u32 = 750;

const DS1820_START_CONV: u8 = 0x44;
const DS1820_READ_SCRATCH: u8 = 0xbe;

/// Whether `identity` belongs to the DS1820 family.
pub fn is_valid(identity: &DeviceIdentity) -> bool {
    identity.family() == FAMILY_CODE
}

/// Starts a temperature conversion on every device of the bus at once.
///
/// Results are only available after [`CONVERSION_TIME_MS`]; a scratchpad read issued
/// earlier returns the previous reading.
pub fn broadcast_convert<O: OneWire>(bus: &mut O) -> OneWireResult<(), O::BusError> {
    bus.address(None)?; // address all devices
    bus.write_byte(DS1820_START_CONV)
}

/// Reads the identity of the only device on the bus.
///
/// Precondition: exactly one device is attached. With more, every device answers at
/// once and the result is the bitwise AND of their identities, which will usually fail
/// [`is_valid`].
pub fn read_single_device_identity<O: OneWire>(
    bus: &mut O,
) -> OneWireResult<DeviceIdentity, O::BusError> {
    bus.read_rom()
}

/// Reads the scratchpad of the device with the given identity.
pub fn read_scratchpad<O: OneWire>(
    bus: &mut O,
    identity: &DeviceIdentity,
) -> OneWireResult<ScratchpadFrame, O::BusError> {
    bus.address(Some(identity))?;
    read_frame(bus)
}

/// Reads the scratchpad of the only device on the bus, without addressing it.
pub fn read_single_scratchpad<O: OneWire>(
    bus: &mut O,
) -> OneWireResult<ScratchpadFrame, O::BusError> {
    bus.address(None)?;
    read_frame(bus)
}

fn read_frame<O: OneWire>(bus: &mut O) -> OneWireResult<ScratchpadFrame, O::BusError> {
    bus.write_byte(DS1820_READ_SCRATCH)?;
    let mut buf = [0; ScratchpadFrame::LEN];
    bus.read_bytes(&mut buf)?;
    Ok(ScratchpadFrame::new(buf))
}
