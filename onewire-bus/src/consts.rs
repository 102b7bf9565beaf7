//! ROM command constants for 1-Wire communication.

/// Command to match a specific ROM address. Followed by the 8 bytes of the ROM code,
/// least significant (family) byte first.
pub const ONEWIRE_MATCH_ROM_CMD: u8 = 0x55;

/// Command to skip ROM addressing. Every device on the bus acts on the
/// following function command.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Command to read the ROM code of the device on the bus.
///
/// Only meaningful when exactly one device is attached: with several devices
/// they all answer at once and the master reads the wired-AND of their codes.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;
