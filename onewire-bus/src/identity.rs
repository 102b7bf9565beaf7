use core::fmt;

/// The 64-bit ROM code of a 1-Wire device.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0    | Family code (e.g., 0x10 for DS1820) |
/// | 1-6  | Serial number |
/// | 7    | CRC-8 of bytes 0-6 (not checked by this crate) |
///
/// Bytes are stored in bus order, which is also the little-endian order of the
/// `u64` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceIdentity([u8; 8]);

impl DeviceIdentity {
    /// Creates an identity from the 8 bytes in bus order.
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// The family code.
    pub const fn family(&self) -> u8 {
        self.0[0]
    }

    /// The 48-bit serial number.
    pub fn serial(&self) -> [u8; 6] {
        let mut serial = [0; 6];
        serial.copy_from_slice(&self.0[1..7]);
        serial
    }

    /// The bytes in bus order.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// The ROM code as a `u64`, family code in the least significant byte.
    pub const fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl From<[u8; 8]> for DeviceIdentity {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for DeviceIdentity {
    fn from(rom: u64) -> Self {
        Self(rom.to_le_bytes())
    }
}

impl From<DeviceIdentity> for u64 {
    fn from(id: DeviceIdentity) -> Self {
        id.to_u64()
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u64(), f)
    }
}
