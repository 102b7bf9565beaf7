use core::fmt;

/// The 9-byte scratchpad of a DS1820.
///
/// | Byte | Content |
/// |------|---------|
/// | 0    | Temperature LSB (0.5 °C per bit) |
/// | 1    | Temperature MSB (sign extension) |
/// | 2-3  | T<sub>H</sub> / T<sub>L</sub> alarm registers |
/// | 4-5  | Reserved |
/// | 6    | COUNT_REMAIN |
/// | 7    | COUNT_PER_C (16) |
/// | 8    | CRC |
///
/// Only bytes 0, 1 and 6 take part in decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchpadFrame([u8; 9]);

impl ScratchpadFrame {
    /// Frame length in bytes.
    pub const LEN: usize = 9;

    /// Wraps the bytes as read from the bus.
    pub const fn new(bytes: [u8; 9]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 9] {
        &self.0
    }

    /// The half-degree temperature register, sign-extended from its low 12 bits.
    pub fn raw_temperature(&self) -> i16 {
        let raw = (u16::from(self.0[1] & 0x0f) << 8) | u16::from(self.0[0]);
        ((raw << 4) as i16) >> 4
    }

    /// COUNT_REMAIN, the counter value left at the end of the conversion.
    pub const fn count_remain(&self) -> u8 {
        self.0[6]
    }

    /// COUNT_PER_C, fixed at 16 for this family.
    pub const fn count_per_c(&self) -> u8 {
        self.0[7]
    }

    /// Decodes the frame. See [`decode`].
    pub fn temperature(&self) -> Temperature {
        decode(self)
    }
}

impl From<[u8; 9]> for ScratchpadFrame {
    fn from(bytes: [u8; 9]) -> Self {
        Self(bytes)
    }
}

/// Converts a scratchpad frame into a calibrated temperature.
///
/// The half-degree bit is truncated, then the count-remain compensation
/// `(1600 - COUNT_REMAIN * 100) / 16` is added to the whole degrees minus 0.25 °C, all in
/// hundredths of a degree with truncating integer division.
pub fn decode(frame: &ScratchpadFrame) -> Temperature {
    let whole = i32::from(frame.raw_temperature() >> 1);
    let remain = i32::from(frame.count_remain());
    Temperature(whole * 100 - 25 + (1600 - remain * 100) / 16)
}

/// A temperature in hundredths of a degree Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temperature(i32);

impl Temperature {
    /// Lowest temperature the family can measure.
    pub const MIN: Self = Self(-5500);
    /// Highest temperature the family can measure.
    pub const MAX: Self = Self(12500);

    /// Creates a temperature from hundredths of a degree.
    pub const fn from_centidegrees(centi: i32) -> Self {
        Self(centi)
    }

    /// Hundredths of a degree Celsius.
    pub const fn centidegrees(&self) -> i32 {
        self.0
    }

    /// Degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Whether the value lies inside the measurable range.
    pub fn is_in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(self)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
