/// Standard-speed slot timings, in microseconds.
///
/// The defaults are the values the brewing controller has always used with DS1820
/// sensors. They sit inside the device's tolerances with a few microseconds to spare,
/// which is why every slot runs with interrupts masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Length of the reset pulse.
    pub reset_low_us: u32,
    /// Delay between releasing the reset pulse and sampling for presence.
    pub presence_sample_us: u32,
    /// Driven-high recovery after every reset cycle.
    pub reset_recovery_us: u32,
    /// Low pulse opening a write slot.
    pub write_low_us: u32,
    /// Length of a write slot, opening pulse included.
    pub slot_us: u32,
    /// Low pulse opening a read slot.
    pub read_low_us: u32,
    /// Delay between releasing a read slot and sampling it.
    pub read_sample_us: u32,
    /// Rest of the read slot after the sample.
    pub read_recovery_us: u32,
    /// How long a released line may stay low before a transfer is refused.
    pub idle_timeout_us: u32,
}

impl Timing {
    /// The timings used when none are configured.
    pub const STANDARD: Self = Self {
        reset_low_us: 500,
        presence_sample_us: 30,
        reset_recovery_us: 200,
        write_low_us: 2,
        slot_us: 60,
        read_low_us: 1,
        read_sample_us: 5,
        read_recovery_us: 56,
        idle_timeout_us: 250,
    };

    /// Time left in a write slot once the opening pulse is over.
    pub(crate) fn write_remainder_us(&self) -> u32 {
        self.slot_us.saturating_sub(self.write_low_us)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::STANDARD
    }
}
