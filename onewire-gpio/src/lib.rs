#![no_std]
#![deny(missing_docs)]

/*! # onewire-gpio
 *
 * A bit-banged 1-Wire master. It needs a single GPIO line (see [`BusLine`]) and a
 * hardware-backed microsecond delay implementing
 * [`DelayNs`](embedded_hal::delay::DelayNs), and implements [`OneWire`] on top of them.
 *
 * Every reset cycle, bit slot and byte transfer runs inside a
 * [`critical_section`]. The target must provide a critical-section implementation
 * that actually masks preemption (e.g. `cortex-m/critical-section-single-core`).
 */

use embedded_hal::delay::DelayNs;
pub use onewire_bus::{DeviceIdentity, OneWire, OneWireError, OneWireResult};
mod line;
mod onewire;
mod timing;

pub use line::{BusLine, OpenDrainLine};
pub use timing::Timing;

const IDLE_POLL_US: u32 = 2;

/// A bit-banged 1-Wire master.
///
/// Owns the bus line and the timer used for slot timing. Build it with
/// [`BitBangBuilder`].
pub struct BitBangMaster<L, D> {
    pub(crate) line: L,
    pub(crate) delay: D,
    pub(crate) timing: Timing,
}

/// Builder for creating a [`BitBangMaster`] instance with custom configuration.
#[derive(Debug, Default)]
pub struct BitBangBuilder {
    pub(crate) timing: Timing,
}

impl BitBangBuilder {
    /// Sets the slot timings.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Builds a new [`BitBangMaster`], releasing the line and checking that the pull-up
    /// brings it high.
    ///
    /// # Errors
    /// [`OneWireError::BusFault`] if the idle line stays low for longer than
    /// [`Timing::idle_timeout_us`], or a line error.
    pub fn build<L: BusLine, D: DelayNs>(
        self,
        line: L,
        delay: D,
    ) -> OneWireResult<BitBangMaster<L, D>, L::Error> {
        let mut master = BitBangMaster {
            line,
            delay,
            timing: self.timing,
        };
        master.check_idle()?;
        Ok(master)
    }
}

impl<L, D> BitBangMaster<L, D> {
    /// The slot timings in use.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Gives back the line and the timer.
    pub fn release(self) -> (L, D) {
        (self.line, self.delay)
    }
}

impl<L: BusLine, D: DelayNs> BitBangMaster<L, D> {
    /// Releases the line and waits for the pull-up to bring it high.
    ///
    /// The tail of a presence pulse or a slow rise after a write-0 slot may still hold
    /// the line low for a while. Only a line still low after
    /// [`Timing::idle_timeout_us`] is a fault.
    pub(crate) fn check_idle(&mut self) -> OneWireResult<(), L::Error> {
        self.line.release()?;
        let mut waited = 0;
        loop {
            if self.line.sample()? {
                return Ok(());
            }
            if waited >= self.timing.idle_timeout_us {
                return Err(OneWireError::BusFault);
            }
            self.delay.delay_us(IDLE_POLL_US);
            waited += IDLE_POLL_US;
        }
    }
}
