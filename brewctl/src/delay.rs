use embedded_hal::delay::DelayNs;
use std::time::{Duration, Instant};

/// Busy-waiting delay for the bit slots. A sleeping delay overshoots them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        let until = Instant::now() + Duration::from_nanos(ns.into());
        while Instant::now() < until {
            std::hint::spin_loop();
        }
    }
}
