//! Byte-level simulation of a bus populated with DS1820 devices.

extern crate std;

use crate::{CONVERSION_TIME_MS, DS1820_READ_SCRATCH, DS1820_START_CONV};
use core::{cell::Cell, convert::Infallible};
use embedded_hal::delay::DelayNs;
use onewire_bus::{
    DeviceIdentity, ONEWIRE_MATCH_ROM_CMD, ONEWIRE_READ_ROM_CMD, ONEWIRE_SKIP_ROM_CMD, OneWire,
    OneWireError, OneWireResult,
};
use std::{collections::VecDeque, rc::Rc, vec::Vec};

/// Scratchpad after power-up: 85 °C.
pub const POWER_ON: [u8; 9] = [0xaa, 0x00, 0x4b, 0x46, 0xff, 0xff, 0x0c, 0x10, 0x00];

/// A scratchpad with the given temperature bytes and COUNT_REMAIN.
pub fn frame(lsb: u8, msb: u8, remain: u8) -> [u8; 9] {
    [lsb, msb, 0x4b, 0x46, 0xff, 0xff, remain, 0x10, 0x00]
}

pub struct SimSensor {
    pub id: DeviceIdentity,
    current: [u8; 9],
    next: [u8; 9],
    ready_at: Option<u64>,
}

impl SimSensor {
    pub fn new(id: DeviceIdentity) -> Self {
        Self {
            id,
            current: POWER_ON,
            next: POWER_ON,
            ready_at: None,
        }
    }

    /// Scratchpad content, before and after any conversion.
    pub fn with_frame(mut self, pad: [u8; 9]) -> Self {
        self.current = pad;
        self.next = pad;
        self
    }

    /// Scratchpad content once a conversion has completed.
    pub fn with_conversion(mut self, pad: [u8; 9]) -> Self {
        self.next = pad;
        self
    }

    fn convert(&mut self, now: u64) {
        self.ready_at = Some(now + u64::from(CONVERSION_TIME_MS) * 1_000_000);
    }

    fn scratchpad(&mut self, now: u64) -> [u8; 9] {
        if self.ready_at.is_some_and(|t| now >= t) {
            self.current = self.next;
            self.ready_at = None;
        }
        self.current
    }
}

enum Phase {
    Idle,
    Rom,
    MatchRom(Vec<u8>),
    Function(Vec<usize>),
}

/// A bus answering at the byte level, with a shared nanosecond clock.
pub struct SimBus {
    pub sensors: Vec<SimSensor>,
    /// Every byte written since creation.
    pub written: Vec<u8>,
    pub resets: usize,
    /// Scripted presence answers; when exhausted, presence means "any sensor attached".
    pub presence: VecDeque<bool>,
    pub stuck: bool,
    /// Clock value at each scratchpad read.
    pub reads_at: Vec<u64>,
    /// Clock value at each convert command.
    pub converts_at: Vec<u64>,
    clock: Rc<Cell<u64>>,
    phase: Phase,
    rx: VecDeque<u8>,
}

impl SimBus {
    pub fn new(sensors: Vec<SimSensor>) -> Self {
        Self {
            sensors,
            written: Vec::new(),
            resets: 0,
            presence: VecDeque::new(),
            stuck: false,
            reads_at: Vec::new(),
            converts_at: Vec::new(),
            clock: Rc::new(Cell::new(0)),
            phase: Phase::Idle,
            rx: VecDeque::new(),
        }
    }

    /// A delay advancing this bus' clock.
    pub fn delay(&self) -> ClockDelay {
        ClockDelay(self.clock.clone())
    }

    fn wired_and<const N: usize>(items: impl Iterator<Item = [u8; N]>) -> [u8; N] {
        items.fold([0xff; N], |mut acc, item| {
            for (a, b) in acc.iter_mut().zip(item) {
                *a &= b;
            }
            acc
        })
    }

    fn command(&mut self, byte: u8) {
        let now = self.clock.get();
        self.phase = match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Phase::Idle,
            Phase::Rom => match byte {
                ONEWIRE_SKIP_ROM_CMD => Phase::Function((0..self.sensors.len()).collect()),
                ONEWIRE_MATCH_ROM_CMD => Phase::MatchRom(Vec::new()),
                ONEWIRE_READ_ROM_CMD => {
                    let rom = Self::wired_and(self.sensors.iter().map(|s| *s.id.as_bytes()));
                    self.rx.extend(rom);
                    Phase::Idle
                }
                _ => Phase::Idle,
            },
            Phase::MatchRom(mut buf) => {
                buf.push(byte);
                if buf.len() < 8 {
                    Phase::MatchRom(buf)
                } else {
                    let selected = self
                        .sensors
                        .iter()
                        .position(|s| s.id.as_bytes()[..] == buf[..]);
                    Phase::Function(selected.into_iter().collect())
                }
            }
            Phase::Function(selected) => {
                match byte {
                    DS1820_START_CONV => {
                        self.converts_at.push(now);
                        for &i in &selected {
                            self.sensors[i].convert(now);
                        }
                    }
                    DS1820_READ_SCRATCH => {
                        self.reads_at.push(now);
                        let pads: Vec<_> = selected
                            .iter()
                            .map(|&i| self.sensors[i].scratchpad(now))
                            .collect();
                        self.rx.extend(Self::wired_and(pads.into_iter()));
                    }
                    _ => {}
                }
                Phase::Idle
            }
        };
    }
}

impl OneWire for SimBus {
    type BusError = Infallible;

    fn reset(&mut self) -> OneWireResult<(), Infallible> {
        self.resets += 1;
        if self.stuck {
            return Err(OneWireError::BusFault);
        }
        self.rx.clear();
        let present = self
            .presence
            .pop_front()
            .unwrap_or(!self.sensors.is_empty());
        if present {
            self.phase = Phase::Rom;
            Ok(())
        } else {
            self.phase = Phase::Idle;
            Err(OneWireError::NoDevicePresent)
        }
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Infallible> {
        if self.stuck {
            return Err(OneWireError::BusFault);
        }
        self.written.push(byte);
        self.command(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Infallible> {
        if self.stuck {
            return Err(OneWireError::BusFault);
        }
        Ok(self.rx.pop_front().unwrap_or(0xff))
    }

    fn write_bit(&mut self, _bit: bool) -> OneWireResult<(), Infallible> {
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Infallible> {
        Ok(true)
    }
}

/// Advances the simulated clock instead of sleeping.
pub struct ClockDelay(Rc<Cell<u64>>);

impl ClockDelay {
    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}
