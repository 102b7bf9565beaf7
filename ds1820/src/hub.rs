use crate::{
    CONVERSION_TIME_MS, Ds1820Error, Ds1820Result, Role, SensorRegistry, Temperature,
    broadcast_convert, is_valid, read_scratchpad, read_single_device_identity,
};
use core::fmt;
use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};
use onewire_bus::{DeviceIdentity, OneWire};

/// Shortest conversion wait the hub accepts.
pub const MIN_CONVERSION_MS: u32 = CONVERSION_TIME_MS;

/// Tuning of the sampling cycle.
///
/// # Example
/// ```
/// use ds1820::HubConfig;
/// let config = HubConfig::default()
///     .with_conversion_ms(800)
///     .with_max_presence_failures(5);
/// assert_eq!(config.conversion_ms(), 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    conversion_ms: u32,
    max_presence_failures: u32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            conversion_ms: 1000,
            max_presence_failures: 3,
        }
    }
}

impl HubConfig {
    /// Wait between the convert broadcast and the first scratchpad read.
    ///
    /// Values below [`MIN_CONVERSION_MS`] are raised to it.
    pub fn with_conversion_ms(mut self, ms: u32) -> Self {
        self.conversion_ms = ms.max(MIN_CONVERSION_MS);
        self
    }

    /// Consecutive missed presence pulses after which a role stops being read.
    /// Zero never retires a role.
    pub fn with_max_presence_failures(mut self, count: u32) -> Self {
        self.max_presence_failures = count;
        self
    }

    /// Effective conversion wait.
    pub fn conversion_ms(&self) -> u32 {
        self.conversion_ms
    }

    /// Retirement threshold.
    pub fn max_presence_failures(&self) -> u32 {
        self.max_presence_failures
    }
}

/// Last known state of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reading {
    /// Not sampled yet.
    #[default]
    Pending,
    /// Unassigned, absent or retired.
    NoSensor,
    /// Last decoded value.
    Celsius(Temperature),
}

impl Reading {
    /// The value in degrees, if any.
    pub fn celsius(&self) -> Option<f32> {
        match self {
            Reading::Celsius(t) => Some(t.celsius()),
            _ => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Pending => f.write_str("--"),
            Reading::NoSensor => f.write_str("NO SENSOR"),
            Reading::Celsius(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    reading: Reading,
    misses: u32,
    retired: bool,
}

/// Owner of the bus running the periodic conversion/read cycle.
///
/// Every bus access goes through `&mut self`, so one hub is the single master of its bus.
pub struct SensorHub<O, D> {
    bus: O,
    delay: D,
    registry: SensorRegistry,
    config: HubConfig,
    slots: [Slot; Role::COUNT],
    discovered: Option<DeviceIdentity>,
}

impl<O: OneWire, D: DelayNs> SensorHub<O, D> {
    /// Creates a hub. Every role starts as [`Reading::Pending`].
    pub fn new(bus: O, delay: D, registry: SensorRegistry, config: HubConfig) -> Self {
        Self {
            bus,
            delay,
            registry,
            config,
            slots: [Slot::default(); Role::COUNT],
            discovered: None,
        }
    }

    /// Checks that at least one device answers on the bus.
    ///
    /// # Errors
    /// A presence error here means the bus is empty and sampling is pointless.
    pub fn start(&mut self) -> Ds1820Result<(), O::BusError> {
        if let Err(e) = self.bus.reset() {
            if e.is_presence() {
                warn!("no sensor answered the initial bus reset");
            }
            return Err(e.into());
        }
        info!("sensor bus up");
        Ok(())
    }

    /// Runs one cycle: convert on every device, wait, then read each role.
    ///
    /// Missing sensors only affect their own role. A line fault ends the cycle early and
    /// leaves the remaining roles with their previous reading.
    pub fn sample(&mut self) -> Ds1820Result<(), O::BusError> {
        let Self {
            bus,
            delay,
            registry,
            config,
            slots,
            ..
        } = self;
        if let Err(e) = broadcast_convert(bus) {
            if e.is_presence() {
                warn!("no presence pulse on convert, all sensors lost");
                for slot in slots.iter_mut() {
                    slot.reading = Reading::NoSensor;
                }
            }
            return Err(e.into());
        }
        delay.delay_ms(config.conversion_ms);
        for role in Role::ALL {
            let slot = &mut slots[role.index()];
            if slot.retired {
                continue;
            }
            let Some(identity) = registry.get(role) else {
                slot.reading = Reading::NoSensor;
                continue;
            };
            match read_scratchpad(bus, &identity) {
                Ok(frame) => {
                    let t = frame.temperature();
                    if !t.is_in_range() {
                        warn!("{role} reads {t} °C, outside the sensor range");
                    }
                    debug!("{role}: {t} °C");
                    slot.misses = 0;
                    slot.reading = Reading::Celsius(t);
                }
                Err(e) if e.is_presence() => {
                    slot.misses = slot.misses.saturating_add(1);
                    slot.reading = Reading::NoSensor;
                    let max = config.max_presence_failures;
                    if max > 0 && slot.misses >= max {
                        slot.retired = true;
                        warn!("{role} sensor {identity} retired after {max} missed reads");
                    } else {
                        debug!("{role} sensor {identity} missed ({})", slot.misses);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Cached state of `role`.
    pub fn reading(&self, role: Role) -> Reading {
        self.slots[role.index()].reading
    }

    /// Cached temperature of `role` in degrees.
    pub fn temperature(&self, role: Role) -> Option<f32> {
        self.reading(role).celsius()
    }

    /// Reads `role` right now, without starting a conversion. The cache is not touched.
    pub fn read_temperature(&mut self, role: Role) -> Ds1820Result<Temperature, O::BusError> {
        self.registry.read_temperature(role, &mut self.bus)
    }

    /// Reads the identity of the only device on the bus and remembers it.
    ///
    /// Only one sensor may be attached while discovering.
    pub fn begin_discovery(&mut self) -> Ds1820Result<DeviceIdentity, O::BusError> {
        let identity = read_single_device_identity(&mut self.bus)?;
        if is_valid(&identity) {
            info!("discovered sensor {identity}");
        } else {
            warn!("discovered {identity}, not a DS1820; more than one device on the bus?");
        }
        self.discovered = Some(identity);
        Ok(identity)
    }

    /// Last identity found by [`Self::begin_discovery`].
    pub fn discovered(&self) -> Option<DeviceIdentity> {
        self.discovered
    }

    /// Reads the current scratchpad of the last discovered sensor.
    pub fn read_discovered(&mut self) -> Ds1820Result<Temperature, O::BusError> {
        let identity = self.discovered.ok_or(Ds1820Error::NotDiscovered)?;
        Ok(read_scratchpad(&mut self.bus, &identity)?.temperature())
    }

    /// Binds `identity` to `role` and gives the role a fresh start.
    ///
    /// # Errors
    /// [`Ds1820Error::UnknownFamily`] if the identity is not a DS1820.
    pub fn assign(
        &mut self,
        role: Role,
        identity: DeviceIdentity,
    ) -> Ds1820Result<(), O::BusError> {
        if !is_valid(&identity) {
            return Err(Ds1820Error::UnknownFamily(identity.family()));
        }
        self.registry.set(role, identity);
        self.slots[role.index()] = Slot::default();
        info!("{role} sensor set to {identity}");
        Ok(())
    }

    /// The role table.
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Effective configuration.
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (O, D) {
        (self.bus, self.delay)
    }
}
