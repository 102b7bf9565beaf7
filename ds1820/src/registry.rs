use crate::{Ds1820Error, Ds1820Result, Temperature, read_scratchpad};
use core::{fmt, str::FromStr};
use onewire_bus::{DeviceIdentity, OneWire};

/// Where a sensor sits in the brewery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Hot liquor tank, the primary heater.
    Hlt,
    /// Mash tun.
    Mash,
    /// Controller cabinet.
    Cabinet,
    /// Room temperature.
    Ambient,
    /// Unassigned extra slot.
    Spare,
}

impl Role {
    /// Number of roles.
    pub const COUNT: usize = 5;

    /// Every role, in display order.
    pub const ALL: [Role; Role::COUNT] = [
        Role::Hlt,
        Role::Mash,
        Role::Cabinet,
        Role::Ambient,
        Role::Spare,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Short upper-case name.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Hlt => "HLT",
            Role::Mash => "MASH",
            Role::Cabinet => "CABINET",
            Role::Ambient => "AMBIENT",
            Role::Spare => "SPARE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRoleError;

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of hlt, mash, cabinet, ambient, spare")
    }
}

impl core::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or(ParseRoleError)
    }
}

const HLT_SENSOR: DeviceIdentity =
    DeviceIdentity::new([0x10, 0x9c, 0xa4, 0x1e, 0x02, 0x08, 0x00, 0x0f]);
const MASH_SENSOR: DeviceIdentity =
    DeviceIdentity::new([0x10, 0xe3, 0x9b, 0x1e, 0x02, 0x08, 0x00, 0x58]);
const CABINET_SENSOR: DeviceIdentity = MASH_SENSOR;
const AMBIENT_SENSOR: DeviceIdentity = MASH_SENSOR;

/// Role to identity table.
///
/// Lives in RAM only; assignments are lost on restart and the defaults come back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRegistry {
    slots: [Option<DeviceIdentity>; Role::COUNT],
}

impl Default for SensorRegistry {
    /// The factory assignment. [`Role::Spare`] starts empty.
    fn default() -> Self {
        Self {
            slots: [
                Some(HLT_SENSOR),
                Some(MASH_SENSOR),
                Some(CABINET_SENSOR),
                Some(AMBIENT_SENSOR),
                None,
            ],
        }
    }
}

impl SensorRegistry {
    /// A registry with no role assigned.
    pub const fn empty() -> Self {
        Self {
            slots: [None; Role::COUNT],
        }
    }

    /// The identity bound to `role`.
    pub fn get(&self, role: Role) -> Option<DeviceIdentity> {
        self.slots[role.index()]
    }

    /// Binds `identity` to `role`, replacing any previous binding.
    ///
    /// No validation is done here; callers check the family code first.
    pub fn set(&mut self, role: Role, identity: DeviceIdentity) {
        self.slots[role.index()] = Some(identity);
    }

    /// Removes the binding of `role`.
    pub fn clear(&mut self, role: Role) {
        self.slots[role.index()] = None;
    }

    /// Assigned roles with their identities.
    pub fn iter(&self) -> impl Iterator<Item = (Role, DeviceIdentity)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|id| (role, id)))
    }

    /// Reads and decodes the current scratchpad of the sensor bound to `role`.
    ///
    /// Does not start a conversion.
    pub fn read_temperature<O: OneWire>(
        &self,
        role: Role,
        bus: &mut O,
    ) -> Ds1820Result<Temperature, O::BusError> {
        let identity = self.get(role).ok_or(Ds1820Error::Unassigned(role))?;
        Ok(read_scratchpad(bus, &identity)?.temperature())
    }
}
