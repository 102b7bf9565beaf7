#![no_std]
#![deny(missing_docs)]
//! # onewire-bus
//! A no-std description of a 1-Wire bus master.
//!
//! The [OneWire] trait defines the primitive bus cycles (reset/presence, bit and byte
//! transfers) that a master has to provide, plus the ROM-level addressing sequences
//! built on top of them. Devices are identified by their 64-bit ROM code, wrapped in
//! [DeviceIdentity].
//!
//! Only single-device identification ([OneWire::read_rom]) is provided. There is no
//! search algorithm for multi-drop buses.

mod consts;
mod error;
mod identity;
mod traits;

pub use consts::*;
pub use error::OneWireError;
pub use identity::DeviceIdentity;
pub use traits::OneWire;

/// Result of 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
