//! Device interface for Razer keyboards driven through the OpenRazer daemon
//!
//! This crate does not talk to hardware. Every operation is a method call on
//! the daemon's D-Bus objects; the [`ChromaBus`] trait is the seam between the
//! encoders here and the transport.

pub mod bus;
pub mod color;
pub mod device;
pub mod effect;
pub mod error;
pub mod keys;

pub use bus::{method, ChromaBus, MethodArgs, SessionBus};
pub use color::RgbColor;
pub use device::{devices, Device, DeviceSummary};
pub use effect::{Effect, EffectType};
pub use error::DeviceError;
pub use keys::{KeyMatrix, KeySet, Region};
