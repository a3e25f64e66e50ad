//! Shared vocabulary for the keybridge converter.
//!
//! Everything that both the converter core and an embedding firmware need to
//! agree on lives here: wire-level protocol constants, port error flags, LED
//! masks, key positions, opaque actions, and the universal key layout.

#![no_std]

pub mod error;
pub mod keys;
pub mod layout;
pub mod proto;

pub use error::PortError;
pub use keys::{Action, Family, HostLeds, KeyPos, KeyboardLeds};
pub use proto::Protocol;
