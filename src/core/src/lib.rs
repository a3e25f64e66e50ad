//! keybridge converter core.
//!
//! Bridges legacy IBM PC keyboards (XT, AT/PS-2, and 122-key terminal
//! boards) to a modern host. The attached device is identified by probing
//! it at startup, its scan code stream is decoded into a bit-packed key
//! matrix, and individual keys are resolved to actions through a universal
//! layout and a layered keymap.
//!
//! # Architecture
//!
//! - `matrix`: bit-packed key-down state, addressed by folded scan code
//! - `translate`: per-family tables mapping matrix cells onto the universal layout
//! - `cs2`: the Scan Code Set 2 stream decoder
//! - `keymap`: layered action tables indexed by universal position
//! - `converter`: identification, lifecycle, and key-press resolution
//! - `testutil`: scripted environment collaborators for host-side tests
//!
//! One [`Converter`] instance owns all mutable state and the environment
//! collaborators; nothing here is a global. The host calls
//! [`Converter::scan`] periodically from a single context.

#![no_std]
#![warn(missing_docs)]

pub mod converter;
pub mod cs2;
pub mod keymap;
pub mod matrix;
pub mod testutil;
pub mod translate;

pub use converter::{Converter, LifecycleState};
pub use keybridge_common as common;
pub use keybridge_hal as hal;
