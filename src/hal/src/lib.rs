//! Hardware abstraction traits for the keybridge converter.
//!
//! The converter core never touches pins, timers, or the USB stack directly;
//! it is written against the traits in this crate. A firmware supplies real
//! implementations backed by its line driver and host stack, and the test
//! suite supplies scripted ones.

#![no_std]

pub mod rx;

use keybridge_common::{HostLeds, KeyboardLeds, PortError, Protocol};

/// Byte-oriented access to the keyboard line driver.
///
/// All operations are non-blocking; `recv` reports "nothing yet" rather than
/// waiting. Failures latch into an error word that the converter reads and
/// clears with [`KeyboardPort::take_error`].
pub trait KeyboardPort {
    /// Bring the line driver up. Idempotent.
    fn init(&mut self);

    /// Hard-reset the line by holding it inactive.
    ///
    /// AT boards are reset by command instead, but XT boards only restart
    /// when the line itself is yanked.
    fn reset(&mut self);

    /// Transmit one command byte and collect the device's response byte.
    ///
    /// Returns `None` when the transmission failed outright (no device, or
    /// a device that cannot acknowledge).
    fn send(&mut self, byte: u8) -> Option<u8>;

    /// Fetch the next received byte, if one is queued.
    fn recv(&mut self) -> Option<u8>;

    /// Push lock-LED state to the device.
    fn set_leds(&mut self, leds: KeyboardLeds);

    /// Select the line framing for the attached keyboard family.
    fn set_protocol(&mut self, protocol: Protocol);

    /// Read and clear the accumulated error flags.
    fn take_error(&mut self) -> PortError;
}

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since an earlier `now_ms` reading.
    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now_ms().wrapping_sub(since)
    }
}

/// Host-side keyboard services (the consumer of resolved key state).
pub trait Host {
    /// The host's current lock-LED state.
    fn keyboard_leds(&self) -> HostLeds;

    /// Drop any keys the host still believes are held.
    ///
    /// Called when the scan stream desynchronizes and the matrix is wiped,
    /// so that no key stays stuck down on the host side.
    fn clear_keyboard(&mut self);
}
