//! Scripted environment collaborators.
//!
//! These stand in for the real line driver, timer, and host stack so the
//! converter can be exercised on a development machine: the port replays a
//! prepared byte script, the clock is stepped by hand, and the host records
//! what was asked of it.

use core::cell::Cell;

use heapless::{Deque, Vec};
use keybridge_common::proto::Protocol;
use keybridge_common::{HostLeds, KeyboardLeds, PortError};
use keybridge_hal::{Clock, Host, KeyboardPort};

/// Capacity of the scripted byte queues.
const SCRIPT_CAPACITY: usize = 64;

/// A keyboard port driven by a prepared script.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    rx: Deque<u8, SCRIPT_CAPACITY>,
    replies: Deque<Option<u8>, SCRIPT_CAPACITY>,
    sent: Vec<u8, SCRIPT_CAPACITY>,
    leds: Option<KeyboardLeds>,
    protocol: Option<Protocol>,
    error: PortError,
    inits: usize,
    resets: usize,
}

impl ScriptedPort {
    /// An empty port: nothing to receive, every send fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the converter to receive, oldest first.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).expect("receive script full");
        }
    }

    /// Queue the response to the next `send`; `None` scripts a failed
    /// transmission.
    pub fn reply_with(&mut self, response: Option<u8>) {
        self.replies.push_back(response).expect("reply script full");
    }

    /// Latch error flags for the converter to pick up on its next tick.
    pub fn raise_error(&mut self, error: PortError) {
        self.error |= error;
    }

    /// Every byte the converter transmitted, in order.
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// The LED state last pushed to the device, if any.
    pub fn leds(&self) -> Option<KeyboardLeds> {
        self.leds
    }

    /// The line protocol last selected, if any.
    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol
    }

    /// How many times the port was initialized.
    pub fn init_count(&self) -> usize {
        self.inits
    }

    /// How many times the line was hard-reset.
    pub fn reset_count(&self) -> usize {
        self.resets
    }
}

impl KeyboardPort for ScriptedPort {
    fn init(&mut self) {
        self.inits += 1;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn send(&mut self, byte: u8) -> Option<u8> {
        self.sent.push(byte).expect("send log full");
        self.replies.pop_front().unwrap_or(None)
    }

    fn recv(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn set_leds(&mut self, leds: KeyboardLeds) {
        self.leds = Some(leds);
    }

    fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = Some(protocol);
    }

    fn take_error(&mut self) -> PortError {
        core::mem::take(&mut self.error)
    }
}

/// A clock under test control.
///
/// Time moves only when the test advances it, plus an optional fixed step
/// per reading so busy-wait loops inside the converter eventually time out.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u64>,
    step: u64,
}

impl MockClock {
    /// A clock stuck at zero until advanced.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that also advances by `step` ms on every reading.
    pub fn with_step(step: u64) -> Self {
        MockClock {
            now: Cell::new(0),
            step,
        }
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}

/// A host that records what the converter asks of it.
#[derive(Debug, Default)]
pub struct MockHost {
    leds: HostLeds,
    clears: usize,
}

impl MockHost {
    /// A host with all lock LEDs off.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host reporting the given lock-LED state.
    pub fn with_leds(leds: HostLeds) -> Self {
        MockHost { leds, clears: 0 }
    }

    /// How many times the converter flushed the host's key state.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Host for MockHost {
    fn keyboard_leds(&self) -> HostLeds {
        self.leds
    }

    fn clear_keyboard(&mut self) {
        self.clears += 1;
    }
}
