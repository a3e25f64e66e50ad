//! Keyboard identification, lifecycle, and key-press resolution.
//!
//! The converter is a poll-driven state machine. At power-up it absorbs the
//! keyboard's self-test chatter, probes the device with an identify command,
//! classifies it into a family from the reply (or the lack of one), pushes
//! the host's LED state down, and then settles into decoding the scan
//! stream. A receive-path failure or a self-test byte seen mid-stream sends
//! it back to the start for a full re-identification.

use keybridge_common::layout as uni;
use keybridge_common::proto::{cmd, reply, Protocol};
use keybridge_common::{Action, Family, HostLeds, KeyPos, KeyboardLeds, PortError};
use keybridge_hal::{Clock, Host, KeyboardPort};
use log::{info, warn};

use crate::cs2::{self, Cs2Decoder};
use crate::keymap::Keymap;
use crate::matrix::Matrix;
use crate::translate;

/// How long power-on chatter is discarded before identification.
const STARTUP_QUIET_MS: u64 = 1000;

/// Bounded wait for each identification reply byte.
const ID_BYTE_TIMEOUT_MS: u64 = 1000;

/// ID reported when the device never acknowledges the host: an XT board,
/// or nothing attached at all.
const ID_NO_ACK: u16 = 0xFFFF;
/// ID reported when the identify handshake is answered with garbage.
const ID_BAD_ACK: u16 = 0xFFFE;
/// ID of an 84-key AT board: it acknowledges, then stays silent.
const ID_SILENT_AT: u16 = 0x0000;
/// ID of a PS/2 mouse, which is refused.
const ID_MOUSE: u16 = 0x00FF;

/// Lifecycle state of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Reset all per-device state.
    #[default]
    Init,
    /// Discard power-on chatter until the line has been quiet long enough.
    WaitStartup,
    /// Probe and classify the attached device.
    ReadId,
    /// Push the host LED state to the device.
    LedSet,
    /// Steady state: decode the scan stream.
    Loop,
    /// Terminal state; reserved, never entered during normal operation.
    End,
}

/// The protocol converter.
///
/// One instance owns the matrix, the decoder, the lifecycle state, and the
/// environment collaborators. It must be driven from a single context by
/// calling [`Converter::scan`] periodically.
pub struct Converter<P, C, H> {
    port: P,
    clock: C,
    host: H,
    keymap: Keymap,
    matrix: Matrix,
    cs2: Cs2Decoder,
    state: LifecycleState,
    family: Family,
    keyboard_id: u16,
    since: u64,
}

impl<P, C, H> Converter<P, C, H>
where
    P: KeyboardPort,
    C: Clock,
    H: Host,
{
    /// Create a converter around its environment and keymap.
    pub fn new(port: P, clock: C, host: H, keymap: Keymap) -> Self {
        Converter {
            port,
            clock,
            host,
            keymap,
            matrix: Matrix::new(),
            cs2: Cs2Decoder::new(),
            state: LifecycleState::Init,
            family: Family::None,
            keyboard_id: 0,
            since: 0,
        }
    }

    /// Bring up the port and reset all converter state.
    ///
    /// Call once before the first [`Converter::scan`].
    pub fn init(&mut self) {
        self.port.init();
        // Only a line-level reset restarts an XT board.
        self.port.reset();
        self.matrix.clear();
        self.cs2.reset();
        self.state = LifecycleState::Init;
    }

    /// Advance the lifecycle by one tick.
    ///
    /// Returns `true` to tell the caller the matrix may have changed.
    pub fn scan(&mut self) -> bool {
        let err = self.port.take_error();
        if !err.is_empty() {
            warn!("port error: {:?}", err);
            // Send and buffer-full failures are transient flow problems.
            // Anything else on the receive path in the steady state means
            // the device is gone: identify whatever is there now.
            if !err.intersects(PortError::SEND | PortError::BUFFER_FULL)
                && self.state == LifecycleState::Loop
            {
                info!("receive error, re-identifying");
                self.state = LifecycleState::Init;
            }
        }

        match self.state {
            LifecycleState::Init => {
                self.port.set_protocol(Protocol::At);
                self.family = Family::None;
                self.keyboard_id = 0;
                self.since = self.clock.now_ms();
                self.matrix.clear();
                self.cs2.reset();
                self.state = LifecycleState::WaitStartup;
            }
            LifecycleState::WaitStartup => {
                // Swallow the power-on self-test result and anything else
                // the board babbles while it boots.
                let _ = self.port.recv();
                if self.clock.elapsed_ms(self.since) > STARTUP_QUIET_MS {
                    self.state = LifecycleState::ReadId;
                }
            }
            LifecycleState::ReadId => {
                self.identify();
                self.state = LifecycleState::LedSet;
            }
            LifecycleState::LedSet | LifecycleState::Loop => {
                if self.state == LifecycleState::LedSet {
                    self.led_set(self.host.keyboard_leds());
                    self.state = LifecycleState::Loop;
                }
                self.run_decoder();
            }
            LifecycleState::End => {}
        }
        true
    }

    /// Push host LED state to the keyboard.
    ///
    /// Only AT-family devices take the LED command; for every other family
    /// this is a no-op.
    pub fn led_set(&mut self, leds: HostLeds) {
        if self.family != Family::At {
            return;
        }
        self.port.set_leds(KeyboardLeds::from(leds));
    }

    /// Resolve the action bound to a physical key at the given layer.
    pub fn action_for_key(&self, layer: u8, key: KeyPos) -> Action {
        let pos = translate::universal_position(self.family, key.row, key.col);
        if pos == uni::NO {
            return Action::NONE;
        }
        self.keymap.action(layer, uni::row(pos), uni::col(pos))
    }

    /// Whether the key at `(row, col)` is currently pressed.
    pub fn is_on(&self, row: u8, col: u8) -> bool {
        self.matrix.is_on(row, col)
    }

    /// One matrix row as a column bitmask.
    pub fn get_row(&self, row: u8) -> u8 {
        self.matrix.get_row(row)
    }

    /// Number of keys currently pressed.
    pub fn key_count(&self) -> u8 {
        self.matrix.key_count()
    }

    /// The current key matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The family determined by the last identification.
    pub fn family(&self) -> Family {
        self.family
    }

    /// The raw ID captured by the last identification.
    pub fn keyboard_id(&self) -> u16 {
        self.keyboard_id
    }

    /// The current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The underlying keyboard port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the keyboard port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// The clock collaborator.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The host collaborator.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Probe the device, classify it, and select the line protocol.
    fn identify(&mut self) {
        self.keyboard_id = self.read_keyboard_id();

        let err = self.port.take_error();
        if !err.is_empty() {
            warn!("port error during identification: {:?}", err);
        }
        info!("keyboard id {:#06x}", self.keyboard_id);

        self.family = match self.keyboard_id {
            id if id & 0xFF00 == 0xAB00 => Family::At, // PS/2, Set 2
            id if id & 0xFF00 == 0xBF00 => Family::Terminal, // 122-key, Set 3
            ID_SILENT_AT => Family::At,                // 84-key AT
            ID_NO_ACK => Family::Xt,
            ID_BAD_ACK => Family::At, // answered, but mangled the handshake
            ID_MOUSE => {
                warn!("mouse attached, refusing");
                Family::None
            }
            _ => Family::At,
        };
        info!("keyboard family {:?}", self.family);

        let protocol = if self.family == Family::Xt {
            Protocol::Xt
        } else {
            Protocol::At
        };
        self.port.set_protocol(protocol);
    }

    /// Run the identify exchange and fold the outcome into a 16-bit ID.
    ///
    /// Every failure mode maps to a distinguished ID value; timeouts here
    /// are classification signals, not errors.
    fn read_keyboard_id(&mut self) -> u16 {
        // Quiet the device so ID bytes cannot interleave with scan codes.
        let _ = self.port.send(cmd::DISABLE);

        let ack = match self.port.send(cmd::IDENTIFY) {
            None => return ID_NO_ACK,
            Some(b) => b,
        };
        if ack != reply::ACK {
            return ID_BAD_ACK;
        }

        let Some(hi) = self.read_wait(ID_BYTE_TIMEOUT_MS) else {
            return ID_SILENT_AT;
        };
        // A board that stops after one ID byte leaves the low byte at 0xFF.
        let lo = self.read_wait(ID_BYTE_TIMEOUT_MS).unwrap_or(0xFF);

        let _ = self.port.send(cmd::ENABLE);
        u16::from_be_bytes([hi, lo])
    }

    /// Poll the port until a byte arrives or `wait_ms` elapses.
    fn read_wait(&mut self, wait_ms: u64) -> Option<u8> {
        let start = self.clock.now_ms();
        loop {
            if let Some(code) = self.port.recv() {
                return Some(code);
            }
            if self.clock.elapsed_ms(start) >= wait_ms {
                return None;
            }
        }
    }

    /// Dispatch one tick of stream decoding for the active family.
    fn run_decoder(&mut self) {
        match self.family {
            Family::At => {
                let outcome = self.cs2.poll(&mut self.port, &mut self.matrix, &mut self.host);
                if outcome == cs2::Outcome::Restart {
                    info!("keyboard self test seen mid-stream, re-identifying");
                    self.state = LifecycleState::Init;
                }
            }
            // Set 1 and Set 3 streams are drained unparsed for now.
            Family::Xt | Family::Terminal => {
                let _ = self.port.recv();
            }
            Family::None | Family::Other => {}
        }
    }
}
