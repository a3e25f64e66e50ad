//! Scan Code Set 2 stream decoder.
//!
//! Set 2 is not a clean one-byte-per-event encoding: releases are prefixed
//! with `F0`, a second code plane hides behind `E0`, and PrintScreen and
//! Pause have several multi-byte forms that depend on modifier state. This
//! decoder turns the raw byte stream into make/break updates on the matrix
//! and flags the two self-test bytes that mean the keyboard was reset or
//! replugged behind our back.
//!
//! Quirks handled here rather than upstream:
//!
//! - The keyboard wraps certain keys in `E0 12` / `E0 59` fake-shift
//!   sequences depending on NumLock and Shift. The host tracks its own
//!   modifier state, so forwarding those would only desynchronize it; they
//!   are dropped on the floor.
//! - PrintScreen arrives as `E0 7C` normally and as a bare `84` when Alt is
//!   held. Both land on one matrix position.
//! - Pause has no break code at all. It is reported as a one-tick press:
//!   every decoder entry first releases a pressed Pause before looking at
//!   new bytes.

use keybridge_common::proto::{marker, reply};
use keybridge_hal::{Host, KeyboardPort};
use log::warn;

use crate::matrix::{self, Matrix};

/// Pause make sequence, after the leading `E1`.
const PAUSE_TAIL: [u8; 7] = [0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

/// Control-modified Pause make sequence, after the leading `E0 7E`.
const CTRL_PAUSE_TAIL: [u8; 3] = [0xE0, 0xF0, 0x7E];

/// Decoder state carried between bytes of a multi-byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    /// Between sequences.
    #[default]
    Idle,
    /// `F0` seen: the next byte is a plain break.
    Break,
    /// `E0` seen.
    Extended,
    /// `E0 F0` seen.
    ExtendedBreak,
    /// Inside the Pause sequence; counts bytes matched past the `E1`.
    Pause(u8),
    /// Inside the Control-modified Pause sequence; counts bytes matched
    /// past the `E0 7E`.
    CtrlPause(u8),
}

/// What the lifecycle should do after a decoding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep scanning.
    Continue,
    /// A self-test result byte arrived mid-stream: the keyboard rebooted or
    /// was just plugged in, and must be re-identified from scratch.
    Restart,
}

/// Stateful Scan Code Set 2 decoder.
#[derive(Debug, Default)]
pub struct Cs2Decoder {
    state: State,
}

impl Cs2Decoder {
    /// A decoder in the idle state.
    pub const fn new() -> Self {
        Cs2Decoder { state: State::Idle }
    }

    /// Drop any partial sequence without touching the matrix.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Poll the port for one byte and advance the state machine.
    ///
    /// Updates `matrix` with make/break events as sequences complete. A
    /// partially consumed sequence leaves the matrix untouched until its
    /// final byte arrives.
    pub fn poll<P, H>(&mut self, port: &mut P, matrix: &mut Matrix, host: &mut H) -> Outcome
    where
        P: KeyboardPort,
        H: Host,
    {
        // Pause auto-release: it was reported as pressed last tick and has
        // no break code coming, so take it down before anything else.
        if matrix.is_on(matrix::row_of(matrix::PAUSE), matrix::col_of(matrix::PAUSE)) {
            matrix.break_key(matrix::PAUSE);
        }

        match port.recv() {
            Some(code) => self.feed(code, matrix, host),
            None => Outcome::Continue,
        }
    }

    fn feed<H: Host>(&mut self, code: u8, matrix: &mut Matrix, host: &mut H) -> Outcome {
        match self.state {
            State::Idle => match code {
                marker::EXTEND => self.state = State::Extended,
                marker::BREAK => self.state = State::Break,
                marker::EXTEND1 => self.state = State::Pause(0),
                0x83 => matrix.make(matrix::F7),
                0x84 => matrix.make(matrix::PRINT_SCREEN),
                reply::OVERRUN => {
                    warn!("cs2: keyboard buffer overrun");
                    self.desync(matrix, host);
                }
                reply::BAT_OK | reply::BAT_FAIL => {
                    self.state = State::Idle;
                    return Outcome::Restart;
                }
                _ if code < 0x80 => matrix.make(code),
                _ => {
                    warn!("cs2: unexpected make code {:#04x}", code);
                    self.desync(matrix, host);
                }
            },
            State::Break => {
                match code {
                    0x83 => matrix.break_key(matrix::F7),
                    0x84 => matrix.break_key(matrix::PRINT_SCREEN),
                    _ if code < 0x80 => matrix.break_key(code),
                    _ => {
                        warn!("cs2: unexpected break code {:#04x}", code);
                        self.desync(matrix, host);
                    }
                }
                self.state = State::Idle;
            }
            State::Extended => {
                match code {
                    // Fake shifts around NumLock/Shift-modulated keys.
                    0x12 | 0x59 => {}
                    0x7E => {
                        self.state = State::CtrlPause(0);
                        return Outcome::Continue;
                    }
                    marker::BREAK => {
                        self.state = State::ExtendedBreak;
                        return Outcome::Continue;
                    }
                    _ if code < 0x80 => matrix.make(code | 0x80),
                    _ => {
                        warn!("cs2: unexpected extended code {:#04x}", code);
                        self.desync(matrix, host);
                    }
                }
                self.state = State::Idle;
            }
            State::ExtendedBreak => {
                match code {
                    0x12 | 0x59 => {}
                    _ if code < 0x80 => matrix.break_key(code | 0x80),
                    _ => {
                        warn!("cs2: unexpected extended break code {:#04x}", code);
                        self.desync(matrix, host);
                    }
                }
                self.state = State::Idle;
            }
            State::Pause(matched) => {
                let i = matched as usize;
                if code == PAUSE_TAIL[i] {
                    if i + 1 == PAUSE_TAIL.len() {
                        matrix.make(matrix::PAUSE);
                        self.state = State::Idle;
                    } else {
                        self.state = State::Pause(matched + 1);
                    }
                } else {
                    // Not Pause after all; drop the partial sequence.
                    self.state = State::Idle;
                }
            }
            State::CtrlPause(matched) => {
                let i = matched as usize;
                if code == CTRL_PAUSE_TAIL[i] {
                    if i + 1 == CTRL_PAUSE_TAIL.len() {
                        matrix.make(matrix::PAUSE);
                        self.state = State::Idle;
                    } else {
                        self.state = State::CtrlPause(matched + 1);
                    }
                } else {
                    self.state = State::Idle;
                }
            }
        }
        Outcome::Continue
    }

    /// The stream is out of step with us: wipe all key state, ours and the
    /// host's, rather than leave keys stuck down.
    fn desync<H: Host>(&mut self, matrix: &mut Matrix, host: &mut H) {
        matrix.clear();
        host.clear_keyboard();
    }
}
