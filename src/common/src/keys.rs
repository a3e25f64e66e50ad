//! Key positions, actions, LED masks, and the keyboard family.

use bitflags::bitflags;

/// A physical key coordinate in the converter's internal matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPos {
    /// Matrix row.
    pub row: u8,
    /// Matrix column.
    pub col: u8,
}

impl KeyPos {
    /// Create a key position from its coordinates.
    pub const fn new(row: u8, col: u8) -> Self {
        KeyPos { row, col }
    }
}

/// An action resolved from the layered keymap.
///
/// The converter treats action values as opaque; their meaning belongs to
/// the action evaluator on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action(pub u16);

impl Action {
    /// The "do nothing" action, returned for unmapped positions.
    pub const NONE: Action = Action(0);
}

bitflags! {
    /// Lock LED state as reported by the host (USB HID bit order).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HostLeds: u8 {
        /// Num Lock.
        const NUM_LOCK = 1 << 0;
        /// Caps Lock.
        const CAPS_LOCK = 1 << 1;
        /// Scroll Lock.
        const SCROLL_LOCK = 1 << 2;
    }
}

bitflags! {
    /// Lock LED state in the order the AT/PS-2 LED command expects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyboardLeds: u8 {
        /// Scroll Lock.
        const SCROLL_LOCK = 1 << 0;
        /// Num Lock.
        const NUM_LOCK = 1 << 1;
        /// Caps Lock.
        const CAPS_LOCK = 1 << 2;
    }
}

impl From<HostLeds> for KeyboardLeds {
    fn from(host: HostLeds) -> Self {
        let mut leds = KeyboardLeds::empty();
        if host.contains(HostLeds::SCROLL_LOCK) {
            leds |= KeyboardLeds::SCROLL_LOCK;
        }
        if host.contains(HostLeds::NUM_LOCK) {
            leds |= KeyboardLeds::NUM_LOCK;
        }
        if host.contains(HostLeds::CAPS_LOCK) {
            leds |= KeyboardLeds::CAPS_LOCK;
        }
        leds
    }
}

/// Keyboard family determined during identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Family {
    /// Nothing usable attached (or a refused device, such as a mouse).
    #[default]
    None,
    /// XT keyboard, Scan Code Set 1.
    Xt,
    /// AT or PS/2 keyboard, Scan Code Set 2.
    At,
    /// 122-key terminal keyboard, Scan Code Set 3.
    Terminal,
    /// Recognized but unclassified device.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_bits_are_reordered_for_the_wire() {
        let host = HostLeds::NUM_LOCK | HostLeds::CAPS_LOCK;
        let kbd = KeyboardLeds::from(host);
        assert_eq!(kbd, KeyboardLeds::NUM_LOCK | KeyboardLeds::CAPS_LOCK);
        assert_eq!(kbd.bits(), 0b110);

        assert_eq!(
            KeyboardLeds::from(HostLeds::SCROLL_LOCK).bits(),
            0b001,
        );
        assert_eq!(KeyboardLeds::from(HostLeds::empty()), KeyboardLeds::empty());
    }
}
