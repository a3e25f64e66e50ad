//! The universal key layout.
//!
//! Every supported keyboard family is translated onto a single 8x16 grid of
//! logical positions before the keymap is consulted, so one action map can
//! serve XT, AT/PS-2, and terminal boards alike. A position is one byte:
//! high nibble = row, low nibble = column. `NO` marks a physical key with no
//! logical counterpart.
//!
//! ```text
//! row 0  Esc F1-F12 PrtSc ScrLk Pause
//! row 1  F13-F24 Mute VolDn VolUp App
//! row 2  ` 1-0 - = Yen Bksp Ins
//! row 3  Tab Q-P [ ] \ Del Home
//! row 4  Caps A-L ; ' # Enter End PgUp
//! row 5  LShift < Z-M , . / Ro RShift PgDn Up
//! row 6  LCtl LGui LAlt Muhen Space Henk Kana RAlt RGui RCtl Left Down Right NumLk KP/ KP*
//! row 7  KP- KP7 KP8 KP9 KP+ KP4 KP5 KP6 KP, KP1 KP2 KP3 KP= KP0 KP. KPEnt
//! ```

/// Universal rows.
pub const ROWS: usize = 8;
/// Universal columns.
pub const COLS: usize = 16;

/// Sentinel: this physical position maps to nothing on the universal layout.
pub const NO: u8 = 0xFF;

/// Row of a universal position.
pub const fn row(pos: u8) -> u8 {
    pos >> 4
}

/// Column of a universal position.
pub const fn col(pos: u8) -> u8 {
    pos & 0x0F
}

// Row 0: escape, function row, and the system cluster.
pub const ESC: u8 = 0x00;
pub const F1: u8 = 0x01;
pub const F2: u8 = 0x02;
pub const F3: u8 = 0x03;
pub const F4: u8 = 0x04;
pub const F5: u8 = 0x05;
pub const F6: u8 = 0x06;
pub const F7: u8 = 0x07;
pub const F8: u8 = 0x08;
pub const F9: u8 = 0x09;
pub const F10: u8 = 0x0A;
pub const F11: u8 = 0x0B;
pub const F12: u8 = 0x0C;
pub const PSCR: u8 = 0x0D;
pub const SLCK: u8 = 0x0E;
pub const PAUS: u8 = 0x0F;

// Row 1: extended function row and media keys.
pub const F13: u8 = 0x10;
pub const F14: u8 = 0x11;
pub const F15: u8 = 0x12;
pub const F16: u8 = 0x13;
pub const F17: u8 = 0x14;
pub const F18: u8 = 0x15;
pub const F19: u8 = 0x16;
pub const F20: u8 = 0x17;
pub const F21: u8 = 0x18;
pub const F22: u8 = 0x19;
pub const F23: u8 = 0x1A;
pub const F24: u8 = 0x1B;
pub const MUTE: u8 = 0x1C;
pub const VOLD: u8 = 0x1D;
pub const VOLU: u8 = 0x1E;
pub const APP: u8 = 0x1F;

// Row 2: number row.
pub const GRV: u8 = 0x20;
pub const N1: u8 = 0x21;
pub const N2: u8 = 0x22;
pub const N3: u8 = 0x23;
pub const N4: u8 = 0x24;
pub const N5: u8 = 0x25;
pub const N6: u8 = 0x26;
pub const N7: u8 = 0x27;
pub const N8: u8 = 0x28;
pub const N9: u8 = 0x29;
pub const N0: u8 = 0x2A;
pub const MINS: u8 = 0x2B;
pub const EQL: u8 = 0x2C;
pub const JYEN: u8 = 0x2D;
pub const BSPC: u8 = 0x2E;
pub const INS: u8 = 0x2F;

// Row 3: top letter row.
pub const TAB: u8 = 0x30;
pub const Q: u8 = 0x31;
pub const W: u8 = 0x32;
pub const E: u8 = 0x33;
pub const R: u8 = 0x34;
pub const T: u8 = 0x35;
pub const Y: u8 = 0x36;
pub const U: u8 = 0x37;
pub const I: u8 = 0x38;
pub const O: u8 = 0x39;
pub const P: u8 = 0x3A;
pub const LBRC: u8 = 0x3B;
pub const RBRC: u8 = 0x3C;
pub const BSLS: u8 = 0x3D;
pub const DEL: u8 = 0x3E;
pub const HOME: u8 = 0x3F;

// Row 4: home row.
pub const CAPS: u8 = 0x40;
pub const A: u8 = 0x41;
pub const S: u8 = 0x42;
pub const D: u8 = 0x43;
pub const F: u8 = 0x44;
pub const G: u8 = 0x45;
pub const H: u8 = 0x46;
pub const J: u8 = 0x47;
pub const K: u8 = 0x48;
pub const L: u8 = 0x49;
pub const SCLN: u8 = 0x4A;
pub const QUOT: u8 = 0x4B;
pub const NUHS: u8 = 0x4C;
pub const ENT: u8 = 0x4D;
pub const END: u8 = 0x4E;
pub const PGUP: u8 = 0x4F;

// Row 5: bottom letter row.
pub const LSFT: u8 = 0x50;
pub const NUBS: u8 = 0x51;
pub const Z: u8 = 0x52;
pub const X: u8 = 0x53;
pub const C: u8 = 0x54;
pub const V: u8 = 0x55;
pub const B: u8 = 0x56;
pub const N: u8 = 0x57;
pub const M: u8 = 0x58;
pub const COMM: u8 = 0x59;
pub const DOT: u8 = 0x5A;
pub const SLSH: u8 = 0x5B;
pub const RO: u8 = 0x5C;
pub const RSFT: u8 = 0x5D;
pub const PGDN: u8 = 0x5E;
pub const UP: u8 = 0x5F;

// Row 6: modifier row, arrows, and keypad prefix keys.
pub const LCTL: u8 = 0x60;
pub const LGUI: u8 = 0x61;
pub const LALT: u8 = 0x62;
pub const MHEN: u8 = 0x63;
pub const SPC: u8 = 0x64;
pub const HENK: u8 = 0x65;
pub const KANA: u8 = 0x66;
pub const RALT: u8 = 0x67;
pub const RGUI: u8 = 0x68;
pub const RCTL: u8 = 0x69;
pub const LEFT: u8 = 0x6A;
pub const DOWN: u8 = 0x6B;
pub const RGHT: u8 = 0x6C;
pub const NLCK: u8 = 0x6D;
pub const PSLS: u8 = 0x6E;
pub const PAST: u8 = 0x6F;

// Row 7: keypad.
pub const PMNS: u8 = 0x70;
pub const P7: u8 = 0x71;
pub const P8: u8 = 0x72;
pub const P9: u8 = 0x73;
pub const PPLS: u8 = 0x74;
pub const P4: u8 = 0x75;
pub const P5: u8 = 0x76;
pub const P6: u8 = 0x77;
pub const PCMM: u8 = 0x78;
pub const P1: u8 = 0x79;
pub const P2: u8 = 0x7A;
pub const P3: u8 = 0x7B;
pub const PEQL: u8 = 0x7C;
pub const P0: u8 = 0x7D;
pub const PDOT: u8 = 0x7E;
pub const PENT: u8 = 0x7F;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_is_on_the_grid() {
        // All named positions decompose to in-range coordinates, and the
        // sentinel stays off the grid.
        for pos in 0x00..=0x7F {
            assert!((row(pos) as usize) < ROWS);
            assert!((col(pos) as usize) < COLS);
        }
        assert!(row(NO) as usize >= ROWS);
    }

    #[test]
    fn nibble_split_round_trips() {
        assert_eq!(row(PENT), 7);
        assert_eq!(col(PENT), 15);
        assert_eq!(row(ESC), 0);
        assert_eq!(col(ESC), 0);
        assert_eq!((row(A) << 4) | col(A), A);
    }
}
