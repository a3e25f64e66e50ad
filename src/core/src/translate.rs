//! Per-family translation tables.
//!
//! Each supported code set gets one immutable table mapping internal matrix
//! coordinates to universal key positions. The tables absorb every
//! per-family irregularity, so the resolver downstream sees one coordinate
//! space no matter what is plugged in. They live in read-only storage and
//! are never copied.

use keybridge_common::layout as uni;
use keybridge_common::Family;

/// Scan Code Set 1 (XT): indexed directly by the 7-bit scan code.
static XT: [[u8; 8]; 16] = [
    // 0x00
    [uni::NO, uni::ESC, uni::N1, uni::N2, uni::N3, uni::N4, uni::N5, uni::N6],
    // 0x08
    [uni::N7, uni::N8, uni::N9, uni::N0, uni::MINS, uni::EQL, uni::BSPC, uni::TAB],
    // 0x10
    [uni::Q, uni::W, uni::E, uni::R, uni::T, uni::Y, uni::U, uni::I],
    // 0x18
    [uni::O, uni::P, uni::LBRC, uni::RBRC, uni::ENT, uni::LCTL, uni::A, uni::S],
    // 0x20
    [uni::D, uni::F, uni::G, uni::H, uni::J, uni::K, uni::L, uni::SCLN],
    // 0x28
    [uni::QUOT, uni::GRV, uni::LSFT, uni::BSLS, uni::Z, uni::X, uni::C, uni::V],
    // 0x30
    [uni::B, uni::N, uni::M, uni::COMM, uni::DOT, uni::SLSH, uni::RSFT, uni::PAST],
    // 0x38
    [uni::LALT, uni::SPC, uni::CAPS, uni::F1, uni::F2, uni::F3, uni::F4, uni::F5],
    // 0x40
    [uni::F6, uni::F7, uni::F8, uni::F9, uni::F10, uni::NLCK, uni::SLCK, uni::P7],
    // 0x48
    [uni::P8, uni::P9, uni::PMNS, uni::P4, uni::P5, uni::P6, uni::PPLS, uni::P1],
    // 0x50
    [uni::P2, uni::P3, uni::P0, uni::PDOT, uni::PSCR, uni::PAUS, uni::NUHS, uni::F11],
    // 0x58
    [uni::F12, uni::PEQL, uni::LGUI, uni::RGUI, uni::APP, uni::MUTE, uni::VOLD, uni::VOLU],
    // 0x60
    [uni::UP, uni::LEFT, uni::DOWN, uni::RGHT, uni::F13, uni::F14, uni::F15, uni::F16],
    // 0x68
    [uni::F17, uni::F18, uni::F19, uni::F20, uni::F21, uni::F22, uni::F23, uni::PENT],
    // 0x70
    [uni::KANA, uni::INS, uni::DEL, uni::RO, uni::HOME, uni::END, uni::F24, uni::PGUP],
    // 0x78
    [uni::PGDN, uni::HENK, uni::RCTL, uni::MHEN, uni::RALT, uni::JYEN, uni::PCMM, uni::PSLS],
];

/// Scan Code Set 2 (AT/PS-2): rows 0x10.. hold the E0-prefixed half of the
/// code space (`code | 0x80`).
static AT: [[u8; 8]; 32] = [
    // 0x00
    [uni::NO, uni::F9, uni::NO, uni::F5, uni::F3, uni::F1, uni::F2, uni::F12],
    // 0x08
    [uni::F13, uni::F10, uni::F8, uni::F6, uni::F4, uni::TAB, uni::GRV, uni::NO],
    // 0x10
    [uni::F14, uni::LALT, uni::LSFT, uni::KANA, uni::LCTL, uni::Q, uni::N1, uni::NO],
    // 0x18
    [uni::F15, uni::NO, uni::Z, uni::S, uni::A, uni::W, uni::N2, uni::NO],
    // 0x20
    [uni::F16, uni::C, uni::X, uni::D, uni::E, uni::N4, uni::N3, uni::NO],
    // 0x28
    [uni::F17, uni::SPC, uni::V, uni::F, uni::T, uni::R, uni::N5, uni::NO],
    // 0x30
    [uni::F18, uni::N, uni::B, uni::H, uni::G, uni::Y, uni::N6, uni::NO],
    // 0x38
    [uni::F19, uni::NO, uni::M, uni::J, uni::U, uni::N7, uni::N8, uni::NO],
    // 0x40
    [uni::F20, uni::COMM, uni::K, uni::I, uni::O, uni::N0, uni::N9, uni::NO],
    // 0x48
    [uni::F21, uni::DOT, uni::SLSH, uni::L, uni::SCLN, uni::P, uni::MINS, uni::NO],
    // 0x50
    [uni::F22, uni::RO, uni::QUOT, uni::NO, uni::LBRC, uni::EQL, uni::NO, uni::F23],
    // 0x58
    [uni::CAPS, uni::RSFT, uni::ENT, uni::RBRC, uni::NO, uni::BSLS, uni::NO, uni::F24],
    // 0x60
    [uni::NO, uni::NUBS, uni::NO, uni::PEQL, uni::HENK, uni::NO, uni::BSPC, uni::MHEN],
    // 0x68
    [uni::NUHS, uni::P1, uni::JYEN, uni::P4, uni::P7, uni::PCMM, uni::NO, uni::NO],
    // 0x70
    [uni::P0, uni::PDOT, uni::P2, uni::P5, uni::P6, uni::P8, uni::ESC, uni::NLCK],
    // 0x78
    [uni::F11, uni::PPLS, uni::P3, uni::PMNS, uni::PAST, uni::P9, uni::SLCK, uni::NO],
    // 0x80 (F7 is the one plain code out here)
    [uni::NO, uni::NO, uni::NO, uni::F7, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0x88
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0x90 (E0 10..)
    [uni::NO, uni::RALT, uni::NO, uni::NO, uni::RCTL, uni::NO, uni::NO, uni::NO],
    // 0x98
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::LGUI],
    // 0xA0
    [uni::NO, uni::VOLD, uni::NO, uni::MUTE, uni::NO, uni::NO, uni::NO, uni::RGUI],
    // 0xA8
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::APP],
    // 0xB0
    [uni::NO, uni::NO, uni::VOLU, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xB8
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xC0
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xC8
    [uni::NO, uni::NO, uni::PSLS, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xD0
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xD8
    [uni::NO, uni::NO, uni::PENT, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xE0
    [uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO, uni::NO],
    // 0xE8
    [uni::NO, uni::END, uni::NO, uni::LEFT, uni::HOME, uni::NO, uni::NO, uni::NO],
    // 0xF0
    [uni::INS, uni::DEL, uni::DOWN, uni::NO, uni::RGHT, uni::UP, uni::NO, uni::NO],
    // 0xF8
    [uni::NO, uni::NO, uni::PGDN, uni::NO, uni::PSCR, uni::PGUP, uni::PAUS, uni::NO],
];

/// Scan Code Set 3 (122-key terminal): indexed directly by scan code.
static TERMINAL: [[u8; 8]; 16] = [
    // 0x00
    [uni::NO, uni::LGUI, uni::VOLD, uni::PAUS, uni::SLCK, uni::PSCR, uni::ESC, uni::F1],
    // 0x08
    [uni::F13, uni::RGUI, uni::VOLU, uni::MHEN, uni::HENK, uni::TAB, uni::GRV, uni::F2],
    // 0x10
    [uni::F14, uni::LCTL, uni::LSFT, uni::NUBS, uni::CAPS, uni::Q, uni::N1, uni::F3],
    // 0x18
    [uni::F15, uni::LALT, uni::Z, uni::S, uni::A, uni::W, uni::N2, uni::F4],
    // 0x20
    [uni::F16, uni::C, uni::X, uni::D, uni::E, uni::N4, uni::N3, uni::F5],
    // 0x28
    [uni::F17, uni::SPC, uni::V, uni::F, uni::T, uni::R, uni::N5, uni::F6],
    // 0x30
    [uni::F18, uni::N, uni::B, uni::H, uni::G, uni::Y, uni::N6, uni::F7],
    // 0x38
    [uni::F19, uni::RALT, uni::M, uni::J, uni::U, uni::N7, uni::N8, uni::F8],
    // 0x40
    [uni::F20, uni::COMM, uni::K, uni::I, uni::O, uni::N0, uni::N9, uni::F9],
    // 0x48
    [uni::F21, uni::DOT, uni::SLSH, uni::L, uni::SCLN, uni::P, uni::MINS, uni::F10],
    // 0x50
    [uni::F22, uni::RO, uni::QUOT, uni::NUHS, uni::LBRC, uni::EQL, uni::F11, uni::F23],
    // 0x58
    [uni::RCTL, uni::RSFT, uni::ENT, uni::RBRC, uni::BSLS, uni::JYEN, uni::F12, uni::F24],
    // 0x60
    [uni::DOWN, uni::LEFT, uni::APP, uni::UP, uni::DEL, uni::END, uni::BSPC, uni::INS],
    // 0x68
    [uni::KANA, uni::P1, uni::RGHT, uni::P4, uni::P7, uni::PGDN, uni::HOME, uni::PGUP],
    // 0x70
    [uni::P0, uni::PDOT, uni::P2, uni::P5, uni::P6, uni::P8, uni::NLCK, uni::PSLS],
    // 0x78
    [uni::PEQL, uni::PENT, uni::P3, uni::PCMM, uni::PPLS, uni::P9, uni::PAST, uni::PMNS],
];

/// Translate an internal matrix coordinate to a universal key position.
///
/// Returns [`uni::NO`] for coordinates outside the family's table, and for
/// families without a table (nothing attached, refused devices).
pub fn universal_position(family: Family, row: u8, col: u8) -> u8 {
    let table: &[[u8; 8]] = match family {
        Family::Xt => &XT,
        Family::At => &AT,
        Family::Terminal => &TERMINAL,
        Family::None | Family::Other => return uni::NO,
    };
    table
        .get(row as usize)
        .and_then(|r| r.get(col as usize))
        .copied()
        .unwrap_or(uni::NO)
}
