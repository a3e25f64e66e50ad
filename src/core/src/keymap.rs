//! Layered action keymaps.
//!
//! The translation tables depend on which keyboard is plugged in; the
//! keymap depends only on the user's logical layout. Keeping them apart
//! lets one action map serve all three keyboard families.

use keybridge_common::layout as uni;
use keybridge_common::Action;

/// One layer: an action for every universal key position.
pub type Layer = [[Action; uni::COLS]; uni::ROWS];

/// A stack of layers consulted by the action resolver.
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    layers: &'static [Layer],
}

impl Keymap {
    /// Wrap a static layer stack.
    pub const fn new(layers: &'static [Layer]) -> Self {
        Keymap { layers }
    }

    /// The action at `(layer, row, col)`.
    ///
    /// Anything outside the map resolves to [`Action::NONE`].
    pub fn action(&self, layer: u8, row: u8, col: u8) -> Action {
        self.layers
            .get(layer as usize)
            .and_then(|l| l.get(row as usize))
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(Action::NONE)
    }

    /// Number of layers in the map.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Tag bit distinguishing transparent actions from [`Action::NONE`].
const TRANSPARENT_TAG: u16 = 0x0100;

const TRANSPARENT_LAYER: Layer = {
    let mut layer = [[Action::NONE; uni::COLS]; uni::ROWS];
    let mut row = 0;
    while row < uni::ROWS {
        let mut col = 0;
        while col < uni::COLS {
            layer[row][col] = Action(TRANSPARENT_TAG | ((row as u16) << 4) | col as u16);
            col += 1;
        }
        row += 1;
    }
    layer
};

/// A single-layer map whose action values encode their own universal
/// position (`0x0100 | position`).
///
/// Useful as a starting point for real keymaps and as a fixture when
/// exercising the resolver.
pub static TRANSPARENT: Keymap = Keymap::new(&[TRANSPARENT_LAYER]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_actions_encode_their_position() {
        assert_eq!(TRANSPARENT.layer_count(), 1);
        assert_eq!(TRANSPARENT.action(0, 0, 0).0, TRANSPARENT_TAG);
        assert_eq!(
            TRANSPARENT.action(0, uni::row(uni::A), uni::col(uni::A)),
            Action(TRANSPARENT_TAG | uni::A as u16)
        );
    }

    #[test]
    fn out_of_range_lookups_resolve_to_none() {
        assert_eq!(TRANSPARENT.action(1, 0, 0), Action::NONE);
        assert_eq!(TRANSPARENT.action(0, 8, 0), Action::NONE);
        assert_eq!(TRANSPARENT.action(0, 0, 16), Action::NONE);
    }
}
