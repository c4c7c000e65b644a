//! Keymap of the eleven-button art pad.
//!
//! The deck has two shoulder buttons on the top edge, three large keys
//! down the left side and six small keys in a two-column block. Channel
//! numbers are fixed here; [`crate::config`] maps them to pins.
//!
//! Shortcut sets:
//! - `WINDOWS` (primary): desktop art apps, Ctrl-style shortcuts.
//! - `PROCREATE` (secondary): iPad, Cmd-style shortcuts.
//!
//! The small keys 4-6 and the third large key form the chord group and
//! type the digits 1 to 4 in any combination, for preset and layer
//! pickers that bind one digit per slot.

use crate::engine::action::{Channel, Keystroke};
use crate::engine::keymap::Keymap;
use crate::hid::keycodes::*;

/// Number of wired input channels.
pub const CHANNEL_COUNT: usize = 11;

pub const SMALL_1: Channel = Channel(0);
pub const SHOULDER_LEFT: Channel = Channel(1);
pub const SHOULDER_RIGHT: Channel = Channel(2);
pub const LARGE_1: Channel = Channel(3);
pub const LARGE_2: Channel = Channel(4);
pub const SMALL_2: Channel = Channel(5);
pub const SMALL_3: Channel = Channel(6);
pub const SMALL_4: Channel = Channel(7);
pub const SMALL_5: Channel = Channel(8);
pub const SMALL_6: Channel = Channel(9);
pub const LARGE_3: Channel = Channel(10);

const WINDOWS: &[(Channel, Keystroke)] = &[
    (SHOULDER_LEFT, Keystroke::plain(KEY_LEFT_BRACKET)), // brush smaller
    (SHOULDER_RIGHT, Keystroke::plain(KEY_RIGHT_BRACKET)), // brush larger
    (LARGE_1, Keystroke::new(MOD_LCTRL, KEY_Z)),         // undo
    (LARGE_2, Keystroke::new(MOD_LCTRL, KEY_Y)),         // redo
    (SMALL_2, Keystroke::plain(KEY_B)),                  // brush tool
    (SMALL_3, Keystroke::plain(KEY_E)),                  // eraser tool
];

const PROCREATE: &[(Channel, Keystroke)] = &[
    (SHOULDER_LEFT, Keystroke::plain(KEY_LEFT_BRACKET)), // brush smaller
    (SHOULDER_RIGHT, Keystroke::plain(KEY_RIGHT_BRACKET)), // brush larger
    (LARGE_1, Keystroke::new(MOD_LGUI, KEY_Z)),          // undo
    (LARGE_2, Keystroke::new(MOD_LGUI | MOD_LSHIFT, KEY_Z)), // redo
    (SMALL_2, Keystroke::plain(KEY_C)),                  // color popover
    (SMALL_3, Keystroke::plain(KEY_SPACE)),              // quick menu
];

const CHORD_GROUP: &[(Channel, u8)] = &[
    (SMALL_4, KEY_1),
    (SMALL_5, KEY_2),
    (SMALL_6, KEY_3),
    (LARGE_3, KEY_4),
];

/// The shipped keymap. Small key 1 switches Windows -> Procreate; once
/// in Procreate it types `B` (brush tool) instead.
pub const DEVICE_KEYMAP: Keymap = Keymap {
    toggle: SMALL_1,
    fallback: Keystroke::plain(KEY_B),
    primary: WINDOWS,
    secondary: PROCREATE,
    chord: CHORD_GROUP,
};
