//! Core vocabulary of the scan engine: channels, profiles, actions.

/// Stable identifier of one input channel (a physical switch).
///
/// Channel numbering is fixed by the keymap and independent of which
/// GPIO pin the switch happens to be wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(pub u8);

impl Channel {
    /// Zero-based index used to look the channel up in reader backends.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Active shortcut set.
///
/// The device boots into [`Profile::Primary`]. A press on the toggle
/// channel switches to [`Profile::Secondary`] for the rest of the
/// session; there is no path back without a power cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    Primary,
    Secondary,
}

/// One key press as it appears on the wire: modifier bitfield plus a
/// single usage ID from the Keyboard/Keypad page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keystroke {
    pub modifier: u8,
    pub keycode: u8,
}

impl Keystroke {
    pub const fn new(modifier: u8, keycode: u8) -> Self {
        Self { modifier, keycode }
    }

    /// Keystroke with no modifiers held.
    pub const fn plain(keycode: u8) -> Self {
        Self {
            modifier: 0,
            keycode,
        }
    }
}

/// What a pressed channel means under the active profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Emit one standalone report carrying this keystroke.
    Keystroke(Keystroke),
    /// Switch the active profile (level-triggered, see the scan loop).
    ToggleProfile,
    /// Contribute one unmodified key code to the shared chord report.
    ChordKey(u8),
}
