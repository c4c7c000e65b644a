//! Action table: which channel does what under which profile.
//!
//! The table names channels explicitly instead of relying on the order
//! switches were wired in. Three groups exist:
//!
//! - one toggle channel that switches the active profile,
//! - profile-specific channels, each resolving to its own keystroke,
//! - a chord group whose pressed members share a single report.
//!
//! A keymap is validated once at startup; a bad table is fatal before
//! the first scan cycle runs.

use crate::engine::action::{Action, Channel, Keystroke, Profile};

/// Rejected keymap shapes, reported before the engine starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Primary and secondary tables must map the same channels in the
    /// same order; a channel mapped for one profile only is a hole the
    /// scan loop would fall into after a toggle.
    ProfileTablesDiffer,
    /// Table entries must be in strictly ascending channel order. This
    /// fixes the emission order of reports and rules out duplicates.
    TableOutOfOrder(Channel),
    /// The toggle channel may not carry a second meaning.
    ToggleChannelMapped(Channel),
    /// A channel cannot be both profile-specific and a chord member.
    ChannelInBothGroups(Channel),
}

/// Complete action table for one device.
///
/// All tables are static slices so a keymap is plain data; the engine
/// never mutates it.
#[derive(Clone, Copy, Debug)]
pub struct Keymap {
    /// Channel that switches Primary -> Secondary.
    pub toggle: Channel,
    /// Keystroke emitted when the toggle channel is held while the
    /// profile is already Secondary.
    pub fallback: Keystroke,
    /// Per-channel keystrokes under [`Profile::Primary`].
    pub primary: &'static [(Channel, Keystroke)],
    /// Per-channel keystrokes under [`Profile::Secondary`].
    pub secondary: &'static [(Channel, Keystroke)],
    /// Channels whose key codes accumulate into one shared report.
    pub chord: &'static [(Channel, u8)],
}

impl Keymap {
    /// Keystroke table for the given profile.
    pub fn profile_table(&self, profile: Profile) -> &'static [(Channel, Keystroke)] {
        match profile {
            Profile::Primary => self.primary,
            Profile::Secondary => self.secondary,
        }
    }

    /// Look up what a channel means under the given profile.
    ///
    /// Returns `None` for channels the table does not mention; the scan
    /// loop never polls those.
    pub fn resolve(&self, profile: Profile, channel: Channel) -> Option<Action> {
        if channel == self.toggle {
            return Some(Action::ToggleProfile);
        }
        if let Some(&(_, stroke)) = self
            .profile_table(profile)
            .iter()
            .find(|&&(ch, _)| ch == channel)
        {
            return Some(Action::Keystroke(stroke));
        }
        self.chord
            .iter()
            .find(|&&(ch, _)| ch == channel)
            .map(|&(_, key)| Action::ChordKey(key))
    }

    /// Check the table invariants. Called once before the first scan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary.len() != self.secondary.len() {
            return Err(ConfigError::ProfileTablesDiffer);
        }
        for (p, s) in self.primary.iter().zip(self.secondary.iter()) {
            if p.0 != s.0 {
                return Err(ConfigError::ProfileTablesDiffer);
            }
        }

        // Secondary shares primary's channel column, checking one is enough.
        check_ascending(self.primary.iter().map(|e| e.0))?;
        check_ascending(self.chord.iter().map(|e| e.0))?;

        for &(ch, _) in self.primary {
            if ch == self.toggle {
                return Err(ConfigError::ToggleChannelMapped(ch));
            }
        }
        for &(ch, _) in self.chord {
            if ch == self.toggle {
                return Err(ConfigError::ToggleChannelMapped(ch));
            }
            if self.primary.iter().any(|&(p, _)| p == ch) {
                return Err(ConfigError::ChannelInBothGroups(ch));
            }
        }
        Ok(())
    }
}

fn check_ascending(channels: impl Iterator<Item = Channel>) -> Result<(), ConfigError> {
    let mut prev: Option<Channel> = None;
    for ch in channels {
        if let Some(p) = prev {
            if ch <= p {
                return Err(ConfigError::TableOutOfOrder(ch));
            }
        }
        prev = Some(ch);
    }
    Ok(())
}
