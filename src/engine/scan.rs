//! Scan engine: turns per-cycle channel snapshots into HID reports.
//!
//! One call to [`ScanEngine::scan_cycle`] reads every mapped channel
//! once and pushes the resulting reports at the sender. The engine is
//! single threaded and owns all its state; hardware access and radio
//! transport stay behind the two traits below.

use crate::engine::action::{Channel, Profile};
use crate::engine::keymap::{ConfigError, Keymap};
use crate::hid::keyboard::{KeyboardReport, MAX_KEYCODES};

use heapless::Vec;

/// Backend that samples the physical state of input channels.
pub trait ChannelReader {
    /// Whether the channel is active right now. Backends normalise
    /// polarity so `true` always means pressed; channels they cannot
    /// read report as released.
    fn is_pressed(&mut self, channel: Channel) -> bool;
}

/// Sink for finished keyboard reports.
///
/// Implementations must not block the scan loop. A sender that cannot
/// take a report drops it; the engine never retries.
pub trait ReportSender {
    /// Queue one report for transmission.
    fn send(&mut self, report: KeyboardReport);
    /// Queue the all-keys-released report.
    fn send_release(&mut self);
}

/// The scan-to-report state machine.
///
/// State is two fields: the active profile and whether the previous
/// cycle saw any pressed channel (drives release reports). Everything
/// else is recomputed from scratch every cycle.
pub struct ScanEngine {
    keymap: Keymap,
    profile: Profile,
    was_any_pressed: bool,
}

impl ScanEngine {
    /// Build an engine over a validated keymap.
    ///
    /// A keymap that fails validation never scans; the caller treats
    /// this as fatal.
    pub fn new(keymap: Keymap) -> Result<Self, ConfigError> {
        keymap.validate()?;
        Ok(Self {
            keymap,
            profile: Profile::Primary,
            was_any_pressed: false,
        })
    }

    /// Currently active profile.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Run one complete scan cycle.
    ///
    /// Channel order within a cycle is fixed: the toggle channel first,
    /// then the profile-specific channels, then the chord group, both
    /// in ascending channel order. A profile flip triggered by the
    /// toggle applies to the rest of the same cycle.
    pub fn scan_cycle(&mut self, reader: &mut impl ChannelReader, sender: &mut impl ReportSender) {
        let mut any_pressed = false;

        if reader.is_pressed(self.keymap.toggle) {
            match self.profile {
                Profile::Primary => {
                    // The switching press emits nothing and does not
                    // count as key activity, so a pending release still
                    // goes out at the bottom of this cycle.
                    self.profile = Profile::Secondary;
                }
                Profile::Secondary => {
                    // No way back; a held toggle now types the fallback
                    // keystroke, once per cycle.
                    any_pressed = true;
                    let fb = self.keymap.fallback;
                    sender.send(KeyboardReport::single(fb.modifier, fb.keycode));
                }
            }
        }

        for &(ch, stroke) in self.keymap.profile_table(self.profile) {
            if reader.is_pressed(ch) {
                any_pressed = true;
                sender.send(KeyboardReport::single(stroke.modifier, stroke.keycode));
            }
        }

        let mut chord: Vec<u8, MAX_KEYCODES> = Vec::new();
        for &(ch, key) in self.keymap.chord {
            if reader.is_pressed(ch) {
                any_pressed = true;
                // Cannot fail: the accumulator is flushed at capacity below.
                let _ = chord.push(key);
                if chord.is_full() {
                    sender.send(KeyboardReport::chord(&chord));
                    chord.clear();
                }
            }
        }
        if !chord.is_empty() {
            sender.send(KeyboardReport::chord(&chord));
        }

        if any_pressed {
            self.was_any_pressed = true;
        } else if self.was_any_pressed {
            sender.send_release();
            self.was_any_pressed = false;
        }
    }
}
