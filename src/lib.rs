//! Test-only library interface for artpad.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required).
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// HID Module Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub mod hid {
    pub mod keyboard {
        pub use crate::hid_keyboard_impl::*;
    }
    pub mod keycodes {
        pub use crate::hid_keycodes_impl::*;
    }

    pub use keyboard::KeyboardReport;
}

// ═══════════════════════════════════════════════════════════════════════════
// Scan Engine Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub mod engine {
    pub mod action {
        pub use crate::engine_action_impl::*;
    }
    pub mod keymap {
        pub use crate::engine_keymap_impl::*;
    }
    pub mod scan {
        pub use crate::engine_scan_impl::*;
    }

    pub use action::{Action, Channel, Keystroke, Profile};
    pub use keymap::{ConfigError, Keymap};
    pub use scan::{ChannelReader, ReportSender, ScanEngine};
}

pub mod layout {
    pub use crate::layout_impl::*;
}

pub mod battery_logic {
    pub use crate::battery_logic_impl::*;
}

// Internal module paths for the actual implementations
#[path = "hid/keyboard.rs"]
mod hid_keyboard_impl;
#[path = "hid/keycodes.rs"]
mod hid_keycodes_impl;

#[path = "engine/action.rs"]
mod engine_action_impl;
#[path = "engine/keymap.rs"]
mod engine_keymap_impl;
#[path = "engine/scan.rs"]
mod engine_scan_impl;

#[path = "layout.rs"]
mod layout_impl;

#[path = "battery_logic.rs"]
mod battery_logic_impl;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::battery_logic;
    use super::engine::action::{Channel, Keystroke, Profile};
    use super::engine::keymap::{ConfigError, Keymap};
    use super::engine::scan::{ChannelReader, ReportSender, ScanEngine};
    use super::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR};
    use super::hid::keycodes::*;
    use super::layout;

    // ════════════════════════════════════════════════════════════════════════
    // Test doubles
    // ════════════════════════════════════════════════════════════════════════

    /// Channel reader scripted from the outside: tests list which
    /// channels are held before each cycle.
    #[derive(Default)]
    struct Held {
        channels: Vec<u8>,
    }

    impl Held {
        fn set(&mut self, channels: &[u8]) {
            self.channels = channels.to_vec();
        }
    }

    impl ChannelReader for Held {
        fn is_pressed(&mut self, channel: Channel) -> bool {
            self.channels.contains(&channel.index())
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Sent {
        Report(KeyboardReport),
        Release,
    }

    /// Report sink that records everything the engine emits.
    #[derive(Default)]
    struct Outbox {
        sent: Vec<Sent>,
    }

    impl Outbox {
        fn take(&mut self) -> Vec<Sent> {
            core::mem::take(&mut self.sent)
        }
    }

    impl ReportSender for Outbox {
        fn send(&mut self, report: KeyboardReport) {
            self.sent.push(Sent::Report(report));
        }

        fn send_release(&mut self) {
            self.sent.push(Sent::Release);
        }
    }

    fn single(modifier: u8, keycode: u8) -> Sent {
        Sent::Report(KeyboardReport::single(modifier, keycode))
    }

    fn chord(keys: &[u8]) -> Sent {
        Sent::Report(KeyboardReport::chord(keys))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Test keymaps
    // ════════════════════════════════════════════════════════════════════════

    const TEST_PRIMARY: &[(Channel, Keystroke)] = &[
        (Channel(1), Keystroke::new(MOD_LCTRL, KEY_Z)),
        (Channel(2), Keystroke::plain(KEY_E)),
    ];
    const TEST_SECONDARY: &[(Channel, Keystroke)] = &[
        (Channel(1), Keystroke::new(MOD_LGUI, KEY_Z)),
        (Channel(2), Keystroke::plain(KEY_C)),
    ];
    const TEST_CHORD: &[(Channel, u8)] = &[
        (Channel(3), KEY_1),
        (Channel(4), KEY_2),
        (Channel(5), KEY_3),
    ];

    /// Small map: toggle on 0, two profile channels, three chord keys.
    const TEST_MAP: Keymap = Keymap {
        toggle: Channel(0),
        fallback: Keystroke::plain(KEY_B),
        primary: TEST_PRIMARY,
        secondary: TEST_SECONDARY,
        chord: TEST_CHORD,
    };

    /// Map with more chord members than fit in one report.
    const WIDE_CHORD: &[(Channel, u8)] = &[
        (Channel(1), KEY_1),
        (Channel(2), KEY_2),
        (Channel(3), KEY_3),
        (Channel(4), KEY_4),
        (Channel(5), KEY_5),
        (Channel(6), KEY_6),
        (Channel(7), KEY_7),
    ];
    const WIDE_MAP: Keymap = Keymap {
        toggle: Channel(0),
        fallback: Keystroke::plain(KEY_B),
        primary: &[],
        secondary: &[],
        chord: WIDE_CHORD,
    };

    fn engine(map: Keymap) -> ScanEngine {
        ScanEngine::new(map).expect("test keymap must validate")
    }

    // ════════════════════════════════════════════════════════════════════════
    // Report layout
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn keyboard_report_empty() {
        let report = KeyboardReport::empty();
        assert!(report.is_empty());
        assert_eq!(report.modifier, 0);
        assert_eq!(report.reserved, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }

    #[test]
    fn keyboard_report_single_layout() {
        let report = KeyboardReport::single(MOD_LCTRL, KEY_Z);
        assert_eq!(report.modifier, MOD_LCTRL);
        assert_eq!(report.keycodes, [KEY_Z, 0, 0, 0, 0, 0]);
        assert!(!report.is_empty());
    }

    #[test]
    fn keyboard_report_chord_pads_with_zeroes() {
        let report = KeyboardReport::chord(&[KEY_1, KEY_2]);
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [KEY_1, KEY_2, 0, 0, 0, 0]);
    }

    #[test]
    fn keyboard_report_serialize() {
        let report = KeyboardReport::single(MOD_LSHIFT, KEY_A);
        let mut buf = [0u8; 8];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 8);
        assert_eq!(buf, [MOD_LSHIFT, 0x00, KEY_A, 0, 0, 0, 0, 0]);
        assert_eq!(report.to_bytes(), buf);
    }

    #[test]
    fn keyboard_report_serialize_short_buffer() {
        let report = KeyboardReport::single(0, KEY_A);
        let mut buf = [0u8; 4];
        assert_eq!(report.serialize(&mut buf), 0);
    }

    #[test]
    fn report_descriptor_shape() {
        // Usage Page (Generic Desktop), Usage (Keyboard) up front,
        // End Collection at the end.
        assert_eq!(&KEYBOARD_REPORT_DESCRIPTOR[..4], &[0x05, 0x01, 0x09, 0x06]);
        assert_eq!(*KEYBOARD_REPORT_DESCRIPTOR.last().unwrap(), 0xC0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scan cycles: keystroke channels
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn idle_cycles_emit_nothing() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        for _ in 0..5 {
            eng.scan_cycle(&mut held, &mut out);
        }
        assert!(out.take().is_empty());
    }

    #[test]
    fn pressed_channel_emits_every_cycle_it_is_held() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[1]);
        for _ in 0..3 {
            eng.scan_cycle(&mut held, &mut out);
        }

        assert_eq!(
            out.take(),
            vec![
                single(MOD_LCTRL, KEY_Z),
                single(MOD_LCTRL, KEY_Z),
                single(MOD_LCTRL, KEY_Z),
            ]
        );
    }

    #[test]
    fn release_report_sent_exactly_once() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[2]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[]);
        eng.scan_cycle(&mut held, &mut out);
        eng.scan_cycle(&mut held, &mut out);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![single(0, KEY_E), Sent::Release]);
    }

    #[test]
    fn two_profile_channels_give_two_reports_in_channel_order() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        // Scripted in reverse to show order comes from the table.
        held.set(&[2, 1]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(
            out.take(),
            vec![single(MOD_LCTRL, KEY_Z), single(0, KEY_E)]
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scan cycles: profile toggle
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn toggle_press_switches_profile_silently() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        assert_eq!(eng.profile(), Profile::Primary);

        held.set(&[0]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(eng.profile(), Profile::Secondary);
        assert!(out.take().is_empty());
    }

    #[test]
    fn profile_channel_resolves_under_new_profile_after_toggle() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[0]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[1]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![single(MOD_LGUI, KEY_Z)]);
    }

    #[test]
    fn toggle_flip_applies_within_the_same_cycle() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        // Toggle and channel 1 land in the same cycle: channel 1 must
        // already resolve against the secondary table.
        held.set(&[0, 1]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![single(MOD_LGUI, KEY_Z)]);
    }

    #[test]
    fn held_toggle_emits_fallback_every_cycle_once_secondary() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[0]);
        eng.scan_cycle(&mut held, &mut out); // flip, silent
        eng.scan_cycle(&mut held, &mut out); // fallback
        eng.scan_cycle(&mut held, &mut out); // fallback

        assert_eq!(out.take(), vec![single(0, KEY_B), single(0, KEY_B)]);
    }

    #[test]
    fn toggle_press_does_not_delay_pending_release() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        // Key down, then the only thing held is the switching toggle
        // press. The flip is not key activity, so the release from the
        // previous cycle still fires.
        held.set(&[1]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[0]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![single(MOD_LCTRL, KEY_Z), Sent::Release]);
        assert_eq!(eng.profile(), Profile::Secondary);
    }

    #[test]
    fn fallback_keystroke_gets_a_release_when_toggle_let_go() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[0]);
        eng.scan_cycle(&mut held, &mut out); // flip
        eng.scan_cycle(&mut held, &mut out); // fallback (counts as pressed)
        held.set(&[]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![single(0, KEY_B), Sent::Release]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scan cycles: chord group
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn chord_members_share_one_report() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[4, 3]);
        eng.scan_cycle(&mut held, &mut out);

        // Ascending channel order, zero modifier.
        assert_eq!(out.take(), vec![chord(&[KEY_1, KEY_2])]);
    }

    #[test]
    fn chord_and_keystroke_channels_mix_in_one_cycle() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[1, 3, 5]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(
            out.take(),
            vec![single(MOD_LCTRL, KEY_Z), chord(&[KEY_1, KEY_3])]
        );
    }

    #[test]
    fn chord_overflow_flushes_full_report_and_continues() {
        let mut eng = engine(WIDE_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[1, 2, 3, 4, 5, 6, 7]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(
            out.take(),
            vec![
                chord(&[KEY_1, KEY_2, KEY_3, KEY_4, KEY_5, KEY_6]),
                chord(&[KEY_7]),
            ]
        );
    }

    #[test]
    fn exactly_six_chord_members_fill_one_report() {
        let mut eng = engine(WIDE_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[1, 2, 3, 4, 5, 6]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(
            out.take(),
            vec![chord(&[KEY_1, KEY_2, KEY_3, KEY_4, KEY_5, KEY_6])]
        );
    }

    #[test]
    fn chord_release_still_single_report() {
        let mut eng = engine(TEST_MAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[3, 4, 5]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(
            out.take(),
            vec![chord(&[KEY_1, KEY_2, KEY_3]), Sent::Release]
        );
    }

    #[test]
    fn identical_snapshot_sequences_give_identical_reports() {
        let script: &[&[u8]] = &[&[1], &[1, 3], &[0], &[0], &[], &[2, 4, 5], &[]];

        let run = || {
            let mut eng = engine(TEST_MAP);
            let mut held = Held::default();
            let mut out = Outbox::default();
            for cycle in script {
                held.set(cycle);
                eng.scan_cycle(&mut held, &mut out);
            }
            out.take()
        };

        assert_eq!(run(), run());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Keymap validation through the engine
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn engine_rejects_invalid_keymap() {
        let bad = Keymap {
            chord: &[(Channel(2), KEY_1)],
            ..TEST_MAP
        };
        assert_eq!(
            ScanEngine::new(bad).err(),
            Some(ConfigError::ChannelInBothGroups(Channel(2)))
        );
    }

    #[test]
    fn engine_accepts_device_keymap() {
        assert!(ScanEngine::new(layout::DEVICE_KEYMAP).is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Device layout behaviour
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn device_undo_is_ctrl_z_then_cmd_z_after_toggle() {
        let mut eng = engine(layout::DEVICE_KEYMAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[layout::LARGE_1.index()]);
        eng.scan_cycle(&mut held, &mut out);
        assert_eq!(out.take(), vec![single(MOD_LCTRL, KEY_Z)]);

        held.set(&[layout::SMALL_1.index()]);
        eng.scan_cycle(&mut held, &mut out);
        held.set(&[]);
        eng.scan_cycle(&mut held, &mut out);
        out.take();

        held.set(&[layout::LARGE_1.index()]);
        eng.scan_cycle(&mut held, &mut out);
        assert_eq!(out.take(), vec![single(MOD_LGUI, KEY_Z)]);
    }

    #[test]
    fn device_chord_keys_type_digits() {
        let mut eng = engine(layout::DEVICE_KEYMAP);
        let mut held = Held::default();
        let mut out = Outbox::default();

        held.set(&[
            layout::SMALL_4.index(),
            layout::SMALL_6.index(),
            layout::LARGE_3.index(),
        ]);
        eng.scan_cycle(&mut held, &mut out);

        assert_eq!(out.take(), vec![chord(&[KEY_1, KEY_3, KEY_4])]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Battery gauge
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn battery_millivolts_from_raw_samples() {
        assert_eq!(battery_logic::millivolts_from_raw(0), 0);
        assert_eq!(battery_logic::millivolts_from_raw(-12), 0);
        // Full 4.2 V battery: 2.1 V at the pin = 2389 counts.
        assert_eq!(battery_logic::millivolts_from_raw(2389), 4198);
    }

    #[test]
    fn battery_percent_clamps_and_interpolates() {
        assert_eq!(battery_logic::percent_from_millivolts(3200, 3300, 4200), 0);
        assert_eq!(battery_logic::percent_from_millivolts(3300, 3300, 4200), 0);
        assert_eq!(battery_logic::percent_from_millivolts(3750, 3300, 4200), 50);
        assert_eq!(battery_logic::percent_from_millivolts(4200, 3300, 4200), 100);
        assert_eq!(battery_logic::percent_from_millivolts(5000, 3300, 4200), 100);
    }

    #[test]
    fn battery_percent_degenerate_range_reads_empty() {
        assert_eq!(battery_logic::percent_from_millivolts(3700, 4200, 3300), 0);
    }

    #[test]
    fn battery_level_tracker_fires_on_change_only() {
        let mut tracker = battery_logic::LevelTracker::new();

        // First reading after boot is always news to the host.
        assert!(tracker.update(82));
        assert!(!tracker.update(82));
        assert!(!tracker.update(82));
        assert!(tracker.update(81));
        assert!(!tracker.update(81));
        assert!(tracker.update(82));
    }
}
