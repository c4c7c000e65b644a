//! HID keyboard report types, usage IDs and the report map.

pub mod keyboard;
pub mod keycodes;
