//! Scan-to-report engine.
//!
//! Pure logic, no hardware types anywhere in here: the firmware and
//! the host test suite drive the same code.

pub mod action;
pub mod keymap;
pub mod scan;
