//! Unified error type for artpad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;
use nrf_softdevice::ble::gatt_server::{NotifyValueError, SetValueError};

use crate::engine::keymap::ConfigError;

/// Top-level error type used across the application.
#[derive(Debug, Format)]
pub enum Error {
    /// The keymap failed validation; the device refuses to start.
    Config(ConfigError),

    /// GATT service registration with the SoftDevice failed.
    GattRegisterFailed,

    /// A GATT characteristic value could not be staged in the
    /// SoftDevice attribute table.
    GattValueFailed,

    /// A report notification was rejected by the SoftDevice (no
    /// subscriber yet, or out of notification buffers).
    NotifyFailed,
}

// Convenience conversions

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SetValueError> for Error {
    fn from(_: SetValueError) -> Self {
        Error::GattValueFailed
    }
}

impl From<NotifyValueError> for Error {
    fn from(_: NotifyValueError) -> Self {
        Error::NotifyFailed
    }
}
