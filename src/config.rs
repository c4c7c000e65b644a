//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Scan loop

/// Channel poll interval (ms). Every cycle reads all switches once.
pub const POLL_INTERVAL_MS: u64 = 10;

/// Depth of the report queue between the scan loop and the BLE task.
/// When the queue is full (host asleep, link congested) new reports
/// are dropped, the scan loop never waits.
pub const REPORT_QUEUE_DEPTH: usize = 16;

/// Depth of the status event queue feeding the LED task.
pub const STATUS_QUEUE_DEPTH: usize = 4;

// BLE

/// GAP device name, also advertised in the scan response.
pub const BLE_DEVICE_NAME: &str = "ArtPad";

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

/// Maximum number of bonded hosts remembered (RAM only).
pub const MAX_BONDED_PEERS: usize = 4;

// Status LEDs

/// Blink half-period of the link LED while advertising (ms).
pub const LED_BLINK_INTERVAL_MS: u64 = 500;

// Battery monitoring

/// Time between battery voltage measurements (seconds).
pub const BATTERY_MEASURE_INTERVAL_SECS: u64 = 60;

/// Millivolt endpoints of the linear charge estimate for the 1S LiPo.
pub const BATTERY_EMPTY_MV: u32 = 3300;
pub const BATTERY_FULL_MV: u32 = 4200;

// GPIO pin assignments (Adafruit Feather nRF52840 Express)
//
// These are logical names; actual `embassy_nrf::peripherals::*` pins are
// wired up in `main.rs`, in channel order.  Adjust for your build.
//
//   Channel  0  Small 1 (toggle) → P0.05 (A1)
//   Channel  1  Shoulder left    → P0.04 (A0)
//   Channel  2  Shoulder right   → P0.08 (D12)
//   Channel  3  Large 1          → P0.06 (D11)
//   Channel  4  Large 2          → P0.27 (D10)
//   Channel  5  Small 2          → P0.30 (A2)
//   Channel  6  Small 3          → P0.28 (A3)
//   Channel  7  Small 4          → P0.26 (D9)
//   Channel  8  Small 5          → P0.03 (A5)
//   Channel  9  Small 6          → P1.08 (D5)
//   Channel 10  Large 3          → P0.02 (A4)
//
//   Red LED (profile)            → P1.15
//   Blue LED (link state)        → P1.10
//   VBAT resistor divider        → P0.29 (A6)
