//! BLE advertising for the HID keyboard.
//!
//! The advertising payload is assembled by hand as AD structures
//! (length, type, data). Hosts filter on the HID service UUID and the
//! keyboard appearance, so both go in the advertising packet; the
//! device name rides in the scan response.

use nrf_softdevice::ble::peripheral::{self, AdvertiseError, ConnectableAdvertisement};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

use crate::ble::bonder::Bonder;
use crate::config;

/// Advertising data: flags, HID service UUID, keyboard appearance.
#[rustfmt::skip]
const ADV_DATA: &[u8] = &[
    // Flags: LE General Discoverable, BR/EDR not supported.
    0x02, 0x01, 0x06,
    // Complete list of 16-bit service UUIDs: 0x1812 (HID).
    0x03, 0x03, 0x12, 0x18,
    // Appearance: 961 (0x03C1), keyboard.
    0x03, 0x19, 0xC1, 0x03,
];

/// Scan response data: complete local name.
/// Must spell out `config::BLE_DEVICE_NAME`.
#[rustfmt::skip]
const SCAN_DATA: &[u8] = &[
    0x07, 0x09, b'A', b'r', b't', b'P', b'a', b'd',
];

/// Advertise until a central connects, answering pairing requests
/// through the bonder. Resolves with the new connection.
pub async fn advertise(
    sd: &'static Softdevice,
    bonder: &'static Bonder,
) -> Result<Connection, AdvertiseError> {
    let adv_config = peripheral::Config {
        interval: config::BLE_ADV_INTERVAL,
        ..Default::default()
    };

    let adv = ConnectableAdvertisement::ScannableUndirected {
        adv_data: ADV_DATA,
        scan_data: SCAN_DATA,
    };

    peripheral::advertise_pairable(sd, adv, &adv_config, bonder).await
}
