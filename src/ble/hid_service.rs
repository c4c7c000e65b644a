//! HID-over-GATT and Battery GATT services.
//!
//! The `#[nrf_softdevice::gatt_service]` macro generates the attribute
//! table registration plus typed `_get`/`_set`/`_notify` helpers for
//! the listed characteristics; `#[nrf_softdevice::gatt_server]` ties
//! the services together and generates the connection event enum.
//!
//! Characteristic inventory follows the HID Service spec (0x1812):
//! HID Information, Report Map, HID Control Point, Protocol Mode and
//! one Input Report.

use defmt::info;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

use crate::error::Error;
use crate::hid::keyboard::{KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};

/// HID Information characteristic value:
/// bcdHID 1.11 (little endian), country code 0, flags = normally connectable.
const HID_INFO: [u8; 4] = [0x11, 0x01, 0x00, 0x02];

/// Protocol Mode values per the HID Service spec.
const PROTOCOL_MODE_BOOT: u8 = 0;
const PROTOCOL_MODE_REPORT: u8 = 1;

#[nrf_softdevice::gatt_service(uuid = "1812")]
pub struct HidService {
    /// HID Information (0x2A4A) - version, country code, flags.
    #[characteristic(uuid = "2a4a", read)]
    pub hid_info: [u8; 4],

    /// Report Map (0x2A4B) - the keyboard report descriptor.
    #[characteristic(uuid = "2a4b", read)]
    pub report_map: [u8; 64],

    /// HID Control Point (0x2A4C) - suspend / exit-suspend commands.
    #[characteristic(uuid = "2a4c", write_without_response)]
    pub control_point: u8,

    /// Protocol Mode (0x2A4E) - boot vs report protocol.
    #[characteristic(uuid = "2a4e", read, write_without_response)]
    pub protocol_mode: u8,

    /// Input Report (0x2A4D) - live 8-byte keyboard reports.
    #[characteristic(uuid = "2a4d", read, notify)]
    pub report: [u8; KEYBOARD_REPORT_SIZE],
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    /// Battery Level (0x2A19) - charge estimate in percent.
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
    pub hid: HidService,
}

/// Register the GATT server and stage the static characteristic
/// values. Must be called exactly once, before advertising starts.
pub fn init(sd: &mut Softdevice) -> Result<&'static Server, Error> {
    static SERVER: StaticCell<Server> = StaticCell::new();

    let server = match Server::new(sd) {
        Ok(server) => SERVER.init(server),
        Err(_) => return Err(Error::GattRegisterFailed),
    };

    server.hid.hid_info_set(&HID_INFO)?;
    server.hid.report_map_set(&KEYBOARD_REPORT_DESCRIPTOR)?;
    server.hid.protocol_mode_set(&PROTOCOL_MODE_REPORT)?;

    info!("GATT server registered (HID + battery)");
    Ok(server)
}

/// Handle a write from the host to one of our characteristics.
///
/// Reports only flow out of the device, so everything the host can
/// write is state we log and otherwise ignore: this keyboard has no
/// suspend mode to enter and its reports are boot-layout already.
pub fn on_gatt_event(event: ServerEvent) {
    match event {
        ServerEvent::Hid(e) => match e {
            HidServiceEvent::ControlPointWrite(cmd) => {
                info!("HID control point: {}", cmd);
            }
            HidServiceEvent::ProtocolModeWrite(mode) => match mode {
                PROTOCOL_MODE_BOOT => info!("host requested boot protocol"),
                PROTOCOL_MODE_REPORT => info!("host requested report protocol"),
                _ => info!("host wrote unknown protocol mode: {}", mode),
            },
            HidServiceEvent::ReportCccdWrite { notifications } => {
                info!("report notifications: {}", notifications);
            }
        },
        ServerEvent::Bas(e) => match e {
            BatteryServiceEvent::BatteryLevelCccdWrite { notifications } => {
                info!("battery notifications: {}", notifications);
            }
        },
    }
}
