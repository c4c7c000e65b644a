//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral**
//! role:
//!
//! 1. **Advertiser** - announces the device as a HID keyboard and
//!    accepts the first central that connects.
//! 2. **Bonder** - answers pairing requests so hosts get the encrypted
//!    link they require for keyboard input.
//! 3. **HID service** - the GATT attribute table (HID + battery) the
//!    connected host talks to.
//!
//! This file owns the connection lifecycle and pumps finished reports
//! from the scan engine into Input Report notifications, plus battery
//! level changes into Battery Level notifications.

pub mod advertiser;
pub mod bonder;
pub mod hid_service;

use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::{gatt_server, Connection};
use nrf_softdevice::Softdevice;

use crate::ble::bonder::Bonder;
use crate::ble::hid_service::Server;
use crate::config::{self, REPORT_QUEUE_DEPTH, STATUS_QUEUE_DEPTH};
use crate::engine::scan::ReportSender;
use crate::error::Error;
use crate::hid::keyboard::KeyboardReport;
use crate::status::StatusEvent;

/// Report sink handed to the scan engine, backed by the queue into
/// [`ble_task`]. Never blocks: when the queue is full (host asleep or
/// link congested) the report is dropped and scanning carries on.
pub struct ReportQueue {
    tx: Sender<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>,
}

impl ReportQueue {
    pub fn new(
        tx: Sender<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>,
    ) -> Self {
        Self { tx }
    }
}

impl ReportSender for ReportQueue {
    fn send(&mut self, report: KeyboardReport) {
        if self.tx.try_send(report).is_err() {
            warn!("report queue full, dropping report");
        }
    }

    fn send_release(&mut self) {
        // On the wire a release is the all-zero report.
        self.send(KeyboardReport::empty());
    }
}

/// Connection lifecycle: advertise, serve one central until it goes
/// away, repeat.
#[embassy_executor::task]
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    bonder: &'static Bonder,
    reports: Receiver<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>,
    battery: &'static Signal<CriticalSectionRawMutex, u8>,
    status: Sender<'static, CriticalSectionRawMutex, StatusEvent, STATUS_QUEUE_DEPTH>,
) -> ! {
    loop {
        let _ = status.try_send(StatusEvent::Advertising);
        info!("advertising as {}", config::BLE_DEVICE_NAME);

        let conn = match advertiser::advertise(sd, bonder).await {
            Ok(conn) => conn,
            Err(err) => {
                warn!("advertise failed: {}", err);
                continue;
            }
        };

        info!("host connected");
        let _ = status.try_send(StatusEvent::Connected);

        // Anything queued while unconnected is stale keystrokes; do
        // not replay it at the freshly arrived host.
        while reports.try_receive().is_ok() {}

        let gatt = gatt_server::run(&conn, server, hid_service::on_gatt_event);
        let pump = pump_notifications(server, &conn, reports, battery);

        match select(gatt, pump).await {
            Either::First(err) => info!("host disconnected: {}", err),
            Either::Second(never) => match never {},
        }

        let _ = status.try_send(StatusEvent::Disconnected);
    }
}

/// Forward queued reports and battery level changes to the connected
/// host, one notification each. Runs until the surrounding select
/// drops it on disconnect.
async fn pump_notifications(
    server: &Server,
    conn: &Connection,
    reports: Receiver<'static, CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH>,
    battery: &'static Signal<CriticalSectionRawMutex, u8>,
) -> ! {
    loop {
        match select(reports.receive(), battery.wait()).await {
            Either::First(report) => {
                if let Err(err) = notify_report(server, conn, &report) {
                    // Transient: host not subscribed yet or out of buffers.
                    // The report is gone, the engine never retries.
                    warn!("report dropped: {}", err);
                }
            }
            Either::Second(percent) => {
                // A host that never subscribed reads the level on its
                // next poll instead.
                if server.bas.battery_level_notify(conn, &percent).is_err() {
                    debug!("battery level notify skipped");
                }
            }
        }
    }
}

fn notify_report(
    server: &Server,
    conn: &Connection,
    report: &KeyboardReport,
) -> Result<(), Error> {
    server.hid.report_notify(conn, &report.to_bytes())?;
    Ok(())
}
