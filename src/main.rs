//! artpad firmware entry point.
//!
//! Task topology, all on one thread-mode executor:
//!
//! - `softdevice_task` - runs the S140 event loop.
//! - `ble_task`        - advertises, serves the GATT tables, pushes
//!                       report notifications to the host.
//! - `scan_task`       - polls the switches and runs the scan engine.
//! - `battery_task`    - samples VBAT and updates the battery level.
//! - `led_task`        - drives the two status LEDs.
//!
//! The scan engine talks to the BLE side only through the report
//! queue, so a congested radio never stalls scanning.

#![no_std]
#![no_main]

mod battery;
mod battery_logic;
mod ble;
mod config;
mod engine;
mod error;
mod hid;
mod input;
mod layout;
mod status;

use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use nrf_softdevice::{raw, Softdevice};

use crate::ble::ReportQueue;
use crate::config::{REPORT_QUEUE_DEPTH, STATUS_QUEUE_DEPTH};
use crate::engine::scan::ScanEngine;
use crate::error::Error;
use crate::hid::keyboard::KeyboardReport;
use crate::input::channels::GpioChannels;
use crate::status::StatusEvent;

/// Scan engine to BLE task report handoff.
static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, KeyboardReport, REPORT_QUEUE_DEPTH> =
    Channel::new();

/// Everything that wants an LED changed goes through here.
static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, StatusEvent, STATUS_QUEUE_DEPTH> =
    Channel::new();

/// Latest battery percent, raised only when the estimate moves. The
/// BLE task turns it into a Battery Level notification.
static BATTERY_LEVEL: Signal<CriticalSectionRawMutex, u8> = Signal::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Poll all channels every [`config::POLL_INTERVAL_MS`] and hand the
/// cycle to the engine. Profile changes are mirrored to the LED task.
#[embassy_executor::task]
async fn scan_task(
    mut engine: ScanEngine,
    mut channels: GpioChannels,
    mut reports: ReportQueue,
    status: Sender<'static, CriticalSectionRawMutex, StatusEvent, STATUS_QUEUE_DEPTH>,
) -> ! {
    let mut shown_profile = engine.profile();
    let mut ticker = Ticker::every(Duration::from_millis(config::POLL_INTERVAL_MS));

    loop {
        engine.scan_cycle(&mut channels, &mut reports);

        if engine.profile() != shown_profile {
            shown_profile = engine.profile();
            info!("profile switched: {}", shown_profile);
            let _ = status.try_send(StatusEvent::ProfileSwitched(shown_profile));
        }

        ticker.next().await;
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        // The Feather has a 32.768 kHz crystal on board.
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::BLE_DEVICE_NAME.as_ptr() as _,
            current_len: config::BLE_DEVICE_NAME.len() as u16,
            max_len: config::BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("artpad starting");

    let mut nrf_config = embassy_nrf::config::Config::default();
    // Top interrupt priorities belong to the SoftDevice.
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    interrupt::SAADC.set_priority(Priority::P3);

    let sd = Softdevice::enable(&softdevice_config());
    let server = unwrap!(ble::hid_service::init(sd));
    let sd: &'static Softdevice = sd;
    let bonder = ble::bonder::bonder();

    // A keymap that fails validation is fatal before the first scan.
    let engine = match ScanEngine::new(layout::DEVICE_KEYMAP) {
        Ok(engine) => engine,
        Err(err) => defmt::panic!("refusing to start: {}", Error::Config(err)),
    };

    // Channel pins, in channel order (see config.rs for the legend).
    let channels = GpioChannels::new([
        p.P0_05.degrade(), // small 1 (toggle)
        p.P0_04.degrade(), // shoulder left
        p.P0_08.degrade(), // shoulder right
        p.P0_06.degrade(), // large 1
        p.P0_27.degrade(), // large 2
        p.P0_30.degrade(), // small 2
        p.P0_28.degrade(), // small 3
        p.P0_26.degrade(), // small 4
        p.P0_03.degrade(), // small 5
        p.P1_08.degrade(), // small 6
        p.P0_02.degrade(), // large 3
    ]);

    let adc = battery::init(p.SAADC, p.P0_29);

    let link_led = Output::new(p.P1_10.degrade(), Level::Low, OutputDrive::Standard);
    let profile_led = Output::new(p.P1_15.degrade(), Level::Low, OutputDrive::Standard);

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble::ble_task(
        sd,
        server,
        bonder,
        REPORT_CHANNEL.receiver(),
        &BATTERY_LEVEL,
        STATUS_CHANNEL.sender(),
    )));
    unwrap!(spawner.spawn(scan_task(
        engine,
        channels,
        ReportQueue::new(REPORT_CHANNEL.sender()),
        STATUS_CHANNEL.sender(),
    )));
    unwrap!(spawner.spawn(battery::battery_task(adc, server, &BATTERY_LEVEL)));
    unwrap!(spawner.spawn(status::led_task(
        link_led,
        profile_led,
        STATUS_CHANNEL.receiver(),
    )));

    info!("all tasks running");
}
