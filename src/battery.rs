//! Battery voltage monitoring.
//!
//! The board brings VBAT to an analog pin through a divider. Every
//! measurement interval one SAADC sample is taken, converted to
//! millivolts and published as the Battery Level characteristic; when
//! the estimate moves, the BLE task is signalled to notify the host.

use defmt::{debug, warn};
use embassy_nrf::saadc::{ChannelConfig, Config, Saadc};
use embassy_nrf::{bind_interrupts, peripherals, saadc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::battery_logic;
use crate::ble::hid_service::Server;
use crate::config;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

/// Set up the SAADC with one single-ended channel on the VBAT divider
/// pin. Default config: 12 bit, gain 1/6, internal reference.
pub fn init(adc: peripherals::SAADC, vbat_pin: peripherals::P0_29) -> Saadc<'static, 1> {
    let config = Config::default();
    let channel = ChannelConfig::single_ended(vbat_pin);
    Saadc::new(adc, Irqs, config, [channel])
}

#[embassy_executor::task]
pub async fn battery_task(
    mut adc: Saadc<'static, 1>,
    server: &'static Server,
    level: &'static Signal<CriticalSectionRawMutex, u8>,
) -> ! {
    let mut tracker = battery_logic::LevelTracker::new();

    loop {
        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;

        let mv = battery_logic::millivolts_from_raw(buf[0]);
        let percent = battery_logic::percent_from_millivolts(
            mv,
            config::BATTERY_EMPTY_MV,
            config::BATTERY_FULL_MV,
        );
        debug!("battery: {} mV ({}%)", mv, percent);

        // The host reads the characteristic whenever it wants; a
        // failed set only means the next read sees a stale estimate.
        if server.bas.battery_level_set(&percent).is_err() {
            warn!("battery level update failed");
        }
        if tracker.update(percent) {
            level.signal(percent);
        }

        Timer::after(Duration::from_secs(config::BATTERY_MEASURE_INTERVAL_SECS)).await;
    }
}
