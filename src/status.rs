//! Status LEDs.
//!
//! Two board LEDs tell the user what the pad is doing:
//! - blue: blinks while advertising, solid once a host is connected,
//! - red: lit while the Procreate (secondary) profile is active.

use defmt::Format;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Timer};

use crate::config::{LED_BLINK_INTERVAL_MS, STATUS_QUEUE_DEPTH};
use crate::engine::action::Profile;

/// Things worth showing on the LEDs. Producers use `try_send`; a lost
/// event at worst delays an indicator by one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum StatusEvent {
    Advertising,
    Connected,
    Disconnected,
    ProfileSwitched(Profile),
}

#[embassy_executor::task]
pub async fn led_task(
    mut link_led: Output<'static>,
    mut profile_led: Output<'static>,
    events: Receiver<'static, CriticalSectionRawMutex, StatusEvent, STATUS_QUEUE_DEPTH>,
) -> ! {
    let mut advertising = true;

    loop {
        if advertising {
            match select(
                events.receive(),
                Timer::after(Duration::from_millis(LED_BLINK_INTERVAL_MS)),
            )
            .await
            {
                Either::First(event) => {
                    apply(event, &mut advertising, &mut link_led, &mut profile_led)
                }
                Either::Second(()) => link_led.toggle(),
            }
        } else {
            let event = events.receive().await;
            apply(event, &mut advertising, &mut link_led, &mut profile_led);
        }
    }
}

fn apply(
    event: StatusEvent,
    advertising: &mut bool,
    link_led: &mut Output<'static>,
    profile_led: &mut Output<'static>,
) {
    match event {
        StatusEvent::Advertising => *advertising = true,
        StatusEvent::Connected => {
            *advertising = false;
            link_led.set_high();
        }
        StatusEvent::Disconnected => {
            *advertising = true;
            link_led.set_low();
        }
        StatusEvent::ProfileSwitched(profile) => match profile {
            Profile::Primary => profile_led.set_low(),
            Profile::Secondary => profile_led.set_high(),
        },
    }
}
