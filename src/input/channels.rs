//! GPIO-backed channel reader.
//!
//! Every switch sits between its pin and ground, with the internal
//! pull-up enabled: a low pin means pressed. The scan engine sees only
//! the normalized boolean.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::engine::action::Channel;
use crate::engine::scan::ChannelReader;
use crate::layout::CHANNEL_COUNT;

/// All wired switches, indexed by channel number.
pub struct GpioChannels {
    pins: [Input<'static>; CHANNEL_COUNT],
}

impl GpioChannels {
    /// Take ownership of the channel pins, in channel order.
    pub fn new(pins: [AnyPin; CHANNEL_COUNT]) -> Self {
        Self {
            pins: pins.map(|pin| Input::new(pin, Pull::Up)),
        }
    }
}

impl ChannelReader for GpioChannels {
    fn is_pressed(&mut self, channel: Channel) -> bool {
        // A channel outside the wired range reads as released.
        match self.pins.get_mut(channel.index() as usize) {
            Some(pin) => pin.is_low(),
            None => false,
        }
    }
}
