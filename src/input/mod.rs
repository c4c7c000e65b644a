//! Physical input channels.

pub mod channels;
