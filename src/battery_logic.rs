/// SAADC counts at the default config: 12-bit resolution, gain 1/6,
/// 0.6 V internal reference, so 4096 counts span 3.6 V at the pin.
const ADC_FULL_SCALE_MV: u32 = 3600;
const ADC_RESOLUTION: u32 = 4096;

/// The board halves VBAT through a resistor divider before the pin.
const VBAT_DIVIDER: u32 = 2;

/// Convert a raw single-ended SAADC sample into battery millivolts.
/// Negative samples (ground bounce on an open pin) clamp to zero.
pub fn millivolts_from_raw(raw: i16) -> u32 {
    let counts = raw.max(0) as u32;
    counts * ADC_FULL_SCALE_MV / ADC_RESOLUTION * VBAT_DIVIDER
}

/// Map battery millivolts onto a 0-100 charge estimate, linear between
/// the configured empty and full points.
pub fn percent_from_millivolts(mv: u32, empty_mv: u32, full_mv: u32) -> u8 {
    if full_mv <= empty_mv || mv <= empty_mv {
        return 0;
    }
    if mv >= full_mv {
        return 100;
    }
    ((mv - empty_mv) * 100 / (full_mv - empty_mv)) as u8
}

/// Remembers the last published charge estimate so the sampling loop
/// only pushes a notification when the percent actually moves.
pub struct LevelTracker {
    last: Option<u8>,
}

impl LevelTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record a fresh estimate. True when it differs from the previous
    /// one; the first reading after boot always counts as a change.
    pub fn update(&mut self, percent: u8) -> bool {
        if self.last == Some(percent) {
            return false;
        }
        self.last = Some(percent);
        true
    }
}
