//! Board pin number to ADC channel index translation.
//!
//! Callers identify analog inputs by board-level pin number — either the
//! raw channel number (`0..=15`) or the symbolic `A0`..`A15` constants
//! used in board pinout diagrams. The scanner core works exclusively in
//! peripheral channel indices (`0..MAX_CHANNELS`), so all board-specific
//! numbering quirks are confined to this module.
//!
//! Both translation functions are total: an unrecognized pin number maps
//! to channel 0 rather than failing, so no caller input can produce an
//! out-of-range index downstream.

// ---------------------------------------------------------------------------
// Channel space
// ---------------------------------------------------------------------------

/// Number of ADC channel indices the scanner tracks.
///
/// Channel indices are always in `0..MAX_CHANNELS`. Targets with fewer
/// analog inputs simply never produce the higher indices.
pub const MAX_CHANNELS: usize = 16;

// ---------------------------------------------------------------------------
// Symbolic analog pin numbers
// ---------------------------------------------------------------------------
// ATmega2560-style board numbering: the analog pins sit after the 54
// digital pins, so A0 is board pin 54.

/// Board pin number of analog input 0.
pub const A0: u8 = 54;
/// Board pin number of analog input 1.
pub const A1: u8 = 55;
/// Board pin number of analog input 2.
pub const A2: u8 = 56;
/// Board pin number of analog input 3.
pub const A3: u8 = 57;
/// Board pin number of analog input 4.
pub const A4: u8 = 58;
/// Board pin number of analog input 5.
pub const A5: u8 = 59;
/// Board pin number of analog input 6.
pub const A6: u8 = 60;
/// Board pin number of analog input 7.
pub const A7: u8 = 61;
/// Board pin number of analog input 8.
pub const A8: u8 = 62;
/// Board pin number of analog input 9.
pub const A9: u8 = 63;
/// Board pin number of analog input 10.
pub const A10: u8 = 64;
/// Board pin number of analog input 11.
pub const A11: u8 = 65;
/// Board pin number of analog input 12.
pub const A12: u8 = 66;
/// Board pin number of analog input 13.
pub const A13: u8 = 67;
/// Board pin number of analog input 14.
pub const A14: u8 = 68;
/// Board pin number of analog input 15.
pub const A15: u8 = 69;

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Translate a board pin number to its ADC channel index.
///
/// Raw channel numbers `0..=15` pass through unchanged; the symbolic
/// `A0`..`A15` pins map to channels `0..=15`. Any other pin number maps
/// to channel 0 (logged via `defmt` when that feature is enabled).
pub fn channel_for_pin(pin: u8) -> u8 {
    match pin {
        0..=15 => pin,
        A0..=A15 => pin - A0,
        _ => {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown analog pin {}, falling back to channel 0", pin);
            0
        }
    }
}

/// Translate an ADC channel index back to its symbolic board pin number.
///
/// This is the pin number passed to scan callbacks. Channel indices at or
/// above [`MAX_CHANNELS`] map to `A0`.
pub fn pin_for_channel(channel: u8) -> u8 {
    match channel {
        0..=15 => A0 + channel,
        _ => A0,
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
