//! Hardware boundary between the scanner core and the ADC peripheral.
//!
//! The scanner drives the converter exclusively through the
//! [`AdcPeripheral`] trait, which exposes the narrow start/read/enable
//! surface of a single-converter ADC and nothing else — no DMA, no
//! averaging, no resolution control. A firmware integration implements
//! this trait over the target's registers; host tests implement it with
//! a recording mock.

/// Reference-voltage selection applied when a conversion is started.
///
/// The discriminants match the two-bit reference-select field of
/// AVR-style ADCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// External voltage applied to the AREF pin.
    External = 0,
    /// Supply voltage (the power-on default).
    AVcc = 1,
    /// Internal bandgap reference.
    Internal = 3,
}

impl Reference {
    /// Build a selector from a raw two-bit field, masking off anything
    /// above the low two bits.
    ///
    /// The reserved encoding `0b10` resolves to [`Reference::AVcc`], so
    /// every input produces a valid selector.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reference::External,
            3 => Reference::Internal,
            _ => Reference::AVcc,
        }
    }

    /// The raw two-bit field value for this selector.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl Default for Reference {
    fn default() -> Self {
        Reference::AVcc
    }
}

/// Control surface of a single analog-to-digital converter.
///
/// The scanner calls these methods from both foreground configuration
/// code and the completion-interrupt path, always from within a critical
/// section, so implementations do not need their own locking.
///
/// Completion delivery is wired up by the integrator: the target's ADC
/// completion ISR must call [`conversion_complete_isr`], which forwards
/// to the scanner registered by
/// [`AnalogScanner::begin_scanning`].
///
/// [`conversion_complete_isr`]: crate::conversion_complete_isr
/// [`AnalogScanner::begin_scanning`]: crate::AnalogScanner::begin_scanning
pub trait AdcPeripheral {
    /// Power up the converter.
    ///
    /// Implementations must also leave the result format right-justified
    /// so that [`read_result`](Self::read_result) composes the sample
    /// without shifting.
    fn enable(&mut self);

    /// Power down the converter.
    fn disable(&mut self);

    /// Program the channel-select bits for the next conversion.
    ///
    /// `channel` is a peripheral channel index in
    /// `0..`[`MAX_CHANNELS`](crate::MAX_CHANNELS). Implementations whose
    /// base mux field covers fewer channels must set the extended-range
    /// bit (e.g. `MUX5`) from the high bits of `channel`.
    fn select_channel(&mut self, channel: u8, reference: Reference);

    /// Start a single conversion of the currently selected channel.
    fn start_conversion(&mut self);

    /// Read the completed conversion result.
    ///
    /// If the result spans two register accesses, implementations must
    /// read the low half before the high half — on AVR-style ADCs
    /// reading the high byte first leaves the result latched and the
    /// pending value is lost.
    fn read_result(&mut self) -> u16;

    /// Enable the conversion-complete interrupt.
    fn enable_completion_interrupt(&mut self);

    /// Disable the conversion-complete interrupt.
    fn disable_completion_interrupt(&mut self);
}

// ── Unit Tests ───────────────────────────────────────────────────────
