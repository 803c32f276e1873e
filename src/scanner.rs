//! The scan sequencer and sample store.
//!
//! [`AnalogScanner`] owns the scan order, the per-channel sample store,
//! and the callback table, and drives an [`AdcPeripheral`] through the
//! conversion chain: foreground code arms the first conversion with
//! [`begin_scanning`](AnalogScanner::begin_scanning), and every
//! subsequent conversion is started from the completion-interrupt path
//! before the finished sample's callback runs, so callback execution
//! time never stretches the sampling cadence.
//!
//! All mutable state sits behind a `critical_section::Mutex`, which
//! gives foreground reads and configuration writes the interrupt
//! suppression they need against the completion handler without any
//! ad hoc enable/disable pairs.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Vec;

use crate::peripheral::{AdcPeripheral, Reference};
use crate::pins::{channel_for_pin, pin_for_channel, MAX_CHANNELS};

/// Maximum number of entries in the scan order.
///
/// Longer orders passed to
/// [`set_scan_order`](AnalogScanner::set_scan_order) are truncated to
/// this many entries.
pub const SCAN_ORDER_MAX: usize = 50;

/// Callback invoked from interrupt context when a channel completes a
/// conversion.
///
/// Receives the peripheral channel index, the symbolic board pin number
/// for that channel, and the raw sample. Runs in the completion-interrupt
/// path — it must not block or allocate.
pub type ScanCallback = fn(channel: u8, pin: u8, value: u16);

// ---------------------------------------------------------------------------
// Active-instance slot
// ---------------------------------------------------------------------------

/// Receiver half of the completion interrupt.
///
/// Object-safe view of [`AnalogScanner`] stored in the process-wide
/// active-instance slot; the slot needs a single type regardless of
/// which peripheral the active scanner drives.
trait CompletionSink: Sync {
    fn conversion_complete(&self);
}

/// The scanner that currently owns conversion completions.
///
/// The hardware completion vector is a single fixed entry point with no
/// context argument, so dispatch goes through this one slot. Set by
/// `begin_scanning`, never cleared: after `end_scanning` the interrupt
/// is disabled and cannot misfire, so a stale entry is harmless.
static ACTIVE_SCANNER: Mutex<Cell<Option<&'static dyn CompletionSink>>> =
    Mutex::new(Cell::new(None));

/// Forward a conversion-complete interrupt to the active scanner.
///
/// Call this from the target's ADC completion ISR:
///
/// ```ignore
/// #[avr_device::interrupt(atmega2560)]
/// fn ADC() {
///     adc_scanner::conversion_complete_isr();
/// }
/// ```
///
/// A no-op when no scanner has ever been started.
pub fn conversion_complete_isr() {
    let active = critical_section::with(|cs| ACTIVE_SCANNER.borrow(cs).get());
    if let Some(scanner) = active {
        scanner.conversion_complete();
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Everything the sequencer and dispatcher share across the
/// foreground/interrupt boundary.
struct ScanState<A> {
    adc: A,
    /// Most recent sample per channel index (not per scan position).
    values: [u16; MAX_CHANNELS],
    /// Channel indices in sampling order; repeats raise a channel's rate.
    scan_order: Vec<u8, SCAN_ORDER_MAX>,
    /// Scan-order position of the conversion in flight. `None` until the
    /// first conversion is triggered.
    cursor: Option<usize>,
    callbacks: [Option<ScanCallback>; MAX_CHANNELS],
    reference: Reference,
}

impl<A: AdcPeripheral> ScanState<A> {
    /// Advance the cursor with wraparound and start converting the
    /// channel at the new position. Idle no-op while the order is empty.
    fn advance_and_trigger(&mut self) {
        let len = self.scan_order.len();
        if len == 0 {
            return;
        }
        let next = match self.cursor {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.cursor = Some(next);
        let channel = self.scan_order[next];
        self.adc.select_channel(channel, self.reference);
        self.adc.start_conversion();
    }
}

/// Non-blocking analog input scanner over a single shared ADC.
///
/// Configure a scan order and optional per-channel callbacks, start
/// scanning, and read the latest samples from foreground code while the
/// completion interrupt keeps the conversion chain running:
///
/// ```ignore
/// use adc_scanner::{pins, AnalogScanner};
/// use static_cell::StaticCell;
///
/// static SCANNER: StaticCell<AnalogScanner<Atmega2560Adc>> = StaticCell::new();
///
/// let scanner = &*SCANNER.init(AnalogScanner::new(Atmega2560Adc::take()));
/// scanner.set_scan_order(&[pins::A0, pins::A1, pins::A0]);
/// scanner.begin_scanning();
///
/// // Later, from the main loop:
/// let throttle = scanner.value(pins::A0);
/// ```
///
/// Repeating a pin in the scan order samples it proportionally more
/// often — `[A0, A1, A0]` reads `A0` at twice the rate of `A1`.
pub struct AnalogScanner<A> {
    state: Mutex<RefCell<ScanState<A>>>,
}

impl<A: AdcPeripheral> AnalogScanner<A> {
    /// Create a scanner over `adc` with an empty scan order, all samples
    /// zero, and no callbacks.
    pub fn new(adc: A) -> Self {
        Self {
            state: Mutex::new(RefCell::new(ScanState {
                adc,
                values: [0; MAX_CHANNELS],
                scan_order: Vec::new(),
                cursor: None,
                callbacks: [None; MAX_CHANNELS],
                reference: Reference::default(),
            })),
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Replace the scan order with the given board pin numbers.
    ///
    /// Each pin is translated to its channel index; orders longer than
    /// [`SCAN_ORDER_MAX`] are silently truncated to the first
    /// [`SCAN_ORDER_MAX`] entries. Safe to call while scanning — the new
    /// order takes effect from the next cursor advance, and the cursor
    /// itself is deliberately not reset, so one in-flight conversion may
    /// still be attributed against the old position (wraparound uses the
    /// new length).
    pub fn set_scan_order(&self, order: &[u8]) {
        #[cfg(feature = "defmt")]
        if order.len() > SCAN_ORDER_MAX {
            defmt::warn!(
                "scan order of {} entries truncated to {}",
                order.len(),
                SCAN_ORDER_MAX
            );
        }

        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.scan_order.clear();
            for &pin in order.iter().take(SCAN_ORDER_MAX) {
                // Cannot overflow: the iterator is capped at capacity.
                let _ = state.scan_order.push(channel_for_pin(pin));
            }
        });
    }

    /// Select the reference voltage used from the next conversion start
    /// onward.
    pub fn set_reference(&self, reference: Reference) {
        critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).reference = reference;
        });
    }

    /// Set or clear the completion callback for a pin.
    ///
    /// Takes effect for the next completed conversion of that pin's
    /// channel.
    pub fn set_callback(&self, pin: u8, callback: Option<ScanCallback>) {
        let channel = channel_for_pin(pin) as usize;
        critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).callbacks[channel] = callback;
        });
    }

    // ── Sample access ────────────────────────────────────────────────

    /// The most recently completed sample for a pin.
    ///
    /// Reads inside a critical section so a completion interrupt can
    /// never expose a half-written value. Returns 0 for channels that
    /// have not converted yet.
    pub fn value(&self, pin: u8) -> u16 {
        let channel = channel_for_pin(pin) as usize;
        critical_section::with(|cs| self.state.borrow_ref(cs).values[channel])
    }

    // ── Scan control ─────────────────────────────────────────────────

    /// Start scanning and register this instance as the completion
    /// dispatch target.
    ///
    /// Enables the converter and its completion interrupt, then triggers
    /// the first conversion; every later conversion is chained from the
    /// interrupt path. Returns immediately — nothing here blocks.
    ///
    /// At most one scanner can be active per process. Starting a second
    /// instance takes over dispatch for all future completions,
    /// including a conversion the first instance still has in flight.
    pub fn begin_scanning(&'static self)
    where
        A: Send + 'static,
    {
        critical_section::with(|cs| {
            ACTIVE_SCANNER.borrow(cs).set(Some(self as &dyn CompletionSink));
        });
        self.start();
    }

    /// Stop scanning by disabling the completion interrupt and powering
    /// down the converter.
    ///
    /// Stored samples, the scan order, callbacks, and the cursor all
    /// survive — scanning is suspended, not reset, and resumes with
    /// [`begin_scanning`](Self::begin_scanning) alone.
    pub fn end_scanning(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.adc.disable_completion_interrupt();
            state.adc.disable();
        });
    }

    /// Enable the peripheral and arm the next conversion without
    /// touching the dispatch registration.
    fn start(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.adc.enable();
            state.adc.enable_completion_interrupt();
            state.advance_and_trigger();
        });
    }

    // ── Completion dispatch ──────────────────────────────────────────

    /// Process one completed conversion.
    ///
    /// Invoked once per completion interrupt via
    /// [`conversion_complete_isr`]. Reads the result, stores it against
    /// the channel whose conversion was in flight, starts the next
    /// conversion, and only then invokes the channel's callback, so
    /// callback latency cannot accumulate into the scan timing.
    fn handle_conversion_complete(&self) {
        let pending = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            let raw = state.adc.read_result();

            // A completion with no conversion ever started, or with the
            // order emptied underneath it, has nowhere to go; dropping it
            // idles the scan until the order is restocked and restarted.
            let len = state.scan_order.len();
            if len == 0 {
                return None;
            }
            let cursor = match state.cursor {
                // The order may have been replaced by a shorter one while
                // this conversion was in flight; wrap against the current
                // length so attribution stays in bounds.
                Some(index) => index % len,
                None => return None,
            };

            let channel = state.scan_order[cursor];
            state.values[channel as usize] = raw;
            state.advance_and_trigger();
            state.callbacks[channel as usize].map(|callback| (callback, channel, raw))
        });

        // The callback runs in interrupt context but outside the state
        // borrow, so it may call `value()` on this scanner.
        if let Some((callback, channel, raw)) = pending {
            callback(channel, pin_for_channel(channel), raw);
        }
    }
}

impl<A: AdcPeripheral + Send> CompletionSink for AnalogScanner<A> {
    fn conversion_complete(&self) {
        self.handle_conversion_complete();
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
