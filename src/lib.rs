//! Non-blocking, interrupt-driven analog input scanning for
//! microcontrollers with a single ADC shared across multiple pins.
//!
//! [`AnalogScanner`] cycles the converter through a caller-specified,
//! possibly-repeating scan order. Foreground code configures the order
//! and starts scanning; from then on every conversion is chained from
//! the completion interrupt, so reading analog inputs never blocks.
//! The latest sample per channel is always available through
//! [`AnalogScanner::value`], and a per-channel [`ScanCallback`] can be
//! notified synchronously as each sample lands.
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **[`pins`]** — Stateless translation between board pin numbers
//!   (`A0`..`A15` or raw `0..=15`) and peripheral channel indices.
//! - **[`peripheral`]** — The [`AdcPeripheral`] trait: the narrow
//!   enable/select/start/read surface the scanner drives. Implement it
//!   over your target's ADC registers.
//! - **`scanner`** — [`AnalogScanner`], the scan sequencer and
//!   interrupt-safe sample store.
//!
//! # Quick start
//!
//! ```ignore
//! use adc_scanner::{pins, AnalogScanner};
//! use static_cell::StaticCell;
//!
//! static SCANNER: StaticCell<AnalogScanner<MyAdc>> = StaticCell::new();
//!
//! let scanner = &*SCANNER.init(AnalogScanner::new(MyAdc::take()));
//!
//! // Sample A0 twice as often as A1.
//! scanner.set_scan_order(&[pins::A0, pins::A1, pins::A0]);
//! scanner.set_callback(pins::A1, Some(|_channel, _pin, value| {
//!     // Runs in interrupt context as each A1 sample completes.
//! }));
//! scanner.begin_scanning();
//!
//! // Wire the completion interrupt to the scanner:
//! #[avr_device::interrupt(atmega2560)]
//! fn ADC() {
//!     adc_scanner::conversion_complete_isr();
//! }
//!
//! // Foreground code reads the latest samples without blocking:
//! let level = scanner.value(pins::A0);
//! ```
//!
//! # Concurrency model
//!
//! One core, one preemptive completion interrupt. All shared state sits
//! behind a [`critical_section`] mutex, so foreground reads never
//! observe a torn sample and configuration calls cannot race the
//! interrupt handler. Only one scanner may be active at a time — the
//! completion vector is a single fixed entry point, and
//! [`AnalogScanner::begin_scanning`] claims it for the calling instance.
//!
//! # Crate features
//!
//! - **`defmt`** — structured logging via [`defmt`] for the silently
//!   tolerated inputs (truncated scan orders, unknown pin numbers).

#![cfg_attr(not(test), no_std)]

pub mod peripheral;
pub mod pins;

mod scanner;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use peripheral::{AdcPeripheral, Reference};
pub use pins::{channel_for_pin, pin_for_channel, MAX_CHANNELS};
pub use scanner::{conversion_complete_isr, AnalogScanner, ScanCallback, SCAN_ORDER_MAX};
