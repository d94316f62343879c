//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::RackEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`RackEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RackEvent) {
        match event {
            RackEvent::Started(phase) => {
                info!("START | initial_phase={:?}", phase);
            }
            RackEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            RackEvent::SlotCommitted {
                slot,
                icon,
                remaining_days,
            } => {
                info!(
                    "SLOT  | {} committed: icon={} days={}",
                    slot,
                    icon.map_or("none", |i| i.asset_name()),
                    remaining_days,
                );
            }
            RackEvent::DayElapsed { residual_ticks } => {
                info!("DAY   | rollover, residual_ticks={}", residual_ticks);
            }
            RackEvent::Notice { slot, kind } => {
                info!("NOTE  | slot={} kind={:?}", slot, kind);
            }
        }
    }
}
