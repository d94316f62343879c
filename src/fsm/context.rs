//! Shared mutable context threaded through every phase handler.
//!
//! `NavContext` is the single struct that phase handlers read from and
//! write to.  It contains the latest input snapshot, the slot registry,
//! the deferred draw queue, configuration, and timing.  Think of it as
//! the "blackboard" in a blackboard architecture.

use log::warn;

use crate::config::RackConfig;
use crate::slots::{FoodIcon, SlotIndex, SlotRegistry, Warning};

// ---------------------------------------------------------------------------
// Input snapshot (read-only to phase handlers; written by the service)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the two user inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Selector dial position, normalized to [0, 1).
    pub selector: f32,
    /// Confirm button level, active-low normalized to pressed = true.
    pub confirm_pressed: bool,
}

// ---------------------------------------------------------------------------
// Draw operations (written by phase handlers; flushed by the service)
// ---------------------------------------------------------------------------

/// Deferred display command.  Handlers stay display-agnostic: they queue
/// ops here and the service flushes them to the `DisplayPort` each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    /// Erase the highlight bar above a slot.
    ClearMarker(SlotIndex),
    /// Draw the highlight bar above a slot.
    Marker(SlotIndex),
    /// Erase a slot's warning bar.
    ClearWarning(SlotIndex),
    /// Draw a slot's warning bar in the given colour.
    Warning(SlotIndex, Warning),
    /// Render a slot's remaining-days glyph.
    Countdown(SlotIndex, u8),
    /// Blit a slot's food icon (covers the slot region).
    Icon(SlotIndex, FoodIcon),
}

/// Worst case per tick: full rollover walk (two ops per slot) plus a
/// handful of navigation ops.
pub const DRAW_QUEUE_CAP: usize = 24;

// ---------------------------------------------------------------------------
// NavContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct NavContext {
    // -- Timing --
    /// Ticks elapsed since the current phase was entered.
    pub ticks_in_phase: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Input --
    /// Latest input readings.  Updated before each FSM tick.
    pub input: InputSnapshot,
    /// Confirm button went up→down between the last two samples.
    pub press_edge: bool,
    /// Confirm button went down→up between the last two samples.
    pub release_edge: bool,

    // -- Domain state --
    /// The six tracked slots.
    pub slots: SlotRegistry,
    /// Slot locked in by the last SelectingSlot phase, if any.
    pub active_slot: Option<SlotIndex>,
    /// Last days value rendered by SettingExpiration.  `None` right after
    /// phase entry so the first update always redraws (phase entry clears
    /// the warning bar, which blanks the countdown glyph underneath).
    pub pending_days: Option<u8>,
    /// Last icon rendered by SettingIcon; same redraw-on-change contract.
    pub pending_icon: Option<FoodIcon>,

    // -- Outputs --
    /// Draw commands queued this tick, flushed by the service.
    pub draw: heapless::Vec<DrawOp, DRAW_QUEUE_CAP>,

    // -- Configuration --
    pub config: RackConfig,

    /// Slot currently shown highlighted on the panel.  Tracked here so the
    /// marker is only redrawn when the selection actually moves.
    marker: Option<SlotIndex>,
}

impl NavContext {
    /// Create a new context with the given configuration.
    pub fn new(config: RackConfig) -> Self {
        Self {
            ticks_in_phase: 0,
            total_ticks: 0,
            input: InputSnapshot::default(),
            press_edge: false,
            release_edge: false,
            slots: SlotRegistry::new(),
            active_slot: None,
            pending_days: None,
            pending_icon: None,
            draw: heapless::Vec::new(),
            config,
            marker: None,
        }
    }

    /// Queue a draw command.  Drops the op with a warning if the queue is
    /// full — the next redraw of the same element repairs the display.
    pub fn push_draw(&mut self, op: DrawOp) {
        if self.draw.push(op).is_err() {
            warn!("draw queue full, dropping {op:?}");
        }
    }

    /// Move the marker highlight, clearing the previous one first.
    /// No-ops when the target equals the currently lit slot, so at most
    /// one marker is ever visible.
    pub fn move_marker(&mut self, to: Option<SlotIndex>) {
        if to == self.marker {
            return;
        }
        if let Some(prev) = self.marker {
            self.push_draw(DrawOp::ClearMarker(prev));
        }
        if let Some(next) = to {
            self.push_draw(DrawOp::Marker(next));
        }
        self.marker = to;
    }

    /// The slot currently highlighted on the panel, if any.
    pub fn marker(&self) -> Option<SlotIndex> {
        self.marker
    }
}
