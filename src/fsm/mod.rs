//! Function-pointer finite state machine engine for the navigation cycle.
//!
//! Classic embedded FSM pattern expressed in Rust:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  PhaseTable                                                   │
//! │  ┌───────────────────┬──────────┬──────────┬────────────────┐ │
//! │  │ Phase             │ on_enter │ on_exit  │ on_update      │ │
//! │  ├───────────────────┼──────────┼──────────┼────────────────┤ │
//! │  │ Idle              │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt<> │ │
//! │  │ SelectingSlot     │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt<> │ │
//! │  │ SettingExpiration │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt<> │ │
//! │  │ SettingIcon       │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt<> │ │
//! │  └───────────────────┴──────────┴──────────┴────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! phase, then `on_enter` for the next, and updates the current pointer.
//! All functions receive `&mut NavContext` which holds the input snapshot,
//! slot registry, draw queue, config, and timing.

pub mod context;
pub mod phases;

use context::NavContext;
use log::info;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Enumeration of the four navigation phases.
/// Must stay in sync with the table built in [`phases::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    SelectingSlot = 1,
    SettingExpiration = 2,
    SettingIcon = 3,
}

impl Phase {
    /// Total number of phases — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a `usize` index back to `Phase`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::SelectingSlot,
            2 => Self::SettingExpiration,
            3 => Self::SettingIcon,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each phase transition.
pub type PhaseActionFn = fn(&mut NavContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type PhaseUpdateFn = fn(&mut NavContext) -> Option<Phase>;

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single navigation phase.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct PhaseDescriptor {
    pub id: Phase,
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The navigation state machine engine.
///
/// Owns the phase table (array of [`PhaseDescriptor`]); the mutable
/// [`NavContext`] is threaded through every handler call.
pub struct NavFsm {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [PhaseDescriptor; Phase::COUNT],
    /// Index of the currently active phase.
    current: usize,
    /// Monotonically increasing tick counter (wraps at u64::MAX).
    tick_count: u64,
    /// Tick at which the current phase was entered.
    phase_entry_tick: u64,
}

impl NavFsm {
    /// Construct a new FSM with the given phase table, starting in `initial`.
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            phase_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting phase.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut NavContext) {
        info!("nav FSM starting in phase: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current phase.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut NavContext) {
        self.tick_count += 1;
        ctx.ticks_in_phase = self.tick_count - self.phase_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current phase's identity.
    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current phase.
    pub fn ticks_in_current_phase(&self) -> u64 {
        self.tick_count - self.phase_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: Phase, ctx: &mut NavContext) {
        let next_idx = next_id as usize;

        info!(
            "nav transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current phase
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.phase_entry_tick = self.tick_count;
        ctx.ticks_in_phase = 0;

        // Enter new phase
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
