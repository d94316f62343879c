//! Application service — the hexagonal core.
//!
//! [`RackService`] owns the navigation FSM, the day clock, and the shared
//! context.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       RackService       │ ──▶ NotifyPort
//! DisplayPort ◀── │  nav FSM · day clock    │
//!    IconPort ──▶ └────────────────────────┘
//! ```

use log::{info, warn};

use crate::clock::DayClock;
use crate::config::RackConfig;
use crate::fsm::context::{DrawOp, NavContext};
use crate::fsm::phases::build_phase_table;
use crate::fsm::{NavFsm, Phase};
use crate::slots::{DayOutcome, Slot, SlotIndex, Warning};

use super::events::{NoticeKind, RackEvent};
use super::ports::{DisplayPort, EventSink, IconPort, InputPort, NotifyPort};

// ───────────────────────────────────────────────────────────────
// RackService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct RackService {
    fsm: NavFsm,
    ctx: NavContext,
    clock: DayClock,
    /// Confirm level at the previous tick, for edge derivation.
    last_confirm: bool,
    tick_count: u64,
}

impl RackService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: RackConfig) -> Self {
        let clock = DayClock::new(config.ticks_per_day);
        let ctx = NavContext::new(config);
        let fsm = NavFsm::new(build_phase_table(), Phase::Idle);

        Self {
            fsm,
            ctx,
            clock,
            last_confirm: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Draw the static screen chrome and start the FSM in Idle.
    pub fn start(&mut self, hw: &mut impl DisplayPort, sink: &mut impl EventSink) {
        hw.draw_grid();
        self.fsm.start(&mut self.ctx);
        sink.emit(&RackEvent::Started(self.fsm.current_phase()));
        info!("RackService started in {:?}", self.fsm.current_phase());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample inputs → nav FSM → day clock →
    /// flush draws → emit events.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`DisplayPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + DisplayPort),
        icons: &mut impl IconPort,
        notify: &mut impl NotifyPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_phase = self.fsm.current_phase();
        let editing_slot = self.ctx.active_slot;

        // 1. Sample inputs and derive confirm edges from consecutive levels.
        let selector = hw.read_selector();
        let pressed = hw.confirm_pressed();
        let press_edge = pressed && !self.last_confirm;
        let release_edge = !pressed && self.last_confirm;
        if press_edge || release_edge {
            // Debounce: park until the contact holds the new level.  The
            // day clock does not advance while this blocks.
            hw.wait_confirm(pressed);
        }
        self.last_confirm = pressed;
        self.ctx.input.selector = selector;
        self.ctx.input.confirm_pressed = pressed;
        self.ctx.press_edge = press_edge;
        self.ctx.release_edge = release_edge;

        // 2. Navigation FSM tick (pure phase logic).
        self.fsm.tick(&mut self.ctx);

        // 3. Day clock: counts every pass, but rollover only fires while
        //    idle — a slot is never decremented in the tick that sets it,
        //    and a backlog drains one day per idle tick.
        self.clock.record_tick();
        if self.fsm.current_phase() == Phase::Idle && self.clock.try_roll_over() {
            sink.emit(&RackEvent::DayElapsed {
                residual_ticks: self.clock.counter(),
            });
            self.run_rollover(notify, sink);
        }

        // 4. Flush queued draw commands to the panel.
        self.flush_draws(hw, icons);

        // 5. Emit phase-change and commit events.
        let new_phase = self.fsm.current_phase();
        if new_phase != prev_phase {
            sink.emit(&RackEvent::PhaseChanged {
                from: prev_phase,
                to: new_phase,
            });
            if prev_phase == Phase::SettingIcon && new_phase == Phase::Idle {
                if let Some(slot) = editing_slot {
                    let entry = *self.ctx.slots.get(slot);
                    sink.emit(&RackEvent::SlotCommitted {
                        slot,
                        icon: entry.food,
                        remaining_days: entry.remaining_days,
                    });
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current navigation phase.
    pub fn phase(&self) -> Phase {
        self.fsm.current_phase()
    }

    /// Total service ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Residual day-clock ticks (ticks since the last rollover fired).
    pub fn day_ticks(&self) -> u64 {
        self.clock.counter()
    }

    /// Copy of a slot's stored state (for diagnostics and tests).
    pub fn slot(&self, slot: SlotIndex) -> Slot {
        *self.ctx.slots.get(slot)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Age every slot by one day and queue the resulting redraws/notices.
    fn run_rollover(&mut self, notify: &mut impl NotifyPort, sink: &mut impl EventSink) {
        info!("day rollover ({} residual ticks)", self.clock.counter());

        for (slot, outcome) in self.ctx.slots.roll_over_day() {
            match outcome {
                DayOutcome::Counting(days) => {
                    self.ctx.push_draw(DrawOp::Countdown(slot, days));
                }
                DayOutcome::ExpiresTomorrow => {
                    self.ctx.push_draw(DrawOp::Warning(slot, Warning::Orange));
                    self.ctx.push_draw(DrawOp::Countdown(slot, 0));
                    notify.notify(slot, NoticeKind::ExpiringTomorrow);
                    sink.emit(&RackEvent::Notice {
                        slot,
                        kind: NoticeKind::ExpiringTomorrow,
                    });
                }
                DayOutcome::ExpiredToday => {
                    // Re-raised every day until the user re-configures the
                    // slot; the bar fill covers the glyph, so redraw it.
                    self.ctx.push_draw(DrawOp::Warning(slot, Warning::Red));
                    self.ctx.push_draw(DrawOp::Countdown(slot, 0));
                    notify.notify(slot, NoticeKind::ExpiredToday);
                    sink.emit(&RackEvent::Notice {
                        slot,
                        kind: NoticeKind::ExpiredToday,
                    });
                }
            }
        }
    }

    /// Translate queued draw ops into port calls.
    fn flush_draws(&mut self, hw: &mut impl DisplayPort, icons: &mut impl IconPort) {
        for op in &self.ctx.draw {
            match *op {
                DrawOp::ClearMarker(slot) => hw.clear_marker(slot),
                DrawOp::Marker(slot) => hw.draw_marker(slot),
                DrawOp::ClearWarning(slot) => hw.clear_warning(slot),
                DrawOp::Warning(slot, warning) => hw.draw_warning(slot, warning),
                DrawOp::Countdown(slot, days) => hw.draw_countdown(slot, days),
                DrawOp::Icon(slot, icon) => match icons.load_icon(icon) {
                    Ok(bitmap) => hw.draw_icon(slot, &bitmap),
                    Err(e) => {
                        warn!("icon '{}' unavailable for slot {slot}: {e}", icon.asset_name());
                    }
                },
            }
        }
        self.ctx.draw.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{AssetError, IconBitmap};
    use crate::slots::FoodIcon;

    struct NullHw;

    impl InputPort for NullHw {
        fn read_selector(&mut self) -> f32 {
            0.0
        }
        fn confirm_pressed(&mut self) -> bool {
            false
        }
        fn wait_confirm(&mut self, _pressed: bool) {}
    }

    impl DisplayPort for NullHw {
        fn draw_grid(&mut self) {}
        fn draw_marker(&mut self, _slot: SlotIndex) {}
        fn clear_marker(&mut self, _slot: SlotIndex) {}
        fn draw_warning(&mut self, _slot: SlotIndex, _warning: Warning) {}
        fn clear_warning(&mut self, _slot: SlotIndex) {}
        fn draw_countdown(&mut self, _slot: SlotIndex, _days: u8) {}
        fn draw_icon(&mut self, _slot: SlotIndex, _bitmap: &IconBitmap) {}
    }

    struct NoIcons;

    impl IconPort for NoIcons {
        fn load_icon(&mut self, _icon: FoodIcon) -> Result<IconBitmap, AssetError> {
            Err(AssetError::NotFound)
        }
    }

    #[derive(Default)]
    struct CountingNotify {
        notices: usize,
    }

    impl NotifyPort for CountingNotify {
        fn notify(&mut self, _slot: SlotIndex, _kind: NoticeKind) {
            self.notices += 1;
        }
    }

    #[derive(Default)]
    struct VecSink(Vec<RackEvent>);

    impl EventSink for VecSink {
        fn emit(&mut self, event: &RackEvent) {
            self.0.push(*event);
        }
    }

    fn tiny_config(ticks_per_day: u64) -> RackConfig {
        RackConfig {
            ticks_per_day,
            ..RackConfig::default()
        }
    }

    #[test]
    fn starts_idle_and_emits_started() {
        let mut svc = RackService::new(RackConfig::default());
        let mut sink = VecSink::default();
        svc.start(&mut NullHw, &mut sink);
        assert_eq!(svc.phase(), Phase::Idle);
        assert_eq!(sink.0, vec![RackEvent::Started(Phase::Idle)]);
    }

    #[test]
    fn idle_rollover_notifies_all_unset_slots() {
        let mut svc = RackService::new(tiny_config(2));
        let mut sink = VecSink::default();
        let mut notify = CountingNotify::default();
        svc.start(&mut NullHw, &mut sink);

        svc.tick(&mut NullHw, &mut NoIcons, &mut notify, &mut sink);
        assert_eq!(notify.notices, 0);
        svc.tick(&mut NullHw, &mut NoIcons, &mut notify, &mut sink);
        // All six slots are unset (0 days) and report expired.
        assert_eq!(notify.notices, 6);
        assert_eq!(svc.day_ticks(), 0);
    }

    #[test]
    fn missing_icon_is_recovered_not_fatal() {
        let mut svc = RackService::new(RackConfig::default());
        let slot = SlotIndex::new(0).unwrap();
        svc.ctx.slots.get_mut(slot).food = Some(FoodIcon::Apple);
        svc.ctx.push_draw(DrawOp::Icon(slot, FoodIcon::Apple));
        // Flushing against a storage with no assets must simply drop the op.
        svc.flush_draws(&mut NullHw, &mut NoIcons);
        assert!(svc.ctx.draw.is_empty());
    }
}
