//! Concrete phase handler functions and table builder.
//!
//! Each phase is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.  This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[press]──▶ SELECTING-SLOT ──[release]──▶ SETTING-EXPIRATION
//!    ▲                (dial = slot)                 (dial = 1–9 days)
//!    │                                                      │
//!    │                                                  [release]
//!    │                                                      ▼
//!    └───────[release]─────── SETTING-ICON ◀────────────────┘
//!                             (dial = icon)
//! ```
//!
//! The edge flags in [`NavContext`] are set by the service from consecutive
//! button samples; a press therefore always pairs with a matching release
//! before the cycle advances again.

use log::info;

use super::context::{DrawOp, NavContext};
use super::{Phase, PhaseDescriptor};
use crate::sensors::selector::quantize;
use crate::slots::{FoodIcon, SlotIndex};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table.  Called once at startup.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        // Index 0 — Idle
        PhaseDescriptor {
            id: Phase::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — SelectingSlot
        PhaseDescriptor {
            id: Phase::SelectingSlot,
            name: "SelectingSlot",
            on_enter: Some(selecting_enter),
            on_exit: Some(selecting_exit),
            on_update: selecting_update,
        },
        // Index 2 — SettingExpiration
        PhaseDescriptor {
            id: Phase::SettingExpiration,
            name: "SettingExpiration",
            on_enter: Some(expiration_enter),
            on_exit: None,
            on_update: expiration_update,
        },
        // Index 3 — SettingIcon
        PhaseDescriptor {
            id: Phase::SettingIcon,
            name: "SettingIcon",
            on_enter: Some(icon_enter),
            on_exit: Some(icon_exit),
            on_update: icon_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE phase — countdown tracking, waiting for the user
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut NavContext) {
    ctx.active_slot = None;
    ctx.move_marker(None);
    info!("IDLE: tracking, waiting for confirm press");
}

fn idle_update(ctx: &mut NavContext) -> Option<Phase> {
    if ctx.press_edge {
        return Some(Phase::SelectingSlot);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SELECTING-SLOT phase — dial picks one of the six slots
// ═══════════════════════════════════════════════════════════════════════════

fn selecting_enter(ctx: &mut NavContext) {
    // Reflect the dial immediately so the marker appears on the same tick
    // as the arming press.
    track_slot_selection(ctx);
    info!("SELECTING: dial chooses a slot");
}

fn selecting_exit(ctx: &mut NavContext) {
    ctx.active_slot = ctx.marker();
    if let Some(slot) = ctx.active_slot {
        info!("SELECTING: slot {slot} locked in");
    }
}

fn selecting_update(ctx: &mut NavContext) -> Option<Phase> {
    track_slot_selection(ctx);
    if ctx.release_edge {
        return Some(Phase::SettingExpiration);
    }
    None
}

fn track_slot_selection(ctx: &mut NavContext) {
    let level = quantize(ctx.input.selector, SlotIndex::COUNT as u8);
    ctx.move_marker(Some(SlotIndex::clamped(level)));
}

// ═══════════════════════════════════════════════════════════════════════════
//  SETTING-EXPIRATION phase — dial sets remaining days (1–9)
// ═══════════════════════════════════════════════════════════════════════════

fn expiration_enter(ctx: &mut NavContext) {
    ctx.pending_days = None;
    if let Some(slot) = ctx.active_slot {
        // A re-configured slot starts its countdown clean.  This also blanks
        // the countdown glyph, hence the forced first redraw below.
        ctx.push_draw(DrawOp::ClearWarning(slot));
        info!("SETTING-EXPIRATION: dial sets days for slot {slot}");
    }
}

fn expiration_update(ctx: &mut NavContext) -> Option<Phase> {
    if let Some(slot) = ctx.active_slot {
        // Dial level 0–8 maps to 1–9 stored days; the rendered value is the
        // stored one, so the panel never shows the raw level.
        let days = quantize(ctx.input.selector, ctx.config.day_levels) + 1;
        if ctx.pending_days != Some(days) {
            ctx.pending_days = Some(days);
            ctx.slots.get_mut(slot).remaining_days = days;
            ctx.push_draw(DrawOp::Countdown(slot, days));
        }
    }
    if ctx.release_edge {
        return Some(Phase::SettingIcon);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SETTING-ICON phase — dial picks the food icon
// ═══════════════════════════════════════════════════════════════════════════

fn icon_enter(ctx: &mut NavContext) {
    ctx.pending_icon = None;
    if let Some(slot) = ctx.active_slot {
        info!("SETTING-ICON: dial sets icon for slot {slot}");
    }
}

fn icon_exit(ctx: &mut NavContext) {
    if let Some(slot) = ctx.active_slot {
        let entry = ctx.slots.get(slot);
        info!(
            "SETTING-ICON: slot {slot} committed ({:?}, {} days)",
            entry.food, entry.remaining_days
        );
    }
}

fn icon_update(ctx: &mut NavContext) -> Option<Phase> {
    if let Some(slot) = ctx.active_slot {
        let level = quantize(ctx.input.selector, ctx.config.icon_levels);
        let icon = FoodIcon::from_index(level as usize);
        if ctx.pending_icon != Some(icon) {
            ctx.pending_icon = Some(icon);
            ctx.slots.get_mut(slot).food = Some(icon);
            ctx.push_draw(DrawOp::Icon(slot, icon));
            // The icon blit covers the whole slot region; restore the glyph.
            let days = ctx.slots.get(slot).remaining_days;
            ctx.push_draw(DrawOp::Countdown(slot, days));
        }
    }
    if ctx.release_edge {
        return Some(Phase::Idle);
    }
    None
}
