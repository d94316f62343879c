//! Outbound application events.
//!
//! The [`RackService`](super::service::RackService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, or in the future push to a
//! companion app.

use crate::fsm::Phase;
use crate::slots::{FoodIcon, SlotIndex};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RackEvent {
    /// The controller has started (carries initial phase).
    Started(Phase),

    /// The navigation FSM moved between phases.
    PhaseChanged { from: Phase, to: Phase },

    /// A full edit cycle completed and the slot's configuration was stored.
    SlotCommitted {
        slot: SlotIndex,
        icon: Option<FoodIcon>,
        remaining_days: u8,
    },

    /// One simulated day elapsed; carries the residual tick count left in
    /// the clock after the threshold subtraction.
    DayElapsed { residual_ticks: u64 },

    /// An expiry notice was sent for a slot.
    Notice { slot: SlotIndex, kind: NoticeKind },
}

/// The two expiry notices the rack reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The slot's counter just reached zero.
    ExpiringTomorrow,
    /// The slot's counter was already zero — repeated daily.
    ExpiredToday,
}
