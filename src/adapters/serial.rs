//! Serial notification adapter.
//!
//! Renders expiry notices as text lines and writes them to the HC-05
//! Bluetooth UART.  The wire format is consumed by the companion phone
//! app and must not change.

use log::info;

use crate::app::events::NoticeKind;
use crate::app::ports::NotifyPort;
use crate::drivers::hw_init;
use crate::slots::SlotIndex;

/// Adapter that reports notices over the notification UART.
pub struct SerialNotifier;

impl SerialNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SerialNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyPort for SerialNotifier {
    fn notify(&mut self, slot: SlotIndex, kind: NoticeKind) {
        let line = render_notice(slot, kind);
        hw_init::uart_write(line.as_bytes());
        info!("serial: {}", line.trim_end());
    }
}

/// Wire text for one notice.  Slot numbers are zero-based on the wire.
pub fn render_notice(slot: SlotIndex, kind: NoticeKind) -> String {
    match kind {
        NoticeKind::ExpiringTomorrow => {
            format!("Number {slot} is expiring tomorrow!\n")
        }
        NoticeKind::ExpiredToday => format!("Number {slot} expired today!\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_is_stable() {
        let s2 = SlotIndex::new(2).unwrap();
        let s5 = SlotIndex::new(5).unwrap();
        assert_eq!(
            render_notice(s2, NoticeKind::ExpiringTomorrow),
            "Number 2 is expiring tomorrow!\n"
        );
        assert_eq!(
            render_notice(s5, NoticeKind::ExpiredToday),
            "Number 5 expired today!\n"
        );
    }

    #[test]
    fn every_line_is_newline_terminated() {
        for slot in SlotIndex::all() {
            for kind in [NoticeKind::ExpiringTomorrow, NoticeKind::ExpiredToday] {
                assert!(render_notice(slot, kind).ends_with('\n'));
            }
        }
    }
}
