//! System configuration parameters
//!
//! All tunable parameters for the FridgeRack controller.  There is no config
//! file or provisioning channel — this struct is the single tuning point,
//! consumed at boot.

use serde::{Deserialize, Serialize};

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RackConfig {
    // --- Timing ---
    /// Poll loop interval (milliseconds).  One service tick per pass.
    pub poll_interval_ms: u32,
    /// Loop passes per simulated day.  432 000 = 24 h at 5 Hz.
    pub ticks_per_day: u64,

    // --- Selector quantization ---
    /// Expiration levels on the selector dial (stored as 1..=day_levels).
    pub day_levels: u8,
    /// Selectable food icons.
    pub icon_levels: u8,

    // --- Serial link ---
    /// Baud rate of the notification UART (HC-05 default).
    pub serial_baud: u32,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            // Timing
            poll_interval_ms: 200,  // 5 Hz
            ticks_per_day: 432_000, // 24 * 60 * 60 * 5

            // Selector quantization
            day_levels: 9,
            icon_levels: 8,

            // Serial
            serial_baud: 9600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::FoodIcon;

    #[test]
    fn default_config_is_sane() {
        let c = RackConfig::default();
        assert!(c.poll_interval_ms > 0);
        assert!(c.ticks_per_day > 0);
        assert!(c.day_levels > 0 && c.day_levels <= 9, "must fit one glyph");
        assert_eq!(c.icon_levels as usize, FoodIcon::COUNT);
        assert!(c.serial_baud > 0);
    }

    #[test]
    fn ticks_per_day_matches_poll_rate() {
        let c = RackConfig::default();
        let passes_per_sec = 1000 / u64::from(c.poll_interval_ms);
        assert_eq!(c.ticks_per_day, 24 * 60 * 60 * passes_per_sec);
    }

    #[test]
    fn serde_roundtrip() {
        let c = RackConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: RackConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.ticks_per_day, c2.ticks_per_day);
        assert_eq!(c.day_levels, c2.day_levels);
        assert_eq!(c.poll_interval_ms, c2.poll_interval_ms);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = RackConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: RackConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.ticks_per_day, c2.ticks_per_day);
        assert_eq!(c.serial_baud, c2.serial_baud);
    }
}
