//! Analog selector dial driver.
//!
//! A single 10 kΩ rotary potentiometer is the only value input: depending on
//! the navigation phase the same dial picks a slot (6 levels), an expiration
//! (9 levels) or an icon (8 levels).  The driver normalizes the raw ADC
//! reading to [0, 1); [`quantize`] maps it onto a phase's level count.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_SELECTOR_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_selector_adc(raw: u16) {
    SIM_SELECTOR_ADC.store(raw, Ordering::Relaxed);
}

/// 12-bit ADC: raw readings span 0..=4095.
pub const ADC_FULL_SCALE: u16 = 4095;

pub struct SelectorPot {
    _adc_gpio: i32,
}

impl SelectorPot {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Read the dial position normalized to [0, 1).
    ///
    /// Dividing by full-scale + 1 keeps the top of the range strictly below
    /// 1.0, so `quantize` never needs to special-case a pegged dial.
    pub fn read_norm(&mut self) -> f32 {
        let raw = self.read_adc().min(ADC_FULL_SCALE);
        f32::from(raw) / (f32::from(ADC_FULL_SCALE) + 1.0)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        crate::drivers::hw_init::adc1_read(crate::drivers::hw_init::ADC1_CH_SELECTOR)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_SELECTOR_ADC.load(Ordering::Relaxed)
    }
}

/// Map a normalized dial position onto `levels` equal-width bands.
///
/// `floor(norm * levels)`, clamped into `0..levels` — out-of-range inputs
/// (sensor noise below 0.0 or at/above 1.0) saturate at the nearest band
/// instead of producing an invalid level.
pub fn quantize(norm: f32, levels: u8) -> u8 {
    if levels == 0 {
        return 0;
    }
    let band = (norm * f32::from(levels)).floor();
    band.clamp(0.0, f32::from(levels - 1)) as u8
}
