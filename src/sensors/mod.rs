//! Input subsystem — the selector driver and the aggregating [`InputSampler`].
//!
//! The sampler owns both user inputs and produces an [`InputSnapshot`] each
//! tick that gets written into `NavContext.input`.

pub mod selector;

use crate::drivers::confirm::ConfirmButton;
use crate::fsm::context::InputSnapshot;
use selector::SelectorPot;

/// Aggregates the selector dial and confirm button into one snapshot.
pub struct InputSampler {
    pub selector: SelectorPot,
    pub confirm: ConfirmButton,
}

impl InputSampler {
    /// Construct a new sampler.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(selector: SelectorPot, confirm: ConfirmButton) -> Self {
        Self { selector, confirm }
    }

    /// Sample both inputs and return a unified snapshot.
    pub fn read_all(&mut self) -> InputSnapshot {
        InputSnapshot {
            selector: self.selector.read_norm(),
            confirm_pressed: self.confirm.is_pressed(),
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::drivers::confirm::sim_set_confirm_level;
    use crate::pins;
    use crate::sensors::selector::{sim_set_selector_adc, ADC_FULL_SCALE};

    #[test]
    fn snapshot_reflects_both_inputs() {
        let mut sampler = InputSampler::new(
            SelectorPot::new(pins::SELECTOR_ADC_GPIO),
            ConfirmButton::new(pins::CONFIRM_GPIO),
        );

        sim_set_selector_adc(ADC_FULL_SCALE / 2);
        sim_set_confirm_level(false); // active-low: line low = pressed
        let snap = sampler.read_all();
        assert!((snap.selector - 0.5).abs() < 0.01);
        assert!(snap.confirm_pressed);

        sim_set_confirm_level(true);
        let snap = sampler.read_all();
        assert!(!snap.confirm_pressed);
    }
}
