//! Confirm button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up: line HIGH = released,
//! LOW = pressed.  The button is polled, not interrupt-driven — the control
//! loop samples it once per tick and performs its own edge detection.
//!
//! ## Debounce
//!
//! [`ConfirmButton::wait_for_level`] busy-waits until the line settles at
//! the requested level.  The controller is deliberately single-threaded and
//! blocking here: nothing else needs to run while the user's finger is on
//! the button, and the day clock only counts completed loop passes.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

/// Simulated line level (true = HIGH = released).  Pull-up default.
#[cfg(not(target_os = "espidf"))]
static SIM_CONFIRM_LEVEL: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_confirm_level(level: bool) {
    SIM_CONFIRM_LEVEL.store(level, Ordering::Relaxed);
}

pub struct ConfirmButton {
    gpio: i32,
}

impl ConfirmButton {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Sample the button, normalized so pressed = true.
    pub fn is_pressed(&self) -> bool {
        !self.read_level()
    }

    /// Spin until the button reads the requested state.
    ///
    /// Used as a debounce after an observed edge: the loop parks here until
    /// the contact stops bouncing and the line holds the new level.
    pub fn wait_for_level(&self, pressed: bool) {
        while self.is_pressed() != pressed {
            core::hint::spin_loop();
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self) -> bool {
        crate::drivers::hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self) -> bool {
        SIM_CONFIRM_LEVEL.load(Ordering::Relaxed)
    }
}
