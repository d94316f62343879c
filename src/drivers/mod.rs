//! Input/output drivers, hardware initialisation, and peripheral helpers.

pub mod confirm;
pub mod hw_init;
pub mod tft;
