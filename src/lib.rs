//! FridgeRack firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod fsm;
pub mod slots;

pub mod error;
pub mod pins;

// Hardware-facing modules; the target-only implementations are guarded
// by cfg attributes inside, so these compile (with simulation shims) on
// the host as well.
pub mod adapters;
pub mod drivers;
pub mod sensors;
