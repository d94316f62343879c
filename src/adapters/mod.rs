//! Driven adapters — implementations of the port traits in [`crate::app::ports`].

pub mod hardware;
pub mod icons;
pub mod log_sink;
pub mod serial;
