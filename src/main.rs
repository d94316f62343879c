//! FridgeRack Firmware — Main Entry Point
//!
//! Hexagonal architecture around a polled navigation FSM.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      SdIconStore      SerialNotifier    │
//! │  (Input+Display)      (IconPort)       (NotifyPort)      │
//! │  LogEventSink                                            │
//! │  (EventSink)                                             │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            RackService (pure logic)                │  │
//! │  │  Navigation FSM · Slot registry · Day clock        │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod clock;
mod error;
mod pins;
mod slots;

pub mod app;
mod adapters;
mod drivers;
pub mod fsm;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::icons::SdIconStore;
use adapters::log_sink::LogEventSink;
use adapters::serial::SerialNotifier;
use app::service::RackService;
use config::RackConfig;
use drivers::confirm::ConfirmButton;
use drivers::tft::TftDisplay;
use sensors::selector::SelectorPot;
use sensors::InputSampler;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FridgeRack v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = RackConfig::default();

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals(config.serial_baud) {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // Icon assets degrade gracefully: an unmounted card just means cells
    // show no food pictures.
    if let Err(e) = drivers::hw_init::mount_sd() {
        warn!("SD mount failed ({}), icons unavailable", e);
    }

    // ── 3. Construct drivers and adapters ─────────────────────
    let sampler = InputSampler::new(
        SelectorPot::new(pins::SELECTOR_ADC_GPIO),
        ConfirmButton::new(pins::CONFIRM_GPIO),
    );

    let mut tft = TftDisplay::new();
    tft.init();

    let mut hw = HardwareAdapter::new(sampler, tft);
    let mut icons = SdIconStore::new();
    let mut notifier = SerialNotifier::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Construct app service ──────────────────────────────
    let mut svc = RackService::new(config.clone());
    svc.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        svc.tick(&mut hw, &mut icons, &mut notifier, &mut log_sink);

        #[cfg(target_os = "espidf")]
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(config.poll_interval_ms);

        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(
            config.poll_interval_ms as u64,
        ));
    }
}
