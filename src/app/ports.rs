//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RackService (domain)
//! ```
//!
//! Driven adapters (inputs, display, serial link, icon storage, event sinks)
//! implement these traits.  The [`RackService`](super::service::RackService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::slots::{FoodIcon, SlotIndex, Warning};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample the two user inputs.
pub trait InputPort {
    /// Selector dial position, normalized to [0, 1).
    fn read_selector(&mut self) -> f32;

    /// Confirm button state, active-low normalized to pressed = true.
    fn confirm_pressed(&mut self) -> bool;

    /// Block until the confirm line settles at the given state.
    ///
    /// This is the debounce: the service calls it after observing a raw
    /// edge, and no service ticks (hence no day-clock ticks) occur while
    /// it spins.
    fn wait_confirm(&mut self, pressed: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to update the panel.
///
/// Methods are infallible by contract — an adapter that hits an SPI error
/// logs it and drops the write; the next redraw repairs the screen.
pub trait DisplayPort {
    /// Draw the static boot chrome: background plus the six slot cells.
    fn draw_grid(&mut self);

    /// Draw the selection highlight above a slot.
    fn draw_marker(&mut self, slot: SlotIndex);

    /// Erase the selection highlight above a slot.
    fn clear_marker(&mut self, slot: SlotIndex);

    /// Draw a slot's warning bar (`Warning::None` restores the cell colour).
    fn draw_warning(&mut self, slot: SlotIndex, warning: Warning);

    /// Erase a slot's warning bar (and the countdown glyph on top of it).
    fn clear_warning(&mut self, slot: SlotIndex);

    /// Render a slot's remaining-days glyph.
    fn draw_countdown(&mut self, slot: SlotIndex, days: u8);

    /// Blit a slot's food icon over the slot region.
    fn draw_icon(&mut self, slot: SlotIndex, bitmap: &IconBitmap);
}

// ───────────────────────────────────────────────────────────────
// Notification port (driven adapter: domain → serial link)
// ───────────────────────────────────────────────────────────────

/// The domain reports expiry notices through this port; the production
/// adapter renders them as text lines on the Bluetooth UART.
pub trait NotifyPort {
    fn notify(&mut self, slot: SlotIndex, kind: super::events::NoticeKind);
}

// ───────────────────────────────────────────────────────────────
// Icon storage port (driven adapter: SD card → domain)
// ───────────────────────────────────────────────────────────────

/// Loads icon bitmaps from asset storage.
pub trait IconPort {
    fn load_icon(&mut self, icon: FoodIcon) -> Result<IconBitmap, AssetError>;
}

/// A decoded row-major RGB565 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u16>,
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`RackEvent`](super::events::RackEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RackEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`IconPort`] operations.  Recovered locally: the service
/// logs the failure and skips the icon draw — a missing asset must never
/// stall the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetError {
    /// No asset file for this icon on the card.
    NotFound,
    /// The file exists but could not be read.
    ReadFailed,
    /// The file is not a bitmap this controller understands.
    Malformed,
}

impl core::fmt::Display for AssetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "asset not found"),
            Self::ReadFailed => write!(f, "asset read failed"),
            Self::Malformed => write!(f, "asset malformed"),
        }
    }
}
