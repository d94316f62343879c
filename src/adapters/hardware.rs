//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`InputSampler`] and the TFT driver, exposing them through
//! [`InputPort`] and [`DisplayPort`].  This is the only module that maps
//! slot indices onto panel coordinates; the geometry lives in [`layout`]
//! as pure functions so it unit-tests on the host.

use crate::app::ports::{DisplayPort, IconBitmap, InputPort};
use crate::drivers::tft::{self, TftDisplay};
use crate::sensors::InputSampler;
use crate::slots::{SlotIndex, Warning};

/// Slot cell geometry on the 320×240 landscape panel.
///
/// Three columns of two cells each.  The pitch leaves a 4 px gutter on the
/// right/bottom of each cell; the last column and row end exactly at the
/// panel edge (2×108+104 = 320, 122+118 = 240).
pub mod layout {
    use crate::slots::SlotIndex;

    /// Horizontal distance between cell origins.
    pub const CELL_PITCH_X: u16 = 108;
    /// Vertical distance between cell origins.
    pub const CELL_PITCH_Y: u16 = 122;
    /// Drawable cell width.
    pub const CELL_W: u16 = 104;
    /// Drawable cell height.
    pub const CELL_H: u16 = 118;

    /// Height of the selection marker strip at the top of a cell.
    pub const MARKER_H: u16 = 8;

    /// Warning bar vertical offset within the cell.
    pub const WARNING_Y: u16 = 94;
    /// Warning bar height (rows 94–117 inclusive).
    pub const WARNING_H: u16 = 24;

    /// Countdown glyph offset within the cell (drawn on top of the bar).
    pub const COUNTDOWN_X: u16 = 45;
    pub const COUNTDOWN_Y: u16 = 96;
    /// Glyph scale: 5×7 font × 3 = 15×21 px.
    pub const COUNTDOWN_SCALE: u16 = 3;

    /// Top-left corner of a slot's cell.
    pub fn cell_origin(slot: SlotIndex) -> (u16, u16) {
        (
            u16::from(slot.column()) * CELL_PITCH_X,
            u16::from(slot.row()) * CELL_PITCH_Y,
        )
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    input: InputSampler,
    tft: TftDisplay,
}

impl HardwareAdapter {
    pub fn new(input: InputSampler, tft: TftDisplay) -> Self {
        Self { input, tft }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn read_selector(&mut self) -> f32 {
        self.input.selector.read_norm()
    }

    fn confirm_pressed(&mut self) -> bool {
        self.input.confirm.is_pressed()
    }

    fn wait_confirm(&mut self, pressed: bool) {
        self.input.confirm.wait_for_level(pressed);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn draw_grid(&mut self) {
        self.tft
            .fill_rect(0, 0, tft::PANEL_W, tft::PANEL_H, tft::WHITE);
        for slot in SlotIndex::all() {
            let (x, y) = layout::cell_origin(slot);
            self.tft
                .fill_rect(x, y, layout::CELL_W, layout::CELL_H, tft::BLACK);
        }
    }

    fn draw_marker(&mut self, slot: SlotIndex) {
        let (x, y) = layout::cell_origin(slot);
        self.tft
            .fill_rect(x, y, layout::CELL_W, layout::MARKER_H, tft::YELLOW);
    }

    fn clear_marker(&mut self, slot: SlotIndex) {
        let (x, y) = layout::cell_origin(slot);
        self.tft
            .fill_rect(x, y, layout::CELL_W, layout::MARKER_H, tft::BLACK);
    }

    fn draw_warning(&mut self, slot: SlotIndex, warning: Warning) {
        let color = match warning {
            Warning::None => tft::BLACK,
            Warning::Orange => tft::ORANGE,
            Warning::Red => tft::RED,
        };
        let (x, y) = layout::cell_origin(slot);
        self.tft.fill_rect(
            x,
            y + layout::WARNING_Y,
            layout::CELL_W,
            layout::WARNING_H,
            color,
        );
    }

    fn clear_warning(&mut self, slot: SlotIndex) {
        self.draw_warning(slot, Warning::None);
    }

    fn draw_countdown(&mut self, slot: SlotIndex, days: u8) {
        let (x, y) = layout::cell_origin(slot);
        self.tft.draw_digit(
            x + layout::COUNTDOWN_X,
            y + layout::COUNTDOWN_Y,
            days.min(9),
            layout::COUNTDOWN_SCALE,
            tft::WHITE,
            tft::BLACK,
        );
    }

    fn draw_icon(&mut self, slot: SlotIndex, bitmap: &IconBitmap) {
        let (x, y) = layout::cell_origin(slot);
        // Clip oversized assets to the cell rather than bleed into a
        // neighbouring slot.
        let w = bitmap.width.min(layout::CELL_W);
        let h = bitmap.height.min(layout::CELL_H);
        self.tft.blit(x, y, w, h, &bitmap.pixels);
    }
}
