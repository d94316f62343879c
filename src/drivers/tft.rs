//! ILI9341 TFT panel driver (320×240 landscape, RGB565).
//!
//! Raw panel operations only — slot geometry lives in the display adapter.
//! All writes go through the SPI helpers in [`hw_init`], which are no-ops on
//! the host target, so this module compiles and unit-tests everywhere.

use crate::drivers::hw_init;

/// Panel width in landscape orientation.
pub const PANEL_W: u16 = 320;
/// Panel height in landscape orientation.
pub const PANEL_H: u16 = 240;

// RGB565 colours used by the UI.
pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const YELLOW: u16 = 0xFFE0;
pub const ORANGE: u16 = 0xFD20;
pub const RED: u16 = 0xF800;

// ILI9341 command set (the subset we use).
const CMD_SLEEP_OUT: u8 = 0x11;
const CMD_DISPLAY_ON: u8 = 0x29;
const CMD_COLUMN_ADDR: u8 = 0x2A;
const CMD_PAGE_ADDR: u8 = 0x2B;
const CMD_MEMORY_WRITE: u8 = 0x2C;
const CMD_MADCTL: u8 = 0x36;
const CMD_PIXEL_FORMAT: u8 = 0x3A;

/// MADCTL value for landscape with BGR panel wiring.
const MADCTL_LANDSCAPE: u8 = 0xE8;

pub struct TftDisplay;

impl Default for TftDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TftDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Hardware reset and panel init sequence.  Call once at boot, after
    /// `hw_init::init_peripherals`.
    pub fn init(&mut self) {
        #[cfg(target_os = "espidf")]
        {
            use esp_idf_svc::hal::delay::FreeRtos;

            gpio_reset_pulse();
            hw_init::tft_write_cmd(CMD_SLEEP_OUT);
            FreeRtos::delay_ms(120);
            hw_init::tft_write_cmd(CMD_PIXEL_FORMAT);
            hw_init::tft_write_data(&[0x55]); // 16 bpp
            hw_init::tft_write_cmd(CMD_MADCTL);
            hw_init::tft_write_data(&[MADCTL_LANDSCAPE]);
            hw_init::tft_write_cmd(CMD_DISPLAY_ON);
            FreeRtos::delay_ms(20);
        }
        log::info!("tft: panel initialised ({PANEL_W}x{PANEL_H})");
    }

    /// Fill a rectangle with a solid colour.  Out-of-bounds rectangles are
    /// clipped to the panel.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) {
        let w = w.min(PANEL_W.saturating_sub(x));
        let h = h.min(PANEL_H.saturating_sub(y));
        if w == 0 || h == 0 {
            return;
        }
        self.set_window(x, y, w, h);

        let [hi, lo] = color.to_be_bytes();
        // Stream in fixed chunks — one scanline of 320 px is 640 bytes.
        let mut line = [0u8; 2 * PANEL_W as usize];
        for px in line.chunks_exact_mut(2) {
            px[0] = hi;
            px[1] = lo;
        }
        let row_bytes = 2 * w as usize;
        for _ in 0..h {
            hw_init::tft_write_data(&line[..row_bytes]);
        }
    }

    /// Blit a row-major RGB565 pixel buffer at the given origin.
    /// The buffer length must be `w * h`; short buffers are drawn truncated.
    pub fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) {
        if w == 0 || h == 0 || x >= PANEL_W || y >= PANEL_H {
            return;
        }
        self.set_window(x, y, w, h);

        let mut line = [0u8; 2 * PANEL_W as usize];
        for row in pixels.chunks(w as usize).take(h as usize) {
            let row_bytes = 2 * row.len();
            for (px, bytes) in row.iter().zip(line.chunks_exact_mut(2)) {
                let [hi, lo] = px.to_be_bytes();
                bytes[0] = hi;
                bytes[1] = lo;
            }
            hw_init::tft_write_data(&line[..row_bytes]);
        }
    }

    /// Render a single decimal digit as a scaled 5×7 glyph.
    pub fn draw_digit(&mut self, x: u16, y: u16, digit: u8, scale: u16, fg: u16, bg: u16) {
        let rows = digit_rows(digit);
        let glyph_w = 5 * scale;
        self.set_window(x, y, glyph_w, 7 * scale);

        let mut line = [0u8; 2 * PANEL_W as usize];
        for row in rows {
            for px in 0..5u16 {
                let on = row & (0b1_0000 >> px) != 0;
                let [hi, lo] = if on { fg } else { bg }.to_be_bytes();
                for s in 0..scale {
                    let idx = 2 * (px * scale + s) as usize;
                    line[idx] = hi;
                    line[idx + 1] = lo;
                }
            }
            for _ in 0..scale {
                hw_init::tft_write_data(&line[..2 * glyph_w as usize]);
            }
        }
    }

    fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) {
        let x_end = x + w - 1;
        let y_end = y + h - 1;
        hw_init::tft_write_cmd(CMD_COLUMN_ADDR);
        hw_init::tft_write_data(&[
            (x >> 8) as u8,
            (x & 0xFF) as u8,
            (x_end >> 8) as u8,
            (x_end & 0xFF) as u8,
        ]);
        hw_init::tft_write_cmd(CMD_PAGE_ADDR);
        hw_init::tft_write_data(&[
            (y >> 8) as u8,
            (y & 0xFF) as u8,
            (y_end >> 8) as u8,
            (y_end & 0xFF) as u8,
        ]);
        hw_init::tft_write_cmd(CMD_MEMORY_WRITE);
    }
}

#[cfg(target_os = "espidf")]
fn gpio_reset_pulse() {
    use esp_idf_svc::hal::delay::FreeRtos;

    hw_init::gpio_write(crate::pins::TFT_RST_GPIO, false);
    FreeRtos::delay_ms(10);
    hw_init::gpio_write(crate::pins::TFT_RST_GPIO, true);
    FreeRtos::delay_ms(120);
}

/// 5×7 bitmap rows for the digits 0–9, MSB-first in the low five bits.
fn digit_rows(digit: u8) -> [u8; 7] {
    match digit {
        0 => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        1 => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        2 => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        3 => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        4 => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        5 => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        6 => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        7 => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        8 => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        9 => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => {
            debug_assert!(false, "not a digit: {digit}");
            [0; 7]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_glyphs_are_distinct() {
        for a in 0..10u8 {
            for b in (a + 1)..10 {
                assert_ne!(digit_rows(a), digit_rows(b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn glyphs_fit_five_columns() {
        for d in 0..10u8 {
            for row in digit_rows(d) {
                assert_eq!(row & !0b11111, 0, "digit {d} overflows 5 columns");
            }
        }
    }

    #[test]
    fn ui_colors_are_rgb565() {
        // Red channel only for RED, all channels for WHITE.
        assert_eq!(RED & 0x07FF, 0);
        assert_eq!(WHITE, 0xFFFF);
        assert_ne!(ORANGE, YELLOW);
    }
}
