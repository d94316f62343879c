//! GPIO / peripheral pin assignments for the FridgeRack main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Selector potentiometer (analog, ADC1)
// ---------------------------------------------------------------------------

/// 10 kΩ rotary pot wiper — shared dial for slot/day/icon selection.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const SELECTOR_ADC_GPIO: i32 = 5;
/// ADC attenuation for the selector (11 dB → 0 – 3.1 V range).
pub const SELECTOR_ADC_ATTEN: u32 = 3; // esp_idf_hal::adc::attenuation::DB_11

// ---------------------------------------------------------------------------
// Confirm button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button that steps the navigation cycle.
pub const CONFIRM_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// TFT panel (ILI9341, SPI2)
// ---------------------------------------------------------------------------

pub const TFT_SCLK_GPIO: i32 = 12;
pub const TFT_MOSI_GPIO: i32 = 11;
pub const TFT_MISO_GPIO: i32 = 13;
pub const TFT_CS_GPIO: i32 = 10;
/// Data/command select (HIGH = data).
pub const TFT_DC_GPIO: i32 = 9;
pub const TFT_RST_GPIO: i32 = 8;
/// SPI clock for panel writes (40 MHz — ILI9341 maximum for writes).
pub const TFT_SPI_FREQ_HZ: u32 = 40_000_000;

// ---------------------------------------------------------------------------
// SD card (icon assets, shared SPI bus with separate CS)
// ---------------------------------------------------------------------------

pub const SD_CS_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Notification UART (HC-05 Bluetooth module)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Power rail
// ---------------------------------------------------------------------------

/// Enables the 3.3 V peripheral rail (panel, SD, HC-05).  Driven HIGH at boot.
pub const PERIPH_POWER_GPIO: i32 = 4;
