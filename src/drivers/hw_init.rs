//! One-shot hardware peripheral initialization.
//!
//! Configures the peripheral power rail, ADC channel, GPIO directions,
//! SPI bus (TFT + SD card), and the notification UART using raw ESP-IDF
//! sys calls.  Called once from `main()` before the poll loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    SpiInitFailed(i32),
    UartInitFailed(i32),
    SdMountFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::SpiInitFailed(rc) => write!(f, "SPI bus/device init failed (rc={rc})"),
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={rc})"),
            Self::SdMountFailed(rc) => write!(f, "SD card mount failed (rc={rc})"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

/// ADC1 channel wired to the selector pot (GPIO 5 on ESP32-S3).
pub const ADC1_CH_SELECTOR: u32 = 4;

/// VFS mount point for the icon SD card.
pub const SD_MOUNT_POINT: &str = "/sd";

#[cfg(target_os = "espidf")]
pub fn init_peripherals(uart_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        // Power rail first — the panel, SD card and HC-05 hang off it.
        init_power_rail()?;
        init_adc()?;
        init_gpio_inputs()?;
        init_spi()?;
        init_uart(uart_baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_uart_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Power rail ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_power_rail() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PERIPH_POWER_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::PERIPH_POWER_GPIO, 1) };
    info!("hw_init: peripheral power rail enabled");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the poll loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret =
        unsafe { adc_oneshot_config_channel(adc1_handle(), adc_channel_t_ADC_CHANNEL_4, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH4=selector)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Confirm button is polled — no interrupt.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::CONFIRM_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── SPI bus: TFT panel + SD card ──────────────────────────────

#[cfg(target_os = "espidf")]
static mut SPI_TFT_HANDLE: spi_device_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe fn init_spi() -> Result<(), HwInitError> {
    let bus_cfg = spi_bus_config_t {
        __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
            mosi_io_num: pins::TFT_MOSI_GPIO,
        },
        __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 {
            miso_io_num: pins::TFT_MISO_GPIO,
        },
        sclk_io_num: pins::TFT_SCLK_GPIO,
        __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
        __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
        max_transfer_sz: 4096,
        ..Default::default()
    };
    let ret = unsafe {
        spi_bus_initialize(
            spi_host_device_t_SPI2_HOST,
            &bus_cfg,
            spi_common_dma_t_SPI_DMA_CH_AUTO,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiInitFailed(ret));
    }

    let dev_cfg = spi_device_interface_config_t {
        clock_speed_hz: pins::TFT_SPI_FREQ_HZ as i32,
        mode: 0,
        spics_io_num: pins::TFT_CS_GPIO,
        queue_size: 4,
        ..Default::default()
    };
    // SAFETY: SPI_TFT_HANDLE is only written here, once at boot.
    let ret = unsafe {
        spi_bus_add_device(spi_host_device_t_SPI2_HOST, &dev_cfg, &raw mut SPI_TFT_HANDLE)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiInitFailed(ret));
    }

    // DC and RST are plain outputs.
    for pin in [pins::TFT_DC_GPIO, pins::TFT_RST_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: SPI2 configured (TFT CS={})", pins::TFT_CS_GPIO);
    Ok(())
}

/// Send one command byte to the panel (DC low).
#[cfg(target_os = "espidf")]
pub fn tft_write_cmd(cmd: u8) {
    gpio_write(pins::TFT_DC_GPIO, false);
    tft_transmit(&[cmd]);
}

/// Send data bytes to the panel (DC high).
#[cfg(target_os = "espidf")]
pub fn tft_write_data(data: &[u8]) {
    gpio_write(pins::TFT_DC_GPIO, true);
    tft_transmit(data);
}

#[cfg(target_os = "espidf")]
fn tft_transmit(bytes: &[u8]) {
    // The bus max_transfer_sz caps a single transaction.
    for chunk in bytes.chunks(4096) {
        let mut txn = spi_transaction_t {
            length: chunk.len() * 8,
            __bindgen_anon_1: spi_transaction_t__bindgen_ty_1 {
                tx_buffer: chunk.as_ptr().cast(),
            },
            ..Default::default()
        };
        // SAFETY: SPI_TFT_HANDLE written once in init_spi(); main-loop only.
        let ret = unsafe { spi_device_polling_transmit(SPI_TFT_HANDLE, &mut txn) };
        if ret != ESP_OK as i32 {
            log::warn!("tft: SPI transmit failed (rc={ret})");
            return;
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn tft_write_cmd(_cmd: u8) {}

#[cfg(not(target_os = "espidf"))]
pub fn tft_write_data(_data: &[u8]) {}

// ── SD card (FAT over SPI, mounted on the VFS) ────────────────

#[cfg(target_os = "espidf")]
pub fn mount_sd() -> Result<(), HwInitError> {
    let mount_cfg = esp_vfs_fat_sdmmc_mount_config_t {
        format_if_mount_failed: false,
        max_files: 4,
        allocation_unit_size: 16 * 1024,
        ..Default::default()
    };

    // SAFETY: called once at boot after init_spi(); the returned card handle
    // is owned by the VFS until unmount (never — runs for device lifetime).
    unsafe {
        let mut host: sdmmc_host_t = SDSPI_HOST_DEFAULT();
        host.slot = spi_host_device_t_SPI2_HOST as i32;

        let mut slot_cfg: sdspi_device_config_t = SDSPI_DEVICE_CONFIG_DEFAULT();
        slot_cfg.gpio_cs = pins::SD_CS_GPIO;
        slot_cfg.host_id = spi_host_device_t_SPI2_HOST;

        let mut card: *mut sdmmc_card_t = core::ptr::null_mut();
        let ret = esp_vfs_fat_sdspi_mount(
            c"/sd".as_ptr(),
            &host,
            &slot_cfg,
            &mount_cfg,
            &mut card,
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::SdMountFailed(ret));
        }
    }
    info!("hw_init: SD card mounted at {SD_MOUNT_POINT}");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn mount_sd() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): SD mount skipped");
    Ok(())
}

// ── Notification UART ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
const NOTIFY_UART: uart_port_t = 1;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let uart_cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    unsafe {
        let ret = uart_param_config(NOTIFY_UART, &uart_cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_set_pin(NOTIFY_UART, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_driver_install(NOTIFY_UART, 256, 256, 0, core::ptr::null_mut(), 0);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }
    info!("hw_init: UART1 configured at {baud} baud");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) {
    // SAFETY: UART1 driver installed in init_uart(); main-loop only.
    let written =
        unsafe { uart_write_bytes(NOTIFY_UART, bytes.as_ptr().cast(), bytes.len()) };
    if written < 0 {
        log::warn!("uart: write failed (rc={written})");
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_bytes: &[u8]) {}
