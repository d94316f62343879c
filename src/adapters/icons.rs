//! SD-card icon store.
//!
//! Icon assets are 16-bit (RGB565) BMP files on the FAT-formatted SD card,
//! one per [`FoodIcon`], named after the icon (`/sd/banana.bmp` etc.).
//! The card is mounted on the VFS by `hw_init::mount_sd`, so plain
//! `std::fs` reads work on target; on the host the store reads from a
//! caller-supplied directory, which is how the decoder tests feed it.

use std::path::PathBuf;

use log::debug;

use crate::app::ports::{AssetError, IconBitmap, IconPort};
use crate::drivers::hw_init::SD_MOUNT_POINT;
use crate::slots::FoodIcon;

pub struct SdIconStore {
    root: PathBuf,
}

impl SdIconStore {
    /// Store reading from the mounted SD card.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(SD_MOUNT_POINT),
        }
    }

    /// Store reading from an arbitrary directory (host tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn asset_path(&self, icon: FoodIcon) -> PathBuf {
        self.root.join(format!("{}.bmp", icon.asset_name()))
    }
}

impl Default for SdIconStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IconPort for SdIconStore {
    fn load_icon(&mut self, icon: FoodIcon) -> Result<IconBitmap, AssetError> {
        let path = self.asset_path(icon);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::NotFound);
            }
            Err(_) => return Err(AssetError::ReadFailed),
        };
        let bitmap = parse_bmp565(&bytes)?;
        debug!(
            "icons: loaded '{}' ({}x{})",
            icon.asset_name(),
            bitmap.width,
            bitmap.height
        );
        Ok(bitmap)
    }
}

// ───────────────────────────────────────────────────────────────
// BMP decoding
// ───────────────────────────────────────────────────────────────

const BMP_HEADER_LEN: usize = 54;

/// Decode a 16 bpp uncompressed/bitfields BMP into a top-down RGB565 buffer.
///
/// Only the narrow format the asset pipeline produces is accepted: 16 bpp,
/// positive height (bottom-up rows, 4-byte aligned).  Anything else is
/// `Malformed` — the caller skips the draw rather than showing garbage.
pub fn parse_bmp565(bytes: &[u8]) -> Result<IconBitmap, AssetError> {
    if bytes.len() < BMP_HEADER_LEN || &bytes[0..2] != b"BM" {
        return Err(AssetError::Malformed);
    }

    let data_offset = read_u32(bytes, 10) as usize;
    let width = read_u32(bytes, 18) as i32;
    let height = read_u32(bytes, 22) as i32;
    let bpp = u16::from_le_bytes([bytes[28], bytes[29]]);
    let compression = read_u32(bytes, 30);

    // BI_RGB (0) or BI_BITFIELDS (3); 565 masks are assumed either way.
    if bpp != 16 || (compression != 0 && compression != 3) {
        return Err(AssetError::Malformed);
    }
    if width <= 0 || height <= 0 || width > 320 || height > 240 {
        return Err(AssetError::Malformed);
    }

    let width = width as usize;
    let height = height as usize;
    let row_stride = (width * 2).div_ceil(4) * 4;
    let pixel_len = row_stride * height;
    if bytes.len() < data_offset + pixel_len {
        return Err(AssetError::Malformed);
    }

    let mut pixels = Vec::with_capacity(width * height);
    // BMP rows are stored bottom-up; emit top-down.
    for row in (0..height).rev() {
        let start = data_offset + row * row_stride;
        for col in 0..width {
            let i = start + col * 2;
            pixels.push(u16::from_le_bytes([bytes[i], bytes[i + 1]]));
        }
    }

    Ok(IconBitmap {
        width: width as u16,
        height: height as u16,
        pixels,
    })
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
