//! Pixel formats and bitmap metadata reported by a storage provider.

use std::fmt;

/// Pixel layout of a bitmap's backing memory.
///
/// Discriminants match the `ANDROID_BITMAP_FORMAT_*` constants from
/// `<android/bitmap.h>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 4 channels, 8 bits each, bytes ordered R, G, B, A.
    Rgba8888,
    Rgb565,
    Rgba4444,
    Alpha8,
    RgbaF16,
    /// Anything else, including `ANDROID_BITMAP_FORMAT_NONE`.
    Unknown,
}

impl PixelFormat {
    /// The only layout `glReadPixels(GL_RGBA, GL_UNSIGNED_BYTE)` can write
    /// without conversion.
    pub const SUPPORTED: PixelFormat = PixelFormat::Rgba8888;

    /// Map a raw `ANDROID_BITMAP_FORMAT_*` value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => PixelFormat::Rgba8888,
            4 => PixelFormat::Rgb565,
            7 => PixelFormat::Rgba4444,
            8 => PixelFormat::Alpha8,
            9 => PixelFormat::RgbaF16,
            _ => PixelFormat::Unknown,
        }
    }

    /// Bytes per pixel, or `None` when the layout is not known.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Rgba8888 => Some(4),
            PixelFormat::Rgb565 | PixelFormat::Rgba4444 => Some(2),
            PixelFormat::Alpha8 => Some(1),
            PixelFormat::RgbaF16 => Some(8),
            PixelFormat::Unknown => None,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Rgba8888 => "RGBA_8888",
            PixelFormat::Rgb565 => "RGB_565",
            PixelFormat::Rgba4444 => "RGBA_4444",
            PixelFormat::Alpha8 => "A_8",
            PixelFormat::RgbaF16 => "RGBA_F16",
            PixelFormat::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Metadata of a bitmap as reported by `AndroidBitmap_getInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: u32,
    pub height: u32,
    /// Bytes between the start of consecutive rows.
    pub stride: u32,
    pub format: PixelFormat,
}

impl BitmapInfo {
    pub fn new(width: u32, height: u32, stride: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            stride,
            format,
        }
    }

    /// Tightly packed RGBA bitmap of the given size.
    pub fn rgba(width: u32, height: u32) -> Self {
        Self::new(width, height, width * 4, PixelFormat::Rgba8888)
    }

    /// Bytes in one row of RGBA8 pixels, without padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    /// Bytes `glReadPixels` writes for the whole frame: `width * height * 4`.
    pub fn required_len(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Bytes covered by the locked buffer, including row padding.
    pub fn buffer_len(&self) -> usize {
        self.stride as usize * self.height as usize
    }

    /// True when rows carry no padding and the read-back can land in place.
    pub fn is_tightly_packed(&self) -> bool {
        self.stride as usize == self.row_bytes()
    }
}
