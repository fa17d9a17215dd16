//! `android.graphics.Bitmap` as a [`BitmapStorage`].

use std::ptr::NonNull;

use gpuimage_core::{BitmapInfo, BitmapStorage, PixelFormat};
use jni::objects::JObject;
use jni::JNIEnv;
use ndk::bitmap::{AndroidBitmap, BitmapFormat};
use tracing::error;

/// `ANDROID_BITMAP_RESULT_BAD_PARAMETER`.
const RESULT_BAD_PARAMETER: i32 = -1;

/// A Java `Bitmap` reached through the NDK `jnigraphics` API.
pub(crate) struct NdkBitmap {
    inner: AndroidBitmap,
}

impl NdkBitmap {
    /// # Safety
    ///
    /// `bitmap` must reference an `android.graphics.Bitmap`, and both
    /// references must stay valid for the lifetime of the returned value.
    pub(crate) unsafe fn from_jni(env: &JNIEnv<'_>, bitmap: &JObject<'_>) -> Self {
        Self {
            inner: AndroidBitmap::from_jni(env.get_raw(), bitmap.as_raw()),
        }
    }
}

// SAFETY: AndroidBitmap_lockPixels pins `stride * height` bytes until
// AndroidBitmap_unlockPixels is called.
unsafe impl BitmapStorage for NdkBitmap {
    fn info(&self) -> Result<BitmapInfo, i32> {
        let info = self.inner.get_info().map_err(i32::from)?;
        Ok(BitmapInfo::new(
            info.width(),
            info.height(),
            info.stride(),
            pixel_format(info.format()),
        ))
    }

    fn lock_pixels(&self) -> Result<NonNull<u8>, i32> {
        let ptr = self.inner.lock_pixels().map_err(i32::from)?;
        match NonNull::new(ptr.cast::<u8>()) {
            Some(ptr) => Ok(ptr),
            None => {
                // Locked but unusable; release it before reporting.
                if let Err(err) = self.inner.unlock_pixels() {
                    error!(code = i32::from(err), "unlock after null lock failed");
                }
                Err(RESULT_BAD_PARAMETER)
            }
        }
    }

    fn unlock_pixels(&self) -> Result<(), i32> {
        self.inner.unlock_pixels().map_err(i32::from)
    }
}

fn pixel_format(format: BitmapFormat) -> PixelFormat {
    match format {
        BitmapFormat::RGBA_8888 => PixelFormat::Rgba8888,
        BitmapFormat::RGB_565 => PixelFormat::Rgb565,
        #[allow(deprecated)]
        BitmapFormat::RGBA_4444 => PixelFormat::Rgba4444,
        BitmapFormat::A_8 => PixelFormat::Alpha8,
        BitmapFormat::RGBA_F16 => PixelFormat::RgbaF16,
        _ => PixelFormat::Unknown,
    }
}
