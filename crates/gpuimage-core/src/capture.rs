//! Copy the current read-buffer into a locked bitmap.
//!
//! The resulting image is upside down: GL's origin is the bottom-left
//! corner, so the first row in the bitmap is the bottom row on screen. Use
//! [`crate::orientation::flip_rows`] when an upright copy is needed.

use tracing::{debug, error};

use crate::error::CaptureError;
use crate::format::PixelFormat;
use crate::source::FrameSource;
use crate::storage::{BitmapStorage, PixelLock};

/// Fill `storage` with the frame `source` reads back.
///
/// Steps, each aborting the call on failure:
/// 1. query the bitmap's metadata,
/// 2. require [`PixelFormat::Rgba8888`] and rows of at least `width * 4` bytes,
/// 3. lock the pixel buffer,
/// 4. read `(0, 0, width, height)` into it.
///
/// The lock is released before returning on every path. Failures are logged
/// on the error channel and returned.
pub fn capture<S, F>(storage: &S, source: &F) -> Result<(), CaptureError>
where
    S: BitmapStorage + ?Sized,
    F: FrameSource + ?Sized,
{
    capture_inner(storage, source).inspect_err(|err| error!(kind = ?err.kind(), "{err}"))
}

fn capture_inner<S, F>(storage: &S, source: &F) -> Result<(), CaptureError>
where
    S: BitmapStorage + ?Sized,
    F: FrameSource + ?Sized,
{
    let info = storage
        .info()
        .map_err(|code| CaptureError::MetadataQueryFailed { code })?;

    if info.format != PixelFormat::SUPPORTED {
        return Err(CaptureError::UnsupportedFormat(info.format));
    }

    let row_bytes = info.row_bytes();
    if (info.stride as usize) < row_bytes {
        return Err(CaptureError::InvalidStride {
            stride: info.stride,
            min: row_bytes,
        });
    }

    debug!(
        width = info.width,
        height = info.height,
        stride = info.stride,
        "capturing read-buffer"
    );

    let mut lock = PixelLock::acquire(storage, info.buffer_len())?;

    if info.is_tightly_packed() || row_bytes == 0 {
        return source.read_rgba(info.width, info.height, lock.pixels_mut());
    }

    // glReadPixels cannot skip row padding, so read packed rows and spread
    // them out over the stride.
    let mut scratch = vec![0u8; info.required_len()];
    source.read_rgba(info.width, info.height, &mut scratch)?;

    let stride = info.stride as usize;
    for (src, dst) in scratch
        .chunks_exact(row_bytes)
        .zip(lock.pixels_mut().chunks_mut(stride))
    {
        dst[..row_bytes].copy_from_slice(src);
    }

    Ok(())
}
