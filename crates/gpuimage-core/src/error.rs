//! Failure kinds of a frame capture.

use thiserror::Error;

use crate::format::PixelFormat;

/// Why a capture did not fill the bitmap.
///
/// Provider codes are the negative `ANDROID_BITMAP_RESULT_*` values; GL
/// codes are `glGetError` enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("no GL context is current on this thread")]
    NoCurrentContext,

    #[error("AndroidBitmap_getInfo() failed, error: {code}")]
    MetadataQueryFailed { code: i32 },

    #[error("bitmap format is {0}, expected RGBA_8888")]
    UnsupportedFormat(PixelFormat),

    #[error("bitmap stride {stride} is shorter than a row of {min} bytes")]
    InvalidStride { stride: u32, min: usize },

    #[error("AndroidBitmap_lockPixels() failed, error: {code}")]
    LockFailed { code: i32 },

    #[error("AndroidBitmap_unlockPixels() failed, error: {code}")]
    UnlockFailed { code: i32 },

    #[error("pixel buffer holds {len} bytes, read-back needs {required}")]
    BufferTooSmall { len: usize, required: usize },

    #[error("glReadPixels() failed, error: 0x{code:04X}")]
    ReadbackFailed { code: u32 },
}

/// Fieldless mirror of [`CaptureError`] for callers that only branch on the
/// class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureErrorKind {
    NoCurrentContext,
    MetadataQueryFailed,
    UnsupportedFormat,
    InvalidStride,
    LockFailed,
    UnlockFailed,
    BufferTooSmall,
    ReadbackFailed,
}

impl CaptureError {
    pub fn kind(&self) -> CaptureErrorKind {
        match self {
            CaptureError::NoCurrentContext => CaptureErrorKind::NoCurrentContext,
            CaptureError::MetadataQueryFailed { .. } => CaptureErrorKind::MetadataQueryFailed,
            CaptureError::UnsupportedFormat(_) => CaptureErrorKind::UnsupportedFormat,
            CaptureError::InvalidStride { .. } => CaptureErrorKind::InvalidStride,
            CaptureError::LockFailed { .. } => CaptureErrorKind::LockFailed,
            CaptureError::UnlockFailed { .. } => CaptureErrorKind::UnlockFailed,
            CaptureError::BufferTooSmall { .. } => CaptureErrorKind::BufferTooSmall,
            CaptureError::ReadbackFailed { .. } => CaptureErrorKind::ReadbackFailed,
        }
    }
}
