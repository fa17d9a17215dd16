//! Platform-independent half of libgpuimage's bitmap capture.
//!
//! # Overview
//!
//! - [`BitmapStorage`] is the pixel storage a frame is copied into (an
//!   Android `Bitmap` on device).
//! - [`FrameSource`] is the read-buffer the frame is copied from (the current
//!   GL context on device).
//! - [`capture`] validates the bitmap, holds a [`PixelLock`] for the duration
//!   of the read-back and reports a [`CaptureError`] on failure.
//! - [`logging`] and [`config`] carry the diagnostics setup shared by the
//!   GL and JNI crates.

pub mod capture;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod orientation;
pub mod source;
pub mod storage;

#[cfg(test)]
mod testing;

pub use capture::capture;
pub use config::{CaptureOptions, LogConfig};
pub use error::{CaptureError, CaptureErrorKind};
pub use format::{BitmapInfo, PixelFormat};
pub use orientation::flip_rows;
pub use source::FrameSource;
pub use storage::{BitmapStorage, PixelLock};
