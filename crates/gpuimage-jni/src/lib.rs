//! `libgpuimage.so`: the JNI side of GPUImage's bitmap capture.
//!
//! Ties together [`gpuimage_core`] (capture contract) and [`gpuimage_gl`]
//! (GL read-back) behind the native methods the Java library declares.
//! Android-only pieces (the `Bitmap` provider, logcat output and the
//! exported functions) are compiled for `target_os = "android"` only.

pub mod boundary;

#[cfg(target_os = "android")]
mod bitmap;
#[cfg(target_os = "android")]
mod entry;
#[cfg(target_os = "android")]
mod logcat;

use gpuimage_core::logging;

/// Install the process-wide subscriber. Cheap after the first call.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    logging::init(|config| logcat::LogcatLayer::new(&config.tag));
    #[cfg(not(target_os = "android"))]
    logging::init(|_| tracing_subscriber::fmt::layer().with_target(false));
}
