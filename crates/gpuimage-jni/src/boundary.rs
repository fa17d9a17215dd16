//! Collapse capture results into JNI return values.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use gpuimage_core::CaptureError;
use jni::sys::{jboolean, JNI_FALSE, JNI_TRUE};
use tracing::error;

/// Run `f` for the JNI function `entry`, mapping success to `JNI_TRUE`.
///
/// Errors were already logged where they happened. Panics are caught here so
/// they never unwind into the JVM.
pub fn guarded(entry: &str, f: impl FnOnce() -> Result<(), CaptureError>) -> jboolean {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => JNI_TRUE,
        Ok(Err(_)) => JNI_FALSE,
        Err(payload) => {
            error!(entry, "panicked: {}", panic_message(payload.as_ref()));
            JNI_FALSE
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
