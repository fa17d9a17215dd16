//! A `tracing` layer that writes to logcat.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};

use gpuimage_core::logging::{format_event, Priority};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

#[link(name = "log")]
extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
}

/// Forwards every event to `__android_log_write` under a fixed tag.
pub(crate) struct LogcatLayer {
    tag: CString,
}

impl LogcatLayer {
    pub(crate) fn new(tag: &str) -> Self {
        let tag = CString::new(tag).unwrap_or_else(|_| CString::from(c"libgpuimage"));
        Self { tag }
    }
}

impl<S: Subscriber> Layer<S> for LogcatLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let priority = Priority::from(*event.metadata().level());
        let text = format_event(event).replace('\0', "\\0");
        let Ok(text) = CString::new(text) else {
            return;
        };
        unsafe {
            __android_log_write(priority as c_int, self.tag.as_ptr(), text.as_ptr());
        }
    }
}
