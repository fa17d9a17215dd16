//! OpenGL ES read-back for libgpuimage.
//!
//! [`GlReadBuffer`] implements [`gpuimage_core::FrameSource`] on top of
//! `glReadPixels`. Obtain one with [`GlReadBuffer::current`] on the thread
//! whose context holds the rendered frame.
//!
//! ### Warning
//!
//! GL entry points are resolved from the system GLES library with `dlopen`
//! rather than through EGL, so only core entry points are available.

mod gl_backend;
pub mod readback;
pub mod version;

pub use readback::{gl_error_name, GlReadBuffer};
pub use version::GlVersion;
