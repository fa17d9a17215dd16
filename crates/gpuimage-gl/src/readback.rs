//! [`GlReadBuffer`]: the GL read-buffer as a [`FrameSource`].

use std::ffi::CStr;
use std::marker::PhantomData;

use gl::types::{GLenum, GLint, GLsizei, GLuint};
use gpuimage_core::source::check_rgba_len;
use gpuimage_core::{CaptureError, CaptureOptions, FrameSource};
use tracing::{debug, error, trace, warn};

use crate::gl_backend;
use crate::version::GlVersion;

/// Upper bound on queued errors drained before a read-back. A lost context
/// reports `GL_CONTEXT_LOST` forever.
///
/// Draining consumes errors the caller queued earlier on this context.
const MAX_STALE_ERRORS: usize = 32;

/// Reads pixels from the read-buffer of the context current on this thread.
///
/// Not `Send`: GL contexts are bound to the thread that made them current.
#[derive(Debug)]
pub struct GlReadBuffer {
    version: GlVersion,
    options: CaptureOptions,
    _not_send: PhantomData<*const ()>,
}

impl GlReadBuffer {
    /// Bind to the GL context current on the calling thread.
    ///
    /// Fails with [`CaptureError::NoCurrentContext`] if GL cannot be loaded or
    /// no context is current.
    pub fn current(options: CaptureOptions) -> Result<Self, CaptureError> {
        if let Err(err) = gl_backend::ensure_loaded() {
            error!("{:#}", err.context(CaptureError::NoCurrentContext));
            return Err(CaptureError::NoCurrentContext);
        }

        let Some(version_string) = current_version_string() else {
            error!("{}", CaptureError::NoCurrentContext);
            return Err(CaptureError::NoCurrentContext);
        };

        let version = GlVersion::parse(&version_string).unwrap_or_else(|| {
            warn!(version = %version_string, "unrecognised GL_VERSION, assuming ES 2.0");
            GlVersion::ES2
        });
        trace!(?version, "bound to current GL context");

        Ok(Self {
            version,
            options,
            _not_send: PhantomData,
        })
    }
}

impl FrameSource for GlReadBuffer {
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError> {
        check_rgba_len(width, height, dst)?;

        if self.options.check_errors {
            clear_gl_errors();
        }

        let code = unsafe {
            let saved = SavedPackState::save(self.version);
            saved.prepare();
            gl::ReadPixels(
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                dst.as_mut_ptr().cast(),
            );
            let code = if self.options.check_errors {
                gl::GetError()
            } else {
                gl::NO_ERROR
            };
            saved.restore();
            code
        };

        if code != gl::NO_ERROR {
            debug!(error = gl_error_name(code), "glReadPixels reported an error");
            return Err(CaptureError::ReadbackFailed { code });
        }

        trace!(width, height, "read-back complete");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GL state save / restore
// ---------------------------------------------------------------------------

/// Pack state that we override for the read-back.
struct SavedPackState {
    alignment: GLint,
    /// `None` when the context has no pixel pack buffers.
    pack_buffer: Option<GLint>,
}

impl SavedPackState {
    unsafe fn save(version: GlVersion) -> Self {
        let mut s = Self {
            alignment: 4,
            pack_buffer: None,
        };
        gl::GetIntegerv(gl::PACK_ALIGNMENT, &mut s.alignment);
        if version.has_pixel_pack_buffer() {
            let mut binding = 0;
            gl::GetIntegerv(gl::PIXEL_PACK_BUFFER_BINDING, &mut binding);
            s.pack_buffer = Some(binding);
        }
        s
    }

    /// Make `glReadPixels` write tightly packed rows to client memory.
    unsafe fn prepare(&self) {
        gl::PixelStorei(gl::PACK_ALIGNMENT, 4);
        if self.pack_buffer.is_some() {
            gl::BindBuffer(gl::PIXEL_PACK_BUFFER, 0);
        }
    }

    unsafe fn restore(&self) {
        gl::PixelStorei(gl::PACK_ALIGNMENT, self.alignment);
        if let Some(binding) = self.pack_buffer {
            gl::BindBuffer(gl::PIXEL_PACK_BUFFER, binding as GLuint);
        }
    }
}

// ---------------------------------------------------------------------------
// Shared GL helpers
// ---------------------------------------------------------------------------

fn current_version_string() -> Option<String> {
    let ptr = unsafe { gl::GetString(gl::VERSION) };
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr.cast()) }.to_string_lossy().into_owned())
}

fn clear_gl_errors() {
    drain_errors(|| unsafe { gl::GetError() });
}

/// Pull codes from `next_error` until it reports `GL_NO_ERROR`, at most
/// [`MAX_STALE_ERRORS`] times. Returns how many were discarded.
fn drain_errors(mut next_error: impl FnMut() -> GLenum) -> usize {
    for drained in 0..MAX_STALE_ERRORS {
        let code = next_error();
        if code == gl::NO_ERROR {
            return drained;
        }
        debug!(error = gl_error_name(code), "discarding stale GL error");
    }
    MAX_STALE_ERRORS
}

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown GL error",
    }
}
