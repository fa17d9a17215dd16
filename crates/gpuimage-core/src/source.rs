//! The read-buffer side of a capture.

use crate::error::CaptureError;

/// Something that can copy the current read-buffer into CPU memory.
///
/// Holding a `FrameSource` stands for the precondition that a rendering
/// context is current on the calling thread; implementations check it when
/// they are constructed.
pub trait FrameSource {
    /// Read the `(0, 0, width, height)` rectangle as RGBA8 into `dst`.
    ///
    /// Rows are tightly packed and ordered bottom-to-top. `dst` must hold at
    /// least `width * height * 4` bytes; shorter buffers fail with
    /// [`CaptureError::BufferTooSmall`] before anything is written.
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError>;
}

impl<F: FrameSource + ?Sized> FrameSource for &F {
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError> {
        (**self).read_rgba(width, height, dst)
    }
}

/// Check `dst` against the size of a `width` x `height` RGBA8 frame.
pub fn check_rgba_len(width: u32, height: u32, dst: &[u8]) -> Result<(), CaptureError> {
    let required = width as usize * height as usize * 4;
    if dst.len() < required {
        return Err(CaptureError::BufferTooSmall {
            len: dst.len(),
            required,
        });
    }
    Ok(())
}
