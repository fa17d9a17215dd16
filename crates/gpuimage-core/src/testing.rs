//! In-memory storage provider and frame sources for tests.

use std::cell::{Cell, RefCell};
use std::ptr::NonNull;

use crate::error::CaptureError;
use crate::format::{BitmapInfo, PixelFormat};
use crate::source::{check_rgba_len, FrameSource};
use crate::storage::BitmapStorage;

/// Byte the mock buffer starts out filled with.
pub(crate) const UNTOUCHED: u8 = 0xCD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Info,
    Lock,
    Unlock,
}

/// Bitmap backed by a `Vec<u8>` that records every provider call.
pub(crate) struct MockBitmap {
    info: BitmapInfo,
    pixels: RefCell<Vec<u8>>,
    calls: RefCell<Vec<Call>>,
    locked: Cell<bool>,
    info_error: Option<i32>,
    lock_error: Option<i32>,
    unlock_error: Option<i32>,
}

impl MockBitmap {
    pub(crate) fn new(info: BitmapInfo) -> Self {
        Self {
            pixels: RefCell::new(vec![UNTOUCHED; info.buffer_len()]),
            info,
            calls: RefCell::new(Vec::new()),
            locked: Cell::new(false),
            info_error: None,
            lock_error: None,
            unlock_error: None,
        }
    }

    pub(crate) fn rgba(width: u32, height: u32) -> Self {
        Self::new(BitmapInfo::rgba(width, height))
    }

    pub(crate) fn with_format(width: u32, height: u32, format: PixelFormat) -> Self {
        let stride = width * format.bytes_per_pixel().unwrap_or(4) as u32;
        Self::new(BitmapInfo::new(width, height, stride, format))
    }

    pub(crate) fn fail_info(mut self, code: i32) -> Self {
        self.info_error = Some(code);
        self
    }

    pub(crate) fn fail_lock(mut self, code: i32) -> Self {
        self.lock_error = Some(code);
        self
    }

    pub(crate) fn fail_unlock(mut self, code: i32) -> Self {
        self.unlock_error = Some(code);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn pixels(&self) -> Vec<u8> {
        self.pixels.borrow().clone()
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

// SAFETY: the buffer is sized from `info` and never reallocated.
unsafe impl BitmapStorage for MockBitmap {
    fn info(&self) -> Result<BitmapInfo, i32> {
        self.calls.borrow_mut().push(Call::Info);
        match self.info_error {
            Some(code) => Err(code),
            None => Ok(self.info),
        }
    }

    fn lock_pixels(&self) -> Result<NonNull<u8>, i32> {
        self.calls.borrow_mut().push(Call::Lock);
        if let Some(code) = self.lock_error {
            return Err(code);
        }
        assert!(!self.locked.replace(true), "lock taken twice");
        let ptr = self.pixels.borrow_mut().as_mut_ptr();
        Ok(NonNull::new(ptr).unwrap_or(NonNull::dangling()))
    }

    fn unlock_pixels(&self) -> Result<(), i32> {
        self.calls.borrow_mut().push(Call::Unlock);
        self.locked.set(false);
        match self.unlock_error {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }
}

/// Read-buffer filled with one colour.
pub(crate) struct SolidFrame {
    pub(crate) rgba: [u8; 4],
    pub(crate) reads: Cell<usize>,
}

impl SolidFrame {
    pub(crate) fn new(rgba: [u8; 4]) -> Self {
        Self {
            rgba,
            reads: Cell::new(0),
        }
    }
}

impl FrameSource for SolidFrame {
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError> {
        check_rgba_len(width, height, dst)?;
        self.reads.set(self.reads.get() + 1);
        let len = width as usize * height as usize * 4;
        for px in dst[..len].chunks_exact_mut(4) {
            px.copy_from_slice(&self.rgba);
        }
        Ok(())
    }
}

/// Read-buffer whose framebuffer row `y` (counted from the bottom, as GL
/// does) is filled with the byte `y`.
pub(crate) struct RowIndexFrame;

impl FrameSource for RowIndexFrame {
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError> {
        check_rgba_len(width, height, dst)?;
        let row_bytes = width as usize * 4;
        for (y, row) in dst.chunks_exact_mut(row_bytes).take(height as usize).enumerate() {
            row.fill(y as u8);
        }
        Ok(())
    }
}

/// Read-buffer that always reports a GL error.
pub(crate) struct FailingFrame {
    pub(crate) code: u32,
}

impl FrameSource for FailingFrame {
    fn read_rgba(&self, width: u32, height: u32, dst: &mut [u8]) -> Result<(), CaptureError> {
        check_rgba_len(width, height, dst)?;
        Err(CaptureError::ReadbackFailed { code: self.code })
    }
}
