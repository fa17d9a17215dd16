//! The bitmap storage provider and the scoped pixel lock.

use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::{error, trace};

use crate::error::CaptureError;
use crate::format::BitmapInfo;

/// Externally owned pixel storage that can be queried and locked.
///
/// Errors are the provider's raw status codes.
///
/// # Safety
///
/// A pointer returned by [`lock_pixels`](BitmapStorage::lock_pixels) must be
/// valid for writes of [`BitmapInfo::buffer_len`] bytes, as last reported by
/// [`info`](BitmapStorage::info), until the matching
/// [`unlock_pixels`](BitmapStorage::unlock_pixels) call. Nothing else may
/// access that memory in between.
pub unsafe trait BitmapStorage {
    /// Format and dimensions of the bitmap.
    fn info(&self) -> Result<BitmapInfo, i32>;

    /// Pin the pixel buffer and return its address.
    fn lock_pixels(&self) -> Result<NonNull<u8>, i32>;

    /// Release a lock taken by [`lock_pixels`](BitmapStorage::lock_pixels).
    fn unlock_pixels(&self) -> Result<(), i32>;
}

/// Exclusive access to a locked pixel buffer. Unlocks on drop.
pub struct PixelLock<'a, S: BitmapStorage + ?Sized> {
    storage: &'a S,
    ptr: NonNull<u8>,
    len: usize,
    _pixels: PhantomData<&'a mut [u8]>,
}

impl<'a, S: BitmapStorage + ?Sized> PixelLock<'a, S> {
    /// Lock `storage`, whose buffer spans `len` bytes.
    ///
    /// `len` must not exceed the [`BitmapInfo::buffer_len`] the provider
    /// reported.
    pub fn acquire(storage: &'a S, len: usize) -> Result<Self, CaptureError> {
        let ptr = storage
            .lock_pixels()
            .map_err(|code| CaptureError::LockFailed { code })?;

        trace!(len, "pixels locked");

        Ok(Self {
            storage,
            ptr,
            len,
            _pixels: PhantomData,
        })
    }

    /// The locked buffer.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        // SAFETY: the provider guarantees `len` writable bytes at `ptr` for as
        // long as the lock is held, and `&mut self` keeps this the only view.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<S: BitmapStorage + ?Sized> Drop for PixelLock<'_, S> {
    fn drop(&mut self) {
        match self.storage.unlock_pixels() {
            Ok(()) => trace!("pixels unlocked"),
            Err(code) => error!("{}", CaptureError::UnlockFailed { code }),
        }
    }
}
