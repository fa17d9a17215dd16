//! Resolve GL entry points from the platform's GLES library.

use anyhow::Result;

/// Load GL function pointers, once per process.
///
/// The pointers are context independent on Android, so this does not need a
/// current context. Later calls return immediately once loading succeeded.
#[cfg(unix)]
pub(crate) fn ensure_loaded() -> Result<()> {
    unix::LIBRARY
        .get_or_try_init(unix::GlLibrary::load)
        .map(|_| ())
}

#[cfg(not(unix))]
pub(crate) fn ensure_loaded() -> Result<()> {
    anyhow::bail!("no GL loader for this platform")
}

#[cfg(unix)]
mod unix {
    use std::ffi::{c_void, CStr, CString};
    use std::ptr::{self, NonNull};

    use anyhow::{anyhow, ensure, Result};
    use once_cell::sync::OnceCell;
    use tracing::debug;

    #[cfg(target_os = "android")]
    const GL_LIBRARY: &CStr = c"libGLESv2.so";
    #[cfg(not(target_os = "android"))]
    const GL_LIBRARY: &CStr = c"libGL.so.1";

    pub(super) static LIBRARY: OnceCell<GlLibrary> = OnceCell::new();

    /// `dlopen` handle kept alive for the lifetime of the process.
    pub(super) struct GlLibrary(NonNull<c_void>);

    // SAFETY: a dlopen handle is a process-wide token; dlsym is thread-safe.
    unsafe impl Send for GlLibrary {}
    unsafe impl Sync for GlLibrary {}

    impl GlLibrary {
        pub(super) fn load() -> Result<Self> {
            let library = Self::open()?;
            gl::load_with(|symbol| library.symbol(symbol));
            ensure!(
                gl::GetString::is_loaded() && gl::ReadPixels::is_loaded(),
                "{GL_LIBRARY:?} does not export glGetString/glReadPixels"
            );
            debug!("GL entry points loaded from {GL_LIBRARY:?}");
            Ok(library)
        }

        fn open() -> Result<Self> {
            let handle = unsafe { libc::dlopen(GL_LIBRARY.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
            NonNull::new(handle)
                .map(Self)
                .ok_or_else(|| anyhow!("dlopen({GL_LIBRARY:?}) failed: {}", last_dl_error()))
        }

        fn symbol(&self, name: &str) -> *const c_void {
            let Ok(name) = CString::new(name) else {
                return ptr::null();
            };
            unsafe { libc::dlsym(self.0.as_ptr(), name.as_ptr()) as *const c_void }
        }
    }

    fn last_dl_error() -> String {
        let message = unsafe { libc::dlerror() };
        if message.is_null() {
            return "unknown error".to_owned();
        }
        unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
    }
}
