//! Native methods of `jp.co.cyberagent.android.gpuimage.GPUImageNativeLibrary`.

use gpuimage_core::{capture, CaptureError, CaptureOptions};
use gpuimage_gl::GlReadBuffer;
use jni::objects::{JClass, JObject};
use jni::sys::jboolean;
use jni::JNIEnv;

use crate::bitmap::NdkBitmap;
use crate::boundary::guarded;

/// `static native boolean CopyToBitmap(Bitmap bitmap)`
///
/// Copies the current read-buffer into `bitmap`, which must be RGBA_8888.
/// The image ends up upside down. Must be called on the GL thread.
#[no_mangle]
pub extern "system" fn Java_jp_co_cyberagent_android_gpuimage_GPUImageNativeLibrary_CopyToBitmap<
    'local,
>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    bitmap: JObject<'local>,
) -> jboolean {
    crate::init_logging();
    guarded("CopyToBitmap", || copy_to_bitmap(&env, &bitmap))
}

fn copy_to_bitmap(env: &JNIEnv<'_>, bitmap: &JObject<'_>) -> Result<(), CaptureError> {
    let source = GlReadBuffer::current(CaptureOptions::default())?;
    // SAFETY: the JVM passes a live Bitmap reference valid for this call.
    let storage = unsafe { NdkBitmap::from_jni(env, bitmap) };
    capture(&storage, &source)
}
