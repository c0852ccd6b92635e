use std::ffi::c_void;
use std::ptr::NonNull;

use raw_window_handle::{
    AndroidDisplayHandle, AndroidNdkWindowHandle, DisplayHandle, HandleError, HasDisplayHandle,
    HasWindowHandle, RawDisplayHandle, RawWindowHandle, WindowHandle,
};
use rtc_engine::coords::PixelSize;

#[repr(C)]
struct ANativeWindow {
    _private: [u8; 0],
}

#[link(name = "android")]
unsafe extern "C" {
    fn ANativeWindow_fromSurface(
        env: *mut jni::sys::JNIEnv,
        surface: jni::sys::jobject,
    ) -> *mut ANativeWindow;
    fn ANativeWindow_release(window: *mut ANativeWindow);
    fn ANativeWindow_getWidth(window: *mut ANativeWindow) -> i32;
    fn ANativeWindow_getHeight(window: *mut ANativeWindow) -> i32;
}

/// Owned reference to an `ANativeWindow`, released on drop.
///
/// Handed to wgpu by value so the window outlives the surface built on it.
pub(crate) struct NativeWindow {
    ptr: NonNull<ANativeWindow>,
}

// ANativeWindow is reference counted and its NDK functions are thread-safe.
unsafe impl Send for NativeWindow {}
unsafe impl Sync for NativeWindow {}

impl NativeWindow {
    /// Acquires the native window behind an `android.view.Surface`.
    ///
    /// # Safety
    /// `env` must be the JNI environment of the calling thread and `surface`
    /// a live local or global reference to an `android.view.Surface`.
    pub(crate) unsafe fn from_surface(
        env: *mut jni::sys::JNIEnv,
        surface: jni::sys::jobject,
    ) -> Option<Self> {
        let raw = unsafe { ANativeWindow_fromSurface(env, surface) };
        NonNull::new(raw).map(|ptr| Self { ptr })
    }

    /// Current buffer size, if the window has one yet.
    pub(crate) fn size(&self) -> Option<PixelSize> {
        let (w, h) = unsafe {
            (
                ANativeWindow_getWidth(self.ptr.as_ptr()),
                ANativeWindow_getHeight(self.ptr.as_ptr()),
            )
        };
        PixelSize::from_signed(w, h)
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        unsafe { ANativeWindow_release(self.ptr.as_ptr()) };
    }
}

impl HasWindowHandle for NativeWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        let handle = AndroidNdkWindowHandle::new(self.ptr.cast::<c_void>());
        // The pointer stays valid until `self` is dropped.
        Ok(unsafe { WindowHandle::borrow_raw(RawWindowHandle::AndroidNdk(handle)) })
    }
}

impl HasDisplayHandle for NativeWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        let handle = RawDisplayHandle::Android(AndroidDisplayHandle::new());
        Ok(unsafe { DisplayHandle::borrow_raw(handle) })
    }
}
