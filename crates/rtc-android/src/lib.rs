//! Android bridge for the rotating textured cube renderer.
//!
//! The Kotlin side declares (in `com.mgtt.rtc.GL3JNILib`):
//!
//! ```kotlin
//! external fun nativeCreate(surface: Surface, texture: ByteArray?): Long
//! external fun nativeInit(handle: Long)
//! external fun nativeRender(handle: Long)
//! external fun nativeResize(handle: Long, width: Int, height: Int)
//! external fun nativePause(handle: Long)
//! external fun nativeResume(handle: Long)
//! external fun nativeTrimMemory(handle: Long)
//! external fun nativeDestroy(handle: Long)
//! ```
//!
//! `nativeCreate` returns an opaque handle owning one surface's renderer.
//! Every other call takes that handle and must come from the thread that
//! created it. The handle-free `Init`/`Render`/`UpdateGlViewPort` natives
//! are deliberately not exported, so a shell built against them fails with
//! `UnsatisfiedLinkError` at load instead of calling with the wrong arity.

mod registry;

#[cfg(target_os = "android")]
mod bridge;
#[cfg(target_os = "android")]
mod native_window;

pub use registry::{HandleRegistry, RegistryError};

#[cfg(test)]
mod tests {
    const BRIDGE: &str = include_str!("bridge.rs");

    #[test]
    fn handle_taking_exports_use_their_own_names() {
        let names = [
            "nativeCreate",
            "nativeInit",
            "nativeRender",
            "nativeResize",
            "nativeDestroy",
        ];
        for name in names {
            let symbol = format!("fn Java_com_mgtt_rtc_GL3JNILib_{name}<");
            assert!(BRIDGE.contains(&symbol), "missing export {name}");
        }
    }

    #[test]
    fn handle_free_names_are_not_exported() {
        for name in ["Init", "Render", "UpdateGlViewPort"] {
            let symbol = format!("fn Java_com_mgtt_rtc_GL3JNILib_{name}<");
            assert!(!BRIDGE.contains(&symbol), "{name} would bind with the wrong arity");
        }
    }
}
