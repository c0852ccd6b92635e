//! Size types shared by the device layer, renderers and hosts.
//!
//! All sizes are physical pixels. Hosts hand over signed integers (the JNI
//! boundary only knows `jint`), so validation happens here once.

mod size;

pub use size::PixelSize;
