//! Time subsystem.
//!
//! Provides frame timing that is independent of the host's refresh source.
//! Intended usage:
//! - one `FrameClock` per surface
//! - call `tick()` once per delivered frame to obtain `FrameTime`
//! - call `reset()` when frames resume after a pause

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
