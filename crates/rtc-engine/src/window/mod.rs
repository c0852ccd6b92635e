//! Desktop window host.
//!
//! Owns the `winit` EventLoop and a single Window, and drives a
//! [`SurfaceHost`](crate::core::SurfaceHost) from window events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
