//! Renderer contract and surface lifecycle.
//!
//! Hosts (desktop window, Android JNI bridge) never talk to the GPU layer
//! directly. They create a [`SurfaceHost`] when their drawing surface
//! appears, forward surface events into it, and drop it when the surface
//! goes away. The host decides *whether* a call may reach the renderer; the
//! [`RendererLibrary`] implementation decides *what* it does.

mod contract;
mod error;
mod host;
mod library;

pub use contract::{FrameOutcome, RendererLibrary, SkipReason};
pub use error::HostError;
pub use host::{HostStats, LifecycleState, SurfaceHost};
pub use library::CubeLibrary;
