use anyhow::Result;

use crate::coords::PixelSize;
use crate::time::FrameTime;

/// Why a frame was not drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// No viewport size has been delivered yet.
    NotSized,
    /// The host paused the surface.
    Paused,
    /// The surface has been torn down.
    Destroyed,
    /// The swapchain could not hand out a texture this frame.
    SurfaceUnavailable,
    /// The renderer returned an error; it was logged.
    Failed,
}

/// Result of one draw-frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered,
    Skipped(SkipReason),
    /// Unrecoverable GPU condition; the surface must be torn down.
    Fatal,
}

/// The three-call contract between a host shell and the renderer.
///
/// All calls arrive serially on the host's rendering thread.
pub trait RendererLibrary {
    /// Allocates GPU resources.
    ///
    /// Optional for callers and idempotent. Hosts call it before the first
    /// frame whenever `is_initialized` reports false.
    fn initialize(&mut self) -> Result<()>;

    /// Whether GPU resources currently exist.
    fn is_initialized(&self) -> bool;

    /// Advances animation state and draws one frame.
    fn render_frame(&mut self, time: FrameTime) -> Result<FrameOutcome>;

    /// Updates the viewport and projection to a new drawable size.
    fn resize_viewport(&mut self, size: PixelSize) -> Result<()>;
}
