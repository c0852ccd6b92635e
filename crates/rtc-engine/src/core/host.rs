use std::cell::Cell;
use std::marker::PhantomData;

use crate::coords::PixelSize;
use crate::time::FrameClock;

use super::{FrameOutcome, HostError, RendererLibrary, SkipReason};

/// Where a surface is in its life.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    /// Surface exists; no size delivered yet.
    Created,
    /// At least one valid size has been delivered.
    Sized,
    /// Torn down; every call is ignored.
    Destroyed,
}

/// Frame counters, mostly for diagnostics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HostStats {
    pub frames_rendered: u64,
    pub frames_skipped: u64,
    pub resizes: u64,
}

/// Owns one renderer for the lifetime of one drawing surface.
///
/// Constructed when the host's surface is created and dropped when it is
/// destroyed. It guarantees, whatever order the host delivers events in:
/// - no frame reaches the renderer before a valid resize
/// - no frame reaches the renderer while paused
/// - non-positive sizes never reach the renderer
///
/// The type is `Send` but not `Sync`: it lives on the rendering thread.
pub struct SurfaceHost<R: RendererLibrary> {
    renderer: Option<R>,
    state: LifecycleState,
    paused: bool,
    size: Option<PixelSize>,
    clock: FrameClock,
    stats: HostStats,
    failure_logged: bool,
    _not_sync: PhantomData<Cell<()>>,
}

impl<R: RendererLibrary> SurfaceHost<R> {
    /// Surface-created: takes ownership of a renderer bound to the new surface.
    pub fn new(renderer: R) -> Self {
        log::debug!("surface host created");
        Self {
            renderer: Some(renderer),
            state: LifecycleState::Created,
            paused: false,
            size: None,
            clock: FrameClock::new(),
            stats: HostStats::default(),
            failure_logged: false,
            _not_sync: PhantomData,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Last size forwarded to the renderer.
    pub fn size(&self) -> Option<PixelSize> {
        self.size
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Direct access for renderer-specific operations outside the contract.
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Explicit initialize. Optional; `draw_frame` initializes lazily otherwise.
    pub fn initialize(&mut self) -> Result<(), HostError> {
        let renderer = self.renderer.as_mut().ok_or(HostError::Destroyed)?;
        renderer.initialize().map_err(HostError::Renderer)
    }

    /// Surface-changed: validates and forwards a new drawable size.
    ///
    /// Resizes are forwarded while paused; only frames are held back.
    pub fn surface_changed(&mut self, width: i32, height: i32) -> Result<PixelSize, HostError> {
        let renderer = self.renderer.as_mut().ok_or(HostError::Destroyed)?;
        let size = PixelSize::from_signed(width, height)
            .ok_or(HostError::InvalidSize { width, height })?;

        renderer.resize_viewport(size).map_err(HostError::Renderer)?;

        self.size = Some(size);
        self.state = LifecycleState::Sized;
        self.stats.resizes += 1;
        log::debug!("viewport resized to {}x{}", size.width, size.height);
        Ok(size)
    }

    /// Draw-frame: renders one frame if the surface is sized and running.
    ///
    /// Initializes the renderer first if it has no GPU resources. A failed
    /// initialization is not retried: it is fatal like an OOM. Other
    /// renderer errors are logged and reported as a skipped frame. A fatal
    /// outcome tears the surface down.
    pub fn draw_frame(&mut self) -> FrameOutcome {
        let outcome = self.try_draw();
        match outcome {
            FrameOutcome::Rendered => self.stats.frames_rendered += 1,
            FrameOutcome::Skipped(_) => self.stats.frames_skipped += 1,
            FrameOutcome::Fatal => {
                log::error!("fatal renderer error; tearing surface down");
                self.destroy();
            }
        }
        outcome
    }

    fn try_draw(&mut self) -> FrameOutcome {
        let Some(renderer) = self.renderer.as_mut() else {
            return FrameOutcome::Skipped(SkipReason::Destroyed);
        };
        if self.paused {
            return FrameOutcome::Skipped(SkipReason::Paused);
        }
        if self.state != LifecycleState::Sized {
            return FrameOutcome::Skipped(SkipReason::NotSized);
        }

        if !renderer.is_initialized() {
            if let Err(e) = renderer.initialize() {
                log::error!("renderer initialization failed: {e:#}");
                return FrameOutcome::Fatal;
            }
        }

        let time = self.clock.tick();
        match renderer.render_frame(time) {
            Ok(outcome) => {
                self.failure_logged = false;
                outcome
            }
            Err(e) => {
                // One error line per failure streak, not one per refresh.
                if !self.failure_logged {
                    log::error!("render frame failed: {e:#}");
                    self.failure_logged = true;
                } else {
                    log::debug!("render frame failed again: {e:#}");
                }
                FrameOutcome::Skipped(SkipReason::Failed)
            }
        }
    }

    /// Stops frame delivery until `resume`.
    pub fn pause(&mut self) {
        if self.renderer.is_some() && !self.paused {
            self.paused = true;
            log::debug!("surface paused");
        }
    }

    /// Restarts frame delivery. The clock baseline is reset so the paused
    /// interval does not show up as one huge frame delta.
    pub fn resume(&mut self) {
        if self.renderer.is_some() && self.paused {
            self.paused = false;
            self.clock.reset();
            log::debug!("surface resumed");
        }
    }

    /// Surface-destroyed: drops the renderer and all of its GPU resources.
    pub fn destroy(&mut self) {
        if self.renderer.take().is_some() {
            self.state = LifecycleState::Destroyed;
            self.paused = false;
            log::debug!(
                "surface host destroyed ({} frames rendered, {} skipped)",
                self.stats.frames_rendered,
                self.stats.frames_skipped
            );
        }
    }
}
