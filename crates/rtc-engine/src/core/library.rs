use anyhow::Result;

use crate::coords::PixelSize;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{CubeConfig, CubeRenderer, RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::{FrameOutcome, RendererLibrary, SkipReason};

/// The wgpu-backed renderer: one GPU context plus the cube renderer.
pub struct CubeLibrary<'w> {
    gpu: Gpu<'w>,
    cube: CubeRenderer,
}

impl<'w> CubeLibrary<'w> {
    pub fn new(gpu: Gpu<'w>, config: CubeConfig) -> Self {
        Self {
            gpu,
            cube: CubeRenderer::new(config),
        }
    }

    /// Drops the cube's GPU resources, keeping the device and surface.
    ///
    /// Used when the OS asks the app to trim memory; the next frame
    /// recreates everything.
    pub fn clear(&mut self) {
        self.cube.clear();
    }

    fn ctx<'a>(gpu: &'a Gpu<'w>) -> RenderCtx<'a> {
        RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), gpu.size())
    }
}

impl RendererLibrary for CubeLibrary<'_> {
    fn initialize(&mut self) -> Result<()> {
        self.cube.initialize(&Self::ctx(&self.gpu))
    }

    fn is_initialized(&self) -> bool {
        self.cube.is_initialized()
    }

    fn render_frame(&mut self, time: FrameTime) -> Result<FrameOutcome> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return Ok(match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => FrameOutcome::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        FrameOutcome::Skipped(SkipReason::SurfaceUnavailable)
                    }
                });
            }
        };

        {
            let ctx = Self::ctx(&self.gpu);
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.cube.draw(&ctx, &mut target, time)?;
        }

        self.gpu.submit(frame);
        Ok(FrameOutcome::Rendered)
    }

    fn resize_viewport(&mut self, size: PixelSize) -> Result<()> {
        self.gpu.resize(size);
        self.cube.resize(&Self::ctx(&self.gpu), size);
        Ok(())
    }
}
