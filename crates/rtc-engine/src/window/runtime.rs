use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;
use crate::core::{CubeLibrary, FrameOutcome, SurfaceHost};
use crate::device::{Gpu, GpuInit};
use crate::render::CubeConfig;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "rotating-textured-cube".to_string(),
            initial_size: LogicalSize::new(1000.0, 1000.0),
        }
    }
}

/// Entry point for the desktop host.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed or Escape is pressed.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, cube: CubeConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, cube);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    host: SurfaceHost<CubeLibrary<'this>>,
}

/// Reasons frames are held back on the desktop.
#[derive(Debug, Default, Copy, Clone)]
struct Visibility {
    occluded: bool,
    minimized: bool,
    suspended: bool,
}

impl Visibility {
    fn hidden(self) -> bool {
        self.occluded || self.minimized || self.suspended
    }
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    cube: CubeConfig,

    entry: Option<WindowEntry>,
    visibility: Visibility,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, cube: CubeConfig) -> Self {
        Self {
            config,
            gpu_init,
            cube,
            entry: None,
            visibility: Visibility::default(),
            failure: None,
        }
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let cube = self.cube.clone();

        let mut entry = WindowEntryTryBuilder {
            window,
            host_builder: |w| build_host(w, gpu_init, cube),
        }
        .try_build()?;

        // The surface is sized on creation, before any frame.
        let size = entry.with_window(|w| w.inner_size());
        entry.with_host_mut(|host| forward_resize(host, size.into()));

        // A texture that cannot load ends the app instead of spinning an empty window.
        entry
            .with_host_mut(|host| host.initialize())
            .context("renderer initialization failed")?;
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.close(event_loop);
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut entry) = self.entry.take() {
            entry.with_host_mut(|host| host.destroy());
        }
        event_loop.exit();
    }

    fn sync_pause(&mut self) {
        let hidden = self.visibility.hidden();
        if let Some(entry) = self.entry.as_mut() {
            entry.with_host_mut(|host| {
                if hidden {
                    host.pause();
                } else {
                    host.resume();
                }
            });
        }
    }
}

fn build_host(
    window: &Window,
    gpu_init: GpuInit,
    cube: CubeConfig,
) -> Result<SurfaceHost<CubeLibrary<'_>>> {
    let size = PixelSize::from(window.inner_size());
    let gpu = pollster::block_on(Gpu::new(window, size, gpu_init))
        .context("GPU initialization failed for window")?;
    Ok(SurfaceHost::new(CubeLibrary::new(gpu, cube)))
}

fn forward_resize(host: &mut SurfaceHost<CubeLibrary<'_>>, size: PixelSize) {
    let width = i32::try_from(size.width).unwrap_or(i32::MAX);
    let height = i32::try_from(size.height).unwrap_or(i32::MAX);
    if let Err(e) = host.surface_changed(width, height) {
        log::warn!("{e}");
    }
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.visibility.suspended = false;

        if self.entry.is_some() {
            self.sync_pause();
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.visibility.suspended = true;
        self.sync_pause();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous animation: ask for the next frame right away.
        if let Some(entry) = self.entry.as_ref() {
            if !self.visibility.hidden() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.entry.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::KeyboardInput { event, .. } if is_escape(&event) => {
                log::info!("escape pressed; closing");
                self.close(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                let size = PixelSize::from(new_size);
                self.visibility.minimized = size.is_empty();
                if let Some(entry) = self.entry.as_mut() {
                    if !size.is_empty() {
                        entry.with_host_mut(|host| forward_resize(host, size));
                    }
                    entry.with_window(|w| w.request_redraw());
                }
                self.sync_pause();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let size = entry.with_window(|w| w.inner_size());
                    if size.width > 0 && size.height > 0 {
                        entry.with_host_mut(|host| forward_resize(host, size.into()));
                    }
                }
            }

            WindowEvent::Occluded(occluded) => {
                self.visibility.occluded = occluded;
                self.sync_pause();
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = self.entry.as_mut() else { return };

                let outcome = entry.with_mut(|fields| {
                    fields.window.pre_present_notify();
                    fields.host.draw_frame()
                });

                if outcome == FrameOutcome::Fatal {
                    self.fail(event_loop, anyhow::anyhow!("fatal GPU error; closing window"));
                }
            }

            _ => {}
        }
    }
}
