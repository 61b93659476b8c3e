//! Windowed driver loop.
//!
//! Creates the window and GL context, boots the runtime, and pumps frame and
//! resize dispatches until the window closes.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use nabu_runtime::Runtime;

use crate::host::{self, DesktopHost};

/// Driver configuration assembled from the CLI.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub bundle: PathBuf,
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

struct GlWindow {
    window: Rc<Window>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    runtime: Runtime,
}

/// Winit application driving one runtime in one window.
pub struct DriverApp {
    config: DriverConfig,
    started: Instant,
    state: Option<GlWindow>,
}

impl DriverApp {
    pub fn run(config: DriverConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = DriverApp {
            config,
            started: Instant::now(),
            state: None,
        };

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        Ok(())
    }

    fn create_gl_window(&self, event_loop: &ActiveEventLoop) -> Result<GlWindow> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        // Old-GPU tolerance: take the first config the platform offers rather
        // than pinning a GL version or profile.
        let (window, gl_config) = match DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, ConfigTemplateBuilder::new(), |mut configs| {
                configs.next().expect("platform offered no GL configs")
            }) {
            Ok(pair) => pair,
            Err(err) => {
                log::error!("cannot create a GL-capable window: {err}");
                log::info!("check your GPU driver");
                log::info!("on Linux try installing xorg-dev or libgl-dev");
                return Err(anyhow!("window creation failed"));
            }
        };
        let window = Rc::new(window.context("display builder returned no window")?);

        let raw = window
            .window_handle()
            .context("failed to get window handle")?
            .as_raw();

        let context_attribs = ContextAttributesBuilder::new().build(Some(raw));
        let context = unsafe { gl_config.display().create_context(&gl_config, &context_attribs) }
            .map_err(|err| anyhow!("failed to create GL context: {err}"))?;

        let size = window.inner_size();
        let surface_attribs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe {
            gl_config
                .display()
                .create_window_surface(&gl_config, &surface_attribs)
        }
        .map_err(|err| anyhow!("failed to create window surface: {err}"))?;

        let context = context
            .make_current(&surface)
            .map_err(|err| anyhow!("failed to make GL context current: {err}"))?;

        // VSync caps the frame rate at the display refresh rate.
        if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::warn!("vsync not available: {err}");
        }

        host::install_gl_display(gl_config.display());

        let runtime = Runtime::new(Rc::new(DesktopHost::new(window.clone())))
            .context("failed to boot the scripting runtime")?;

        // A broken bundle leaves an empty window rather than killing the
        // container; listeners it managed to register still run.
        if let Err(err) = runtime.run_bundle(&self.config.bundle) {
            log::error!("bundle failed to load: {err:#}");
        }

        if size.width >= 1 && size.height >= 1 {
            runtime.dispatch_resize(size.width, size.height);
        }

        log::debug!("window and GL context ready ({}x{})", size.width, size.height);

        Ok(GlWindow {
            window,
            surface,
            context,
            runtime,
        })
    }
}

impl ApplicationHandler for DriverApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_gl_window(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => {
                log::error!("startup failed: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                // Minimized windows report zero dimensions; listeners never
                // see a degenerate viewport.
                if size.width < 1 || size.height < 1 {
                    return;
                }

                state.surface.resize(
                    &state.context,
                    NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
                    NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
                );
                state.runtime.dispatch_resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let size = state.window.inner_size();
                if size.width >= 1 && size.height >= 1 {
                    state.runtime.dispatch_frame(
                        self.started.elapsed().as_secs_f64(),
                        size.width,
                        size.height,
                    );
                }

                if let Err(err) = state.surface.swap_buffers(&state.context) {
                    log::warn!("swap_buffers failed: {err}");
                }

                // Continuous loop: queue the next frame immediately.
                state.window.request_redraw();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.runtime.close();
        }
        log::debug!("driver exiting");
    }
}
