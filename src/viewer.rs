//! Standalone globe window backed by winit.
//!
//! The window plays the role of the DOM container: it owns the surface,
//! forwards pointer and wheel input, and drives a redraw-based frame loop.
//! Assets are fetched on a background thread and handed to the engine at
//! the start of the next frame.
//!
//! ```no_run
//! # use hexglobe::Viewer;
//! Viewer::builder()
//!     .with_data("data/pop.csv")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::{mpsc, Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    data::fetch::{spawn_asset_loader, AssetResult},
    engine::{asset_requests, GlobeEngine},
    error::GlobeError,
    input::{InputEvent, MouseButton},
    options::Options,
    util::frame_timing::FrameTiming,
};

/// Wheel pixels per line step for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    data: Option<String>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            data: None,
            options: None,
            title: "hexglobe".into(),
        }
    }

    /// Point data location (URL or path), overriding `options.data.url`.
    #[must_use]
    pub fn with_data(mut self, location: impl Into<String>) -> Self {
        self.data = Some(location.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(data) = self.data {
            options.data.url = data;
        }
        Viewer {
            options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the globe.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), GlobeError> {
        let event_loop =
            EventLoop::new().map_err(|e| GlobeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            assets: None,
            timing: FrameTiming::new(),
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GlobeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<GlobeEngine>,
    assets: Option<mpsc::Receiver<AssetResult>>,
    timing: FrameTiming,
    options: Option<Options>,
    title: String,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

impl ViewerApp {
    /// Hand every finished fetch to the engine. Closes the channel once
    /// the loader is done.
    fn drain_assets(&mut self) {
        let (Some(rx), Some(engine)) = (&self.assets, &mut self.engine) else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok((kind, result)) => engine.supply_asset(kind, result),
                Err(mpsc::TryRecvError::Empty) => return,
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("asset loader finished");
                    self.assets = None;
                    return;
                }
            }
        }
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn teardown(&mut self) {
        self.assets = None;
        if let Some(engine) = &mut self.engine {
            let _ = engine.dispose();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let scale = window.scale_factor();
        let requests = asset_requests(&options);

        let engine = match pollster::block_on(GlobeEngine::new(
            window.clone(),
            size,
            scale,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize globe: {e}");
                event_loop.exit();
                return;
            }
        };

        match spawn_asset_loader(requests) {
            Ok(rx) => self.assets = Some(rx),
            Err(e) => log::error!("Failed to start asset loader: {e}"),
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.timing = FrameTiming::new();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.teardown();
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (w, h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(w, h);
                }
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.set_scale_factor(scale_factor);
                }
            }

            WindowEvent::RedrawRequested => {
                self.drain_assets();
                let dt = self.timing.tick();
                if let Some(engine) = &mut self.engine {
                    let _ = engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vp_w, vp_h) =
                                    viewport_size(w.inner_size());
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                self.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(&InputEvent::PointerButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor());
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(&InputEvent::PointerMoved {
                        x: logical.x,
                        y: logical.y,
                    });
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(&InputEvent::PointerLeft);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(&InputEvent::Wheel {
                        delta: wheel_lines(delta),
                    });
                }
            }

            _ => (),
        }
    }
}
