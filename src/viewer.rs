//! Standalone window backed by winit.
//!
//! ```no_run
//! # use retrowave::Viewer;
//! Viewer::builder()
//!     .with_title("Retrowave")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::{ActionResponse, RetrowaveEngine},
    error::RetrowaveError,
    input::InputEvent,
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Builder with title "Retrowave" and default options.
    fn new() -> Self {
        Self {
            options: None,
            title: "Retrowave".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the synthwave scene.
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
    /// Returns [`RetrowaveError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), RetrowaveError> {
        let event_loop = EventLoop::new()
            .map_err(|e| RetrowaveError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| RetrowaveError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<RetrowaveEngine>,
    options: Option<Options>,
    title: String,
}

/// Surface size for a window size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Window title showing the toggle states.
fn window_title(prefix: &str, engine: &RetrowaveEngine) -> String {
    format!("{prefix} | {}", engine.controls().summary())
}

impl ViewerApp {
    fn refresh_title(&self) {
        if let (Some(window), Some(engine)) = (&self.window, &self.engine) {
            window.set_title(&window_title(&self.title, engine));
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: &InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if engine.handle_input(event) == ActionResponse::Quit {
            event_loop.exit();
            return;
        }
        self.refresh_title();
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
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let scale = window.scale_factor();
        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(RetrowaveEngine::new(
            window.clone(),
            size,
            scale,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.set_title(&window_title(&self.title, &engine));
        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(engine), Some(inner)) = (&mut self.engine, inner) {
                    let (vp_w, vp_h) = viewport_size(inner);
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    if engine.update() {
                        if let Err(e) = engine.render() {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => self.dispatch(event_loop, &InputEvent::PointerPressed),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.dispatch(
                    event_loop,
                    &InputEvent::KeyPressed {
                        code: format!("{code:?}"),
                    },
                );
            }

            _ => (),
        }
    }
}
