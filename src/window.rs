//! Windowed host: winit event loop driving a [`Scene`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::canvas::{Canvas, FrameBuffer};
use crate::error::DisplayError;
use crate::gpu::Presenter;
use crate::interaction::PointerState;
use crate::scene::Scene;
use crate::time::FrameClock;

/// Open a window and animate `scene` until it is closed.
pub fn run(scene: Box<dyn Scene>, title: &str) -> Result<(), DisplayError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene, title);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    title: String,
    scene: Box<dyn Scene>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    canvas: FrameBuffer,
    clock: FrameClock,
    pointer: PointerState,
    /// Setup failure, reported once the event loop exits.
    error: Option<DisplayError>,
}

impl App {
    fn new(scene: Box<dyn Scene>, title: &str) -> Self {
        Self {
            title: title.to_string(),
            scene,
            window: None,
            presenter: None,
            canvas: FrameBuffer::default(),
            clock: FrameClock::new(),
            pointer: PointerState::away(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DisplayError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        let (width, height) = presenter.size();
        log::info!("window ready: {}x{} running {}", width, height, self.scene.name());

        self.canvas.resize(width, height);
        self.canvas.clear(self.scene.background());
        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = &mut self.presenter else {
            return;
        };

        let t_ms = self.clock.tick();
        let report = self.scene.tick(t_ms, &mut self.canvas, self.pointer);
        if self.clock.frame() % 120 == 0 {
            log::trace!("{:.1} fps, {} dots", self.clock.fps(), report.drawn);
        }

        match presenter.present(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size.width, physical_size.height);
                }
                // A minimized window becomes a zero-sized canvas.
                self.canvas.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = PointerState::hover(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = PointerState::away();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
