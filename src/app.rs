use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::config::PanelConfig;
use crate::utils::{MouseInfo, Position};
use crate::PanelEngine;

type SetupFn = Box<dyn FnOnce(&mut PanelEngine<'static>) -> crate::Result<()>>;

pub struct PanelApp {
    config: PanelConfig,
    engine: Option<PanelEngine<'static>>,
    window: Option<Arc<Window>>,
    setup: Option<SetupFn>,
    mouse: MouseInfo,
    // physical cursor position, y down
    cursor: Option<(f64, f64)>,
}

impl PanelApp {
    pub fn new<F>(config: PanelConfig, setup: F) -> Self
    where
        F: FnOnce(&mut PanelEngine<'static>) -> crate::Result<()> + 'static,
    {
        Self {
            config,
            engine: None,
            window: None,
            setup: Some(Box::new(setup)),
            mouse: MouseInfo::default(),
            cursor: None,
        }
    }

    pub fn engine(&mut self) -> Option<&mut PanelEngine<'static>> {
        self.engine.as_mut()
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref().map(|w| w.as_ref())
    }

    /// Converts the physical, y-down cursor into logical y-up panel space.
    fn refresh_mouse_position(&mut self) {
        if let (Some((x, y)), Some(engine)) = (self.cursor, &self.engine) {
            let scale = engine.dpi_scale_factor() as f64;
            let height = engine.viewport_size().height as f64;
            self.mouse.mouse_pos = Position {
                x: (x / scale) as f32,
                y: (height - y / scale) as f32,
            };
        }
    }

    fn create_engine(&mut self, event_loop: &ActiveEventLoop) -> crate::Result<()> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| crate::PanelError::Platform(e.to_string()))?;
        let window = Arc::new(window);
        let size = window.inner_size();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| crate::PanelError::Platform(e.to_string()))?;
        let scale = window.scale_factor() as f32;
        let mut engine =
            PanelEngine::new(surface, instance, size, scale, self.config.layer.clone())?;
        if let Some(setup) = self.setup.take() {
            setup(&mut engine)?;
        }
        window.request_redraw();
        self.engine = Some(engine);
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler<()> for PanelApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        if let Err(e) = self.create_engine(event_loop) {
            log::error!("failed to start panel engine: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x, position.y));
                self.refresh_mouse_position();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse.is_lmb_clicked = state == ElementState::Pressed;
            }
            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.render(&self.mouse) {
                        Ok(()) => {}
                        Err(crate::PanelError::Surface(
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                        )) => {
                            let size = engine.size;
                            let scale = engine.dpi_scale_factor();
                            engine.resize(&size, scale);
                        }
                        Err(e) => log::warn!("frame skipped: {}", e),
                    }

                    // Request next frame
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(engine), Some(window)) = (&mut self.engine, &self.window) {
                    engine.resize(&new_size, window.scale_factor() as f32);
                }
                self.refresh_mouse_position();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => (),
        }
    }
}

pub fn run_app<F>(config: PanelConfig, setup: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut PanelEngine<'static>) -> crate::Result<()> + 'static,
{
    let event_loop = EventLoop::new()?;
    let mut app = PanelApp::new(config, setup);

    event_loop.run_app(&mut app)?;
    Ok(())
}
