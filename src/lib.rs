pub mod app;
pub mod config;
pub mod dither;
pub mod draw;
pub mod error;
pub mod input;
pub mod interaction;
pub mod layer;
pub mod panel;
pub mod raster;
pub mod renderer;
pub mod shader;
pub mod skin;
pub mod style;
pub mod transform;
pub mod utils;

pub use config::{DepthCompare, LayerConfig, PanelConfig, WindowConfig};
pub use error::{PanelError, Result};
pub use layer::PanelLayer;
pub use panel::{Panel, PanelType};
pub use renderer::PanelRenderer;
pub use skin::Skin;
pub use style::{MouseBehavior, Style, StyleConfig};
pub use utils::{Color, MouseInfo, Position, Rect, Size};

use image::RgbaImage;
use pollster::block_on;
use winit::dpi::PhysicalSize;

/// Window-bound host for a panel layer: owns the surface, the device and the
/// renderer, and drives one update + draw per `render` call.
pub struct PanelEngine<'a> {
    pub size: PhysicalSize<u32>,
    dpi_scale_factor: f32,
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: PanelRenderer,
    layer: PanelLayer,
    viewport_size: Size,
}

impl<'a> PanelEngine<'a> {
    pub fn new(
        surface: wgpu::Surface<'a>,
        instance: wgpu::Instance,
        size: PhysicalSize<u32>,
        dpi_scale_factor: f32,
        layer_config: LayerConfig,
    ) -> Result<Self> {
        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or_else(|| PanelError::Gpu("no compatible adapter".to_string()))?;

        let (device, queue) = block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                // border addressing is optional; the sampler falls back without it
                required_features: adapter.features()
                    & wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER,
                required_limits:
                    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| PanelError::Gpu(e.to_string()))?;

        let format = surface
            .get_capabilities(&adapter)
            .formats
            .first()
            .copied()
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let config = wgpu::SurfaceConfiguration {
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
        };
        surface.configure(&device, &config);

        let renderer = PanelRenderer::init(&device, &queue, format, layer_config.clone())?;
        let layer = PanelLayer::new(layer_config);
        let viewport_size = Size {
            width: size.width as f32 / dpi_scale_factor,
            height: size.height as f32 / dpi_scale_factor,
        };

        Ok(Self {
            size,
            dpi_scale_factor,
            surface,
            device,
            queue,
            config,
            renderer,
            layer,
            viewport_size,
        })
    }

    pub fn layer(&self) -> &PanelLayer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut PanelLayer {
        &mut self.layer
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn dpi_scale_factor(&self) -> f32 {
        self.dpi_scale_factor
    }

    pub fn register_skin(&mut self, image: &RgbaImage, skin_count: u32) -> Result<Skin> {
        self.renderer
            .register_skin(&self.device, &self.queue, image, skin_count)
    }

    pub fn resize(&mut self, new_size: &PhysicalSize<u32>, scale_factor: f32) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = *new_size;
        self.dpi_scale_factor = scale_factor;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.viewport_size = Size {
            width: self.size.width as f32 / scale_factor,
            height: self.size.height as f32 / scale_factor,
        };
    }

    /// Runs the interaction pass with `mouse` (logical, y-up) and draws the
    /// layer to the next swapchain image.
    pub fn render(&mut self, mouse: &MouseInfo) -> Result<()> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            (self.config.width, self.config.height),
            self.viewport_size,
            &mut self.layer,
            mouse,
        );
        frame.present();
        Ok(())
    }
}
