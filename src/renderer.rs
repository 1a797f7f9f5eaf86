use std::borrow::Cow;
use std::collections::HashMap;

use image::RgbaImage;
use uuid::Uuid;
use wgpu::util::DeviceExt;

use crate::config::LayerConfig;
use crate::draw::DrawCommand;
use crate::error::{PanelError, Result};
use crate::input::PointerInput;
use crate::layer::PanelLayer;
use crate::shader::{
    fragment_source, vertex_source, FRAGMENT_ENTRY, MODEL_BINDING, PROJECTION_BINDING,
    TEXTURE_MATRIX_BINDING, TINT_BINDING, VERTEX_ENTRY,
};
use crate::skin::Skin;
use crate::utils::{ColorUniform, Size, TransformUniform, Vertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const SKIN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// unit quad; the index list splits it into two triangles
const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [0.0, 0.0],
    },
    Vertex {
        position: [0.0, 1.0],
    },
    Vertex {
        position: [1.0, 1.0],
    },
    Vertex {
        position: [1.0, 0.0],
    },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

struct SkinTexture {
    skin: Skin,
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// GPU side of the panel layer: the shared quad mesh, the default white
/// texture, registered skins and the dithering pipeline.
pub struct PanelRenderer {
    config: LayerConfig,
    render_pipeline: wgpu::RenderPipeline,
    uniform_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    _default_texture: wgpu::Texture,
    default_bind_group: wgpu::BindGroup,
    skin_map: HashMap<Uuid, SkinTexture>,
    depth: Option<DepthTarget>,
}

impl PanelRenderer {
    /// One-time setup of every GPU object the panel layer needs. Call once,
    /// before the first frame.
    pub fn init(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        config: LayerConfig,
    ) -> Result<Self> {
        config.validate()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Panel Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Panel Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("panel_uniform_bind_group_layout"),
                entries: &[
                    uniform_layout_entry(TINT_BINDING, std::mem::size_of::<ColorUniform>()),
                    uniform_layout_entry(
                        PROJECTION_BINDING,
                        std::mem::size_of::<TransformUniform>(),
                    ),
                    uniform_layout_entry(MODEL_BINDING, std::mem::size_of::<TransformUniform>()),
                    uniform_layout_entry(
                        TEXTURE_MATRIX_BINDING,
                        std::mem::size_of::<TransformUniform>(),
                    ),
                ],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("panel_texture_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let sampler = create_sampler(device);

        let (default_texture, default_view) =
            upload_rgba(device, queue, "Panel Default Texture", 1, 1, &[255, 255, 255, 255]);
        let default_bind_group = create_texture_bind_group(
            device,
            &texture_bind_group_layout,
            &default_view,
            &sampler,
        );

        let render_pipeline = create_pipeline(
            device,
            &[&uniform_bind_group_layout, &texture_bind_group_layout],
            color_format,
            &config,
        );

        log::info!(
            "panel renderer ready (format {:?}, depth {:?} at {})",
            color_format,
            config.depth_compare,
            config.gui_depth
        );

        Ok(Self {
            config,
            render_pipeline,
            uniform_bind_group_layout,
            texture_bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            _default_texture: default_texture,
            default_bind_group,
            skin_map: HashMap::new(),
            depth: None,
        })
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Uploads an atlas with `skin_count` slices and returns its handle.
    pub fn register_skin(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        skin_count: u32,
    ) -> Result<Skin> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PanelError::EmptySkinImage);
        }
        let skin = Skin::new(Uuid::new_v4(), skin_count);
        let (texture, view) = upload_rgba(
            device,
            queue,
            "Panel Skin Texture",
            image.width(),
            image.height(),
            image.as_raw(),
        );
        let bind_group = create_texture_bind_group(
            device,
            &self.texture_bind_group_layout,
            &view,
            &self.sampler,
        );
        log::debug!(
            "registered skin {} ({}x{}, {} slices)",
            skin.key(),
            image.width(),
            image.height(),
            skin_count
        );
        self.skin_map.insert(
            skin.key(),
            SkinTexture {
                skin: skin.clone(),
                _texture: texture,
                bind_group,
            },
        );
        Ok(skin)
    }

    pub fn remove_skin(&mut self, key: &Uuid) -> Option<Skin> {
        self.skin_map.remove(key).map(|s| s.skin)
    }

    /// Per-frame entry point: interaction pass, then one fill and one border
    /// draw per panel into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        target_size: (u32, u32),
        viewport: Size,
        layer: &mut PanelLayer,
        input: &impl PointerInput,
    ) {
        layer.update(input);
        let commands = layer.draw_commands(viewport);
        self.draw(device, queue, view, target_size, &commands);
    }

    /// Issues `commands` in order into `view`, clearing color and depth first.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        target_size: (u32, u32),
        commands: &[DrawCommand],
    ) {
        self.ensure_depth(device, target_size);
        let Some(depth) = &self.depth else {
            return;
        };

        let uniform_bind_groups: Vec<wgpu::BindGroup> = commands
            .iter()
            .map(|command| self.create_uniform_bind_group(device, command))
            .collect();

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Panel Render Encoder"),
        });

        {
            let [r, g, b, a] = self.config.clear_color;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Panel Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.render_pipeline);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            for (command, uniforms) in commands.iter().zip(&uniform_bind_groups) {
                rpass.set_bind_group(0, uniforms, &[]);
                rpass.set_bind_group(1, self.texture_bind_group(command.skin), &[]);
                rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
            }
        }

        queue.submit(Some(encoder.finish()));
    }

    fn texture_bind_group(&self, skin: Option<Uuid>) -> &wgpu::BindGroup {
        match skin {
            Some(key) => match self.skin_map.get(&key) {
                Some(texture) => &texture.bind_group,
                None => {
                    log::warn!("skin {} is not registered, drawing untextured", key);
                    &self.default_bind_group
                }
            },
            None => &self.default_bind_group,
        }
    }

    fn create_uniform_bind_group(
        &self,
        device: &wgpu::Device,
        command: &DrawCommand,
    ) -> wgpu::BindGroup {
        let tint = uniform_buffer(
            device,
            "Panel Tint Uniform",
            bytemuck::bytes_of(&ColorUniform {
                color: command.color,
            }),
        );
        let matrices = [
            (PROJECTION_BINDING, command.projection),
            (MODEL_BINDING, command.model),
            (TEXTURE_MATRIX_BINDING, command.texture),
        ]
        .map(|(binding, transform)| {
            (
                binding,
                uniform_buffer(
                    device,
                    "Panel Matrix Uniform",
                    bytemuck::bytes_of(&TransformUniform { transform }),
                ),
            )
        });

        let mut entries = vec![buffer_entry(TINT_BINDING, &tint)];
        entries.extend(
            matrices
                .iter()
                .map(|(binding, buffer)| buffer_entry(*binding, buffer)),
        );

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.uniform_bind_group_layout,
            entries: &entries,
            label: Some("panel_uniform_bind_group"),
        })
    }

    fn ensure_depth(&mut self, device: &wgpu::Device, (width, height): (u32, u32)) {
        let (width, height) = (width.max(1), height.max(1));
        if let Some(depth) = &self.depth {
            if depth.width == width && depth.height == height {
                return;
            }
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Panel Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("panel depth target resized to {}x{}", width, height);
        self.depth = Some(DepthTarget {
            _texture: texture,
            view,
            width,
            height,
        });
    }
}

fn uniform_layout_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as _),
        },
        count: None,
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM,
    })
}

fn buffer_entry(binding: u32, buffer: &wgpu::Buffer) -> wgpu::BindGroupEntry<'_> {
    wgpu::BindGroupEntry {
        binding,
        resource: buffer.as_entire_binding(),
    }
}

/// Nearest filtering; outside the atlas samples read transparent black where
/// the device supports border addressing.
fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    let (address_mode, border_color) = if device
        .features()
        .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER)
    {
        (
            wgpu::AddressMode::ClampToBorder,
            Some(wgpu::SamplerBorderColor::TransparentBlack),
        )
    } else {
        log::warn!("clamp-to-border addressing unavailable, clamping to edge");
        (wgpu::AddressMode::ClampToEdge, None)
    };
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Panel Sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        border_color,
        ..Default::default()
    })
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SKIN_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("panel_texture_bind_group"),
    })
}

/// Depth test and depth writes on, blending off. Translucency is handled by
/// the dithering fragment stage.
fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    color_format: wgpu::TextureFormat,
    config: &LayerConfig,
) -> wgpu::RenderPipeline {
    let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("panel_vertex_shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(vertex_source())),
    });
    let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("panel_fragment_shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(fragment_source())),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Panel Pipeline Layout"),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Panel Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex_shader,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_shader,
            entry_point: Some(FRAGMENT_ENTRY),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: config.depth_compare.to_wgpu(),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
