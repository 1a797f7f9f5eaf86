use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc::channel;

use anyhow::Context;
use image::{ImageReader, Rgba, RgbaImage};
use plutonium_panels::draw::DrawCommand;
use plutonium_panels::raster::SoftwareTarget;
use plutonium_panels::renderer::PanelRenderer;
use plutonium_panels::{
    LayerConfig, MouseInfo, Panel, PanelLayer, Position, Rect, Size, Skin, Style, StyleConfig,
};

const WIDTH: u32 = 160;
const HEIGHT: u32 = 120;
const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn build_device() -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        force_fallback_adapter: false,
        compatible_surface: None,
    }))
    .context("no adapter")?;
    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: None,
            required_features: adapter.features()
                & wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER,
            required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
            memory_hints: Default::default(),
        },
        None,
    ))
    .context("device")?;
    Ok((device, queue))
}

/// Four-slice atlas (three skins plus the spare slot): red, green, blue, and
/// a half-transparent white.
fn fixture_atlas() -> RgbaImage {
    let slices = [
        [255, 64, 64, 255],
        [64, 255, 64, 255],
        [64, 64, 255, 255],
        [255, 255, 255, 128],
    ];
    RgbaImage::from_fn(16, 4, |x, _| Rgba(slices[(x / 4) as usize]))
}

/// A translucent window, a plain button and a hovered + pressed skinned button.
fn fixture_layer(config: &LayerConfig, skin: Skin) -> anyhow::Result<PanelLayer> {
    let window_style = Rc::new(Style::from_config(&StyleConfig {
        fill_color: [0.9, 0.9, 0.95, 0.5],
        border_color: [0.2, 0.2, 0.25, 1.0],
        border_width: 4.0,
        ..StyleConfig::default()
    })?);
    let button_style = Rc::new(Style::from_config(&StyleConfig {
        fill_color: [1.0, 1.0, 1.0, 1.0],
        border_color: [0.1, 0.1, 0.1, 0.75],
        border_width: 3.0,
        button_hover_width: 2.0,
        button_click_width: 3.0,
    })?);

    let mut layer = PanelLayer::new(config.clone());
    layer.add(Panel::button(
        Rect::from_xywh(20.0, 20.0, 40.0, 20.0),
        Rc::clone(&button_style),
    ));
    layer.add(
        Panel::button(Rect::from_xywh(90.0, 20.0, 40.0, 20.0), button_style)
            .with_skin(Rc::new(skin), 2)?,
    );
    layer.add(Panel::rect(
        Rect::from_xywh(10.0, 10.0, 140.0, 100.0),
        window_style,
    ));

    // pointer held over the skinned button
    layer.update(&MouseInfo {
        is_lmb_clicked: true,
        mouse_pos: Position { x: 110.0, y: 30.0 },
    });
    Ok(layer)
}

fn render_gpu(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    renderer: &mut PanelRenderer,
    commands: &[DrawCommand],
) -> anyhow::Result<RgbaImage> {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("snapshot-target"),
        size: wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    renderer.draw(device, queue, &view, (WIDTH, HEIGHT), commands);
    readback(device, queue, &texture)
}

fn readback(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> anyhow::Result<RgbaImage> {
    let row_bytes = WIDTH * 4;
    let padded_bpr = row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("snapshot-readback"),
        size: u64::from(padded_bpr) * u64::from(HEIGHT),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("snapshot-readback-encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &buffer,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded_bpr),
                rows_per_image: Some(HEIGHT),
            },
        },
        wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    let (sender, receiver) = channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = sender.send(res);
    });
    let _ = device.poll(wgpu::Maintain::Wait);
    receiver.recv()??;

    let mapped = slice.get_mapped_range();
    let mut data = Vec::with_capacity((row_bytes * HEIGHT) as usize);
    for row in mapped.chunks(padded_bpr as usize) {
        data.extend_from_slice(&row[..row_bytes as usize]);
    }
    drop(mapped);
    buffer.unmap();
    RgbaImage::from_raw(WIDTH, HEIGHT, data).context("readback size mismatch")
}

fn compare_with_tolerance(a: &RgbaImage, b: &RgbaImage, tolerance: u8) -> usize {
    if a.dimensions() != b.dimensions() {
        return usize::MAX;
    }
    a.pixels()
        .zip(b.pixels())
        .filter(|(pa, pb)| (0..4).any(|i| pa.0[i].abs_diff(pb.0[i]) > tolerance))
        .count()
}

fn snapshot_panels() -> anyhow::Result<()> {
    let (device, queue) = build_device()?;
    let config = LayerConfig::default();
    let mut renderer = PanelRenderer::init(&device, &queue, TARGET_FORMAT, config.clone())?;

    let atlas = fixture_atlas();
    let skin = renderer.register_skin(&device, &queue, &atlas, 3)?;
    let layer = fixture_layer(&config, skin.clone())?;
    let commands = layer.draw_commands(Size {
        width: WIDTH as f32,
        height: HEIGHT as f32,
    });

    let gpu = render_gpu(&device, &queue, &mut renderer, &commands)?;

    let mut reference = SoftwareTarget::new(WIDTH, HEIGHT, config.clear_color, config.depth_compare);
    reference.add_skin(skin.key(), atlas);
    reference.draw_all(&commands);
    let reference = reference.into_image();

    fs::create_dir_all("snapshots/actual")?;
    fs::create_dir_all("snapshots/golden")?;
    let out_actual = Path::new("snapshots/actual/panels.png");
    let out_reference = Path::new("snapshots/actual/panels_reference.png");
    let out_golden = Path::new("snapshots/golden/panels.png");
    gpu.save(out_actual)?;
    reference.save(out_reference)?;

    let mismatched = compare_with_tolerance(&gpu, &reference, 3);
    if mismatched == 0 {
        println!("gpu output matches software reference");
    } else {
        println!("gpu output differs from software reference in {} pixels", mismatched);
    }

    if !out_golden.exists() {
        fs::copy(out_actual, out_golden)?;
        println!("golden created at {}", out_golden.display());
        return Ok(());
    }
    let golden = ImageReader::open(out_golden)?.decode()?.to_rgba8();
    if compare_with_tolerance(&gpu, &golden, 3) == 0 {
        println!("snapshot OK for panels.png");
    } else {
        println!("snapshot mismatch for panels.png");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    snapshot_panels()
}
