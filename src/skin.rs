use std::path::Path;

use image::RgbaImage;
use uuid::Uuid;

use crate::error::{PanelError, Result};

/// Handle to a horizontally sliced atlas texture.
///
/// The atlas holds `skin_count` slices plus one implicit extra slot, so each
/// slice spans `1 / (skin_count + 1)` of the texture width. The GPU texture
/// itself lives in the renderer's skin map under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    key: Uuid,
    skin_count: u32,
}

impl Skin {
    pub fn new(key: Uuid, skin_count: u32) -> Self {
        Self { key, skin_count }
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn skin_count(&self) -> u32 {
        self.skin_count
    }

    pub fn slice_width(&self) -> f32 {
        1.0 / (self.skin_count as f32 + 1.0)
    }

    pub fn check_index(&self, render_skin: u32) -> Result<()> {
        if render_skin > self.skin_count {
            return Err(PanelError::SkinIndexOutOfRange {
                index: render_skin,
                skin_count: self.skin_count,
            });
        }
        Ok(())
    }
}

/// Decodes a raster skin atlas (PNG, JPEG, ...) into RGBA8.
pub fn load_skin_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let image = image::open(path.as_ref())?;
    log::debug!(
        "loaded skin image {} ({}x{})",
        path.as_ref().display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgba8())
}

/// Renders SVG atlas markup into an RGBA8 image at `scale_factor`.
#[cfg(feature = "svg")]
pub fn rasterize_svg(svg_data: &str, scale_factor: f32) -> Result<RgbaImage> {
    use resvg::usvg::{Options, Tree};
    use tiny_skia::{Pixmap, Transform};

    let tree = Tree::from_str(svg_data, &Options::default())
        .map_err(|e| PanelError::Svg(format!("failed to parse SVG: {}", e)))?;
    let size = tree.size();
    let width = (size.width() * scale_factor).ceil() as u32;
    let height = (size.height() * scale_factor).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| PanelError::Svg(format!("cannot allocate {}x{} pixmap", width, height)))?;
    pixmap.fill(tiny_skia::Color::TRANSPARENT);
    resvg::render(
        &tree,
        Transform::from_scale(scale_factor, scale_factor),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha; the shader expects straight alpha
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| PanelError::Svg("pixmap size mismatch".to_string()))
}

#[cfg(feature = "svg")]
pub fn load_skin_svg(path: impl AsRef<Path>, scale_factor: f32) -> Result<RgbaImage> {
    let svg_data = std::fs::read_to_string(path)?;
    rasterize_svg(&svg_data, scale_factor)
}
