//! CPU reference for the panel pipeline.
//!
//! Runs the same math as the GPU path (matrix composition, nearest sampling
//! with a transparent border, tint, dithering, depth test and write) one pixel
//! center at a time. Layering fixtures and GPU snapshots are checked against it.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use uuid::Uuid;

use crate::config::DepthCompare;
use crate::dither::shade;
use crate::draw::DrawCommand;
use crate::transform::{multiply, transform_point};
use crate::utils::Color;

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const BORDER: Color = [0.0, 0.0, 0.0, 0.0];

pub struct SoftwareTarget {
    color: RgbaImage,
    depth: Vec<f32>,
    depth_compare: DepthCompare,
    skins: HashMap<Uuid, RgbaImage>,
}

impl SoftwareTarget {
    pub fn new(width: u32, height: u32, clear_color: Color, depth_compare: DepthCompare) -> Self {
        let clear = Rgba(to_rgba8(clear_color));
        Self {
            color: RgbaImage::from_pixel(width, height, clear),
            depth: vec![1.0; (width * height) as usize],
            depth_compare,
            skins: HashMap::new(),
        }
    }

    pub fn add_skin(&mut self, key: Uuid, image: RgbaImage) {
        self.skins.insert(key, image);
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.color.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.color
    }

    pub fn into_image(self) -> RgbaImage {
        self.color
    }

    pub fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }

    pub fn draw(&mut self, command: &DrawCommand) {
        let (width, height) = (self.width() as f32, self.height() as f32);
        let mvp = multiply(&command.projection, &command.model);

        // unit quad corners (0,0) and (1,1) in framebuffer pixels, y down
        let to_pixels = |p: [f32; 4]| {
            (
                (p[0] / p[3] + 1.0) * 0.5 * width,
                (1.0 - p[1] / p[3]) * 0.5 * height,
            )
        };
        let (x0, y0) = to_pixels(transform_point(&mvp, [0.0, 0.0, 0.0, 1.0]));
        let (x1, y1) = to_pixels(transform_point(&mvp, [1.0, 1.0, 0.0, 1.0]));
        if x0 == x1 || y0 == y1 {
            return;
        }

        let min_x = x0.min(x1).max(0.0).floor() as u32;
        let max_x = (x0.max(x1).ceil().min(width)) as u32;
        let min_y = y0.min(y1).max(0.0).floor() as u32;
        let max_y = (y0.max(y1).ceil().min(height)) as u32;

        for py in min_y..max_y {
            for px in min_x..max_x {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                let s = (cx - x0) / (x1 - x0);
                let t = (cy - y0) / (y1 - y0);
                if !(0.0..1.0).contains(&s) || !(0.0..1.0).contains(&t) {
                    continue;
                }

                let uv = transform_point(&command.texture, [s, t, 0.0, 1.0]);
                let texel = self.sample(command.skin, uv[0], uv[1]);
                let tinted = [
                    texel[0] * command.color[0],
                    texel[1] * command.color[1],
                    texel[2] * command.color[2],
                    texel[3] * command.color[3],
                ];
                // same top-left pixel origin as the fragment stage
                let Some(out) = shade(tinted, px as i32, py as i32) else {
                    continue;
                };

                let clip = transform_point(&mvp, [s, t, 0.0, 1.0]);
                let depth = clip[2] / clip[3];
                let index = (py * self.width() + px) as usize;
                if !self.depth_compare.passes(depth, self.depth[index]) {
                    continue;
                }
                self.depth[index] = depth;
                self.color.put_pixel(px, py, Rgba(to_rgba8(out)));
            }
        }
    }

    fn sample(&self, skin: Option<Uuid>, u: f32, v: f32) -> Color {
        let Some(key) = skin else {
            return WHITE;
        };
        let Some(image) = self.skins.get(&key) else {
            log::warn!("skin {} missing from software target, sampling white", key);
            return WHITE;
        };
        if image.width() == 0
            || image.height() == 0
            || !(0.0..=1.0).contains(&u)
            || !(0.0..=1.0).contains(&v)
        {
            return BORDER;
        }
        let tx = ((u * image.width() as f32) as u32).min(image.width() - 1);
        let ty = ((v * image.height() as f32) as u32).min(image.height() - 1);
        let [r, g, b, a] = image.get_pixel(tx, ty).0;
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }
}

pub fn to_rgba8(color: Color) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
