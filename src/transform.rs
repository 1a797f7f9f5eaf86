//! Column-major 4x4 matrices composed per draw.
//!
//! Every draw call gets its own projection, model and texture matrix, built
//! from plain values. There is no ambient matrix state to save or restore.

use crate::skin::Skin;
use crate::utils::{Rect, Size};

/// `m[column][row]`, matching WGSL `mat4x4<f32>` layout.
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn identity() -> Mat4 {
    IDENTITY
}

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = x;
    m[1][1] = y;
    m[2][2] = z;
    m
}

/// Returns `a * b`, so `b` is applied to a point first.
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, cell) in out_col.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

pub fn transform_point(m: &Mat4, p: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, cell) in out.iter_mut().enumerate() {
        *cell = (0..4).map(|k| m[k][row] * p[k]).sum();
    }
    out
}

/// Orthographic map of `[0, width] x [0, height]` (y-up) onto clip space.
/// Depth passes through untouched.
pub fn screen_projection(viewport: Size) -> Mat4 {
    let width = viewport.width.max(1.0);
    let height = viewport.height.max(1.0);
    multiply(
        &translation(-1.0, -1.0, 0.0),
        &scale(2.0 / width, 2.0 / height, 1.0),
    )
}

/// Places the unit quad over `rect`: translate to the lower-left corner, then
/// scale by the rect's extent.
pub fn rect_projection(base: &Mat4, rect: Rect) -> Mat4 {
    let placed = multiply(base, &translation(rect.left, rect.bottom, 0.0));
    multiply(&placed, &scale(rect.width(), rect.height(), 1.0))
}

/// Selects horizontal slice `render_skin` of the atlas. Without a skin the
/// whole (white) default texture is sampled.
pub fn skin_texture_matrix(skin: Option<&Skin>, render_skin: u32) -> Mat4 {
    match skin {
        Some(skin) => {
            let slice = skin.slice_width();
            multiply(
                &translation(render_skin as f32 * slice, 0.0, 0.0),
                &scale(slice, 1.0, 1.0),
            )
        }
        None => IDENTITY,
    }
}

pub fn gui_model_matrix(depth: f32) -> Mat4 {
    translation(0.0, 0.0, depth)
}
