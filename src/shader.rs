//! WGSL sources for the panel pipeline.
//!
//! Binding contract shared with the renderer:
//! - vertex location 0: `vec2<f32>` unit quad corner
//! - group 0, binding 1: tint color (`vec4<f32>`)
//! - group 0, binding 2: projection matrix
//! - group 0, binding 3: model matrix
//! - group 0, binding 4: texture matrix
//! - group 1, binding 0/1: skin texture and sampler

pub const SHADER_VERSION: u32 = 1;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub const POSITION_LOCATION: u32 = 0;
pub const TINT_BINDING: u32 = 1;
pub const PROJECTION_BINDING: u32 = 2;
pub const MODEL_BINDING: u32 = 3;
pub const TEXTURE_MATRIX_BINDING: u32 = 4;

const PANEL_VERT_SRC: &str = include_str!("../shaders/panel.vert.wgsl");
const PANEL_FRAG_SRC: &str = include_str!("../shaders/panel.frag.wgsl");

pub fn vertex_source() -> &'static str {
    PANEL_VERT_SRC
}

pub fn fragment_source() -> &'static str {
    PANEL_FRAG_SRC
}
