use plutonium_panels::dither::{ALPHA_DISCARD_MAX, ALPHA_OPAQUE_MIN};
use plutonium_panels::shader::{
    fragment_source, vertex_source, FRAGMENT_ENTRY, SHADER_VERSION, VERTEX_ENTRY,
};

#[test]
fn vertex_stage_follows_binding_contract() {
    let src = vertex_source();
    assert!(src.contains("@location(0) position: vec2<f32>"));
    assert!(src.contains("@group(0) @binding(1) var<uniform> tint: vec4<f32>"));
    assert!(src.contains("@group(0) @binding(2) var<uniform> projection: mat4x4<f32>"));
    assert!(src.contains("@group(0) @binding(3) var<uniform> model: mat4x4<f32>"));
    assert!(src.contains("@group(0) @binding(4) var<uniform> texture_matrix: mat4x4<f32>"));
    assert!(src.contains(&format!("fn {}(", VERTEX_ENTRY)));
}

#[test]
fn fragment_stage_dithers_with_shared_thresholds() {
    let src = fragment_source();
    assert!(src.contains(&format!("!(color.a > {})", ALPHA_DISCARD_MAX)));
    assert!(src.contains(&format!("color.a < {}", ALPHA_OPAQUE_MIN)));
    assert!(src.contains("discard;"));
    assert!(src.contains("color.a = 1.0;"));
    assert!(src.contains(&format!("fn {}(", FRAGMENT_ENTRY)));
}

#[test]
fn sources_are_versioned() {
    let tag = format!("v{}", SHADER_VERSION);
    assert!(vertex_source().lines().next().unwrap().contains(&tag));
    assert!(fragment_source().lines().next().unwrap().contains(&tag));
}
