use uuid::Uuid;

use crate::panel::Panel;
use crate::skin::Skin;
use crate::transform::{gui_model_matrix, rect_projection, skin_texture_matrix, Mat4};
use crate::utils::{Color, Rect};

/// Everything one quad draw uploads: tint, the three matrices, and which
/// atlas to bind (`None` binds the default white texture).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub color: Color,
    pub projection: Mat4,
    pub model: Mat4,
    pub texture: Mat4,
    pub skin: Option<Uuid>,
}

/// Draws `color` over `rect` with the panel's skin slice.
pub fn rect_command(
    panel: &Panel,
    color: Color,
    rect: Rect,
    base_projection: &Mat4,
    gui_depth: f32,
) -> DrawCommand {
    let skin: Option<&Skin> = panel.skin().map(|s| s.as_ref());
    DrawCommand {
        color,
        projection: rect_projection(base_projection, rect),
        model: gui_model_matrix(gui_depth),
        texture: skin_texture_matrix(skin, panel.render_skin()),
        skin: skin.map(|s| s.key()),
    }
}

/// Fill first, then border, both on the shared GUI depth plane.
pub fn panel_commands(panel: &Panel, base_projection: &Mat4, gui_depth: f32) -> [DrawCommand; 2] {
    let rects = panel.draw_rects();
    let style = &panel.style;
    [
        rect_command(panel, style.fill_color, rects.fill, base_projection, gui_depth),
        rect_command(
            panel,
            style.border_color,
            rects.border,
            base_projection,
            gui_depth,
        ),
    ]
}
