use crate::utils::{MouseInfo, Rect};

/// Pointer state consumed by the interaction pass.
pub trait PointerInput {
    /// Whether the primary (left) pointer button is held this frame.
    fn is_primary_down(&self) -> bool;

    /// Whether the pointer lies within `bounds`.
    fn is_over(&self, bounds: &Rect) -> bool;
}

impl PointerInput for MouseInfo {
    fn is_primary_down(&self) -> bool {
        self.is_lmb_clicked
    }

    fn is_over(&self, bounds: &Rect) -> bool {
        bounds.contains(self.mouse_pos)
    }
}
