/// RGBA color with float channels in `[0, 1]`.
pub type Color = [f32; 4];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Vertex {
    pub position: [f32; 2], // x, y on the unit quad
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub transform: [[f32; 4]; 4], // 4x4 column-major matrix
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorUniform {
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle in y-up screen units (`bottom <= top`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Builds a rect from its lower-left corner and extent.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, x + width, y + height, y)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Grows the rect by `margin` on every side; a negative margin shrinks it.
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            left: self.left - margin,
            right: self.right + margin,
            top: self.top + margin,
            bottom: self.bottom - margin,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.left
            && position.x <= self.right
            && position.y >= self.bottom
            && position.y <= self.top
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MouseInfo {
    pub is_lmb_clicked: bool,
    pub mouse_pos: Position,
}
