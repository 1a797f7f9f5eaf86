use std::rc::Rc;

use uuid::Uuid;

use crate::error::Result;
use crate::skin::Skin;
use crate::style::Style;
use crate::utils::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelType {
    Rect,
    Button,
}

/// Fill and border rectangles for one panel on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRects {
    pub fill: Rect,
    pub border: Rect,
}

impl PanelType {
    /// Rects are drawn at their bounding box; buttons grow by the hover width
    /// while hovered and by the click width on top of that while clicked.
    pub fn draw_rects(
        &self,
        bounding_box: Rect,
        style: &Style,
        mouse_over: bool,
        mouse_click: bool,
    ) -> PanelRects {
        let border = match self {
            PanelType::Rect => bounding_box,
            PanelType::Button => {
                let mut rect = bounding_box;
                if mouse_over {
                    rect = rect.expanded(style.button_hover_width);
                }
                if mouse_click {
                    rect = rect.expanded(style.button_click_width);
                }
                rect
            }
        };
        PanelRects {
            fill: border.expanded(-style.border_width),
            border,
        }
    }
}

#[derive(Debug)]
pub struct Panel {
    id: Uuid,
    pub bounding_box: Rect,
    pub panel_type: PanelType,
    pub mouse_over: bool,
    pub mouse_click: bool,
    render_skin: u32,
    pub style: Rc<Style>,
    skin: Option<Rc<Skin>>,
}

impl Panel {
    pub fn new(panel_type: PanelType, bounding_box: Rect, style: Rc<Style>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounding_box,
            panel_type,
            mouse_over: false,
            mouse_click: false,
            render_skin: 0,
            style,
            skin: None,
        }
    }

    pub fn rect(bounding_box: Rect, style: Rc<Style>) -> Self {
        Self::new(PanelType::Rect, bounding_box, style)
    }

    pub fn button(bounding_box: Rect, style: Rc<Style>) -> Self {
        Self::new(PanelType::Button, bounding_box, style)
    }

    pub fn with_skin(mut self, skin: Rc<Skin>, render_skin: u32) -> Result<Self> {
        skin.check_index(render_skin)?;
        self.skin = Some(skin);
        self.render_skin = render_skin;
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn skin(&self) -> Option<&Rc<Skin>> {
        self.skin.as_ref()
    }

    pub fn render_skin(&self) -> u32 {
        self.render_skin
    }

    /// Binds a new atlas (or none). Fails if the current slice index does not
    /// fit the new atlas; the panel is left unchanged in that case.
    pub fn set_skin(&mut self, skin: Option<Rc<Skin>>) -> Result<()> {
        if let Some(skin) = &skin {
            skin.check_index(self.render_skin)?;
        }
        self.skin = skin;
        Ok(())
    }

    pub fn set_render_skin(&mut self, render_skin: u32) -> Result<()> {
        if let Some(skin) = &self.skin {
            skin.check_index(render_skin)?;
        }
        self.render_skin = render_skin;
        Ok(())
    }

    pub fn set_style(&mut self, style: Rc<Style>) {
        self.style = style;
    }

    pub fn draw_rects(&self) -> PanelRects {
        self.panel_type.draw_rects(
            self.bounding_box,
            &self.style,
            self.mouse_over,
            self.mouse_click,
        )
    }
}
