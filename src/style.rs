use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};
use crate::panel::Panel;
use crate::utils::Color;

pub type PanelCallback = Box<dyn Fn(&mut Panel)>;

/// Pointer behaviors attached to a style.
///
/// The `on_*` callbacks fire once on the frame an interaction flag flips.
/// `mouse_over` and `mouse_click` fire on every frame the flag holds.
#[derive(Default)]
pub struct MouseBehavior {
    pub on_mouse_over: Option<PanelCallback>,
    pub on_mouse_away: Option<PanelCallback>,
    pub on_mouse_click: Option<PanelCallback>,
    pub on_mouse_unclick: Option<PanelCallback>,
    pub mouse_over: Option<PanelCallback>,
    pub mouse_click: Option<PanelCallback>,
}

impl MouseBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_mouse_over(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.on_mouse_over = Some(Box::new(f));
        self
    }

    pub fn on_mouse_away(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.on_mouse_away = Some(Box::new(f));
        self
    }

    pub fn on_mouse_click(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.on_mouse_click = Some(Box::new(f));
        self
    }

    pub fn on_mouse_unclick(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.on_mouse_unclick = Some(Box::new(f));
        self
    }

    pub fn while_mouse_over(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.mouse_over = Some(Box::new(f));
        self
    }

    pub fn while_mouse_click(mut self, f: impl Fn(&mut Panel) + 'static) -> Self {
        self.mouse_click = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for MouseBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseBehavior")
            .field("on_mouse_over", &self.on_mouse_over.is_some())
            .field("on_mouse_away", &self.on_mouse_away.is_some())
            .field("on_mouse_click", &self.on_mouse_click.is_some())
            .field("on_mouse_unclick", &self.on_mouse_unclick.is_some())
            .field("mouse_over", &self.mouse_over.is_some())
            .field("mouse_click", &self.mouse_click.is_some())
            .finish()
    }
}

/// Serializable part of a style, as found in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub button_hover_width: f32,
    pub button_click_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_color: [0.20, 0.22, 0.28, 1.0],
            border_color: [0.14, 0.16, 0.20, 1.0],
            border_width: 2.0,
            button_hover_width: 2.0,
            button_click_width: 1.0,
        }
    }
}

/// Visual and behavioral theme shared by many panels through `Rc<Style>`.
#[derive(Debug)]
pub struct Style {
    pub fill_color: Color,
    pub border_color: Color,
    /// Inset of the fill rect from the border rect.
    pub border_width: f32,
    /// Outward growth of a hovered button.
    pub button_hover_width: f32,
    /// Further outward growth of a clicked button, on top of the hover growth.
    pub button_click_width: f32,
    pub mouse_bhv: MouseBehavior,
}

impl Default for Style {
    fn default() -> Self {
        Self::from_parts(&StyleConfig::default(), MouseBehavior::default())
    }
}

impl Style {
    pub fn from_config(config: &StyleConfig) -> Result<Self> {
        Self::with_behavior(config, MouseBehavior::default())
    }

    pub fn with_behavior(config: &StyleConfig, mouse_bhv: MouseBehavior) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, mouse_bhv))
    }

    fn from_parts(config: &StyleConfig, mouse_bhv: MouseBehavior) -> Self {
        Self {
            fill_color: config.fill_color,
            border_color: config.border_color,
            border_width: config.border_width,
            button_hover_width: config.button_hover_width,
            button_click_width: config.button_click_width,
            mouse_bhv,
        }
    }
}

impl StyleConfig {
    /// Rejects non-finite widths or colors and a negative border width.
    pub fn validate(&self) -> Result<()> {
        validate(self)
    }
}

fn validate(config: &StyleConfig) -> Result<()> {
    let widths = [
        ("border_width", config.border_width),
        ("button_hover_width", config.button_hover_width),
        ("button_click_width", config.button_click_width),
    ];
    for (name, value) in widths {
        if !value.is_finite() {
            return Err(PanelError::InvalidStyle(format!("{} is not finite", name)));
        }
    }
    if config.border_width < 0.0 {
        return Err(PanelError::InvalidStyle(
            "border_width must not be negative".to_string(),
        ));
    }
    let colors = config.fill_color.iter().chain(config.border_color.iter());
    if colors.copied().any(|c| !c.is_finite()) {
        return Err(PanelError::InvalidStyle(
            "colors must be finite".to_string(),
        ));
    }
    Ok(())
}
