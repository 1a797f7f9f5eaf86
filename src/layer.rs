use uuid::Uuid;

use crate::config::LayerConfig;
use crate::draw::{panel_commands, DrawCommand};
use crate::input::PointerInput;
use crate::interaction::update_panel;
use crate::panel::Panel;
use crate::transform::screen_projection;
use crate::utils::Size;

/// Ordered list of panels drawn on one depth plane.
///
/// Iteration follows insertion order, which need not match what ends up on
/// top on screen.
#[derive(Debug, Default)]
pub struct PanelLayer {
    panels: Vec<Panel>,
    config: LayerConfig,
}

impl PanelLayer {
    pub fn new(config: LayerConfig) -> Self {
        Self {
            panels: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn add(&mut self, panel: Panel) -> Uuid {
        let id = panel.id();
        self.panels.push(panel);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Panel> {
        let index = self.panels.iter().position(|p| p.id() == id)?;
        Some(self.panels.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iterate(&mut self, mut f: impl FnMut(usize, &mut Panel)) {
        for (index, panel) in self.panels.iter_mut().enumerate() {
            f(index, panel);
        }
    }

    /// Interaction pass over every panel.
    pub fn update(&mut self, input: &impl PointerInput) {
        self.iterate(|_, panel| {
            update_panel(panel, input);
        });
    }

    /// Draw pass: fill and border commands for every panel, in list order.
    pub fn draw_commands(&self, viewport: Size) -> Vec<DrawCommand> {
        let base = screen_projection(viewport);
        self.panels
            .iter()
            .flat_map(|panel| panel_commands(panel, &base, self.config.gui_depth))
            .collect()
    }
}
