use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};
use crate::style::StyleConfig;
use crate::utils::Color;

/// Depth comparison used for every panel draw. All panels share one depth
/// plane, so this decides which of two overlapping draws survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DepthCompare {
    /// The first draw at a pixel wins; a border drawn after its fill rings it.
    #[default]
    Less,
    /// The last draw at a pixel wins; a border drawn after its fill hides it.
    LessEqual,
    Always,
}

impl DepthCompare {
    pub fn passes(self, depth: f32, stored: f32) -> bool {
        match self {
            DepthCompare::Less => depth < stored,
            DepthCompare::LessEqual => depth <= stored,
            DepthCompare::Always => true,
        }
    }

    pub fn to_wgpu(self) -> wgpu::CompareFunction {
        match self {
            DepthCompare::Less => wgpu::CompareFunction::Less,
            DepthCompare::LessEqual => wgpu::CompareFunction::LessEqual,
            DepthCompare::Always => wgpu::CompareFunction::Always,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Clip-space depth of the panel plane, in `[0, 1]`.
    pub gui_depth: f32,
    pub depth_compare: DepthCompare,
    pub clear_color: Color,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            gui_depth: 0.1,
            depth_compare: DepthCompare::default(),
            clear_color: [0.1, 0.2, 0.3, 1.0],
        }
    }
}

impl LayerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gui_depth) {
            return Err(PanelError::InvalidConfig(format!(
                "gui_depth {} is outside [0, 1]",
                self.gui_depth
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Plutonium Panels".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub window: WindowConfig,
    pub layer: LayerConfig,
    pub styles: BTreeMap<String, StyleConfig>,
}

impl PanelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PanelConfig = serde_json::from_str(json)?;
        config.layer.validate()?;
        for (name, style) in &config.styles {
            style.validate().map_err(|e| {
                PanelError::InvalidConfig(format!("style \"{}\": {}", name, e))
            })?;
        }
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "loaded panel config {} ({} styles)",
            path.as_ref().display(),
            config.styles.len()
        );
        Ok(config)
    }
}
