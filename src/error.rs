use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("skin index {index} is outside the atlas (skin count {skin_count})")]
    SkinIndexOutOfRange { index: u32, skin_count: u32 },

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("skin image has no pixels")]
    EmptySkinImage,

    #[error("gpu setup failed: {0}")]
    Gpu(String),

    #[error("window system error: {0}")]
    Platform(String),

    #[error("svg error: {0}")]
    Svg(String),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
