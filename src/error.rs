use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or rendering a scene.
///
/// Rays escaping, being absorbed or running out of bounces are regular
/// outcomes of the integrator and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("metal fuzz must lie in [0, 1], got {0}")]
    InvalidFuzz(f32),

    #[error("refractive index must be greater than 1, got {0}")]
    InvalidRefractiveIndex(f32),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
