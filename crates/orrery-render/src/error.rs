//! Error types for the renderer

use thiserror::Error;

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while setting up or driving the renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,

    #[error("Surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface out of memory")]
    SurfaceOutOfMemory,

    #[error("Surface error: {0}")]
    Surface(String),
}
