//! Error types for morph-sphere.
//!
//! The particle engine itself cannot fail; only its edges can: loading a
//! configuration, opening a window and GPU surface, and exporting frames.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside the range the engine can work with.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors that can occur while setting up the window and GPU presenter.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system supports Vulkan/Metal/DX12/WebGPU")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur while writing rendered frames to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output directory.
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to encode the image.
    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),
    /// The frame has no pixels.
    #[error("cannot export an empty {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },
}
