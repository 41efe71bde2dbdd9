//! Error types for swirlfx.
//!
//! The simulation core cannot fail; these errors belong to the shell around
//! it: config files, GPU setup, the window and snapshot export.

use thiserror::Error;

/// Errors that can occur while reading or writing a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid config JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("Surface has no supported texture format")]
    UnsupportedSurface,
}

/// Errors that can occur when exporting the trail buffer as an image.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Encoding or writing the PNG failed.
    #[error("Failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
    /// The frame buffer has no pixels (zero-sized viewport).
    #[error("Frame buffer is empty")]
    EmptyFrame,
}

/// Errors that can occur when running the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Config file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_from_io() {
        let err: ConfigError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_app_error_wraps_gpu() {
        let err: AppError = GpuError::NoAdapter.into();
        assert!(err.to_string().starts_with("GPU error"));
    }
}
