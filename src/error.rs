//! Error types for sampling and sensor sources.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while sampling a single item (one disk path).
#[derive(Error, Debug)]
pub enum SampleError {
    /// The configured path does not exist or cannot be stat'ed.
    #[error("{} not found or inaccessible", .0.display())]
    PathNotFound(PathBuf),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while querying a temperature source.
#[derive(Error, Debug)]
pub enum SensorError {
    /// NVIDIA Management Library error.
    #[error("NVML error: {0}")]
    Nvml(#[from] nvml_wrapper::error::NvmlError),

    /// The platform offers no sensor query at all.
    #[error("temperature sensors are not available on this platform")]
    Unsupported,

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}
