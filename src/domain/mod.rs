//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{AudioFormat, CaptureResult, Duration, PcmBuffer, RecorderConfig};
