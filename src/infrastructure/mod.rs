//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio device, encoders and the config file.

pub mod config;
pub mod encoding;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use encoding::MultiFormatWriter;
pub use recording::{CpalCapture, MicRecorder};
