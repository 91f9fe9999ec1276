//! Application layer - Use cases and port interfaces
//!
//! Contains the core recording operation and trait definitions
//! for external system interactions.

pub mod ports;
pub mod recorder;

// Re-export use cases
pub use recorder::Recorder;
