//! Voice Recorder - fixed-length microphone capture
//!
//! Records a clip of a given number of seconds from the default input
//! device, mono at 44.1kHz, and writes it as WAV, FLAC or MP3 named after
//! the Unix timestamp it was saved at.
//!
//! ```no_run
//! use voice_recorder::domain::Duration;
//! use voice_recorder::infrastructure::MicRecorder;
//!
//! let duration = Duration::from_secs(5).unwrap();
//! let recorder = MicRecorder::new(duration, "./recordings/", "wav");
//! let result = recorder.start_recording()?;
//! println!("Recording saved at: {}", result.file_path().display());
//! # Ok::<(), voice_recorder::application::ports::RecordingError>(())
//! ```
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (duration, format, PCM buffer) and errors
//! - **Application**: The `Recorder` use case and port interfaces (traits)
//! - **Infrastructure**: cpal capture, WAV/FLAC/MP3 writers, config file
//! - **CLI**: Command-line interface, argument parsing, and output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
