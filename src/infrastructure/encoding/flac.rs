//! FLAC encoding via flacenc
//!
//! Lossless, 16-bit mono at the buffer's sample rate.

use std::fs;
use std::path::Path;

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::{EncodeError, OutputError, Verify, VerifyError};
use flacenc::source::MemSource;

use crate::domain::recording::{PcmBuffer, CHANNELS};

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum FlacError {
    #[error("Invalid FLAC encoder configuration")]
    Config(#[source] VerifyError),

    /// Sample source failures carry an `Rc` and cannot cross threads,
    /// so only their message is kept
    #[error("FLAC encoding failed: {0}")]
    Source(String),

    #[error("Failed to serialize FLAC stream")]
    Write(#[source] OutputError<ByteSink>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Encode mono PCM samples to FLAC bytes
pub fn encode_to_flac(buffer: &PcmBuffer) -> Result<Vec<u8>, FlacError> {
    encode_with_config(buffer, config::Encoder::default())
}

fn encode_with_config(buffer: &PcmBuffer, config: config::Encoder) -> Result<Vec<u8>, FlacError> {
    // flacenc works on i32 samples
    let samples_i32: Vec<i32> = buffer.samples().iter().map(|&s| s as i32).collect();

    let config = config
        .into_verified()
        .map_err(|(_, e)| FlacError::Config(e))?;

    let source = MemSource::from_samples(
        &samples_i32,
        CHANNELS as usize,
        BITS_PER_SAMPLE,
        buffer.sample_rate() as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| match e {
            EncodeError::Config(e) => FlacError::Config(e),
            EncodeError::Source(e) => FlacError::Source(e.to_string()),
            other => FlacError::Source(format!("{:?}", other)),
        })?;

    let mut sink = ByteSink::new();
    flac_stream.write(&mut sink).map_err(FlacError::Write)?;

    Ok(sink.into_inner())
}

/// Encode `buffer` and write it to `path`
pub fn write_flac(path: &Path, buffer: &PcmBuffer) -> Result<(), FlacError> {
    let bytes = encode_to_flac(buffer)?;
    fs::write(path, bytes)?;
    Ok(())
}
