//! MP3 encoding via LAME
//!
//! Only compiled with the `mp3` feature.

use std::fs;
use std::path::Path;

use mp3lame_encoder::{
    max_required_buffer_size, Bitrate, BuildError, Builder, EncodeError, FlushNoGap, MonoPcm,
    Quality,
};

use crate::domain::recording::{PcmBuffer, CHANNELS};

/// Upper bound LAME documents for the bytes a flush can emit
const FLUSH_BUFFER_SIZE: usize = 7200;

/// MP3 encoding errors
#[derive(Debug, thiserror::Error)]
pub enum Mp3Error {
    #[error("Failed to create LAME encoder")]
    Init,

    #[error("Failed to configure LAME: {0}")]
    Config(BuildError),

    #[error("LAME encoding failed: {0}")]
    Encode(EncodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Encode mono PCM samples to MP3 bytes, including the frames LAME
/// holds back until it is flushed
pub fn encode_to_mp3(buffer: &PcmBuffer) -> Result<Vec<u8>, Mp3Error> {
    let mut builder = Builder::new().ok_or(Mp3Error::Init)?;
    builder
        .set_num_channels(CHANNELS as u8)
        .map_err(Mp3Error::Config)?;
    builder
        .set_sample_rate(buffer.sample_rate())
        .map_err(Mp3Error::Config)?;
    builder
        .set_brate(Bitrate::Kbps192)
        .map_err(Mp3Error::Config)?;
    builder
        .set_quality(Quality::NearBest)
        .map_err(Mp3Error::Config)?;
    let mut encoder = builder.build().map_err(Mp3Error::Config)?;

    let pcm = buffer.samples();
    let mut mp3 = Vec::with_capacity(max_required_buffer_size(pcm.len()) + FLUSH_BUFFER_SIZE);

    encoder
        .encode_to_vec(MonoPcm(pcm), &mut mp3)
        .map_err(Mp3Error::Encode)?;
    encoder
        .flush_to_vec::<FlushNoGap>(&mut mp3)
        .map_err(Mp3Error::Encode)?;

    Ok(mp3)
}

/// Encode `buffer` and write it to `path`
pub fn write_mp3(path: &Path, buffer: &PcmBuffer) -> Result<(), Mp3Error> {
    let bytes = encode_to_mp3(buffer)?;
    fs::write(path, bytes)?;
    Ok(())
}
