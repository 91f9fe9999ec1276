//! WAV encoding via hound

use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::domain::recording::{PcmBuffer, CHANNELS};

/// Write `buffer` as a 16-bit PCM WAV file
pub fn write_wav(path: &Path, buffer: &PcmBuffer) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}
