//! FLAC encoding of captured speech
//!
//! The clip is stored as 16 kHz mono 16-bit FLAC, which every playback
//! backend in use decodes natively.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use thiserror::Error;

use crate::application::ports::{CaptureFormat, DeviceError};

/// Encoding errors
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),

    #[error("Resampling failed: {0}")]
    Resample(String),
}

impl From<EncodingError> for DeviceError {
    fn from(err: EncodingError) -> Self {
        Self::Stop(err.to_string())
    }
}

/// Encode mono PCM already at `format.sample_rate` into a FLAC stream
pub fn encode_flac(pcm: &[i16], format: CaptureFormat) -> Result<Vec<u8>, EncodingError> {
    let samples: Vec<i32> = pcm.iter().map(|&s| i32::from(s)).collect();

    let encoder_config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples,
        usize::from(format.channels),
        usize::from(format.bits_per_sample),
        format.sample_rate as usize,
    );

    let stream =
        flacenc::encode_with_fixed_block_size(&encoder_config, source, encoder_config.block_size)
            .map_err(|e| EncodingError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}
