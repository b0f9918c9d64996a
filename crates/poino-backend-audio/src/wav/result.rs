//! WAV file generation result type.

use std::io;

use super::format::WavFormat;
use super::pcm::compute_pcm_hash;
use super::writer::{samples_to_f32le, write_wav_to_vec};

/// Result of WAV file generation.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the sample payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono float samples.
    ///
    /// # Errors
    /// Fails when the payload does not fit the 32-bit size fields.
    pub fn from_samples(samples: &[f32], sample_rate: u32) -> io::Result<Self> {
        let data = samples_to_f32le(samples);
        let wav_data = write_wav_to_vec(&WavFormat::mono_float(sample_rate), &data)?;
        let pcm_hash = compute_pcm_hash(&wav_data).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "written WAV has no data chunk")
        })?;

        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}
