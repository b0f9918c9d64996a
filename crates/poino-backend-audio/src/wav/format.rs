//! WAV file format parameters.

/// Format tag for IEEE floating point samples.
pub const FORMAT_IEEE_FLOAT: u16 = 3;

/// Size of the canonical header written before the sample data.
pub const HEADER_LEN: usize = 44;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 32 for this implementation).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 32-bit float format.
    pub fn mono_float(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
        }
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}
