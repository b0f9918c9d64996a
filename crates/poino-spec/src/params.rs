//! Synthesis parameters and engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::label::Label;
use crate::voice::PitchRange;

/// Default engine sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Default playback speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Default output volume.
pub const DEFAULT_VOLUME: f64 = 0.5;

/// How the envelope synthesizer sizes its frequency-domain buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferSizing {
    /// Buffer length is the segment's sample count.
    #[default]
    Exact,
    /// Buffer length is the next power of two; the result is truncated to the
    /// segment's sample count.
    PowerOfTwo,
}

/// Engine configuration shared by every synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Envelope buffer sizing strategy.
    #[serde(default)]
    pub buffer_sizing: BufferSizing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_sizing: BufferSizing::Exact,
        }
    }
}

impl EngineConfig {
    /// Creates a config with the given sample rate and exact buffer sizing.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Converts milliseconds to a sample count, rounding to nearest.
    ///
    /// Negative and non-finite durations yield 0.
    pub fn ms_to_samples(&self, ms: f64) -> usize {
        let samples = (self.sample_rate as f64 * ms / 1000.0).round();
        if samples.is_finite() && samples > 0.0 {
            samples as usize
        } else {
            0
        }
    }
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

/// Per-request synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthParams {
    /// Speed multiplier (> 0); explicit segment lengths are divided by it.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Output volume (>= 0).
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Pitch at accent 1.0 in Hz; the voice's maximum when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_max: Option<f64>,
    /// Pitch at accent 0.0 in Hz; the voice's minimum when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_min: Option<f64>,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            volume: DEFAULT_VOLUME,
            pitch_max: None,
            pitch_min: None,
        }
    }
}

impl SynthParams {
    /// Returns `(pitch_max, pitch_min)`, falling back to the voice's range.
    pub fn pitch_bounds(&self, voice_pitch: &PitchRange) -> (f64, f64) {
        (
            self.pitch_max.unwrap_or(voice_pitch.max),
            self.pitch_min.unwrap_or(voice_pitch.min),
        )
    }
}

/// A complete synthesis request: labels plus parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SynthRequest {
    /// Labels in playback order.
    pub labels: Vec<Label>,
    /// Synthesis parameters.
    #[serde(flatten)]
    pub params: SynthParams,
}

impl SynthRequest {
    /// Creates a request with default parameters.
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            labels,
            params: SynthParams::default(),
        }
    }

    /// Parses a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the request to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
