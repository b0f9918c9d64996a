//! Main entry point for rendering a request to WAV.

use poino_spec::{EngineConfig, SynthRequest, VoiceModel};

use crate::error::AudioResult;
use crate::synthesizer::Synthesizer;
use crate::wav::WavResult;

/// Result of rendering a request.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// WAV file data.
    pub wav: WavResult,
    /// Number of labels in the request.
    pub num_labels: usize,
    /// Largest absolute sample value.
    pub peak: f32,
}

/// Renders a request with `voice` into a WAV file.
///
/// # Arguments
/// * `request` - Labels and synthesis parameters
/// * `voice` - Voice definition
/// * `config` - Engine configuration
///
/// # Returns
/// Encoded WAV file and metadata
pub fn generate(
    request: &SynthRequest,
    voice: &VoiceModel,
    config: &EngineConfig,
) -> AudioResult<GenerateResult> {
    generate_with_progress(request, voice, config, |_| {})
}

/// Renders a request, reporting per-label progress in `[0, 1]`.
pub fn generate_with_progress<F>(
    request: &SynthRequest,
    voice: &VoiceModel,
    config: &EngineConfig,
    progress: F,
) -> AudioResult<GenerateResult>
where
    F: FnMut(f64),
{
    let synthesizer = Synthesizer::new(*config)?;
    let samples =
        synthesizer.synthesize_with_progress(&request.labels, voice, &request.params, progress)?;

    let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
    let wav = WavResult::from_samples(&samples, config.sample_rate)?;

    Ok(GenerateResult {
        wav,
        num_labels: request.labels.len(),
        peak,
    })
}
