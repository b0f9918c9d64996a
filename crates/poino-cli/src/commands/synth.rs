//! Synth command implementation
//!
//! Renders a request with a voice into a WAV file.

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use poino_backend_audio::{generate, AudioError, GenerateResult};
use poino_spec::{BackendError, BufferSizing, EngineConfig, SynthRequest, VoiceModel};

use super::json_output::{
    backend_error_to_json, error_codes, JsonError, SynthOutput, SynthResult,
};
use crate::input::{load_request, load_voice};

/// Exit code for synthesis failures.
pub const EXIT_SYNTHESIS: u8 = 2;

/// Command-line options for a synth run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthOptions {
    /// Path to the request JSON
    pub request: String,
    /// Path to the voice JSON
    pub voice: String,
    /// Output WAV path
    pub output: String,
    /// Speed override
    pub speed: Option<f64>,
    /// Volume override
    pub volume: Option<f64>,
    /// Pitch at accent 1.0 override
    pub pitch_max: Option<f64>,
    /// Pitch at accent 0.0 override
    pub pitch_min: Option<f64>,
    /// Sample rate override
    pub sample_rate: Option<u32>,
    /// Use power-of-two envelope buffers
    pub power_of_two: bool,
}

impl SynthOptions {
    /// Applies parameter overrides to a request.
    pub fn apply_overrides(&self, request: &mut SynthRequest) {
        if let Some(speed) = self.speed {
            request.params.speed = speed;
        }
        if let Some(volume) = self.volume {
            request.params.volume = volume;
        }
        if self.pitch_max.is_some() {
            request.params.pitch_max = self.pitch_max;
        }
        if self.pitch_min.is_some() {
            request.params.pitch_min = self.pitch_min;
        }
    }

    /// Builds the engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if self.power_of_two {
            config.buffer_sizing = BufferSizing::PowerOfTwo;
        }
        config
    }
}

/// Run the synth command
///
/// # Arguments
/// * `options` - Input paths and overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 2 if synthesis failed
pub fn run(options: &SynthOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

fn load_inputs(options: &SynthOptions) -> Result<(SynthRequest, VoiceModel)> {
    let mut request = load_request(Path::new(&options.request))?;
    options.apply_overrides(&mut request);
    let voice = load_voice(Path::new(&options.voice))?;
    Ok((request, voice))
}

fn render(
    options: &SynthOptions,
    request: &SynthRequest,
    voice: &VoiceModel,
) -> Result<GenerateResult, AudioError> {
    generate(request, voice, &options.engine_config())
}

fn write_wav(path: &str, result: &GenerateResult) -> Result<()> {
    fs::write(path, &result.wav.wav_data)
        .with_context(|| format!("Failed to write output file: {}", path))
}

/// Run synth with human-readable (colored) output
fn run_human(options: &SynthOptions) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Request:".cyan().bold(), options.request);
    println!("{} {}", "Voice:".cyan().bold(), options.voice);

    let (request, voice) = load_inputs(options)?;
    println!(
        "{} {} labels, speed {}, volume {}",
        "Params:".dimmed(),
        request.labels.len(),
        request.params.speed,
        request.params.volume
    );

    let result = match render(options, &request, &voice) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} [{}] {}", "error".red().bold(), e.code(), e);
            return Ok(ExitCode::from(EXIT_SYNTHESIS));
        }
    };

    write_wav(&options.output, &result)?;

    println!(
        "{} {} ({} samples, {:.3}s at {} Hz)",
        "Wrote:".green().bold(),
        options.output,
        result.wav.num_samples,
        result.wav.duration_seconds(),
        result.wav.sample_rate
    );
    println!("{} {}", "PCM hash:".dimmed(), result.wav.pcm_hash);
    println!(
        "{} {}ms",
        "Completed in".dimmed(),
        start.elapsed().as_millis()
    );

    Ok(ExitCode::SUCCESS)
}

/// Run synth with machine-readable JSON output
fn run_json(options: &SynthOptions) -> Result<ExitCode> {
    let (output, code) = match load_inputs(options) {
        Err(e) => (
            SynthOutput::failure(JsonError::new(error_codes::INPUT, format!("{:#}", e))),
            ExitCode::from(1),
        ),
        Ok((request, voice)) => match render(options, &request, &voice) {
            Err(e) => (
                SynthOutput::failure(backend_error_to_json(&e)),
                ExitCode::from(EXIT_SYNTHESIS),
            ),
            Ok(result) => match write_wav(&options.output, &result) {
                Err(e) => (
                    SynthOutput::failure(JsonError::new(error_codes::OUTPUT, format!("{:#}", e))),
                    ExitCode::from(1),
                ),
                Ok(()) => (
                    SynthOutput {
                        success: true,
                        result: Some(SynthResult {
                            output: options.output.clone(),
                            num_labels: result.num_labels,
                            num_samples: result.wav.num_samples,
                            sample_rate: result.wav.sample_rate,
                            duration_seconds: result.wav.duration_seconds(),
                            peak: result.peak,
                            pcm_hash: result.wav.pcm_hash.clone(),
                        }),
                        errors: Vec::new(),
                    },
                    ExitCode::SUCCESS,
                ),
            },
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
