//! Validate-voice command implementation
//!
//! Checks a voice definition for structural problems.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use poino_spec::{validate_voice, ValidationResult};

use super::json_output::{error_codes, JsonError, JsonWarning, ValidateVoiceOutput};
use crate::input::load_voice;

/// Run the validate-voice command
///
/// # Arguments
/// * `voice_path` - Path to the voice JSON
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(voice_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(voice_path)
    } else {
        run_human(voice_path)
    }
}

/// Run validate-voice with human-readable (colored) output
fn run_human(voice_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), voice_path);

    let voice = load_voice(Path::new(voice_path))?;
    let result = validate_voice(&voice);

    println!(
        "{} {} ({} phonemes, {} kana)",
        "Voice:".dimmed(),
        voice.id,
        voice.phonemes.len(),
        voice.voices.len()
    );
    print_messages(&result);

    if result.is_ok() {
        println!("{} voice is valid", "OK".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn print_messages(result: &ValidationResult) {
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}

/// Run validate-voice with machine-readable JSON output
fn run_json(voice_path: &str) -> Result<ExitCode> {
    let output = match load_voice(Path::new(voice_path)) {
        Ok(voice) => {
            let result = validate_voice(&voice);
            ValidateVoiceOutput {
                success: result.is_ok(),
                voice: Some(voice.id.clone()),
                errors: result.errors.iter().map(JsonError::from).collect(),
                warnings: result.warnings.iter().map(JsonWarning::from).collect(),
            }
        }
        Err(e) => ValidateVoiceOutput {
            success: false,
            voice: None,
            errors: vec![JsonError::new(error_codes::INPUT, format!("{:#}", e))],
            warnings: Vec::new(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
