//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `synth` and `validate-voice`.

use poino_spec::{BackendError, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Backend and validation errors pass through their own codes.
pub mod error_codes {
    /// File could not be read or parsed
    pub const INPUT: &str = "CLI_001";
    /// Output could not be written
    pub const OUTPUT: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E011", "AUDIO_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// Converts any backend error into a JSON error.
pub fn backend_error_to_json(err: &dyn BackendError) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationWarning> for JsonWarning {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.code().to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Output of `validate-voice --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateVoiceOutput {
    /// Whether the voice passed validation
    pub success: bool,
    /// Voice id, when the file parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Errors
    pub errors: Vec<JsonError>,
    /// Warnings
    pub warnings: Vec<JsonWarning>,
}

/// Result details of a successful synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthResult {
    /// Path of the written WAV file
    pub output: String,
    /// Number of labels rendered
    pub num_labels: usize,
    /// Number of samples written
    pub num_samples: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Largest absolute sample value
    pub peak: f32,
    /// BLAKE3 hash of the sample payload
    pub pcm_hash: String,
}

/// Output of `synth --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthOutput {
    /// Whether synthesis succeeded
    pub success: bool,
    /// Result details on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SynthResult>,
    /// Errors
    pub errors: Vec<JsonError>,
}

impl SynthOutput {
    /// Creates a failed output with a single error.
    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            result: None,
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poino_spec::{ErrorCode, WarningCode};

    #[test]
    fn test_validation_error_conversion() {
        let err = ValidationError::with_path(
            ErrorCode::NonMonotonicEnvelope,
            "ratios must not decrease",
            "phonemes.a[2]",
        );
        let json = JsonError::from(&err);
        assert_eq!(json.code, "E011");
        assert_eq!(json.path.as_deref(), Some("phonemes.a[2]"));
    }

    #[test]
    fn test_warning_conversion() {
        let warning = ValidationWarning::with_path(
            WarningCode::UnparseableFade,
            "fade in 'soft' is not a length",
            "voices.ア[0].fade.in",
        );
        let json = JsonWarning::from(&warning);
        assert_eq!(json.code, "W001");
    }

    #[test]
    fn test_failure_omits_result() {
        let output = SynthOutput::failure(JsonError::new(error_codes::INPUT, "missing file"));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
        assert_eq!(value["errors"][0]["code"], "CLI_001");
    }
}
