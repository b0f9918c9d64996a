//! Structural validation of voice definitions.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::voice::{EnvelopePoint, LengthSpec, SegmentLength, VoiceModel, VoicePhonemeSegment};

/// Validates a voice and returns a validation result.
///
/// Errors make the voice unusable for synthesis. Warnings flag data that
/// synthesizes but degrades (unparseable fade/overlap specs resolve to zero,
/// segments with no envelope render as silence).
///
/// # Example
/// ```
/// use poino_spec::{validate_voice, VoiceModel};
///
/// let voice = VoiceModel::from_json(
///     r#"{"id": "v", "name": "V", "ruby": "ぶい", "pitch": {"min": 0, "max": 100}}"#,
/// ).unwrap();
/// assert!(validate_voice(&voice).is_ok());
/// ```
pub fn validate_voice(voice: &VoiceModel) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_identity(voice, &mut result);
    validate_pitch(voice, &mut result);

    for (phoneme, envelope) in &voice.phonemes {
        validate_envelope(phoneme, envelope, &mut result);
    }

    for (kana, segments) in &voice.voices {
        validate_segments(voice, kana, segments, &mut result);
    }

    result
}

fn validate_identity(voice: &VoiceModel, result: &mut ValidationResult) {
    for (field, value) in [
        ("id", &voice.id),
        ("name", &voice.name),
        ("ruby", &voice.ruby),
    ] {
        if value.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingIdentity,
                format!("voice {} must not be empty", field),
                field,
            ));
        }
    }
}

fn validate_pitch(voice: &VoiceModel, result: &mut ValidationResult) {
    let pitch = &voice.pitch;
    let mut finite = true;

    for (field, value) in [("pitch.min", pitch.min), ("pitch.max", pitch.max)] {
        if !value.is_finite() {
            finite = false;
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidPitch,
                format!("pitch bound must be finite, got {}", value),
                field,
            ));
        }
    }

    if finite && pitch.min > pitch.max {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::InvertedPitchRange,
            format!(
                "pitch.min ({}) is above pitch.max ({}); accent will lower the pitch",
                pitch.min, pitch.max
            ),
            "pitch",
        ));
    }
}

fn validate_envelope(phoneme: &str, envelope: &[EnvelopePoint], result: &mut ValidationResult) {
    let mut prev_ratio: Option<f64> = None;

    for (i, point) in envelope.iter().enumerate() {
        let path = format!("phonemes.{}[{}]", phoneme, i);

        if !point.ratio.is_finite() || !point.log_magnitude.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteEnvelopePoint,
                "envelope point must be finite",
                path,
            ));
            continue;
        }

        if let Some(prev) = prev_ratio {
            if point.ratio < prev {
                result.add_error(ValidationError::with_path(
                    ErrorCode::NonMonotonicEnvelope,
                    format!(
                        "frequency ratio {} is below the previous point ({})",
                        point.ratio, prev
                    ),
                    path,
                ));
            }
        }
        prev_ratio = Some(point.ratio);
    }
}

fn validate_segments(
    voice: &VoiceModel,
    kana: &str,
    segments: &[VoicePhonemeSegment],
    result: &mut ValidationResult,
) {
    let mut fill_count = 0;

    for (i, segment) in segments.iter().enumerate() {
        let path = format!("voices.{}[{}]", kana, i);

        if segment.phoneme.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyPhonemeId,
                "segment phoneme must not be empty",
                format!("{}.phoneme", path),
            ));
        } else if !voice.phonemes.contains_key(&segment.phoneme) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownPhoneme,
                format!("phoneme '{}' has no envelope and renders as silence", segment.phoneme),
                format!("{}.phoneme", path),
            ));
        }

        match segment.length {
            SegmentLength::Fill => fill_count += 1,
            SegmentLength::Fixed(ms) if !ms.is_finite() || ms < 0.0 => {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidSegmentLength,
                    format!("segment length must be >= 0 or -1 (fill), got {}", ms),
                    format!("{}.length", path),
                ));
            }
            SegmentLength::Fixed(_) => {}
        }

        if !segment.volume.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSegmentVolume,
                format!("segment volume must be finite, got {}", segment.volume),
                format!("{}.volume", path),
            ));
        }

        if let Some(fade) = &segment.fade {
            for (field, spec) in [("in", &fade.fade_in), ("out", &fade.fade_out)] {
                if LengthSpec::parse(spec).is_none() {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::UnparseableFade,
                        format!("fade spec '{}' is not <n>ms or <n>%; using 0", spec),
                        format!("{}.fade.{}", path, field),
                    ));
                }
            }
        }

        if let Some(overlap) = &segment.overlap {
            if LengthSpec::parse(overlap).is_none() {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::UnparseableOverlap,
                    format!("overlap spec '{}' is not <n>ms or <n>%; using 0", overlap),
                    format!("{}.overlap", path),
                ));
            }
        }
    }

    if fill_count > 1 {
        result.add_error(ValidationError::with_path(
            ErrorCode::MultipleFillSegments,
            format!("{} fill segments; at most one is allowed", fill_count),
            format!("voices.{}", kana),
        ));
    }
}
