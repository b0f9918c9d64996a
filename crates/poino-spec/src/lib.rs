//! poino data model
//!
//! This crate provides the value types shared by every stage of the poino
//! text-to-audio pipeline:
//!
//! - **Labels**: [`PhonemeAlignment`] rows from the external analyzer and the
//!   [`Label`] units the synthesizer consumes
//! - **Voices**: [`VoiceModel`] with per-kana phoneme recipes and per-phoneme
//!   spectral envelopes, plus structural [`validate_voice`]
//! - **Parameters**: [`SynthParams`], [`SynthRequest`] and the stateless
//!   [`EngineConfig`]
//!
//! # Example
//!
//! ```
//! use poino_spec::{Label, SynthRequest, VoiceModel, validate_voice};
//!
//! let voice = VoiceModel::from_json(r#"{
//!     "id": "v", "name": "V", "ruby": "ぶい",
//!     "pitch": {"min": 80, "max": 240},
//!     "phonemes": {"a": [[0, 0], [1, 0]]},
//!     "voices": {"ア": [{"phoneme": "a", "length": -1, "volume": 1}]}
//! }"#).unwrap();
//! assert!(validate_voice(&voice).is_ok());
//!
//! let request = SynthRequest::new(vec![Label::new("ア", 100.0, 0.5)]);
//! assert_eq!(request.params.speed, 1.0);
//! ```

pub mod error;
pub mod label;
pub mod params;
pub mod validation;
pub mod voice;

// Re-export commonly used types at the crate root
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use label::{Label, PhonemeAlignment, UNITS_PER_MS};
pub use params::{
    BufferSizing, EngineConfig, SynthParams, SynthRequest, DEFAULT_SAMPLE_RATE, DEFAULT_SPEED,
    DEFAULT_VOLUME,
};
pub use validation::validate_voice;
pub use voice::{
    EnvelopePoint, FadeSpec, LengthSpec, PitchRange, SegmentLength, SpectralEnvelope,
    VoiceModel, VoicePhonemeSegment, FILL_SENTINEL,
};
