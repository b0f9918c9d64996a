//! poino Audio Backend
//!
//! This crate turns a label sequence and a voice definition into audio.
//!
//! # Overview
//!
//! Every label names a kana entry of the voice. The entry's phoneme segments
//! are timed against the label's duration, and each segment is realized from
//! its phoneme's spectral envelope:
//!
//! - **Envelope synthesis** - harmonics of the label's pitch are weighted by
//!   the envelope and inverse transformed into a segment waveform
//! - **Fades** - linear fade in/out per segment
//! - **Overlap-add** - each segment's head is summed into the previous
//!   segment's tail
//!
//! The resulting samples are written as a mono 32-bit float WAV file.
//!
//! # Determinism
//!
//! Synthesis uses no randomness. Given the same request, voice and engine
//! configuration the output is byte-identical across runs on the same
//! platform, and the BLAKE3 hash of the sample payload identifies it.
//!
//! # Example
//!
//! ```
//! use poino_backend_audio::generate;
//! use poino_spec::{EngineConfig, Label, SynthRequest, VoiceModel};
//!
//! let voice = VoiceModel::from_json(r#"{
//!     "id": "v", "name": "V", "ruby": "ぶい",
//!     "pitch": {"min": 80, "max": 240},
//!     "phonemes": {"a": [[0, 1], [480, 0]]},
//!     "voices": {"ア": [{"phoneme": "a", "length": -1, "volume": 1}]}
//! }"#).unwrap();
//! let request = SynthRequest::new(vec![Label::new("ア", 100.0, 0.5)]);
//!
//! let result = generate(&request, &voice, &EngineConfig::default()).unwrap();
//! assert_eq!(result.wav.num_samples, 4800);
//! assert_eq!(result.wav.wav_data.len(), 44 + 4800 * 4);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point: request to WAV
//! - [`synthesizer`] - Label sequence to samples
//! - [`timing`] - Segment length, fade and overlap resolution
//! - [`spectral`] - Envelope-to-waveform synthesis
//! - [`fade`] - Linear fades
//! - [`dft`] - Arbitrary-length complex DFT
//! - [`wav`] - Deterministic WAV file writer

pub mod dft;
pub mod error;
pub mod fade;
pub mod generate;
pub mod spectral;
pub mod synthesizer;
pub mod timing;
pub mod wav;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use generate::{generate, generate_with_progress, GenerateResult};
pub use synthesizer::Synthesizer;
pub use wav::WavResult;
