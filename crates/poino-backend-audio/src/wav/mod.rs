//! Deterministic WAV file writer.
//!
//! This module writes mono 32-bit IEEE float WAV files with no timestamps or
//! variable metadata, so identical samples always produce identical bytes. The
//! hash of the sample payload identifies a rendering.

mod format;
mod pcm;
mod result;
mod writer;


// Re-export public API
pub use format::{WavFormat, FORMAT_IEEE_FLOAT, HEADER_LEN};
pub use result::WavResult;
pub use writer::{samples_to_f32le, write_wav, write_wav_to_vec};
