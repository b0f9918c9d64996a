//! Input file loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use poino_spec::{SynthRequest, VoiceModel};

/// Reads a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Reads a file as raw bytes.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Loads a voice definition from JSON.
pub fn load_voice(path: &Path) -> Result<VoiceModel> {
    let text = read_text(path)?;
    VoiceModel::from_json(&text)
        .with_context(|| format!("Failed to parse voice file: {}", path.display()))
}

/// Loads a synthesis request from JSON.
pub fn load_request(path: &Path) -> Result<SynthRequest> {
    let text = read_text(path)?;
    SynthRequest::from_json(&text)
        .with_context(|| format!("Failed to parse request file: {}", path.display()))
}

/// Writes `contents` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display())),
        None => {
            println!("{}", contents);
            Ok(())
        }
    }
}
