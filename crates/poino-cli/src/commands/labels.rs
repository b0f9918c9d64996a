//! Labels command implementation
//!
//! Extracts kana labels from analyzer full-context output.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use poino_label::{label_groups_from_full_context, labels_from_full_context};

use crate::input::{read_text, write_output};

/// Run the labels command
///
/// # Arguments
/// * `input` - Path to the full-context label file
/// * `output` - Output file path (default: stdout)
/// * `groups` - Emit labels grouped by boundary instead of a flat list
///
/// # Returns
/// Exit code: 0 on success
pub fn run(input: &str, output: Option<&str>, groups: bool) -> Result<ExitCode> {
    let text = read_text(Path::new(input))?;

    let json = if groups {
        let groups = label_groups_from_full_context(&text)
            .with_context(|| format!("Failed to parse labels: {}", input))?;
        serde_json::to_string_pretty(&groups)?
    } else {
        let labels = labels_from_full_context(&text)
            .with_context(|| format!("Failed to parse labels: {}", input))?;
        serde_json::to_string_pretty(&labels)?
    };

    write_output(output.map(Path::new), &json)?;
    Ok(ExitCode::SUCCESS)
}
