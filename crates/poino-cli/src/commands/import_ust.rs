//! Import-ust command implementation
//!
//! Converts an UTAU sequence into a synthesis request.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use poino_label::import_ust_bytes;

use crate::input::{read_bytes, write_output};

/// Run the import-ust command
///
/// # Arguments
/// * `input` - Path to the UST file (Shift_JIS or UTF-8)
/// * `output` - Output file path (default: stdout)
///
/// # Returns
/// Exit code: 0 on success
pub fn run(input: &str, output: Option<&str>) -> Result<ExitCode> {
    let bytes = read_bytes(Path::new(input))?;
    let request =
        import_ust_bytes(&bytes).with_context(|| format!("Failed to import sequence: {}", input))?;

    tracing::debug!(labels = request.labels.len(), "imported sequence");

    let json = request.to_json_pretty()?;
    write_output(output.map(Path::new), &json)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poino_spec::SynthRequest;

    #[test]
    fn test_import_writes_request() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("song.ust");
        let output = tmp.path().join("request.json");
        std::fs::write(
            &input,
            "[#SETTING]\nTempo=120\n[#0000]\nLength=480\nLyric=か\nNoteNum=69\n",
        )
        .unwrap();

        run(input.to_str().unwrap(), output.to_str()).unwrap();

        let request = SynthRequest::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(request.labels.len(), 1);
        assert_eq!(request.labels[0].kana, "カ");
        assert_eq!(request.labels[0].length, 500.0);
        assert_eq!(request.params.pitch_max, Some(5000.0));
    }

    #[test]
    fn test_import_shift_jis_file() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("song.ust");
        let output = tmp.path().join("request.json");
        let (bytes, _, unmappable) = encoding_rs::SHIFT_JIS
            .encode("[#SETTING]\r\nTempo=120\r\n[#0000]\r\nLength=960\r\nLyric=きゃ\r\nNoteNum=69\r\n");
        assert!(!unmappable);
        std::fs::write(&input, &bytes).unwrap();

        run(input.to_str().unwrap(), output.to_str()).unwrap();

        let request = SynthRequest::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(request.labels.len(), 1);
        assert_eq!(request.labels[0].kana, "キャ");
        assert_eq!(request.labels[0].length, 1000.0);
    }

    #[test]
    fn test_invalid_tempo_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("song.ust");
        std::fs::write(&input, "[#SETTING]\nTempo=-3\n").unwrap();

        let err = run(input.to_str().unwrap(), None).unwrap_err();
        assert!(format!("{:#}", err).contains("tempo"));
    }
}
