//! UTAU sequence (UST) import.
//!
//! A UST file is an INI-like list of sections. `[#SETTING]` carries the tempo
//! and every numbered section (`[#0000]`, `[#0001]`, ...) is one note:
//!
//! ```text
//! [#SETTING]
//! Tempo=120.00
//! [#0000]
//! Length=480
//! Lyric=あ
//! NoteNum=60
//! ```
//!
//! UTAU writes these files in Shift_JIS. [`decode_ust`] accepts raw bytes in
//! either Shift_JIS or UTF-8.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;
use poino_spec::{Label, SynthParams, SynthRequest};
use tracing::debug;

use crate::error::{LabelError, LabelResult};
use crate::kana::{hiragana_to_katakana, katakana_only};

/// Pitch that maps to accent 1.0 for imported notes.
pub const UST_PITCH_MAX: f64 = 5000.0;

/// Pitch that maps to accent 0.0 for imported notes.
pub const UST_PITCH_MIN: f64 = 0.0;

/// Sequence ticks per quarter note.
const TICKS_PER_BEAT: f64 = 480.0;

/// Lowest and highest MIDI notes with a defined pitch (A0..G#8).
const NOTE_RANGE: std::ops::RangeInclusive<u32> = 21..=116;

/// Kana used for rests and notes without a usable lyric.
const REST_KANA: &str = "、";

/// One parsed note section.
#[derive(Debug, Default, Clone, PartialEq)]
struct Note {
    length: Option<u32>,
    lyric: Option<String>,
    note_num: Option<u32>,
}

/// Converts a MIDI note number to frequency in Hz (A4 = 440 Hz).
pub fn midi_to_frequency(midi_note: u32) -> f64 {
    440.0 * 2.0_f64.powf((midi_note as f64 - 69.0) / 12.0)
}

/// Decodes raw UST bytes.
///
/// Valid UTF-8 is used as is. Anything else is decoded as Shift_JIS, with
/// malformed sequences replaced by U+FFFD.
pub fn decode_ust(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
            if had_errors {
                debug!("sequence contains malformed Shift_JIS bytes");
            }
            text
        }
    }
}

/// Decodes raw UST bytes and imports them as a synthesis request.
pub fn import_ust_bytes(bytes: &[u8]) -> LabelResult<SynthRequest> {
    import_ust(&decode_ust(bytes))
}

/// Imports a UST sequence as a synthesis request.
///
/// The request uses speed 1.0, volume 0.5 and a 0-5000 Hz pitch range, so a
/// label's accent is its note frequency divided by 5000.
///
/// # Errors
/// Returns [`LabelError::InvalidSequence`] when the tempo is not a positive
/// number.
pub fn import_ust(text: &str) -> LabelResult<SynthRequest> {
    let mut tempo: Option<f64> = None;
    let mut notes: Vec<Note> = Vec::new();
    let mut in_note = false;

    for line in text.lines() {
        let line = line.trim_end();

        if let Some(header) = line.strip_prefix("[#").and_then(|h| h.strip_suffix(']')) {
            in_note = !header.is_empty() && header.bytes().all(|b| b.is_ascii_digit());
            if in_note {
                notes.push(Note::default());
            }
            continue;
        }

        if tempo.is_none() {
            if let Some(value) = line.strip_prefix("Tempo=") {
                tempo = Some(parse_tempo(value)?);
                continue;
            }
        }

        if !in_note {
            continue;
        }
        let Some(note) = notes.last_mut() else {
            continue;
        };

        if let Some(value) = line.strip_prefix("Length=") {
            note.length = note.length.or_else(|| leading_digits(value));
        } else if let Some(value) = line.strip_prefix("Lyric=") {
            if note.lyric.is_none() && !value.is_empty() {
                note.lyric = Some(value.to_string());
            }
        } else if let Some(value) = line.strip_prefix("NoteNum=") {
            note.note_num = note.note_num.or_else(|| leading_digits(value));
        }
    }

    debug!(notes = notes.len(), tempo = ?tempo, "parsed UST sequence");

    let labels = notes.iter().map(|note| note_to_label(note, tempo)).collect();

    Ok(SynthRequest {
        labels,
        params: SynthParams {
            pitch_max: Some(UST_PITCH_MAX),
            pitch_min: Some(UST_PITCH_MIN),
            ..SynthParams::default()
        },
    })
}

fn parse_tempo(value: &str) -> LabelResult<f64> {
    match value.trim().parse::<f64>() {
        Ok(bpm) if bpm.is_finite() && bpm > 0.0 => Ok(bpm),
        _ => Err(LabelError::invalid_sequence(format!(
            "tempo must be a positive number, got '{}'",
            value
        ))),
    }
}

fn leading_digits(value: &str) -> Option<u32> {
    let end = value
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn note_to_label(note: &Note, tempo: Option<f64>) -> Label {
    let kana = match note.lyric.as_deref() {
        None | Some("R") => REST_KANA.to_string(),
        Some(lyric) => {
            let kana = katakana_only(&hiragana_to_katakana(lyric));
            if kana.is_empty() {
                REST_KANA.to_string()
            } else {
                kana
            }
        }
    };

    let accent = match note.note_num {
        Some(num) if NOTE_RANGE.contains(&num) => midi_to_frequency(num) / UST_PITCH_MAX,
        _ => 0.0,
    };

    let length = match (note.length, tempo) {
        (Some(ticks), Some(bpm)) => (60.0 * 1000.0 / bpm) * (ticks as f64 / TICKS_PER_BEAT),
        _ => 0.0,
    };

    Label::new(kana, length, accent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "[#VERSION]\r\n\
UST Version1.2\r\n\
[#SETTING]\r\n\
Tempo=120.00\r\n\
Tracks=1\r\n\
[#0000]\r\n\
Length=480\r\n\
Lyric=あ\r\n\
NoteNum=69\r\n\
[#0001]\r\n\
Length=240\r\n\
Lyric=R\r\n\
NoteNum=60\r\n\
[#0002]\r\n\
Length=960\r\n\
Lyric=きゃ\r\n\
NoteNum=81\r\n\
[#TRACKEND]\r\n";

    #[test]
    fn test_import_sample() {
        let request = import_ust(SAMPLE).unwrap();
        assert_eq!(
            request.labels,
            vec![
                Label::new("ア", 500.0, 440.0 / 5000.0),
                Label::new("、", 250.0, midi_to_frequency(60) / 5000.0),
                Label::new("キャ", 1000.0, 880.0 / 5000.0),
            ]
        );
        assert_eq!(request.params.pitch_max, Some(5000.0));
        assert_eq!(request.params.pitch_min, Some(0.0));
        assert_eq!(request.params.speed, 1.0);
        assert_eq!(request.params.volume, 0.5);
    }

    #[test]
    fn test_shift_jis_lyrics_decode() {
        // Tempo=120, one note with the lyric か (0x82 0xA9 in Shift_JIS)
        let bytes: &[u8] = b"[#SETTING]\r\nTempo=120\r\n[#0000]\r\nLength=480\r\nLyric=\x82\xa9\r\nNoteNum=69\r\n";
        assert_eq!(decode_ust(bytes), "[#SETTING]\r\nTempo=120\r\n[#0000]\r\nLength=480\r\nLyric=か\r\nNoteNum=69\r\n");

        let request = import_ust_bytes(bytes).unwrap();
        assert_eq!(request.labels, vec![Label::new("カ", 500.0, 440.0 / 5000.0)]);
    }

    #[test]
    fn test_utf8_bytes_pass_through() {
        let request = import_ust_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(request.labels.len(), 3);
        assert_eq!(request.labels[2].kana, "キャ");
        assert!(matches!(decode_ust(SAMPLE.as_bytes()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_missing_fields_default() {
        let request = import_ust("[#0000]\nLyric=xyz\n[#0001]\nNoteNum=5\n").unwrap();
        assert_eq!(
            request.labels,
            vec![Label::new("、", 0.0, 0.0), Label::new("、", 0.0, 0.0)]
        );
    }

    #[test]
    fn test_high_notes_clamp_accent() {
        let request = import_ust("[#SETTING]\nTempo=60\n[#0000]\nLength=480\nNoteNum=116\n").unwrap();
        assert_eq!(request.labels[0].accent, 1.0);
        assert_eq!(request.labels[0].length, 1000.0);
    }

    #[test]
    fn test_invalid_tempo() {
        let err = import_ust("[#SETTING]\nTempo=0\n").unwrap_err();
        assert!(matches!(err, LabelError::InvalidSequence { .. }));
    }

    #[test]
    fn test_midi_to_frequency() {
        assert!((midi_to_frequency(69) - 440.0).abs() < 1e-9);
        assert!((midi_to_frequency(21) - 27.5).abs() < 1e-9);
    }
}
