//! Label and phoneme alignment types.
//!
//! A [`PhonemeAlignment`] is one timed row of the external analyzer's output.
//! A [`Label`] is the unit the synthesizer consumes: kana text, a duration in
//! milliseconds, and a normalized pitch accent.

use serde::{Deserialize, Serialize};

/// Number of analyzer time units (100 ns ticks) per millisecond.
pub const UNITS_PER_MS: f64 = 10_000.0;

/// One timed phoneme from the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeAlignment {
    /// Start time in 100 ns ticks.
    pub start: u64,
    /// End time in 100 ns ticks.
    pub end: u64,
    /// Phoneme symbol (e.g. "k", "a", "cl", "pau").
    pub phoneme: String,
    /// Raw accent value; `None` marks silence or a pause.
    pub accent: Option<i32>,
}

impl PhonemeAlignment {
    /// Creates a new alignment row.
    pub fn new(start: u64, end: u64, phoneme: impl Into<String>, accent: Option<i32>) -> Self {
        Self {
            start,
            end,
            phoneme: phoneme.into(),
            accent,
        }
    }

    /// Duration rounded to whole milliseconds.
    pub fn length_ms(&self) -> f64 {
        (self.end.saturating_sub(self.start) as f64 / UNITS_PER_MS).round()
    }
}

/// A pronunciation unit: kana text, duration and normalized accent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Katakana text of the unit.
    pub kana: String,
    /// Duration in milliseconds (>= 0).
    pub length: f64,
    /// Relative pitch height in [0, 1].
    pub accent: f64,
}

impl Label {
    /// Creates a label, clamping duration to >= 0 and accent to [0, 1].
    ///
    /// Non-finite durations and accents collapse to 0.
    pub fn new(kana: impl Into<String>, length: f64, accent: f64) -> Self {
        let length = if length.is_finite() { length.max(0.0) } else { 0.0 };
        let accent = if accent.is_finite() {
            accent.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            kana: kana.into(),
            length,
            accent,
        }
    }

    /// Returns a copy of this label normalized to the documented ranges.
    pub fn normalized(&self) -> Self {
        Self::new(self.kana.clone(), self.length, self.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alignment_length_rounds_to_ms() {
        let row = PhonemeAlignment::new(0, 200_000, "a", Some(0));
        assert_eq!(row.length_ms(), 20.0);

        let row = PhonemeAlignment::new(100, 15_100, "k", None);
        assert_eq!(row.length_ms(), 2.0);
    }

    #[test]
    fn test_alignment_length_saturates_on_reversed_times() {
        let row = PhonemeAlignment::new(500, 100, "a", Some(1));
        assert_eq!(row.length_ms(), 0.0);
    }

    #[test]
    fn test_label_new_clamps() {
        let label = Label::new("ア", -5.0, 1.5);
        assert_eq!(label, Label::new("ア", 0.0, 1.0));

        let label = Label::new("イ", f64::NAN, f64::INFINITY);
        assert_eq!(label.length, 0.0);
        assert_eq!(label.accent, 0.0);
    }

    #[test]
    fn test_label_serde_wire_names() {
        let label = Label::new("カ", 120.0, 0.5);
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, r#"{"kana":"カ","length":120.0,"accent":0.5}"#);

        let parsed: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, label);
    }
}
