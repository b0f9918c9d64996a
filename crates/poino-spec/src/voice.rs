//! Voice definition types.
//!
//! A voice maps kana text to an ordered list of phoneme segments and maps each
//! phoneme id to a spectral envelope. The document format is JSON:
//!
//! ```json
//! {
//!   "id": "laychie",
//!   "name": "Laychie",
//!   "ruby": "れいちぇ",
//!   "icon": "data:image/png;base64,...",
//!   "pitch": { "min": 80.0, "max": 240.0 },
//!   "phonemes": { "a": [[0.0, 1.2], [10.0, 0.4]] },
//!   "voices": {
//!     "ア": [{ "phoneme": "a", "length": -1, "volume": 1.0,
//!              "fade": { "in": "10ms", "out": "20%" }, "overlap": "5ms" }]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Wire value that marks a fill segment.
pub const FILL_SENTINEL: f64 = -1.0;

/// Pitch bounds of a voice in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchRange {
    /// Lowest fundamental frequency in Hz.
    pub min: f64,
    /// Highest fundamental frequency in Hz.
    pub max: f64,
}

/// One control point of a spectral envelope.
///
/// Serialized as a two-element array `[ratio, log_magnitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct EnvelopePoint {
    /// Frequency ratio; multiplied by 100 to get Hz.
    pub ratio: f64,
    /// Base-10 log magnitude at this frequency.
    pub log_magnitude: f64,
}

impl EnvelopePoint {
    /// Creates a new control point.
    pub fn new(ratio: f64, log_magnitude: f64) -> Self {
        Self {
            ratio,
            log_magnitude,
        }
    }
}

impl From<(f64, f64)> for EnvelopePoint {
    fn from((ratio, log_magnitude): (f64, f64)) -> Self {
        Self::new(ratio, log_magnitude)
    }
}

impl From<EnvelopePoint> for (f64, f64) {
    fn from(point: EnvelopePoint) -> Self {
        (point.ratio, point.log_magnitude)
    }
}

/// Ordered control points describing a phoneme's spectral shape.
pub type SpectralEnvelope = Vec<EnvelopePoint>;

/// Length of a voice segment.
///
/// Serialized as a number; `-1` is the fill sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum SegmentLength {
    /// Explicit length in milliseconds at speed 1.0.
    Fixed(f64),
    /// Consumes whatever remains of the label's duration.
    Fill,
}

impl SegmentLength {
    /// Returns true for the fill sentinel.
    pub fn is_fill(&self) -> bool {
        matches!(self, SegmentLength::Fill)
    }
}

impl From<f64> for SegmentLength {
    fn from(value: f64) -> Self {
        if value == FILL_SENTINEL {
            SegmentLength::Fill
        } else {
            SegmentLength::Fixed(value)
        }
    }
}

impl From<SegmentLength> for f64 {
    fn from(length: SegmentLength) -> Self {
        match length {
            SegmentLength::Fixed(ms) => ms,
            SegmentLength::Fill => FILL_SENTINEL,
        }
    }
}

/// Fade-in/fade-out specs of a segment, e.g. `"10ms"` or `"25%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeSpec {
    /// Fade-in spec.
    #[serde(rename = "in")]
    pub fade_in: String,
    /// Fade-out spec.
    #[serde(rename = "out")]
    pub fade_out: String,
}

/// One phoneme of a kana entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicePhonemeSegment {
    /// Phoneme id, a key of [`VoiceModel::phonemes`].
    pub phoneme: String,
    /// Segment length.
    pub length: SegmentLength,
    /// Segment volume multiplier.
    pub volume: f64,
    /// Optional fade specs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade: Option<FadeSpec>,
    /// Optional overlap spec into the next segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<String>,
}

/// A length expressed either in milliseconds or as a percentage of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthSpec {
    /// Absolute milliseconds (`"10ms"`).
    Millis(u32),
    /// Percentage of the segment's own length (`"25%"`).
    Percent(u32),
}

impl LengthSpec {
    /// Parses a spec ending in `ms` or `%`.
    ///
    /// The numeric part is the run of ASCII digits immediately before the
    /// suffix, so `"1.5ms"` reads as 5 ms. Returns `None` when no digits
    /// precede a recognized suffix.
    pub fn parse(spec: &str) -> Option<Self> {
        let (head, percent) = if let Some(head) = spec.strip_suffix("ms") {
            (head, false)
        } else if let Some(head) = spec.strip_suffix('%') {
            (head, true)
        } else {
            return None;
        };

        let digits_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        let value: u32 = head[digits_start..].parse().ok()?;

        Some(if percent {
            LengthSpec::Percent(value)
        } else {
            LengthSpec::Millis(value)
        })
    }

    /// Resolves the spec to milliseconds against a segment length.
    pub fn resolve(&self, segment_ms: f64) -> f64 {
        match *self {
            LengthSpec::Millis(ms) => ms as f64,
            LengthSpec::Percent(pct) => (segment_ms * pct as f64 / 100.0).round(),
        }
    }
}

/// A voice definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModel {
    /// Stable voice id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Reading of the name.
    #[serde(default)]
    pub ruby: String,
    /// Icon as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Pitch bounds.
    pub pitch: PitchRange,
    /// Spectral envelope per phoneme id.
    #[serde(default)]
    pub phonemes: BTreeMap<String, SpectralEnvelope>,
    /// Ordered phoneme segments per kana text.
    #[serde(default)]
    pub voices: BTreeMap<String, Vec<VoicePhonemeSegment>>,
}

impl VoiceModel {
    /// Parses a voice from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the voice to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Looks up the envelope of a phoneme.
    pub fn envelope(&self, phoneme: &str) -> Option<&[EnvelopePoint]> {
        self.phonemes.get(phoneme).map(Vec::as_slice)
    }

    /// Looks up the segment recipe of a kana entry.
    pub fn segments(&self, kana: &str) -> Option<&[VoicePhonemeSegment]> {
        self.voices.get(kana).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VOICE_JSON: &str = r#"{
        "id": "test",
        "name": "Test",
        "ruby": "てすと",
        "pitch": { "min": 80, "max": 240 },
        "phonemes": { "a": [[0, 0.5], [10, 0.1]] },
        "voices": {
            "ア": [
                { "phoneme": "a", "length": -1, "volume": 1,
                  "fade": { "in": "10ms", "out": "20%" }, "overlap": "5ms" }
            ],
            "カ": [
                { "phoneme": "k", "length": 30, "volume": 0.5 },
                { "phoneme": "a", "length": -1, "volume": 1 }
            ]
        }
    }"#;

    #[test]
    fn test_voice_from_json() {
        let voice = VoiceModel::from_json(VOICE_JSON).unwrap();
        assert_eq!(voice.id, "test");
        assert_eq!(voice.icon, None);
        assert_eq!(voice.pitch, PitchRange { min: 80.0, max: 240.0 });
        assert_eq!(
            voice.envelope("a").unwrap(),
            &[EnvelopePoint::new(0.0, 0.5), EnvelopePoint::new(10.0, 0.1)]
        );

        let ka = voice.segments("カ").unwrap();
        assert_eq!(ka[0].length, SegmentLength::Fixed(30.0));
        assert!(ka[1].length.is_fill());
        assert_eq!(ka[0].fade, None);

        let a = voice.segments("ア").unwrap();
        let fade = a[0].fade.as_ref().unwrap();
        assert_eq!(fade.fade_in, "10ms");
        assert_eq!(fade.fade_out, "20%");
        assert_eq!(a[0].overlap.as_deref(), Some("5ms"));
    }

    #[test]
    fn test_voice_roundtrip_keeps_fill_sentinel() {
        let voice = VoiceModel::from_json(VOICE_JSON).unwrap();
        let json = voice.to_json_pretty().unwrap();
        assert!(json.contains("-1.0"));
        assert_eq!(VoiceModel::from_json(&json).unwrap(), voice);
    }

    #[test]
    fn test_unknown_lookups() {
        let voice = VoiceModel::from_json(VOICE_JSON).unwrap();
        assert!(voice.envelope("zz").is_none());
        assert!(voice.segments("ン").is_none());
    }

    #[test]
    fn test_length_spec_parse() {
        assert_eq!(LengthSpec::parse("10ms"), Some(LengthSpec::Millis(10)));
        assert_eq!(LengthSpec::parse("25%"), Some(LengthSpec::Percent(25)));
        assert_eq!(LengthSpec::parse("1.5ms"), Some(LengthSpec::Millis(5)));
        assert_eq!(LengthSpec::parse("ms"), None);
        assert_eq!(LengthSpec::parse("10"), None);
        assert_eq!(LengthSpec::parse("10s"), None);
        assert_eq!(LengthSpec::parse(""), None);
    }

    #[test]
    fn test_length_spec_resolve() {
        assert_eq!(LengthSpec::Millis(12).resolve(1000.0), 12.0);
        assert_eq!(LengthSpec::Percent(25).resolve(90.0), 23.0);
        assert_eq!(LengthSpec::Percent(50).resolve(0.0), 0.0);
    }
}
