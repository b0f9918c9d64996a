//! Segment timing resolution.
//!
//! A kana entry's segments are resolved against the label's duration in one
//! left-to-right fold. The fold state is the time still unclaimed by earlier
//! segments: each explicit segment consumes `length - overlap` of it, and the
//! fill segment takes whatever is left.

use poino_spec::{LengthSpec, SegmentLength, VoicePhonemeSegment};
use tracing::warn;

/// A voice segment with every length resolved to milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSegment<'a> {
    /// Phoneme id.
    pub phoneme: &'a str,
    /// Segment length in milliseconds.
    pub length_ms: f64,
    /// Segment volume.
    pub volume: f64,
    /// Fade-in length in milliseconds.
    pub fade_in_ms: f64,
    /// Fade-out length in milliseconds.
    pub fade_out_ms: f64,
    /// Overlap into the next segment in milliseconds.
    pub overlap_ms: f64,
}

/// Resolves segment lengths, fades and overlaps for one label.
///
/// Explicit lengths are divided by `speed`. The fill segment receives the
/// time left after the preceding segments, floored at zero.
pub fn resolve_segments<'a>(
    segments: &'a [VoicePhonemeSegment],
    label_ms: f64,
    speed: f64,
) -> Vec<ResolvedSegment<'a>> {
    let mut resolved = Vec::with_capacity(segments.len());

    segments.iter().fold(label_ms, |remaining, segment| {
        let length_ms = match segment.length {
            SegmentLength::Fixed(ms) => ms / speed,
            SegmentLength::Fill => remaining,
        };

        let (fade_in_ms, fade_out_ms) = match &segment.fade {
            Some(fade) => (
                resolve_spec(&fade.fade_in, length_ms, &segment.phoneme, "fade in"),
                resolve_spec(&fade.fade_out, length_ms, &segment.phoneme, "fade out"),
            ),
            None => (0.0, 0.0),
        };
        let overlap_ms = segment
            .overlap
            .as_deref()
            .map(|spec| resolve_spec(spec, length_ms, &segment.phoneme, "overlap"))
            .unwrap_or(0.0);

        resolved.push(ResolvedSegment {
            phoneme: &segment.phoneme,
            length_ms,
            volume: segment.volume,
            fade_in_ms,
            fade_out_ms,
            overlap_ms,
        });

        match segment.length {
            SegmentLength::Fixed(_) => (remaining - (length_ms - overlap_ms)).max(0.0),
            SegmentLength::Fill => 0.0,
        }
    });

    resolved
}

fn resolve_spec(spec: &str, length_ms: f64, phoneme: &str, what: &str) -> f64 {
    match LengthSpec::parse(spec) {
        Some(parsed) => parsed.resolve(length_ms),
        None => {
            warn!(phoneme, spec, what, "unparseable length spec, using 0");
            0.0
        }
    }
}
