//! Label sequence to waveform synthesis.
//!
//! Each label is looked up in the voice by kana. Its segments are resolved
//! against the label's duration, realized one by one from their phoneme
//! envelopes, faded, and joined with overlap-add. Labels are then concatenated
//! in order.

use poino_spec::{validate_voice, EngineConfig, Label, SynthParams, VoiceModel};
use tracing::{debug, info};

use crate::error::{AudioError, AudioResult};
use crate::fade::apply_fade;
use crate::spectral::envelope_to_wave;
use crate::timing::resolve_segments;

/// Kana text of the long vowel mark.
pub const LONG_VOWEL: &str = "ー";

/// Synthesizes label sequences with a fixed engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer {
    config: EngineConfig,
}

/// A label ready for synthesis.
#[derive(Debug, Clone, PartialEq)]
struct PreparedLabel<'a> {
    kana: &'a str,
    length: f64,
    accent: f64,
    /// Folded into the previous label; produces no samples.
    merged: bool,
}

impl Synthesizer {
    /// Creates a synthesizer.
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidSampleRate`] for a zero sample rate.
    pub fn new(config: EngineConfig) -> AudioResult<Self> {
        if config.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: config.sample_rate,
            });
        }
        Ok(Self { config })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Synthesizes `labels` with `voice`.
    pub fn synthesize(
        &self,
        labels: &[Label],
        voice: &VoiceModel,
        params: &SynthParams,
    ) -> AudioResult<Vec<f32>> {
        self.synthesize_with_progress(labels, voice, params, |_| {})
    }

    /// Synthesizes `labels` with `voice`, reporting progress.
    ///
    /// `progress` receives `(i + 1) / labels.len()` after label `i` is done,
    /// in label order.
    ///
    /// # Errors
    /// Fails on a non-positive speed, a negative volume, non-finite pitch
    /// bounds, or a voice that does not pass validation.
    pub fn synthesize_with_progress<F>(
        &self,
        labels: &[Label],
        voice: &VoiceModel,
        params: &SynthParams,
        mut progress: F,
    ) -> AudioResult<Vec<f32>>
    where
        F: FnMut(f64),
    {
        let (pitch_max, pitch_min) = check_params(params, voice)?;

        let validation = validate_voice(voice);
        if !validation.is_ok() {
            return Err(AudioError::InvalidVoice {
                voice: voice.id.clone(),
                errors: validation.errors,
            });
        }

        let prepared = merge_long_vowels(labels);
        let total = prepared.len();
        let mut samples: Vec<f64> = Vec::new();

        for (i, label) in prepared.iter().enumerate() {
            if !label.merged {
                let wave = self.synthesize_label(label, voice, params, pitch_max, pitch_min);
                debug!(
                    index = i,
                    kana = label.kana,
                    length_ms = label.length,
                    samples = wave.len(),
                    "synthesized label"
                );
                samples.extend(wave);
            }
            progress((i + 1) as f64 / total as f64);
        }

        info!(
            labels = total,
            samples = samples.len(),
            sample_rate = self.config.sample_rate,
            "synthesis complete"
        );

        Ok(samples
            .into_iter()
            .map(|s| if s.is_nan() { 0.0 } else { s as f32 })
            .collect())
    }

    fn synthesize_label(
        &self,
        label: &PreparedLabel<'_>,
        voice: &VoiceModel,
        params: &SynthParams,
        pitch_max: f64,
        pitch_min: f64,
    ) -> Vec<f64> {
        let Some(segments) = voice.segments(label.kana) else {
            debug!(kana = label.kana, "unknown kana, rendering silence");
            return self.silence(self.config.ms_to_samples(label.length));
        };

        let f0 = pitch_min + (pitch_max - pitch_min) * label.accent;
        let mut wave: Vec<f64> = Vec::new();
        let mut prev_overlap = 0usize;

        for segment in resolve_segments(segments, label.length, params.speed) {
            let Some(envelope) = voice.envelope(segment.phoneme) else {
                debug!(phoneme = segment.phoneme, "unknown phoneme, rendering silence");
                let len = self
                    .config
                    .ms_to_samples(segment.length_ms)
                    .saturating_sub(prev_overlap);
                wave.extend(self.silence(len));
                prev_overlap = self.config.ms_to_samples(segment.overlap_ms);
                continue;
            };

            let amplitude = segment.volume * params.volume;
            let mut faded =
                envelope_to_wave(envelope, f0, segment.length_ms, amplitude, &self.config);
            apply_fade(
                &mut faded,
                self.config.ms_to_samples(segment.fade_in_ms),
                self.config.ms_to_samples(segment.fade_out_ms),
            );

            overlap_add(&mut wave, &faded, prev_overlap);
            prev_overlap = self.config.ms_to_samples(segment.overlap_ms);
        }

        wave
    }

    fn silence(&self, len: usize) -> Vec<f64> {
        vec![0.0; len]
    }
}

/// Sums `next` into `wave` starting `overlap` samples before its end and
/// appends whatever extends past the current end.
///
/// The window is clamped to the length of `wave`. A `next` shorter than the
/// window starts at the window's start and leaves the rest of the tail as is.
pub fn overlap_add(wave: &mut Vec<f64>, next: &[f64], overlap: usize) {
    let start = wave.len() - overlap.min(wave.len());
    let k = (wave.len() - start).min(next.len());

    for (dst, src) in wave[start..start + k].iter_mut().zip(&next[..k]) {
        *dst += src;
    }
    wave.extend_from_slice(&next[k..]);
}

fn check_params(params: &SynthParams, voice: &VoiceModel) -> AudioResult<(f64, f64)> {
    if !params.speed.is_finite() || params.speed <= 0.0 {
        return Err(AudioError::invalid_param(
            "speed",
            format!("must be a finite number greater than 0, got {}", params.speed),
        ));
    }
    if !params.volume.is_finite() || params.volume < 0.0 {
        return Err(AudioError::invalid_param(
            "volume",
            format!("must be a finite number of at least 0, got {}", params.volume),
        ));
    }

    let (pitch_max, pitch_min) = params.pitch_bounds(&voice.pitch);
    if !pitch_max.is_finite() {
        return Err(AudioError::invalid_param("pitchMax", "must be finite"));
    }
    if !pitch_min.is_finite() {
        return Err(AudioError::invalid_param("pitchMin", "must be finite"));
    }

    Ok((pitch_max, pitch_min))
}

/// Folds every long vowel mark into the label before it.
///
/// Runs from the end so a run of marks accumulates into the first real label.
/// A mark at index 0 has nothing to merge into and is kept as is.
fn merge_long_vowels(labels: &[Label]) -> Vec<PreparedLabel<'_>> {
    let mut prepared: Vec<PreparedLabel<'_>> = labels
        .iter()
        .map(|label| {
            let normalized = label.normalized();
            PreparedLabel {
                kana: label.kana.as_str(),
                length: normalized.length,
                accent: normalized.accent,
                merged: false,
            }
        })
        .collect();

    for i in (1..prepared.len()).rev() {
        if prepared[i].kana == LONG_VOWEL {
            let length = prepared[i].length;
            prepared[i - 1].length += length;
            prepared[i].length = 0.0;
            prepared[i].merged = true;
        }
    }

    prepared
}

#[cfg(test)]
mod tests {
    use super::*;
    use poino_spec::{
        EnvelopePoint, FadeSpec, PitchRange, SegmentLength, VoicePhonemeSegment,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn segment(phoneme: &str, length: SegmentLength) -> VoicePhonemeSegment {
        VoicePhonemeSegment {
            phoneme: phoneme.to_string(),
            length,
            volume: 1.0,
            fade: None,
            overlap: None,
        }
    }

    fn test_voice() -> VoiceModel {
        let envelope = vec![
            EnvelopePoint::new(0.0, 1.0),
            EnvelopePoint::new(20.0, 0.5),
            EnvelopePoint::new(480.0, 0.0),
        ];

        let mut phonemes = BTreeMap::new();
        phonemes.insert("a".to_string(), envelope.clone());
        phonemes.insert("k".to_string(), envelope);

        let mut k = segment("k", SegmentLength::Fixed(30.0));
        k.overlap = Some("10ms".to_string());
        let mut a = segment("a", SegmentLength::Fill);
        a.fade = Some(FadeSpec {
            fade_in: "5ms".to_string(),
            fade_out: "10%".to_string(),
        });

        let mut voices = BTreeMap::new();
        voices.insert("ア".to_string(), vec![segment("a", SegmentLength::Fill)]);
        voices.insert("カ".to_string(), vec![k, a]);
        voices.insert(
            "ス".to_string(),
            vec![segment("s", SegmentLength::Fixed(20.0)), segment("a", SegmentLength::Fill)],
        );

        VoiceModel {
            id: "test".to_string(),
            name: "Test".to_string(),
            ruby: "てすと".to_string(),
            icon: None,
            pitch: PitchRange {
                min: 100.0,
                max: 300.0,
            },
            phonemes,
            voices,
        }
    }

    fn synth() -> Synthesizer {
        Synthesizer::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_single_label_end_to_end() {
        let params = SynthParams::default();
        let samples = synth()
            .synthesize(&[Label::new("ア", 100.0, 0.5)], &test_voice(), &params)
            .unwrap();

        assert_eq!(samples.len(), 4800);
        let limit = params.volume as f32 + 1e-6;
        assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= limit));
        assert!(samples.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_unknown_kana_is_silence() {
        let samples = synth()
            .synthesize(&[Label::new("ン", 50.0, 0.5)], &test_voice(), &SynthParams::default())
            .unwrap();
        assert_eq!(samples, vec![0.0; 2400]);
    }

    #[test]
    fn test_unknown_phoneme_is_silence() {
        let samples = synth()
            .synthesize(&[Label::new("ス", 100.0, 0.5)], &test_voice(), &SynthParams::default())
            .unwrap();

        assert_eq!(samples.len(), 4800);
        assert!(samples[..960].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_overlap_joined_length() {
        // k: 30 ms (1440 samples), a: fill 100 - (30 - 10) = 80 ms (3840),
        // joined with a 10 ms (480 sample) overlap.
        let samples = synth()
            .synthesize(&[Label::new("カ", 100.0, 0.0)], &test_voice(), &SynthParams::default())
            .unwrap();
        assert_eq!(samples.len(), 1440 + 3840 - 480);
    }

    #[test]
    fn test_long_vowel_merges_into_previous() {
        let labels = vec![
            Label::new("ア", 50.0, 0.5),
            Label::new("ー", 30.0, 0.5),
            Label::new("ー", 20.0, 0.5),
        ];
        let samples = synth()
            .synthesize(&labels, &test_voice(), &SynthParams::default())
            .unwrap();
        assert_eq!(samples.len(), 4800);
    }

    #[test]
    fn test_leading_long_vowel_is_kept() {
        let labels = [Label::new("ー", 30.0, 0.5), Label::new("ア", 10.0, 0.0)];
        let prepared = merge_long_vowels(&labels);
        assert!(!prepared[0].merged);
        assert_eq!(prepared[0].length, 30.0);
    }

    #[test]
    fn test_progress_reported_in_order() {
        let labels = vec![
            Label::new("ア", 10.0, 0.5),
            Label::new("ー", 10.0, 0.5),
            Label::new("ン", 10.0, 0.5),
            Label::new("カ", 60.0, 1.0),
        ];
        let mut reported = Vec::new();
        synth()
            .synthesize_with_progress(&labels, &test_voice(), &SynthParams::default(), |p| {
                reported.push(p)
            })
            .unwrap();
        assert_eq!(reported, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_empty_labels() {
        let samples = synth()
            .synthesize(&[], &test_voice(), &SynthParams::default())
            .unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_speed_shortens_explicit_segments() {
        let params = SynthParams {
            speed: 2.0,
            ..SynthParams::default()
        };
        // k: 15 ms (720), a: fill 100 - (15 - 10) = 95 ms (4560), overlap 480.
        let samples = synth()
            .synthesize(&[Label::new("カ", 100.0, 0.0)], &test_voice(), &params)
            .unwrap();
        assert_eq!(samples.len(), 720 + 4560 - 480);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let voice = test_voice();
        let labels = [Label::new("ア", 10.0, 0.5)];

        for params in [
            SynthParams { speed: 0.0, ..SynthParams::default() },
            SynthParams { speed: f64::NAN, ..SynthParams::default() },
            SynthParams { volume: -0.1, ..SynthParams::default() },
            SynthParams { pitch_max: Some(f64::INFINITY), ..SynthParams::default() },
            SynthParams { pitch_min: Some(f64::NAN), ..SynthParams::default() },
        ] {
            let err = synth().synthesize(&labels, &voice, &params).unwrap_err();
            assert!(matches!(err, AudioError::InvalidParameter { .. }), "{:?}", params);
        }
    }

    #[test]
    fn test_invalid_sample_rate_rejected() {
        let err = Synthesizer::new(EngineConfig::with_sample_rate(0)).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate { rate: 0 }));
    }

    #[test]
    fn test_invalid_voice_rejected() {
        let mut voice = test_voice();
        voice
            .voices
            .insert("イ".to_string(), vec![segment("a", SegmentLength::Fill), segment("a", SegmentLength::Fill)]);

        let err = synth()
            .synthesize(&[Label::new("ア", 10.0, 0.5)], &voice, &SynthParams::default())
            .unwrap_err();
        assert!(matches!(err, AudioError::InvalidVoice { .. }));
    }

    #[test]
    fn test_overlap_add_clamps() {
        let mut wave = vec![1.0, 1.0];
        overlap_add(&mut wave, &[1.0, 2.0, 3.0], 5);
        assert_eq!(wave, vec![2.0, 3.0, 3.0]);

        let mut wave = vec![];
        overlap_add(&mut wave, &[1.0, 2.0], 1);
        assert_eq!(wave, vec![1.0, 2.0]);
    }

    #[test]
    fn test_overlap_add_short_segment_starts_at_window() {
        let mut wave = vec![1.0; 4];
        overlap_add(&mut wave, &[5.0], 3);
        assert_eq!(wave, vec![1.0, 6.0, 1.0, 1.0]);

        let mut wave = vec![1.0; 4];
        overlap_add(&mut wave, &[5.0, 5.0], 3);
        assert_eq!(wave, vec![1.0, 6.0, 6.0, 1.0]);

        let mut wave = vec![1.0; 4];
        overlap_add(&mut wave, &[5.0, 5.0, 5.0, 5.0], 3);
        assert_eq!(wave, vec![1.0, 6.0, 6.0, 6.0, 5.0]);
    }

    #[test]
    fn test_overlap_add_without_overlap_appends() {
        let mut wave = vec![1.0, 1.0, 1.0];
        overlap_add(&mut wave, &[5.0], 0);
        assert_eq!(wave, vec![1.0, 1.0, 1.0, 5.0]);
    }

    #[test]
    fn test_overlap_containment() {
        let a = vec![0.5; 100];
        let b = vec![0.25; 70];
        for overlap in [0, 10, 70, 200] {
            let mut joined = a.clone();
            overlap_add(&mut joined, &b, overlap);
            assert!(joined.len() <= a.len() + b.len());
        }
    }
}
