//! Grouping of alignment rows into labels.
//!
//! Rows are split into groups at pauses, at pitch drops and at recurring flat
//! plateaus. Each group is then bucketed by raw accent value; every bucket
//! becomes one [`Label`] whose accent is remapped to 0 or 1.

use poino_spec::{Label, PhonemeAlignment};
use tracing::debug;

use crate::kana::{romaji_to_kana, CONTINUATION_MARK};

/// Phoneme symbol of the glottal stop.
const GLOTTAL_STOP: &str = "cl";

/// One row inside a group, after length rounding.
#[derive(Debug, Clone, PartialEq)]
struct GroupEntry {
    phoneme: String,
    length: f64,
    accent: Option<i32>,
}

/// Trailing accent state used to detect group boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccentTracker {
    prev1: i32,
    prev2: i32,
}

impl Default for AccentTracker {
    fn default() -> Self {
        Self { prev1: 1, prev2: 1 }
    }
}

/// Why a row opens a new group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    None,
    Pause,
    PitchDrop,
    Plateau,
}

impl AccentTracker {
    fn boundary(&self, accent: Option<i32>) -> Boundary {
        match accent {
            None => Boundary::Pause,
            Some(a) if a == self.prev1 && a == self.prev2 => Boundary::Plateau,
            Some(a) if a <= 0 && self.prev1 >= 0 && a < self.prev1 => Boundary::PitchDrop,
            Some(_) => Boundary::None,
        }
    }

    fn advance(&mut self, accent: Option<i32>, phoneme: &str, boundary: Boundary) {
        match (accent, boundary) {
            (None, _) | (_, Boundary::Plateau) => *self = Self::default(),
            _ if phoneme == GLOTTAL_STOP => self.prev2 = 2,
            (Some(a), _) => {
                self.prev2 = self.prev1;
                self.prev1 = a;
            }
        }
    }
}

/// Extracts labels from analyzer rows, in chronological order.
///
/// The first and last rows are the analyzer's silence sentinels and are
/// dropped before grouping.
///
/// # Example
/// ```
/// use poino_label::extract_labels;
/// use poino_spec::PhonemeAlignment;
///
/// let rows = vec![
///     PhonemeAlignment::new(0, 100_000, "sil", None),
///     PhonemeAlignment::new(100_000, 900_000, "k", Some(0)),
///     PhonemeAlignment::new(900_000, 2_000_000, "a", Some(0)),
///     PhonemeAlignment::new(2_000_000, 2_100_000, "sil", None),
/// ];
/// let labels = extract_labels(&rows);
/// assert_eq!(labels.len(), 1);
/// assert_eq!(labels[0].kana, "カ");
/// assert_eq!(labels[0].length, 190.0);
/// assert_eq!(labels[0].accent, 1.0);
/// ```
pub fn extract_labels(rows: &[PhonemeAlignment]) -> Vec<Label> {
    extract_label_groups(rows).into_iter().flatten().collect()
}

/// Extracts labels grouped by boundary, in chronological order.
pub fn extract_label_groups(rows: &[PhonemeAlignment]) -> Vec<Vec<Label>> {
    let inner = match rows.len() {
        0..=2 => &[][..],
        n => &rows[1..n - 1],
    };

    let groups = split_groups(inner);
    debug!(rows = inner.len(), groups = groups.len(), "grouped alignment rows");

    groups
        .into_iter()
        .map(|mut group| {
            mark_continuations(&mut group);
            group_to_labels(&group)
        })
        .collect()
}

fn split_groups(rows: &[PhonemeAlignment]) -> Vec<Vec<GroupEntry>> {
    let mut groups: Vec<Vec<GroupEntry>> = Vec::new();
    let mut tracker = AccentTracker::default();

    for row in rows {
        let boundary = tracker.boundary(row.accent);
        if boundary != Boundary::None || groups.is_empty() {
            groups.push(Vec::new());
        }

        if let Some(group) = groups.last_mut() {
            group.push(GroupEntry {
                phoneme: row.phoneme.clone(),
                length: row.length_ms(),
                accent: row.accent,
            });
        }

        tracker.advance(row.accent, &row.phoneme, boundary);
    }

    groups
}

/// Replaces an immediately repeated phoneme with the continuation mark.
fn mark_continuations(group: &mut [GroupEntry]) {
    let mut prev: Option<String> = None;

    for entry in group.iter_mut() {
        if prev.as_deref() == Some(entry.phoneme.as_str()) {
            entry.phoneme = CONTINUATION_MARK.to_string();
        } else {
            prev = Some(entry.phoneme.clone());
        }
    }
}

/// Maps each distinct-accent bucket to 0 or 1.
///
/// If the zero-accent bucket comes first it alone is high. If it comes later,
/// every bucket before it is high and it and everything after are low. With no
/// zero-accent bucket everything is low.
pub fn remap_accents(accents: &[Option<i32>]) -> Vec<f64> {
    match accents.iter().position(|a| *a == Some(0)) {
        Some(0) => (0..accents.len())
            .map(|i| if i == 0 { 1.0 } else { 0.0 })
            .collect(),
        Some(zero) => (0..accents.len())
            .map(|i| if i < zero { 1.0 } else { 0.0 })
            .collect(),
        None => vec![0.0; accents.len()],
    }
}

fn group_to_labels(group: &[GroupEntry]) -> Vec<Label> {
    let mut buckets: Vec<Option<i32>> = Vec::new();
    for entry in group {
        if !buckets.contains(&entry.accent) {
            buckets.push(entry.accent);
        }
    }

    let remapped = remap_accents(&buckets);

    buckets
        .iter()
        .zip(remapped)
        .map(|(bucket, accent)| {
            let (romaji, length) = group
                .iter()
                .filter(|entry| entry.accent == *bucket)
                .fold((String::new(), 0.0), |(mut romaji, length), entry| {
                    romaji.push_str(&entry.phoneme);
                    (romaji, length + entry.length)
                });

            Label::new(romaji_to_kana(&romaji), length, accent)
        })
        .collect()
}
