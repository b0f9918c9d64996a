//! poino label frontend
//!
//! This crate turns the external analyzer's phoneme alignment into the
//! [`Label`](poino_spec::Label) sequence the synthesizer consumes:
//!
//! - [`parse_full_context`] reads the analyzer's full-context label text
//! - [`extract_labels`] groups alignment rows and converts them to kana labels
//! - [`import_ust`] builds a request from an UTAU sequence instead
//!
//! # Example
//!
//! ```
//! use poino_label::labels_from_full_context;
//!
//! let text = "\
//! 0 100000 xx^xx-sil+k=a/A:xx+xx+xx
//! 100000 900000 xx^sil-k+a=sil/A:0+1+1
//! 900000 2000000 sil^k-a+sil=xx/A:0+1+1
//! 2000000 2100000 k^a-sil+xx=xx/A:xx+xx+xx
//! ";
//! let labels = labels_from_full_context(text).unwrap();
//! assert_eq!(labels[0].kana, "カ");
//! ```

pub mod error;
pub mod extract;
pub mod full_context;
pub mod kana;
pub mod ust;

pub use error::{LabelError, LabelResult};
pub use extract::{extract_label_groups, extract_labels, remap_accents};
pub use full_context::parse_full_context;
pub use kana::{romaji_to_kana, LONG_VOWEL_MARK};
pub use ust::{decode_ust, import_ust, import_ust_bytes};

use poino_spec::Label;

/// Parses full-context label text and extracts labels in one step.
pub fn labels_from_full_context(text: &str) -> LabelResult<Vec<Label>> {
    let rows = parse_full_context(text)?;
    Ok(extract_labels(&rows))
}

/// Parses full-context label text and extracts labels grouped by boundary.
pub fn label_groups_from_full_context(text: &str) -> LabelResult<Vec<Vec<Label>>> {
    let rows = parse_full_context(text)?;
    Ok(extract_label_groups(&rows))
}
