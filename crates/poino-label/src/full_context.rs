//! Full-context label parsing.
//!
//! The analyzer writes one line per phoneme:
//!
//! ```text
//! 0 2050000 xx^xx-sil+k=o/A:xx+xx+xx/B:xx-xx_xx/...
//! 2050000 2750000 xx^sil-k+o=N/A:-4+1+5/B:xx-xx_xx/...
//! ```
//!
//! Only the two times, the current phoneme (between `-` and `+`) and the first
//! field after `/A:` are used. Lines that do not have this shape are skipped.

use std::sync::OnceLock;

use poino_spec::PhonemeAlignment;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{LabelError, LabelResult};

const LINE_PATTERN: &str =
    r"(?i)^([0-9]+) ([0-9]+) [a-z]+\^[a-z]+-([a-z]+)\+[a-z]+=[a-z]+/A:(-*[0-9|a-z]+)";

static LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| Regex::new(LINE_PATTERN).expect("invalid regex pattern"))
}

/// Parses analyzer output into alignment rows, in input order.
///
/// # Errors
/// Returns [`LabelError::InvalidTime`] when a time does not fit in `u64` and
/// [`LabelError::ReversedTimes`] when a row ends before it starts.
pub fn parse_full_context(text: &str) -> LabelResult<Vec<PhonemeAlignment>> {
    let regex = line_regex();
    let mut rows = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let Some(caps) = regex.captures(line) else {
            if !line.trim().is_empty() {
                debug!(line = line_no, "skipping unrecognized label line");
            }
            continue;
        };

        let start = parse_time(&caps[1], line_no)?;
        let end = parse_time(&caps[2], line_no)?;
        if end < start {
            return Err(LabelError::ReversedTimes {
                line: line_no,
                start,
                end,
            });
        }

        let phoneme = caps[3].to_string();
        let accent = parse_accent(&caps[4], line_no);
        rows.push(PhonemeAlignment::new(start, end, phoneme, accent));
    }

    debug!(rows = rows.len(), "parsed full-context labels");
    Ok(rows)
}

fn parse_time(value: &str, line: usize) -> LabelResult<u64> {
    value.parse().map_err(|_| LabelError::InvalidTime {
        line,
        value: value.to_string(),
    })
}

fn parse_accent(field: &str, line: usize) -> Option<i32> {
    if field.eq_ignore_ascii_case("xx") {
        return None;
    }

    match field.parse::<i32>() {
        Ok(accent) => Some(accent),
        Err(_) => {
            warn!(line, field, "unparseable accent field, treating as pause");
            None
        }
    }
}
