//! CLI command implementations

pub mod import_ust;
pub mod json_output;
pub mod labels;
pub mod synth;
pub mod validate_voice;
