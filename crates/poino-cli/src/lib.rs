//! poino CLI library.
//!
//! This crate provides the commands behind the `poino` binary: label
//! extraction from analyzer output, UST import, synthesis to WAV and voice
//! validation.

pub mod commands;
pub mod input;
pub mod logging;
