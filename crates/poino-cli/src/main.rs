//! poino CLI - Command-line interface for label extraction and synthesis
//!
//! This binary turns analyzer output or UTAU sequences into synthesis
//! requests and renders requests with a voice into WAV files.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use poino_cli::commands;
use poino_cli::commands::synth::SynthOptions;
use poino_cli::logging;

/// poino - Spectral envelope speech synthesis
#[derive(Parser)]
#[command(name = "poino")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug diagnostics to stderr (overridden by POINO_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract kana labels from analyzer full-context output
    Labels {
        /// Path to the full-context label file
        #[arg(short, long)]
        input: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Emit labels grouped by boundary
        #[arg(long)]
        groups: bool,
    },

    /// Convert an UTAU sequence (Shift_JIS or UTF-8) into a synthesis request
    ImportUst {
        /// Path to the UST file
        #[arg(short, long)]
        input: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render a synthesis request into a WAV file
    Synth {
        /// Path to the request JSON
        #[arg(short, long)]
        request: String,

        /// Path to the voice JSON
        #[arg(long)]
        voice: String,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Speed multiplier (overrides the request)
        #[arg(long)]
        speed: Option<f64>,

        /// Output volume (overrides the request)
        #[arg(long)]
        volume: Option<f64>,

        /// Pitch at accent 1.0 in Hz (overrides the request)
        #[arg(long)]
        pitch_max: Option<f64>,

        /// Pitch at accent 0.0 in Hz (overrides the request)
        #[arg(long)]
        pitch_min: Option<f64>,

        /// Output sample rate in Hz (default: 48000)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Size envelope buffers to the next power of two
        #[arg(long)]
        power_of_two: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a voice definition
    ValidateVoice {
        /// Path to the voice JSON
        #[arg(long)]
        voice: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Labels {
            input,
            output,
            groups,
        } => commands::labels::run(&input, output.as_deref(), groups),
        Commands::ImportUst { input, output } => {
            commands::import_ust::run(&input, output.as_deref())
        }
        Commands::Synth {
            request,
            voice,
            output,
            speed,
            volume,
            pitch_max,
            pitch_min,
            sample_rate,
            power_of_two,
            json,
        } => {
            let options = SynthOptions {
                request,
                voice,
                output,
                speed,
                volume,
                pitch_max,
                pitch_min,
                sample_rate,
                power_of_two,
            };
            commands::synth::run(&options, json)
        }
        Commands::ValidateVoice { voice, json } => commands::validate_voice::run(&voice, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_synth() {
        let cli = Cli::try_parse_from([
            "poino",
            "synth",
            "--request",
            "req.json",
            "--voice",
            "voice.json",
            "--output",
            "out.wav",
            "--speed",
            "1.5",
            "--power-of-two",
        ])
        .unwrap();
        match cli.command {
            Commands::Synth {
                request,
                speed,
                power_of_two,
                json,
                sample_rate,
                ..
            } => {
                assert_eq!(request, "req.json");
                assert_eq!(speed, Some(1.5));
                assert!(power_of_two);
                assert!(!json);
                assert_eq!(sample_rate, None);
            }
            _ => panic!("expected synth command"),
        }
    }

    #[test]
    fn test_cli_parses_labels_with_global_verbose() {
        let cli = Cli::try_parse_from(["poino", "labels", "-i", "in.lab", "--groups", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Labels {
                input,
                output,
                groups,
            } => {
                assert_eq!(input, "in.lab");
                assert_eq!(output, None);
                assert!(groups);
            }
            _ => panic!("expected labels command"),
        }
    }

    #[test]
    fn test_cli_parses_import_ust() {
        let cli = Cli::try_parse_from(["poino", "import-ust", "--input", "song.ust"]).unwrap();
        assert!(matches!(cli.command, Commands::ImportUst { .. }));
    }

    #[test]
    fn test_cli_requires_voice_for_synth() {
        let result = Cli::try_parse_from(["poino", "synth", "--request", "r.json", "-o", "o.wav"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
