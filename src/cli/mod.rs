//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod area;
mod sample;
mod search;

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::{
    find_config, load_config, merge_cli_overrides, project_root, resolve_path, AreatexConfig,
    CliOverrides, ConfigError,
};
use crate::output::TextureFormat;
use crate::progress::{ConsoleProgress, JsonProgress, ProgressReporter};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Areatex - Generate anti-aliasing lookup textures
#[derive(Parser)]
#[command(name = "areatex")]
#[command(about = "Areatex - Generate morphological anti-aliasing area and search textures")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the texture-writing commands
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory (default: [output].dir from areatex.toml, or "textures")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to areatex.toml (default: search upward from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Texture file format
    #[arg(long, value_enum)]
    pub format: Option<TextureFormat>,

    /// Also write a C++ header with the texture bytes
    #[arg(long)]
    pub cpp: bool,

    /// Also write a Rust module with the texture bytes
    #[arg(long)]
    pub rust: bool,

    /// Emit progress as JSON lines on stderr
    #[arg(long)]
    pub json: bool,

    /// Show per-slice progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the area textures (AreaTexDX10 and AreaTexDX9)
    Area {
        #[command(flatten)]
        output: OutputArgs,

        /// Number of parallel jobs (default: available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Skip the DX9 texture
        #[arg(long)]
        no_dx9: bool,
    },

    /// Generate the search texture
    Search {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate one area solver call and print the result
    Sample {
        /// Pattern family
        #[arg(value_enum)]
        kind: SampleKind,

        /// Pattern code (0-15)
        pattern: u32,

        /// Distance to the left crossing edge
        left: u32,

        /// Distance to the right crossing edge
        right: u32,

        /// Sub-pixel offset (horizontal component for diagonal patterns)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        offset: f64,

        /// Vertical sub-pixel offset (diagonal patterns only)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        offset_y: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Area solver selected by `areatex sample`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleKind {
    /// Horizontal/vertical crossing patterns
    Ortho,
    /// Diagonal crossing patterns
    Diag,
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Area { output, jobs, no_dx9 } => area::run_area(&output, jobs, no_dx9),
        Commands::Search { output } => search::run_search(&output),
        Commands::Sample { kind, pattern, left, right, offset, offset_y, json } => {
            sample::run_sample(kind, pattern, left, right, (offset, offset_y), json)
        }
    }
}

/// Load the configuration, apply overrides and resolve the output directory.
///
/// A relative output directory from a config file is resolved against the
/// directory holding that file; one given on the command line is used as is.
pub(crate) fn prepare_config(
    args: &OutputArgs,
    overrides: CliOverrides,
) -> Result<(AreatexConfig, PathBuf), ConfigError> {
    let config_path = args.config.clone().or_else(find_config);
    let mut config = load_config(config_path.as_deref())?;
    let from_cli = overrides.out.is_some();
    merge_cli_overrides(&mut config, &overrides);

    let out_dir = match config_path.as_deref().and_then(project_root) {
        Some(root) if !from_cli => resolve_path(root, &config.output.dir),
        _ => config.output.dir.clone(),
    };
    Ok((config, out_dir))
}

/// Overrides shared by every texture-writing command.
pub(crate) fn output_overrides(args: &OutputArgs) -> CliOverrides {
    CliOverrides {
        out: args.output.clone(),
        format: args.format,
        cpp: args.cpp.then_some(true),
        rust: args.rust.then_some(true),
        ..Default::default()
    }
}

/// Progress reporter matching the command-line flags.
pub(crate) fn reporter(args: &OutputArgs) -> Arc<dyn ProgressReporter> {
    if args.json {
        Arc::new(JsonProgress::new())
    } else {
        Arc::new(
            ConsoleProgress::new()
                .with_colors(std::io::stderr().is_terminal())
                .with_verbose(args.verbose),
        )
    }
}

/// Print an error and return the error exit code.
pub(crate) fn fail(context: &str, err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}: {}", context, err);
    ExitCode::from(EXIT_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_area() {
        let cli = Cli::try_parse_from([
            "areatex", "area", "-o", "out", "--jobs", "3", "--format", "tga", "--cpp", "--no-dx9",
        ])
        .unwrap();
        match cli.command {
            Commands::Area { output, jobs, no_dx9 } => {
                assert_eq!(output.output, Some(PathBuf::from("out")));
                assert_eq!(output.format, Some(TextureFormat::Tga));
                assert!(output.cpp);
                assert!(!output.rust);
                assert_eq!(jobs, Some(3));
                assert!(no_dx9);
            }
            _ => panic!("expected area command"),
        }
    }

    #[test]
    fn test_cli_parses_sample_negative_offset() {
        let cli = Cli::try_parse_from([
            "areatex", "sample", "diag", "3", "1", "2", "--offset", "-0.25", "--offset-y", "0.25",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample { kind, pattern, left, right, offset, offset_y, json } => {
                assert_eq!(kind, SampleKind::Diag);
                assert_eq!((pattern, left, right), (3, 1, 2));
                assert_eq!((offset, offset_y), (-0.25, 0.25));
                assert!(!json);
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["areatex", "search", "--format", "dds"]).is_err());
    }

    #[test]
    fn test_output_overrides_only_set_flags() {
        let args = OutputArgs {
            output: None,
            config: None,
            format: None,
            cpp: true,
            rust: false,
            json: false,
            verbose: false,
        };
        let overrides = output_overrides(&args);
        assert_eq!(overrides.cpp, Some(true));
        assert_eq!(overrides.rust, None);
        assert!(overrides.out.is_none());
    }
}
