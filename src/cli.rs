//! Command-line argument definitions for `logbrush`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Prettify JSON-structured log lines from stdin.
///
/// Reads newline-delimited JSON log records from stdin and writes
/// human-readable text to stdout. Lines that are not JSON objects are
/// passed through unchanged.
#[derive(Debug, Parser)]
#[command(name = "logbrush", version, about, long_about = None)]
pub struct Cli {
    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Colorize the residual-object block when colors are enabled.
    #[arg(long, value_name = "BOOL")]
    pub colorize_objects: Option<bool>,

    /// Minimum severity level to display (label or number).
    ///
    /// Records below this level are suppressed; records at the level are
    /// kept. Non-JSON lines always pass through.
    #[arg(short = 'L', long)]
    pub min_level: Option<String>,

    /// JSON key holding the log message.
    #[arg(short = 'm', long)]
    pub message_key: Option<String>,

    /// JSON key holding the log level.
    #[arg(long)]
    pub level_key: Option<String>,

    /// Message-format token that expands to the level label.
    #[arg(long)]
    pub level_label: Option<String>,

    /// JSON key holding the timestamp (`timestamp` is tried as fallback).
    #[arg(short = 't', long)]
    pub timestamp_key: Option<String>,

    /// Timestamp translation: `true`, `false`, a strftime mask,
    /// `SYS:STANDARD`, `SYS:<mask>`, or `UTC:<mask>`.
    #[arg(short = 'T', long, value_name = "SPEC")]
    pub translate_time: Option<String>,

    /// Hide these record keys (comma-separated, dotted paths allowed).
    #[arg(short = 'i', long)]
    pub ignore: Option<String>,

    /// Only show these record keys (comma-separated, dotted paths allowed).
    ///
    /// Wins over `--ignore` when both are given.
    #[arg(short = 'I', long)]
    pub include: Option<String>,

    /// Print the level before the timestamp.
    #[arg(short = 'f', long)]
    pub level_first: bool,

    /// Render the residual object as one compact JSON fragment.
    #[arg(short = 'S', long)]
    pub single_line: bool,

    /// Suppress the residual-object block entirely.
    #[arg(short = 'H', long)]
    pub hide_object: bool,

    /// Terminate lines with CRLF instead of LF.
    #[arg(short = 'C', long)]
    pub crlf: bool,

    /// Custom levels as comma-separated `name:number` pairs.
    #[arg(short = 'x', long)]
    pub custom_levels: Option<String>,

    /// Custom level colors as comma-separated `name:color` pairs.
    #[arg(short = 'X', long)]
    pub custom_colors: Option<String>,

    /// Custom level/color tables replace the built-ins instead of merging.
    #[arg(short = 'U', long)]
    pub use_only_custom_props: bool,

    /// Keys whose values render through the error printer (comma-separated).
    #[arg(short = 'k', long)]
    pub error_like_keys: Option<String>,

    /// Extra error properties to surface (comma-separated, or `*` for all).
    #[arg(short = 'e', long)]
    pub error_props: Option<String>,

    /// Message format template, e.g. `{levelLabel} - {if pid}{pid} {end}{msg}`.
    #[arg(short = 'o', long)]
    pub message_format: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Print shell completions to stdout and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}
