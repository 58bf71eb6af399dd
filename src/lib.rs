//! `logbrush` — Prettify JSON-structured log lines from stdin.
//!
//! This library provides the core formatting pipeline for the `logbrush`
//! CLI tool. It turns newline-delimited JSON log records (pino/bunyan
//! convention: `msg`, `level`, `time`, `pid`, `hostname`) into
//! human-readable, optionally colorized text, with level-threshold
//! filtering, key include/ignore filtering, a message-format mini-language,
//! and indented rendering of residual objects and error stacks.
//!
//! # Example
//!
//! ```
//! use logbrush::{Config, FormatContext, format_line};
//!
//! let ctx = FormatContext::new(&Config::default(), false);
//!
//! let input = r#"{"time":1522431328992,"level":30,"msg":"foo","pid":1,"hostname":"h"}"#;
//! let out = format_line(input, &ctx).unwrap();
//! assert_eq!(out, "[17:35:28.992] INFO (1 on h): foo\n");
//!
//! // Lines that are not JSON objects pass through unchanged.
//! assert_eq!(format_line("not json", &ctx).unwrap(), "not json\n");
//! ```

pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod formatter;
pub mod levels;
pub mod message;
pub mod object;
pub mod path;
pub mod prettifiers;
pub mod timestamp;

/// One structured log record: a JSON object with insertion order preserved.
pub type Record = serde_json::Map<String, serde_json::Value>;

// Re-export primary API types for convenience.
pub use colors::Colorizer;
pub use config::{Config, ErrorProps, FormatContext, MessageFormat, TimeSpec};
pub use error::BrushError;
pub use formatter::{format_line, format_record};
pub use levels::LevelTable;
pub use prettifiers::{PrettifiedFragments, Prettifier, PrettifierExtras};
pub use timestamp::TranslateTime;
