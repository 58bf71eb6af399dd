//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/logbrush/config.toml` or
//!    `$XDG_CONFIG_HOME/logbrush/config.toml`)
//! 3. Built-in defaults
//!
//! A [`Config`] is the user-facing option bag; a [`FormatContext`] is the
//! per-instance resolution of it (parsed key lists, level tables, compiled
//! colorizers) that the formatting pipeline reads on every record.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::Record;
use crate::cli::{Cli, ColorMode};
use crate::colors::Colorizer;
use crate::error::BrushError;
use crate::levels::LevelTable;
use crate::prettifiers::{Prettifier, PrettifierExtras};
use crate::timestamp::TranslateTime;

/// Runtime configuration merged from defaults, config file, and CLI
/// arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests, benchmarks,
/// and library embedding).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never) for the header line.
    pub color_mode: ColorMode,
    /// Whether the residual-object block is colorized when colors are on.
    pub colorize_objects: bool,
    /// Terminate lines with `\r\n` instead of `\n`.
    pub crlf: bool,
    /// Print the level before the time in the header line.
    pub level_first: bool,
    /// Render the residual object as one compact JSON fragment.
    pub single_line: bool,
    /// Suppress the residual-object block entirely.
    pub hide_object: bool,
    /// JSON key holding the log message.
    pub message_key: String,
    /// JSON key holding the level.
    pub level_key: String,
    /// Message-format token that expands to the level's display label.
    pub level_label: String,
    /// JSON key holding the timestamp (`timestamp` is tried as fallback).
    pub timestamp_key: String,
    /// Minimum level (label or number); records below it are suppressed.
    pub min_level: Option<String>,
    /// CSV `name:number` pairs supplementing or replacing the level table.
    pub custom_levels: Option<String>,
    /// CSV `name:color` pairs overriding level colors.
    pub custom_colors: Option<String>,
    /// Custom level/color tables replace, rather than merge with, built-ins.
    pub use_only_custom_props: bool,
    /// Timestamp translation setting (boolean or mask string).
    pub translate_time: TimeSpec,
    /// CSV list of keys to drop from the record (dotted paths allowed).
    pub ignore: Option<String>,
    /// CSV list of keys to keep (dotted paths allowed); wins over `ignore`.
    pub include: Option<String>,
    /// CSV list of keys whose values render through the error printer.
    pub error_like_keys: String,
    /// CSV list of extra error properties to surface, or `*` for all.
    pub error_props: Option<String>,
    /// Message-format template; see the message module.
    pub message_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            colorize_objects: true,
            crlf: false,
            level_first: false,
            single_line: false,
            hide_object: false,
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
            level_label: "levelLabel".to_string(),
            timestamp_key: "time".to_string(),
            min_level: None,
            custom_levels: None,
            custom_colors: None,
            use_only_custom_props: false,
            translate_time: TimeSpec::Toggle(true),
            ignore: None,
            include: None,
            error_like_keys: "err,error".to_string(),
            error_props: None,
            message_format: None,
        }
    }
}

/// Timestamp translation setting: a toggle or a mask string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    Toggle(bool),
    Format(String),
}

impl TimeSpec {
    /// Resolve to the concrete translation mode.
    pub fn resolve(&self) -> TranslateTime {
        match self {
            Self::Toggle(enabled) => TranslateTime::from_bool(*enabled),
            Self::Format(spec) => TranslateTime::parse(spec),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if
    /// present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, BrushError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);
        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config);
        }

        config.color_mode = cli.color;

        if cli.min_level.is_some() {
            config.min_level.clone_from(&cli.min_level);
        }
        if let Some(ref key) = cli.message_key {
            config.message_key.clone_from(key);
        }
        if let Some(ref key) = cli.level_key {
            config.level_key.clone_from(key);
        }
        if let Some(ref label) = cli.level_label {
            config.level_label.clone_from(label);
        }
        if let Some(ref key) = cli.timestamp_key {
            config.timestamp_key.clone_from(key);
        }
        if let Some(ref spec) = cli.translate_time {
            config.translate_time = match spec.as_str() {
                "false" => TimeSpec::Toggle(false),
                "true" => TimeSpec::Toggle(true),
                other => TimeSpec::Format(other.to_string()),
            };
        }
        if cli.ignore.is_some() {
            config.ignore.clone_from(&cli.ignore);
        }
        if cli.include.is_some() {
            config.include.clone_from(&cli.include);
        }
        if cli.custom_levels.is_some() {
            config.custom_levels.clone_from(&cli.custom_levels);
        }
        if cli.custom_colors.is_some() {
            config.custom_colors.clone_from(&cli.custom_colors);
        }
        if let Some(ref keys) = cli.error_like_keys {
            config.error_like_keys.clone_from(keys);
        }
        if cli.error_props.is_some() {
            config.error_props.clone_from(&cli.error_props);
        }
        if cli.message_format.is_some() {
            config.message_format.clone_from(&cli.message_format);
        }
        if let Some(colorize_objects) = cli.colorize_objects {
            config.colorize_objects = colorize_objects;
        }

        config.use_only_custom_props |= cli.use_only_custom_props;
        config.crlf |= cli.crlf;
        config.level_first |= cli.level_first;
        config.single_line |= cli.single_line;
        config.hide_object |= cli.hide_object;

        Ok(config)
    }

    /// Default config file path:
    /// `$XDG_CONFIG_HOME/logbrush/config.toml` or
    /// `~/.config/logbrush/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("logbrush").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("logbrush")
                .join("config.toml")
        } else {
            PathBuf::from(".config/logbrush/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(min_level) = file.min_level {
            self.min_level = Some(min_level);
        }
        if let Some(translate_time) = file.translate_time {
            self.translate_time = translate_time;
        }
        if let Some(ignore) = file.ignore {
            self.ignore = Some(ignore);
        }
        if let Some(include) = file.include {
            self.include = Some(include);
        }
        if let Some(error_like_keys) = file.error_like_keys {
            self.error_like_keys = error_like_keys;
        }
        if let Some(error_props) = file.error_props {
            self.error_props = Some(error_props);
        }
        if let Some(message_format) = file.message_format {
            self.message_format = Some(message_format);
        }
        if let Some(colorize_objects) = file.colorize_objects {
            self.colorize_objects = colorize_objects;
        }
        if let Some(use_only_custom_props) = file.use_only_custom_props {
            self.use_only_custom_props = use_only_custom_props;
        }
        if let Some(crlf) = file.crlf {
            self.crlf = crlf;
        }
        if let Some(level_first) = file.level_first {
            self.level_first = level_first;
        }
        if let Some(single_line) = file.single_line {
            self.single_line = single_line;
        }
        if let Some(hide_object) = file.hide_object {
            self.hide_object = hide_object;
        }

        if let Some(keys) = file.keys {
            if let Some(message) = keys.message {
                self.message_key = message;
            }
            if let Some(level) = keys.level {
                self.level_key = level;
            }
            if let Some(level_label) = keys.level_label {
                self.level_label = level_label;
            }
            if let Some(timestamp) = keys.timestamp {
                self.timestamp_key = timestamp;
            }
        }

        // Tables become the CSV form the level/color parsers accept.
        if let Some(levels) = file.levels {
            let pairs: Vec<String> = levels
                .into_iter()
                .map(|(name, number)| format!("{name}:{number}"))
                .collect();
            if !pairs.is_empty() {
                self.custom_levels = Some(pairs.join(","));
            }
        }
        if let Some(colors) = file.colors {
            let pairs: Vec<String> = colors
                .into_iter()
                .map(|(name, color)| format!("{name}:{color}"))
                .collect();
            if !pairs.is_empty() {
                self.custom_colors = Some(pairs.join(","));
            }
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    color: Option<String>,
    colorize_objects: Option<bool>,
    min_level: Option<String>,
    translate_time: Option<TimeSpec>,
    ignore: Option<String>,
    include: Option<String>,
    error_like_keys: Option<String>,
    error_props: Option<String>,
    message_format: Option<String>,
    use_only_custom_props: Option<bool>,
    crlf: Option<bool>,
    level_first: Option<bool>,
    single_line: Option<bool>,
    hide_object: Option<bool>,
    keys: Option<KeysConfig>,
    levels: Option<HashMap<String, i64>>,
    colors: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct KeysConfig {
    message: Option<String>,
    level: Option<String>,
    level_label: Option<String>,
    timestamp: Option<String>,
}

impl FileConfig {
    fn load(path: &PathBuf) -> Result<Self, BrushError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BrushError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Extra error-property selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorProps {
    /// Surface no extra properties.
    None,
    /// Surface every remaining own key.
    All,
    /// Surface the listed keys.
    List(Vec<String>),
}

impl ErrorProps {
    fn parse(spec: Option<&str>) -> Self {
        let Some(spec) = spec else {
            return Self::None;
        };
        let items = parse_csv(spec);
        match items.first().map(String::as_str) {
            Some("*") => Self::All,
            Some(_) => Self::List(items),
            None => Self::None,
        }
    }
}

/// A message-format template or a caller-supplied formatting function.
pub enum MessageFormat {
    Template(String),
    Function(MessageFormatFn),
}

/// Caller-supplied message formatter: receives the record, the message-key
/// name, the level-label token name, and the colorizer.
pub type MessageFormatFn = Box<dyn Fn(&Record, &str, &str, &Colorizer) -> String + Send + Sync>;

/// Per-instance resolution of a [`Config`], built once and read-only
/// thereafter. Safe to share across threads; each stream should own one.
pub struct FormatContext {
    pub eol: String,
    pub indent: String,
    pub message_key: String,
    pub level_key: String,
    pub level_label: String,
    pub timestamp_key: String,
    pub min_level: Option<i64>,
    pub levels: LevelTable,
    pub translate_time: TranslateTime,
    pub level_first: bool,
    pub single_line: bool,
    pub hide_object: bool,
    pub ignore_keys: Vec<String>,
    pub include_keys: Option<Vec<String>>,
    pub error_like_keys: Vec<String>,
    pub error_props: ErrorProps,
    pub message_format: Option<MessageFormat>,
    pub custom_prettifiers: HashMap<String, Prettifier>,
    pub colorizer: Colorizer,
    pub object_colorizer: Colorizer,
}

impl FormatContext {
    /// Resolve a [`Config`] into a reusable formatting context.
    ///
    /// `use_color` is decided by the caller (TTY detection lives at the
    /// CLI boundary, not here).
    pub fn new(config: &Config, use_color: bool) -> Self {
        let levels = LevelTable::with_custom(
            config.custom_levels.as_deref(),
            config.use_only_custom_props,
        );
        let colorizer = Colorizer::new(use_color, config.custom_colors.as_deref(), &levels);
        let object_colorizer = if config.colorize_objects {
            colorizer.clone()
        } else {
            Colorizer::disabled()
        };
        let min_level = config
            .min_level
            .as_deref()
            .and_then(|spec| levels.resolve_minimum(spec));
        let include_keys = config
            .include
            .as_deref()
            .map(parse_csv)
            .filter(|keys| !keys.is_empty());

        Self {
            eol: if config.crlf { "\r\n" } else { "\n" }.to_string(),
            indent: "    ".to_string(),
            message_key: config.message_key.clone(),
            level_key: config.level_key.clone(),
            level_label: config.level_label.clone(),
            timestamp_key: config.timestamp_key.clone(),
            min_level,
            levels,
            translate_time: config.translate_time.resolve(),
            level_first: config.level_first,
            single_line: config.single_line,
            hide_object: config.hide_object,
            ignore_keys: config.ignore.as_deref().map(parse_csv).unwrap_or_default(),
            include_keys,
            error_like_keys: parse_csv(&config.error_like_keys),
            error_props: ErrorProps::parse(config.error_props.as_deref()),
            message_format: config.message_format.clone().map(MessageFormat::Template),
            custom_prettifiers: HashMap::new(),
            colorizer,
            object_colorizer,
        }
    }

    /// Register a custom prettifier for a field or record key.
    ///
    /// Reserved names `level`, `time`, `name`, `pid`, `hostname`, `caller`,
    /// and `message` override the built-in field prettifiers; any other
    /// name applies to that key in the residual object.
    pub fn with_prettifier<F>(mut self, key: impl Into<String>, prettifier: F) -> Self
    where
        F: Fn(&serde_json::Value, &str, &Record, &PrettifierExtras<'_>) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.custom_prettifiers
            .insert(key.into(), Box::new(prettifier));
        self
    }

    /// Replace the message-format template with a formatting function.
    pub fn with_message_format_fn<F>(mut self, format: F) -> Self
    where
        F: Fn(&Record, &str, &str, &Colorizer) -> String + Send + Sync + 'static,
    {
        self.message_format = Some(MessageFormat::Function(Box::new(format)));
        self
    }
}

/// Split a CSV option into trimmed, non-empty items.
fn parse_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
