//! Level and message colorization.
//!
//! A [`Colorizer`] maps level values to styled labels and styles message
//! and residual-object text. The disabled variant passes text through
//! unchanged, so callers never branch on color support themselves.
//! Custom per-level colors are supplied as CSV `name:color` pairs.

use std::collections::HashMap;

use owo_colors::{OwoColorize, Style};
use serde_json::Value;

use crate::levels::{DEFAULT_LEVEL_LABEL, LevelTable, level_number};

/// Maps levels and text fragments to styled output.
#[derive(Clone)]
pub struct Colorizer {
    enabled: bool,
    level_styles: HashMap<i64, Style>,
    default_style: Style,
    message_style: Style,
    grey_style: Style,
}

impl Colorizer {
    /// Build a colorizer.
    ///
    /// `custom_colors` is CSV `name:color` (or `number:color`) pairs; keys
    /// `default` and `message` restyle the fallback label and the message
    /// text. Unknown keys and unknown color names fall back silently.
    pub fn new(enabled: bool, custom_colors: Option<&str>, levels: &LevelTable) -> Self {
        let mut level_styles: HashMap<i64, Style> = HashMap::from([
            (10, Style::new().bright_black()),
            (20, Style::new().blue()),
            (30, Style::new().green()),
            (40, Style::new().yellow()),
            (50, Style::new().red()),
            (60, Style::new().on_red()),
        ]);
        let mut default_style = Style::new().white();
        let mut message_style = Style::new().cyan();
        let grey_style = Style::new().bright_black();

        if let Some(csv) = custom_colors {
            for pair in csv.split(',') {
                let Some((key, color)) = pair.split_once(':') else {
                    continue;
                };
                let style = color_name_to_style(color.trim());
                match key.trim() {
                    "default" => default_style = style,
                    "message" => message_style = style,
                    key => {
                        let number = key.parse::<i64>().ok().or_else(|| levels.number(key));
                        if let Some(number) = number {
                            level_styles.insert(number, style);
                        }
                    }
                }
            }
        }

        Self {
            enabled,
            level_styles,
            default_style,
            message_style,
            grey_style,
        }
    }

    /// A pass-through colorizer.
    pub fn disabled() -> Self {
        Self::new(false, None, &LevelTable::default())
    }

    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Styled display label for a raw level value (numeric or named).
    ///
    /// Levels without a table entry render as `USERLVL` in the default
    /// style.
    pub fn colorize_level(&self, value: &Value, levels: &LevelTable) -> String {
        let label_and_style = level_number(value, levels).and_then(|number| {
            levels.label(number).map(|label| {
                let style = self
                    .level_styles
                    .get(&number)
                    .copied()
                    .unwrap_or(self.default_style);
                (label, style)
            })
        });

        match label_and_style {
            Some((label, style)) => self.paint(label, style),
            None => self.paint(DEFAULT_LEVEL_LABEL, self.default_style),
        }
    }

    /// Style message text.
    pub fn message(&self, text: &str) -> String {
        self.paint(text, self.message_style)
    }

    /// Style residual-object text in the muted single-line style.
    pub fn grey(&self, text: &str) -> String {
        self.paint(text, self.grey_style)
    }
}

/// Convert a color name string to an [`owo_colors::Style`].
///
/// Supports standard ANSI colors, bright variants, and `bg`-prefixed
/// background colors. Unknown colors fall back to white.
fn color_name_to_style(color: &str) -> Style {
    match color.to_lowercase().as_str() {
        "black" => Style::new().black(),
        "red" => Style::new().red(),
        "green" => Style::new().green(),
        "yellow" => Style::new().yellow(),
        "blue" => Style::new().blue(),
        "magenta" | "purple" => Style::new().magenta(),
        "cyan" => Style::new().cyan(),
        "gray" | "grey" | "bright_black" => Style::new().bright_black(),
        "bright_red" => Style::new().bright_red(),
        "bright_green" => Style::new().bright_green(),
        "bright_yellow" => Style::new().bright_yellow(),
        "bright_blue" => Style::new().bright_blue(),
        "bright_magenta" => Style::new().bright_magenta(),
        "bright_cyan" => Style::new().bright_cyan(),
        "bright_white" => Style::new().bright_white(),
        "bgred" | "bg_red" => Style::new().on_red(),
        "bggreen" | "bg_green" => Style::new().on_green(),
        "bgyellow" | "bg_yellow" => Style::new().on_yellow(),
        "bgblue" | "bg_blue" => Style::new().on_blue(),
        "bgmagenta" | "bg_magenta" => Style::new().on_magenta(),
        "bgcyan" | "bg_cyan" => Style::new().on_cyan(),
        // "white" and unknown colors
        _ => Style::new().white(),
    }
}
