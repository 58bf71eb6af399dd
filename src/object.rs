//! Residual-object and error rendering.
//!
//! [`prettify_object`] renders the record keys the header line did not
//! already display, either as an indented multi-line block or as one
//! compact JSON fragment in single-line mode. Values under error-like keys
//! always go through [`prettify_error`], which splices the JSON-escaped
//! stack string back into readable multi-line text. Top-level error
//! records (`type == "Error"` with a string stack) render through
//! [`prettify_error_log`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::Record;
use crate::config::{ErrorProps, FormatContext};
use crate::prettifiers::{PrettifierExtras, display_value};

/// Standard-named keys the header line already displays. Configured
/// message/level/time keys are handled by the caller's scalar-gated skip
/// list instead, so non-scalar values under them still reach the residual
/// printer.
const LOGGER_KEYS: [&str; 7] = [
    "pid",
    "hostname",
    "name",
    "level",
    "time",
    "timestamp",
    "caller",
];

/// Re-join text lines with the line terminator, indenting every line after
/// the first.
pub fn join_lines_with_indentation(input: &str, indent: &str, eol: &str) -> String {
    let separator = format!("{eol}{indent}");
    input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect::<Vec<_>>()
        .join(&separator)
}

enum Rendered<'a> {
    /// Output of a custom prettifier, used verbatim.
    Custom(String),
    /// Plain value, serialized by this module.
    Plain(&'a Value),
}

/// Render the remaining keys of a record.
///
/// `skip_keys` are never rendered; with `exclude_logger_keys` the keys the
/// header line covers are skipped too. Error-like keys render through the
/// error printer even in single-line mode.
pub fn prettify_object(
    input: &Record,
    skip_keys: &[&str],
    exclude_logger_keys: bool,
    single_line: bool,
    indent: &str,
    ctx: &FormatContext,
) -> String {
    let skipped =
        |key: &str| skip_keys.contains(&key) || (exclude_logger_keys && LOGGER_KEYS.contains(&key));

    let mut plain: Vec<(&str, Rendered<'_>)> = Vec::new();
    let mut errors: Vec<(&str, Rendered<'_>)> = Vec::new();

    for (key, value) in input {
        if skipped(key) {
            continue;
        }
        let rendered = match ctx.custom_prettifiers.get(key.as_str()) {
            Some(prettifier) => {
                let extras = PrettifierExtras::plain(&ctx.colorizer);
                match prettifier(value, key, input, &extras) {
                    Some(text) => Rendered::Custom(text),
                    // Omit-sentinel: drop the key entirely
                    None => continue,
                }
            }
            None => Rendered::Plain(value),
        };
        if ctx.error_like_keys.iter().any(|k| k == key) {
            errors.push((key.as_str(), rendered));
        } else {
            plain.push((key.as_str(), rendered));
        }
    }

    let mut result = String::new();

    if single_line {
        if !plain.is_empty() {
            let mut compact = Record::new();
            for (key, rendered) in &plain {
                let value = match rendered {
                    Rendered::Custom(text) => Value::String(text.clone()),
                    Rendered::Plain(value) => (*value).clone(),
                };
                compact.insert((*key).to_string(), value);
            }
            let json = serde_json::to_string(&Value::Object(compact)).unwrap_or_default();
            result.push_str(&ctx.object_colorizer.grey(&json));
        }
        result.push_str(&ctx.eol);
        result = undouble_backslashes(&result);
    } else {
        for (key, rendered) in &plain {
            let lines = match rendered {
                Rendered::Custom(text) => text.clone(),
                Rendered::Plain(value) => match serde_json::to_string_pretty(value) {
                    Ok(text) => text,
                    Err(_) => continue,
                },
            };
            let lines = undouble_backslashes(&lines);
            let joined = join_lines_with_indentation(&lines, indent, &ctx.eol);
            result.push_str(indent);
            result.push_str(key);
            result.push_str(": ");
            result.push_str(&joined);
            result.push_str(&ctx.eol);
        }
    }

    for (key, rendered) in &errors {
        let lines = match rendered {
            Rendered::Custom(text) => text.clone(),
            Rendered::Plain(value) => match serde_json::to_string_pretty(value) {
                Ok(text) => text,
                Err(_) => continue,
            },
        };
        result.push_str(&prettify_error(key, &lines, indent, &ctx.eol));
    }

    result
}

/// Collapse doubled backslashes that JSON string escaping introduced, so
/// Windows paths and similar read naturally.
fn undouble_backslashes(input: &str) -> String {
    input.replace("\\\\", "\\")
}

static STACK_PROBE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^\s*"stack""#).unwrap());
static STACK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\s*"stack":)\s*(".*"),?$"#).unwrap());

/// Render an error-like value's serialized JSON, expanding the escaped
/// stack string into readable multi-line text.
///
/// The `"stack": "…"` line is located by pattern match on the serialized
/// text; its quoted value is unescaped and re-indented four columns past
/// the line's own indentation. A `null` stack does not match and stays the
/// literal text `null`.
pub fn prettify_error(key_name: &str, lines: &str, indent: &str, eol: &str) -> String {
    let joined = join_lines_with_indentation(lines, indent, eol);
    let block = format!("{indent}{key_name}: {joined}{eol}");

    let mut result = String::new();
    for (index, line) in block.split(eol).enumerate() {
        if index != 0 {
            result.push_str(eol);
        }

        if STACK_PROBE_RE.is_match(line)
            && let Some(caps) = STACK_LINE_RE.captures(line)
            && let Ok(stack) = serde_json::from_str::<String>(&caps[2])
        {
            let leading = line.len() - line.trim_start().len();
            let indentation = " ".repeat(leading + 4);
            result.push_str(&caps[1]);
            result.push_str(eol);
            result.push_str(&indentation);
            result.push_str(&stack.replace('\n', &format!("{eol}{indentation}")));
        } else {
            result.push_str(line);
        }
    }

    result
}

/// Render a top-level error record: the indented stack trace followed by
/// any configured extra error properties.
pub fn prettify_error_log(log: &Record, ctx: &FormatContext) -> String {
    let stack = log.get("stack").and_then(Value::as_str).unwrap_or_default();
    let joined = join_lines_with_indentation(stack, &ctx.indent, &ctx.eol);
    let mut result = format!("{}{}{}", ctx.indent, joined, ctx.eol);

    let mut excluded: Vec<&str> = LOGGER_KEYS.to_vec();
    excluded.push(ctx.message_key.as_str());
    excluded.push("type");
    excluded.push("stack");

    let selected: Vec<&str> = match &ctx.error_props {
        ErrorProps::None => Vec::new(),
        ErrorProps::All => log
            .keys()
            .map(String::as_str)
            .filter(|key| !excluded.contains(key))
            .collect(),
        ErrorProps::List(list) => list
            .iter()
            .map(String::as_str)
            .filter(|key| !excluded.contains(key))
            .collect(),
    };

    for key in selected {
        let Some(value) = log.get(key) else {
            continue;
        };
        if let Value::Object(nested) = value {
            // Nested objects keep their logger-named keys; only the root
            // record's are already displayed.
            let double_indent = format!("{0}{0}", ctx.indent);
            let pretty = prettify_object(nested, &[], false, false, &double_indent, ctx);
            result.push_str(&format!(
                "{indent}{key}: {{{eol}{pretty}{indent}}}{eol}",
                indent = ctx.indent,
                eol = ctx.eol,
            ));
        } else {
            result.push_str(&format!(
                "{indent}{key}: {value}{eol}",
                indent = ctx.indent,
                value = display_value(value),
                eol = ctx.eol,
            ));
        }
    }

    result
}
