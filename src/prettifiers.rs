//! Field prettifiers for the header line.
//!
//! Each prettifier is a pure function of (record, context) producing an
//! optional display fragment; a missing key or wrong value type yields no
//! fragment, never an error. Caller-supplied [`Prettifier`] overrides share
//! the built-ins' interface and win when registered under the reserved
//! names (`level`, `time`, `message`, and the metadata sub-fields `name`,
//! `pid`, `hostname`, `caller`).

use serde_json::Value;

use crate::Record;
use crate::colors::Colorizer;
use crate::config::{FormatContext, MessageFormat};
use crate::message::{format_template, is_truthy};
use crate::path::get_property_value;
use crate::timestamp::format_time;

/// Override hook for a field or record key.
///
/// Receives the value, the key name, the whole record, and [`PrettifierExtras`].
/// Returning `None` omits the field from the output entirely.
pub type Prettifier =
    Box<dyn Fn(&Value, &str, &Record, &PrettifierExtras<'_>) -> Option<String> + Send + Sync>;

/// Context handed to [`Prettifier`] implementations.
pub struct PrettifierExtras<'a> {
    /// Resolved display label, when the field is the level.
    pub label: Option<String>,
    /// Colorized display label, when the field is the level.
    pub label_colorized: Option<String>,
    /// The active colorizer's styling functions.
    pub colors: &'a Colorizer,
}

impl<'a> PrettifierExtras<'a> {
    pub(crate) fn plain(colors: &'a Colorizer) -> Self {
        Self {
            label: None,
            label_colorized: None,
            colors,
        }
    }
}

/// Per-record scratch holding the prettified header fragments.
///
/// Each slot is either absent or non-empty; the composer treats the two
/// identically to a missing record key.
#[derive(Debug, Default)]
pub struct PrettifiedFragments {
    pub time: Option<String>,
    pub level: Option<String>,
    pub metadata: Option<String>,
    pub message: Option<String>,
}

/// Display text for a field value (strings unquoted, the rest as JSON).
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prettify the level field.
pub fn prettify_level(record: &Record, ctx: &FormatContext) -> Option<String> {
    let value = get_property_value(record, &ctx.level_key)?;

    if let Some(prettifier) = ctx.custom_prettifiers.get("level") {
        let extras = PrettifierExtras {
            label: Some(ctx.levels.label_for_value(value)),
            label_colorized: Some(ctx.colorizer.colorize_level(value, &ctx.levels)),
            colors: &ctx.colorizer,
        };
        return prettifier(value, &ctx.level_key, record, &extras);
    }

    Some(ctx.colorizer.colorize_level(value, &ctx.levels))
}

/// Prettify the timestamp field.
///
/// The configured key is tried first, then `timestamp`. The translated
/// value is wrapped in square brackets unless a custom prettifier is
/// registered, in which case its return value is used verbatim.
pub fn prettify_time(record: &Record, ctx: &FormatContext) -> Option<String> {
    let value = record
        .get(&ctx.timestamp_key)
        .or_else(|| record.get("timestamp"))?;

    let output = format_time(value, &ctx.translate_time);

    if let Some(prettifier) = ctx.custom_prettifiers.get("time") {
        let extras = PrettifierExtras::plain(&ctx.colorizer);
        return prettifier(&Value::String(output), &ctx.timestamp_key, record, &extras);
    }

    Some(format!("[{output}]"))
}

/// Prettify the metadata fields (`name`, `pid`, `hostname`, `caller`).
///
/// Composes `(name/pid on hostname) <caller>` with each separator present
/// only when both adjacent parts are. No fragment when all four are absent.
pub fn prettify_metadata(record: &Record, ctx: &FormatContext) -> Option<String> {
    let piece = |key: &str| -> Option<String> {
        let value = record.get(key).filter(|v| is_truthy(v))?;
        match ctx.custom_prettifiers.get(key) {
            Some(prettifier) => {
                let extras = PrettifierExtras::plain(&ctx.colorizer);
                Some(
                    prettifier(value, key, record, &extras)
                        .unwrap_or_else(|| display_value(value)),
                )
            }
            None => Some(display_value(value)),
        }
    };

    let name = piece("name");
    let pid = piece("pid");
    let hostname = piece("hostname");
    let caller = piece("caller");

    let mut line = String::new();

    if name.is_some() || pid.is_some() || hostname.is_some() {
        line.push('(');
        if let Some(ref name) = name {
            line.push_str(name);
        }
        if let Some(ref pid) = pid {
            if name.is_some() {
                line.push('/');
            }
            line.push_str(pid);
        }
        if let Some(ref hostname) = hostname {
            line.push_str(if line == "(" { "on " } else { " on " });
            line.push_str(hostname);
        }
        line.push(')');
    }

    if let Some(ref caller) = caller {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push('<');
        line.push_str(caller);
        line.push('>');
    }

    if line.is_empty() { None } else { Some(line) }
}

/// Prettify the message field.
///
/// A configured message format (template or function) takes over entirely;
/// otherwise the message key's value is shown when it is a string, number,
/// or boolean.
pub fn prettify_message(record: &Record, ctx: &FormatContext) -> Option<String> {
    match &ctx.message_format {
        Some(MessageFormat::Template(template)) => {
            let text = format_template(
                template,
                record,
                &ctx.level_key,
                &ctx.level_label,
                &ctx.levels,
            );
            return Some(ctx.colorizer.message(&text));
        }
        Some(MessageFormat::Function(format)) => {
            let text = format(record, &ctx.message_key, &ctx.level_label, &ctx.colorizer);
            return Some(ctx.colorizer.message(&text));
        }
        None => {}
    }

    let value = record.get(&ctx.message_key)?;
    if !matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
        return None;
    }

    if let Some(prettifier) = ctx.custom_prettifiers.get("message") {
        let extras = PrettifierExtras::plain(&ctx.colorizer);
        return prettifier(value, &ctx.message_key, record, &extras);
    }

    Some(ctx.colorizer.message(&display_value(value)))
}
