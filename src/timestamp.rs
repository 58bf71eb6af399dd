//! Timestamp translation for log records.
//!
//! A [`TranslateTime`] mode decides whether a time value is passed through
//! raw or rendered with a strftime mask, and in which timezone. Masks are
//! handed to [`jiff`]'s strftime formatter; this module only resolves which
//! mask and which zone apply.
//!
//! Accepted values: epoch milliseconds (number or numeric string),
//! ISO 8601 / RFC 3339 strings, and `YYYY-MM-DD HH:MM:SS[.fff]` strings.
//! Values that cannot be parsed into a valid date are returned unchanged.

use jiff::tz::TimeZone;
use serde_json::Value;

/// Mask used when translation is enabled without an explicit mask.
pub const DEFAULT_TIME_MASK: &str = "%H:%M:%S%.3f";

/// Mask used by the `SYS:STANDARD` shortcut.
pub const STANDARD_TIME_MASK: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// Resolved time-translation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateTime {
    /// Pass the raw value through unchanged.
    Raw,
    /// Default mask, rendered at UTC.
    Default,
    /// Explicit mask and zone.
    Custom { mask: String, local: bool },
}

impl TranslateTime {
    /// Resolve a boolean translate-time setting.
    pub fn from_bool(enabled: bool) -> Self {
        if enabled { Self::Default } else { Self::Raw }
    }

    /// Resolve a translate-time specification string.
    ///
    /// `SYS:STANDARD` renders the standard mask in system-local time;
    /// `SYS:<mask>` and `UTC:<mask>` select the zone explicitly; a bare
    /// mask renders at UTC. Prefixes are case-insensitive.
    pub fn parse(spec: &str) -> Self {
        if spec.eq_ignore_ascii_case("SYS:STANDARD") {
            return Self::Custom {
                mask: STANDARD_TIME_MASK.to_string(),
                local: true,
            };
        }

        let prefix = spec.get(..4).unwrap_or_default();
        if prefix.eq_ignore_ascii_case("SYS:") {
            return Self::Custom {
                mask: spec[4..].to_string(),
                local: true,
            };
        }
        if prefix.eq_ignore_ascii_case("UTC:") {
            return Self::Custom {
                mask: spec[4..].to_string(),
                local: false,
            };
        }

        Self::Custom {
            mask: spec.to_string(),
            local: false,
        }
    }
}

/// Render a time value under the given translation mode.
///
/// Unparseable values come back as their raw display text.
pub fn format_time(value: &Value, translate: &TranslateTime) -> String {
    let (mask, local) = match translate {
        TranslateTime::Raw => return raw_display(value),
        TranslateTime::Default => (DEFAULT_TIME_MASK, false),
        TranslateTime::Custom { mask, local } => (mask.as_str(), *local),
    };

    let Some(ts) = parse_timestamp(value) else {
        return raw_display(value);
    };

    let zone = if local {
        TimeZone::system()
    } else {
        TimeZone::UTC
    };
    ts.to_zoned(zone).strftime(mask).to_string()
}

/// Raw display text for an untranslatable or untranslated value.
fn raw_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a time value into a [`jiff::Timestamp`].
fn parse_timestamp(value: &Value) -> Option<jiff::Timestamp> {
    match value {
        Value::Number(n) => {
            if let Some(ms) = n.as_i64() {
                jiff::Timestamp::from_millisecond(ms).ok()
            } else {
                #[allow(clippy::cast_possible_truncation)]
                n.as_f64()
                    .and_then(|f| jiff::Timestamp::from_millisecond(f as i64).ok())
            }
        }
        Value::String(s) => parse_string(s),
        _ => None,
    }
}

/// Parse a string timestamp.
fn parse_string(s: &str) -> Option<jiff::Timestamp> {
    // ISO 8601 / RFC 3339; jiff handles these natively
    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Some(ts);
    }

    // YYYY-MM-DD HH:MM:SS (no timezone → assume UTC)
    if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S", s)
        && let Ok(zdt) = dt.to_zoned(TimeZone::UTC)
    {
        return Some(zdt.timestamp());
    }

    // YYYY-MM-DD HH:MM:SS.fff
    if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S%.f", s)
        && let Ok(zdt) = dt.to_zoned(TimeZone::UTC)
    {
        return Some(zdt.timestamp());
    }

    // Numeric string → epoch milliseconds
    if let Ok(ms) = s.trim().parse::<i64>() {
        return jiff::Timestamp::from_millisecond(ms).ok();
    }

    None
}
