//! Message-format template expansion.
//!
//! Templates substitute `{key}` tokens (dotted paths supported) with record
//! values and resolve `{if key}…{end}` conditional blocks. The configured
//! level-label token renders the level's display label instead of the raw
//! value. Colorization is applied by the caller, not here.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::Record;
use crate::levels::LevelTable;
use crate::path::get_property_value;

static CONDITIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{if (.*?)\}(.*?)\{end\}").unwrap());
static ORPHAN_IF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{if [^{}]*\}").unwrap());
static ORPHAN_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{end\}").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Expand a message-format template against a record.
pub fn format_template(
    template: &str,
    record: &Record,
    level_key: &str,
    level_label: &str,
    levels: &LevelTable,
) -> String {
    let resolved = handle_conditionals(template, record);

    let stripped = ORPHAN_IF_RE.replace_all(&resolved, "");
    let stripped = ORPHAN_END_RE.replace_all(&stripped, "");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();

    TOKEN_RE
        .replace_all(trimmed, |caps: &regex::Captures<'_>| {
            let token = &caps[1];
            if token == level_label
                && let Some(level) = get_property_value(record, level_key)
            {
                return levels.label_for_value(level);
            }
            get_property_value(record, token)
                .map(token_text)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Resolve `{if key}body{end}` blocks, first match repeatedly.
///
/// A block keeps its body only when the key resolves to a truthy value and
/// the body contains the matching `{key}` token; otherwise the block
/// vanishes. Bodies never contain `{end}` (non-greedy match), so every
/// iteration consumes one `{end}` and the loop terminates.
fn handle_conditionals(template: &str, record: &Record) -> String {
    let mut out = template.to_string();

    while let Some(caps) = CONDITIONAL_RE.captures(&out) {
        let whole = caps.get(0).expect("full match");
        let key = caps[1].to_string();
        let body = caps[2].to_string();

        let keep = get_property_value(record, &key).is_some_and(is_truthy)
            && body.contains(&format!("{{{key}}}"));
        let replacement = if keep { body } else { String::new() };

        let range = whole.range();
        out.replace_range(range, &replacement);
    }

    out
}

/// Substitution text for a token value. Falsy values render empty.
fn token_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Truthiness for conditional blocks (JSON analogue of the reference
/// semantics: `false`, `0`, `""`, and `null` are falsy).
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
