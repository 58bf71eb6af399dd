//! Record-to-text formatting pipeline.
//!
//! One record in, one string out: parse (or pass through), apply the level
//! threshold, apply key filtering, prettify the header fields, compose the
//! header line, then append the residual object or error block. The
//! pipeline is linear; the only early exits are pass-through of
//! unparseable input and level-filtered suppression.

use std::borrow::Cow;

use serde_json::Value;

use crate::Record;
use crate::config::FormatContext;
use crate::levels::level_number;
use crate::object::{prettify_error_log, prettify_object};
use crate::path::{delete_property, get_property_value, get_segments, split_property_key};
use crate::prettifiers::{
    PrettifiedFragments, prettify_level, prettify_message, prettify_metadata, prettify_time,
};

/// Format a single input line.
///
/// Lines that do not parse as a JSON object pass through unchanged with the
/// line terminator appended. `None` means the record was suppressed by the
/// level filter; `Some("")` is a legitimate (still written) empty output.
pub fn format_line(input: &str, ctx: &FormatContext) -> Option<String> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(record)) => format_record(&record, ctx),
        _ => Some(format!("{input}{}", ctx.eol)),
    }
}

/// Format an already-parsed record.
pub fn format_record(record: &Record, ctx: &FormatContext) -> Option<String> {
    // Threshold is exclusive on the low side: equal levels are kept, and
    // records whose level cannot be resolved are kept too.
    if let Some(minimum) = ctx.min_level
        && let Some(value) = get_property_value(record, &ctx.level_key)
        && let Some(number) = level_number(value, &ctx.levels)
        && number < minimum
    {
        return None;
    }

    // Message formatting reads the record before filtering removes keys the
    // template may reference.
    let message = prettify_message(record, ctx);

    let log: Cow<'_, Record> = if ctx.include_keys.is_some() || !ctx.ignore_keys.is_empty() {
        Cow::Owned(filter_record(record, ctx))
    } else {
        Cow::Borrowed(record)
    };
    let log = log.as_ref();

    let fragments = PrettifiedFragments {
        time: prettify_time(log, ctx),
        level: prettify_level(log, ctx),
        metadata: prettify_metadata(log, ctx),
        message,
    };

    let mut line = compose_header(&fragments, ctx);

    if !line.is_empty() && !ctx.single_line {
        line.push_str(&ctx.eol);
    }

    if log.get("type").and_then(Value::as_str) == Some("Error")
        && log.get("stack").is_some_and(Value::is_string)
    {
        // Error blocks are never single-lined and ignore hide_object.
        if ctx.single_line {
            line.push_str(&ctx.eol);
        }
        line.push_str(&prettify_error_log(log, ctx));
    } else if !ctx.hide_object {
        let skip_keys: Vec<&str> = [&ctx.message_key, &ctx.level_key, &ctx.timestamp_key]
            .into_iter()
            .filter(|key| {
                matches!(
                    log.get(key.as_str()),
                    Some(Value::String(_) | Value::Number(_) | Value::Bool(_))
                )
            })
            .map(String::as_str)
            .collect();

        let object = prettify_object(log, &skip_keys, true, ctx.single_line, &ctx.indent, ctx);

        if ctx.single_line && !object.trim().is_empty() {
            line.push(' ');
        }
        line.push_str(&object);
    }

    Some(line)
}

/// Assemble the header fragments in display order.
fn compose_header(fragments: &PrettifiedFragments, ctx: &FormatContext) -> String {
    let mut line = String::new();

    if ctx.level_first
        && let Some(level) = &fragments.level
    {
        line.push_str(level);
    }

    if let Some(time) = &fragments.time {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(time);
    }

    if !ctx.level_first
        && let Some(level) = &fragments.level
    {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(level);
    }

    if let Some(metadata) = &fragments.metadata {
        if line.is_empty() {
            line.push_str(metadata);
        } else {
            line.push(' ');
            line.push_str(metadata);
            line.push(':');
        }
    }

    if !line.is_empty() && !line.ends_with(':') {
        line.push(':');
    }

    if let Some(message) = &fragments.message {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(message);
    }

    line
}

/// Produce the display record after include/ignore filtering.
///
/// Include wins over ignore. Both honor dotted paths; include rebuilds the
/// nested structure for each kept path.
fn filter_record(record: &Record, ctx: &FormatContext) -> Record {
    if let Some(include) = &ctx.include_keys {
        let mut kept = Record::new();
        for key in include {
            let segments = split_property_key(key);
            if let Some(value) = get_segments(record, &segments) {
                insert_segments(&mut kept, &segments, value.clone());
            }
        }
        return kept;
    }

    let mut copy = record.clone();
    for key in &ctx.ignore_keys {
        delete_property(&mut copy, key);
    }
    copy
}

fn insert_segments(target: &mut Record, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        target.insert(head.clone(), value);
        return;
    }
    let entry = target
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Record::new()));
    if let Value::Object(nested) = entry {
        insert_segments(nested, rest, value);
    }
}
