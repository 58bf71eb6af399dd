//! Log level tables with custom-level support.
//!
//! Levels follow the bunyan/pino numeric convention (10 = trace … 60 =
//! fatal). Custom tables are supplied as CSV `name:number` pairs and either
//! merge with or replace the built-in table. Unknown levels display as
//! [`DEFAULT_LEVEL_LABEL`].

use std::collections::HashMap;

use serde_json::Value;

/// Display label for levels with no table entry.
pub const DEFAULT_LEVEL_LABEL: &str = "USERLVL";

/// Built-in level table, bunyan/pino numeric convention.
const DEFAULT_LEVELS: &[(i64, &str)] = &[
    (10, "TRACE"),
    (20, "DEBUG"),
    (30, "INFO"),
    (40, "WARN"),
    (50, "ERROR"),
    (60, "FATAL"),
];

/// Bidirectional level table (number ↔ label).
///
/// Labels are stored uppercase for display and matched case-insensitively
/// on lookup.
#[derive(Debug, Clone)]
pub struct LevelTable {
    by_number: HashMap<i64, String>,
    by_label: HashMap<String, i64>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::with_custom(None, false)
    }
}

impl LevelTable {
    /// Build a table from the built-in levels plus optional custom
    /// CSV `name:number` pairs.
    ///
    /// With `use_only_custom` set and custom pairs present, the custom
    /// pairs replace the built-in table entirely. Malformed pairs are
    /// skipped silently.
    pub fn with_custom(custom: Option<&str>, use_only_custom: bool) -> Self {
        let custom_pairs = custom.map(parse_custom_levels).unwrap_or_default();

        let mut by_number = HashMap::new();
        let mut by_label = HashMap::new();

        if !(use_only_custom && !custom_pairs.is_empty()) {
            for &(num, label) in DEFAULT_LEVELS {
                by_number.insert(num, label.to_string());
                by_label.insert(label.to_lowercase(), num);
            }
        }

        for (label, num) in custom_pairs {
            by_label.insert(label.to_lowercase(), num);
            by_number.insert(num, label.to_uppercase());
        }

        Self {
            by_number,
            by_label,
        }
    }

    /// Label for a numeric level, if the table has one.
    pub fn label(&self, number: i64) -> Option<&str> {
        self.by_number.get(&number).map(String::as_str)
    }

    /// Label for a numeric level, falling back to [`DEFAULT_LEVEL_LABEL`].
    pub fn display_label(&self, number: i64) -> &str {
        self.label(number).unwrap_or(DEFAULT_LEVEL_LABEL)
    }

    /// Numeric level for a label, case-insensitive.
    pub fn number(&self, label: &str) -> Option<i64> {
        self.by_label.get(&label.to_lowercase()).copied()
    }

    /// Display label for a raw level value (numeric or named).
    pub fn label_for_value(&self, value: &Value) -> String {
        match level_number(value, self) {
            Some(num) => self.display_label(num).to_string(),
            None => DEFAULT_LEVEL_LABEL.to_string(),
        }
    }

    /// Resolve a minimum-level specification (label or number) to its
    /// numeric threshold. Unresolvable specs disable the filter.
    pub fn resolve_minimum(&self, spec: &str) -> Option<i64> {
        if let Ok(num) = spec.trim().parse::<i64>() {
            return Some(num);
        }
        self.number(spec.trim())
    }
}

/// Numeric form of a record's level value.
///
/// Integer numbers are used as-is; named levels resolve through the table.
/// Non-integer numbers and other value types are unknown.
pub fn level_number(value: &Value, table: &LevelTable) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => table.number(s),
        _ => None,
    }
}

/// Parse CSV `name:number` pairs, skipping malformed entries.
fn parse_custom_levels(csv: &str) -> Vec<(String, i64)> {
    csv.split(',')
        .filter_map(|pair| {
            let (name, value) = pair.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let number = value.trim().parse::<i64>().ok()?;
            Some((name.to_string(), number))
        })
        .collect()
}
