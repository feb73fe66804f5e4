pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Keys whose array values are schedule-like rows, in lookup order.
pub(crate) const ROW_KEYS: [&str; 3] = ["schedule", "rows", "chart"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// First array of row objects in a result: the result itself, a known row key, or one level
/// down (e.g. `page.rows` inside a report).
pub(crate) fn find_rows(result: &Value) -> Option<&Vec<Value>> {
    match result {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => ROW_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .or_else(|| {
                map.values()
                    .filter_map(Value::as_object)
                    .find_map(|inner| {
                        ROW_KEYS
                            .iter()
                            .find_map(|k| inner.get(*k).and_then(Value::as_array))
                    })
            }),
        _ => None,
    }
}
