pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten a JSON object one level deep into (dotted key, rendered value)
/// rows, e.g. `comparisonMetrics.propertyVsSavings`. Shared by the table and
/// CSV formatters so both render nested result sections the same way.
pub fn flatten_rows(map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(nested) => {
                for (sub_key, sub_val) in nested {
                    rows.push((format!("{key}.{sub_key}"), render_value(sub_val)));
                }
            }
            _ => rows.push((key.clone(), render_value(val))),
        }
    }
    rows
}

/// Render a leaf JSON value for tabular output.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(render_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
