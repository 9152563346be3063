use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_value;

/// Format output as a table using the tabled crate.
///
/// Nested objects are flattened one level into dotted rows
/// (`comparisonMetrics.propertyVsSavings`); arrays of objects (validation
/// errors) are printed as their own table after the scalar rows.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                match val {
                    Value::Object(nested) => {
                        for (sub_key, sub_val) in nested {
                            builder.push_record([
                                format!("{key}.{sub_key}").as_str(),
                                render_value(sub_val).as_str(),
                            ]);
                        }
                    }
                    Value::Array(arr) if arr.iter().any(|item| item.is_object()) => {
                        // Deferred to a sub-table below
                    }
                    _ => {
                        builder.push_record([key.as_str(), render_value(val).as_str()]);
                    }
                }
            }
            let table = Table::from(builder);
            println!("{}", table);

            for (key, val) in map {
                if let Value::Array(arr) = val {
                    if arr.iter().any(|item| item.is_object()) {
                        println!("\n{}:", key);
                        print_array_table(arr);
                    }
                }
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        // Simple array of values
        for item in arr {
            println!("{}", render_value(item));
        }
    }
}
