use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
///
/// Results that carry a series (monthly projection, amortization rows,
/// compared loans) are written one record per row; anything else becomes a
/// two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => match first_series(map) {
            Some(rows) => write_array_csv(&mut wtr, rows),
            None => write_fields_csv(&mut wtr, map),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn first_series(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    map.values().find_map(|v| match v {
        Value::Array(arr) if !arr.is_empty() && arr.iter().all(Value::is_object) => Some(arr),
        _ => None,
    })
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let rows: Vec<Vec<(String, String)>> = arr.iter().map(flatten_record).collect();
    let Some(first) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in &rows {
        let values: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&values);
    }
}

/// Flatten one level of nesting so `result.monthly_payment` becomes its own
/// column.
fn flatten_record(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(inner) => {
                        for (inner_key, inner_val) in inner {
                            out.push((format!("{key}.{inner_key}"), format_csv_value(inner_val)));
                        }
                    }
                    _ => out.push((key.clone(), format_csv_value(val))),
                }
            }
        }
        _ => out.push(("value".to_string(), format_csv_value(value))),
    }
    out
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let v = json!({"label": "A", "result": {"monthly_payment": "10"}});
        let flat = flatten_record(&v);
        assert!(flat.contains(&("label".to_string(), "A".to_string())));
        assert!(flat.contains(&("result.monthly_payment".to_string(), "10".to_string())));
    }

    #[test]
    fn test_first_series_picks_record_array() {
        let v = json!({"break_even_month": 3, "months": [{"month": 1}]});
        let map = v.as_object().unwrap();
        assert_eq!(first_series(map).map(|a| a.len()), Some(1));
    }
}
