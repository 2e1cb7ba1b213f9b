use serde_json::Value;
use std::io::{self, Write};

use super::{payload, scalar_text};

/// CSV output.
///
/// A list of records becomes one row per record. Anything else is flattened
/// into `field,value` rows with dotted paths (`performance.irr`,
/// `sectorAllocation.0.sector`).
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    match payload(value) {
        Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
            write_rows(&mut wtr, rows)?;
        }
        other => {
            wtr.write_record(["field", "value"])?;
            let mut pairs = Vec::new();
            flatten("", other, &mut pairs);
            for (field, val) in pairs {
                wtr.write_record([field, val])?;
            }
        }
    }
    wtr.flush()
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> io::Result<()> {
    let headers: Vec<&str> = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();
    wtr.write_record(&headers)?;

    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten(&join(key), val, pairs);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), item, pairs);
            }
        }
        scalar => pairs.push((prefix.to_string(), scalar_text(scalar))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, &value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_record_list_is_tabular() {
        let v = json!([
            {"sector": "AI", "value": "300", "percentage": 75.0},
            {"sector": "SaaS", "value": "100", "percentage": 25.0}
        ]);
        assert_eq!(
            render(v),
            "percentage,sector,value\n75.0,AI,300\n25.0,SaaS,100\n"
        );
    }

    #[test]
    fn test_nested_result_uses_dotted_paths() {
        let v = json!({
            "result": {"performance": {"irr": 12.5}, "sectorAllocation": [{"sector": "AI"}]},
            "warnings": []
        });
        let text = render(v);
        assert!(text.starts_with("field,value\n"));
        assert!(text.contains("performance.irr,12.5\n"));
        assert!(text.contains("sectorAllocation.0.sector,AI\n"));
    }
}
