use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::{payload, scalar_text};

/// Human-readable tables.
///
/// Scalar fields of the result go into one Field/Value table. Each nested
/// object or list of records gets its own titled table underneath, so the
/// full dashboard prints as one section per panel.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    write_section(out, None, payload(value))?;

    if let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) {
        write_footer(out, envelope)?;
    }
    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: Option<&str>, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(map) => {
            let scalars: Vec<(&String, &Value)> = map.iter().filter(|(_, v)| !is_section(v)).collect();
            if !scalars.is_empty() {
                write_title(out, title)?;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in scalars {
                    builder.push_record([key.clone(), cell(val)]);
                }
                writeln!(out, "{}", Table::from(builder))?;
            }
            for (key, val) in map.iter().filter(|(_, v)| is_section(v)) {
                let nested = match title {
                    Some(parent) => format!("{parent} / {key}"),
                    None => key.clone(),
                };
                write_section(out, Some(&nested), val)?;
            }
            Ok(())
        }
        Value::Array(rows) if rows.iter().any(Value::is_object) => {
            write_title(out, title)?;
            writeln!(out, "{}", record_table(rows))
        }
        Value::Array(rows) if rows.is_empty() => {
            write_title(out, title)?;
            writeln!(out, "(none)")
        }
        other => {
            write_title(out, title)?;
            writeln!(out, "{}", cell(other))
        }
    }
}

/// Objects and lists of records render as their own table.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.is_empty() || items.iter().any(Value::is_object),
        _ => false,
    }
}

fn record_table(rows: &[Value]) -> Table {
    let mut headers: Vec<&str> = Vec::new();
    for row in rows.iter().filter_map(Value::as_object) {
        for key in row.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(headers.iter().map(|h| row.get(*h).map(cell).unwrap_or_default()));
    }
    Table::from(builder)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Null => "-".to_string(),
        other => scalar_text(other),
    }
}

fn write_title<W: Write>(out: &mut W, title: Option<&str>) -> io::Result<()> {
    match title {
        Some(t) => writeln!(out, "\n{t}"),
        None => Ok(()),
    }
}

fn write_footer<W: Write>(out: &mut W, envelope: &Map<String, Value>) -> io::Result<()> {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {w}")?;
            }
        }
    }
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {methodology}")?;
    }
    Ok(())
}
