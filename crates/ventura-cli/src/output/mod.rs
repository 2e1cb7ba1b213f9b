pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Json => json::write_json(&mut out, value),
        OutputFormat::Table => table::write_table(&mut out, value),
        OutputFormat::Csv => csv_out::write_csv(&mut out, value),
        OutputFormat::Minimal => minimal::write_minimal(&mut out, value),
    };
    // A closed pipe (e.g. `| head`) is not worth reporting.
    if let Err(e) = written.and_then(|_| out.flush()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            tracing::error!(error = %e, "failed to write output");
        }
    }
}

/// Strip the computation envelope, if present.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Render a scalar for a cell; containers fall back to compact JSON.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
