use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{payload, scalar_text};

/// Headline fields, most important first. Nested panels are searched too,
/// so a full dashboard prints its IRR.
const HEADLINE_KEYS: [&str; 7] = [
    "irr",
    "moic",
    "totalDeployed",
    "currentValuation",
    "counts",
    "percentage",
    "rate",
];

/// Print just the headline number of a result.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = payload(value);
    let Value::Object(map) = result else {
        return writeln!(out, "{}", scalar_text(result));
    };

    for key in HEADLINE_KEYS {
        if let Some(found) = find_key(map, key) {
            return writeln!(out, "{}", scalar_text(found));
        }
    }
    match map.iter().next() {
        Some((key, val)) => writeln!(out, "{}: {}", key, scalar_text(val)),
        None => writeln!(out),
    }
}

/// Find a non-null field here or in any nested object.
fn find_key<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
        return Some(val);
    }
    map.values()
        .filter_map(Value::as_object)
        .find_map(|nested| find_key(nested, key))
}
