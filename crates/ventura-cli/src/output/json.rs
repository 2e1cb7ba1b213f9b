use serde_json::Value;
use std::io::{self, Write};

/// Pretty-printed JSON, envelope included.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_keeps_key_names() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({"totalDeployed": "100"})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"totalDeployed\": \"100\""));
        assert!(text.ends_with('\n'));
    }
}
