use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use ventura_core::EngineConfig;

/// Read a whole file, returning its resolved path alongside the contents for error messages.
fn read_file(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    Ok((resolved, contents))
}

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (resolved, contents) = read_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

/// Read an engine config. `.yaml` / `.yml` files are parsed as YAML, anything else as JSON.
/// Fields left out keep their defaults.
pub fn read_config(path: &str) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let (resolved, contents) = read_file(path)?;
    let parsed: Result<EngineConfig, String> = match resolved.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
        _ => EngineConfig::from_json(&contents).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

/// Resolve relative paths against the working directory and require a regular file.
pub(crate) fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        let reason = if resolved.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{}: {}", reason, resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported() {
        let err = resolve_path("definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = std::env::temp_dir();
        let err = resolve_path(dir.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }
}
