use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::{parse, DocumentFormat};

/// Read a request file; `.yaml`/`.yml` files are YAML, everything else JSON.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let format = match canonical.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Json,
    };
    tracing::debug!(path = %canonical.display(), ?format, "reading request file");

    parse(&contents, format)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.is_file() {
        return Err(format!("No such input file: {}", canonical.display()).into());
    }
    Ok(canonical)
}
