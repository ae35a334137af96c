pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// JSON documents open with a brace or bracket; anything else is read as YAML.
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('{') | Some('[') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

pub fn parse<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Load a typed request from `--input`, else from piped stdin.
///
/// Returns `None` when neither is available so the caller can fall back to flags.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_document(path)?));
    }
    match stdin::read_stdin()? {
        Some(text) => Ok(Some(parse(&text, DocumentFormat::sniff(&text))?)),
        None => Ok(None),
    }
}
