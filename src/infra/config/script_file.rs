use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use sqlrun_domain::ScriptSpec;

#[derive(Debug, Error)]
pub enum ScriptFileError {
    #[error("Read error: {0}")]
    ReadError(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Duplicate script name: {0}")]
    DuplicateName(String),
    #[error("Script has an empty query: {0}")]
    EmptyQuery(String),
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    scripts: Vec<ScriptEntry>,
}

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    name: String,
    query: String,
}

/// Load an ordered script batch from a TOML file of `[[scripts]]` entries.
/// Order in the file is execution order. Script names must be unique within
/// the batch and queries must be non-empty.
pub fn load_scripts(path: &Path) -> Result<Vec<ScriptSpec>, ScriptFileError> {
    let content = fs::read_to_string(path).map_err(|e| ScriptFileError::ReadError(e.to_string()))?;
    let file: ScriptFile =
        toml::from_str(&content).map_err(|e| ScriptFileError::InvalidFormat(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut specs = Vec::with_capacity(file.scripts.len());

    for entry in file.scripts {
        if entry.query.trim().is_empty() {
            return Err(ScriptFileError::EmptyQuery(entry.name));
        }
        if !seen.insert(entry.name.clone()) {
            return Err(ScriptFileError::DuplicateName(entry.name));
        }
        specs.push(ScriptSpec::new(entry.name, entry.query));
    }

    Ok(specs)
}
