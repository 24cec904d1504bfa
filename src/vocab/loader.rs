//! Loading vocabulary lists from JSON
//!
//! The input is a single JSON array of objects. A document that is not
//! valid JSON or not an array is rejected as a whole; a record missing a
//! required field is rejected with its position so the caller can report it.

use std::fs;
use std::path::{Component, Path};

use serde_json::Value;
use thiserror::Error;

use super::models::VocabEntry;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Expected a JSON array of entries, found {0}")]
    NotArray(&'static str),

    #[error("Entry {index} is invalid: {source}")]
    Schema {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entry {index} names audio file '{name}' outside the media directory")]
    AudioOutsideMediaDir { index: usize, name: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Read and validate the vocabulary list at `path`
pub fn load(path: &Path) -> Result<Vec<VocabEntry>> {
    let content = fs::read_to_string(path)?;
    let entries = parse(&content)?;
    log::info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Validate an in-memory vocabulary document
pub fn parse(content: &str) -> Result<Vec<VocabEntry>> {
    let document: Value = serde_json::from_str(content).map_err(LoadError::Parse)?;

    let items = match document {
        Value::Array(items) => items,
        other => return Err(LoadError::NotArray(json_kind(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let entry: VocabEntry = serde_json::from_value(item)
                .map_err(|source| LoadError::Schema { index, source })?;
            check_audio_names(index, &entry)?;
            Ok(entry)
        })
        .collect()
}

/// Audio names are relative to the media directory and may not climb out of it
fn check_audio_names(index: usize, entry: &VocabEntry) -> Result<()> {
    for name in entry.audio.in_order() {
        let escapes = Path::new(name).components().any(|c| {
            matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir)
        });
        if escapes {
            return Err(LoadError::AudioOutsideMediaDir {
                index,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
