//! Build settings
//!
//! Settings come from an optional JSON file; any key left out falls back
//! to the default layout (`data/data.json` in, `public/output.apkg` out).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deck::DeckIdentity;
use crate::package::schema::DEFAULT_DECK_ID;

pub const DEFAULT_CONFIG_FILE: &str = "vocab_deck.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck id {0} is reserved for the built-in default deck")]
    ReservedDeckId(i64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    /// Vocabulary list to read
    pub input: PathBuf,
    /// Directory holding the audio files named in the input
    pub media_dir: PathBuf,
    /// Package to write
    pub output: PathBuf,
    pub identity: DeckIdentity,
    /// Skip missing audio files instead of aborting
    pub allow_missing_media: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/data.json"),
            media_dir: PathBuf::from("public/audio"),
            output: PathBuf::from("public/output.apkg"),
            identity: DeckIdentity::default(),
            allow_missing_media: false,
        }
    }
}

/// Load settings from `path`, or the defaults if it does not exist
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    if !path.exists() {
        return Ok(BuildConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: BuildConfig = serde_json::from_str(&content)?;
    if config.identity.deck_id == DEFAULT_DECK_ID {
        return Err(ConfigError::ReservedDeckId(config.identity.deck_id));
    }
    log::debug!("Loaded settings from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(DEFAULT_CONFIG_FILE)).unwrap();

        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.input, PathBuf::from("data/data.json"));
        assert_eq!(config.media_dir, PathBuf::from("public/audio"));
        assert_eq!(config.output, PathBuf::from("public/output.apkg"));
        assert!(!config.allow_missing_media);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{"output":"out/deck.apkg","identity":{"deckName":"Spanish"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output, PathBuf::from("out/deck.apkg"));
        assert_eq!(config.input, PathBuf::from("data/data.json"));
        assert_eq!(config.identity.deck_name, "Spanish");
        assert_eq!(config.identity.deck_id, 2059400110);
    }

    #[test]
    fn test_default_deck_id_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{"identity":{"deckId":1}}"#).unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::ReservedDeckId(1))
        ));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Json(_))));
    }
}
