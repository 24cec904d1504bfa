use std::path::Path;

use anyhow::{Context, Result};

use vocab_deck_lib::config::{load_config, DEFAULT_CONFIG_FILE};
use vocab_deck_lib::BuildConfig;

use crate::BuildArgs;

/// Resolved settings for one CLI invocation
pub struct App {
    pub config: BuildConfig,
}

impl App {
    /// Load the settings file and apply command-line overrides on top
    pub fn new(config_path: Option<&Path>, args: &BuildArgs) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Settings file {} not found", path.display());
                }
                load_config(path)
            }
            None => load_config(Path::new(DEFAULT_CONFIG_FILE)),
        }
        .context("Failed to load settings")?;

        Ok(Self {
            config: apply_overrides(config, args),
        })
    }
}

fn apply_overrides(mut config: BuildConfig, args: &BuildArgs) -> BuildConfig {
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(media_dir) = &args.media_dir {
        config.media_dir = media_dir.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(deck_name) = &args.deck_name {
        config.identity.deck_name = deck_name.clone();
    }
    if args.allow_missing_media {
        config.allow_missing_media = true;
    }
    config
}
