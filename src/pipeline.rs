//! One build: load the vocabulary list, build the deck, write the package

use std::path::PathBuf;

use thiserror::Error;

use crate::config::BuildConfig;
use crate::deck::{DeckBuilder, MediaManifest};
use crate::package::{finalize, PackageError, PackageWriter};
use crate::vocab::{self, LoadError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to load vocabulary: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to write package: {0}")]
    Package(#[from] PackageError),
}

/// Coarse failure class of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not valid JSON or not an array
    Parse,
    /// A record is missing a required field or names audio outside the media directory
    Schema,
    /// Input unreadable, output unwritable or media missing
    Io,
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Load(LoadError::Parse(_) | LoadError::NotArray(_)) => ErrorKind::Parse,
            BuildError::Load(
                LoadError::Schema { .. } | LoadError::AudioOutsideMediaDir { .. },
            ) => ErrorKind::Schema,
            BuildError::Load(LoadError::Io(_)) | BuildError::Package(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub note_count: usize,
    pub manifest: MediaManifest,
}

/// Run a full build. Nothing is written unless every step succeeds.
pub fn run(config: &BuildConfig, writer: &dyn PackageWriter) -> Result<BuildSummary> {
    let entries = vocab::load(&config.input)?;

    let (deck, manifest) =
        DeckBuilder::build(config.identity.clone(), &config.media_dir, &entries);
    log::info!(
        "Built deck '{}' with {} notes and {} media references",
        deck.identity.deck_name,
        deck.len(),
        manifest.len()
    );

    let output = finalize(writer, &deck, &manifest, &config.output)?;

    Ok(BuildSummary {
        output,
        note_count: deck.len(),
        manifest,
    })
}
