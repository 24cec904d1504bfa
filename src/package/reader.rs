//! Reading `.apkg` packages back for inspection

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;
use tempfile::TempDir;
use zip::ZipArchive;

use super::errors::{PackageError, Result};
use super::schema::{DEFAULT_DECK_ID, FIELD_SEPARATOR};
use super::writer::{COLLECTION_ENTRY, MEDIA_ENTRY};

/// A note as stored in a package
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageNote {
    pub guid: String,
    pub fields: Vec<String>,
    pub tags: Vec<String>,
}

/// What a package contains
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub deck_names: Vec<String>,
    pub model_names: Vec<String>,
    pub notes: Vec<PackageNote>,
    pub card_count: usize,
    /// Bundled media file names, in entry order
    pub media: Vec<String>,
}

/// Open a package and summarize its decks, notes and media
pub fn read_package(path: &Path) -> Result<PackageSummary> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut collection = Vec::new();
    archive
        .by_name(COLLECTION_ENTRY)
        .map_err(|_| PackageError::InvalidPackage(format!("{} not found", COLLECTION_ENTRY)))?
        .read_to_end(&mut collection)?;

    let media = match archive.by_name(MEDIA_ENTRY) {
        Ok(mut entry) => {
            let mut content = String::new();
            entry.read_to_string(&mut content)?;
            media_names(&content)?
        }
        Err(_) => Vec::new(),
    };

    let scratch = TempDir::new()?;
    let db_path = scratch.path().join(COLLECTION_ENTRY);
    fs::write(&db_path, &collection)?;
    let conn = Connection::open(&db_path)?;

    let (models, decks): (String, String) =
        conn.query_row("SELECT models, decks FROM col LIMIT 1", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;

    let model_names = names_in(&models, None)?;
    let deck_names = names_in(&decks, Some(DEFAULT_DECK_ID))?;

    let mut stmt = conn.prepare("SELECT guid, flds, tags FROM notes ORDER BY id")?;
    let notes = stmt
        .query_map([], |row| {
            let guid: String = row.get(0)?;
            let flds: String = row.get(1)?;
            let tags: String = row.get(2)?;
            Ok(PackageNote {
                guid,
                fields: flds.split(FIELD_SEPARATOR).map(String::from).collect(),
                tags: tags.split_whitespace().map(String::from).collect(),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let card_count: i64 = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;

    Ok(PackageSummary {
        deck_names,
        model_names,
        notes,
        card_count: card_count as usize,
        media,
    })
}

/// `name` of every object in an id-keyed JSON map, skipping `exclude_id`
fn names_in(json: &str, exclude_id: Option<i64>) -> Result<Vec<String>> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut entries: Vec<(i64, String)> = map
        .iter()
        .filter_map(|(id, value)| {
            let id = id.parse::<i64>().ok()?;
            let name = value.get("name")?.as_str()?.to_string();
            Some((id, name))
        })
        .filter(|(id, _)| Some(*id) != exclude_id)
        .collect();
    entries.sort();
    Ok(entries.into_iter().map(|(_, name)| name).collect())
}

/// Media file names ordered by their numeric entry name
fn media_names(json: &str) -> Result<Vec<String>> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut entries: Vec<(usize, String)> = Vec::with_capacity(map.len());

    for (index, name) in map {
        let index = index
            .parse::<usize>()
            .map_err(|_| PackageError::InvalidPackage(format!("bad media entry '{}'", index)))?;
        let name = name
            .as_str()
            .ok_or_else(|| PackageError::InvalidPackage(format!("bad media name for {}", index)))?
            .to_string();
        entries.push((index, name));
    }

    entries.sort();
    Ok(entries.into_iter().map(|(_, name)| name).collect())
}
