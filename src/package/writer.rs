//! Writing decks to `.apkg` packages
//!
//! A package is a ZIP archive holding:
//! ```text
//! output.apkg
//! ├── collection.anki2   # SQLite collection with models, decks, notes, cards
//! ├── media              # JSON map of entry name -> media file name
//! ├── 0                  # media file bytes, one entry per file
//! ├── 1
//! └── ...
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Timelike, Utc};
use rusqlite::{params, Connection};
use tempfile::{NamedTempFile, TempDir};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::errors::{PackageError, Result};
use super::schema::{
    collection_conf, deck_options_json, decks_json, models_json, FIELD_SEPARATOR, SCHEMA_SQL,
    SCHEMA_VERSION,
};
use crate::deck::{Deck, MediaManifest};

pub const COLLECTION_ENTRY: &str = "collection.anki2";
pub const MEDIA_ENTRY: &str = "media";

/// Turns a deck and its media into archive bytes
pub trait PackageWriter {
    fn serialize(&self, deck: &Deck, manifest: &MediaManifest) -> Result<Vec<u8>>;
}

/// A media file resolved for bundling
#[derive(Debug)]
struct MediaFile {
    name: String,
    data: Vec<u8>,
}

/// Writer for the `.apkg` format
#[derive(Debug, Clone, Default)]
pub struct ApkgWriter {
    /// Skip manifest files that do not exist instead of failing
    pub allow_missing_media: bool,
    /// Fixed creation time; the current time is used when unset
    pub created_at: Option<DateTime<Utc>>,
}

impl ApkgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_missing_media(mut self, allow: bool) -> Self {
        self.allow_missing_media = allow;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Read every manifest file, bundling each file name once.
    /// Returns the bundled files and, in lenient mode, the paths skipped.
    fn collect_media(&self, manifest: &MediaManifest) -> Result<(Vec<MediaFile>, Vec<PathBuf>)> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for path in manifest.paths() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| PackageError::InvalidMediaPath(path.clone()))?;

            if !seen.insert(name.clone()) {
                continue;
            }

            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    if self.allow_missing_media {
                        log::warn!("Could not read media file {:?}, skipping", path);
                        skipped.push(path.clone());
                        continue;
                    }
                    return Err(PackageError::MissingMedia(path.clone()));
                }
                Err(e) => return Err(e.into()),
            };

            files.push(MediaFile { name, data });
        }

        Ok((files, skipped))
    }

    /// Build the collection database in a scratch directory and return its bytes
    fn write_collection(&self, deck: &Deck, now: DateTime<Utc>) -> Result<Vec<u8>> {
        let scratch = TempDir::new()?;
        let db_path = scratch.path().join(COLLECTION_ENTRY);

        let mut conn = Connection::open(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)?;

        let now_secs = now.timestamp();
        let now_millis = now.timestamp_millis();
        let identity = &deck.identity;

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
             VALUES (1, ?1, ?2, ?3, ?4, 0, 0, 0, ?5, ?6, ?7, ?8, '{}')",
            params![
                now_secs,
                now_millis,
                now_millis,
                SCHEMA_VERSION,
                collection_conf(identity).to_string(),
                models_json(identity, now_secs).to_string(),
                decks_json(identity, now_secs).to_string(),
                deck_options_json().to_string(),
            ],
        )?;

        {
            let mut insert_note = tx.prepare(
                "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
                 VALUES (?1, ?2, ?3, ?4, -1, ?5, ?6, ?7, ?8, 0, '')",
            )?;
            let mut insert_card = tx.prepare(
                "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor,
                                    reps, lapses, left, odue, odid, flags, data)
                 VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, ?5, 0, 0, 0, 0, 0, 0, 0, 0, '')",
            )?;

            for (position, note) in deck.notes().iter().enumerate() {
                let id = now_millis + position as i64;
                let tags = if note.tags.is_empty() {
                    String::new()
                } else {
                    format!(" {} ", note.tags.join(" "))
                };
                let fields = note.fields.join(FIELD_SEPARATOR);

                insert_note.execute(params![
                    id,
                    note.guid,
                    identity.model_id,
                    now_secs,
                    tags,
                    fields,
                    note.sort_field(),
                    note.checksum(),
                ])?;
                insert_card.execute(params![id, id, identity.deck_id, now_secs, position as i64])?;
            }
        }
        tx.commit()?;

        conn.close().map_err(|(_, e)| e)?;
        Ok(fs::read(&db_path)?)
    }
}

impl PackageWriter for ApkgWriter {
    fn serialize(&self, deck: &Deck, manifest: &MediaManifest) -> Result<Vec<u8>> {
        let now = self.created_at.unwrap_or_else(Utc::now);

        // Missing media aborts before anything else is produced
        let (media, _) = self.collect_media(manifest)?;
        let collection = self.write_collection(deck, now)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        if let Some(stamp) = zip_timestamp(now) {
            options = options.last_modified_time(stamp);
        }

        zip.start_file(COLLECTION_ENTRY, options)?;
        zip.write_all(&collection)?;

        let media_map: serde_json::Map<String, serde_json::Value> = media
            .iter()
            .enumerate()
            .map(|(index, file)| (index.to_string(), file.name.clone().into()))
            .collect();
        zip.start_file(MEDIA_ENTRY, options)?;
        zip.write_all(serde_json::to_string(&media_map)?.as_bytes())?;

        for (index, file) in media.iter().enumerate() {
            zip.start_file(index.to_string(), options)?;
            zip.write_all(&file.data)?;
        }

        let bytes = zip.finish()?.into_inner();
        log::debug!(
            "Serialized {} notes and {} media files ({} bytes)",
            deck.len(),
            media.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Entry timestamp for the archive; `None` outside the range ZIP can store
fn zip_timestamp(at: DateTime<Utc>) -> Option<zip::DateTime> {
    let year = u16::try_from(at.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second() as u8,
    )
    .ok()
}

/// Serialize the deck and write it to `output_path`.
///
/// The archive is built in memory and moved into place from a temporary
/// file in the same directory, so a failed run leaves no output behind.
pub fn finalize(
    writer: &dyn PackageWriter,
    deck: &Deck,
    manifest: &MediaManifest,
    output_path: &Path,
) -> Result<PathBuf> {
    let bytes = writer.serialize(deck, manifest)?;

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut staged = NamedTempFile::new_in(&parent)?;
    staged.write_all(&bytes)?;
    staged.flush()?;
    staged.persist(output_path).map_err(|e| e.error)?;

    log::info!("Wrote {} notes to {:?}", deck.len(), output_path);
    Ok(output_path.to_path_buf())
}
