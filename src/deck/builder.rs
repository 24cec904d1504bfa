//! Accumulating notes and media for one package

use std::path::{Component, Path, PathBuf};

use super::note::{build_note, Note};
use super::template::DeckIdentity;
use crate::vocab::VocabEntry;

/// A named collection of notes sharing one identity
#[derive(Debug, Clone)]
pub struct Deck {
    pub identity: DeckIdentity,
    notes: Vec<Note>,
}

impl Deck {
    pub fn new(identity: DeckIdentity) -> Self {
        Self {
            identity,
            notes: Vec::new(),
        }
    }

    /// Append a note; notes keep insertion order
    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Audio files that must be bundled with the package, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaManifest {
    paths: Vec<PathBuf>,
}

impl MediaManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the three audio paths of `entry` under `media_root`.
    /// Existence is not checked here.
    pub fn register_media(&mut self, entry: &VocabEntry, media_root: &Path) -> [PathBuf; 3] {
        let paths = entry.audio.in_order().map(|name| under_root(media_root, name));
        self.paths.extend(paths.iter().cloned());
        paths
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// `media_root/name`, keeping only the plain components of `name` so the
/// result never leaves `media_root`
fn under_root(media_root: &Path, name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(media_root.to_path_buf(), |path, part| path.join(part))
}

/// Single linear pass from entries to a deck plus its media manifest
pub struct DeckBuilder {
    deck: Deck,
    manifest: MediaManifest,
    media_root: PathBuf,
}

impl DeckBuilder {
    pub fn new(identity: DeckIdentity, media_root: impl Into<PathBuf>) -> Self {
        Self {
            deck: Deck::new(identity),
            manifest: MediaManifest::new(),
            media_root: media_root.into(),
        }
    }

    pub fn push(&mut self, entry: &VocabEntry) {
        let note = build_note(entry);
        log::debug!("Adding note '{}' ({})", note.word(), note.guid);
        self.deck.add_note(note);
        self.manifest.register_media(entry, &self.media_root);
    }

    pub fn finish(self) -> (Deck, MediaManifest) {
        (self.deck, self.manifest)
    }

    /// Build a deck from `entries` in one pass
    pub fn build(
        identity: DeckIdentity,
        media_root: impl Into<PathBuf>,
        entries: &[VocabEntry],
    ) -> (Deck, MediaManifest) {
        let mut builder = Self::new(identity, media_root);
        for entry in entries {
            builder.push(entry);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{parse, AudioFiles};

    fn entry(word: &str) -> VocabEntry {
        VocabEntry {
            word: word.to_string(),
            pronunciation: format!("/{word}/"),
            definition: format!("definition of {word}"),
            example: format!("An example with {word}."),
            audio: AudioFiles {
                word: format!("{word}_word.mp3"),
                definition: format!("{word}_def.mp3"),
                example: format!("{word}_ex.mp3"),
            },
            part_of_speech: None,
        }
    }

    #[test]
    fn test_cat_scenario() {
        let entries = parse(r#"[{"word":"cat","pronunciation":"/kæt/","definition":"a feline","example":"The cat sleeps.","audio":{"word":"cat.mp3","definition":"catdef.mp3","example":"catex.mp3"}}]"#).unwrap();
        let (deck, manifest) = DeckBuilder::build(DeckIdentity::default(), "public/audio", &entries);

        assert_eq!(deck.len(), 1);
        assert_eq!(deck.notes()[0].word_audio(), "[sound:cat.mp3]");
        assert_eq!(
            manifest.paths(),
            &[
                PathBuf::from("public/audio/cat.mp3"),
                PathBuf::from("public/audio/catdef.mp3"),
                PathBuf::from("public/audio/catex.mp3"),
            ]
        );
    }

    #[test]
    fn test_notes_and_media_follow_input_order() {
        let words = ["apple", "banana", "cherry", "date"];
        let entries: Vec<_> = words.iter().map(|w| entry(w)).collect();
        let (deck, manifest) = DeckBuilder::build(DeckIdentity::default(), "media", &entries);

        assert_eq!(deck.len(), words.len());
        assert_eq!(manifest.len(), 3 * words.len());

        for (i, word) in words.iter().enumerate() {
            let note = &deck.notes()[i];
            assert_eq!(note.word(), *word);

            let media = &manifest.paths()[3 * i..3 * i + 3];
            assert_eq!(media[0], Path::new("media").join(format!("{word}_word.mp3")));
            assert_eq!(media[1], Path::new("media").join(format!("{word}_def.mp3")));
            assert_eq!(media[2], Path::new("media").join(format!("{word}_ex.mp3")));

            // Each audio field refers to the matching manifest entry
            for (field, path) in [note.word_audio(), note.def_audio(), note.ex_audio()]
                .iter()
                .zip(media)
            {
                let name = path.file_name().unwrap().to_string_lossy();
                assert_eq!(*field, format!("[sound:{name}]"));
            }
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let entries: Vec<_> = ["one", "two"].iter().map(|w| entry(w)).collect();
        let (deck_a, manifest_a) = DeckBuilder::build(DeckIdentity::default(), "media", &entries);
        let (deck_b, manifest_b) = DeckBuilder::build(DeckIdentity::default(), "media", &entries);

        assert_eq!(manifest_a, manifest_b);
        assert_eq!(deck_a.notes(), deck_b.notes());
    }

    #[test]
    fn test_register_media_returns_paths() {
        let mut manifest = MediaManifest::new();
        let paths = manifest.register_media(&entry("x"), Path::new("audio"));

        assert_eq!(paths[0], PathBuf::from("audio/x_word.mp3"));
        assert_eq!(manifest.paths(), &paths);
    }

    #[test]
    fn test_media_paths_stay_under_root() {
        let mut rogue = entry("x");
        rogue.audio.word = "/etc/hostname".to_string();
        rogue.audio.definition = "../../secret.mp3".to_string();
        rogue.audio.example = "./nested/x_ex.mp3".to_string();

        let (_, manifest) = DeckBuilder::build(DeckIdentity::default(), "public/audio", &[rogue]);

        assert_eq!(
            manifest.paths(),
            &[
                PathBuf::from("public/audio/etc/hostname"),
                PathBuf::from("public/audio/secret.mp3"),
                PathBuf::from("public/audio/nested/x_ex.mp3"),
            ]
        );
        for path in manifest.paths() {
            assert!(path.starts_with("public/audio"));
        }
    }

    #[test]
    fn test_empty_input() {
        let (deck, manifest) = DeckBuilder::build(DeckIdentity::default(), "media", &[]);
        assert!(deck.is_empty());
        assert!(manifest.is_empty());
    }
}
