//! Mapping vocabulary entries onto the note model

use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::template::FIELD_NAMES;
use crate::vocab::VocabEntry;

/// Characters used to encode note GUIDs (the target application's base91 set)
const GUID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// One flashcard's data, bound to the fixed note model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub fields: [String; 7],
    pub tags: Vec<String>,
    pub guid: String,
}

impl Note {
    pub fn word(&self) -> &str {
        &self.fields[0]
    }

    pub fn pronunciation(&self) -> &str {
        &self.fields[1]
    }

    pub fn definition(&self) -> &str {
        &self.fields[2]
    }

    pub fn example(&self) -> &str {
        &self.fields[3]
    }

    pub fn word_audio(&self) -> &str {
        &self.fields[4]
    }

    pub fn def_audio(&self) -> &str {
        &self.fields[5]
    }

    pub fn ex_audio(&self) -> &str {
        &self.fields[6]
    }

    /// Look up a field value by its model name
    pub fn field(&self, name: &str) -> Option<&str> {
        FIELD_NAMES
            .iter()
            .position(|f| *f == name)
            .map(|i| self.fields[i].as_str())
    }

    /// Plain-text value of the sort field (the first field)
    pub fn sort_field(&self) -> String {
        strip_html(&self.fields[0])
    }

    /// Duplicate-detection checksum: the first 32 bits of the SHA-1 of the
    /// sort field, as the target application computes it.
    pub fn checksum(&self) -> u32 {
        let digest = Sha1::digest(self.sort_field().as_bytes());
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }
}

/// Player markup for an audio file
pub fn sound_ref(filename: &str) -> String {
    format!("[sound:{}]", filename)
}

/// Bind an entry's fields to the note model
pub fn build_note(entry: &VocabEntry) -> Note {
    let fields = [
        entry.word.clone(),
        entry.pronunciation.clone(),
        entry.definition.clone(),
        entry.example.clone(),
        sound_ref(&entry.audio.word),
        sound_ref(&entry.audio.definition),
        sound_ref(&entry.audio.example),
    ];

    let tags = entry
        .part_of_speech
        .as_deref()
        .map(str::trim)
        .filter(|pos| !pos.is_empty())
        .map(|pos| vec![pos.replace(char::is_whitespace, "_")])
        .unwrap_or_default();

    let guid = guid_for(&fields);

    Note { fields, tags, guid }
}

/// Deterministic GUID: first 64 bits of the SHA-256 of the joined fields,
/// encoded in base91.
pub fn guid_for(fields: &[String]) -> String {
    let digest = Sha256::digest(fields.join("__").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    base91(u64::from_be_bytes(bytes))
}

fn base91(mut value: u64) -> String {
    let base = GUID_ALPHABET.len() as u64;
    let mut out = Vec::new();

    loop {
        out.push(GUID_ALPHABET[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }

    out.reverse();
    out.into_iter().map(char::from).collect()
}

fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        if ch == '<' {
            in_tag = true;
        } else if ch == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(ch);
        }
    }

    result.replace("&nbsp;", " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::AudioFiles;

    fn cat() -> VocabEntry {
        VocabEntry {
            word: "cat".to_string(),
            pronunciation: "/kæt/".to_string(),
            definition: "a feline".to_string(),
            example: "The cat sleeps.".to_string(),
            audio: AudioFiles {
                word: "cat.mp3".to_string(),
                definition: "catdef.mp3".to_string(),
                example: "catex.mp3".to_string(),
            },
            part_of_speech: None,
        }
    }

    #[test]
    fn test_build_note_fields() {
        let note = build_note(&cat());

        assert_eq!(note.word(), "cat");
        assert_eq!(note.pronunciation(), "/kæt/");
        assert_eq!(note.definition(), "a feline");
        assert_eq!(note.example(), "The cat sleeps.");
        assert_eq!(note.word_audio(), "[sound:cat.mp3]");
        assert_eq!(note.def_audio(), "[sound:catdef.mp3]");
        assert_eq!(note.ex_audio(), "[sound:catex.mp3]");
        assert_eq!(note.field("WordAudio"), Some("[sound:cat.mp3]"));
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_fields_are_verbatim() {
        let mut entry = cat();
        entry.definition = "  <b>a</b> small,   domesticated feline  ".to_string();
        let note = build_note(&entry);

        assert_eq!(note.definition(), entry.definition);
    }

    #[test]
    fn test_part_of_speech_becomes_tag() {
        let mut entry = cat();
        entry.part_of_speech = Some("proper noun".to_string());
        assert_eq!(build_note(&entry).tags, vec!["proper_noun"]);

        entry.part_of_speech = Some("  ".to_string());
        assert!(build_note(&entry).tags.is_empty());
    }

    #[test]
    fn test_guid_is_deterministic() {
        let a = build_note(&cat());
        let b = build_note(&cat());
        assert_eq!(a.guid, b.guid);

        let mut other = cat();
        other.word = "dog".to_string();
        assert_ne!(a.guid, build_note(&other).guid);
    }

    #[test]
    fn test_base91() {
        assert_eq!(base91(0), "a");
        assert_eq!(base91(91), "ba");
        assert!(base91(u64::MAX).bytes().all(|b| GUID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_sort_field_and_checksum() {
        let mut entry = cat();
        entry.word = "<b>cat</b>".to_string();
        let note = build_note(&entry);

        assert_eq!(note.sort_field(), "cat");
        // sha1("cat") = 9d989e8d...
        assert_eq!(note.checksum(), 0x9d98_9e8d);
    }
}
