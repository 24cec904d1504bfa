//! Data models for vocabulary input

use serde::{Deserialize, Serialize};

/// Audio file names for one vocabulary entry.
///
/// Each value is a bare file name living under the media directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFiles {
    pub word: String,
    pub definition: String,
    pub example: String,
}

impl AudioFiles {
    /// File names in card field order: word, definition, example
    pub fn in_order(&self) -> [&str; 3] {
        [&self.word, &self.definition, &self.example]
    }
}

/// One input record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub word: String,
    pub pronunciation: String,
    pub definition: String,
    pub example: String,
    pub audio: AudioFiles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}
