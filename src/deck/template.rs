//! The fixed note model every vocabulary card is rendered with

use serde::{Deserialize, Serialize};

/// Field names of the note model, in storage order
pub const FIELD_NAMES: [&str; 7] = [
    "Word",
    "Pronunciation",
    "Definition",
    "Example",
    "WordAudio",
    "DefAudio",
    "ExAudio",
];

/// A single card template (one rendered card per note)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTemplate {
    pub name: &'static str,
    /// Question side
    pub qfmt: &'static str,
    /// Answer side
    pub afmt: &'static str,
}

/// Front: word, pronunciation and its audio. Back: the front plus the
/// definition and example, each followed by its audio.
pub const WORD_CARD: CardTemplate = CardTemplate {
    name: "Card 1",
    qfmt: "{{Word}}<br>{{Pronunciation}}<br>{{WordAudio}}",
    afmt: "{{FrontSide}}<hr id=\"answer\">{{Definition}}<br>{{DefAudio}}<br>{{Example}}<br>{{ExAudio}}",
};

pub const TEMPLATES: [CardTemplate; 1] = [WORD_CARD];

pub const MODEL_CSS: &str = ".card {\n font-family: arial;\n font-size: 20px;\n text-align: center;\n color: black;\n background-color: white;\n}\n";

pub const DEFAULT_DECK_ID: i64 = 2059400110;
pub const DEFAULT_DECK_NAME: &str = "My Vocab Deck";
pub const DEFAULT_MODEL_ID: i64 = 1607392319;
pub const DEFAULT_MODEL_NAME: &str = "Word Model";

/// Stable identifiers the target application uses to match an imported
/// deck and model against ones it already has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckIdentity {
    pub deck_id: i64,
    pub deck_name: String,
    pub model_id: i64,
    pub model_name: String,
}

impl Default for DeckIdentity {
    fn default() -> Self {
        Self {
            deck_id: DEFAULT_DECK_ID,
            deck_name: DEFAULT_DECK_NAME.to_string(),
            model_id: DEFAULT_MODEL_ID,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

/// Field names referenced as `{{Name}}` in a template side, in order of
/// first appearance. `FrontSide` is not a field and is skipped.
pub fn referenced_fields(side: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = side;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if name != "FrontSide" && !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 2..];
    }

    names
}

/// Ordinals of the fields the question side needs; a card is generated
/// when any of them is non-empty.
pub fn required_field_ords(template: &CardTemplate) -> Vec<usize> {
    referenced_fields(template.qfmt)
        .into_iter()
        .filter_map(|name| FIELD_NAMES.iter().position(|f| *f == name))
        .collect()
}
