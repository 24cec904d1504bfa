//! Deck construction
//!
//! This module provides:
//! - The fixed two-sided note model and the deck identity
//! - Mapping vocabulary entries to notes
//! - The media manifest accumulated alongside the deck

pub mod builder;
pub mod note;
pub mod template;

pub use builder::{Deck, DeckBuilder, MediaManifest};
pub use note::{build_note, sound_ref, Note};
pub use template::{CardTemplate, DeckIdentity};
