//! Vocabulary input records
//!
//! This module provides:
//! - The `VocabEntry` record as it appears in `data/data.json`
//! - Loading and validating the input document

pub mod loader;
pub mod models;

pub use loader::{load, parse, LoadError};
pub use models::*;
