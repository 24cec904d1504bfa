pub mod config;
pub mod deck;
pub mod package;
pub mod pipeline;
pub mod vocab;

pub use config::BuildConfig;
pub use pipeline::{run, BuildError, BuildSummary, ErrorKind};
