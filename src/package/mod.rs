//! Deck packages (`.apkg`)
//!
//! This module provides:
//! - The `PackageWriter` seam and the `.apkg` implementation
//! - Writing the finished package without leaving partial output
//! - Reading a package back for inspection

pub mod errors;
pub mod reader;
pub mod schema;
pub mod writer;

pub use errors::PackageError;
pub use reader::{read_package, PackageNote, PackageSummary};
pub use writer::{finalize, ApkgWriter, PackageWriter};
