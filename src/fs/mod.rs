//! Filesystem module.
//!
//! Provides:
//! - Destination path derivation
//! - Filename derivation and validation

pub mod naming;
pub mod paths;

pub use naming::{filename_from_url, sanitize_filename};
pub use paths::destination_path;
