//! Destination path management.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::Result;
use crate::fs::naming::filename_from_url;

/// Get the local path a media URL is saved to.
///
/// Files go directly into the save directory; an existing file of the same
/// name is overwritten.
pub fn destination_path(save_dir: &Path, url: &Url) -> Result<PathBuf> {
    Ok(save_dir.join(filename_from_url(url)?))
}
