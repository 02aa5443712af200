//! Download task definition.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};
use crate::fs::destination_path;

/// One media URL paired with the file it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub source_url: Url,
    pub destination: PathBuf,
}

impl DownloadTask {
    /// Build the task for a media URL inside the save directory.
    pub fn new(source_url: &str, save_dir: &Path) -> Result<Self> {
        let url = Url::parse(source_url).map_err(|e| Error::download(source_url, e))?;
        let destination =
            destination_path(save_dir, &url).map_err(|e| Error::download(source_url, e))?;

        Ok(Self {
            source_url: url,
            destination,
        })
    }
}
