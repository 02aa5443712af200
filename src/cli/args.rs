//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

/// Post media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "post-media-dl",
    version,
    about = "Download the images and videos of a single post",
    long_about = "Fetches a post page, reads the media description embedded in it and downloads \
                  every image (in its highest resolution) and video to a directory."
)]
pub struct Args {
    /// URL of the post, e.g. https://www.instagram.com/p/<code>/
    pub url: String,

    /// Directory to save the media files in (must exist).
    #[arg(short = 'd', long = "directory", env = "MEDIA_SAVE_DIR")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum simultaneous downloads per URL scheme.
    #[arg(long = "max-connections")]
    pub max_connections: Option<usize>,

    /// List the files that would be downloaded without downloading them.
    #[arg(long)]
    pub dry_run: bool,

    /// Only log failures and the final summary.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.download_directory {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.http.user_agent = user_agent.clone();
        }

        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }

        if let Some(max_connections) = self.max_connections {
            config.http.max_connections_per_scheme = max_connections;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
