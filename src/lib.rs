//! post-media-dl - download the media of a single social-media post
//!
//! This library fetches a post page, reads the post description that the page
//! embeds as `window._sharedData = {...};` and downloads every media item.
//!
//! # Features
//!
//! - Single image, single video and carousel posts
//! - Highest-resolution image selection
//! - Concurrent downloads, capped per URL scheme
//! - Per-item failure isolation
//!
//! # Example
//!
//! ```no_run
//! use post_media_dl::{download_post, Config, ConnectionPool, PostClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.options.download_directory = Some("downloads".into());
//!
//!     let client = PostClient::new(&config.http)?;
//!     let pool = ConnectionPool::new(config.http.max_connections_per_scheme);
//!
//!     let report = download_post(
//!         &client,
//!         &pool,
//!         &config,
//!         "https://www.instagram.com/p/CxYz123/",
//!     )
//!     .await?;
//!     println!("{} files downloaded", report.downloaded_count());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{locate_post_media, PostClient};
pub use config::Config;
pub use download::{download_post, fetch_media_urls, BatchReport, ConnectionPool, DownloadTask};
pub use error::{Error, Result};
pub use media::{extract_media_urls, select_best_variant, PostMediaNode, ResolutionVariant};
