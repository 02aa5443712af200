//! Download module for media retrieval.
//!
//! This module provides:
//! - Per-scheme connection pool
//! - Download tasks and batch results
//! - Single media file downloading
//! - Concurrent batch downloading
//! - The single post pipeline

pub mod batch;
pub mod media;
pub mod pool;
pub mod single;
pub mod state;
pub mod task;

pub use batch::download_batch;
pub use media::download_media_item;
pub use pool::{ConnectionPool, Scheme};
pub use single::{download_post, fetch_media_urls, plan_downloads};
pub use state::{BatchReport, FailedDownload};
pub use task::DownloadTask;
