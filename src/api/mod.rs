//! Post page access.
//!
//! This module provides:
//! - HTTP client for post pages and media files
//! - Embedded shared-data payload extraction
//! - Payload type definitions

pub mod client;
pub mod payload;
pub mod types;

pub use client::PostClient;
pub use payload::{extract_shared_data, find_shortcode_media, locate_post_media};
pub use types::*;
