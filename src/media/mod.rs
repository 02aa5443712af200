//! Media module for post representation and URL extraction.

pub mod item;
pub mod parser;

pub use item::{CarouselItem, PostMediaNode, ResolutionVariant};
pub use parser::{extract_media_urls, select_best_variant};
