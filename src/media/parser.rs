//! Media URL selection and extraction.

use crate::media::item::{CarouselItem, PostMediaNode, ResolutionVariant};

/// Select the URL of the widest valid variant.
///
/// Scans left to right with `>=`, so on equal widths the later variant wins.
/// Returns `None` when no variant has both a url and a width.
pub fn select_best_variant(variants: &[ResolutionVariant]) -> Option<&str> {
    let mut best: Option<(&str, u64)> = None;

    for (url, width) in variants.iter().filter_map(ResolutionVariant::as_valid) {
        match best {
            Some((_, best_width)) if width < best_width => {}
            _ => best = Some((url, width)),
        }
    }

    best.map(|(url, _)| url)
}

/// Flatten a post into the ordered list of direct media URLs to download.
pub fn extract_media_urls(node: &PostMediaNode) -> Vec<String> {
    match node {
        PostMediaNode::Carousel { items } => items
            .iter()
            .filter_map(|item| match item {
                CarouselItem::Video { url } => Some(url.clone()),
                CarouselItem::Image { variants } => {
                    select_best_variant(variants).map(str::to_string)
                }
            })
            .collect(),
        PostMediaNode::Video { url } => vec![url.clone()],
        PostMediaNode::Image { variants } => select_best_variant(variants)
            .map(|url| vec![url.to_string()])
            .unwrap_or_default(),
    }
}
