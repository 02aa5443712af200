//! Post media representation.

use crate::api::types::{DisplayResource, MediaNode, ShortcodeMedia};
use crate::error::{Error, Result};

/// One candidate rendition of an image.
///
/// Both fields are optional because the embedded payload is not trusted: a
/// variant without a url or a width is kept but never selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionVariant {
    /// Direct URL of this rendition.
    pub url: Option<String>,

    /// Width in pixels, used as the quality proxy.
    pub width: Option<u64>,
}

impl ResolutionVariant {
    /// Create a valid variant.
    pub fn new(url: impl Into<String>, width: u64) -> Self {
        Self {
            url: Some(url.into()),
            width: Some(width),
        }
    }

    /// The (url, width) pair, if both are present and the url is non-empty.
    pub fn as_valid(&self) -> Option<(&str, u64)> {
        match (self.url.as_deref(), self.width) {
            (Some(url), Some(width)) if !url.is_empty() => Some((url, width)),
            _ => None,
        }
    }
}

impl From<DisplayResource> for ResolutionVariant {
    fn from(resource: DisplayResource) -> Self {
        Self {
            url: resource.src,
            width: resource.config_width,
        }
    }
}

/// A single media child of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselItem {
    Video { url: String },
    Image { variants: Vec<ResolutionVariant> },
}

/// The media content of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMediaNode {
    Video { url: String },
    Image { variants: Vec<ResolutionVariant> },
    Carousel { items: Vec<CarouselItem> },
}

impl CarouselItem {
    /// Convert a raw carousel child. Returns `None` for a video without a URL.
    fn from_node(node: MediaNode) -> Option<Self> {
        if node.is_video == Some(true) {
            return match node.video_url {
                Some(url) => Some(CarouselItem::Video { url }),
                None => {
                    tracing::debug!(
                        "Skipping carousel video without video_url (id: {})",
                        node.id.as_deref().unwrap_or("unknown")
                    );
                    None
                }
            };
        }

        Some(CarouselItem::Image {
            variants: into_variants(node.display_resources),
        })
    }
}

impl TryFrom<ShortcodeMedia> for PostMediaNode {
    type Error = Error;

    /// Carousel detection takes precedence over video detection, which takes
    /// precedence over the image fallback.
    fn try_from(media: ShortcodeMedia) -> Result<Self> {
        if let Some(sidecar) = media.edge_sidecar_to_children {
            let items = sidecar
                .edges
                .into_iter()
                .filter_map(|edge| edge.node)
                .filter_map(CarouselItem::from_node)
                .collect();
            return Ok(PostMediaNode::Carousel { items });
        }

        let node = media.node;
        if node.is_video == Some(true) {
            let url = node.video_url.ok_or_else(|| {
                Error::PayloadShape("video post has no video_url".to_string())
            })?;
            return Ok(PostMediaNode::Video { url });
        }

        Ok(PostMediaNode::Image {
            variants: into_variants(node.display_resources),
        })
    }
}

fn into_variants(resources: Vec<DisplayResource>) -> Vec<ResolutionVariant> {
    resources
        .into_iter()
        .map(ResolutionVariant::from)
        .collect()
}
